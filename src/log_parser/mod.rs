use std::fs::File;
use std::io;
use std::io::BufRead;
use std::path::Path;

use flate2::read::GzDecoder;

use crate::discovery::LogFormat;

pub mod log_events;
use self::log_events::*;

/// Single forward pass over a log, one `ParseOutcome` per line.
pub struct LogLines<R: BufRead> {
    input: R,
    parser: LineParser,
    buffer: Vec<u8>,
}

impl<R: BufRead> LogLines<R> {
    pub fn new(input: R) -> LogLines<R> {
        LogLines {
            input,
            parser: LineParser::new(),
            buffer: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for LogLines<R> {
    type Item = io::Result<ParseOutcome>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();

        match self.input.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                let line = String::from_utf8_lossy(&self.buffer);
                Some(Ok(self.parser.parse(&line)))
            }
            Err(err) => Some(Err(err)),
        }
    }
}

pub fn open(path: &Path, format: LogFormat) -> io::Result<LogLines<Box<dyn BufRead>>> {
    let file = File::open(path)?;

    let input: Box<dyn BufRead> = match format {
        LogFormat::Plain => Box::new(io::BufReader::new(file)),
        LogFormat::Gzip => Box::new(io::BufReader::new(GzDecoder::new(file))),
    };

    Ok(LogLines::new(input))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;

    use super::*;

    #[test]
    fn test_parse_simple() {
        let outcomes: Vec<ParseOutcome> =
            open(Path::new("src/test/nginx-access-ui.log-20170704.log"), LogFormat::Plain)
                .unwrap()
                .map(|outcome| outcome.unwrap())
                .collect();

        let failures = outcomes.iter().filter(|o| **o == ParseOutcome::Failure).count();

        assert_eq!(outcomes.len(), 10);
        assert_eq!(failures, 1);
    }

    #[test]
    fn test_parse_gzip_same_as_plain() {
        let plain_path = Path::new("src/test/nginx-access-ui.log-20170704.log");
        let dir = tempfile::tempdir().unwrap();
        let gz_path = dir.path().join("nginx-access-ui.log-20170704.gz");

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&fs::read(plain_path).unwrap()).unwrap();
        fs::write(&gz_path, encoder.finish().unwrap()).unwrap();

        let plain: Vec<ParseOutcome> = open(plain_path, LogFormat::Plain)
            .unwrap()
            .map(|outcome| outcome.unwrap())
            .collect();
        let gzip: Vec<ParseOutcome> = open(&gz_path, LogFormat::Gzip)
            .unwrap()
            .map(|outcome| outcome.unwrap())
            .collect();

        assert_eq!(plain, gzip);
    }

    #[test]
    fn test_corrupt_gzip_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let gz_path = dir.path().join("nginx-access-ui.log-20170704.gz");
        fs::write(&gz_path, b"definitely not gzip").unwrap();

        let mut lines = open(&gz_path, LogFormat::Gzip).unwrap();

        assert!(lines.next().unwrap().is_err());
    }

    #[test]
    fn test_invalid_utf8_is_a_failed_line() {
        let input: &[u8] = b"\xff\xfe broken\n";

        let outcomes: Vec<ParseOutcome> = LogLines::new(input)
            .map(|outcome| outcome.unwrap())
            .collect();

        assert_eq!(outcomes, vec![ParseOutcome::Failure]);
    }

    #[test]
    fn test_last_line_without_newline() {
        let input: &[u8] = b"first\nsecond";

        assert_eq!(LogLines::new(input).count(), 2);
    }
}
