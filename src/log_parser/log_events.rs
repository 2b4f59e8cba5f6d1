use regex::Regex;

// log_format ui_short '$remote_addr $remote_user  $http_x_real_ip [$time_local] "$request" '
//                     '$status $body_bytes_sent "$http_referer" '
//                     '"$http_user_agent" "$http_x_forwarded_for" "$http_X_REQUEST_ID" "$http_X_RB_USER" '
//                     '$request_time';
const LOG_LINE_PATTERN: &str = concat!(
    r"^(?P<remote_addr>.+) ",
    r"(?P<remote_user>.+)  ",
    r"(?P<http_x_real_ip>.+) ",
    r"\[(?P<time_local>.+)\] ",
    r#""(?P<request>.+)" "#,
    r"(?P<status>\d+) ",
    r"(?P<body_bytes_sent>\d+) ",
    r#""(?P<http_referer>.*)" "#,
    r#""(?P<http_user_agent>.*)" "#,
    r#""(?P<http_x_forwarded_for>.*)" "#,
    r#""(?P<http_x_request_id>.*)" "#,
    r#""(?P<http_x_rb_user>.*)" "#,
    r"(?P<request_time>.+)",
);

#[derive(PartialEq, Clone, Debug)]
pub struct ParsedRecord {
    pub url: String,
    pub request_time: f64,
}

#[derive(PartialEq, Clone, Debug)]
pub enum ParseOutcome {
    Record(ParsedRecord),
    Failure,
}

pub struct LineParser {
    pattern: Regex,
}

impl LineParser {
    pub fn new() -> LineParser {
        LineParser {
            pattern: Regex::new(LOG_LINE_PATTERN).expect("log line pattern is valid"),
        }
    }

    pub fn parse(&self, log_line: &str) -> ParseOutcome {
        let log_line = log_line.trim_end_matches(|c: char| c == '\n' || c == '\r');

        let captures = match self.pattern.captures(log_line) {
            Some(captures) => captures,
            None => return ParseOutcome::Failure,
        };

        let request_time: f64 = match captures["request_time"].trim().parse() {
            Ok(time) => time,
            Err(_) => return ParseOutcome::Failure,
        };

        if !request_time.is_finite() || request_time < 0.0 {
            return ParseOutcome::Failure;
        }

        ParseOutcome::Record(ParsedRecord {
            url: url_from_request(&captures["request"]),
            request_time,
        })
    }
}

/// Path part of an HTTP request line, e.g. `GET /index.html HTTP/1.1`.
///
/// The URL is taken verbatim, grouping relies on byte-identical strings.
fn url_from_request(request: &str) -> String {
    let mut tokens: Vec<&str> = request.split(' ').collect();

    if tokens.len() == 1 {
        return request.to_string();
    }

    tokens.remove(0);

    if tokens.len() > 1 && tokens[tokens.len() - 1].starts_with("HTTP/") {
        tokens.pop();
    }

    tokens.join(" ")
}
