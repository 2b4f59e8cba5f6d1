use clap::{App, Arg};
use failure::Error;

#[derive(PartialEq, Debug)]
pub struct LogAnalyzerArgs {
    pub config: String,
}

pub fn parse_args<T>(args: T) -> Result<LogAnalyzerArgs, Error>
where
    T: IntoIterator<Item = String>,
{
    let app = App::new("nginx log analyzer")
        .author(crate_authors!())
        .version(crate_version!())
        .after_help(crate_description!())
        .arg(
            Arg::with_name("config")
                .value_name("FILE")
                .long("config")
                .help("Path to custom config file")
                .takes_value(true)
                .default_value("./log_analyzer.json"),
        )
        .get_matches_from_safe(args)?;

    let config = app.value_of("config").unwrap_or("./log_analyzer.json").to_string();

    Ok(LogAnalyzerArgs { config })
}
