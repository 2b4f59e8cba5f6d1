#[macro_use]
extern crate log;
#[macro_use]
extern crate clap;

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use chrono::Local;
use env_logger::{Builder, Target};
use log::LevelFilter;

mod analyzer;
mod args;
mod config;
mod discovery;
mod error;
mod log_parser;
mod render;
mod result;
mod top_n;

use crate::analyzer::aggregated_request_times;
use crate::config::Config;
use crate::error::AnalyzerError;

fn init_logging(log: Option<&Path>) -> Result<(), AnalyzerError> {
    let mut builder = Builder::new();

    builder
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                &record.level().as_str()[..1],
                record.args()
            )
        });

    if let Some(path) = log {
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|err| AnalyzerError::Config {
                path: path.display().to_string(),
                reason: format!("can't open LOG file: {}", err),
            })?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    let _ = builder.try_init();

    Ok(())
}

/// Builds the report for the newest log and returns its path.
fn run(config: &Config) -> Result<PathBuf, AnalyzerError> {
    fs::create_dir_all(&config.report_dir).map_err(|err| AnalyzerError::Render {
        path: config.report_dir.display().to_string(),
        reason: format!("can't create report dir: {}", err),
    })?;

    let log_file = discovery::latest_log(&config.log_dir)?;
    info!("Found latest logfile {}", log_file.path.display());

    let report_path = render::report_path(
        &config.report_dir,
        log_file.date,
        &config.report_filename_template,
    )?;
    render::ensure_report_missing(&report_path)?;

    let lines = log_parser::open(&log_file.path, log_file.format).map_err(|cause| {
        AnalyzerError::LogRead {
            path: log_file.path.display().to_string(),
            cause,
        }
    })?;
    let state =
        aggregated_request_times::aggregate(lines, &log_file.path, config.parse_error_limit)?;

    info!(
        "Start calculating statistics for {} urls, {} lines skipped",
        state.urls.len(),
        state.failure_count
    );
    let rows = analyzer::generate_stats(&state);
    let table = top_n::select_top(rows, config.report_size, config.sort_field);
    debug!("Selected {} rows by {}", table.len(), config.sort_field);

    info!("Start generating report");
    render::write_report(
        &table,
        &config.report_dir.join(&config.report_template),
        &report_path,
        config.precision,
    )?;

    info!("Report {} was successfully generated", report_path.display());

    Ok(report_path)
}

fn main() {
    let args = match args::parse_args(env::args()) {
        Ok(args) => args,
        Err(err) => match err.downcast::<clap::Error>() {
            Ok(clap_error) => clap_error.exit(),
            Err(err) => {
                eprintln!("{}", err);
                process::exit(1);
            }
        },
    };

    let config = match Config::from_file(Path::new(&args.config)) {
        Ok(config) => config,
        Err(err) => {
            let _ = init_logging(None);
            error!("{}", err);
            process::exit(err.exit_code());
        }
    };

    if let Err(err) = init_logging(config.log.as_ref().map(|path| path.as_path())) {
        let _ = init_logging(None);
        error!("{}", err);
        process::exit(err.exit_code());
    }

    if let Err(err) = run(&config) {
        error!("Log analysis finished with error. {}", err);
        process::exit(err.exit_code());
    }
}
