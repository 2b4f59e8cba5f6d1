use std::fmt::Write as FmtWrite;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use failure::Error;
use tempfile::NamedTempFile;

use crate::error::AnalyzerError;
use crate::result::ReportTable;

pub mod template;

pub trait Renderer {
    fn render(&mut self, table: &ReportTable) -> Result<(), Error>;
}

pub fn report_path(
    report_dir: &Path,
    date: NaiveDate,
    filename_template: &str,
) -> Result<PathBuf, AnalyzerError> {
    let mut file_name = String::new();

    write!(file_name, "{}", date.format(filename_template)).map_err(|_| AnalyzerError::Render {
        path: report_dir.join(filename_template).display().to_string(),
        reason: String::from("invalid report filename template"),
    })?;

    Ok(report_dir.join(file_name))
}

/// Fails with `ReportAlreadyExists` if there is a report at `path`.
pub fn ensure_report_missing(path: &Path) -> Result<(), AnalyzerError> {
    if path.exists() {
        return Err(AnalyzerError::ReportAlreadyExists {
            path: path.display().to_string(),
        });
    }

    Ok(())
}

/// Renders `table` into the template at `template_path` and moves the result
/// to `path`. Nothing appears at `path` unless the whole document was
/// written, and an existing file there is never replaced.
pub fn write_report(
    table: &ReportTable,
    template_path: &Path,
    path: &Path,
    precision: u32,
) -> Result<(), AnalyzerError> {
    let render_error = |reason: String| AnalyzerError::Render {
        path: path.display().to_string(),
        reason,
    };

    ensure_report_missing(path)?;

    let template = fs::read_to_string(template_path).map_err(|err| {
        render_error(format!(
            "can't read template '{}': {}",
            template_path.display(),
            err
        ))
    })?;

    let report_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(report_dir).map_err(|err| render_error(err.to_string()))?;

    {
        let mut renderer = template::TemplateRenderer::new(template, precision, staged.as_file_mut());
        renderer
            .render(table)
            .map_err(|err| render_error(err.to_string()))?;
    }

    staged
        .as_file()
        .sync_all()
        .map_err(|err| render_error(err.to_string()))?;

    match staged.persist_noclobber(path) {
        Ok(_) => Ok(()),
        Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
            Err(AnalyzerError::ReportAlreadyExists {
                path: path.display().to_string(),
            })
        }
        Err(err) => Err(render_error(err.error.to_string())),
    }
}
