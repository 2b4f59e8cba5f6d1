use std::io::prelude::*;

use failure::Error;
use serde::Serialize;

use crate::render::Renderer;
use crate::result::{ReportRow, ReportTable};

pub const TABLE_PLACEHOLDER: &str = "table_json";

/// Largest `PRECISION` that still rounds meaningfully in an `f64`.
pub const MAX_PRECISION: u32 = 15;

#[derive(Serialize)]
struct RoundedRow<'a> {
    url: &'a str,
    count: u64,
    count_perc: f64,
    time_sum: f64,
    time_perc: f64,
    time_avg: f64,
    time_max: f64,
    time_med: f64,
}

fn round(value: f64, precision: u32) -> f64 {
    if precision > MAX_PRECISION {
        return value;
    }

    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

impl<'a> RoundedRow<'a> {
    fn new(row: &'a ReportRow, precision: u32) -> RoundedRow<'a> {
        RoundedRow {
            url: &row.url,
            count: row.count,
            count_perc: round(row.count_perc, precision),
            time_sum: round(row.time_sum, precision),
            time_perc: round(row.time_perc, precision),
            time_avg: round(row.time_avg, precision),
            time_max: round(row.time_max, precision),
            time_med: round(row.time_med, precision),
        }
    }
}

/// JSON array of the rows, numbers rounded to `precision` decimal places.
///
/// `<`, `>` and `&` are written as unicode escapes so URLs can't close the
/// `<script>` element the table is embedded in.
pub fn table_json(table: &ReportTable, precision: u32) -> serde_json::Result<String> {
    let rows: Vec<RoundedRow> = table.iter().map(|row| RoundedRow::new(row, precision)).collect();
    let json = serde_json::to_string(&rows)?;

    let mut escaped = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            c => escaped.push(c),
        }
    }

    Ok(escaped)
}

/// Replaces `$name` and `${name}` with `value`, `$$` with `$`. Any other
/// `$` sequence is kept as it is.
pub fn substitute(template: &str, name: &str, value: &str) -> String {
    let mut output = String::with_capacity(template.len() + value.len());
    let mut rest = template;

    while let Some(position) = rest.find('$') {
        output.push_str(&rest[..position]);
        let after = &rest[position + 1..];

        if after.starts_with('$') {
            output.push('$');
            rest = &after[1..];
            continue;
        }

        if after.starts_with('{')
            && after[1..].starts_with(name)
            && after[1 + name.len()..].starts_with('}')
        {
            output.push_str(value);
            rest = &after[name.len() + 2..];
            continue;
        }

        if after.starts_with(name) && !continues_identifier(&after[name.len()..]) {
            output.push_str(value);
            rest = &after[name.len()..];
            continue;
        }

        output.push('$');
        rest = after;
    }

    output.push_str(rest);
    output
}

fn continues_identifier(text: &str) -> bool {
    text.chars()
        .next()
        .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
}

pub struct TemplateRenderer<'a> {
    template: String,
    precision: u32,
    stream: &'a mut dyn Write,
}

impl<'a> TemplateRenderer<'a> {
    pub fn new(template: String, precision: u32, stream: &'a mut dyn Write) -> TemplateRenderer<'a> {
        TemplateRenderer {
            template,
            precision,
            stream,
        }
    }
}

impl<'a> Renderer for TemplateRenderer<'a> {
    fn render(&mut self, table: &ReportTable) -> Result<(), Error> {
        let json = table_json(table, self.precision)?;
        let document = substitute(&self.template, TABLE_PLACEHOLDER, &json);

        self.stream.write_all(document.as_bytes())?;
        self.stream.flush()?;

        Ok(())
    }
}
