mod chart;
mod table;

use std::io::{self, Write};

use serde::Serialize;
use stockpulse_core::{CleanedPriceSeries, FailureKind, FetchFailure, SeriesSummary};

use crate::cli::OutputFormat;
use crate::commands::{Report, ReportBody};
use crate::error::CliError;
use crate::metadata::Metadata;

/// Render a report to stdout.
pub fn render(report: &Report, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report, format, pretty)?;
    out.flush()?;
    Ok(())
}

pub fn write_report<W: Write>(
    out: &mut W,
    report: &Report,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => write_json(out, report, pretty),
        OutputFormat::Table => table::write_report(out, report),
    }
}

#[derive(Debug, Serialize)]
struct Envelope<'a, T: Serialize> {
    meta: &'a Metadata,
    data: Option<T>,
    errors: Vec<EnvelopeError<'a>>,
}

#[derive(Debug, Serialize)]
struct EnvelopeError<'a> {
    code: &'static str,
    #[serde(flatten)]
    kind: FailureKind,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
}

impl<'a> From<&'a FetchFailure> for EnvelopeError<'a> {
    fn from(failure: &'a FetchFailure) -> Self {
        Self {
            code: failure.kind.code(),
            kind: failure.kind,
            message: &failure.message,
            detail: failure.detail.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
struct HistoryData<'a> {
    #[serde(flatten)]
    series: &'a CleanedPriceSeries,
    summary: Option<SeriesSummary>,
}

fn write_json<W: Write>(out: &mut W, report: &Report, pretty: bool) -> Result<(), CliError> {
    let errors: Vec<EnvelopeError<'_>> = report
        .failure()
        .map(EnvelopeError::from)
        .into_iter()
        .collect();
    let value = match &report.body {
        ReportBody::History(history) => serde_json::to_value(Envelope {
            meta: &report.meta,
            data: history.outcome.series().map(|series| HistoryData {
                series,
                summary: SeriesSummary::from_series(series),
            }),
            errors,
        })?,
        ReportBody::Normalize(normalize) => serde_json::to_value(Envelope {
            meta: &report.meta,
            data: Some(normalize),
            errors,
        })?,
    };

    if pretty {
        serde_json::to_writer_pretty(&mut *out, &value)?;
    } else {
        serde_json::to_writer(&mut *out, &value)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Price with thousands separators; whole values print without decimals.
pub fn format_price(value: f64) -> String {
    let text = if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    };
    group_digits(&text)
}

pub fn format_volume(volume: u64) -> String {
    group_digits(&volume.to_string())
}

/// Signed percent with two decimals, `-` when undefined.
pub fn format_change(change_pct: Option<f64>) -> String {
    match change_pct {
        Some(value) => format!("{value:+.2}%"),
        None => String::from("-"),
    }
}

fn group_digits(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
