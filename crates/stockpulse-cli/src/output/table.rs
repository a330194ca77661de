use std::io::Write;

use stockpulse_core::{format_date, CleanedPriceSeries, FetchFailure, FetchOutcome, SeriesSummary};

use crate::commands::{HistoryReport, NormalizeReport, Report, ReportBody};
use crate::error::CliError;

use super::chart::{line_chart, DEFAULT_HEIGHT};
use super::{format_change, format_price, format_volume};

const CODE_HINT: &str =
    "hint: KOSPI codes are six digits, e.g. 005930; append .KQ for KOSDAQ codes such as 035720.KQ";

pub fn write_report<W: Write>(out: &mut W, report: &Report) -> Result<(), CliError> {
    match &report.body {
        ReportBody::History(history) => write_history(out, history, report.meta.source),
        ReportBody::Normalize(normalize) => write_normalize(out, normalize),
    }
}

fn write_history<W: Write>(
    out: &mut W,
    history: &HistoryReport,
    source: Option<&str>,
) -> Result<(), CliError> {
    match &history.outcome {
        FetchOutcome::Ready(series) => {
            writeln!(
                out,
                "{}  {} sessions, {}..{} ({} day lookback, source {})",
                series.symbol(),
                series.len(),
                format_date(series.range().start()),
                format_date(series.range().end()),
                history.query.lookback_days(),
                source.unwrap_or("unknown"),
            )?;
            if let Some(summary) = SeriesSummary::from_series(series) {
                writeln!(out)?;
                write_metrics(out, &summary)?;
            }
            writeln!(out)?;
            write_chart(out, series, history.chart_width)?;
            writeln!(out)?;
            write_records(out, series)?;
        }
        FetchOutcome::Failed(failure) => write_failure(out, failure)?,
    }
    Ok(())
}

fn write_metrics<W: Write>(out: &mut W, summary: &SeriesSummary) -> Result<(), CliError> {
    writeln!(
        out,
        "{:<14}{:>12}  {}  as of {}",
        "Latest close",
        format_price(summary.latest_close),
        format_change(summary.latest_change_pct),
        format_date(summary.latest_date),
    )?;
    writeln!(out, "{:<14}{:>12}", "Period high", format_price(summary.max_close))?;
    writeln!(out, "{:<14}{:>12}", "Period low", format_price(summary.min_close))?;
    Ok(())
}

fn write_chart<W: Write>(
    out: &mut W,
    series: &CleanedPriceSeries,
    width: usize,
) -> Result<(), CliError> {
    let closes: Vec<f64> = series.closes().collect();
    let lines = line_chart(&closes, width, DEFAULT_HEIGHT);
    for line in &lines {
        writeln!(out, "{line}")?;
    }
    if let (Some(first), Some(last)) = (series.records().first(), series.last()) {
        writeln!(out, "  {} .. {}", format_date(first.date), format_date(last.date))?;
    }
    Ok(())
}

fn write_records<W: Write>(out: &mut W, series: &CleanedPriceSeries) -> Result<(), CliError> {
    writeln!(out, "{:<10}  {:>12}  {:>14}  {:>9}", "date", "close", "volume", "change")?;
    for record in series.records() {
        writeln!(
            out,
            "{:<10}  {:>12}  {:>14}  {:>9}",
            format_date(record.date),
            format_price(record.close),
            format_volume(record.volume),
            format_change(record.change_pct),
        )?;
    }
    Ok(())
}

fn write_failure<W: Write>(out: &mut W, failure: &FetchFailure) -> Result<(), CliError> {
    writeln!(out, "error: {}", failure.message)?;
    writeln!(out, "{CODE_HINT}")?;
    Ok(())
}

fn write_normalize<W: Write>(out: &mut W, normalize: &NormalizeReport) -> Result<(), CliError> {
    writeln!(out, "{} -> {} ({})", normalize.input, normalize.symbol, normalize.market)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use stockpulse_core::{
        DateRange, Market, PriceQuery, QualifiedSymbol, RawPriceRecord, RawPriceSeries,
    };
    use time::macros::date;

    use super::*;
    use crate::metadata::Metadata;

    fn range() -> DateRange {
        DateRange::lookback(date!(2024 - 03 - 07), 30).expect("range")
    }

    fn render(body: ReportBody) -> String {
        let report = Report {
            meta: Metadata::new(Some("yahoo"), 0),
            body,
        };
        let mut buffer = Vec::new();
        write_report(&mut buffer, &report).expect("render");
        String::from_utf8(buffer).expect("utf-8")
    }

    fn history(outcome: FetchOutcome) -> ReportBody {
        ReportBody::History(HistoryReport {
            query: PriceQuery::new("005930", 30).expect("query"),
            outcome,
            chart_width: 60,
        })
    }

    #[test]
    fn ready_history_shows_metrics_chart_and_rows() {
        let records = vec![
            RawPriceRecord::close_only(date!(2024 - 03 - 04), 70_000.0, 11_000_000).expect("row"),
            RawPriceRecord::close_only(date!(2024 - 03 - 05), 71_400.0, 12_500_000).expect("row"),
            RawPriceRecord::close_only(date!(2024 - 03 - 06), 69_300.0, 9_800_000).expect("row"),
        ];
        let series =
            RawPriceSeries::new(QualifiedSymbol::normalize("005930"), records).derive(range());

        let text = render(history(FetchOutcome::Ready(series)));

        assert!(text.starts_with("005930.KS  3 sessions, 2024-02-06..2024-03-07"));
        assert!(text.contains("source yahoo"));
        assert!(text.contains("Latest close        69,300  -2.94%  as of 2024-03-06"));
        assert!(text.contains("Period high         71,400"));
        assert!(text.contains("Period low          69,300"));
        assert!(text.contains("71,400 ┤"));
        assert!(text.contains("  2024-03-04 .. 2024-03-06"));
        assert!(text.contains("2024-03-05        71,400      12,500,000     +2.00%"));
        assert!(text.contains("2024-03-04        70,000      11,000,000          -"));
    }

    #[test]
    fn failed_history_shows_message_and_hint() {
        let symbol = QualifiedSymbol::normalize("999999");
        let failure = FetchFailure::data_unavailable(&symbol, range());

        let text = render(history(FetchOutcome::Failed(failure)));

        let mut lines = text.lines();
        let first = lines.next().expect("error line");
        assert!(first.starts_with("error: "));
        assert!(first.contains("999999.KS"));
        assert_eq!(lines.next(), Some(CODE_HINT));
        assert!(!text.contains('┤'));
    }

    #[test]
    fn normalize_prints_mapping() {
        let text = render(ReportBody::Normalize(NormalizeReport {
            input: String::from("005930"),
            symbol: QualifiedSymbol::normalize("005930"),
            market: Market::Kospi,
        }));

        assert_eq!(text, "005930 -> 005930.KS (ks)\n");
    }
}
