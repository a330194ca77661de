use std::time::Instant;

use stockpulse_core::{PriceQuery, PriceService};

use crate::cli::HistoryArgs;
use crate::error::CliError;
use crate::metadata::Metadata;

use super::{HistoryReport, Report, ReportBody};

pub async fn run(args: &HistoryArgs, service: &PriceService) -> Result<Report, CliError> {
    let query = PriceQuery::new(&args.code, args.days)?.with_default_market(args.market.into());

    let started = Instant::now();
    let outcome = service.run(&query).await?;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    if let Some(failure) = outcome.failure() {
        log::info!(
            "{} ({})",
            failure.message,
            failure.detail.as_deref().unwrap_or("no provider detail")
        );
    }

    Ok(Report {
        meta: Metadata::new(Some(service.source_id()), latency_ms),
        body: ReportBody::History(HistoryReport {
            query,
            outcome,
            chart_width: args.chart_width,
        }),
    })
}
