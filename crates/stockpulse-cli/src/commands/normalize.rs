use stockpulse_core::{QualifiedSymbol, ValidationError};

use crate::cli::NormalizeArgs;
use crate::error::CliError;
use crate::metadata::Metadata;

use super::{NormalizeReport, Report, ReportBody};

pub fn run(args: &NormalizeArgs) -> Result<Report, CliError> {
    let input = args.code.trim();
    if input.is_empty() {
        return Err(ValidationError::EmptyCode.into());
    }

    let symbol = QualifiedSymbol::normalize_with_default(input, args.market.into());
    Ok(Report {
        meta: Metadata::new(None, 0),
        body: ReportBody::Normalize(NormalizeReport {
            input: input.to_owned(),
            market: symbol.market(),
            symbol,
        }),
    })
}
