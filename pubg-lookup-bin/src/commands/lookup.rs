use anyhow::{Result, bail};
use pubg_lookup_lib::{ErrorKind, LookupRequest, parse_batch};

use super::CommandParams;
use crate::ExitCode;

/// Look up all batches given on the command line as one batch
pub(crate) async fn lookup(params: &mut CommandParams, inputs: &[String]) -> Result<ExitCode> {
    let requests: Vec<LookupRequest> = inputs.iter().flat_map(|input| parse_batch(input)).collect();
    if requests.is_empty() {
        bail!("No player names or account IDs given");
    }

    let summary = match params.run_batch(&requests).await {
        Ok(summary) => summary,
        Err(ErrorKind::Interrupted) => return Ok(ExitCode::Interrupted),
        Err(e) => return Err(e.into()),
    };
    params.print_summary(&summary)?;

    if summary.is_success() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::LookupFailure)
    }
}
