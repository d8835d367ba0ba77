pub(crate) mod interactive;
pub(crate) mod lookup;

pub(crate) use interactive::interactive;
pub(crate) use lookup::lookup;

use console::Term;
use pubg_lookup_lib::{
    BatchObserver, BatchOptions, BatchSummary, Client, LookupRequest, LookupResult, Result,
    ratelimit::RateGovernor, run_batch,
};
use tokio_util::sync::CancellationToken;

use crate::formatters::{result::ResultFormatter, summary::SummaryFormatter};
use crate::options::SummaryFormat;

/// Parameters passed to every command
pub(crate) struct CommandParams {
    pub(crate) client: Client,
    /// Shared by all batches of this process
    pub(crate) governor: RateGovernor,
    pub(crate) batch_options: BatchOptions,
    pub(crate) cancel: CancellationToken,
    pub(crate) result_formatter: Box<dyn ResultFormatter>,
    pub(crate) summary_formatter: Box<dyn SummaryFormatter>,
    pub(crate) format: SummaryFormat,
}

impl CommandParams {
    /// Look up one batch, printing each result as it arrives
    pub(crate) async fn run_batch(&mut self, requests: &[LookupRequest]) -> Result<BatchSummary> {
        let mut printer = ResultPrinter {
            formatter: self.result_formatter.as_ref(),
            term: result_term(self.format),
        };
        run_batch(
            &self.client,
            &mut self.governor,
            requests,
            &self.batch_options,
            &self.cancel,
            &mut printer,
        )
        .await
    }

    pub(crate) fn print_summary(&self, summary: &BatchSummary) -> anyhow::Result<()> {
        let formatted = self.summary_formatter.format(summary)?;
        Term::stdout().write_line(&formatted)?;
        Ok(())
    }
}

/// Per-item lines go to stdout, unless stdout is reserved for the JSON summary
fn result_term(format: SummaryFormat) -> Term {
    match format {
        SummaryFormat::Json => Term::stderr(),
        _ => Term::stdout(),
    }
}

struct ResultPrinter<'a> {
    formatter: &'a dyn ResultFormatter,
    term: Term,
}

impl BatchObserver for ResultPrinter<'_> {
    fn lookup_started(&mut self, index: usize, request: &LookupRequest) {
        log::debug!("[{}] Looking up `{request}`", index + 1);
    }

    fn lookup_finished(&mut self, _index: usize, result: &LookupResult) {
        if let Err(e) = self.term.write_line(&self.formatter.format_result(result)) {
            log::warn!("Cannot print result: {e}");
        }
    }
}
