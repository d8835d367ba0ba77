use anyhow::Result;
use console::Term;
use pubg_lookup_lib::{ErrorKind, parse_batch};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::CommandParams;
use crate::ExitCode;

const PROMPT: &str = "Player names or account IDs, separated by `|` (`back` to leave): ";

/// Entering one of these leaves the prompt
const EXIT_COMMANDS: [&str; 3] = ["back", "exit", "quit"];

fn is_exit_command(line: &str) -> bool {
    EXIT_COMMANDS
        .iter()
        .any(|command| line.eq_ignore_ascii_case(command))
}

/// Read batches from stdin until the user leaves or stdin ends.
///
/// The prompt and hints are written to stderr.
pub(crate) async fn interactive(params: &mut CommandParams) -> Result<ExitCode> {
    let term = Term::stderr();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        term.write_str(PROMPT)?;

        let line = tokio::select! {
            biased;
            () = params.cancel.cancelled() => return Ok(ExitCode::Interrupted),
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            term.write_line("")?;
            return Ok(ExitCode::Success);
        };

        let line = line.trim();
        if is_exit_command(line) {
            return Ok(ExitCode::Success);
        }

        let requests = parse_batch(line);
        if requests.is_empty() {
            term.write_line("Please enter at least one player name or account ID.")?;
            continue;
        }

        match params.run_batch(&requests).await {
            Ok(summary) => params.print_summary(&summary)?,
            Err(ErrorKind::Interrupted) => return Ok(ExitCode::Interrupted),
            Err(e) => return Err(e.into()),
        }
    }
}
