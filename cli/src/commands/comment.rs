use clap::Args;
use toxscore_core::input::validate_comments;
use toxscore_core::{QueryState, TicketCounter, normalize_with_texts};

use super::{Failure, report};
use crate::api::ScoringClient;
use crate::render::OutputFormat;
use crate::util::{exit_error, read_text_from_file};

#[derive(Args)]
pub struct CommentArgs {
    /// Comments to score; each argument is one line
    pub texts: Vec<String>,

    /// Read comments from a file, one per line (use '-' for stdin)
    #[arg(long, short = 'f', conflicts_with = "texts")]
    pub file: Option<String>,
}

/// The raw multi-line input, as a user would have typed it.
fn raw_input(args: &CommentArgs) -> Result<String, String> {
    match &args.file {
        Some(path) => read_text_from_file(path),
        None => Ok(args.texts.join("\n")),
    }
}

pub async fn run(client: &ScoringClient, args: CommentArgs, output: OutputFormat) -> i32 {
    let raw = match raw_input(&args) {
        Ok(raw) => raw,
        Err(e) => exit_error(&e, Some("Provide a readable file or use '-' for stdin")),
    };

    let mut tickets = TicketCounter::new();
    let ticket = tickets.next();
    let state = QueryState::Idle.submit(ticket);

    let (state, failure) = match validate_comments(&raw) {
        Err(err) => {
            let failure = Failure::from(&err);
            (state.reject(ticket, err), Some(failure))
        }
        Ok(texts) => {
            let outcome = client
                .score_texts(&texts)
                .await
                .map(|body| normalize_with_texts(&body, &texts));
            let failure = outcome.as_ref().err().map(Failure::from);
            (state.settle_with(ticket, outcome), failure)
        }
    };

    report(&state, failure, output)
}
