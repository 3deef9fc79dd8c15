use clap::Args;
use toxscore_core::input::{DEFAULT_MAX_COMMENTS, validate_url, video_id};
use toxscore_core::{QueryState, TicketCounter};

use super::{Failure, report};
use crate::api::ScoringClient;
use crate::render::OutputFormat;

#[derive(Args)]
pub struct YoutubeArgs {
    /// Video URL (e.g. https://www.youtube.com/watch?v=...)
    pub url: String,

    /// Maximum number of comments the backend should fetch and score
    #[arg(long, env = "TOXSCORE_MAX_COMMENTS", default_value_t = DEFAULT_MAX_COMMENTS)]
    pub max_comments: u32,
}

pub async fn run(client: &ScoringClient, args: YoutubeArgs, output: OutputFormat) -> i32 {
    let mut tickets = TicketCounter::new();
    let ticket = tickets.next();
    let state = QueryState::Idle.submit(ticket);

    let (state, failure) = match validate_url(&args.url) {
        Err(err) => {
            let failure = Failure::from(&err);
            (state.reject(ticket, err), Some(failure))
        }
        Ok(url) => {
            match video_id(&url) {
                Some(id) => tracing::debug!(video_id = id, "resolved video id"),
                None => tracing::warn!(%url, "URL does not look like a YouTube video link"),
            }
            let outcome = client.score_youtube(&url, args.max_comments).await;
            let failure = outcome.as_ref().err().map(Failure::from);
            (state.settle(ticket, outcome), failure)
        }
    };

    report(&state, failure, output)
}
