use serde_json::json;
use toxscore_core::error::exit;

use super::Failure;
use crate::api::ScoringClient;
use crate::util::{print_error, to_pretty};

pub async fn run(client: &ScoringClient) -> i32 {
    match client.health().await {
        Ok(body) => {
            println!(
                "{}",
                to_pretty(&json!({
                    "api_url": client.base_url(),
                    "status": "ok",
                    "body": body
                }))
            );
            exit::SUCCESS
        }
        Err(err) => {
            let failure = Failure::from(&err);
            print_error(failure.code, &err.to_string(), failure.docs_hint);
            failure.exit_code
        }
    }
}
