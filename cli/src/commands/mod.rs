pub mod comment;
pub mod health;
pub mod youtube;

use toxscore_core::error::{ClientError, ValidationError, exit};
use toxscore_core::{QueryState, present};

use crate::render::{OutputFormat, print_result};
use crate::util::print_error;

/// How a failed query is reported and what the process exits with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub code: &'static str,
    pub exit_code: i32,
    pub docs_hint: Option<&'static str>,
}

impl From<&ValidationError> for Failure {
    fn from(err: &ValidationError) -> Self {
        Self {
            code: err.code(),
            exit_code: err.exit_code(),
            docs_hint: None,
        }
    }
}

impl From<&ClientError> for Failure {
    fn from(err: &ClientError) -> Self {
        let docs_hint = match err {
            ClientError::Connection(_) => {
                Some("Is the scoring API running? Check TOXSCORE_API_URL.")
            }
            _ => None,
        };
        Self {
            code: err.code(),
            exit_code: err.exit_code(),
            docs_hint,
        }
    }
}

/// Print a settled query and return the process exit code.
pub fn report(state: &QueryState, failure: Option<Failure>, output: OutputFormat) -> i32 {
    match state {
        QueryState::Success { result, .. } => {
            print_result(&present(result), output);
            exit::SUCCESS
        }
        QueryState::Failed { message, .. } => {
            let failure = failure.unwrap_or(Failure {
                code: "query_failed",
                exit_code: exit::SERVER_ERROR,
                docs_hint: None,
            });
            print_error(failure.code, message, failure.docs_hint);
            failure.exit_code
        }
        QueryState::Idle | QueryState::Loading { .. } => {
            tracing::error!(?state, "query did not settle");
            print_error("query_failed", "Query did not complete", None);
            exit::SERVER_ERROR
        }
    }
}
