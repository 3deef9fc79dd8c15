//! Query lifecycle: `Idle -> Loading -> Success | Failed`.
//!
//! States are values; every transition consumes the current state and
//! returns the next one. Each submission carries a [`Ticket`]; a settlement
//! holding an older ticket than the current state is stale and ignored, so a
//! slow early response can never replace the result of a later submission.

use serde_json::Value;

use crate::error::{ClientError, ValidationError};
use crate::normalize::normalize;
use crate::result::CanonicalResult;

/// Monotonic request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Hands out strictly increasing tickets.
#[derive(Debug, Default)]
pub struct TicketCounter {
    last: u64,
}

impl TicketCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> Ticket {
        self.last += 1;
        Ticket(self.last)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum QueryState {
    #[default]
    Idle,
    Loading {
        ticket: Ticket,
    },
    Success {
        ticket: Ticket,
        result: CanonicalResult,
    },
    Failed {
        ticket: Ticket,
        message: String,
    },
}

impl QueryState {
    pub fn ticket(&self) -> Option<Ticket> {
        match self {
            QueryState::Idle => None,
            QueryState::Loading { ticket }
            | QueryState::Success { ticket, .. }
            | QueryState::Failed { ticket, .. } => Some(*ticket),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading { .. })
    }

    pub fn result(&self) -> Option<&CanonicalResult> {
        match self {
            QueryState::Success { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Failed { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Start a request. Any previous result or error is dropped.
    pub fn submit(self, ticket: Ticket) -> Self {
        if self.is_stale(ticket) {
            return self;
        }
        tracing::debug!(ticket = ticket.get(), "query loading");
        QueryState::Loading { ticket }
    }

    /// Settle with a raw backend body. The normalizer only runs on success.
    pub fn settle(self, ticket: Ticket, outcome: Result<Value, ClientError>) -> Self {
        self.settle_with(ticket, outcome.map(|raw| normalize(&raw)))
    }

    /// Settle with an already normalized result.
    pub fn settle_with(
        self,
        ticket: Ticket,
        outcome: Result<CanonicalResult, ClientError>,
    ) -> Self {
        if self.is_stale(ticket) {
            return self;
        }
        match outcome {
            Ok(result) => {
                tracing::debug!(ticket = ticket.get(), items = result.len(), "query succeeded");
                QueryState::Success { ticket, result }
            }
            Err(err) => {
                tracing::debug!(ticket = ticket.get(), error = %err, "query failed");
                QueryState::Failed {
                    ticket,
                    message: err.to_string(),
                }
            }
        }
    }

    /// Fail a submission locally, before any request is made.
    pub fn reject(self, ticket: Ticket, err: ValidationError) -> Self {
        if self.is_stale(ticket) {
            return self;
        }
        QueryState::Failed {
            ticket,
            message: err.to_string(),
        }
    }

    fn is_stale(&self, ticket: Ticket) -> bool {
        match self.ticket() {
            Some(current) if ticket < current => {
                tracing::debug!(
                    ticket = ticket.get(),
                    current = current.get(),
                    "ignoring stale settlement"
                );
                true
            }
            _ => false,
        }
    }
}
