//! Shared types and logic for the toxscore client: turning scoring backend
//! responses into a uniform result and a display-ready view of it.

pub mod classify;
pub mod error;
pub mod input;
pub mod normalize;
pub mod present;
pub mod query;
pub mod result;
pub mod scores;

pub use classify::{Level, classify};
pub use error::{ClientError, ValidationError};
pub use normalize::{ResponseShape, normalize, normalize_with_texts};
pub use present::{CardView, ResultView, present};
pub use query::{QueryState, Ticket, TicketCounter};
pub use result::{AggregateSummary, CanonicalResult, Item};
pub use scores::{Probability, ScoreVector};
