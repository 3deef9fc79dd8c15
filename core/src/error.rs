use thiserror::Error;

/// Input rejected locally. No request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter at least one comment.")]
    EmptyComments,
    #[error("Please paste a YouTube video URL.")]
    EmptyUrl,
}

/// A scoring call that did not produce a usable response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Non-2xx status. Displays the response body verbatim.
    #[error("{}", status_message(.status, .body))]
    Status { status: u16, body: String },
    #[error("{0}")]
    Connection(String),
    /// Body was not valid JSON.
    #[error("Failed to parse response as JSON: {0}")]
    Decode(String),
}

fn status_message(status: &u16, body: &str) -> String {
    if body.trim().is_empty() {
        format!("Scoring request failed with status {status}")
    } else {
        body.to_string()
    }
}

/// Error codes used in CLI error output
pub mod codes {
    pub const VALIDATION_FAILED: &str = "validation_failed";
    pub const REQUEST_REJECTED: &str = "request_rejected";
    pub const BACKEND_ERROR: &str = "backend_error";
    pub const CONNECTION_ERROR: &str = "connection_error";
    pub const DECODE_ERROR: &str = "decode_error";
}

/// Process exit codes: 0=success, 1=client error (4xx), 2=server error (5xx),
/// 3=connection error, 4=usage error
pub mod exit {
    pub const SUCCESS: i32 = 0;
    pub const CLIENT_ERROR: i32 = 1;
    pub const SERVER_ERROR: i32 = 2;
    pub const CONNECTION_ERROR: i32 = 3;
    pub const USAGE_ERROR: i32 = 4;
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        codes::VALIDATION_FAILED
    }

    pub fn exit_code(&self) -> i32 {
        exit::USAGE_ERROR
    }
}

impl ClientError {
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Status { status, .. } if (400..500).contains(status) => {
                codes::REQUEST_REJECTED
            }
            ClientError::Status { .. } => codes::BACKEND_ERROR,
            ClientError::Connection(_) => codes::CONNECTION_ERROR,
            ClientError::Decode(_) => codes::DECODE_ERROR,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            ClientError::Status { status, .. } if (400..500).contains(status) => {
                exit::CLIENT_ERROR
            }
            ClientError::Status { .. } => exit::SERVER_ERROR,
            ClientError::Connection(_) | ClientError::Decode(_) => exit::CONNECTION_ERROR,
        }
    }
}
