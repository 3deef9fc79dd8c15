use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

/// Default number of comments requested for a video.
pub const DEFAULT_MAX_COMMENTS: u32 = 300;

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|/shorts/|/embed/|youtu\.be/)([A-Za-z0-9_-]{11})")
        .unwrap_or_else(|e| panic!("invalid video id pattern: {e}"))
});

/// One comment per line; lines are trimmed and blank lines dropped.
pub fn split_comments(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn validate_comments(raw: &str) -> Result<Vec<String>, ValidationError> {
    let comments = split_comments(raw);
    if comments.is_empty() {
        return Err(ValidationError::EmptyComments);
    }
    Ok(comments)
}

/// Returns the trimmed URL. Only blank input is rejected here; whether the
/// URL points at a real video is for the backend to decide.
pub fn validate_url(raw: &str) -> Result<String, ValidationError> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    Ok(url.to_string())
}

/// Extract the 11-character video id from the common YouTube URL forms.
pub fn video_id(url: &str) -> Option<&str> {
    VIDEO_ID_RE
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
