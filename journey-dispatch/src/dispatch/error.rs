//! Dispatch submission errors.

/// Why a journey could not be handed to the dispatch system.
///
/// `journey_id` is the id being updated, or `None` for a new journey.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The request never produced a response (connect, TLS, timeout)
    #[error("dispatch request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Dispatch accepted the journey but the reply had no usable id
    #[error("unreadable dispatch reply: {reason}{}", echo(.body))]
    MalformedReply {
        reason: String,
        body: Option<String>,
    },

    /// Dispatch refused the journey
    #[error("dispatch refused {} with status {status}: {message}", target(.journey_id))]
    Refused {
        status: u16,
        journey_id: Option<i64>,
        message: String,
    },

    #[error("dispatch is throttling submissions")]
    Throttled,

    /// 401: the API key was not accepted
    #[error("dispatch rejected the API key")]
    BadCredentials,

    /// 403: the key is valid but may not touch this journey
    #[error("API key may not modify {}", target(.journey_id))]
    Forbidden { journey_id: Option<i64> },

    /// The client's concurrency gate was closed while waiting
    #[error("dispatch client is shut down")]
    ClientClosed,

    #[error("dispatch client not configured: {0}")]
    NotConfigured(String),
}

impl DispatchError {
    /// Returns true if the same payload may succeed if sent again later.
    pub fn is_retryable(&self) -> bool {
        match self {
            DispatchError::Transport(_) | DispatchError::Throttled => true,
            DispatchError::Refused { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

fn target(journey_id: &Option<i64>) -> String {
    match journey_id {
        Some(id) => format!("journey {id}"),
        None => "new journey".to_string(),
    }
}

fn echo(body: &Option<String>) -> String {
    body.as_ref()
        .map(|b| format!(" (reply: {b})"))
        .unwrap_or_default()
}
