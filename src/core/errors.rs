use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("HTTP error {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Vocabulary table could not be read: {0}")]
    MalformedTable(String),

    #[error("Update rejected by remote store: {0}")]
    Rejected(String),

    #[error("Update endpoint is not configured")]
    NotConfigured,

    #[error("DeckError: {0}")]
    Custom(String),
}

impl DeckError {
    /// Network-level failures, as opposed to the store answering with a refusal.
    pub fn is_transport(&self) -> bool {
        matches!(self, DeckError::Reqwest(_) | DeckError::HttpStatus { .. } | DeckError::Timeout)
    }
}

impl From<std::io::Error> for DeckError {
    fn from(error: std::io::Error) -> Self {
        DeckError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for DeckError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return DeckError::Timeout;
        }
        DeckError::Reqwest(Box::new(error))
    }
}

/// Reasons a classification is refused before any request is made.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("The answer has not been revealed yet")]
    NotRevealed,

    #[error("There is no card to classify")]
    NoCurrentItem,

    #[error("Another update is still in flight")]
    Busy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_are_distinguished_from_refusals() {
        assert!(DeckError::Timeout.is_transport());
        assert!(DeckError::HttpStatus { status: 502, url: "http://x".into() }.is_transport());
        assert!(!DeckError::Rejected("Character not found: 爱".into()).is_transport());
        assert!(!DeckError::NotConfigured.is_transport());
    }

    #[test]
    fn messages_carry_the_store_reason() {
        let err = DeckError::Rejected("Character not found: 学".into());
        assert_eq!(err.to_string(), "Update rejected by remote store: Character not found: 学");
    }
}
