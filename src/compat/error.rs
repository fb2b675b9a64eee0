use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache lock poisoned")]
    LockPoisoned,
}

/// Failure of a single (consumer, target) lookup against the remote service
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum CompatError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Lookup of {target} for {consumer} failed: {source}")]
    Lookup {
        consumer: String,
        target: String,
        #[source]
        source: LookupError,
    },

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Consumer package list lock poisoned")]
    ConsumersPoisoned,
}
