use thiserror::Error;

/// Convenient result alias for the courier library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a routing endpoint has no entry in the street graph.
    #[error("coordinate {coordinate} is not present in the street map")]
    BadCoordinate { coordinate: String },

    /// Raised when the search frontier is exhausted before reaching the goal.
    #[error("no route found between {start} and {end}")]
    NoRoute { start: String, end: String },

    /// Raised when a street record fails validation. No partial graph is kept.
    #[error("malformed street record '{street}': {reason}")]
    MalformedStreet { street: String, reason: String },

    /// Raised when map text cannot be split into street records.
    #[error("map data line {line}: {reason}")]
    MapSyntax { line: usize, reason: String },

    /// Raised when a coordinate component is not a usable decimal.
    #[error("invalid coordinate '{text}': {reason}")]
    InvalidCoordinate { text: String, reason: String },

    /// Raised when a delivery list cannot be parsed.
    #[error("delivery list line {line}: {reason}")]
    DeliverySyntax { line: usize, reason: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error came from routing rather than from loading input.
    pub fn is_routing_failure(&self) -> bool {
        matches!(self, Error::BadCoordinate { .. } | Error::NoRoute { .. })
    }
}
