use thiserror::Error;

/// Errors from the remote map registry API.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Network or connection error (never retried)
    #[error("Connection error: {0}")]
    Transport(String),

    /// Non-2xx response with a server-provided message
    #[error("{context}: {message}")]
    Api { context: String, message: String },

    /// Non-2xx response with no decodable message body
    #[error("{context} (HTTP {status})")]
    Status { context: String, status: u16 },

    /// Malformed endpoint template (programmer error, fatal)
    #[error("Invalid endpoint template {template:?}: {reason}")]
    Endpoint { template: String, reason: String },

    /// A 2xx response whose payload could not be decoded
    #[error("Failed to parse {context}: {reason}")]
    Decode { context: String, reason: String },

    /// A successful style fetch carried no ETag header.
    ///
    /// The conditional-delete protocol cannot proceed without a concurrency
    /// token, so this is a protocol invariant violation, not a race.
    #[error("No etag for style {0}")]
    MissingEtag(String),
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        RegistryError::Transport(err.to_string())
    }
}

/// Errors from writing a tileset archive to the staging bucket.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Local file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// S3 rejected the object write
    #[error("S3 error: {0}")]
    S3(String),
}

/// Errors from the district feature transform.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Input line is not a valid GeoJSON feature record
    #[error("Invalid feature record on line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    /// Feature has no string `ID` property
    #[error("Feature on line {0} doesn't have ID")]
    MissingId(usize),

    /// The `ID` property is too short or has non-numeric segments
    #[error("Malformed district identifier {id:?}: {reason}")]
    MalformedId { id: String, reason: String },

    /// The parsed state code has no USPS abbreviation
    #[error("Unknown state code {0}")]
    UnknownState(i32),

    /// Failed to read input or write output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
