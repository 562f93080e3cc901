//! Error type for host operations.

/// Failure of an operation performed against the host environment.
///
/// These never escape the animation loop. Invalid configuration is not an
/// error either; it is reported as `None` from [`create`](crate::create).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No global `window` is available
    NoWindow,
    /// No `document` is attached to the window
    NoDocument,
    /// Looking up elements in the document failed
    Query(String),
    /// The element rejected a style update
    Style(String),
    /// An image handle could not be created for a frame URL
    Image { url: String, reason: String },
    /// The scheduler refused to register the next tick
    Schedule(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NoWindow => write!(f, "No window available"),
            Error::NoDocument => write!(f, "No document available"),
            Error::Query(reason) => write!(f, "Failed to query elements: {}", reason),
            Error::Style(reason) => write!(f, "Failed to set background image: {}", reason),
            Error::Image { url, reason } => {
                write!(f, "Failed to create image for {}: {}", url, reason)
            }
            Error::Schedule(reason) => write!(f, "Failed to schedule next frame: {}", reason),
        }
    }
}

impl std::error::Error for Error {}
