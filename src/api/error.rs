use std::fmt;

/// Errors surfaced by the archive API client.
///
/// None of these are retried by the client itself; the user retries by
/// re-issuing the action that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response was obtained (DNS, connection refused, timeout).
    Transport { cause: String },
    /// The server answered with a non-2xx status.
    Http {
        status: u16,
        status_text: String,
        /// `message` from the server's error envelope, when it sent one.
        message: Option<String>,
    },
    /// A 2xx response whose body is not the expected JSON shape.
    Decode { cause: String },
}

impl ApiError {
    pub(crate) fn transport(err: impl fmt::Display) -> Self {
        ApiError::Transport {
            cause: err.to_string(),
        }
    }

    pub(crate) fn decode(err: impl fmt::Display) -> Self {
        ApiError::Decode {
            cause: err.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport { cause } => write!(f, "network error: {cause}"),
            ApiError::Http {
                status,
                status_text,
                message,
            } => {
                write!(f, "HTTP {status}: {status_text}")?;
                if let Some(message) = message {
                    write!(f, " ({message})")?;
                }
                Ok(())
            }
            ApiError::Decode { cause } => write!(f, "unexpected response: {cause}"),
        }
    }
}

impl std::error::Error for ApiError {}
