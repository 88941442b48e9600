use thiserror::Error;

/// Represents errors raised while compiling Markdown into slides or while talking
/// to the Google Slides API.
#[derive(Error, Debug)]
pub enum SlidesError {
    /// The Markdown could not be understood (unsupported inline HTML, malformed comment).
    #[error("Parse error: {0}")]
    Parse(String),

    /// The Markdown parsed but describes a structure slides cannot hold
    /// (mixed list nesting, several tables on one slide).
    #[error("{0}")]
    Structural(String),

    /// A layout name could not be resolved against the target deck.
    #[error(
        "Unable to find layout '{name}'. Available layouts: {}",
        .available.join(", ")
    )]
    LayoutResolution { name: String, available: Vec<String> },

    /// An internal invariant was violated, e.g. populating a slide that was never created.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The platform random source failed while allocating object ids.
    #[error("Unable to generate object id: {0}")]
    IdGeneration(String),

    /// Error during JSON serialization or deserialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error originating from the underlying HTTP client (`reqwest`).
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// An error reported by the Google Slides API itself (e.g., 4xx or 5xx status code).
    #[error("API returned an error: Status {status}, Message: {message}")]
    ApiError {
        status: reqwest::StatusCode,
        message: String,
    },

    /// An error related to authentication or authorization setup.
    #[error("Authentication setup/configuration error: {0}")]
    AuthSetupError(String),

    /// An error specifically from the authentication library (yup-oauth2) during token fetching/validation.
    #[cfg(not(target_arch = "wasm32"))]
    #[cfg(feature = "yup-oauth2")]
    #[error("Authentication library error: {0}")]
    AuthLibError(#[from] yup_oauth2::Error),

    /// An error indicating invalid input was provided to a client function.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An error related to reading environment variables.
    #[error("Environment variable error: {0}")]
    EnvVarError(#[from] std::env::VarError),

    /// An I/O error occurred, often related to file access (e.g., reading the service account key).
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A type alias for `Result<T, SlidesError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, SlidesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_resolution_lists_available_layouts() {
        let err = SlidesError::LayoutResolution {
            name: "Missing".to_string(),
            available: vec!["TITLE".to_string(), "BLANK".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Unable to find layout 'Missing'. Available layouts: TITLE, BLANK"
        );
    }

    #[test]
    fn structural_error_message_is_passed_through() {
        let err = SlidesError::Structural("Multiple tables per slide are not supported.".into());
        assert_eq!(err.to_string(), "Multiple tables per slide are not supported.");
    }
}
