use thiserror::Error;

/// Everything that can go wrong while asking the upstream service for
/// current conditions.
///
/// The variants stay structured inside the library; front ends flatten them
/// with [`QueryError::user_message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The location trimmed down to nothing.
    #[error("Enter a location to look up")]
    EmptyInput,

    /// No API key is configured.
    #[error(
        "No API key configured for weatherapi.com.\n\
         Hint: run `skyview configure` or set WEATHERAPI_KEY."
    )]
    MissingCredential,

    /// The service answered with a non-success status.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// The request never produced a usable response.
    #[error("{0}")]
    Transport(String),
}

impl QueryError {
    /// The single string shown to the user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Upstream HTTP status, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            QueryError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}
