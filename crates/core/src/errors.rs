use thiserror::Error;

/// The catalog failure taxonomy. Transport and schema failures originate in
/// the fetch layer and are surfaced unmodified; lookups by id raise
/// `NotFound` in whichever layer resolves the id.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog fetch failed: {0}")]
    Transport(String),
    #[error("catalog response was malformed: {0}")]
    Schema(String),
    #[error("no catalog item with id `{0}`")]
    NotFound(String),
}

impl CatalogError {
    /// Message safe to surface to an end user without leaking transport
    /// detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Transport(_) | Self::Schema(_) => "Failed to load the meme catalog.",
            Self::NotFound(_) => "That meme does not exist.",
        }
    }
}
