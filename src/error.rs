use thiserror::Error;

/// Errors produced while loading prompts, generating a board or rendering it.
#[derive(Debug, Error)]
pub enum BingoError {
    /// A participant's pool cannot cover the per-participant quota.
    #[error("Not enough prompts for ID: \"{participant_id}\". We expect {expected}, we received {received}")]
    InsufficientPrompts {
        participant_id: String,
        expected: usize,
        received: usize,
    },

    #[error("No participants supplied, cannot split the board")]
    NoParticipants,

    #[error("Invalid board size: {0} cells")]
    InvalidBoardSize(usize),

    /// More prompts than free slots on the target layout.
    #[error("Board has {capacity} prompt cells but {received} prompts were supplied")]
    TooManyPrompts { capacity: usize, received: usize },

    #[error("Nothing found at route \"{0}\"")]
    RouteNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Font error: {0}")]
    Font(String),
}
