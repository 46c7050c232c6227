//! Deterministic bingo boards built from per-participant prompt pools.
//!
//! The core is [`prompts::generate_prompts`]: given the same seed and the same
//! pools it always lays out the same board, so every viewer sharing a seed sees
//! an identical card.

pub mod array;
pub mod board;
pub mod board_renderer;
pub mod error;
pub mod lookup;
pub mod prompts;
pub mod seed;
pub mod shuffle;

pub use board::{BoardLayout, Cell};
pub use error::BingoError;
pub use prompts::{ParticipantPromptPool, Prompt, generate_prompts, transpose_for_board};
pub use shuffle::shuffle;
