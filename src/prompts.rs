use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use tracing::debug;

use crate::error::BingoError;
use crate::lookup;
use crate::shuffle::shuffle;

/// Prompts contributed by a single participant.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantPromptPool {
    pub participant_id: String,
    pub prompts: Vec<String>,
}

/// One board cell's worth of text, tagged with who contributed it.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub struct Prompt {
    pub id: String,
    pub text: String,
}

// The JSON file has the following structure:
// {
//    "participants": [ { "participantId": "...", "prompts": ["...", ...] }, ... ]
// }
#[derive(Debug, Deserialize)]
struct ParticipantsWrapper {
    participants: Vec<ParticipantPromptPool>,
}

pub fn read_prompt_pools_from_json(path: &str) -> Result<Vec<ParticipantPromptPool>, BingoError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let wrapper: ParticipantsWrapper = serde_json::from_reader(reader)?;
    Ok(wrapper.participants)
}

/// Reads an arbitrary JSON document, for use with [`pools_at_route`].
pub fn read_prompt_document(path: &str) -> Result<Value, BingoError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Selects the pool list stored under a page route such as `/streamer/big`.
pub fn pools_at_route(document: &Value, route: &str) -> Result<Vec<ParticipantPromptPool>, BingoError> {
    let path = lookup::route_norm(route);
    let node = lookup::get(document, &path).ok_or_else(|| BingoError::RouteNotFound(route.to_string()))?;
    Ok(Vec::<ParticipantPromptPool>::deserialize(node)?)
}

/// Builds the prompt sequence for a board of `board_size` cells.
///
/// Every participant contributes `(board_size - 1) / participants` prompts;
/// one cell is left for the free centre and any remainder is left for the
/// caller to fill. The pools themselves are never modified.
pub fn generate_prompts(
    pools: &[ParticipantPromptPool],
    seed: i64,
    board_size: usize,
) -> Result<Vec<Prompt>, BingoError> {
    if pools.is_empty() {
        return Err(BingoError::NoParticipants);
    }
    if board_size == 0 {
        return Err(BingoError::InvalidBoardSize(board_size));
    }

    let participants = pools.len();
    let quota = (board_size - 1) / participants;
    debug!("Expecting {quota} prompts for each participant...");

    let mut rows: Vec<Vec<Prompt>> = Vec::with_capacity(participants);
    for pool in pools {
        let mut texts = pool.prompts.clone();
        shuffle(&mut texts, seed);
        texts.truncate(quota);

        if texts.len() < quota {
            return Err(BingoError::InsufficientPrompts {
                participant_id: pool.participant_id.clone(),
                expected: quota,
                received: texts.len(),
            });
        }

        rows.push(
            texts
                .into_iter()
                .map(|text| Prompt { id: pool.participant_id.clone(), text })
                .collect(),
        );
    }

    if participants > 1 {
        return Ok(transpose_for_board(rows));
    }

    let mut single: Vec<Prompt> = rows.into_iter().flatten().collect();
    shuffle(&mut single, seed);
    Ok(single)
}

/// Interleaves the rows column by column, then mirrors the second half.
///
/// With `p` rows the interleaved sequence is `t[k] = rows[k % p][k / p]`. The
/// result keeps `t[..len / 2]` and appends the rest reversed, so its length
/// equals the total number of items. Rows are expected to share one length;
/// shorter rows simply contribute fewer items.
pub fn transpose_for_board<T>(rows: Vec<Vec<T>>) -> Vec<T> {
    let width = rows.first().map_or(0, Vec::len);
    let total: usize = rows.iter().map(Vec::len).sum();
    let mut columns: Vec<_> = rows.into_iter().map(Vec::into_iter).collect();

    let mut interleaved = Vec::with_capacity(total);
    for _ in 0..width {
        for column in columns.iter_mut() {
            if let Some(item) = column.next() {
                interleaved.push(item);
            }
        }
    }

    let half = interleaved.len() / 2;
    interleaved[half..].reverse();
    interleaved
}
