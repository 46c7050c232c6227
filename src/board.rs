use serde::{Deserialize, Serialize};

use crate::error::BingoError;
use crate::prompts::Prompt;

/// Lines on the 5x5 board: rows, then columns, then both diagonals.
pub static SMALL_WINNING_LINES: [[usize; 5]; 12] = [
    [0, 1, 2, 3, 4],
    [5, 6, 7, 8, 9],
    [10, 11, 12, 13, 14],
    [15, 16, 17, 18, 19],
    [20, 21, 22, 23, 24],
    [0, 5, 10, 15, 20],
    [1, 6, 11, 16, 21],
    [2, 7, 12, 17, 22],
    [3, 8, 13, 18, 23],
    [4, 9, 14, 19, 24],
    [0, 6, 12, 18, 24],
    [4, 8, 12, 16, 20],
];

/// Lines on the 7x7 board, same ordering as [`SMALL_WINNING_LINES`].
pub static BIG_WINNING_LINES: [[usize; 7]; 16] = [
    [0, 1, 2, 3, 4, 5, 6],
    [7, 8, 9, 10, 11, 12, 13],
    [14, 15, 16, 17, 18, 19, 20],
    [21, 22, 23, 24, 25, 26, 27],
    [28, 29, 30, 31, 32, 33, 34],
    [35, 36, 37, 38, 39, 40, 41],
    [42, 43, 44, 45, 46, 47, 48],
    [0, 7, 14, 21, 28, 35, 42],
    [1, 8, 15, 22, 29, 36, 43],
    [2, 9, 16, 23, 30, 37, 44],
    [3, 10, 17, 24, 31, 38, 45],
    [4, 11, 18, 25, 32, 39, 46],
    [5, 12, 19, 26, 33, 40, 47],
    [6, 13, 20, 27, 34, 41, 48],
    [0, 8, 16, 24, 32, 40, 48],
    [6, 12, 18, 24, 30, 36, 42],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BoardLayout {
    /// 5x5, 25 cells.
    Small,
    /// 7x7, 49 cells.
    Big,
}

impl BoardLayout {
    pub fn from_cells(cells: usize) -> Option<Self> {
        match cells {
            25 => Some(Self::Small),
            49 => Some(Self::Big),
            _ => None,
        }
    }

    pub fn side(self) -> usize {
        match self {
            Self::Small => 5,
            Self::Big => 7,
        }
    }

    pub fn cells(self) -> usize {
        self.side() * self.side()
    }

    pub fn center(self) -> usize {
        self.cells() / 2
    }

    pub fn winning_lines(self) -> Vec<&'static [usize]> {
        match self {
            Self::Small => SMALL_WINNING_LINES.iter().map(|l| l.as_slice()).collect(),
            Self::Big => BIG_WINNING_LINES.iter().map(|l| l.as_slice()).collect(),
        }
    }

    /// Indices into [`Self::winning_lines`] whose cells are all marked.
    /// Cells past the end of `marked` count as unmarked.
    pub fn completed_lines(self, marked: &[bool]) -> Vec<usize> {
        self.winning_lines()
            .iter()
            .enumerate()
            .filter(|(_, line)| line.iter().all(|&i| marked.get(i).copied().unwrap_or(false)))
            .map(|(index, _)| index)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Prompt(Prompt),
    Free,
}

/// Lays prompts out row by row, skipping the centre. Cells left over after
/// the prompts run out are free.
pub fn assemble(layout: BoardLayout, prompts: Vec<Prompt>) -> Result<Vec<Cell>, BingoError> {
    let capacity = layout.cells() - 1;
    if prompts.len() > capacity {
        return Err(BingoError::TooManyPrompts { capacity, received: prompts.len() });
    }

    let mut prompts = prompts.into_iter();
    let cells = (0..layout.cells())
        .map(|i| {
            if i == layout.center() {
                return Cell::Free;
            }
            prompts.next().map_or(Cell::Free, Cell::Prompt)
        })
        .collect();
    Ok(cells)
}
