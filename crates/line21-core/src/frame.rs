//! Frame buffer: the 15x32 caption grid.
//!
//! Rows are stored bottom-up: row 0 is the bottom line of the caption area
//! and row 14 the top. This puts the roll-up base row at index 0 for the
//! common bottom-of-screen layout and makes the scroll a simple upward copy.

use core::fmt;

use crate::cell::Cell;

/// Number of caption rows.
pub const ROWS: usize = 15;
/// Number of caption columns.
pub const COLS: usize = 32;

type Row = [Cell; COLS];

/// Configured layout recorded by the last preamble or mode command.
///
/// This is distinct from the decoder's live cursor, which moves as
/// characters are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DisplayState {
    /// Roll-up depth: 0 for pop-on, 1 for paint-on, 2..=4 for roll-up.
    pub rollup: u8,
    /// Configured row (bottom-up).
    pub row: u8,
    /// Configured column.
    pub col: u8,
}

/// Fixed-size caption grid plus its display state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pub state: DisplayState,
    rows: [Row; ROWS],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Create an empty buffer with a zeroed display state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: DisplayState::default(),
            rows: [[Cell::EMPTY; COLS]; ROWS],
        }
    }

    /// Get the cell at `(row, col)`. Returns `None` if out of bounds.
    #[must_use]
    pub fn cell(&self, row: u8, col: u8) -> Option<&Cell> {
        self.rows
            .get(usize::from(row))
            .and_then(|r| r.get(usize::from(col)))
    }

    /// Store `cell` at `(row, col)`.
    ///
    /// Returns `true` if the stored cell changed. Out-of-bounds writes are
    /// ignored and report `false`.
    pub fn set_cell(&mut self, row: u8, col: u8, cell: Cell) -> bool {
        let Some(slot) = self
            .rows
            .get_mut(usize::from(row))
            .and_then(|r| r.get_mut(usize::from(col)))
        else {
            return false;
        };
        if *slot == cell {
            return false;
        }
        *slot = cell;
        true
    }

    /// Empty the cell at `(row, col)`. Returns `true` if it held anything.
    pub fn clear_cell(&mut self, row: u8, col: u8) -> bool {
        self.set_cell(row, col, Cell::EMPTY)
    }

    /// Empty cells `[col, COLS)` on `row`. Returns `true` if any changed.
    pub fn clear_to_end_of_row(&mut self, row: u8, col: u8) -> bool {
        let Some(cells) = self.rows.get_mut(usize::from(row)) else {
            return false;
        };
        let start = usize::from(col).min(COLS);
        let mut changed = false;
        for cell in &mut cells[start..] {
            if *cell != Cell::EMPTY {
                cell.clear();
                changed = true;
            }
        }
        changed
    }

    /// Cells of `row`, or `None` if out of bounds.
    #[must_use]
    pub fn row_cells(&self, row: u8) -> Option<&[Cell]> {
        self.rows.get(usize::from(row)).map(|r| &r[..])
    }

    /// Empty every cell. The display state is left alone.
    pub fn clear(&mut self) {
        self.rows = [[Cell::EMPTY; COLS]; ROWS];
    }

    /// Empty every cell and reset the configured row/column.
    ///
    /// The roll-up depth is preserved.
    pub fn clear_with_position(&mut self) {
        self.clear();
        self.state.row = 0;
        self.state.col = 0;
    }

    /// Whether no cell holds a glyph.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(Cell::is_empty)
    }

    /// Roll-up scroll for a carriage return on base row `row`.
    ///
    /// The `rollup - 1` rows above `row` move up one slot (the oldest is
    /// dropped) and `row` is emptied, leaving a window of at most `rollup`
    /// lines. Depth 0 (pop-on) never scrolls, and nothing happens if the
    /// window would extend past the top of the buffer. Returns `true` if
    /// the scroll was performed.
    pub fn roll_up(&mut self, row: u8) -> bool {
        let depth = usize::from(self.state.rollup);
        let base = usize::from(row);
        if depth == 0 || base + depth > ROWS {
            return false;
        }
        for idx in (base + 1..base + depth).rev() {
            self.rows[idx] = self.rows[idx - 1];
        }
        self.rows[base] = [Cell::EMPTY; COLS];
        true
    }

    /// Non-empty lines in top-down reading order.
    ///
    /// Empty cells are skipped within a line; rows with no glyph at all are
    /// omitted.
    #[must_use]
    pub fn rows_text(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .rows
            .iter()
            .filter_map(|row| {
                let line: String = row
                    .iter()
                    .filter(|cell| !cell.is_empty())
                    .map(Cell::content)
                    .collect();
                (!line.is_empty()).then_some(line)
            })
            .collect();
        lines.reverse();
        lines
    }
}

impl fmt::Display for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.rows_text().iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}
