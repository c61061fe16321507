//! 608 decoding state machine.
//!
//! The decoder owns two frame buffers: the *front* buffer is what viewers
//! see, the *back* buffer is where pop-on captions are composed. Control
//! codes pick which one receives text (the active slot), select pop-on,
//! paint-on or roll-up presentation, and swap the pair on end-of-caption.
//!
//! Every unit is processed to completion inside [`Decoder::decode`]; callers
//! never observe a half-applied swap.

use core::fmt;
use core::mem;

use crate::cell::{Cell, Style};
use crate::code::ControlCode;
use crate::frame::{COLS, FrameBuffer, ROWS};
use crate::parser::{Command, Parser};

const LAST_COL: u8 = (COLS - 1) as u8;

/// Decoder tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Drop a control or special-character unit identical to the previous
    /// unit. Broadcasters send these twice for reliability. Default `true`.
    pub skip_duplicates: bool,
    /// Glyph substituted for character indices outside the 608 tables.
    pub replacement: char,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            skip_duplicates: true,
            replacement: crate::charset::REPLACEMENT_CHAR,
        }
    }
}

impl DecoderConfig {
    #[must_use]
    pub fn with_skip_duplicates(mut self, skip: bool) -> Self {
        self.skip_duplicates = skip;
        self
    }

    #[must_use]
    pub fn with_replacement(mut self, replacement: char) -> Self {
        self.replacement = replacement;
        self
    }
}

/// Which of the two owned buffers receives text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferSlot {
    Front,
    Back,
}

/// Live write position. Rows are bottom-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor {
    pub row: u8,
    pub col: u8,
}

/// Result of decoding one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DecodeOutcome {
    /// The displayed caption should be (re)presented.
    pub ready: bool,
    /// Some buffer cell actually changed as a result of this unit.
    pub changed: bool,
}

impl DecodeOutcome {
    const IGNORED: Self = Self {
        ready: false,
        changed: false,
    };

    fn new(ready: bool, changed: bool) -> Self {
        Self { ready, changed }
    }
}

/// Presentation mode reported by a [`Snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// No control code has selected a buffer yet.
    #[default]
    Unknown,
    PopOn,
    /// Paint-on or roll-up.
    PaintOn,
}

/// Point-in-time view of the displayed (front) buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Snapshot {
    pub mode: Mode,
    /// Roll-up depth of the displayed buffer.
    pub rollup: u8,
    /// Configured row, top-down (`15 - internal row`).
    pub row: u8,
    /// Configured column.
    pub col: u8,
    /// Rendered caption text.
    pub content: String,
}

/// EIA-608 caption decoder for one logical caption channel.
#[derive(Debug, Clone)]
pub struct Decoder {
    parser: Parser,
    front: FrameBuffer,
    back: FrameBuffer,
    active: Option<BufferSlot>,
    cursor: Cursor,
    /// Set by a preamble naming no row. Writes at the cursor are discarded
    /// until a preamble or end-of-caption places it on the grid again.
    off_grid: bool,
    style: Style,
    underline: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Create a decoder with both buffers empty and no mode selected.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    #[must_use]
    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            parser: Parser::with_config(config),
            front: FrameBuffer::new(),
            back: FrameBuffer::new(),
            active: None,
            cursor: Cursor::default(),
            off_grid: false,
            style: Style::White,
            underline: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        self.parser.config()
    }

    /// Return to the freshly-constructed state, keeping the configuration.
    pub fn reset(&mut self) {
        let config = *self.config();
        *self = Self::with_config(config);
    }

    /// The displayed buffer.
    #[must_use]
    pub fn front(&self) -> &FrameBuffer {
        &self.front
    }

    /// The staging buffer used by pop-on captions.
    #[must_use]
    pub fn back(&self) -> &FrameBuffer {
        &self.back
    }

    /// Buffer currently receiving text, if a mode has been established.
    #[must_use]
    pub fn active_slot(&self) -> Option<BufferSlot> {
        self.active
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Decode a sequence of raw units, returning the rendered caption each
    /// time one becomes ready.
    pub fn feed(&mut self, units: &[u16]) -> Vec<String> {
        units
            .iter()
            .filter_map(|&unit| self.decode(unit).ready.then(|| self.front.to_string()))
            .collect()
    }

    /// Decode one raw (parity-carrying) unit.
    ///
    /// Never fails: noise, padding, repeats and text received before any
    /// mode is established are silently dropped.
    pub fn decode(&mut self, unit: u16) -> DecodeOutcome {
        let Some(command) = self.parser.advance(unit) else {
            return DecodeOutcome::IGNORED;
        };
        self.apply(command)
    }

    /// Apply an already-parsed command.
    pub fn apply(&mut self, command: Command) -> DecodeOutcome {
        match command {
            Command::Control(code) => return self.control(code),
            Command::UnassignedControl(_) => return DecodeOutcome::IGNORED,
            _ => {}
        }

        let Some(slot) = self.active else {
            trace!(?command, "no caption mode established, dropping");
            return DecodeOutcome::IGNORED;
        };

        match command {
            Command::Preamble {
                row,
                col,
                style,
                underline,
            } => {
                self.cursor.col = col;
                self.style = style;
                self.underline = underline;
                self.off_grid = row.is_none();
                if let Some(row) = row {
                    self.cursor.row = row;
                    self.buffer_mut(slot).state.row = row;
                }
                self.buffer_mut(slot).state.col = col;
                DecodeOutcome::IGNORED
            }
            Command::MidRow { style, underline } => {
                self.style = style;
                self.underline = underline;
                DecodeOutcome::IGNORED
            }
            Command::Print { first, second } => {
                let mut changed = self.write_char(slot, first);
                if let Some(ch) = second {
                    changed |= self.write_char(slot, ch);
                }
                self.text_outcome(slot, changed)
            }
            Command::PrintSpecial(ch) => {
                let changed = self.write_char(slot, ch);
                self.text_outcome(slot, changed)
            }
            Command::PrintExtended(ch) => {
                // The extended glyph replaces the basic fallback sent before it.
                let mut changed = self.backspace(slot);
                changed |= self.write_char(slot, ch);
                self.text_outcome(slot, changed)
            }
            Command::Control(_) | Command::UnassignedControl(_) => DecodeOutcome::IGNORED,
        }
    }

    /// Point-in-time view of the displayed buffer.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        if self.active.is_none() {
            return Snapshot::default();
        }
        let state = self.front.state;
        let mode = if state.rollup > 0 {
            Mode::PaintOn
        } else {
            Mode::PopOn
        };
        Snapshot {
            mode,
            rollup: state.rollup,
            row: ROWS as u8 - state.row,
            col: state.col,
            content: self.front.to_string(),
        }
    }

    fn buffer_mut(&mut self, slot: BufferSlot) -> &mut FrameBuffer {
        match slot {
            BufferSlot::Front => &mut self.front,
            BufferSlot::Back => &mut self.back,
        }
    }

    // Roll-up has no explicit flush command, so every character is a
    // display event there.
    fn text_outcome(&mut self, slot: BufferSlot, changed: bool) -> DecodeOutcome {
        let ready = self.buffer_mut(slot).state.rollup > 0;
        DecodeOutcome::new(ready, changed)
    }

    fn write_char(&mut self, slot: BufferSlot, ch: char) -> bool {
        let Cursor { row, col } = self.cursor;
        let cell = Cell::with_pen(ch, self.style, self.underline);
        let changed = !self.off_grid && self.buffer_mut(slot).set_cell(row, col, cell);
        if col < LAST_COL {
            self.cursor.col += 1;
        }
        changed
    }

    fn backspace(&mut self, slot: BufferSlot) -> bool {
        self.cursor.col = self.cursor.col.saturating_sub(1);
        let Cursor { row, col } = self.cursor;
        !self.off_grid && self.buffer_mut(slot).clear_cell(row, col)
    }

    fn select(&mut self, slot: BufferSlot, rollup: u8) {
        self.active = Some(slot);
        self.buffer_mut(slot).state.rollup = rollup;
        debug!(?slot, rollup, "caption mode selected");
    }

    fn control(&mut self, code: ControlCode) -> DecodeOutcome {
        match code {
            ControlCode::ResumeDirectCaptioning => {
                self.select(BufferSlot::Front, 1);
                DecodeOutcome::IGNORED
            }
            ControlCode::RollUp2 | ControlCode::RollUp3 | ControlCode::RollUp4 => {
                let depth = code.roll_up_depth().unwrap_or(2);
                self.select(BufferSlot::Front, depth);
                DecodeOutcome::IGNORED
            }
            ControlCode::ResumeCaptionLoading => {
                self.select(BufferSlot::Back, 0);
                DecodeOutcome::IGNORED
            }
            ControlCode::EraseDisplayedMemory => {
                let changed = !self.front.is_empty();
                self.front.clear();
                DecodeOutcome::new(true, changed)
            }
            ControlCode::EraseNonDisplayedMemory => {
                let changed = !self.back.is_empty();
                self.back.clear();
                DecodeOutcome::new(false, changed)
            }
            ControlCode::EndOfCaption => {
                mem::swap(&mut self.front, &mut self.back);
                self.back.clear_with_position();
                self.cursor = Cursor::default();
                self.off_grid = false;
                self.active = Some(BufferSlot::Back);
                debug!("end of caption, buffers swapped");
                DecodeOutcome::new(true, true)
            }
            ControlCode::CarriageReturn => {
                let Some(slot) = self.active else {
                    return DecodeOutcome::IGNORED;
                };
                self.cursor.col = 0;
                let row = self.cursor.row;
                let off_grid = self.off_grid;
                let buffer = self.buffer_mut(slot);
                let changed = !off_grid && buffer.roll_up(row);
                buffer.state.col = 0;
                DecodeOutcome::new(false, changed)
            }
            ControlCode::Backspace => match self.active {
                Some(slot) => DecodeOutcome::new(false, self.backspace(slot)),
                None => DecodeOutcome::IGNORED,
            },
            ControlCode::DeleteToEndOfRow => match self.active {
                Some(slot) if !self.off_grid => {
                    let Cursor { row, col } = self.cursor;
                    let changed = self.buffer_mut(slot).clear_to_end_of_row(row, col);
                    DecodeOutcome::new(false, changed)
                }
                _ => DecodeOutcome::IGNORED,
            },
            ControlCode::TabOffset1 | ControlCode::TabOffset2 | ControlCode::TabOffset3 => {
                if let Some(slot) = self.active {
                    let offset = code.tab_offset().unwrap_or(0);
                    self.cursor.col = self.cursor.col.saturating_add(offset).min(LAST_COL);
                    // The configured column keeps the preamble indent, not
                    // the live cursor.
                    let state = &mut self.buffer_mut(slot).state;
                    state.col = state.col.saturating_add(offset).min(LAST_COL);
                }
                DecodeOutcome::IGNORED
            }
            ControlCode::AlarmOff
            | ControlCode::AlarmOn
            | ControlCode::TextRestart
            | ControlCode::ResumeTextDisplay => DecodeOutcome::IGNORED,
        }
    }
}

impl fmt::Display for Decoder {
    /// Renders the displayed (front) buffer.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.front, f)
    }
}
