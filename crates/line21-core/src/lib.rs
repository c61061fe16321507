#![forbid(unsafe_code)]

//! EIA/CEA-608 line-21 caption engine.
//!
//! `line21-core` turns a stream of 16-bit, parity-protected caption units
//! into renderable caption text plus a mode/cursor snapshot. It is the
//! transport-agnostic heart of `line21`: the caller supplies units that have
//! already been pulled out of their envelope (SEI user data, raw line-21
//! captures, test fixtures).
//!
//! # Primary responsibilities
//!
//! - **Parity**: odd-parity validation and stripping for each byte of a unit.
//! - **Code**: bitmask classification of stripped units (control, preamble,
//!   mid-row, special, extended, basic text) and the control-command set.
//! - **Charset**: the 608 glyph table and preamble row map.
//! - **Frame**: 15x32 cell grid with an embedded display state and roll-up scroll.
//! - **Parser**: unit -> [`Command`] translation with duplicate suppression.
//! - **Decoder**: the front/back buffer state machine and [`Snapshot`] output.
//!
//! # Design principles
//!
//! - **No I/O**: all types are pure data + logic.
//! - **Never fails**: broadcast noise is dropped, never reported as an error.
//! - **Bounded**: each unit costs at most one row-width of work.

#[macro_use]
mod logging;

pub mod cell;
pub mod charset;
pub mod code;
pub mod decoder;
pub mod frame;
pub mod parity;
pub mod parser;

pub use cell::{Cell, CellFlags, Style};
pub use charset::{REPLACEMENT_CHAR, glyph, preamble_row};
pub use code::{CodeKind, ControlCode, classify};
pub use decoder::{BufferSlot, Cursor, DecodeOutcome, Decoder, DecoderConfig, Mode, Snapshot};
pub use frame::{COLS, DisplayState, FrameBuffer, ROWS};
pub use parity::{parity_byte, parity_word, validate_and_strip};
pub use parser::{Command, Parser};
