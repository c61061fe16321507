//! Caption cell: the fundamental unit of a frame buffer.
//!
//! Each cell stores one glyph plus the pen attributes that were active when
//! it was written. Attributes are retained for consumers that want them but
//! plain-text rendering ignores them.

use bitflags::bitflags;

bitflags! {
    /// Cell-level attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        const UNDERLINE = 1 << 0;
    }
}

/// Foreground style selected by a preamble or mid-row code.
///
/// Discriminants are the 3-bit style field of the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Style {
    #[default]
    White = 0,
    Green = 1,
    Blue = 2,
    Cyan = 3,
    Red = 4,
    Yellow = 5,
    Magenta = 6,
    /// White italics.
    Italics = 7,
}

impl Style {
    /// Decode a 3-bit style field. Only the low three bits are used.
    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Self::White,
            1 => Self::Green,
            2 => Self::Blue,
            3 => Self::Cyan,
            4 => Self::Red,
            5 => Self::Yellow,
            6 => Self::Magenta,
            _ => Self::Italics,
        }
    }

    #[must_use]
    pub fn is_italic(self) -> bool {
        self == Self::Italics
    }
}

/// A single cell in a frame buffer.
///
/// The default cell is empty (`'\0'` content) and is skipped by rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    content: char,
    pub style: Style,
    pub flags: CellFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// The empty sentinel.
    pub const EMPTY: Self = Self {
        content: '\0',
        style: Style::White,
        flags: CellFlags::empty(),
    };

    /// Create a cell with the given glyph and default attributes.
    #[must_use]
    pub fn new(ch: char) -> Self {
        Self {
            content: ch,
            ..Self::EMPTY
        }
    }

    /// Create a cell with the given glyph, style and underline state.
    #[must_use]
    pub fn with_pen(ch: char, style: Style, underline: bool) -> Self {
        let mut flags = CellFlags::empty();
        flags.set(CellFlags::UNDERLINE, underline);
        Self {
            content: ch,
            style,
            flags,
        }
    }

    /// The glyph stored in this cell (`'\0'` when empty).
    #[must_use]
    pub fn content(&self) -> char {
        self.content
    }

    /// Whether this cell holds no glyph.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content == '\0'
    }

    #[must_use]
    pub fn is_underlined(&self) -> bool {
        self.flags.contains(CellFlags::UNDERLINE)
    }

    /// Reset this cell to the empty sentinel.
    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }
}
