//! 608 unit parser.
//!
//! The parser is the stateless-looking front half of the decoder: it checks
//! parity, drops padding and redundant repeats, classifies what is left and
//! resolves glyphs, producing one [`Command`] per meaningful unit. Applying
//! commands to frame buffers is the [`Decoder`](crate::Decoder)'s job.

use crate::cell::Style;
use crate::charset::{
    EXTENDED_PORTUGUESE_GERMAN_BASE, EXTENDED_SPANISH_FRENCH_BASE, SPECIAL_BASE, glyph_or,
    preamble_row,
};
use crate::code::{CodeKind, ControlCode, classify};
use crate::decoder::DecoderConfig;
use crate::parity::validate_and_strip;

/// Second-channel toggle bit within a field.
const CHANNEL_BIT: u16 = 0x0800;

/// Parser output commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Miscellaneous control command.
    Control(ControlCode),
    /// Control-shaped unit with no assigned command (carries the stripped unit).
    UnassignedControl(u16),
    /// Preamble address code: move the cursor and set the pen.
    Preamble {
        /// Bottom-up row, `None` for the unassigned row field.
        row: Option<u8>,
        col: u8,
        style: Style,
        underline: bool,
    },
    /// Mid-row style change: set the pen, cursor stays put.
    MidRow { style: Style, underline: bool },
    /// One or two basic characters.
    Print { first: char, second: Option<char> },
    /// One special North American character.
    PrintSpecial(char),
    /// One extended Western European character replacing the previous cell.
    PrintExtended(char),
}

impl Command {
    /// Whether this command writes glyphs into a frame buffer.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Self::Print { .. } | Self::PrintSpecial(_) | Self::PrintExtended(_)
        )
    }
}

/// 608 unit parser state.
#[derive(Debug, Clone)]
pub struct Parser {
    config: DecoderConfig,
    /// Last stripped unit seen, for duplicate suppression.
    last: u16,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a parser with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    #[must_use]
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config, last: 0 }
    }

    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// The last stripped unit accepted past the parity and padding checks.
    #[must_use]
    pub fn last_unit(&self) -> u16 {
        self.last
    }

    /// Forget the last-seen unit.
    pub fn reset(&mut self) {
        self.last = 0;
    }

    /// Parse a sequence of raw units.
    #[must_use]
    pub fn feed(&mut self, units: &[u16]) -> Vec<Command> {
        units.iter().filter_map(|&u| self.advance(u)).collect()
    }

    /// Parse one raw (parity-carrying) unit.
    ///
    /// Returns `None` for noise, padding, repeated control/special units and
    /// codes with no meaning.
    pub fn advance(&mut self, raw: u16) -> Option<Command> {
        let Some(unit) = validate_and_strip(raw) else {
            trace!(raw = format_args!("{raw:#06x}"), "parity error, unit dropped");
            return None;
        };
        if unit == 0 {
            return None;
        }

        let kind = classify(unit);
        // Control and special codes are transmitted twice for redundancy.
        if self.config.skip_duplicates
            && matches!(kind, CodeKind::Control | CodeKind::SpecialChar)
            && unit == self.last
        {
            trace!(unit = format_args!("{unit:#06x}"), "duplicate unit dropped");
            return None;
        }
        self.last = unit;

        match kind {
            CodeKind::Control => Some(
                ControlCode::from_unit(unit)
                    .map_or(Command::UnassignedControl(unit), Command::Control),
            ),
            CodeKind::Preamble => Some(Self::parse_preamble(unit)),
            CodeKind::MidRow => Some(Self::parse_mid_row(unit)),
            CodeKind::SpecialChar => {
                let unit = unit & !CHANNEL_BIT;
                Some(Command::PrintSpecial(
                    self.glyph(unit - 0x1130 + SPECIAL_BASE),
                ))
            }
            CodeKind::ExtendedChar => self.parse_extended(unit & !CHANNEL_BIT),
            CodeKind::BasicText => Some(self.parse_basic(unit)),
            CodeKind::Unknown => None,
        }
    }

    fn glyph(&self, index: u16) -> char {
        glyph_or(index, self.config.replacement)
    }

    fn parse_preamble(unit: u16) -> Command {
        let field = (((unit & 0x0700) >> 7) | ((unit & 0x0020) >> 5)) as u8;
        let row = preamble_row(field);
        if row.is_none() {
            trace!(unit = format_args!("{unit:#06x}"), "preamble with unassigned row");
        }
        let underline = unit & 0x0001 == 0x0001;
        let attr = ((unit & 0x000E) >> 1) as u8;
        let (col, style) = if unit & 0x0010 == 0 {
            (0, Style::from_bits(attr))
        } else {
            (attr * 4, Style::White)
        };
        Command::Preamble {
            row,
            col,
            style,
            underline,
        }
    }

    fn parse_mid_row(unit: u16) -> Command {
        Command::MidRow {
            style: Style::from_bits(((unit & 0x000E) >> 1) as u8),
            underline: unit & 0x0001 == 0x0001,
        }
    }

    fn parse_basic(&self, unit: u16) -> Command {
        let first = self.glyph((unit >> 8) - 0x20);
        let low = unit & 0x00FF;
        let second = (0x20..0x80).contains(&low).then(|| self.glyph(low - 0x20));
        Command::Print { first, second }
    }

    fn parse_extended(&self, unit: u16) -> Option<Command> {
        let index = match unit {
            0x1220..=0x123F => unit - 0x1220 + EXTENDED_SPANISH_FRENCH_BASE,
            0x1320..=0x133F => unit - 0x1320 + EXTENDED_PORTUGUESE_GERMAN_BASE,
            _ => return None,
        };
        Some(Command::PrintExtended(self.glyph(index)))
    }
}
