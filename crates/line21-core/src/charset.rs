//! 608 character set and preamble row map.
//!
//! Glyph indices are laid out as consecutive blocks:
//!
//! | Index        | Block                                   |
//! |--------------|-----------------------------------------|
//! | `0x00..0x60` | Basic North American (bytes 0x20..0x7F) |
//! | `0x60..0x70` | Special North American                  |
//! | `0x70..0x80` | Extended Spanish / miscellaneous        |
//! | `0x80..0x90` | Extended French                         |
//! | `0x90..0xA0` | Portuguese                              |
//! | `0xA0..0xB0` | German / Danish                         |

use crate::frame::ROWS;

/// Glyph used for indices outside the table.
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';

/// Base index of the special North American block.
pub const SPECIAL_BASE: u16 = 0x60;
/// Base index of the Spanish/miscellaneous + French blocks.
pub const EXTENDED_SPANISH_FRENCH_BASE: u16 = 0x70;
/// Base index of the Portuguese + German/Danish blocks.
pub const EXTENDED_PORTUGUESE_GERMAN_BASE: u16 = 0x90;

#[rustfmt::skip]
static GLYPHS: [char; 176] = [
    // Basic North American
    ' ', '!', '"', '#', '$', '%', '&', '\u{2019}', '(', ')', '\u{E1}', '+', ',', '-', '.', '/',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?',
    '@', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '[', '\u{E9}', ']', '\u{ED}', '\u{F3}',
    '\u{FA}', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '\u{E7}', '\u{F7}', '\u{D1}', '\u{F1}', '\u{2588}',
    // Special North American
    '\u{AE}', '\u{B0}', '\u{BD}', '\u{BF}', '\u{2122}', '\u{A2}', '\u{A3}', '\u{266A}',
    '\u{E0}', ' ', '\u{E8}', '\u{E2}', '\u{EA}', '\u{EE}', '\u{F4}', '\u{FB}',
    // Extended Spanish / miscellaneous
    '\u{C1}', '\u{C9}', '\u{D3}', '\u{DA}', '\u{DC}', '\u{FC}', '\u{2018}', '\u{A1}',
    '*', '\'', '\u{2014}', '\u{A9}', '\u{2120}', '\u{2022}', '\u{201C}', '\u{201D}',
    // Extended French
    '\u{C0}', '\u{C2}', '\u{C7}', '\u{C8}', '\u{CA}', '\u{CB}', '\u{EB}', '\u{CE}',
    '\u{CF}', '\u{EF}', '\u{D4}', '\u{D9}', '\u{F9}', '\u{DB}', '\u{AB}', '\u{BB}',
    // Portuguese
    '\u{C3}', '\u{E3}', '\u{CD}', '\u{CC}', '\u{EC}', '\u{D2}', '\u{F2}', '\u{D5}',
    '\u{F5}', '{', '}', '\\', '^', '_', '|', '~',
    // German / Danish
    '\u{C4}', '\u{E4}', '\u{D6}', '\u{F6}', '\u{DF}', '\u{A5}', '\u{A4}', '\u{A6}',
    '\u{C5}', '\u{E5}', '\u{D8}', '\u{F8}', '\u{250C}', '\u{2510}', '\u{2514}', '\u{2518}',
];

/// Preamble row field -> bottom-up buffer row. Entry 1 has no assigned row.
static ROW_MAP: [u8; 16] = [4, ROWS as u8, 14, 13, 12, 11, 3, 2, 1, 0, 10, 9, 8, 7, 6, 5];

/// Look up the glyph at `index`, falling back to [`REPLACEMENT_CHAR`].
#[must_use]
pub fn glyph(index: u16) -> char {
    glyph_or(index, REPLACEMENT_CHAR)
}

/// Look up the glyph at `index`, falling back to `replacement`.
#[must_use]
pub fn glyph_or(index: u16, replacement: char) -> char {
    GLYPHS
        .get(usize::from(index))
        .copied()
        .unwrap_or(replacement)
}

/// Map the 4-bit preamble row field to a bottom-up buffer row.
///
/// Returns `None` for the unassigned field value and anything above 15.
#[must_use]
pub fn preamble_row(field: u8) -> Option<u8> {
    ROW_MAP
        .get(usize::from(field))
        .copied()
        .filter(|&row| usize::from(row) < ROWS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_block_matches_ascii_where_expected() {
        for byte in (0x20u8..0x7F).filter(|b| b.is_ascii_alphanumeric()) {
            assert_eq!(glyph(u16::from(byte) - 0x20), byte as char);
        }
    }

    #[test]
    fn basic_block_substitutions() {
        // 608 replaces a handful of ASCII positions with accented letters.
        assert_eq!(glyph(0x2A - 0x20), '\u{E1}');
        assert_eq!(glyph(0x5C - 0x20), '\u{E9}');
        assert_eq!(glyph(0x7E - 0x20), '\u{F1}');
        assert_eq!(glyph(0x7F - 0x20), '\u{2588}');
    }

    #[test]
    fn block_bases() {
        assert_eq!(glyph(SPECIAL_BASE), '\u{AE}');
        assert_eq!(glyph(SPECIAL_BASE + 7), '\u{266A}');
        assert_eq!(glyph(EXTENDED_SPANISH_FRENCH_BASE), '\u{C1}');
        assert_eq!(glyph(EXTENDED_SPANISH_FRENCH_BASE + 0x10), '\u{C0}');
        assert_eq!(glyph(EXTENDED_PORTUGUESE_GERMAN_BASE), '\u{C3}');
        assert_eq!(glyph(EXTENDED_PORTUGUESE_GERMAN_BASE + 0x1F), '\u{2518}');
    }

    #[test]
    fn out_of_range_index_uses_replacement() {
        assert_eq!(glyph(176), REPLACEMENT_CHAR);
        assert_eq!(glyph(u16::MAX), REPLACEMENT_CHAR);
        assert_eq!(glyph_or(500, '?'), '?');
    }

    #[test]
    fn row_map_is_a_permutation_of_visible_rows() {
        let mut seen = [false; ROWS];
        for field in 0u8..16 {
            if let Some(row) = preamble_row(field) {
                assert!(!seen[usize::from(row)], "row {row} mapped twice");
                seen[usize::from(row)] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(preamble_row(1), None);
        assert_eq!(preamble_row(16), None);
    }

    #[test]
    fn top_and_bottom_rows() {
        // Field 2 is screen row 1 (top); field 9 is screen row 15 (bottom).
        assert_eq!(preamble_row(2), Some(14));
        assert_eq!(preamble_row(9), Some(0));
    }
}
