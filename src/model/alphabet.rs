// SPDX-FileCopyrightText: 2026 charhop contributors
// SPDX-License-Identifier: MIT

//! The fixed hotspot key alphabet.
//!
//! 52 symbols, lowercase then uppercase Latin letters in that fixed order.
//! The alphabet is deliberately not configurable; every assignment round
//! draws its labels from this sequence without repetition.

use smol_str::SmolStr;

pub const ALPHABET: [char; 52] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J',
    'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Symbol at `index` in alphabet order.
///
/// # Panics
///
/// Panics if `index >= 52`; assignment never hands out more labels than
/// the alphabet holds, so an out-of-range index is a caller bug.
pub fn symbol(index: usize) -> char {
    assert!(index < ALPHABET.len(), "alphabet index out of range: {index}");
    ALPHABET[index]
}

/// Alphabet position of `symbol`, or `None` for any other character.
pub fn index_of(symbol: char) -> Option<usize> {
    match symbol {
        'a'..='z' => Some(symbol as usize - 'a' as usize),
        'A'..='Z' => Some(26 + symbol as usize - 'A' as usize),
        _ => None,
    }
}

/// Single-symbol label string as handed to the renderer.
pub fn label(symbol: char) -> SmolStr {
    let mut buf = [0u8; 4];
    SmolStr::new(symbol.encode_utf8(&mut buf))
}

#[cfg(test)]
mod tests {
    use super::{index_of, label, symbol, ALPHABET};

    #[test]
    fn alphabet_is_lowercase_then_uppercase() {
        assert_eq!(ALPHABET[0], 'a');
        assert_eq!(ALPHABET[25], 'z');
        assert_eq!(ALPHABET[26], 'A');
        assert_eq!(ALPHABET[51], 'Z');
    }

    #[test]
    fn index_of_inverts_symbol_for_every_entry() {
        for (i, &ch) in ALPHABET.iter().enumerate() {
            assert_eq!(index_of(ch), Some(i));
            assert_eq!(symbol(i), ch);
        }
    }

    #[test]
    fn index_of_rejects_non_alphabet_input() {
        assert_eq!(index_of('0'), None);
        assert_eq!(index_of(' '), None);
        assert_eq!(index_of('ß'), None);
    }

    #[test]
    fn label_renders_single_symbol() {
        assert_eq!(label('Q').as_str(), "Q");
    }

    #[test]
    #[should_panic(expected = "alphabet index out of range")]
    fn symbol_out_of_range_panics() {
        let _ = symbol(52);
    }
}
