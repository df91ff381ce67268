// SPDX-FileCopyrightText: 2026 charhop contributors
// SPDX-License-Identifier: MIT

//! Text-source boundary: what the engine needs from a host buffer.
//!
//! The engine never touches screen coordinates or editing; it reads
//! characters by offset and compares revision tokens so a jump computed
//! against an old snapshot fails closed instead of moving the cursor to
//! a stale position.

use memchr::{memchr, memchr2};

/// Read side of a host text buffer.
///
/// `revision()` is a stable token that changes on every structural edit.
pub trait TextSource {
    /// Length in chars.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Character at char offset `pos`, or `None` past the end.
    fn char_at(&self, pos: usize) -> Option<char>;

    /// Revision token of the current contents.
    fn revision(&self) -> u64;

    /// First position in `[from, to)` whose character matches `target`.
    ///
    /// The default walks char by char; implementations with byte access
    /// can override with something faster.
    fn next_match(&self, from: usize, to: usize, target: char, case_sensitive: bool) -> Option<usize> {
        let to = to.min(self.len());
        (from..to).find(|&pos| {
            self.char_at(pos)
                .map_or(false, |ch| chars_match(ch, target, case_sensitive))
        })
    }
}

pub(crate) fn chars_match(found: char, target: char, case_sensitive: bool) -> bool {
    if case_sensitive {
        found == target
    } else {
        found == target || found.to_lowercase().eq(target.to_lowercase())
    }
}

/// In-memory text buffer with a revision counter.
///
/// Replacing the contents bumps the revision, which invalidates any
/// assignment computed against the previous snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    text: String,
    chars: Vec<char>,
    line_starts: Vec<usize>,
    ascii: bool,
    rev: u64,
}

impl Buffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let chars: Vec<char> = text.chars().collect();
        let line_starts = line_starts(&chars);
        let ascii = text.is_ascii();
        Self { text, chars, line_starts, ascii, rev: 0 }
    }

    /// Replace the whole contents and bump the revision.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.chars = text.chars().collect();
        self.line_starts = line_starts(&self.chars);
        self.ascii = text.is_ascii();
        self.text = text;
        self.rev += 1;
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Char offset of the first character of 0-based `line`.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Chars of 0-based `line`, without the trailing newline.
    pub fn line(&self, line: usize) -> Option<&[char]> {
        let start = self.line_start(line)?;
        let end = self
            .line_start(line + 1)
            .map(|next| next - 1)
            .unwrap_or(self.chars.len());
        Some(&self.chars[start..end])
    }

    /// `(line, column)` of a char offset, or `None` past the end.
    pub fn position(&self, offset: usize) -> Option<(usize, usize)> {
        if offset > self.chars.len() {
            return None;
        }
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insert) => insert - 1,
        };
        Some((line, offset - self.line_starts[line]))
    }
}

fn line_starts(chars: &[char]) -> Vec<usize> {
    let mut starts = vec![0];
    for (idx, &ch) in chars.iter().enumerate() {
        if ch == '\n' {
            starts.push(idx + 1);
        }
    }
    starts
}

impl TextSource for Buffer {
    fn len(&self) -> usize {
        self.chars.len()
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    fn revision(&self) -> u64 {
        self.rev
    }

    fn next_match(&self, from: usize, to: usize, target: char, case_sensitive: bool) -> Option<usize> {
        let to = to.min(self.chars.len());
        if from >= to {
            return None;
        }

        // ASCII buffers: char offsets equal byte offsets, so memchr applies.
        if self.ascii && target.is_ascii() {
            let haystack = &self.text.as_bytes()[from..to];
            let found = if case_sensitive {
                memchr(target as u8, haystack)
            } else {
                let lower = target.to_ascii_lowercase() as u8;
                let upper = target.to_ascii_uppercase() as u8;
                if lower == upper {
                    memchr(lower, haystack)
                } else {
                    memchr2(lower, upper, haystack)
                }
            };
            return found.map(|idx| from + idx);
        }

        self.chars[from..to]
            .iter()
            .position(|&ch| chars_match(ch, target, case_sensitive))
            .map(|idx| from + idx)
    }
}

#[cfg(test)]
mod tests {
    use super::{chars_match, Buffer, TextSource};

    #[test]
    fn set_text_bumps_revision() {
        let mut buffer = Buffer::new("hello");
        assert_eq!(buffer.revision(), 0);
        buffer.set_text("world");
        assert_eq!(buffer.revision(), 1);
        assert_eq!(buffer.as_str(), "world");
    }

    #[test]
    fn char_at_is_char_indexed_not_byte_indexed() {
        let buffer = Buffer::new("aé↑b");
        assert_eq!(buffer.char_at(0), Some('a'));
        assert_eq!(buffer.char_at(1), Some('é'));
        assert_eq!(buffer.char_at(2), Some('↑'));
        assert_eq!(buffer.char_at(3), Some('b'));
        assert_eq!(buffer.char_at(4), None);
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn next_match_ascii_fast_path_matches_default_walk() {
        let buffer = Buffer::new("The quick brown Fox jumps over the lazy dog");

        struct Slow<'a>(&'a Buffer);
        impl TextSource for Slow<'_> {
            fn len(&self) -> usize {
                self.0.len()
            }
            fn char_at(&self, pos: usize) -> Option<char> {
                self.0.char_at(pos)
            }
            fn revision(&self) -> u64 {
                self.0.revision()
            }
        }
        let slow = Slow(&buffer);

        for target in ['f', 'F', 'q', 'z', '!'] {
            for case_sensitive in [false, true] {
                let mut from = 0;
                loop {
                    let fast = buffer.next_match(from, buffer.len(), target, case_sensitive);
                    let reference = slow.next_match(from, buffer.len(), target, case_sensitive);
                    assert_eq!(fast, reference, "target={target} cs={case_sensitive} from={from}");
                    match fast {
                        Some(pos) => from = pos + 1,
                        None => break,
                    }
                }
            }
        }
    }

    #[test]
    fn next_match_non_ascii_uses_unicode_case_folding() {
        let buffer = Buffer::new("straße STRASSE Straße");
        assert_eq!(buffer.next_match(0, buffer.len(), 'ß', false), Some(4));
        assert_eq!(buffer.next_match(5, buffer.len(), 'ß', false), Some(19));
        assert_eq!(buffer.next_match(0, buffer.len(), 'S', true), Some(7));
    }

    #[test]
    fn next_match_respects_half_open_bounds() {
        let buffer = Buffer::new("abcabc");
        assert_eq!(buffer.next_match(1, 3, 'a', true), None);
        assert_eq!(buffer.next_match(1, 4, 'a', true), Some(3));
        assert_eq!(buffer.next_match(4, 2, 'a', true), None);
        assert_eq!(buffer.next_match(0, 100, 'c', true), Some(2));
    }

    #[test]
    fn position_and_line_start_round_trip() {
        let buffer = Buffer::new("one\ntwo\n\nfour");
        assert_eq!(buffer.line_count(), 4);
        assert_eq!(buffer.line_start(0), Some(0));
        assert_eq!(buffer.line_start(1), Some(4));
        assert_eq!(buffer.line_start(2), Some(8));
        assert_eq!(buffer.line_start(3), Some(9));
        assert_eq!(buffer.position(0), Some((0, 0)));
        assert_eq!(buffer.position(5), Some((1, 1)));
        assert_eq!(buffer.position(8), Some((2, 0)));
        assert_eq!(buffer.position(12), Some((3, 3)));
        assert_eq!(buffer.position(14), None);
    }

    #[test]
    fn line_strips_trailing_newline() {
        let buffer = Buffer::new("one\ntwo");
        assert_eq!(buffer.line(0), Some(&['o', 'n', 'e'][..]));
        assert_eq!(buffer.line(1), Some(&['t', 'w', 'o'][..]));
        assert_eq!(buffer.line(2), None);
    }

    #[test]
    fn chars_match_is_case_insensitive_only_when_asked() {
        assert!(chars_match('e', 'E', false));
        assert!(!chars_match('e', 'E', true));
        assert!(chars_match('é', 'É', false));
        assert!(!chars_match('e', 'a', false));
    }
}
