// SPDX-FileCopyrightText: 2026 charhop contributors
// SPDX-License-Identifier: MIT

//! Forward region scan for target-character occurrences.

use crate::model::{Occurrence, Region};
use crate::text::TextSource;

/// Lazy forward scan of a region for one target character.
///
/// Finite and restartable: construct a new `Scan` to re-scan; nothing is
/// cached across text edits. Comparison is case-insensitive unless
/// `case_sensitive` is set.
pub struct Scan<'a, S: TextSource + ?Sized> {
    source: &'a S,
    next: usize,
    end: usize,
    target: char,
    case_sensitive: bool,
}

impl<'a, S: TextSource + ?Sized> Scan<'a, S> {
    pub fn new(source: &'a S, region: Region, target: char, case_sensitive: bool) -> Self {
        Self {
            source,
            next: region.start(),
            end: region.end().min(source.len()),
            target,
            case_sensitive,
        }
    }
}

impl<S: TextSource + ?Sized> Iterator for Scan<'_, S> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Occurrence> {
        if self.next >= self.end {
            return None;
        }
        match self
            .source
            .next_match(self.next, self.end, self.target, self.case_sensitive)
        {
            Some(position) => {
                self.next = position + 1;
                Some(Occurrence::new(position))
            }
            None => {
                self.next = self.end;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Scan;
    use crate::model::{Occurrence, Region};
    use crate::text::Buffer;

    fn offsets(scan: Scan<'_, Buffer>) -> Vec<usize> {
        scan.map(|occurrence| occurrence.offset()).collect()
    }

    #[test]
    fn scan_finds_occurrences_in_forward_order() {
        let buffer = Buffer::new("one two three");
        let scan = Scan::new(&buffer, Region::new(0, buffer.as_str().len()), 'e', false);
        assert_eq!(offsets(scan), vec![2, 11, 12]);
    }

    #[test]
    fn scan_starts_strictly_after_the_cursor() {
        // Cursor sits on the first 'e'; it must not find itself.
        let buffer = Buffer::new("e e e");
        let scan = Scan::new(&buffer, Region::after_cursor(0, buffer.as_str().len()), 'e', false);
        assert_eq!(offsets(scan), vec![2, 4]);
    }

    #[test]
    fn scan_is_case_insensitive_by_default() {
        let buffer = Buffer::new("Echo led the parade");
        let region = Region::new(0, buffer.as_str().len());
        assert_eq!(offsets(Scan::new(&buffer, region, 'e', false)), vec![0, 6, 11, 18]);
        assert_eq!(offsets(Scan::new(&buffer, region, 'e', true)), vec![6, 11, 18]);
        assert_eq!(offsets(Scan::new(&buffer, region, 'E', true)), vec![0]);
    }

    #[test]
    fn scan_of_empty_region_yields_nothing() {
        let buffer = Buffer::new("eee");
        assert_eq!(offsets(Scan::new(&buffer, Region::new(2, 2), 'e', false)), Vec::<usize>::new());
        assert_eq!(offsets(Scan::new(&buffer, Region::after_cursor(2, 3), 'e', false)), Vec::<usize>::new());
    }

    #[test]
    fn scan_clamps_region_end_to_source_length() {
        let buffer = Buffer::new("abc");
        assert_eq!(offsets(Scan::new(&buffer, Region::new(0, 1000), 'c', false)), vec![2]);
    }

    #[test]
    fn scan_is_restartable_with_identical_results() {
        let buffer = Buffer::new("the quick brown fox");
        let region = Region::new(0, buffer.as_str().len());
        let first: Vec<Occurrence> = Scan::new(&buffer, region, 'o', false).collect();
        let second: Vec<Occurrence> = Scan::new(&buffer, region, 'o', false).collect();
        assert_eq!(first, second);
    }
}
