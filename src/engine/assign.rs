// SPDX-FileCopyrightText: 2026 charhop contributors
// SPDX-License-Identifier: MIT

//! Hotspot label assignment and keystroke resolution.
//!
//! An [`Assignment`] is an immutable value covering one decision round:
//! every occurrence appears in exactly one entry, entries are stored in
//! alphabet order, and narrowing a group produces a fresh `Assignment`
//! over that group's occurrences. Stale assignments are discarded
//! wholesale, never patched.

use std::fmt;

use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::model::{alphabet, Occurrence};

/// One label entry: a single alphabet symbol covering one or more
/// occurrences. More than one occurrence makes it a group that needs a
/// further keystroke to disambiguate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignEntry {
    symbol: char,
    occurrences: SmallVec<[Occurrence; 2]>,
}

impl AssignEntry {
    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// Label string as handed to the renderer.
    pub fn label(&self) -> SmolStr {
        alphabet::label(self.symbol)
    }

    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    pub fn is_group(&self) -> bool {
        self.occurrences.len() > 1
    }
}

/// The complete label → occurrence mapping for one decision round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    snapshot_rev: u64,
    entries: Vec<AssignEntry>,
}

impl Assignment {
    /// Revision of the text snapshot the occurrences were scanned from.
    pub fn snapshot_rev(&self) -> u64 {
        self.snapshot_rev
    }

    /// Entries in alphabet order.
    pub fn entries(&self) -> &[AssignEntry] {
        &self.entries
    }

    pub fn entry(&self, symbol: char) -> Option<&AssignEntry> {
        let index = alphabet::index_of(symbol)?;
        // Entries are dense in alphabet order, so the index is direct.
        self.entries.get(index).filter(|entry| entry.symbol == symbol)
    }

    pub fn occurrence_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.occurrences.len()).sum()
    }

    /// Label/position pairs for the renderer, one per occurrence; group
    /// labels repeat at each of the group's positions.
    pub fn hotspots(&self) -> impl Iterator<Item = (SmolStr, Occurrence)> + '_ {
        self.entries.iter().flat_map(|entry| {
            entry
                .occurrences
                .iter()
                .map(move |&occurrence| (entry.label(), occurrence))
        })
    }
}

/// The scan produced zero occurrences. A normal outcome that drives the
/// target-not-found transition, not a caller error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoMatches;

impl fmt::Display for NoMatches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no occurrences of the target character in the region")
    }
}

impl std::error::Error for NoMatches {}

/// Outcome of resolving one keystroke against an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The key named a single occurrence; move the cursor there.
    Jump(Occurrence),
    /// The key named a group; continue deciding against the new,
    /// strictly smaller assignment.
    Narrow(Assignment),
    /// The key names nothing in this assignment.
    NotFound,
}

/// Assign labels to `occurrences` (in scan order) for one decision round.
///
/// With `N` occurrences and the 52-symbol alphabet:
/// - `N <= 52`: occurrence `i` gets the single label `alphabet[i]`.
/// - `N > 52`: occurrences are partitioned into 52 contiguous groups;
///   with `q = N / 52` and `r = N % 52`, the first `r` groups take
///   `q + 1` occurrences and the rest take `q`. A group that ends up
///   with one occurrence is a resolved single, so narrowing depth stays
///   within `ceil(log52(N))`.
///
/// Deterministic: the same occurrence sequence always yields the same
/// mapping.
pub fn assign(occurrences: &[Occurrence], snapshot_rev: u64) -> Result<Assignment, NoMatches> {
    let n = occurrences.len();
    if n == 0 {
        return Err(NoMatches);
    }

    let k = alphabet::ALPHABET.len();
    let mut entries = Vec::with_capacity(n.min(k));

    if n <= k {
        for (index, &occurrence) in occurrences.iter().enumerate() {
            entries.push(AssignEntry {
                symbol: alphabet::symbol(index),
                occurrences: SmallVec::from_slice(&[occurrence]),
            });
        }
    } else {
        let quota = n / k;
        let overflow = n % k;
        let mut next = 0;
        for index in 0..k {
            let take = if index < overflow { quota + 1 } else { quota };
            entries.push(AssignEntry {
                symbol: alphabet::symbol(index),
                occurrences: SmallVec::from_slice(&occurrences[next..next + take]),
            });
            next += take;
        }
        debug_assert_eq!(next, n);
    }

    Ok(Assignment { snapshot_rev, entries })
}

/// Resolve one keystroke against `assignment`.
///
/// Unknown keys (including anything outside the alphabet) yield
/// [`Outcome::NotFound`]; group keys re-assign over the group's
/// occurrences and yield [`Outcome::Narrow`].
pub fn resolve(assignment: &Assignment, key: char) -> Outcome {
    let Some(entry) = assignment.entry(key) else {
        return Outcome::NotFound;
    };

    match entry.occurrences() {
        [single] => Outcome::Jump(*single),
        group => match assign(group, assignment.snapshot_rev) {
            Ok(narrowed) => Outcome::Narrow(narrowed),
            // Entries are never empty by construction.
            Err(NoMatches) => unreachable!("assignment entry with no occurrences"),
        },
    }
}
