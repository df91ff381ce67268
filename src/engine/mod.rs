// SPDX-FileCopyrightText: 2026 charhop contributors
// SPDX-License-Identifier: MIT

//! Hotspot navigation engine: the session state machine plus the
//! assignment lifecycle around it.
//!
//! One [`JumpEngine`] per view. All calls run synchronously on the
//! thread that owns the text and view state; listener callbacks fire
//! inside the engine call that caused them and must not re-enter the
//! engine.

pub mod assign;
pub mod scan;

pub use assign::{assign, resolve, AssignEntry, Assignment, NoMatches, Outcome};
pub use scan::Scan;

use crate::model::{Occurrence, Region};
use crate::text::TextSource;

/// Navigation session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
    /// No navigation in progress.
    #[default]
    Idle,
    /// Waiting for the user to type the target character.
    AwaitingTarget,
    /// Hotspots are assigned; waiting for a label keystroke.
    AwaitingDecision,
    /// The last scan or keystroke found nothing; a region change may
    /// re-expose occurrences.
    TargetNotFound,
}

/// Synchronous observer of engine transitions.
///
/// `on_assignment_changed(None)` means "clear all labels"; `Some` hands
/// the renderer a read-only view it must not retain across recomputes.
pub trait NavListener {
    fn on_state_changed(&mut self, state: NavState);
    fn on_assignment_changed(&mut self, assignment: Option<&Assignment>);
}

/// What a decision keystroke did, from the host's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Move the cursor to this occurrence; the session is over.
    Jumped(Occurrence),
    /// The key named a group; a fresh, smaller assignment is active.
    Narrowed,
    /// Unknown label or stale text; the session is in
    /// [`NavState::TargetNotFound`].
    NotFound,
}

/// Hotspot assignment & navigation engine.
///
/// Owns the current [`NavState`], the target character, and at most one
/// current [`Assignment`], replaced wholesale on every recompute.
pub struct JumpEngine {
    state: NavState,
    target: Option<char>,
    case_sensitive: bool,
    assignment: Option<Assignment>,
    listeners: Vec<Box<dyn NavListener>>,
}

impl JumpEngine {
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            state: NavState::Idle,
            target: None,
            case_sensitive,
            assignment: None,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn NavListener>) {
        self.listeners.push(listener);
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn target(&self) -> Option<char> {
        self.target
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    /// `Idle -> AwaitingTarget`. No-op in any other state.
    pub fn begin_search(&mut self) {
        if self.state != NavState::Idle {
            return;
        }
        self.enter(NavState::AwaitingTarget);
    }

    /// `AwaitingTarget -> AwaitingDecision` (or `TargetNotFound` when the
    /// scan comes up empty). Records the target and computes a fresh
    /// assignment over `region`. No-op in any other state.
    pub fn set_target<S: TextSource + ?Sized>(&mut self, source: &S, region: Region, target: char) {
        if self.state != NavState::AwaitingTarget {
            return;
        }
        self.target = Some(target);
        self.recompute(source, region);
    }

    /// `TargetNotFound -> AwaitingDecision` when a changed region now has
    /// occurrences; stays in `TargetNotFound` otherwise. No-op elsewhere.
    pub fn retry_with_same_char<S: TextSource + ?Sized>(&mut self, source: &S, region: Region) {
        if self.state != NavState::TargetNotFound {
            return;
        }
        self.recompute(source, region);
    }

    /// Recompute the assignment for a new visible region without changing
    /// the target (scroll or edit while deciding). No-op outside
    /// `AwaitingDecision`.
    pub fn rescan<S: TextSource + ?Sized>(&mut self, source: &S, region: Region) {
        if self.state != NavState::AwaitingDecision {
            return;
        }
        self.recompute(source, region);
    }

    /// Resolve one decision keystroke.
    ///
    /// Jump: `-> Idle`. Narrow: stays in `AwaitingDecision` with the new
    /// assignment. Unknown label or stale text: `-> TargetNotFound`,
    /// failing closed before any cursor movement.
    ///
    /// # Panics
    ///
    /// Panics outside `AwaitingDecision` (e.g. called again after a jump
    /// without a fresh assignment); that is a caller bug, not a
    /// recoverable condition.
    pub fn resolve_key<S: TextSource + ?Sized>(&mut self, source: &S, key: char) -> KeyOutcome {
        assert!(
            self.state == NavState::AwaitingDecision,
            "resolve_key called in {:?}, outside AwaitingDecision",
            self.state
        );
        let Some(assignment) = self.assignment.take() else {
            panic!("resolve_key without a computed assignment");
        };

        if source.revision() != assignment.snapshot_rev() {
            self.clear_assignment();
            self.enter(NavState::TargetNotFound);
            return KeyOutcome::NotFound;
        }

        match assign::resolve(&assignment, key) {
            Outcome::Jump(occurrence) => {
                self.target = None;
                self.clear_assignment();
                self.enter(NavState::Idle);
                KeyOutcome::Jumped(occurrence)
            }
            Outcome::Narrow(narrowed) => {
                self.assignment = Some(narrowed);
                self.notify_assignment();
                KeyOutcome::Narrowed
            }
            Outcome::NotFound => {
                self.clear_assignment();
                self.enter(NavState::TargetNotFound);
                KeyOutcome::NotFound
            }
        }
    }

    /// Any state `-> Idle`; clears the target character and assignment.
    pub fn cancel(&mut self) {
        self.target = None;
        if self.assignment.is_some() {
            self.clear_assignment();
        }
        self.enter(NavState::Idle);
    }

    fn recompute<S: TextSource + ?Sized>(&mut self, source: &S, region: Region) {
        let Some(target) = self.target else {
            return;
        };
        let occurrences: Vec<Occurrence> =
            Scan::new(source, region, target, self.case_sensitive).collect();
        match assign::assign(&occurrences, source.revision()) {
            Ok(assignment) => {
                self.assignment = Some(assignment);
                self.notify_assignment();
                self.enter(NavState::AwaitingDecision);
            }
            Err(NoMatches) => {
                self.clear_assignment();
                self.enter(NavState::TargetNotFound);
            }
        }
    }

    fn clear_assignment(&mut self) {
        self.assignment = None;
        self.notify_assignment();
    }

    fn enter(&mut self, state: NavState) {
        self.state = state;
        for listener in &mut self.listeners {
            listener.on_state_changed(state);
        }
    }

    fn notify_assignment(&mut self) {
        let assignment = self.assignment.as_ref();
        for listener in &mut self.listeners {
            listener.on_assignment_changed(assignment);
        }
    }
}
