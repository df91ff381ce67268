// SPDX-FileCopyrightText: 2026 charhop contributors
// SPDX-License-Identifier: MIT

//! charhop — jump-to-character hotspot navigation for the terminal.
//!
//! Press `f` in the pager, type a character, and every occurrence in the
//! visible region gets a short key label; typing a label jumps the cursor
//! there. When occurrences outnumber the 52-key alphabet, labels become
//! groups that narrow round by round until a single position remains.

pub mod config;
pub mod engine;
pub mod model;
pub mod text;
pub mod tui;
