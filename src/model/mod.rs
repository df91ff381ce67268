// SPDX-FileCopyrightText: 2026 charhop contributors
// SPDX-License-Identifier: MIT

//! Core value types for hotspot navigation.

pub mod alphabet;
pub mod occurrence;

pub use occurrence::{Occurrence, Region};
