// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-backend constants.
//!
//! The search algorithm is written once. Everything that differs between a
//! windowed desktop toolkit and a touch-screen toolkit lives in a
//! [`BackendProfile`] supplied by the tree adapter.

use crate::geometry::Tolerance;

/// Which family of toolkit a profile describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Windowed desktop toolkit.
    Desktop,
    /// Touch-screen toolkit.
    Touch,
}

/// When safe-area insets grow the target size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeInsets {
    /// Always, regardless of options.
    Always,
    /// Unless [`EXCLUDING_SAFE_AREA`](crate::MatchOptions::EXCLUDING_SAFE_AREA) is set.
    UnlessExcluded,
}

/// Constants that parameterize the target builder and the matcher.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackendProfile {
    /// Toolkit family.
    pub kind: BackendKind,
    /// Tolerance of the exact-match rule.
    pub tolerance: Tolerance,
    /// Padding added on every side of the target under the sub-frame rule.
    pub sub_frame_leeway: f64,
    /// How safe-area insets affect the target size.
    pub size_insets: SizeInsets,
    /// Whether the backend reports alignment insets at all.
    pub alignment_rect: bool,
}

impl BackendProfile {
    /// Windowed desktop backend.
    pub const DESKTOP: Self = Self {
        kind: BackendKind::Desktop,
        tolerance: Tolerance::DESKTOP,
        sub_frame_leeway: 5.0,
        size_insets: SizeInsets::UnlessExcluded,
        alignment_rect: true,
    };

    /// Touch-screen backend.
    pub const TOUCH: Self = Self {
        kind: BackendKind::Touch,
        tolerance: Tolerance::TOUCH,
        sub_frame_leeway: 2.0,
        size_insets: SizeInsets::Always,
        alignment_rect: false,
    };
}
