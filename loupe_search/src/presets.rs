// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Option presets for common declared controls.
//!
//! Each declared control materializes differently per backend: a text editor
//! is a scroll view wrapping a smaller text view on desktop, a list is a table
//! view with extra chrome, a toggle is a switch smaller than its declared row.
//! These presets record which [`MatchOptions`] find the native widget.

use crate::options::MatchOptions;
use crate::profile::{BackendKind, BackendProfile};

/// A declared control with a known native counterpart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    /// Single-line text input.
    TextField,
    /// Multi-line text input.
    TextEditor,
    /// Scroll container.
    ScrollView,
    /// List or form.
    List,
    /// A row of a list or form.
    ListCell,
    /// Push button.
    Button,
    /// On/off switch.
    Toggle,
    /// Continuous value slider.
    Slider,
    /// Increment/decrement stepper.
    Stepper,
    /// Date picker.
    DatePicker,
    /// Segmented picker.
    SegmentedPicker,
    /// Color well.
    ColorPicker,
    /// Navigation container (matched through its owning controller).
    NavigationContainer,
    /// Navigation bar of a navigation container.
    NavigationBar,
    /// Tab container (matched through its owning controller).
    TabContainer,
    /// Tab bar of a tab container.
    TabBar,
}

impl BackendProfile {
    /// Options that locate the native widget for `control` on this backend.
    pub fn options_for(&self, control: Control) -> MatchOptions {
        use Control::*;
        match (self.kind, control) {
            (_, TextField) => MatchOptions::empty(),
            (BackendKind::Desktop, TextEditor) => MatchOptions::SUB_FRAME,
            (BackendKind::Touch, TextEditor) => MatchOptions::empty(),
            (BackendKind::Desktop, ScrollView) => MatchOptions::CONTAINING_SAFE_AREA,
            (BackendKind::Touch, ScrollView) => MatchOptions::empty(),
            (BackendKind::Desktop, List) => {
                MatchOptions::EXCLUDING_SAFE_AREA
                    | MatchOptions::SUB_FRAME
                    | MatchOptions::SUPER_FRAME
            }
            (BackendKind::Touch, List) => MatchOptions::empty(),
            (_, ListCell) => MatchOptions::SUPER_FRAME,
            (BackendKind::Desktop, Button) => MatchOptions::REMOVE_ALIGNMENT_RECT,
            (BackendKind::Touch, Button) => MatchOptions::empty(),
            (_, Toggle | Slider | Stepper | DatePicker | ColorPicker) => MatchOptions::SUB_FRAME,
            (BackendKind::Desktop, SegmentedPicker) => MatchOptions::SUB_FRAME,
            (BackendKind::Touch, SegmentedPicker) => MatchOptions::empty(),
            (_, NavigationContainer | TabContainer) => MatchOptions::CONTAINING_SAFE_AREA,
            (_, NavigationBar | TabBar) => MatchOptions::SUB_FRAME,
        }
    }
}
