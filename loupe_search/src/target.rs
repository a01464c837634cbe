// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target frame builder.
//!
//! Turns the raw global rectangle a marker received from the layout system
//! into the rectangle candidates are matched against. Safe-area insets are
//! folded in first and the sub-frame leeway second; swapping the two steps
//! moves the result by the inset amount.

use kurbo::{Insets, Rect};

use crate::options::MatchOptions;
use crate::profile::{BackendProfile, SizeInsets};

/// Build the final target rectangle.
///
/// `insets` uses `x0` for leading, `y0` for top, `x1` for trailing and `y1`
/// for bottom.
///
/// ```rust
/// use kurbo::{Insets, Rect};
/// use loupe_search::{BackendProfile, MatchOptions, build_target_frame};
///
/// let raw = Rect::from_origin_size((10.0, 10.0), (100.0, 40.0));
/// let profile = BackendProfile::DESKTOP;
/// let target = build_target_frame(raw, Insets::ZERO, MatchOptions::SUB_FRAME, &profile);
/// assert_eq!(target, Rect::from_origin_size((5.0, 5.0), (110.0, 50.0)));
/// ```
pub fn build_target_frame(
    raw: Rect,
    insets: Insets,
    options: MatchOptions,
    profile: &BackendProfile,
) -> Rect {
    let mut x = raw.x0;
    let mut y = raw.y0;
    let mut width = raw.width();
    let mut height = raw.height();

    if options.contains(MatchOptions::CONTAINING_SAFE_AREA) {
        x -= insets.x0;
        y -= insets.y0;
    }
    let grow = options.contains(MatchOptions::ADDING_SAFE_AREA_TO_SIZE)
        || match profile.size_insets {
            SizeInsets::Always => true,
            SizeInsets::UnlessExcluded => !options.contains(MatchOptions::EXCLUDING_SAFE_AREA),
        };
    if grow {
        width += insets.x0 + insets.x1;
        height += insets.y0 + insets.y1;
    }

    if options.contains(MatchOptions::SUB_FRAME) {
        let leeway = profile.sub_frame_leeway;
        x -= leeway;
        y -= leeway;
        width += leeway * 2.0;
        height += leeway * 2.0;
    }

    Rect::from_origin_size((x, y), (width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: Rect = Rect::new(10.0, 20.0, 110.0, 60.0);
    const INSETS: Insets = Insets::new(4.0, 3.0, 6.0, 7.0);

    #[test]
    fn no_options_touch_grows_size_only() {
        let t = build_target_frame(RAW, INSETS, MatchOptions::empty(), &BackendProfile::TOUCH);
        assert_eq!(t, Rect::from_origin_size((10.0, 20.0), (110.0, 50.0)));
    }

    #[test]
    fn containing_safe_area_moves_origin_and_grows_size() {
        let t = build_target_frame(
            RAW,
            INSETS,
            MatchOptions::CONTAINING_SAFE_AREA,
            &BackendProfile::TOUCH,
        );
        assert_eq!(t, Rect::from_origin_size((6.0, 17.0), (110.0, 50.0)));
    }

    #[test]
    fn desktop_excluding_safe_area_keeps_size() {
        let grown =
            build_target_frame(RAW, INSETS, MatchOptions::empty(), &BackendProfile::DESKTOP);
        assert_eq!(grown, Rect::from_origin_size((10.0, 20.0), (110.0, 50.0)));

        let kept = build_target_frame(
            RAW,
            INSETS,
            MatchOptions::EXCLUDING_SAFE_AREA,
            &BackendProfile::DESKTOP,
        );
        assert_eq!(kept, RAW);

        // Touch backends ignore the flag.
        let touch = build_target_frame(
            RAW,
            INSETS,
            MatchOptions::EXCLUDING_SAFE_AREA,
            &BackendProfile::TOUCH,
        );
        assert_eq!(touch, grown);
    }

    #[test]
    fn adding_safe_area_to_size_applies_insets_once() {
        let t = build_target_frame(
            RAW,
            INSETS,
            MatchOptions::EXCLUDING_SAFE_AREA | MatchOptions::ADDING_SAFE_AREA_TO_SIZE,
            &BackendProfile::DESKTOP,
        );
        assert_eq!(t, Rect::from_origin_size((10.0, 20.0), (110.0, 50.0)));

        let t = build_target_frame(
            RAW,
            INSETS,
            MatchOptions::ADDING_SAFE_AREA_TO_SIZE,
            &BackendProfile::TOUCH,
        );
        assert_eq!(t, Rect::from_origin_size((10.0, 20.0), (110.0, 50.0)));
    }

    #[test]
    fn leeway_follows_insets() {
        let t = build_target_frame(
            RAW,
            INSETS,
            MatchOptions::CONTAINING_SAFE_AREA | MatchOptions::SUB_FRAME,
            &BackendProfile::DESKTOP,
        );
        // Origin: 10 - 4 - 5, 20 - 3 - 5. Size: 100 + 10 + 10, 40 + 10 + 10.
        assert_eq!(t, Rect::from_origin_size((1.0, 12.0), (120.0, 60.0)));

        let t =
            build_target_frame(RAW, Insets::ZERO, MatchOptions::SUB_FRAME, &BackendProfile::TOUCH);
        assert_eq!(t, Rect::from_origin_size((8.0, 18.0), (104.0, 44.0)));
    }
}
