// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle predicates used by the matching rules.
//!
//! Only the exact-match rule is tolerant. Containment and intersection are
//! evaluated exactly; the sub-frame leeway applied by the target builder is
//! what absorbs rounding for those rules.

use kurbo::Rect;

/// Maximum per-coordinate difference for two values to count as equal.
///
/// Two independent layout systems measuring the same rectangle rarely agree
/// to the last bit, so frames are compared within this distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance(pub f64);

impl Tolerance {
    /// Tolerance for windowed desktop backends.
    pub const DESKTOP: Self = Self(2.0);
    /// Tolerance for touch-screen backends.
    pub const TOUCH: Self = Self(1.0);

    /// Returns true iff `|a - b| <= epsilon`.
    #[inline]
    pub fn approx_eq(self, a: f64, b: f64) -> bool {
        a - b <= self.0 && b - a <= self.0
    }
}

/// Four independent tolerance checks: width, height, x and y must all agree.
pub fn frames_approx_eq(target: Rect, candidate: Rect, tolerance: Tolerance) -> bool {
    tolerance.approx_eq(target.width(), candidate.width())
        && tolerance.approx_eq(target.height(), candidate.height())
        && tolerance.approx_eq(target.x0, candidate.x0)
        && tolerance.approx_eq(target.y0, candidate.y0)
}

/// Returns true if `inner` lies entirely within `outer`. Shared edges count as contained.
pub fn contains_rect(outer: Rect, inner: Rect) -> bool {
    outer.x0 <= inner.x0 && outer.y0 <= inner.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

/// Returns true if `a` and `b` overlap with positive area.
pub fn intersects_rect(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_boundary_is_inclusive() {
        let t = Tolerance::DESKTOP;
        assert!(t.approx_eq(10.0, 12.0));
        assert!(t.approx_eq(12.0, 10.0));
        assert!(!t.approx_eq(10.0, 13.0));
        assert!(!t.approx_eq(13.0, 10.0));
    }

    #[test]
    fn frames_differing_by_epsilon_in_one_dimension_match() {
        let target = Rect::from_origin_size((10.0, 10.0), (100.0, 40.0));
        for shifted in [
            Rect::from_origin_size((12.0, 10.0), (100.0, 40.0)),
            Rect::from_origin_size((10.0, 8.0), (100.0, 40.0)),
            Rect::from_origin_size((10.0, 10.0), (102.0, 40.0)),
            Rect::from_origin_size((10.0, 10.0), (100.0, 38.0)),
        ] {
            assert!(frames_approx_eq(target, shifted, Tolerance::DESKTOP));
        }
        for shifted in [
            Rect::from_origin_size((13.0, 10.0), (100.0, 40.0)),
            Rect::from_origin_size((10.0, 10.0), (100.0, 43.0)),
        ] {
            assert!(!frames_approx_eq(target, shifted, Tolerance::DESKTOP));
        }
    }

    #[test]
    fn jittered_frame_matches() {
        let target = Rect::from_origin_size((10.0, 10.0), (100.0, 40.0));
        let candidate = Rect::from_origin_size((11.0, 9.0), (100.0, 40.0));
        assert!(frames_approx_eq(target, candidate, Tolerance::DESKTOP));
        assert!(frames_approx_eq(target, candidate, Tolerance::TOUCH));
    }

    #[test]
    fn containment_is_exact() {
        let outer = Rect::new(0.0, 0.0, 50.0, 50.0);
        assert!(contains_rect(outer, outer));
        assert!(contains_rect(outer, Rect::new(10.0, 10.0, 50.0, 20.0)));
        assert!(!contains_rect(outer, Rect::new(10.0, 10.0, 50.5, 20.0)));
        assert!(!contains_rect(outer, Rect::new(-0.5, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!intersects_rect(a, Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert!(intersects_rect(a, Rect::new(9.0, 9.0, 20.0, 20.0)));
        assert!(intersects_rect(a, Rect::new(2.0, 2.0, 3.0, 3.0)));
    }
}
