// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Match policy: option flags and the frame rule they select.
//!
//! ## Rule priority
//!
//! Exactly one [`MatchRule`] applies to a search, chosen in this order:
//!
//! 1. [`SUB_FRAME`](MatchOptions::SUB_FRAME) and [`SUPER_FRAME`](MatchOptions::SUPER_FRAME):
//!    any overlap with the target counts ([`MatchRule::Intersects`]).
//! 2. [`SUB_FRAME`](MatchOptions::SUB_FRAME) only: the target must contain the candidate.
//! 3. [`SUPER_FRAME`](MatchOptions::SUPER_FRAME) only: the candidate must contain the target.
//! 4. Neither: the frames must be equal within the backend's [`Tolerance`].
//!
//! Flags that do not take part in rule selection only adjust geometry (see
//! [`crate::target`] and [`crate::search::global_frame`]). Combinations with
//! no joint meaning are inert, never an error.

use kurbo::Rect;

use crate::geometry::{Tolerance, contains_rect, frames_approx_eq, intersects_rect};

bitflags::bitflags! {
    /// Options controlling which frames match and how the target is adjusted.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MatchOptions: u8 {
        /// Move the target origin outward by the leading and top safe-area insets.
        const CONTAINING_SAFE_AREA     = 0b0000_0001;
        /// Do not grow the target size by the safe-area insets (desktop backends).
        const EXCLUDING_SAFE_AREA      = 0b0000_0010;
        /// Always grow the target size by the safe-area insets.
        const ADDING_SAFE_AREA_TO_SIZE = 0b0000_0100;
        /// The native view sits inside the declared frame.
        const SUB_FRAME                = 0b0000_1000;
        /// The native view encloses the declared frame.
        const SUPER_FRAME              = 0b0001_0000;
        /// Strip the candidate's alignment insets before comparing (desktop backends).
        const REMOVE_ALIGNMENT_RECT    = 0b0010_0000;
    }
}

/// The geometric rule a candidate frame is tested with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchRule {
    /// Candidate overlaps the target.
    Intersects,
    /// Target fully contains the candidate.
    TargetContainsCandidate,
    /// Candidate fully contains the target.
    CandidateContainsTarget,
    /// Origin and size agree within tolerance.
    Exact,
}

impl MatchOptions {
    /// Select the rule for this option set.
    pub fn rule(self) -> MatchRule {
        match (
            self.contains(Self::SUB_FRAME),
            self.contains(Self::SUPER_FRAME),
        ) {
            (true, true) => MatchRule::Intersects,
            (true, false) => MatchRule::TargetContainsCandidate,
            (false, true) => MatchRule::CandidateContainsTarget,
            (false, false) => MatchRule::Exact,
        }
    }
}

/// A target frame paired with the rule and tolerance used to test candidates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePredicate {
    /// Target rectangle in the search's coordinate space.
    pub target: Rect,
    /// Selected rule.
    pub rule: MatchRule,
    /// Tolerance for [`MatchRule::Exact`].
    pub tolerance: Tolerance,
}

impl FramePredicate {
    /// Returns true if `candidate` satisfies the rule against the target.
    pub fn accepts(&self, candidate: Rect) -> bool {
        match self.rule {
            MatchRule::Intersects => intersects_rect(self.target, candidate),
            MatchRule::TargetContainsCandidate => contains_rect(self.target, candidate),
            MatchRule::CandidateContainsTarget => contains_rect(candidate, self.target),
            MatchRule::Exact => frames_approx_eq(self.target, candidate, self.tolerance),
        }
    }
}

/// Build the frame predicate for `options` against `target`.
pub fn build_predicate(
    options: MatchOptions,
    target: Rect,
    tolerance: Tolerance,
) -> FramePredicate {
    FramePredicate {
        target,
        rule: options.rule(),
        tolerance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predicate(options: MatchOptions, target: Rect) -> FramePredicate {
        build_predicate(options, target, Tolerance::DESKTOP)
    }

    #[test]
    fn rule_priority() {
        assert_eq!(MatchOptions::empty().rule(), MatchRule::Exact);
        assert_eq!(MatchOptions::SUB_FRAME.rule(), MatchRule::TargetContainsCandidate);
        assert_eq!(MatchOptions::SUPER_FRAME.rule(), MatchRule::CandidateContainsTarget);
        assert_eq!(
            (MatchOptions::SUB_FRAME | MatchOptions::SUPER_FRAME).rule(),
            MatchRule::Intersects
        );
        // Geometry-only flags never change the rule.
        assert_eq!(
            (MatchOptions::CONTAINING_SAFE_AREA
                | MatchOptions::EXCLUDING_SAFE_AREA
                | MatchOptions::REMOVE_ALIGNMENT_RECT)
                .rule(),
            MatchRule::Exact
        );
    }

    #[test]
    fn duplicate_flags_collapse() {
        let once = MatchOptions::SUB_FRAME;
        let twice = MatchOptions::SUB_FRAME | MatchOptions::SUB_FRAME;
        assert_eq!(once, twice);
    }

    #[test]
    fn sub_frame_accepts_nested_candidate() {
        let target = Rect::from_origin_size((10.0, 10.0), (100.0, 40.0));
        let p = predicate(MatchOptions::SUB_FRAME, target);
        assert!(p.accepts(Rect::from_origin_size((10.0, 10.0), (60.0, 20.0))));
        assert!(!p.accepts(Rect::from_origin_size((10.0, 10.0), (160.0, 20.0))));
    }

    #[test]
    fn super_frame_accepts_enclosing_candidate() {
        let target = Rect::from_origin_size((0.0, 0.0), (50.0, 50.0));
        let p = predicate(MatchOptions::SUPER_FRAME, target);
        assert!(p.accepts(Rect::from_origin_size((-5.0, -5.0), (200.0, 200.0))));
        assert!(!p.accepts(Rect::from_origin_size((5.0, 5.0), (20.0, 20.0))));
    }

    #[test]
    fn both_flags_accept_everything_either_flag_accepts() {
        let target = Rect::new(0.0, 0.0, 50.0, 50.0);
        let both = predicate(MatchOptions::SUB_FRAME | MatchOptions::SUPER_FRAME, target);
        let sub = predicate(MatchOptions::SUB_FRAME, target);
        let sup = predicate(MatchOptions::SUPER_FRAME, target);
        let candidates = [
            Rect::new(10.0, 10.0, 20.0, 20.0),
            Rect::new(-10.0, -10.0, 60.0, 60.0),
            Rect::new(40.0, 40.0, 90.0, 90.0),
            Rect::new(0.0, 0.0, 50.0, 50.0),
            Rect::new(60.0, 60.0, 70.0, 70.0),
        ];
        for c in candidates {
            if sub.accepts(c) || sup.accepts(c) {
                assert!(both.accepts(c), "{c:?} accepted by a stricter rule");
            }
        }
        // Partial overlap is accepted only by the combined rule.
        let partial = Rect::new(40.0, 40.0, 90.0, 90.0);
        assert!(both.accepts(partial));
        assert!(!sub.accepts(partial));
        assert!(!sup.accepts(partial));
    }

    #[test]
    fn exact_rule_holds_without_sub_or_super() {
        let target = Rect::from_origin_size((10.0, 10.0), (100.0, 40.0));
        let p = predicate(MatchOptions::CONTAINING_SAFE_AREA, target);
        assert!(p.accepts(target));
        assert!(p.accepts(Rect::from_origin_size((11.0, 9.0), (100.0, 40.0))));
        assert!(!p.accepts(Rect::from_origin_size((10.0, 10.0), (60.0, 20.0))));
    }
}
