// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owner-chain lookup.
//!
//! Once a view has been found, callers often want the controller that owns
//! it rather than the view itself. Owners form a linear chain that is
//! separate from the view tree; [`find_owner`] walks it until the narrowing
//! accessor accepts a link.

use smallvec::SmallVec;

/// A linear chain of owning objects.
pub trait OwnerChain {
    /// A link in the chain.
    type Owner: Copy + Eq;

    /// The link after `owner`, or `None` at the end of the chain.
    fn next_owner(&self, owner: Self::Owner) -> Option<Self::Owner>;
}

/// Walk the chain after `start` and return the first link `narrow` accepts.
///
/// `start` itself is not offered to `narrow`. The walk stops at the end of the
/// chain and on any cycle, including a link that names itself as its successor.
///
/// ```rust
/// use loupe_search::owner::{OwnerChain, find_owner};
///
/// struct Chain;
/// impl OwnerChain for Chain {
///     type Owner = u32;
///     fn next_owner(&self, owner: u32) -> Option<u32> {
///         (owner < 5).then_some(owner + 1)
///     }
/// }
///
/// let even_above = find_owner(&Chain, 2, |o| (o % 2 == 0).then_some(o));
/// assert_eq!(even_above, Some(4));
/// assert_eq!(find_owner(&Chain, 5, Some), None);
/// ```
pub fn find_owner<C, T>(
    chain: &C,
    start: C::Owner,
    mut narrow: impl FnMut(C::Owner) -> Option<T>,
) -> Option<T>
where
    C: OwnerChain + ?Sized,
{
    let mut visited: SmallVec<[C::Owner; 8]> = SmallVec::new();
    let mut current = start;
    visited.push(current);
    while let Some(next) = chain.next_owner(current) {
        if visited.contains(&next) {
            return None;
        }
        if let Some(found) = narrow(next) {
            return Some(found);
        }
        visited.push(next);
        current = next;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// `links[i]` is the successor of `i`.
    struct Links(Vec<Option<usize>>);

    impl OwnerChain for Links {
        type Owner = usize;
        fn next_owner(&self, owner: usize) -> Option<usize> {
            self.0.get(owner).copied().flatten()
        }
    }

    #[test]
    fn start_is_not_a_candidate() {
        let chain = Links(alloc::vec![Some(1), Some(2), None]);
        assert_eq!(find_owner(&chain, 0, Some), Some(1));
        assert_eq!(find_owner(&chain, 0, |o| (o == 0).then_some(o)), None);
    }

    #[test]
    fn end_of_chain_is_no_match() {
        let chain = Links(alloc::vec![Some(1), Some(2), None]);
        assert_eq!(find_owner(&chain, 0, |o| (o == 7).then_some(o)), None);
    }

    #[test]
    fn self_loop_terminates() {
        let chain = Links(alloc::vec![Some(1), Some(1)]);
        let mut offered = Vec::new();
        let found = find_owner(&chain, 0, |o| {
            offered.push(o);
            None::<usize>
        });
        assert_eq!(found, None);
        assert_eq!(offered, alloc::vec![1]);
    }

    #[test]
    fn longer_cycle_terminates() {
        let chain = Links(alloc::vec![Some(1), Some(2), Some(0)]);
        let mut offered = Vec::new();
        let found = find_owner(&chain, 0, |o| {
            offered.push(o);
            None::<usize>
        });
        assert_eq!(found, None);
        assert_eq!(offered, alloc::vec![1, 2]);
    }

    #[test]
    fn long_chains_spill_past_inline_capacity() {
        let mut links: Vec<Option<usize>> = (1..100).map(Some).collect();
        links.push(None);
        let chain = Links(links);
        assert_eq!(find_owner(&chain, 0, |o| (o == 99).then_some("root")), Some("root"));
    }
}
