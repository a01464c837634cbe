// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reach the navigation controller that owns a declared navigation container.
//!
//! On a touch backend the container's content is laid out inside the safe
//! area, while the controller's view fills the screen. The preset folds the
//! safe-area insets back into the target, and a side check only accepts views
//! owned by a navigation controller. The owner chain then yields the
//! controller itself.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p loupe_demos --example navigation_controller`

use kurbo::{Insets, Rect};
use loupe_search::adapters::view_tree::ViewTreeAdapter;
use loupe_search::{
    BackendProfile, Control, SearchRequest, TreeAdapter, build_target_frame, find_ancestor_match,
};
use loupe_view_tree::{LocalView, NodeId, TreeError, ViewTree, WidgetClass};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Class {
    View,
    NavigationBar,
    NavigationController,
}

impl WidgetClass for Class {
    fn is_a(self, class: Self) -> bool {
        class == Self::View || self == class
    }
}

fn main() -> Result<(), TreeError> {
    env_logger::init();

    let screen = Rect::new(0.0, 0.0, 390.0, 844.0);
    let safe_area = Insets::new(0.0, 47.0, 0.0, 34.0);

    let mut tree = ViewTree::new();
    let window = tree.insert_window(LocalView::new(Class::View, screen));
    let nav_view = tree.insert(Some(window), LocalView::new(Class::View, screen))?;
    tree.insert(
        Some(nav_view),
        LocalView::new(Class::NavigationBar, Rect::new(0.0, 47.0, 390.0, 91.0)),
    )?;
    let content = tree.insert(Some(nav_view), LocalView::new(Class::View, screen))?;
    let marker = tree.insert(
        Some(content),
        LocalView::new(Class::View, Rect::new(0.0, 47.0, 390.0, 810.0)),
    )?;
    let nav = tree.add_controller(Class::NavigationController, nav_view, None)?;
    tree.commit();

    let adapter = ViewTreeAdapter::new(tree, BackendProfile::TOUCH);
    let options = adapter.profile().options_for(Control::NavigationContainer);
    // The declared container reports the safe area as its frame.
    let target = build_target_frame(
        Rect::new(0.0, 47.0, 390.0, 810.0),
        safe_area,
        options,
        adapter.profile(),
    );
    log::info!("target frame {target:?}");

    let owned_by_nav = |a: &ViewTreeAdapter<Class>, n: NodeId| {
        a.controller_of(n, Class::NavigationController).is_some()
    };
    let request = SearchRequest::new(target, Class::View, options).with_check(&owned_by_nav);
    let found = find_ancestor_match(&adapter, marker, &request);
    let controller =
        found.and_then(|node| adapter.controller_of(node, Class::NavigationController));

    println!("view: {found:?}");
    println!("controller: {controller:?}");
    assert_eq!(controller, Some(nav));
    Ok(())
}
