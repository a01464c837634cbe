// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Locate native text inputs behind declared controls on a desktop backend.
//!
//! This example shows how to:
//! - mirror a window's views in a `loupe_view_tree::ViewTree`,
//! - register markers with an `InspectionQueue`,
//! - schedule placements during layout and run them once it has settled.
//!
//! The text field is laid out one point off its declared frame, which the
//! exact rule tolerates. The text editor is a scroll view wrapping a smaller
//! text view, so its preset matches candidates inside a padded target.
//!
//! Run:
//! - `RUST_LOG=loupe_search=trace cargo run -p loupe_demos --example find_text_field`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Insets, Rect};
use loupe_search::adapters::view_tree::ViewTreeAdapter;
use loupe_search::marker::{InspectionQueue, Marker, Placement};
use loupe_search::{BackendProfile, Control};
use loupe_view_tree::{LocalView, NodeId, TreeError, ViewTree, WidgetClass};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Class {
    View,
    TextField,
    ScrollView,
    TextView,
}

impl WidgetClass for Class {
    fn is_a(self, class: Self) -> bool {
        class == Self::View || self == class
    }
}

fn view(kind: Class, x0: f64, y0: f64, x1: f64, y1: f64) -> LocalView<Class> {
    LocalView::new(kind, Rect::new(x0, y0, x1, y1))
}

fn main() -> Result<(), TreeError> {
    env_logger::init();

    let mut tree = ViewTree::new();
    let window = tree.insert_window(view(Class::View, 0.0, 0.0, 480.0, 320.0));
    let form = tree.insert(Some(window), view(Class::View, 0.0, 40.0, 480.0, 320.0))?;

    // Declared: a field at (20, 60)-(260, 84) and an editor at (20, 100)-(460, 260).
    let field_marker = tree.insert(Some(form), view(Class::View, 20.0, 20.0, 260.0, 44.0))?;
    let field_host = tree.insert(Some(form), view(Class::View, 0.0, 0.0, 480.0, 60.0))?;
    let field = tree.insert(Some(field_host), view(Class::TextField, 21.0, 19.0, 261.0, 43.0))?;

    let editor_marker = tree.insert(Some(form), view(Class::View, 20.0, 60.0, 460.0, 220.0))?;
    let scroll = tree.insert(Some(form), view(Class::ScrollView, 20.0, 60.0, 460.0, 220.0))?;
    let text = tree.insert(Some(scroll), view(Class::TextView, 0.0, 0.0, 440.0, 160.0))?;

    let profile = BackendProfile::DESKTOP;
    let mut adapter = ViewTreeAdapter::new(tree, profile);
    let found: Rc<RefCell<Vec<(&str, NodeId)>>> = Rc::default();
    let mut queue = InspectionQueue::new();

    let sink = Rc::clone(&found);
    let field_id = queue.insert(Marker::new(
        field_marker,
        Class::TextField,
        profile.options_for(Control::TextField),
        move |_: &ViewTreeAdapter<Class>, node| sink.borrow_mut().push(("text field", node)),
    ));
    let sink = Rc::clone(&found);
    let editor_id = queue.insert(Marker::new(
        editor_marker,
        Class::TextView,
        profile.options_for(Control::TextEditor),
        move |_: &ViewTreeAdapter<Class>, node| sink.borrow_mut().push(("text editor", node)),
    ));

    // Layout hands each marker its frame; the inspections wait for the pass to settle.
    let pass = adapter.tree_mut().commit();
    log::info!("layout pass {} moved {} views", pass.epoch, pass.moved.len());
    queue.schedule(field_id, Placement::new(Rect::new(20.0, 60.0, 260.0, 84.0), Insets::ZERO));
    queue.schedule(editor_id, Placement::new(Rect::new(20.0, 100.0, 460.0, 260.0), Insets::ZERO));

    let summary = queue.run(&adapter);
    println!("{summary:?}");
    for (what, node) in found.borrow().iter() {
        let frame = adapter.tree().global_frame(*node);
        println!("{what}: {node:?} at {frame:?}");
    }
    assert!(found.borrow().contains(&("text field", field)));
    assert!(found.borrow().contains(&("text editor", text)));

    // Hand the tree back to its owner once the markers are done with it.
    let tree = adapter.into_inner();
    println!("{tree:?} after {} layout passes", tree.epoch());
    Ok(())
}
