// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree navigation basics.
//!
//! Builds a small workspace outline, sets an active descendant, and replays a sequence of
//! key presses, printing the active node and the marked set after each one.
//!
//! Run:
//! - `cargo run -p understory_demos --example tree_nav_basics`

use understory_outline::{Outline, OutlineNode};
use understory_tree_nav::adapters::outline::OutlineHost;
use understory_tree_nav::navigator::Navigator;
use understory_tree_nav::types::{Key, KeyEvent};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // workspace
    // ├── repeat
    // │   └── body
    // │       ├── print
    // │       │   └── print-text (field)
    // │       └── wait
    // └── done
    let mut o = Outline::new();
    let ws = o.insert(None, OutlineNode::group("workspace"));
    let repeat = o.insert(Some(ws), OutlineNode::item("repeat"));
    let body = o.insert(Some(repeat), OutlineNode::group("body"));
    let print = o.insert(Some(body), OutlineNode::item("print"));
    o.insert(Some(print), OutlineNode::field("print-text"));
    o.insert(Some(body), OutlineNode::item("wait"));
    o.insert(Some(ws), OutlineNode::item("done"));

    let mut host = OutlineHost::new(o);
    let mut nav = Navigator::new("toolbox");
    nav.regions_mut().add_workspace_tree("workspace");
    nav.set_active_descendant(&mut host, "repeat", "workspace");

    let keys = [
        Key::ArrowRight,
        Key::ArrowDown,
        Key::ArrowDown,
        Key::ArrowUp,
        Key::Enter,
        Key::ArrowLeft,
        Key::ArrowDown,
    ];

    println!("== Keyboard walk ==");
    for key in keys {
        let outcome = nav.on_keypress(&mut host, &KeyEvent::new(key), "workspace");
        println!(
            "  {key:?} -> active={:?} marked={:?} focus={:?} outcome={outcome:?}",
            nav.active_descendant("workspace"),
            host.marked(),
            host.focused(),
        );
    }
}
