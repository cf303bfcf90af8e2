// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region routing.
//!
//! Tabs across a page with a toolbox, two workspaces and their toolbar buttons, then
//! deletes workspaces and prints where focus should land.
//!
//! Run:
//! - `cargo run -p understory_demos --example tree_nav_regions`

use understory_outline::{Outline, OutlineNode};
use understory_tree_nav::adapters::outline::OutlineHost;
use understory_tree_nav::navigator::Navigator;
use understory_tree_nav::types::{Key, KeyEvent, Modifiers};

fn main() {
    let mut o = Outline::new();
    for tree in ["toolbox", "ws-1", "ws-2"] {
        let root = o.insert(None, OutlineNode::group(tree));
        o.insert(Some(root), OutlineNode::item(format!("{tree}-first")));
    }
    let mut host = OutlineHost::new(o);

    let mut nav = Navigator::new("toolbox");
    for ws in ["ws-1", "ws-2"] {
        nav.regions_mut().add_toolbar_button(format!("{ws}-clear"));
        nav.regions_mut().add_workspace_tree(ws);
        nav.set_active_descendant(&mut host, &format!("{ws}-first"), ws);
    }
    nav.set_active_descendant(&mut host, "toolbox-first", "toolbox");

    let order: Vec<&str> = nav.regions().iter().map(|r| r.id.as_str()).collect();
    println!("== Regions in page order ==\n  {order:?}");

    println!("== Tab from the toolbox ==");
    let tab = KeyEvent::new(Key::Tab);
    let mut at = String::from("toolbox");
    loop {
        let is_tree = at == "toolbox" || nav.regions().is_top_level_workspace_tree(&at);
        if is_tree {
            nav.on_keypress(&mut host, &tab, &at);
        } else {
            nav.on_region_keypress(&mut host, &tab, &at);
        }
        match host.focused() {
            Some(next) if next != at => {
                println!("  {at} -> {next}");
                at = next.to_string();
            }
            _ => break,
        }
    }

    let back = KeyEvent::with_modifiers(Key::Tab, Modifiers::SHIFT);
    nav.on_keypress(&mut host, &back, &at);
    println!("== Shift-Tab ==\n  {at} -> {:?}", host.focused());

    println!("== Deletions ==");
    for gone in ["ws-2", "ws-1", "ws-1-clear"] {
        let next = nav.region_deleted(&mut host, gone);
        println!("  delete {gone:<10} -> focus {} ({:?})", next.id, next.kind);
    }
}
