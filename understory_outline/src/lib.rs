// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_outline --heading-base-level=0

//! Understory Outline: an ordered, labelled outline tree.
//!
//! The outline is the structural half of a nested-list widget: items, the groups that hold
//! them, and the buttons or fields that sit inside an item.
//! It does no rendering and no layout. It keeps parent/child order, a label index for
//! lookup by string id, and a small set of per-node [`NodeFlags`].
//!
//! - [`Outline`]: container managing nodes and the label index.
//! - [`OutlineNode`]: per-node data (label, [`Role`], flags).
//! - [`NodeId`]: generational handle of a node.
//!
//! Handles are generational, like the box tree's: removing a node and inserting a new one
//! with the same label yields a different [`NodeId`], while [`Outline::find`] keeps
//! resolving the label to whichever node currently carries it.
//!
//! ## Minimal usage
//!
//! ```
//! use understory_outline::{Outline, OutlineNode};
//!
//! let mut outline = Outline::new();
//! let root = outline.insert(None, OutlineNode::group("workspace"));
//! let a = outline.insert(Some(root), OutlineNode::item("block-a"));
//! let _field = outline.insert(Some(a), OutlineNode::field("block-a-field"));
//!
//! assert_eq!(outline.find("block-a"), Some(a));
//! assert_eq!(outline.children(root), &[a]);
//!
//! outline.remove(a);
//! assert!(!outline.is_alive(a));
//! assert_eq!(outline.find("block-a-field"), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod outline;
mod types;

pub use outline::Outline;
pub use types::{NodeFlags, NodeId, OutlineNode, Role};
