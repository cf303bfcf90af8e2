// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traversal over containers.
//!
//! ## Overview
//!
//! Pure functions over a [`TreeModel`] snapshot. Only [containers](NodeKind::Container)
//! are ever returned. Wrappers are transparent: searches descend through them and sibling
//! walks climb through them. Controls are leaves and are never descended into.
//!
//! ## Levels
//!
//! A level is the set of containers whose nearest container ancestor is the same node.
//! [`next_sibling`] and [`previous_sibling`] stay within a level: they climb wrapper
//! ancestors looking for a following (or preceding) branch, and stop at the enclosing
//! container or at the root. [`parent_container`] and [`first_descendant`] move between
//! levels.
//!
//! Branches that hold no container at all (an empty wrapper, a lone control) are skipped,
//! so `previous_sibling(next_sibling(a)) == a` whenever the first step succeeds. A sibling
//! step therefore never stops short on such a branch: it keeps scanning later siblings and
//! climbing wrappers instead of returning the branch's (absent) first container.
//!
//! ## Example
//!
//! ```text
//! root (wrapper)
//! ├── a (container)
//! │   └── list (wrapper)
//! │       └── a1 (container)
//! └── row (wrapper)
//!     ├── button (control)
//!     └── b (container)
//! ```
//!
//! `next_sibling(a) == b`, `first_descendant(a) == a1`, `next_sibling(a1) == None`,
//! `parent_container(a1) == a`.

use crate::types::{NodeKind, TreeModel};

/// First container below `node` in document order.
///
/// The search starts at `node`'s children; `node` itself is never returned.
pub fn first_descendant<M: TreeModel + ?Sized>(model: &M, node: M::Node) -> Option<M::Node> {
    model
        .children(node)
        .iter()
        .find_map(|&child| container_or_first(model, child))
}

/// Last container below `node`, scanning children right to left.
///
/// The rightmost branch holding a container wins; within it, a container child is
/// returned before anything nested deeper.
pub fn last_descendant<M: TreeModel + ?Sized>(model: &M, node: M::Node) -> Option<M::Node> {
    model
        .children(node)
        .iter()
        .rev()
        .find_map(|&child| container_or_last(model, child))
}

/// Next container at the same level as `node`, or `None` at the end of the level.
pub fn next_sibling<M: TreeModel + ?Sized>(model: &M, node: M::Node) -> Option<M::Node> {
    let mut cur = node;
    loop {
        let parent = model.parent(cur)?;
        let siblings = model.children(parent);
        let pos = siblings.iter().position(|&s| s == cur)?;
        if let Some(found) = siblings[pos + 1..]
            .iter()
            .find_map(|&s| container_or_first(model, s))
        {
            return Some(found);
        }
        if model.kind(parent).is_container() {
            return None;
        }
        cur = parent;
    }
}

/// Previous container at the same level as `node`, or `None` at the start of the level.
pub fn previous_sibling<M: TreeModel + ?Sized>(model: &M, node: M::Node) -> Option<M::Node> {
    let mut cur = node;
    loop {
        let parent = model.parent(cur)?;
        let siblings = model.children(parent);
        let pos = siblings.iter().position(|&s| s == cur)?;
        if let Some(found) = siblings[..pos]
            .iter()
            .rev()
            .find_map(|&s| container_or_last(model, s))
        {
            return Some(found);
        }
        if model.kind(parent).is_container() {
            return None;
        }
        cur = parent;
    }
}

/// Nearest container ancestor of `node`.
///
/// A control first skips its own wrapper, so the result is the container that holds the
/// control's row rather than the row itself.
pub fn parent_container<M: TreeModel + ?Sized>(model: &M, node: M::Node) -> Option<M::Node> {
    let mut cur = model.parent(node);
    if model.kind(node).is_control() {
        cur = cur.and_then(|n| model.parent(n));
    }
    while let Some(n) = cur {
        if model.kind(n).is_container() {
            return Some(n);
        }
        cur = model.parent(n);
    }
    None
}

fn container_or_first<M: TreeModel + ?Sized>(model: &M, node: M::Node) -> Option<M::Node> {
    match model.kind(node) {
        NodeKind::Container => Some(node),
        NodeKind::Wrapper => first_descendant(model, node),
        NodeKind::Control(_) => None,
    }
}

fn container_or_last<M: TreeModel + ?Sized>(model: &M, node: M::Node) -> Option<M::Node> {
    match model.kind(node) {
        NodeKind::Container => Some(node),
        NodeKind::Wrapper => last_descendant(model, node),
        NodeKind::Control(_) => None,
    }
}
