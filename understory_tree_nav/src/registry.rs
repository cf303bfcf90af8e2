// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active-descendant registry.
//!
//! ## Overview
//!
//! Tracks, per tree id, the string id of the node that is logically focused, and keeps
//! the host's marking in step with it: at any time, the node recorded for a tree is the
//! one carrying the marking, except while a [preserving-focus](Registry::run_preserving_focus)
//! edit is pending.
//!
//! ## Deferred re-mark
//!
//! Structural edits may destroy and recreate the active node. [`Registry::run_preserving_focus`]
//! unmarks immediately, runs the edit, and queues a re-mark. The host's event loop calls
//! [`Registry::run_deferred`] on a later turn; the recorded id is resolved again at that
//! point, so a node recreated under a new handle is found, and a node that is gone is
//! dropped from the map without marking anything.
//!
//! ```
//! use understory_tree_nav::registry::Registry;
//! # use understory_tree_nav::types::{ControlKind, NavHost, NodeKind, TreeModel};
//! # struct One(bool);
//! # impl TreeModel for One {
//! #     type Node = u8;
//! #     fn resolve(&self, id: &str) -> Option<u8> { (id == "a").then_some(0) }
//! #     fn id_of(&self, _: u8) -> Option<&str> { Some("a") }
//! #     fn parent(&self, _: u8) -> Option<u8> { None }
//! #     fn children(&self, _: u8) -> &[u8] { &[] }
//! #     fn kind(&self, _: u8) -> NodeKind { NodeKind::Container }
//! # }
//! # impl NavHost for One {
//! #     fn mark_active(&mut self, _: &str) { self.0 = true; }
//! #     fn unmark_active(&mut self, _: &str) { self.0 = false; }
//! #     fn focus_host(&mut self, _: &str) {}
//! #     fn activate_control(&mut self, _: &str, _: ControlKind) -> bool { true }
//! # }
//! let mut host = One(false);
//! let mut registry = Registry::new();
//! assert_eq!(registry.active("tree"), "");
//! assert!(registry.set_active(&mut host, "a", "tree"));
//! assert_eq!(registry.active("tree"), "a");
//!
//! registry.run_preserving_focus(&mut host, "tree", |_host| { /* edit the tree */ });
//! assert!(!host.0);
//! registry.run_deferred(&mut host);
//! assert!(host.0);
//! ```

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::report;
use crate::types::{Anomaly, NavHost};

/// A queued re-mark for one tree.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Remark {
    tree_id: String,
    id: Option<String>,
}

/// Per-tree active-descendant state.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    active: BTreeMap<String, String>,
    pending: Vec<Remark>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Active id for `tree_id`, or `""` when none is recorded.
    pub fn active(&self, tree_id: &str) -> &str {
        self.active.get(tree_id).map_or("", String::as_str)
    }

    /// Iterate `(tree_id, active_id)` pairs in tree-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.active.iter().map(|(t, a)| (t.as_str(), a.as_str()))
    }

    /// Make `new_id` the active descendant of `tree_id`.
    ///
    /// Returns `false` and changes nothing if `new_id` does not resolve. Setting the id that
    /// is already active is a no-op unless a re-mark for the tree is pending, in which case
    /// the node is marked now and the pending re-mark is dropped.
    pub fn set_active<H: NavHost + ?Sized>(
        &mut self,
        host: &mut H,
        new_id: &str,
        tree_id: &str,
    ) -> bool {
        if host.resolve(new_id).is_none() {
            report(
                host,
                Anomaly::StaleReference {
                    tree_id: tree_id.to_string(),
                    id: new_id.to_string(),
                },
            );
            return false;
        }
        // A pending re-mark means the previous node is already unmarked.
        let was_pending = self.cancel_pending(tree_id);
        let prev = self.active.get(tree_id).cloned();
        if !was_pending && prev.as_deref() == Some(new_id) {
            return true;
        }
        if !was_pending
            && let Some(prev) = prev.as_deref()
            && host.resolve(prev).is_some()
        {
            host.unmark_active(prev);
        }
        host.mark_active(new_id);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "tree_nav.active",
            tree_id,
            from = prev.as_deref().unwrap_or(""),
            to = new_id
        );
        self.active.insert(tree_id.to_string(), new_id.to_string());
        true
    }

    /// Run `action` with the active node of `tree_id` unmarked, and queue its re-mark.
    ///
    /// The re-mark happens in [`Registry::run_deferred`]. If a re-mark for the same tree is
    /// already queued, the node is not unmarked again and no second re-mark is queued.
    pub fn run_preserving_focus<H, F>(&mut self, host: &mut H, tree_id: &str, action: F)
    where
        H: NavHost + ?Sized,
        F: FnOnce(&mut H),
    {
        if !self.has_pending_for(tree_id) {
            let id = self.active.get(tree_id).cloned();
            if let Some(id) = id.as_deref()
                && host.resolve(id).is_some()
            {
                host.unmark_active(id);
            }
            self.pending.push(Remark {
                tree_id: tree_id.to_string(),
                id,
            });
        }
        action(host);
    }

    /// Returns true if any re-mark is waiting for [`Registry::run_deferred`].
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Flush queued re-marks. Returns the number of nodes marked.
    ///
    /// Each recorded id is resolved again. A live node is marked, recorded as active, and
    /// its tree's host regains focus. An id that no longer resolves is removed from the map
    /// and reported; nothing is marked for it.
    pub fn run_deferred<H: NavHost + ?Sized>(&mut self, host: &mut H) -> usize {
        let mut marked = 0;
        for Remark { tree_id, id } in core::mem::take(&mut self.pending) {
            let Some(id) = id else {
                host.focus_host(&tree_id);
                continue;
            };
            if host.resolve(&id).is_none() {
                if self.active.get(&tree_id) == Some(&id) {
                    self.active.remove(&tree_id);
                }
                report(host, Anomaly::StaleReference { tree_id, id });
                continue;
            }
            host.mark_active(&id);
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "tree_nav.remark", tree_id = %tree_id, id = %id);
            host.focus_host(&tree_id);
            self.active.insert(tree_id, id);
            marked += 1;
        }
        marked
    }

    /// Forget a deleted tree: drop its entry and any queued re-mark.
    ///
    /// Returns the id that was active, if any.
    pub fn forget_tree(&mut self, tree_id: &str) -> Option<String> {
        self.cancel_pending(tree_id);
        self.active.remove(tree_id)
    }

    fn has_pending_for(&self, tree_id: &str) -> bool {
        self.pending.iter().any(|r| r.tree_id == tree_id)
    }

    fn cancel_pending(&mut self, tree_id: &str) -> bool {
        let before = self.pending.len();
        self.pending.retain(|r| r.tree_id != tree_id);
        self.pending.len() != before
    }
}
