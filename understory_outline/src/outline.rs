// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core outline implementation: structure, label index, updates, and queries.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::types::{NodeFlags, NodeId, OutlineNode, Role};

impl Default for Outline {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered outline tree.
pub struct Outline {
    slots: Vec<Option<Slot>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    labels: BTreeMap<String, Vec<NodeId>>, // live holders per label, oldest first
}

impl core::fmt::Debug for Outline {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.slots.len();
        let alive = self.slots.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Outline")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("labels", &self.labels.len())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: OutlineNode,
}

impl Outline {
    /// Create a new empty outline.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            labels: BTreeMap::new(),
        }
    }

    /// Append a new node as the last child of `parent` (or as a root if `None`).
    ///
    /// A stale `parent` is treated like `None`: the node becomes a root.
    /// If other live nodes already carry the same label, lookups by label resolve to the
    /// newest one; removing it makes the next newest surviving holder visible again.
    pub fn insert(&mut self, parent: Option<NodeId>, node: OutlineNode) -> NodeId {
        let id = self.alloc(node);
        if let Some(p) = parent.filter(|p| self.is_alive(*p)) {
            let at = self.slot(p).map_or(0, |s| s.children.len());
            self.link_parent(id, p, at);
        }
        id
    }

    /// Insert a new node under `parent` at child position `index`.
    ///
    /// `index` is clamped to the current child count. Returns `None` if `parent` is stale.
    pub fn insert_at(&mut self, parent: NodeId, index: usize, node: OutlineNode) -> Option<NodeId> {
        let len = self.slot(parent)?.children.len();
        let id = self.alloc(node);
        self.link_parent(id, parent, index.min(len));
        Some(id)
    }

    /// Remove a node and its subtree.
    pub fn remove(&mut self, id: NodeId) {
        let Some(slot) = self.slot(id) else {
            return;
        };
        if let Some(parent) = slot.parent {
            self.unlink_parent(id, parent);
        }
        let children = self.slot(id).map(|s| s.children.clone()).unwrap_or_default();
        for child in children {
            self.remove(child);
        }
        if let Some(slot) = self.slots[id.idx()].take() {
            self.unlink_label(&slot.data.label, id);
        }
        self.free_list.push(id.idx());
    }

    /// Move `id` under `new_parent` at child position `index` (clamped).
    ///
    /// Does nothing if either handle is stale or if `new_parent` lies inside `id`'s subtree.
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId, index: usize) {
        if !self.is_alive(id) || !self.is_alive(new_parent) {
            return;
        }
        if self.ancestors(new_parent).any(|a| a == id) || new_parent == id {
            return;
        }
        if let Some(parent) = self.parent(id) {
            self.unlink_parent(id, parent);
        }
        let len = self.children(new_parent).len();
        self.link_parent(id, new_parent, index.min(len));
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.slot(id).is_some()
    }

    /// Find the newest live node carrying `label`.
    pub fn find(&self, label: &str) -> Option<NodeId> {
        self.labels.get(label)?.last().copied()
    }

    /// Label of a live node.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.slot(id).map(|s| s.data.label.as_str())
    }

    /// Role of a live node.
    pub fn role(&self, id: NodeId) -> Option<Role> {
        self.slot(id).map(|s| s.data.role)
    }

    /// Flags of a live node.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.slot(id).map(|s| s.data.flags)
    }

    /// Replace the flags of a live node.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(s) = self.slot_mut(id) {
            s.data.flags = flags;
        }
    }

    /// Insert or remove `flag` on a live node.
    pub fn set_flag(&mut self, id: NodeId, flag: NodeFlags, on: bool) {
        if let Some(s) = self.slot_mut(id) {
            s.data.flags.set(flag, on);
        }
    }

    /// Parent of a live node, or `None` for roots and stale handles.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id)?.parent
    }

    /// Ordered children of a live node. Empty for stale handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.slot(id).map_or(&[], |s| s.children.as_slice())
    }

    /// Position of `id` among its parent's children.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    /// Iterate ancestors of `id`, nearest first (excluding `id`).
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        core::iter::successors(self.parent(id), move |n| self.parent(*n))
    }

    /// Live roots, in slot order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| match s {
            Some(s) if s.parent.is_none() => {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "NodeId uses 32-bit indices by design."
                )]
                Some(NodeId::new(i as u32, s.generation))
            }
            _ => None,
        })
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Returns true if the outline has no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // --- internals ---

    fn alloc(&mut self, node: OutlineNode) -> NodeId {
        let label = node.label.clone();
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(Slot::new(generation, node));
            (idx, generation)
        } else {
            self.slots.push(Some(Slot::new(1, node)));
            self.generations.push(1);
            (self.slots.len() - 1, 1)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let id = NodeId::new(idx as u32, generation);
        self.labels.entry(label).or_default().push(id);
        id
    }

    fn unlink_label(&mut self, label: &str, id: NodeId) {
        if let Some(holders) = self.labels.get_mut(label) {
            holders.retain(|h| *h != id);
            if holders.is_empty() {
                self.labels.remove(label);
            }
        }
    }

    fn slot(&self, id: NodeId) -> Option<&Slot> {
        self.slots
            .get(id.idx())?
            .as_ref()
            .filter(|s| s.generation == id.generation())
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.idx())?
            .as_mut()
            .filter(|s| s.generation == id.generation())
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId, at: usize) {
        if let Some(p) = self.slot_mut(parent) {
            p.children.insert(at, id);
        }
        if let Some(n) = self.slot_mut(id) {
            n.parent = Some(parent);
        }
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.slot_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.slot_mut(id) {
            n.parent = None;
        }
    }
}

impl Slot {
    fn new(generation: u32, data: OutlineNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            data,
        }
    }
}
