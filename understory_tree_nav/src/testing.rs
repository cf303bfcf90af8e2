// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test fixture: an arena tree that records every side effect.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::types::{Anomaly, ControlKind, NavHost, NodeKind, TreeModel};

#[derive(Debug)]
struct FixtureNode {
    id: String,
    kind: NodeKind,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Arena tree whose handles are never reused, so a re-added node always gets a new handle.
#[derive(Debug, Default)]
pub(crate) struct Fixture {
    nodes: Vec<Option<FixtureNode>>,
    pub(crate) marks: BTreeMap<String, u32>,
    pub(crate) unmarks: BTreeMap<String, u32>,
    pub(crate) marked: Vec<String>,
    pub(crate) focused: Vec<String>,
    pub(crate) activated: Vec<(String, ControlKind)>,
    pub(crate) anomalies: Vec<Anomaly>,
    /// When set, every control refuses activation.
    pub(crate) refuse_activation: bool,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn root(&mut self, id: &str, kind: NodeKind) -> usize {
        self.push(id, kind, None)
    }

    pub(crate) fn add(&mut self, parent: usize, id: &str, kind: NodeKind) -> usize {
        let n = self.push(id, kind, Some(parent));
        if let Some(p) = self.nodes[parent].as_mut() {
            p.children.push(n);
        }
        n
    }

    pub(crate) fn insert_at(&mut self, parent: usize, at: usize, id: &str, kind: NodeKind) -> usize {
        let n = self.push(id, kind, Some(parent));
        if let Some(p) = self.nodes[parent].as_mut() {
            p.children.insert(at, n);
        }
        n
    }

    pub(crate) fn remove(&mut self, node: usize) {
        let Some(n) = self.nodes[node].take() else {
            return;
        };
        if let Some(p) = n.parent.and_then(|p| self.nodes[p].as_mut()) {
            p.children.retain(|c| *c != node);
        }
        for c in n.children {
            self.remove(c);
        }
    }

    /// Live handle for `id`; panics when absent.
    pub(crate) fn node(&self, id: &str) -> usize {
        self.resolve(id).unwrap_or_else(|| panic!("no live node `{id}`"))
    }

    pub(crate) fn mark_count(&self, id: &str) -> u32 {
        self.marks.get(id).copied().unwrap_or(0)
    }

    pub(crate) fn unmark_count(&self, id: &str) -> u32 {
        self.unmarks.get(id).copied().unwrap_or(0)
    }

    pub(crate) fn is_marked(&self, id: &str) -> bool {
        self.marked.iter().any(|m| m == id)
    }

    pub(crate) fn last_focus(&self) -> Option<&str> {
        self.focused.last().map(String::as_str)
    }

    fn push(&mut self, id: &str, kind: NodeKind, parent: Option<usize>) -> usize {
        self.nodes.push(Some(FixtureNode {
            id: id.to_string(),
            kind,
            parent,
            children: Vec::new(),
        }));
        self.nodes.len() - 1
    }

    fn get(&self, node: usize) -> Option<&FixtureNode> {
        self.nodes.get(node)?.as_ref()
    }
}

impl TreeModel for Fixture {
    type Node = usize;

    fn resolve(&self, id: &str) -> Option<usize> {
        self.nodes
            .iter()
            .rposition(|n| n.as_ref().is_some_and(|n| n.id == id))
    }

    fn id_of(&self, node: usize) -> Option<&str> {
        self.get(node).map(|n| n.id.as_str())
    }

    fn parent(&self, node: usize) -> Option<usize> {
        self.get(node)?.parent
    }

    fn children(&self, node: usize) -> &[usize] {
        self.get(node).map_or(&[], |n| n.children.as_slice())
    }

    fn kind(&self, node: usize) -> NodeKind {
        self.get(node).map_or(NodeKind::Wrapper, |n| n.kind)
    }
}

impl NavHost for Fixture {
    fn mark_active(&mut self, id: &str) {
        *self.marks.entry(id.to_string()).or_default() += 1;
        if !self.is_marked(id) {
            self.marked.push(id.to_string());
        }
    }

    fn unmark_active(&mut self, id: &str) {
        *self.unmarks.entry(id.to_string()).or_default() += 1;
        self.marked.retain(|m| m != id);
    }

    fn focus_host(&mut self, id: &str) {
        self.focused.push(id.to_string());
    }

    fn activate_control(&mut self, id: &str, kind: ControlKind) -> bool {
        if self.refuse_activation {
            return false;
        }
        self.activated.push((id.to_string(), kind));
        true
    }

    fn report(&mut self, anomaly: &Anomaly) {
        self.anomalies.push(anomaly.clone());
    }
}
