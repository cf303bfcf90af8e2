// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for Understory Outline.
//!
//! ## Feature
//!
//! Enable with `outline_adapter`.
//!
//! ## Notes
//!
//! [`Outline`] implements [`TreeModel`] directly: items are containers, groups are wrappers,
//! buttons and fields are controls. Labels are the string ids.
//!
//! [`OutlineHost`] wraps an outline and implements [`NavHost`] headlessly: the marking is
//! the [`NodeFlags::ACTIVE`] flag, and real focus and activations are recorded so a caller
//! (or a test) can apply them to a toolkit later. Disabled controls are not activated.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use understory_outline::{NodeFlags, NodeId, Outline, Role};

use crate::types::{Anomaly, ControlKind, NavHost, NodeKind, TreeModel};

/// Map an outline role to a traversal kind.
pub fn kind_of_role(role: Role) -> NodeKind {
    match role {
        Role::Item => NodeKind::Container,
        Role::Group => NodeKind::Wrapper,
        Role::Button => NodeKind::Control(ControlKind::Button),
        Role::Field => NodeKind::Control(ControlKind::Input),
    }
}

impl TreeModel for Outline {
    type Node = NodeId;

    fn resolve(&self, id: &str) -> Option<NodeId> {
        self.find(id)
    }

    fn id_of(&self, node: NodeId) -> Option<&str> {
        self.label(node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Self::parent(self, node)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        Self::children(self, node)
    }

    fn kind(&self, node: NodeId) -> NodeKind {
        // Stale handles have no children and no parent, so treating them as wrappers
        // makes every traversal from them come back empty.
        self.role(node).map_or(NodeKind::Wrapper, kind_of_role)
    }
}

/// A headless [`NavHost`] over an [`Outline`].
#[derive(Debug, Default)]
pub struct OutlineHost {
    /// The tree. Structural edits go through this field.
    pub outline: Outline,
    focused: Option<String>,
    activations: Vec<(String, ControlKind)>,
    anomalies: Vec<Anomaly>,
}

impl OutlineHost {
    /// Wrap an outline.
    pub fn new(outline: Outline) -> Self {
        Self {
            outline,
            ..Default::default()
        }
    }

    /// Id of the element that last received real focus.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Labels of nodes currently carrying [`NodeFlags::ACTIVE`].
    pub fn marked(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.outline.roots().collect();
        stack.reverse();
        while let Some(n) = stack.pop() {
            if self
                .outline
                .flags(n)
                .is_some_and(|f| f.contains(NodeFlags::ACTIVE))
                && let Some(label) = self.outline.label(n)
            {
                out.push(label);
            }
            stack.extend(self.outline.children(n).iter().rev());
        }
        out
    }

    /// Drain recorded activations, oldest first.
    pub fn take_activations(&mut self) -> Vec<(String, ControlKind)> {
        core::mem::take(&mut self.activations)
    }

    /// Drain reported anomalies, oldest first.
    pub fn take_anomalies(&mut self) -> Vec<Anomaly> {
        core::mem::take(&mut self.anomalies)
    }

    fn set_marked(&mut self, id: &str, on: bool) {
        if let Some(n) = self.outline.find(id) {
            self.outline.set_flag(n, NodeFlags::ACTIVE, on);
        }
    }
}

impl TreeModel for OutlineHost {
    type Node = NodeId;

    fn resolve(&self, id: &str) -> Option<NodeId> {
        self.outline.resolve(id)
    }

    fn id_of(&self, node: NodeId) -> Option<&str> {
        self.outline.id_of(node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.outline.parent(node)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.outline.children(node)
    }

    fn kind(&self, node: NodeId) -> NodeKind {
        TreeModel::kind(&self.outline, node)
    }
}

impl NavHost for OutlineHost {
    fn mark_active(&mut self, id: &str) {
        self.set_marked(id, true);
    }

    fn unmark_active(&mut self, id: &str) {
        self.set_marked(id, false);
    }

    fn focus_host(&mut self, id: &str) {
        self.focused = Some(id.to_string());
    }

    fn activate_control(&mut self, id: &str, kind: ControlKind) -> bool {
        let disabled = self
            .outline
            .find(id)
            .and_then(|n| self.outline.flags(n))
            .is_some_and(|f| f.contains(NodeFlags::DISABLED));
        if disabled {
            return false;
        }
        if kind == ControlKind::Input {
            self.focused = Some(id.to_string());
        }
        self.activations.push((id.to_string(), kind));
        true
    }

    fn report(&mut self, anomaly: &Anomaly) {
        self.anomalies.push(anomaly.clone());
    }
}
