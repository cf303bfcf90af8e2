// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the outline: node identifiers, roles, flags, and node data.

use alloc::string::String;

/// Identifier for a node in the outline.
///
/// A slot index plus a generation counter. The handle stays valid until the node is
/// removed; a reused slot gets a higher generation, so a stale `NodeId` never aliases a
/// different live node.
///
/// Use [`Outline::is_alive`](crate::Outline::is_alive) to check liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// What a node is within a nested-list widget.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Role {
    /// A list item. Items can hold the active-descendant marking.
    Item,
    /// A structural group (a list, a row wrapper). Groups are never marked.
    Group,
    /// A button inside an item; activated by clicking.
    Button,
    /// A text field inside an item; activated by focusing.
    Field,
}

bitflags::bitflags! {
    /// Per-node state flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node carries the active-descendant marking (`aria-selected`).
        const ACTIVE = 0b0000_0001;
        /// Node is disabled and should not be activated.
        const DISABLED = 0b0000_0010;
    }
}

/// Data for a single outline node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutlineNode {
    /// Unique string id used for lookups.
    pub label: String,
    /// Structural role.
    pub role: Role,
    /// State flags.
    pub flags: NodeFlags,
}

impl OutlineNode {
    /// Create a node with the given label and role and empty flags.
    pub fn new(label: impl Into<String>, role: Role) -> Self {
        Self {
            label: label.into(),
            role,
            flags: NodeFlags::empty(),
        }
    }

    /// Shorthand for a [`Role::Item`] node.
    pub fn item(label: impl Into<String>) -> Self {
        Self::new(label, Role::Item)
    }

    /// Shorthand for a [`Role::Group`] node.
    pub fn group(label: impl Into<String>) -> Self {
        Self::new(label, Role::Group)
    }

    /// Shorthand for a [`Role::Button`] node.
    pub fn button(label: impl Into<String>) -> Self {
        Self::new(label, Role::Button)
    }

    /// Shorthand for a [`Role::Field`] node.
    pub fn field(label: impl Into<String>) -> Self {
        Self::new(label, Role::Field)
    }
}
