// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Top-level focus regions and Tab routing between them.
//!
//! ## Order
//!
//! The region list is fixed in page order: the toolbox first, then toolbar buttons in the
//! order they were added, then workspace trees in the order they were added. Removing a
//! region keeps the order of the survivors.
//!
//! ## Deletion
//!
//! When a region is deleted, focus moves to a neighbour chosen by [`DeletionPolicy`]
//! (the following region by default, else the preceding one). When neither exists the
//! toolbox is used, so there is always somewhere for focus to land.

use alloc::string::String;
use alloc::vec::Vec;

use crate::types::NavHost;

/// What a region is.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RegionKind {
    /// The single toolbox tree.
    Toolbox,
    /// A workspace toolbar button.
    ToolbarButton,
    /// A workspace tree.
    WorkspaceTree,
}

/// A top-level focusable region.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Region {
    /// Element id; also the tree id for tree regions.
    pub id: String,
    /// Region kind.
    pub kind: RegionKind,
}

impl Region {
    fn new(id: impl Into<String>, kind: RegionKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

/// Which neighbour receives focus when a region is deleted.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DeletionPolicy {
    /// Prefer the following region, then the preceding one.
    #[default]
    NextThenPrevious,
    /// Prefer the preceding region, then the following one.
    PreviousThenNext,
}

/// Ordered list of focus regions.
#[derive(Clone, Debug)]
pub struct Regions {
    toolbox: Region,
    buttons: Vec<Region>,
    trees: Vec<Region>,
    deletion_policy: DeletionPolicy,
}

impl Regions {
    /// Create a region list holding only the toolbox.
    pub fn new(toolbox_id: impl Into<String>) -> Self {
        Self {
            toolbox: Region::new(toolbox_id, RegionKind::Toolbox),
            buttons: Vec::new(),
            trees: Vec::new(),
            deletion_policy: DeletionPolicy::default(),
        }
    }

    /// Set the successor policy used by [`Regions::find_successor`].
    pub fn set_deletion_policy(&mut self, policy: DeletionPolicy) {
        self.deletion_policy = policy;
    }

    /// The toolbox region.
    pub fn toolbox(&self) -> &Region {
        &self.toolbox
    }

    /// Append a toolbar button. Returns `false` if the id is already present.
    pub fn add_toolbar_button(&mut self, id: impl Into<String>) -> bool {
        let region = Region::new(id, RegionKind::ToolbarButton);
        if self.contains(&region.id) {
            return false;
        }
        self.buttons.push(region);
        true
    }

    /// Append a workspace tree. Returns `false` if the id is already present.
    pub fn add_workspace_tree(&mut self, id: impl Into<String>) -> bool {
        let region = Region::new(id, RegionKind::WorkspaceTree);
        if self.contains(&region.id) {
            return false;
        }
        self.trees.push(region);
        true
    }

    /// Iterate regions in page order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> + '_ {
        core::iter::once(&self.toolbox)
            .chain(self.buttons.iter())
            .chain(self.trees.iter())
    }

    /// Number of regions, toolbox included.
    pub fn len(&self) -> usize {
        1 + self.buttons.len() + self.trees.len()
    }

    /// Always false: the toolbox is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns true if `id` names a region.
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Look up a region by id.
    pub fn get(&self, id: &str) -> Option<&Region> {
        self.iter().find(|r| r.id == id)
    }

    /// Returns true if `id` names a workspace tree.
    pub fn is_top_level_workspace_tree(&self, id: &str) -> bool {
        self.trees.iter().any(|r| r.id == id)
    }

    /// Region after `id`, without wraparound.
    pub fn next_region(&self, id: &str) -> Option<&Region> {
        let i = self.position(id)?;
        self.iter().nth(i + 1)
    }

    /// Region before `id`, without wraparound.
    pub fn previous_region(&self, id: &str) -> Option<&Region> {
        let i = self.position(id)?.checked_sub(1)?;
        self.iter().nth(i)
    }

    /// Move real focus to `id` itself. Returns `false` for an unknown id.
    pub fn focus_region<H: NavHost + ?Sized>(&self, host: &mut H, id: &str) -> bool {
        let Some(region) = self.get(id) else {
            return false;
        };
        host.focus_host(&region.id);
        true
    }

    /// Move real focus to the region after `id`.
    ///
    /// Returns `false` if `id` is the last region or unknown.
    pub fn focus_next_region<H: NavHost + ?Sized>(&self, host: &mut H, id: &str) -> bool {
        let Some(next) = self.next_region(id) else {
            return false;
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "tree_nav.region", from = id, to = next.id.as_str());
        host.focus_host(&next.id);
        true
    }

    /// Move real focus to the region before `id`.
    ///
    /// Returns `false` if `id` is the first region or unknown.
    pub fn focus_previous_region<H: NavHost + ?Sized>(&self, host: &mut H, id: &str) -> bool {
        let Some(prev) = self.previous_region(id) else {
            return false;
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "tree_nav.region", from = id, to = prev.id.as_str());
        host.focus_host(&prev.id);
        true
    }

    /// Neighbour that should receive focus once `id` is deleted.
    ///
    /// Returns `None` if `id` is unknown or has no neighbour.
    pub fn find_successor(&self, id: &str) -> Option<&Region> {
        match self.deletion_policy {
            DeletionPolicy::NextThenPrevious => self
                .next_region(id)
                .or_else(|| self.previous_region(id)),
            DeletionPolicy::PreviousThenNext => self
                .previous_region(id)
                .or_else(|| self.next_region(id)),
        }
    }

    /// Like [`Regions::find_successor`], falling back to the toolbox.
    pub fn successor_after_deletion(&self, id: &str) -> &Region {
        self.find_successor(id).unwrap_or(&self.toolbox)
    }

    /// Remove a toolbar button or workspace tree. The toolbox is never removed.
    pub fn remove(&mut self, id: &str) -> Option<Region> {
        if let Some(i) = self.buttons.iter().position(|r| r.id == id) {
            return Some(self.buttons.remove(i));
        }
        let i = self.trees.iter().position(|r| r.id == id)?;
        Some(self.trees.remove(i))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.iter().position(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    fn ids(regions: &Regions) -> Vec<&str> {
        regions.iter().map(|r| r.id.as_str()).collect()
    }

    fn page() -> Regions {
        let mut r = Regions::new("toolbox");
        r.add_workspace_tree("ws-1");
        r.add_toolbar_button("btn-1");
        r.add_workspace_tree("ws-2");
        r.add_toolbar_button("btn-2");
        r
    }

    #[test]
    fn page_order_groups_kinds() {
        let r = page();
        assert_eq!(ids(&r), ["toolbox", "btn-1", "btn-2", "ws-1", "ws-2"]);
        assert_eq!(r.len(), 5);
        assert!(r.is_top_level_workspace_tree("ws-2"));
        assert!(!r.is_top_level_workspace_tree("btn-1"));
        assert!(!r.is_top_level_workspace_tree("toolbox"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut r = page();
        assert!(!r.add_workspace_tree("btn-1"));
        assert!(!r.add_toolbar_button("toolbox"));
        assert_eq!(r.len(), 5);
    }

    #[test]
    fn next_and_previous_do_not_wrap() {
        let r = page();
        assert_eq!(r.next_region("toolbox").map(|r| r.id.as_str()), Some("btn-1"));
        assert_eq!(r.next_region("btn-2").map(|r| r.id.as_str()), Some("ws-1"));
        assert!(r.next_region("ws-2").is_none());
        assert!(r.previous_region("toolbox").is_none());
        assert_eq!(r.previous_region("ws-1").map(|r| r.id.as_str()), Some("btn-2"));
        assert!(r.next_region("ghost").is_none());
    }

    #[test]
    fn focus_moves_call_host() {
        let r = page();
        let mut f = Fixture::new();
        assert!(r.focus_next_region(&mut f, "btn-1"));
        assert!(r.focus_previous_region(&mut f, "btn-1"));
        assert!(!r.focus_next_region(&mut f, "ws-2"));
        assert!(!r.focus_previous_region(&mut f, "toolbox"));
        assert!(r.focus_region(&mut f, "ws-1"));
        assert!(!r.focus_region(&mut f, "ghost"));
        assert_eq!(f.focused, ["btn-2", "toolbox", "ws-1"]);
    }

    #[test]
    fn deleting_only_tree_prefers_button() {
        let mut r = Regions::new("toolbox");
        r.add_toolbar_button("btn");
        r.add_workspace_tree("ws");
        assert_eq!(r.successor_after_deletion("ws").id, "btn");
        assert_eq!(r.remove("ws").map(|r| r.kind), Some(RegionKind::WorkspaceTree));
        assert_eq!(ids(&r), ["toolbox", "btn"]);
    }

    #[test]
    fn deletion_prefers_successor_then_predecessor() {
        let r = page();
        assert_eq!(r.successor_after_deletion("ws-1").id, "ws-2");
        assert_eq!(r.successor_after_deletion("ws-2").id, "ws-1");
        assert_eq!(r.successor_after_deletion("toolbox").id, "btn-1");
    }

    #[test]
    fn deletion_policy_can_prefer_predecessor() {
        let mut r = page();
        r.set_deletion_policy(DeletionPolicy::PreviousThenNext);
        assert_eq!(r.successor_after_deletion("ws-1").id, "btn-2");
        assert_eq!(r.successor_after_deletion("toolbox").id, "btn-1");
    }

    #[test]
    fn unknown_or_lonely_falls_back_to_toolbox() {
        let r = Regions::new("toolbox");
        assert!(r.find_successor("ghost").is_none());
        assert_eq!(r.successor_after_deletion("ghost").id, "toolbox");
        assert!(r.find_successor("toolbox").is_none());
        assert_eq!(r.successor_after_deletion("toolbox").id, "toolbox");
    }

    #[test]
    fn toolbox_is_never_removed() {
        let mut r = page();
        assert!(r.remove("toolbox").is_none());
        assert!(r.remove("ghost").is_none());
        assert_eq!(r.remove("btn-1").map(|r| r.kind), Some(RegionKind::ToolbarButton));
        assert_eq!(ids(&r), ["toolbox", "btn-2", "ws-1", "ws-2"]);
    }
}
