// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: node kinds, the tree model and host traits, key events, commands, and anomalies.
//!
//! ## Overview
//!
//! [`TreeModel`] is the read-only view of a tree that the [`traverse`](crate::traverse)
//! functions walk. [`NavHost`] extends it with the side effects the
//! [`Registry`](crate::registry::Registry) and [`Navigator`](crate::navigator::Navigator)
//! need: marking the active node, moving real focus, and activating controls.

use alloc::string::String;

/// Kind of an interactive leaf.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ControlKind {
    /// Button-like control. Activated by a click.
    Button,
    /// Input-like control. Activated by moving real focus into it.
    Input,
}

/// Classification of a tree node for traversal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    /// A node that can be the active descendant.
    Container,
    /// A structural node; skipped by traversal but descended into.
    Wrapper,
    /// An interactive leaf; never entered, may be activated.
    Control(ControlKind),
}

impl NodeKind {
    /// Returns true for [`NodeKind::Container`].
    #[inline]
    pub fn is_container(self) -> bool {
        matches!(self, Self::Container)
    }

    /// Returns true for [`NodeKind::Control`].
    #[inline]
    pub fn is_control(self) -> bool {
        matches!(self, Self::Control(_))
    }
}

/// Read-only view of a tree.
///
/// Handles are opaque and may be invalidated by structural edits made between calls.
/// Implementations resolve string ids to live handles with [`TreeModel::resolve`]; a node
/// that was removed and re-added must resolve to its new handle.
pub trait TreeModel {
    /// Opaque node handle.
    type Node: Copy + Eq + core::fmt::Debug;

    /// Returns the live node carrying `id`, if any.
    fn resolve(&self, id: &str) -> Option<Self::Node>;
    /// Returns the string id of a node.
    fn id_of(&self, node: Self::Node) -> Option<&str>;
    /// Returns the parent of `node`, or `None` for a root.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;
    /// Returns the ordered children of `node`.
    fn children(&self, node: Self::Node) -> &[Self::Node];
    /// Returns the traversal kind of `node`.
    fn kind(&self, node: Self::Node) -> NodeKind;
}

/// Side effects requested by the navigation core.
///
/// All ids passed here have been resolved against the model in the same turn, except
/// for [`NavHost::focus_host`], which takes a tree or region id.
pub trait NavHost: TreeModel {
    /// Apply the active-descendant marking to the node with `id`.
    fn mark_active(&mut self, id: &str);
    /// Clear the active-descendant marking from the node with `id`.
    fn unmark_active(&mut self, id: &str);
    /// Move real input focus to the element with `id` (a tree host or a region).
    fn focus_host(&mut self, id: &str);
    /// Click or focus the control with `id`.
    ///
    /// Returns `false` if the control refused activation (for example because it is
    /// disabled). For an [`ControlKind::Input`], `true` means real focus moved into it.
    fn activate_control(&mut self, id: &str, kind: ControlKind) -> bool;
    /// Receive a recovered anomaly. The default implementation ignores it.
    fn report(&mut self, anomaly: &Anomaly) {
        let _ = anomaly;
    }
}

/// Logical key of a [`KeyEvent`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// Activation key.
    Enter,
    /// Region cycling key.
    Tab,
    /// Left arrow.
    ArrowLeft,
    /// Up arrow.
    ArrowUp,
    /// Right arrow.
    ArrowRight,
    /// Down arrow.
    ArrowDown,
    /// Any other key, carrying its platform key code.
    Other(u32),
}

bitflags::bitflags! {
    /// Modifier keys held during a [`KeyEvent`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT   = 0b0000_0001;
        /// Control.
        const CONTROL = 0b0000_0010;
        /// Alt / Option.
        const ALT     = 0b0000_0100;
        /// Meta / Command.
        const META    = 0b0000_1000;
    }
}

/// A key press delivered to a tree or a region.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct KeyEvent {
    /// Pressed key.
    pub key: Key,
    /// Held modifiers.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press with no modifiers.
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// A key press with modifiers.
    pub const fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Build an event from a legacy DOM `keyCode` and shift state.
    pub fn from_key_code(code: u32, shift: bool) -> Self {
        let key = match code {
            13 => Key::Enter,
            9 => Key::Tab,
            37 => Key::ArrowLeft,
            38 => Key::ArrowUp,
            39 => Key::ArrowRight,
            40 => Key::ArrowDown,
            other => Key::Other(other),
        };
        let mut modifiers = Modifiers::empty();
        modifiers.set(Modifiers::SHIFT, shift);
        Self { key, modifiers }
    }

    /// Returns true if shift is held.
    #[inline]
    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// A navigation command resolved from a key event.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Command {
    /// Move to the first container below the active node.
    EnterChild,
    /// Move to the nearest container above the active node.
    MoveUpLevel,
    /// Move to the previous container at the same level.
    MoveToPreviousSibling,
    /// Move to the next container at the same level.
    MoveToNextSibling,
    /// Move real focus to the next region.
    MoveToNextRegion,
    /// Move real focus to the previous region.
    MoveToPreviousRegion,
    /// Click or focus the single control inside the active node.
    ActivateControl,
}

impl Command {
    /// Map a key event to a command. Unbound keys return `None`.
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        Some(match event.key {
            Key::Enter => Self::ActivateControl,
            Key::Tab if event.shift() => Self::MoveToPreviousRegion,
            Key::Tab => Self::MoveToNextRegion,
            Key::ArrowLeft => Self::MoveUpLevel,
            Key::ArrowUp => Self::MoveToPreviousSibling,
            Key::ArrowRight => Self::EnterChild,
            Key::ArrowDown => Self::MoveToNextSibling,
            Key::Other(_) => return None,
        })
    }

    /// Returns true for the four arrow-key moves.
    pub fn is_directional(self) -> bool {
        matches!(
            self,
            Self::EnterChild
                | Self::MoveUpLevel
                | Self::MoveToPreviousSibling
                | Self::MoveToNextSibling
        )
    }
}

/// What the UI layer should do with the original event after handling.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Let default behavior and propagation proceed.
    Continue,
    /// Prevent default behavior and stop propagation.
    StopAndConsume,
}

/// A recovered, non-fatal condition observed while handling input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Anomaly {
    /// A recorded active id no longer resolves in the tree.
    StaleReference {
        /// Tree whose entry is stale.
        tree_id: String,
        /// The id that failed to resolve.
        id: String,
    },
    /// Activation was requested on a node whose children do not identify a single control.
    StructuralAmbiguity {
        /// The active node.
        id: String,
        /// Number of children found.
        children: usize,
    },
    /// A region id is not part of the region list.
    UnknownRegion {
        /// The unknown id.
        id: String,
    },
}

impl core::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::StaleReference { tree_id, id } => {
                write!(f, "active descendant `{id}` of tree `{tree_id}` no longer exists")
            }
            Self::StructuralAmbiguity { id, children } => {
                write!(f, "cannot activate `{id}`: expected one control child, found {children} children")
            }
            Self::UnknownRegion { id } => write!(f, "`{id}` is not a known region"),
        }
    }
}

impl core::error::Error for Anomaly {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn key_codes_map_to_keys() {
        assert_eq!(KeyEvent::from_key_code(13, false).key, Key::Enter);
        assert_eq!(KeyEvent::from_key_code(9, false).key, Key::Tab);
        assert_eq!(KeyEvent::from_key_code(37, false).key, Key::ArrowLeft);
        assert_eq!(KeyEvent::from_key_code(38, false).key, Key::ArrowUp);
        assert_eq!(KeyEvent::from_key_code(39, false).key, Key::ArrowRight);
        assert_eq!(KeyEvent::from_key_code(40, false).key, Key::ArrowDown);
        assert_eq!(KeyEvent::from_key_code(65, false).key, Key::Other(65));
        assert!(KeyEvent::from_key_code(9, true).shift());
    }

    #[test]
    fn commands_from_keys() {
        let cmd = |key| Command::from_key_event(&KeyEvent::new(key));
        assert_eq!(cmd(Key::Enter), Some(Command::ActivateControl));
        assert_eq!(cmd(Key::Tab), Some(Command::MoveToNextRegion));
        assert_eq!(cmd(Key::ArrowLeft), Some(Command::MoveUpLevel));
        assert_eq!(cmd(Key::ArrowUp), Some(Command::MoveToPreviousSibling));
        assert_eq!(cmd(Key::ArrowRight), Some(Command::EnterChild));
        assert_eq!(cmd(Key::ArrowDown), Some(Command::MoveToNextSibling));
        assert_eq!(cmd(Key::Other(27)), None);
        assert_eq!(
            Command::from_key_event(&KeyEvent::with_modifiers(Key::Tab, Modifiers::SHIFT)),
            Some(Command::MoveToPreviousRegion)
        );
    }

    #[test]
    fn shift_only_changes_tab() {
        let shifted = KeyEvent::with_modifiers(Key::ArrowDown, Modifiers::SHIFT);
        assert_eq!(
            Command::from_key_event(&shifted),
            Some(Command::MoveToNextSibling)
        );
        assert!(Command::MoveToNextSibling.is_directional());
        assert!(!Command::MoveToNextRegion.is_directional());
        assert!(!Command::ActivateControl.is_directional());
    }

    #[test]
    fn anomaly_display() {
        let a = Anomaly::UnknownRegion {
            id: "ghost".to_string(),
        };
        assert_eq!(a.to_string(), "`ghost` is not a known region");
        let b = Anomaly::StructuralAmbiguity {
            id: "blk".to_string(),
            children: 3,
        };
        assert!(b.to_string().contains("found 3 children"));
    }
}
