// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard command interpreter.
//!
//! ## Overview
//!
//! [`Navigator`] owns the [`Registry`] and the [`Regions`] list for a page and turns key
//! events into navigation. Construct one when the page is set up and pass it to every
//! call site that handles tree or region keys; drop it with the page.
//!
//! ## Keys
//!
//! | Key | In a tree | On a region |
//! |---|---|---|
//! | Enter | activate the single control of the active node | ignored |
//! | Tab / Shift-Tab | next / previous region | next / previous region |
//! | Left | [`parent_container`] | ignored |
//! | Up | [`previous_sibling`] | ignored |
//! | Right | [`first_descendant`] | ignored |
//! | Down | [`next_sibling`] | ignored |
//!
//! Tab and the arrows always return [`Outcome::StopAndConsume`]; everything else returns
//! [`Outcome::Continue`] so the toolkit keeps its default handling.
//!
//! ## Focus escape
//!
//! Activating an input-like control moves real focus into it. The navigator remembers
//! this for exactly one following tree key event: if that event is an arrow key, focus
//! returns to the tree host before the move is applied. The flag is cleared at the end of
//! every tree key event, whatever the key.
//!
//! ## Event loop
//!
//! [`Navigator::run_preserving_focus`] queues work that must run on a later turn of the
//! host's event loop. Call [`Navigator::run_deferred`] from that turn, for example from a
//! zero-delay task scheduled whenever [`Navigator::has_pending`] is true.

use alloc::string::{String, ToString};

use crate::registry::Registry;
use crate::regions::{Region, Regions};
use crate::report;
use crate::traverse::{first_descendant, next_sibling, parent_container, previous_sibling};
use crate::types::{Anomaly, Command, ControlKind, KeyEvent, NavHost, NodeKind, Outcome};

/// Page-wide navigation state.
#[derive(Clone, Debug)]
pub struct Navigator {
    registry: Registry,
    regions: Regions,
    focus_escaped: bool,
}

impl Navigator {
    /// Create a navigator whose region list holds only the toolbox.
    pub fn new(toolbox_id: impl Into<String>) -> Self {
        Self::with_regions(Regions::new(toolbox_id))
    }

    /// Create a navigator over an existing region list.
    pub fn with_regions(regions: Regions) -> Self {
        Self {
            registry: Registry::new(),
            regions,
            focus_escaped: false,
        }
    }

    /// The active-descendant registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The region list.
    pub fn regions(&self) -> &Regions {
        &self.regions
    }

    /// Mutable access to the region list, for adding regions as they appear.
    pub fn regions_mut(&mut self) -> &mut Regions {
        &mut self.regions
    }

    /// Returns true between activating an input control and the next tree key event.
    pub fn is_focus_escaped(&self) -> bool {
        self.focus_escaped
    }

    /// Active id of `tree_id`, or `""`.
    pub fn active_descendant(&self, tree_id: &str) -> &str {
        self.registry.active(tree_id)
    }

    /// See [`Registry::set_active`].
    pub fn set_active_descendant<H: NavHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: &str,
        tree_id: &str,
    ) -> bool {
        self.registry.set_active(host, id, tree_id)
    }

    /// See [`Registry::run_preserving_focus`].
    pub fn run_preserving_focus<H, F>(&mut self, host: &mut H, tree_id: &str, action: F)
    where
        H: NavHost + ?Sized,
        F: FnOnce(&mut H),
    {
        self.registry.run_preserving_focus(host, tree_id, action);
    }

    /// Returns true if [`Navigator::run_deferred`] has work.
    pub fn has_pending(&self) -> bool {
        self.registry.has_pending()
    }

    /// See [`Registry::run_deferred`].
    pub fn run_deferred<H: NavHost + ?Sized>(&mut self, host: &mut H) -> usize {
        self.registry.run_deferred(host)
    }

    /// Handle a region being deleted and return the region that should receive focus.
    ///
    /// The successor is chosen from the list as it was before the deletion. The region is
    /// then removed and its active-descendant entry, if any, is forgotten. An unknown id is
    /// reported and answered with the toolbox.
    pub fn region_deleted<H: NavHost + ?Sized>(&mut self, host: &mut H, region_id: &str) -> Region {
        if !self.regions.contains(region_id) {
            report(
                host,
                Anomaly::UnknownRegion {
                    id: region_id.to_string(),
                },
            );
        }
        let successor = self.regions.successor_after_deletion(region_id).clone();
        if self.regions.remove(region_id).is_some() {
            self.registry.forget_tree(region_id);
        }
        successor
    }

    /// Handle a key event delivered to the tree `tree_id`.
    pub fn on_keypress<H: NavHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &KeyEvent,
        tree_id: &str,
    ) -> Outcome {
        let was_escaped = core::mem::take(&mut self.focus_escaped);

        let active_id = self.registry.active(tree_id);
        let Some(active) = host.resolve(active_id) else {
            if !active_id.is_empty() {
                let anomaly = Anomaly::StaleReference {
                    tree_id: tree_id.to_string(),
                    id: active_id.to_string(),
                };
                report(host, anomaly);
            }
            return Outcome::Continue;
        };

        let Some(command) = Command::from_key_event(event) else {
            return Outcome::Continue;
        };
        match command {
            Command::ActivateControl => {
                self.focus_escaped = self.activate(host, active);
                Outcome::Continue
            }
            Command::MoveToNextRegion | Command::MoveToPreviousRegion => {
                self.cycle_region(host, tree_id, command)
            }
            Command::MoveUpLevel
            | Command::MoveToPreviousSibling
            | Command::EnterChild
            | Command::MoveToNextSibling => {
                if was_escaped {
                    host.focus_host(tree_id);
                }
                let target = match command {
                    Command::MoveUpLevel => parent_container(&*host, active),
                    Command::MoveToPreviousSibling => previous_sibling(&*host, active),
                    Command::EnterChild => first_descendant(&*host, active),
                    _ => next_sibling(&*host, active),
                };
                if let Some(id) = target.and_then(|t| host.id_of(t)).map(ToString::to_string) {
                    self.registry.set_active(host, &id, tree_id);
                }
                Outcome::StopAndConsume
            }
        }
    }

    /// Handle a key event delivered to a non-tree region (a toolbar button).
    pub fn on_region_keypress<H: NavHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &KeyEvent,
        region_id: &str,
    ) -> Outcome {
        match Command::from_key_event(event) {
            Some(command @ (Command::MoveToNextRegion | Command::MoveToPreviousRegion)) => {
                self.cycle_region(host, region_id, command)
            }
            _ => Outcome::Continue,
        }
    }

    fn cycle_region<H: NavHost + ?Sized>(
        &self,
        host: &mut H,
        from: &str,
        command: Command,
    ) -> Outcome {
        if !self.regions.contains(from) {
            report(
                host,
                Anomaly::UnknownRegion {
                    id: from.to_string(),
                },
            );
        } else if command == Command::MoveToNextRegion {
            self.regions.focus_next_region(host, from);
        } else {
            self.regions.focus_previous_region(host, from);
        }
        Outcome::StopAndConsume
    }

    /// Activate the only child of `active` if it is a control. Returns true when real focus
    /// moved into an input, which a refused activation never does.
    fn activate<H: NavHost + ?Sized>(&self, host: &mut H, active: H::Node) -> bool {
        let children = host.children(active);
        match (children.first().copied(), children.len()) {
            (Some(child), 1) => {
                let NodeKind::Control(kind) = host.kind(child) else {
                    return false;
                };
                let Some(id) = host.id_of(child).map(ToString::to_string) else {
                    return false;
                };
                host.activate_control(&id, kind) && kind == ControlKind::Input
            }
            (_, 0) => false,
            (_, count) => {
                let id = host.id_of(active).unwrap_or_default().to_string();
                report(host, Anomaly::StructuralAmbiguity { id, children: count });
                false
            }
        }
    }
}
