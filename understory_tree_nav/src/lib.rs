// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tree_nav --heading-base-level=0

//! Understory Tree Nav: deterministic, `no_std` keyboard navigation for nested-list trees.
//!
//! ## Overview
//!
//! Accessible tree widgets keep real input focus on a single host element per tree and
//! track the logically focused node (the *active descendant*) separately, announcing it
//! through a marking such as `aria-selected`.
//! This crate is the state core of that model. It does not render, query a DOM, or bind
//! events. It reads a tree through [`TreeModel`](crate::types::TreeModel) and asks a
//! [`NavHost`](crate::types::NavHost) to apply side effects.
//!
//! ## Parts
//!
//! - [`traverse`]: pure functions computing the next container to move to.
//!   Containers can be active; wrappers are transparent; controls are leaves.
//! - [`registry`]: per-tree active descendant, marking, and the deferred re-mark used to
//!   survive structural edits.
//! - [`regions`]: top-level focus regions (toolbox, toolbar buttons, workspace trees) in
//!   page order, Tab routing, and the focus successor when a region is deleted.
//! - [`navigator`]: maps key events to [`Command`](crate::types::Command)s and ties the
//!   other parts together, including the one-event focus-escape flag.
//!
//! ## Workflow
//!
//! 1) Implement [`NavHost`](crate::types::NavHost) for your toolkit, or enable
//!    `outline_adapter` and use `adapters::outline::OutlineHost`.
//! 2) Build a [`Navigator`](crate::navigator::Navigator) for the page, add regions as they
//!    appear, and set an initial active descendant per tree.
//! 3) Route key events for trees to [`Navigator::on_keypress`](crate::navigator::Navigator::on_keypress)
//!    and for toolbar buttons to [`Navigator::on_region_keypress`](crate::navigator::Navigator::on_region_keypress).
//!    Honor the returned [`Outcome`](crate::types::Outcome).
//! 4) Wrap structural edits in [`Navigator::run_preserving_focus`](crate::navigator::Navigator::run_preserving_focus)
//!    and call [`Navigator::run_deferred`](crate::navigator::Navigator::run_deferred) on the next
//!    turn of your event loop.
//!
//! ## Anomalies
//!
//! Stale active ids, ambiguous activations, and unknown regions are recovered locally and
//! passed to [`NavHost::report`](crate::types::NavHost::report). With the `tracing` feature
//! they are also logged at `warn` level, and active-descendant changes at `debug` level.
//!
//! ## Features
//!
//! - `std`: forwards `std` to optional dependencies.
//! - `tracing`: structured logging through `tracing`.
//! - `outline_adapter`: [`TreeModel`](crate::types::TreeModel) and a host for Understory Outline.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod navigator;
pub mod regions;
pub mod registry;
pub mod traverse;
pub mod types;

#[cfg(test)]
mod testing;

use types::{Anomaly, NavHost};

/// Hand an anomaly to the host and, with `tracing`, log it.
pub(crate) fn report<H: NavHost + ?Sized>(host: &mut H, anomaly: Anomaly) {
    #[cfg(feature = "tracing")]
    tracing::warn!(message = "tree_nav.anomaly", %anomaly);
    host.report(&anomaly);
}
