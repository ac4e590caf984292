//! Action handles carried by normal menu entries.

use std::fmt;

/// An executable action attached to a normal menu entry.
///
/// Actions are built by the action model outside this crate and handed to
/// [`MenuRegistry::add_normal`](crate::MenuRegistry::add_normal). From then on
/// the entry owns them and drops them, in order, when the entry is dropped.
pub trait MenuAction: fmt::Debug {
	/// Action name used in diagnostics.
	fn name(&self) -> &str;

	/// Runs the action.
	fn run(&self);
}
