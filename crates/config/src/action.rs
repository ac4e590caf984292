//! Action model collaborator.
//!
//! Each `<action>` child of an `<item>` is handed to an [`ActionParser`]. The
//! parser decides what the action means; the builder only collects the
//! results in document order.

use tracing::{info, warn};
use wmenu_registry::MenuAction;

use crate::document::DocumentNode;

/// Turns `<action>` nodes into executable actions.
pub trait ActionParser {
	/// Parses one `<action>` node. `None` drops the action from the item.
	fn parse(&mut self, node: &DocumentNode) -> Option<Box<dyn MenuAction>>;
}

impl<F> ActionParser for F
where
	F: FnMut(&DocumentNode) -> Option<Box<dyn MenuAction>>,
{
	fn parse(&mut self, node: &DocumentNode) -> Option<Box<dyn MenuAction>> {
		self(node)
	}
}

/// Action recorded by name with its options, as written in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedAction {
	name: String,
	options: Vec<(String, String)>,
}

impl NamedAction {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			options: Vec::new(),
		}
	}

	pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.options.push((key.into(), value.into()));
		self
	}

	/// Child element name and text pairs, in document order.
	pub fn options(&self) -> &[(String, String)] {
		&self.options
	}

	/// Text of the first option named `key`.
	pub fn option(&self, key: &str) -> Option<&str> {
		self.options.iter().find(|(k, _)| k.eq_ignore_ascii_case(key)).map(|(_, v)| v.as_str())
	}
}

impl MenuAction for NamedAction {
	fn name(&self) -> &str {
		&self.name
	}

	fn run(&self) {
		info!(action = %self.name, options = ?self.options, "menu action triggered");
	}
}

/// Default parser producing [`NamedAction`]s.
///
/// `<action name="Execute"><execute>xterm</execute></action>` becomes an
/// action named `Execute` with the single option `("execute", "xterm")`.
/// Actions without a `name` attribute are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct NamedActionParser;

impl ActionParser for NamedActionParser {
	fn parse(&mut self, node: &DocumentNode) -> Option<Box<dyn MenuAction>> {
		let Some(name) = node.attr("name") else {
			warn!("action node is missing its name attribute; skipping");
			return None;
		};
		let action = node
			.children()
			.iter()
			.fold(NamedAction::new(name), |action, child| action.with_option(child.name(), child.text()));
		Some(Box::new(action))
	}
}
