//! Replays a menu document into a registry.
//!
//! # Role
//!
//! [`MenuBuilder`] walks the document depth first. The names of the menus
//! currently being declared are threaded through the walk as an explicit
//! stack: `item` and `separator` nodes go to the top menu, and a nested
//! `menu` node is linked from the top menu as a submenu.
//!
//! # Invariants
//!
//! - A malformed node is skipped on its own; the walk continues with its
//!   siblings.
//! - A nested `menu` node whose id is already registered is linked without
//!   being redeclared. Its label and children are ignored.
//! - `item` and `separator` nodes outside any menu do nothing.

use tracing::{debug, trace, warn};
use wmenu_registry::{MenuAction, MenuError, MenuRegistry};

use crate::action::ActionParser;
use crate::document::{Document, DocumentNode};
use crate::plugin::{MenuPlugins, PluginError, open_menu_plugin};

/// Something the builder skipped or could not do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
	/// A node lacked a required attribute and was skipped.
	MissingAttribute {
		/// Node name (`menu` or `item`).
		node: &'static str,
		/// Missing attribute.
		attribute: &'static str,
	},
	/// A registry call failed.
	Registry(MenuError),
	/// A plugin could not provide its menu.
	Plugin(PluginError),
}

impl std::fmt::Display for BuildWarning {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::MissingAttribute { node, attribute } => write!(f, "<{node}> without '{attribute}' attribute was skipped"),
			Self::Registry(error) => write!(f, "{error}"),
			Self::Plugin(error) => write!(f, "{error}"),
		}
	}
}

/// Outcome of one build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
	/// Menus declared by the document, in declaration order.
	pub created: Vec<String>,
	/// Non-fatal problems, in document order.
	pub warnings: Vec<BuildWarning>,
}

impl BuildReport {
	pub fn is_clean(&self) -> bool {
		self.warnings.is_empty()
	}
}

/// Drives registry calls from a document tree.
pub struct MenuBuilder<'a> {
	registry: &'a mut MenuRegistry,
	actions: &'a mut dyn ActionParser,
	plugins: &'a mut dyn MenuPlugins,
	report: BuildReport,
}

impl<'a> MenuBuilder<'a> {
	pub fn new(registry: &'a mut MenuRegistry, actions: &'a mut dyn ActionParser, plugins: &'a mut dyn MenuPlugins) -> Self {
		Self {
			registry,
			actions,
			plugins,
			report: BuildReport::default(),
		}
	}

	/// Builds every top-level node under the document root.
	pub fn build(self, document: &Document) -> BuildReport {
		self.build_nodes(document.root().children())
	}

	/// Builds a sequence of sibling nodes with no menu open.
	pub fn build_nodes(mut self, nodes: &[DocumentNode]) -> BuildReport {
		let mut open = Vec::new();
		self.walk(nodes, &mut open);
		debug_assert!(open.is_empty());
		debug!(created = self.report.created.len(), warnings = self.report.warnings.len(), "menu document built");
		self.report
	}

	fn walk(&mut self, nodes: &[DocumentNode], open: &mut Vec<String>) {
		for node in nodes {
			if node.is("menu") {
				self.menu(node, open);
			} else if node.is("item") {
				self.item(node, open);
			} else if node.is("separator") {
				self.separator(open);
			} else {
				trace!(node = node.name(), "ignoring unknown node");
			}
		}
	}

	fn menu(&mut self, node: &DocumentNode, open: &mut Vec<String>) {
		let Some(name) = node.attr("id") else {
			self.skip("menu", "id");
			return;
		};

		if self.registry.contains(name) {
			debug!(menu = name, "menu already registered; linking existing menu");
		} else if let Some(plugin) = node.attr("plugin") {
			if let Err(error) = open_menu_plugin(self.plugins, self.registry, name, plugin) {
				self.report.warnings.push(BuildWarning::Plugin(error));
			}
		} else {
			let Some(title) = node.attr("label") else {
				self.skip("menu", "label");
				return;
			};
			match self.registry.new_menu(name, title, None) {
				Ok(_) => {
					self.report.created.push(name.to_owned());
					open.push(name.to_owned());
					self.walk(node.children(), open);
					open.pop();
				}
				Err(error) => self.report.warnings.push(BuildWarning::Registry(error)),
			}
		}

		if let Some(parent) = open.last() {
			let result = self.registry.add_submenu(parent, 0, name);
			self.record(result);
		}
	}

	fn item(&mut self, node: &DocumentNode, open: &[String]) {
		let Some(parent) = open.last() else {
			return;
		};
		let Some(label) = node.attr("label") else {
			self.skip("item", "label");
			return;
		};

		let actions: Vec<Box<dyn MenuAction>> = node.children_named("action").filter_map(|child| self.actions.parse(child)).collect();
		let result = self.registry.add_normal(parent, 0, label, actions);
		self.record(result);
	}

	fn separator(&mut self, open: &[String]) {
		if let Some(parent) = open.last() {
			let result = self.registry.add_separator(parent, 0);
			self.record(result);
		}
	}

	fn skip(&mut self, node: &'static str, attribute: &'static str) {
		warn!(node, attribute, "menu document node is missing a required attribute; skipping");
		self.report.warnings.push(BuildWarning::MissingAttribute { node, attribute });
	}

	fn record(&mut self, result: Result<(), MenuError>) {
		if let Err(error) = result {
			self.report.warnings.push(BuildWarning::Registry(error));
		}
	}
}
