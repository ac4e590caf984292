//! Menu entry model.
//!
//! An entry is one row of a menu: a selectable item with actions, a link to
//! another menu, or a separator. The payload is an [`EntryKind`] so every
//! consumer has to handle all three shapes.

use std::fmt;

use tracing::trace;

use crate::action::MenuAction;
use crate::menu::MenuSerial;

/// Discriminant of an [`EntryKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
	Normal,
	Submenu,
	Separator,
}

impl fmt::Display for EntryType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Normal => write!(f, "normal"),
			Self::Submenu => write!(f, "submenu"),
			Self::Separator => write!(f, "separator"),
		}
	}
}

/// A selectable item.
pub struct NormalEntry {
	label: String,
	actions: Vec<Box<dyn MenuAction>>,
	enabled: bool,
}

impl NormalEntry {
	/// Creates an enabled item that takes ownership of `actions`.
	pub fn new(label: impl Into<String>, actions: Vec<Box<dyn MenuAction>>) -> Self {
		Self {
			label: label.into(),
			actions,
			enabled: true,
		}
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn actions(&self) -> &[Box<dyn MenuAction>] {
		&self.actions
	}

	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	pub(crate) fn set_enabled(&mut self, enabled: bool) {
		self.enabled = enabled;
	}
}

impl fmt::Debug for NormalEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NormalEntry")
			.field("label", &self.label)
			.field("actions", &self.actions.iter().map(|a| a.name()).collect::<Vec<_>>())
			.field("enabled", &self.enabled)
			.finish()
	}
}

/// Non-owning link to another registered menu.
///
/// The link is resolved by name through the registry each time it is
/// followed. The serial pins the exact menu that existed when the link was
/// made, so a freed and re-registered name is detected instead of followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmenuLink {
	name: Box<str>,
	serial: MenuSerial,
}

impl SubmenuLink {
	pub(crate) fn new(name: &str, serial: MenuSerial) -> Self {
		Self { name: name.into(), serial }
	}

	/// Name of the linked menu.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Serial of the linked menu at link time.
	pub fn serial(&self) -> MenuSerial {
		self.serial
	}
}

/// Payload of a menu entry.
#[derive(Debug)]
pub enum EntryKind {
	Normal(NormalEntry),
	Submenu(SubmenuLink),
	Separator,
}

impl EntryKind {
	pub fn entry_type(&self) -> EntryType {
		match self {
			Self::Normal(_) => EntryType::Normal,
			Self::Submenu(_) => EntryType::Submenu,
			Self::Separator => EntryType::Separator,
		}
	}
}

/// One row of a menu.
#[derive(Debug)]
pub struct MenuEntry {
	id: i32,
	menu: Box<str>,
	kind: EntryKind,
}

impl MenuEntry {
	/// Creates an entry belonging to the menu named `menu`.
	///
	/// Entries are only ever created by the registry's `add_*` operations,
	/// which append them in the same step.
	pub(crate) fn new(menu: &str, id: i32, kind: EntryKind) -> Self {
		Self {
			id,
			menu: menu.into(),
			kind,
		}
	}

	/// Caller-assigned id. Not unique; defaults to 0.
	pub fn id(&self) -> i32 {
		self.id
	}

	/// Name of the menu this entry belongs to.
	pub fn menu(&self) -> &str {
		&self.menu
	}

	pub fn kind(&self) -> &EntryKind {
		&self.kind
	}

	pub fn entry_type(&self) -> EntryType {
		self.kind.entry_type()
	}

	pub fn as_normal(&self) -> Option<&NormalEntry> {
		match &self.kind {
			EntryKind::Normal(normal) => Some(normal),
			EntryKind::Submenu(_) | EntryKind::Separator => None,
		}
	}

	pub fn as_submenu(&self) -> Option<&SubmenuLink> {
		match &self.kind {
			EntryKind::Submenu(link) => Some(link),
			EntryKind::Normal(_) | EntryKind::Separator => None,
		}
	}

	pub(crate) fn kind_mut(&mut self) -> &mut EntryKind {
		&mut self.kind
	}

	/// Default activation used when the menu has no execute callback.
	///
	/// Runs the actions of an enabled normal entry in order. Everything else
	/// is inert.
	pub(crate) fn activate(&self) {
		match &self.kind {
			EntryKind::Normal(normal) if normal.enabled => {
				for action in &normal.actions {
					trace!(menu = %self.menu, action = action.name(), "running entry action");
					action.run();
				}
			}
			EntryKind::Normal(normal) => {
				trace!(menu = %self.menu, label = %normal.label, "ignoring disabled entry");
			}
			EntryKind::Submenu(_) | EntryKind::Separator => {}
		}
	}
}
