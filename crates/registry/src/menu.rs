//! Menu objects and owner callbacks.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::entry::MenuEntry;
use crate::registry::MenuRegistry;

/// Opaque data supplied by whoever registered the menu.
///
/// The menu keeps a handle to it, the owner keeps the data itself. The
/// destroy callback receives the menu's handle back during teardown.
pub type OwnerData = Rc<dyn Any>;

/// Called before the menu is shown so the owner can rebuild its entries.
///
/// Receives the registry and the menu name. The callback is detached from the
/// menu while it runs, so it may freely mutate the registry.
pub type UpdateFn = Box<dyn FnMut(&mut MenuRegistry, &str)>;

/// Called when the user activates an entry.
pub type ExecuteFn = Box<dyn FnMut(&MenuEntry, Option<&OwnerData>)>;

/// Called exactly once when the menu is torn down, before its entries are dropped.
pub type DestroyFn = Box<dyn FnOnce(&str, Option<OwnerData>)>;

/// Registry-unique creation stamp of a menu.
///
/// Two menus registered under the same name at different times never share a
/// serial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MenuSerial(u64);

impl MenuSerial {
	pub(crate) const fn new(value: u64) -> Self {
		Self(value)
	}

	pub fn get(self) -> u64 {
		self.0
	}
}

/// A named, ordered collection of entries.
///
/// Menus are owned by the [`MenuRegistry`]. Dropping a menu runs its
/// teardown: the destroy callback first, then the entries, then the strings.
pub struct Menu {
	name: Box<str>,
	title: String,
	serial: MenuSerial,
	pub(crate) data: Option<OwnerData>,
	pub(crate) entries: Vec<MenuEntry>,
	pub(crate) update: Option<UpdateFn>,
	pub(crate) execute: Option<ExecuteFn>,
	destroy: Option<DestroyFn>,
}

impl Menu {
	pub(crate) fn new(name: &str, title: &str, data: Option<OwnerData>, serial: MenuSerial) -> Self {
		Self {
			name: name.into(),
			title: title.to_owned(),
			serial,
			data,
			entries: Vec::new(),
			update: None,
			execute: None,
			destroy: None,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Display title.
	pub fn title(&self) -> &str {
		&self.title
	}

	pub fn serial(&self) -> MenuSerial {
		self.serial
	}

	pub fn data(&self) -> Option<&OwnerData> {
		self.data.as_ref()
	}

	/// Entries in insertion order.
	pub fn entries(&self) -> &[MenuEntry] {
		&self.entries
	}

	/// Returns the first entry, in insertion order, whose id is `id`.
	pub fn find_entry_id(&self, id: i32) -> Option<&MenuEntry> {
		self.entries.iter().find(|entry| entry.id() == id)
	}

	pub(crate) fn find_entry_id_mut(&mut self, id: i32) -> Option<&mut MenuEntry> {
		self.entries.iter_mut().find(|entry| entry.id() == id)
	}

	pub fn has_update_func(&self) -> bool {
		self.update.is_some()
	}

	pub fn has_execute_func(&self) -> bool {
		self.execute.is_some()
	}

	pub fn has_destroy_func(&self) -> bool {
		self.destroy.is_some()
	}

	pub(crate) fn set_destroy(&mut self, destroy: DestroyFn) {
		self.destroy = Some(destroy);
	}

	pub(crate) fn push(&mut self, entry: MenuEntry) {
		self.entries.push(entry);
	}

	/// Drops every entry and returns how many there were.
	pub(crate) fn clear_entries(&mut self) -> usize {
		let count = self.entries.len();
		self.entries.clear();
		count
	}

	/// Hands the owner data back through the destroy callback, once.
	pub(crate) fn run_destroy(&mut self) {
		if let Some(destroy) = self.destroy.take() {
			trace!(menu = %self.name, "running destroy callback");
			destroy(&self.name, self.data.take());
		}
	}
}

impl Drop for Menu {
	fn drop(&mut self) {
		self.run_destroy();
		self.clear_entries();
	}
}

impl fmt::Debug for Menu {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Menu")
			.field("name", &self.name)
			.field("title", &self.title)
			.field("serial", &self.serial)
			.field("has_data", &self.data.is_some())
			.field("entries", &self.entries)
			.field("update", &self.update.is_some())
			.field("execute", &self.execute.is_some())
			.field("destroy", &self.destroy.is_some())
			.finish()
	}
}
