//! Name to menu mapping.
//!
//! # Role
//!
//! [`MenuRegistry`] owns every menu. All creation, lookup, teardown and entry
//! mutation goes through it, keyed by menu name.
//!
//! # Invariants
//!
//! - A name maps to at most one menu. Registering a taken name fails without
//!   touching the existing menu.
//! - A submenu entry can only be added while its target is registered.
//! - Removing a menu always tears it down fully (see [`Menu`]'s drop order).
//! - Callers must not clear or free a menu while it is being displayed. This
//!   is not checked.

use rustc_hash::FxHashMap as HashMap;
use tracing::{debug, trace, warn};

use crate::action::MenuAction;
use crate::bridge::MenuDisplay;
use crate::entry::{EntryKind, MenuEntry, NormalEntry, SubmenuLink};
use crate::error::MenuError;
use crate::menu::{Menu, MenuSerial, OwnerData};

/// Owner of every registered menu.
#[derive(Debug)]
pub struct MenuRegistry {
	menus: HashMap<Box<str>, Menu>,
	next_serial: u64,
}

impl MenuRegistry {
	/// Creates an empty registry.
	pub fn startup() -> Self {
		Self {
			menus: HashMap::default(),
			next_serial: 1,
		}
	}

	/// Hides every displayed menu, then tears down every registered menu.
	///
	/// All destroy callbacks run before any menu's entries are dropped. The
	/// registry is empty afterwards and may be reused.
	pub fn shutdown<D: MenuDisplay>(&mut self, display: &mut D) {
		display.hide_all_frames();
		for menu in self.menus.values_mut() {
			menu.run_destroy();
		}
		let count = self.menus.len();
		self.menus.clear();
		debug!(menus = count, "menu registry shut down");
	}

	/// Registers a new menu under `name`.
	///
	/// `data` is stored as given; the owner keeps its own handle.
	pub fn new_menu(&mut self, name: &str, title: &str, data: Option<OwnerData>) -> Result<MenuSerial, MenuError> {
		if self.menus.contains_key(name) {
			debug!(menu = name, "menu already registered");
			return Err(MenuError::Duplicate(name.to_owned()));
		}

		let serial = MenuSerial::new(self.next_serial);
		self.next_serial += 1;
		self.menus.insert(name.into(), Menu::new(name, title, data, serial));
		trace!(menu = name, serial = serial.get(), "registered menu");
		Ok(serial)
	}

	/// Removes and tears down the menu named `name`.
	pub fn free(&mut self, name: &str) -> Result<(), MenuError> {
		self.lookup(name)?;
		// Dropping the menu runs its teardown.
		self.menus.remove(name);
		trace!(menu = name, "freed menu");
		Ok(())
	}

	/// Looks up a menu, logging a warning when it does not exist.
	pub fn lookup(&self, name: &str) -> Result<&Menu, MenuError> {
		self.menus.get(name).ok_or_else(|| not_found(name))
	}

	fn lookup_mut(&mut self, name: &str) -> Result<&mut Menu, MenuError> {
		self.menus.get_mut(name).ok_or_else(|| not_found(name))
	}

	/// Looks up a menu without logging.
	pub fn get(&self, name: &str) -> Option<&Menu> {
		self.menus.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.menus.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.menus.len()
	}

	pub fn is_empty(&self) -> bool {
		self.menus.is_empty()
	}

	/// Registered menu names, sorted.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.menus.keys().map(|name| &**name).collect();
		names.sort_unstable();
		names
	}

	/// Drops every entry of the named menu and returns how many were dropped.
	///
	/// Name, title and callbacks are kept.
	pub fn clear_entries(&mut self, name: &str) -> Result<usize, MenuError> {
		let menu = self.lookup_mut(name)?;
		Ok(menu.clear_entries())
	}

	/// Appends a normal entry. The entry takes ownership of `actions`.
	pub fn add_normal(&mut self, name: &str, id: i32, label: &str, actions: Vec<Box<dyn MenuAction>>) -> Result<(), MenuError> {
		let menu = self.lookup_mut(name)?;
		menu.push(MenuEntry::new(name, id, EntryKind::Normal(NormalEntry::new(label, actions))));
		Ok(())
	}

	/// Appends a link to the menu named `submenu`, which must already exist.
	pub fn add_submenu(&mut self, name: &str, id: i32, submenu: &str) -> Result<(), MenuError> {
		self.lookup(name)?;
		let serial = self.lookup(submenu)?.serial();
		let menu = self.lookup_mut(name)?;
		menu.push(MenuEntry::new(name, id, EntryKind::Submenu(SubmenuLink::new(submenu, serial))));
		Ok(())
	}

	pub fn add_separator(&mut self, name: &str, id: i32) -> Result<(), MenuError> {
		let menu = self.lookup_mut(name)?;
		menu.push(MenuEntry::new(name, id, EntryKind::Separator));
		Ok(())
	}

	/// Installs the update callback, replacing any previous one.
	pub fn set_update_func(&mut self, name: &str, func: impl FnMut(&mut MenuRegistry, &str) + 'static) -> Result<(), MenuError> {
		self.lookup_mut(name)?.update = Some(Box::new(func));
		Ok(())
	}

	/// Installs the execute callback, replacing any previous one.
	pub fn set_execute_func(&mut self, name: &str, func: impl FnMut(&MenuEntry, Option<&OwnerData>) + 'static) -> Result<(), MenuError> {
		self.lookup_mut(name)?.execute = Some(Box::new(func));
		Ok(())
	}

	/// Installs the destroy callback, replacing any previous one.
	pub fn set_destroy_func(&mut self, name: &str, func: impl FnOnce(&str, Option<OwnerData>) + 'static) -> Result<(), MenuError> {
		self.lookup_mut(name)?.set_destroy(Box::new(func));
		Ok(())
	}

	/// Enables or disables the first entry with `id`.
	///
	/// Returns `false` when no entry has that id or the entry is not a normal
	/// item.
	pub fn set_entry_enabled(&mut self, name: &str, id: i32, enabled: bool) -> Result<bool, MenuError> {
		let menu = self.lookup_mut(name)?;
		match menu.find_entry_id_mut(id).map(MenuEntry::kind_mut) {
			Some(EntryKind::Normal(normal)) => {
				normal.set_enabled(enabled);
				Ok(true)
			}
			Some(EntryKind::Submenu(_) | EntryKind::Separator) | None => Ok(false),
		}
	}

	/// Follows a submenu link.
	///
	/// Fails if the target was freed, or freed and registered again since the
	/// link was made.
	pub fn resolve_submenu(&self, link: &SubmenuLink) -> Result<&Menu, MenuError> {
		let menu = self.lookup(link.name())?;
		if menu.serial() != link.serial() {
			warn!(menu = link.name(), "submenu link outlived its target");
			return Err(MenuError::StaleSubmenu(link.name().to_owned()));
		}
		Ok(menu)
	}

	/// Runs the menu's update callback, if any.
	///
	/// The callback is detached while it runs and reattached afterwards,
	/// unless it installed a replacement or the menu it belongs to is gone.
	pub fn update(&mut self, name: &str) -> Result<(), MenuError> {
		let menu = self.lookup_mut(name)?;
		let serial = menu.serial();
		let Some(mut update) = menu.update.take() else {
			return Ok(());
		};

		trace!(menu = name, "running update callback");
		update(self, name);

		if let Some(menu) = self.menus.get_mut(name)
			&& menu.serial() == serial
			&& menu.update.is_none()
		{
			menu.update = Some(update);
		}
		Ok(())
	}

	/// Activates the entry at `index`.
	///
	/// Runs the execute callback when one is installed. Otherwise an enabled
	/// normal entry runs its actions in order and anything else does nothing.
	pub fn execute(&mut self, name: &str, index: usize) -> Result<(), MenuError> {
		let menu = self.lookup_mut(name)?;
		let Some(entry) = menu.entries.get(index) else {
			return Err(MenuError::EntryOutOfRange {
				menu: name.to_owned(),
				index,
				len: menu.entries.len(),
			});
		};

		match menu.execute.as_mut() {
			Some(execute) => execute(entry, menu.data.as_ref()),
			None => entry.activate(),
		}
		Ok(())
	}

	/// Shows the named menu at `(x, y)`.
	///
	/// The update callback runs first, then the display builds, positions and
	/// maps a frame for the menu.
	pub fn show<D: MenuDisplay>(&mut self, display: &mut D, name: &str, x: i32, y: i32, context: Option<&D::Context>) -> Result<(), MenuError> {
		self.update(name)?;
		let menu = self.lookup(name)?;

		let mut frame = display.create_frame(menu, context);
		display.move_frame(&mut frame, x, y);
		display.show_frame(frame, None);
		debug!(menu = name, x, y, "showing menu");
		Ok(())
	}
}

impl Default for MenuRegistry {
	fn default() -> Self {
		Self::startup()
	}
}

fn not_found(name: &str) -> MenuError {
	warn!(menu = name, "attempted to access menu but it does not exist");
	MenuError::NotFound(name.to_owned())
}
