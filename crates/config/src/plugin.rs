//! Extension collaborator.
//!
//! A `<menu id=".." plugin="..">` node asks a plugin for a menu instead of
//! declaring it inline. Opening and starting the plugin must register a menu
//! under the requested id as a side effect; if it does not, the violation is
//! reported and the menu is treated as missing from then on.

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use thiserror::Error;
use tracing::{debug, warn};
use wmenu_registry::MenuRegistry;

/// Errors raised while asking a plugin for a menu.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluginError {
	/// No plugin mechanism is configured.
	#[error("plugin support is unavailable (requested '{0}')")]
	Unavailable(String),

	/// No plugin with this identifier is known.
	#[error("unknown plugin '{0}'")]
	Unknown(String),

	/// The plugin loaded but did not register the menu it was asked for.
	#[error("plugin '{plugin}' did not provide the menu '{menu}'")]
	MissingMenu {
		/// Plugin identifier.
		plugin: String,
		/// Menu id that was requested.
		menu: String,
	},
}

/// Source of menus provided by plugins.
pub trait MenuPlugins {
	/// Loads the plugin named `plugin`.
	fn open(&mut self, plugin: &str) -> Result<(), PluginError>;

	/// Starts a plugin previously opened. This is where menus get registered.
	fn start(&mut self, plugin: &str, registry: &mut MenuRegistry);
}

/// Refuses every plugin.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPlugins;

impl MenuPlugins for NoPlugins {
	fn open(&mut self, plugin: &str) -> Result<(), PluginError> {
		Err(PluginError::Unavailable(plugin.to_owned()))
	}

	fn start(&mut self, _plugin: &str, _registry: &mut MenuRegistry) {}
}

/// A plugin compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct MenuPluginDef {
	/// Identifier used in `plugin="..."`.
	pub name: &'static str,
	/// Registers the plugin's menus.
	pub register: fn(&mut MenuRegistry),
}

impl MenuPluginDef {
	pub const fn new(name: &'static str, register: fn(&mut MenuRegistry)) -> Self {
		Self { name, register }
	}
}

/// Table of compiled-in plugins.
///
/// A plugin is started at most once; later requests find whatever it
/// registered the first time.
#[derive(Debug, Default)]
pub struct StaticPlugins {
	defs: HashMap<&'static str, MenuPluginDef>,
	started: HashSet<&'static str>,
}

impl StaticPlugins {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a plugin, replacing any earlier one with the same name.
	pub fn with(mut self, def: MenuPluginDef) -> Self {
		self.register(def);
		self
	}

	pub fn register(&mut self, def: MenuPluginDef) {
		if self.defs.insert(def.name, def).is_some() {
			debug!(plugin = def.name, "replaced menu plugin definition");
		}
	}

	pub fn is_started(&self, plugin: &str) -> bool {
		self.started.contains(plugin)
	}
}

impl MenuPlugins for StaticPlugins {
	fn open(&mut self, plugin: &str) -> Result<(), PluginError> {
		if self.defs.contains_key(plugin) {
			Ok(())
		} else {
			Err(PluginError::Unknown(plugin.to_owned()))
		}
	}

	fn start(&mut self, plugin: &str, registry: &mut MenuRegistry) {
		let Some(def) = self.defs.get(plugin).copied() else {
			return;
		};
		if self.started.insert(def.name) {
			debug!(plugin = def.name, "starting menu plugin");
			(def.register)(registry);
		}
	}
}

/// Asks `plugin` to provide the menu `name`.
///
/// Succeeds only if the menu is registered once the plugin has started.
pub fn open_menu_plugin(plugins: &mut dyn MenuPlugins, registry: &mut MenuRegistry, name: &str, plugin: &str) -> Result<(), PluginError> {
	plugins.open(plugin)?;
	plugins.start(plugin, registry);
	if registry.contains(name) {
		Ok(())
	} else {
		warn!(plugin, menu = name, "plugin did not provide the requested menu");
		Err(PluginError::MissingMenu {
			plugin: plugin.to_owned(),
			menu: name.to_owned(),
		})
	}
}
