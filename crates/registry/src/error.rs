/// Errors reported by registry operations.
///
/// None of these are fatal. The registry leaves its state unchanged when it
/// returns one, and the not-found case is also logged at the lookup site.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
	/// A menu with this name is already registered.
	#[error("menu '{0}' already exists")]
	Duplicate(String),

	/// No menu with this name is registered.
	#[error("menu '{0}' does not exist")]
	NotFound(String),

	/// A submenu link points at a name that was freed and registered again.
	#[error("submenu link to '{0}' refers to a menu that has since been replaced")]
	StaleSubmenu(String),

	/// An entry index past the end of the menu.
	#[error("menu '{menu}' has no entry at index {index} (it has {len})")]
	EntryOutOfRange {
		/// Menu that was addressed.
		menu: String,
		/// Requested index.
		index: usize,
		/// Number of entries in the menu.
		len: usize,
	},
}
