//! Runtime menu registry for the window manager.
//!
//! The registry owns every named [`Menu`]. Menus are filled with [`MenuEntry`]
//! rows through the registry's `add_*` operations and handed to a display layer
//! through the [`MenuDisplay`] bridge.
//!
//! # Modules
//!
//! - [`entry`] - Entry model (normal items, submenu links, separators)
//! - [`menu`] - Menu objects and owner callbacks
//! - [`registry`] - Name to menu mapping and every mutation on it
//! - [`bridge`] - Presentation bridge implemented by the display layer
//!
//! # Threading
//!
//! Everything here runs on the display event loop thread. Owner data is
//! reference counted with [`std::rc::Rc`] and no operation takes a lock.

pub mod action;
pub mod bridge;
pub mod entry;
pub mod error;
pub mod menu;
pub mod registry;

pub use action::MenuAction;
pub use bridge::{MenuDisplay, NullDisplay};
pub use entry::{EntryKind, EntryType, MenuEntry, NormalEntry, SubmenuLink};
pub use error::MenuError;
pub use menu::{DestroyFn, ExecuteFn, Menu, MenuSerial, OwnerData, UpdateFn};
pub use registry::MenuRegistry;
