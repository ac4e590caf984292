//! Menu document loading and registry construction.
//!
//! A menu document is an XML tree rooted at `<openbox_menu>`:
//!
//! ```xml
//! <openbox_menu>
//!   <menu id="root" label="Root">
//!     <item label="Terminal"><action name="Execute"><execute>xterm</execute></action></item>
//!     <separator/>
//!     <menu id="apps" label="Applications"/>
//!   </menu>
//! </openbox_menu>
//! ```
//!
//! [`load`] picks the first candidate file that parses, [`document`] turns it
//! into a node tree and [`build`] replays the tree into a
//! [`MenuRegistry`](wmenu_registry::MenuRegistry).

pub mod action;
pub mod build;
pub mod document;
pub mod load;
pub mod plugin;

pub use action::{ActionParser, NamedAction, NamedActionParser};
pub use build::{BuildReport, BuildWarning, MenuBuilder};
pub use document::{Document, DocumentError, DocumentNode, ROOT_ELEMENT};
pub use load::{CONFIG_DIR_ENV, LoadReport, MENU_FILE_NAME, MenuParseReport, MenuPaths, SYSTEM_MENU_PATH, load_menu_document, parse_menus};
pub use plugin::{MenuPluginDef, MenuPlugins, NoPlugins, PluginError, StaticPlugins, open_menu_plugin};
