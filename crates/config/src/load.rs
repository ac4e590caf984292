//! Menu document discovery and loading.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use wmenu_registry::MenuRegistry;

use crate::action::ActionParser;
use crate::build::{BuildReport, MenuBuilder};
use crate::document::{Document, DocumentError, ROOT_ELEMENT};
use crate::plugin::MenuPlugins;

/// File name looked up inside configuration directories.
pub const MENU_FILE_NAME: &str = "menu.xml";

/// Overrides the user configuration directory.
pub const CONFIG_DIR_ENV: &str = "WMENU_CONFIG_DIR";

/// Menu document installed for every user.
pub const SYSTEM_MENU_PATH: &str = "/etc/xdg/wmenu/menu.xml";

/// Candidate menu document paths, in the order they are tried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuPaths {
	/// Explicitly configured document.
	pub configured: Option<PathBuf>,
	/// Document in the user's configuration directory.
	pub user: Option<PathBuf>,
	/// System-wide default document.
	pub system: PathBuf,
}

impl MenuPaths {
	/// Resolves candidates from the environment.
	pub fn resolve(configured: Option<PathBuf>) -> Self {
		Self {
			configured,
			user: user_menu_path_with(std::env::var_os(CONFIG_DIR_ENV), dirs::config_dir()),
			system: PathBuf::from(SYSTEM_MENU_PATH),
		}
	}

	/// Tries `path` and nothing else.
	pub fn only(path: impl Into<PathBuf>) -> Self {
		let path = path.into();
		Self {
			configured: None,
			user: None,
			system: path,
		}
	}

	pub fn candidates(&self) -> impl Iterator<Item = &Path> {
		self.configured.as_deref().into_iter().chain(self.user.as_deref()).chain(std::iter::once(self.system.as_path()))
	}
}

/// User menu document path.
///
/// `override_dir` (the value of [`CONFIG_DIR_ENV`]) wins over the platform
/// configuration directory. Empty values are ignored.
pub fn user_menu_path_with(override_dir: Option<OsString>, config_dir: Option<PathBuf>) -> Option<PathBuf> {
	override_dir
		.filter(|dir| !dir.is_empty())
		.map(PathBuf::from)
		.or_else(|| config_dir.map(|dir| dir.join("wmenu")))
		.map(|dir| dir.join(MENU_FILE_NAME))
}

/// Result of trying every candidate document.
#[derive(Debug, Default)]
pub struct LoadReport {
	/// First document that parsed, if any.
	pub document: Option<Document>,
	/// Candidates that failed before it, keyed by path.
	pub errors: Vec<(PathBuf, DocumentError)>,
}

/// Loads the first candidate that parses.
///
/// Each failed candidate is logged and recorded. Running out of candidates is
/// not an error: the report simply carries no document.
pub fn load_menu_document(paths: &MenuPaths) -> LoadReport {
	let mut report = LoadReport::default();
	for path in paths.candidates() {
		match Document::load(path, ROOT_ELEMENT) {
			Ok(document) => {
				info!(path = %path.display(), "loaded menu document");
				report.document = Some(document);
				break;
			}
			Err(error) => {
				warn!(path = %path.display(), %error, "failed to load menu document");
				report.errors.push((path.to_path_buf(), error));
			}
		}
	}
	if report.document.is_none() {
		warn!("no menu document could be loaded; continuing without menus");
	}
	report
}

/// Result of [`parse_menus`].
#[derive(Debug, Default)]
pub struct MenuParseReport {
	/// Path of the document that was built, if any.
	pub source: Option<PathBuf>,
	/// Candidates that failed to load.
	pub load_errors: Vec<(PathBuf, DocumentError)>,
	/// What the build did with the loaded document.
	pub build: BuildReport,
}

/// Loads the menu document and builds its menus into `registry`.
pub fn parse_menus(registry: &mut MenuRegistry, paths: &MenuPaths, actions: &mut dyn ActionParser, plugins: &mut dyn MenuPlugins) -> MenuParseReport {
	let LoadReport { document, errors } = load_menu_document(paths);
	let Some(document) = document else {
		return MenuParseReport {
			load_errors: errors,
			..MenuParseReport::default()
		};
	};

	let build = MenuBuilder::new(registry, actions, plugins).build(&document);
	debug!(menus = registry.len(), "menus parsed");
	MenuParseReport {
		source: document.path().map(Path::to_path_buf),
		load_errors: errors,
		build,
	}
}
