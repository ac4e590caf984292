use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wmenu_config::{MenuPaths, MenuPluginDef, NamedActionParser, StaticPlugins, parse_menus};
use wmenu_registry::{EntryType, MenuRegistry, NullDisplay};

const MENU_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<openbox_menu>
	<menu id="root" label="Root">
		<item label="Open"><action name="Execute"/></item>
		<separator/>
		<menu id="sub" label="Sub"></menu>
	</menu>
</openbox_menu>
"#;

fn write_menu(dir: &TempDir, contents: &str) -> std::path::PathBuf {
	let path = dir.path().join("menu.xml");
	fs::write(&path, contents).unwrap();
	path
}

#[test]
fn document_builds_root_with_three_entries() {
	let dir = TempDir::new().unwrap();
	let path = write_menu(&dir, MENU_XML);
	let mut registry = MenuRegistry::startup();

	let report = parse_menus(&mut registry, &MenuPaths::only(path), &mut NamedActionParser, &mut StaticPlugins::new());

	assert!(report.build.is_clean());
	assert_eq!(registry.names(), ["root", "sub"]);

	let root = registry.lookup("root").unwrap();
	let kinds: Vec<_> = root.entries().iter().map(|entry| entry.entry_type()).collect();
	assert_eq!(kinds, [EntryType::Normal, EntryType::Separator, EntryType::Submenu]);

	let open = root.entries()[0].as_normal().unwrap();
	assert_eq!((open.label(), open.actions().len()), ("Open", 1));
	assert_eq!(root.entries()[2].as_submenu().unwrap().name(), "sub");
	assert_eq!(registry.lookup("sub").unwrap().entries().len(), 0);
}

#[test]
fn configured_path_falls_back_to_later_candidates() {
	let dir = TempDir::new().unwrap();
	let user = write_menu(&dir, MENU_XML);
	let mut registry = MenuRegistry::startup();

	let paths = MenuPaths {
		configured: Some(dir.path().join("missing.xml")),
		user: Some(user.clone()),
		system: dir.path().join("system.xml"),
	};
	let report = parse_menus(&mut registry, &paths, &mut NamedActionParser, &mut StaticPlugins::new());

	assert_eq!(report.source, Some(user));
	assert_eq!(report.load_errors.len(), 1);
	assert_eq!(registry.len(), 2);
}

thread_local! {
	static DESTROYED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

fn desktops(registry: &mut MenuRegistry) {
	registry.new_menu("desktops", "Desktops", Some(Rc::new(4_u32))).unwrap();
	registry
		.set_destroy_func("desktops", |name, data| {
			let count = data.and_then(|data| data.downcast_ref::<u32>().copied()).unwrap_or_default();
			DESTROYED.with(|log| log.borrow_mut().push(format!("{name}:{count}")));
		})
		.unwrap();
	for _ in 0..4 {
		registry.add_separator("desktops", 0).unwrap();
	}
}

#[test]
fn plugin_menu_lives_until_shutdown() {
	let dir = TempDir::new().unwrap();
	let path = write_menu(
		&dir,
		r#"<openbox_menu><menu id="root" label="Root"><menu id="desktops" plugin="desktops"/></menu></openbox_menu>"#,
	);
	let mut registry = MenuRegistry::startup();
	let mut plugins = StaticPlugins::new().with(MenuPluginDef::new("desktops", desktops));

	let report = parse_menus(&mut registry, &MenuPaths::only(path), &mut NamedActionParser, &mut plugins);
	assert!(report.build.is_clean(), "{:?}", report.build.warnings);
	assert_eq!(registry.lookup("desktops").unwrap().entries().len(), 4);

	registry.shutdown(&mut NullDisplay);

	assert!(registry.is_empty());
	assert!(registry.lookup("root").is_err());
	DESTROYED.with(|log| assert_eq!(*log.borrow(), ["desktops:4"]));
}
