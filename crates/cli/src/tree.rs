//! Indented text rendering of the registry.

use std::fmt::{self, Write};

use wmenu_registry::{EntryKind, MenuRegistry};

const INDENT: &str = "  ";

/// Writes every menu, sorted by name, with its entries nested below it.
///
/// Submenus are expanded in place. A link back to a menu already being
/// expanded is printed but not followed, and so is a link whose target is gone
/// or was registered again since the link was made.
pub fn write_registry(out: &mut impl Write, registry: &MenuRegistry) -> fmt::Result {
	for name in registry.names() {
		let mut open = Vec::new();
		write_menu(out, registry, name, 0, &mut open)?;
	}
	Ok(())
}

fn write_menu<'r>(out: &mut impl Write, registry: &'r MenuRegistry, name: &'r str, depth: usize, open: &mut Vec<&'r str>) -> fmt::Result {
	let Some(menu) = registry.get(name) else {
		return Ok(());
	};
	if depth == 0 {
		writeln!(out, "{} \"{}\"", menu.name(), menu.title())?;
	}

	open.push(menu.name());
	let indent = INDENT.repeat(depth + 1);
	for entry in menu.entries() {
		match entry.kind() {
			EntryKind::Normal(normal) => {
				write!(out, "{indent}item \"{}\"", normal.label())?;
				if !normal.actions().is_empty() {
					let names: Vec<&str> = normal.actions().iter().map(|action| action.name()).collect();
					write!(out, " [{}]", names.join(", "))?;
				}
				if !normal.is_enabled() {
					write!(out, " (disabled)")?;
				}
				writeln!(out)?;
			}
			EntryKind::Separator => writeln!(out, "{indent}separator")?,
			// Dangling links are part of the listing, not something to warn about.
			EntryKind::Submenu(link) => match registry.get(link.name()).filter(|target| target.serial() == link.serial()) {
				Some(target) if open.contains(&target.name()) => writeln!(out, "{indent}menu {} (cycle)", target.name())?,
				Some(target) => {
					writeln!(out, "{indent}menu {} \"{}\"", target.name(), target.title())?;
					write_menu(out, registry, target.name(), depth + 1, open)?;
				}
				None => writeln!(out, "{indent}menu {} (missing)", link.name())?,
			},
		}
	}
	open.pop();
	Ok(())
}
