//! Display collaborator that logs instead of drawing.

use tracing::info;
use wmenu_registry::{EntryKind, Menu, MenuDisplay};

/// A menu as it would appear on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFrame {
	pub menu: String,
	pub title: String,
	pub client: Option<String>,
	pub x: i32,
	pub y: i32,
	/// One rendered line per entry.
	pub rows: Vec<String>,
}

/// Records frames and reports them through `tracing`.
#[derive(Debug, Default)]
pub struct LogDisplay {
	shown: Vec<LogFrame>,
}

impl LogDisplay {
	/// Frames currently mapped, oldest first.
	pub fn shown(&self) -> &[LogFrame] {
		&self.shown
	}
}

impl MenuDisplay for LogDisplay {
	type Frame = LogFrame;
	type Context = String;

	fn create_frame(&mut self, menu: &Menu, context: Option<&String>) -> LogFrame {
		LogFrame {
			menu: menu.name().to_owned(),
			title: menu.title().to_owned(),
			client: context.cloned(),
			x: 0,
			y: 0,
			rows: menu.entries().iter().map(|entry| row(entry.kind())).collect(),
		}
	}

	fn move_frame(&mut self, frame: &mut LogFrame, x: i32, y: i32) {
		frame.x = x;
		frame.y = y;
	}

	fn show_frame(&mut self, frame: LogFrame, parent: Option<&LogFrame>) {
		info!(
			menu = %frame.menu,
			title = %frame.title,
			x = frame.x,
			y = frame.y,
			client = ?frame.client,
			parent = ?parent.map(|parent| &parent.menu),
			"frame shown"
		);
		for row in &frame.rows {
			info!(menu = %frame.menu, "  {row}");
		}
		self.shown.push(frame);
	}

	fn hide_all_frames(&mut self) {
		if !self.shown.is_empty() {
			info!(count = self.shown.len(), "hiding all frames");
		}
		self.shown.clear();
	}
}

fn row(kind: &EntryKind) -> String {
	match kind {
		EntryKind::Normal(normal) if normal.is_enabled() => normal.label().to_owned(),
		EntryKind::Normal(normal) => format!("({})", normal.label()),
		EntryKind::Submenu(link) => format!("{} >", link.name()),
		EntryKind::Separator => "--".to_owned(),
	}
}
