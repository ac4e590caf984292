//! Presentation bridge.
//!
//! The registry never draws anything. [`MenuRegistry::show`](crate::MenuRegistry::show)
//! and [`MenuRegistry::shutdown`](crate::MenuRegistry::shutdown) drive an
//! implementation of [`MenuDisplay`] supplied by the display layer.

use crate::menu::Menu;

/// Display layer that turns menus into on-screen frames.
pub trait MenuDisplay {
	/// On-screen representation of one shown menu.
	type Frame;

	/// Whatever the menu was opened for (a client window, a root click, ...).
	type Context;

	/// Builds a frame for `menu`.
	fn create_frame(&mut self, menu: &Menu, context: Option<&Self::Context>) -> Self::Frame;

	fn move_frame(&mut self, frame: &mut Self::Frame, x: i32, y: i32);

	/// Maps `frame`, optionally as a child of an already shown frame.
	fn show_frame(&mut self, frame: Self::Frame, parent: Option<&Self::Frame>);

	/// Hides every frame currently on screen.
	fn hide_all_frames(&mut self);
}

/// Display that shows nothing. Useful for headless teardown.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl MenuDisplay for NullDisplay {
	type Frame = ();
	type Context = ();

	fn create_frame(&mut self, _menu: &Menu, _context: Option<&()>) {}

	fn move_frame(&mut self, _frame: &mut (), _x: i32, _y: i32) {}

	fn show_frame(&mut self, _frame: (), _parent: Option<&()>) {}

	fn hide_all_frames(&mut self) {}
}
