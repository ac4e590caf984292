use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "wmenu")]
#[command(about = "Inspect window manager menu documents")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Menu document to try before the user and system defaults
	#[arg(long, short = 'm', value_name = "PATH", global = true)]
	pub menu: Option<PathBuf>,

	/// Verbose logging
	#[arg(long, short = 'v', global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
	/// Print every menu as an indented tree
	List,
	/// Show a menu through the logging display
	Show {
		/// Menu id
		name: String,
		/// Horizontal position
		#[arg(long, default_value_t = 0, allow_negative_numbers = true)]
		x: i32,
		/// Vertical position
		#[arg(long, default_value_t = 0, allow_negative_numbers = true)]
		y: i32,
		/// Client the menu is opened for
		#[arg(long)]
		client: Option<String>,
	},
	/// Activate one entry of a menu
	Run {
		/// Menu id
		name: String,
		/// Zero-based entry position
		index: usize,
	},
	/// Load the document and report every problem found
	Check,
}
