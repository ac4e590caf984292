//! `wmenu`: loads the window manager menu document and exercises the registry.
//!
//! Menus come from the first candidate document that parses: `--menu`, then
//! the user configuration directory, then the system default.

mod cli;
mod display;
mod tree;

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::info;
use wmenu_config::{MenuParseReport, MenuPaths, NamedActionParser, StaticPlugins, parse_menus};
use wmenu_registry::MenuRegistry;

use crate::cli::{Cli, Command};
use crate::display::LogDisplay;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	let paths = MenuPaths::resolve(cli.menu);
	let mut registry = MenuRegistry::startup();
	let report = parse_menus(&mut registry, &paths, &mut NamedActionParser, &mut StaticPlugins::new());
	info!(source = ?report.source, menus = registry.len(), "menus loaded");

	let mut display = LogDisplay::default();
	let result = run(cli.command, &mut registry, &mut display, &report);
	registry.shutdown(&mut display);
	result
}

fn run(command: Command, registry: &mut MenuRegistry, display: &mut LogDisplay, report: &MenuParseReport) -> anyhow::Result<()> {
	match command {
		Command::List => {
			let mut out = String::new();
			tree::write_registry(&mut out, registry)?;
			print!("{out}");
		}
		Command::Show { name, x, y, client } => {
			registry
				.show(display, &name, x, y, client.as_ref())
				.with_context(|| format!("cannot show menu '{name}'"))?;
		}
		Command::Run { name, index } => {
			registry.execute(&name, index).with_context(|| format!("cannot run entry {index} of menu '{name}'"))?;
		}
		Command::Check => check(report)?,
	}
	Ok(())
}

fn check(report: &MenuParseReport) -> anyhow::Result<()> {
	for (path, error) in &report.load_errors {
		println!("{}: {error}", path.display());
	}
	let source = report.source.as_ref().map(|path| path.display().to_string()).unwrap_or_default();
	for warning in &report.build.warnings {
		println!("{source}: {warning}");
	}

	match &report.source {
		None => bail!("no menu document could be loaded"),
		Some(_) if !report.build.is_clean() => bail!("{} problem(s) in {source}", report.build.warnings.len()),
		Some(path) => {
			println!("{}: ok, {} menu(s)", path.display(), report.build.created.len());
			Ok(())
		}
	}
}

fn setup_tracing(verbose: bool) {
	use std::fs::OpenOptions;

	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::prelude::*;

	let filter = || {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("wmenu=debug,wmenu_config=debug,wmenu_registry=debug")
			} else {
				EnvFilter::new("wmenu=info,wmenu_config=info,wmenu_registry=info")
			}
		})
	};

	// WMENU_LOG_DIR keeps stderr clean for `list` and `check` output.
	if let Some(log_dir) = std::env::var("WMENU_LOG_DIR").ok().map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("wmenu.{}.log", std::process::id()));

		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer().with_writer(file).with_ansi(false).with_target(true);
			tracing_subscriber::registry().with(filter()).with(file_layer).init();

			tracing::debug!(path = ?log_path, "tracing initialized");
			return;
		}
	}

	tracing_subscriber::fmt().with_env_filter(filter()).with_writer(std::io::stderr).init();
}
