use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "optdlg")]
#[command(about = "Build an options dialog headlessly and inspect it")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Build the dialog for an option file and print its pages
	Show {
		/// Option file (TOML)
		#[arg(value_name = "FILE")]
		options: PathBuf,

		/// Preferences file (TOML, one table per group)
		#[arg(long, short = 'p', value_name = "FILE")]
		prefs: Option<PathBuf>,

		/// Seed options from the preferences before building, as for a new book
		#[arg(long, requires = "prefs")]
		new_book: bool,
	},
	/// Verify every option in a file gets a control
	Check {
		/// Option file (TOML)
		#[arg(value_name = "FILE")]
		options: PathBuf,

		/// Treat a type as having no registered constructor (repeatable)
		#[arg(long, value_name = "TYPE")]
		without: Vec<String>,
	},
	/// List the option UI types
	Types,
}
