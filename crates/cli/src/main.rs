//! optdlg: builds an options dialog against the headless toolkit.
//!
//! Loads an option file, populates a dialog from it and prints what each page
//! would show, or reports options whose type has no control.

mod cli;
mod options_file;
mod report;

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use optdlg_dialog::PreferenceStore;
use optdlg_options::OptionUiType;
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::options_file::load_option_file;

fn main() -> Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	match cli.command {
		Command::Show {
			options,
			prefs,
			new_book,
		} => {
			let db = load_option_file(&options)?;
			let prefs = prefs.as_deref().map(load_preferences).transpose()?;
			if prefs.is_some() && !new_book {
				debug!("preferences loaded but --new-book not given; ignoring them");
			}
			let seed = prefs
				.as_ref()
				.filter(|_| new_book)
				.map(|p| p as &dyn optdlg_dialog::Preferences);
			print!("{}", report::show(db, seed)?);
		}
		Command::Check { options, without } => {
			let db = load_option_file(&options)?;
			let without = without
				.iter()
				.map(|name| {
					OptionUiType::from_str(name).map_err(|_| anyhow!("unknown option type '{name}'"))
				})
				.collect::<Result<Vec<_>>>()?;
			let outcome = report::check(db, &without)?;
			print!("{}", outcome.text);
			if outcome.failures > 0 {
				bail!("{} option(s) could not be given a control", outcome.failures);
			}
		}
		Command::Types => print!("{}", report::types()),
	}
	Ok(())
}

fn load_preferences(path: &Path) -> Result<PreferenceStore> {
	let text = std::fs::read_to_string(path)
		.with_context(|| format!("failed to read preferences {}", path.display()))?;
	PreferenceStore::from_toml_str(&text)
		.with_context(|| format!("invalid preferences {}", path.display()))
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::prelude::*;

	let filter = EnvFilter::try_from_env("OPTDLG_LOG")
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("optdlg=debug,optdlg_dialog=debug,optdlg_options=debug,info")
			} else {
				EnvFilter::new("warn")
			}
		});

	tracing_subscriber::registry()
		.with(filter)
		.with(
			tracing_subscriber::fmt::layer()
				.with_writer(std::io::stderr)
				.with_target(verbose),
		)
		.init();
}
