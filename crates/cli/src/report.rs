//! Text renderings of a headlessly built dialog.

use std::fmt::Write as _;
use std::rc::Rc;

use anyhow::Result;
use optdlg_dialog::{
	BuildReport, DialogConfig, OptionsDialog, Preferences, SharedFactory, WidgetFactory,
	set_new_book_option_values,
};
use optdlg_options::{DateValue, OptionDb, OptionEntry, OptionUiType, OptionValue, shared};
use optdlg_toolkit::{HeadlessToolkit, Toolkit, ToolkitRef};
use strum::IntoEnumIterator;
use tracing::info;

#[cfg(test)]
mod tests;

const TITLE: &str = "Options";

/// Result of checking an option file against a factory.
#[derive(Debug)]
pub struct CheckOutcome {
	pub text: String,
	pub failures: usize,
}

/// Builds the dialog for `db` and renders every page with the values its
/// controls show.
///
/// With `prefs`, the collection is first seeded as a new book would be.
pub fn show(mut db: OptionDb, prefs: Option<&dyn Preferences>) -> Result<String> {
	let mut out = String::new();
	if let Some(prefs) = prefs {
		let applied = set_new_book_option_values(&mut db, prefs);
		info!(applied, "seeded options from preferences");
		writeln!(out, "{applied} option(s) taken from preferences")?;
	}
	let (tk, mut dialog, report) = build(db, WidgetFactory::global())?;
	render_pages(&mut out, &tk, &dialog, &report)?;
	dialog.destroy();
	Ok(out)
}

/// Builds the dialog with `without` treated as unregistered and reports every
/// option left without a control.
pub fn check(db: OptionDb, without: &[OptionUiType]) -> Result<CheckOutcome> {
	let factory = WidgetFactory::shared();
	{
		let mut factory = factory.write();
		factory.initialize();
		for ty in without {
			factory.unregister(*ty);
		}
	}
	let (_tk, mut dialog, report) = build(db, factory)?;
	dialog.destroy();

	let mut text = String::new();
	for failure in &report.failures {
		writeln!(text, "{}: {}", failure.option, failure.error)?;
	}
	writeln!(
		text,
		"{} page(s), {} control(s), {} failure(s)",
		report.pages,
		report.items,
		report.failures.len()
	)?;
	Ok(CheckOutcome {
		text,
		failures: report.failures.len(),
	})
}

/// Lists every option UI type with the value it edits.
pub fn types() -> String {
	let mut out = String::new();
	for ty in OptionUiType::iter() {
		let mut notes = Vec::new();
		if ty.is_internal() {
			notes.push("hidden");
		}
		if ty.supports_preference_default() {
			notes.push("preference default");
		}
		let kind = format!("{:?}", ty.value_kind());
		let line = format!("{:<16} {kind:<12} {}", ty.to_string(), notes.join(", "));
		out.push_str(line.trim_end());
		out.push('\n');
	}
	out
}

fn build(
	db: OptionDb,
	factory: SharedFactory,
) -> Result<(Rc<HeadlessToolkit>, OptionsDialog, BuildReport)> {
	let tk = Rc::new(HeadlessToolkit::new());
	let toolkit: ToolkitRef = tk.clone();
	let mut dialog = OptionsDialog::with_factory(toolkit, DialogConfig::new(TITLE).modal(false), factory);
	let report = dialog.build_contents(shared(db), false)?;
	Ok((tk, dialog, report))
}

fn render_pages(
	out: &mut String,
	tk: &HeadlessToolkit,
	dialog: &OptionsDialog,
	report: &BuildReport,
) -> Result<()> {
	writeln!(
		out,
		"{TITLE}: {} page(s), {} control(s)",
		report.pages, report.items
	)?;
	let Some(db) = dialog.get_option_db() else {
		return Ok(());
	};
	let db = db.borrow();
	for (index, name) in dialog.page_names().into_iter().enumerate() {
		let marker = if index == dialog.current_page() { " *" } else { "" };
		writeln!(out, "[{name}]{marker}")?;
		let Some(section) = db.section(name) else {
			continue;
		};
		for option in section.options().iter().filter(|o| !o.is_internal()) {
			let Some(widget) = dialog.widget_for_option(option.path()) else {
				continue;
			};
			let mut line = format!(
				"  {:<24} {:<14} {}",
				option.name(),
				option.ui_type().to_string(),
				format_value(&shown_value(option))
			);
			if !tk.is_sensitive(widget) {
				line.push_str("  (disabled)");
			}
			writeln!(out, "{line}")?;
		}
	}
	for failure in &report.failures {
		writeln!(out, "failed: {}: {}", failure.option, failure.error)?;
	}
	Ok(())
}

/// The value the option's control shows, or the stored value without one.
fn shown_value(option: &OptionEntry) -> OptionValue {
	option
		.ui_item()
		.and_then(|item| item.get_option_value(option))
		.unwrap_or_else(|| option.value().clone())
}

/// One-line rendering of a value.
pub fn format_value(value: &OptionValue) -> String {
	match value {
		OptionValue::Bool(b) => b.to_string(),
		OptionValue::String(s) => format!("{s:?}"),
		OptionValue::Number(n) => n.to_string(),
		OptionValue::Date(DateValue::Absolute(secs)) => chrono::DateTime::from_timestamp(*secs, 0)
			.map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
			.unwrap_or_else(|| format!("@{secs}")),
		OptionValue::Date(DateValue::Relative(period)) => period.to_string(),
		OptionValue::Choice(key) | OptionValue::Commodity(key) => key.clone(),
		OptionValue::List(keys) => format!("[{}]", keys.join(", ")),
		OptionValue::Color(color) => color.to_string(),
		OptionValue::Account(guid) | OptionValue::Instance(guid) => guid
			.map(|g| g.to_string())
			.unwrap_or_else(|| "(none)".to_string()),
		OptionValue::AccountList(guids) => format!("{} account(s)", guids.len()),
		OptionValue::PlotSize(size) if size.percent => format!("{}%", size.value),
		OptionValue::PlotSize(size) => format!("{}px", size.value),
		OptionValue::DateFormat(spec) if spec.custom.is_empty() => spec.format.to_string(),
		OptionValue::DateFormat(spec) => format!("{} ({})", spec.format, spec.custom),
		OptionValue::ReportList(reports) => format!("{} report(s)", reports.len()),
		OptionValue::Query(query) => format!("query {query:?}"),
	}
}
