use optdlg_dialog::PreferenceStore;
use optdlg_options::{PlotSize, RelativeDatePeriod};
use pretty_assertions::assert_eq;

use super::*;
use crate::options_file::parse_option_file;

const SAMPLE: &str = r##"
default_section = "Display"

[[option]]
section = "General"
name = "Show totals"
type = "boolean"
default = true

[[option]]
section = "General"
name = "Depth"
type = "number_range"
range = { min = 1, max = 8 }
enabled_by = "!General/Show totals"

[[option]]
section = "Display"
name = "Style"
type = "multichoice"
choices = ["plain", "fancy"]

[[option]]
section = "Display"
name = "Accent"
type = "color"
default = "#ff8000"
key = "a"
pref = { group = "display", key = "accent" }

[[option]]
section = "__private"
name = "Token"
type = "string"
"##;

fn line_with<'a>(out: &'a str, needle: &str) -> &'a str {
	out.lines()
		.find(|l| l.contains(needle))
		.unwrap_or_else(|| panic!("no line with {needle:?} in\n{out}"))
}

#[test]
fn show_lists_pages_in_order_with_shown_values() {
	let out = show(parse_option_file(SAMPLE).unwrap(), None).unwrap();

	assert!(out.starts_with("Options: 2 page(s), 4 control(s)\n"), "{out}");
	assert_eq!(line_with(&out, "[Display]"), "[Display] *");
	assert_eq!(line_with(&out, "[General]"), "[General]");
	assert!(!out.contains("__private"));
	assert!(!out.contains("Token"));

	let pos = |needle: &str| out.find(needle).unwrap();
	assert!(pos("[Display]") < pos("Style"));
	assert!(pos("Style") < pos("Accent"));
	assert!(pos("Accent") < pos("[General]"));
	assert!(pos("Depth") < pos("Show totals"));

	assert!(line_with(&out, "Style").ends_with("plain"));
	assert!(line_with(&out, "Accent").ends_with("#ff8000ff"));
	assert!(line_with(&out, "Show totals").ends_with("true"));
}

#[test]
fn show_marks_disabled_controls() {
	let out = show(parse_option_file(SAMPLE).unwrap(), None).unwrap();
	assert!(line_with(&out, "Depth").ends_with("(disabled)"));
	assert!(!line_with(&out, "Show totals").contains("(disabled)"));
}

#[test]
fn show_seeds_from_preferences() {
	let mut prefs = PreferenceStore::new();
	prefs.set("display", "accent", "#0000ff");
	prefs.set("display", "unused", true);

	let out = show(parse_option_file(SAMPLE).unwrap(), Some(&prefs as &dyn Preferences)).unwrap();
	assert_eq!(out.lines().next(), Some("1 option(s) taken from preferences"));
	assert!(line_with(&out, "Accent").ends_with("#0000ffff"));
}

#[test]
fn check_passes_with_every_constructor() {
	let outcome = check(parse_option_file(SAMPLE).unwrap(), &[]).unwrap();
	assert_eq!(outcome.failures, 0);
	assert_eq!(outcome.text, "2 page(s), 4 control(s), 0 failure(s)\n");
}

#[test]
fn check_reports_unregistered_types() {
	let outcome = check(parse_option_file(SAMPLE).unwrap(), &[OptionUiType::Color]).unwrap();
	assert_eq!(outcome.failures, 1);
	let first = outcome.text.lines().next().unwrap();
	assert!(first.starts_with("Display/Accent: "), "{first}");
	assert!(first.contains("color"), "{first}");
	assert!(outcome.text.ends_with("2 page(s), 3 control(s), 1 failure(s)\n"));
}

#[test]
fn types_lists_every_tag() {
	let out = types();
	assert_eq!(out.lines().count(), OptionUiType::iter().count());
	let first = out.lines().next().unwrap();
	assert!(first.starts_with("internal"));
	assert!(first.ends_with("hidden"));
	assert!(line_with(&out, "boolean").ends_with("preference default"));
	assert!(line_with(&out, "report_list").contains("ReportList"));
}

#[test]
fn value_rendering() {
	assert_eq!(
		format_value(&OptionValue::Date(DateValue::Absolute(0))),
		"1970-01-01 00:00:00 UTC"
	);
	assert_eq!(
		format_value(&OptionValue::Date(DateValue::Relative(RelativeDatePeriod::StartPrevYear))),
		"start-prev-year"
	);
	assert_eq!(
		format_value(&OptionValue::PlotSize(PlotSize {
			percent: true,
			value: 50.0
		})),
		"50%"
	);
	assert_eq!(format_value(&OptionValue::Account(None)), "(none)");
	assert_eq!(format_value(&OptionValue::String("a b".into())), "\"a b\"");
	assert_eq!(
		format_value(&OptionValue::List(vec!["x".into(), "y".into()])),
		"[x, y]"
	);
}
