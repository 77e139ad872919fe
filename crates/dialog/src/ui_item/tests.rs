use std::rc::Rc;

use optdlg_options::{
	Choice, DateValue, OptionConstraint, OptionEntry, RelativeDatePeriod, Rgba,
};
use optdlg_toolkit::{ControlKind, DateMode, HeadlessToolkit, Toolkit, WidgetKind};
use pretty_assertions::assert_eq;

use super::*;

fn item_for(ty: OptionUiType, kind: ControlKind) -> (Rc<HeadlessToolkit>, WidgetUiItem) {
	let tk = Rc::new(HeadlessToolkit::new());
	let widget = tk.create(WidgetKind::Control(kind));
	let toolkit: ToolkitRef = tk.clone();
	(tk, WidgetUiItem::with_default_bridge(toolkit, ty, widget))
}

fn choices() -> OptionConstraint {
	OptionConstraint::Choices(vec![
		Choice::new("first", "First"),
		Choice::new("second", "Second"),
	])
}

#[test]
fn clear_is_idempotent() {
	let (tk, mut item) = item_for(OptionUiType::Boolean, ControlKind::CheckButton);
	let widget = item.get_widget().unwrap();

	item.clear_ui_item();
	item.clear_ui_item();

	assert_eq!(item.get_widget(), None);
	assert!(!item.is_live());
	assert!(tk.is_alive(widget));
	item.set_selectable(false);
	assert!(tk.is_sensitive(widget));
}

#[test]
fn cleared_item_reads_nothing() {
	let (_tk, mut item) = item_for(OptionUiType::String, ControlKind::Entry);
	let option = OptionEntry::new("General", "Name", OptionUiType::String);
	item.clear_ui_item();
	assert_eq!(item.get_option_value(&option), None);
}

#[test]
fn selectable_toggles_sensitivity() {
	let (tk, item) = item_for(OptionUiType::String, ControlKind::Entry);
	let widget = item.get_widget().unwrap();
	item.set_selectable(false);
	assert!(!tk.is_sensitive(widget));
	item.set_selectable(true);
	assert!(tk.is_sensitive(widget));
}

#[test]
fn boolean_round_trips_through_control() {
	let (tk, item) = item_for(OptionUiType::Boolean, ControlKind::CheckButton);
	let widget = item.get_widget().unwrap();
	let option = OptionEntry::new("General", "Flag", OptionUiType::Boolean).with_default(true);

	item.set_ui_item_from_option(&option);
	assert_eq!(tk.value(widget), Some(ControlValue::Toggle(true)));

	tk.set_value(widget, ControlValue::Toggle(false));
	assert_eq!(item.get_option_value(&option), Some(OptionValue::Bool(false)));
}

#[test]
fn choice_maps_index_to_key() {
	let (tk, item) = item_for(OptionUiType::Multichoice, ControlKind::ComboBox);
	let widget = item.get_widget().unwrap();
	tk.set_items(widget, &["First".into(), "Second".into()]);
	let option = OptionEntry::new("Display", "Style", OptionUiType::Multichoice)
		.with_constraint(choices())
		.with_default(OptionValue::Choice("second".into()));

	item.set_ui_item_from_option(&option);
	assert_eq!(tk.value(widget), Some(ControlValue::Index(Some(1))));

	tk.set_value(widget, ControlValue::Index(Some(0)));
	assert_eq!(
		item.get_option_value(&option),
		Some(OptionValue::Choice("first".into()))
	);

	// No selection falls back to the stored key.
	tk.set_value(widget, ControlValue::Index(None));
	assert_eq!(
		item.get_option_value(&option),
		Some(OptionValue::Choice("second".into()))
	);
}

#[test]
fn list_maps_rows_to_keys() {
	let (tk, item) = item_for(OptionUiType::List, ControlKind::ListView);
	let widget = item.get_widget().unwrap();
	tk.set_items(widget, &["First".into(), "Second".into()]);
	let option = OptionEntry::new("Display", "Columns", OptionUiType::List)
		.with_constraint(choices())
		.with_default(OptionValue::List(vec!["second".into()]));

	item.set_ui_item_from_option(&option);
	assert_eq!(tk.value(widget), Some(ControlValue::Indices(vec![1])));

	tk.set_value(widget, ControlValue::Indices(vec![0, 1]));
	assert_eq!(
		item.get_option_value(&option),
		Some(OptionValue::List(vec!["first".into(), "second".into()]))
	);
}

#[test]
fn relative_date_uses_offered_periods() {
	let (tk, item) = item_for(OptionUiType::DateRelative, ControlKind::DateEdit(DateMode::Relative));
	let widget = item.get_widget().unwrap();
	let periods = vec![RelativeDatePeriod::StartThisMonth, RelativeDatePeriod::EndThisMonth];
	tk.set_items(widget, &["a".into(), "b".into()]);
	let option = OptionEntry::new("General", "From", OptionUiType::DateRelative)
		.with_constraint(OptionConstraint::RelativePeriods(periods))
		.with_default(DateValue::Relative(RelativeDatePeriod::EndThisMonth));

	item.set_ui_item_from_option(&option);
	assert_eq!(tk.value(widget), Some(ControlValue::Index(Some(1))));

	tk.set_value(widget, ControlValue::Index(Some(0)));
	assert_eq!(
		item.get_option_value(&option),
		Some(OptionValue::Date(DateValue::Relative(
			RelativeDatePeriod::StartThisMonth
		)))
	);
}

#[test]
fn date_both_switches_flavor() {
	let (tk, item) = item_for(OptionUiType::DateBoth, ControlKind::DateEdit(DateMode::Both));
	let widget = item.get_widget().unwrap();
	let option = OptionEntry::new("General", "To", OptionUiType::DateBoth)
		.with_default(DateValue::Absolute(1_000));

	item.set_ui_item_from_option(&option);
	assert_eq!(
		tk.value(widget),
		Some(ControlValue::DateChoice {
			use_absolute: true,
			absolute: 1_000,
			relative: 0,
		})
	);

	tk.set_value(
		widget,
		ControlValue::DateChoice {
			use_absolute: false,
			absolute: 1_000,
			relative: 0,
		},
	);
	assert_eq!(
		item.get_option_value(&option),
		Some(OptionValue::Date(DateValue::Relative(RelativeDatePeriod::Today)))
	);
}

#[test]
fn unexpected_control_state_keeps_a_valid_value() {
	let (tk, item) = item_for(OptionUiType::Color, ControlKind::ColorButton);
	let widget = item.get_widget().unwrap();
	let color = Rgba::new(1, 2, 3, 4);
	let option = OptionEntry::new("Fonts", "Tint", OptionUiType::Color).with_default(color);

	tk.set_value(widget, ControlValue::Text("not a color".into()));
	assert_eq!(item.get_option_value(&option), Some(OptionValue::Color(color)));
}

#[test]
fn account_selection_parses_guid() {
	let (tk, item) = item_for(OptionUiType::AccountSel, ControlKind::AccountSelect);
	let widget = item.get_widget().unwrap();
	let option = OptionEntry::new("Accounts", "Income", OptionUiType::AccountSel);
	let guid = optdlg_options::Guid::new_v4();

	tk.set_value(widget, ControlValue::Selection(Some(guid.to_string())));
	assert_eq!(
		item.get_option_value(&option),
		Some(OptionValue::Account(Some(guid)))
	);
	tk.set_value(widget, ControlValue::Selection(Some("garbage".into())));
	assert_eq!(item.get_option_value(&option), Some(OptionValue::Account(None)));
}

#[test]
fn widget_lookup_downcasts() {
	let (_tk, item) = item_for(OptionUiType::String, ControlKind::Entry);
	let widget = item.get_widget();
	let boxed: Box<dyn OptionUiItem> = Box::new(item);
	assert_eq!(ui_item_widget(boxed.as_ref()), widget);
}
