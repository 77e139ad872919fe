//! Built-in widget constructors, one per option UI type.

use optdlg_options::{OptionConstraint, OptionEntry, OptionUiType};
use optdlg_toolkit::{ControlKind, DateMode, NumericRange, Placement, WidgetId, WidgetKind};

use super::{CreateArgs, CreatedWidget, WidgetCreateFn};
use crate::DialogError;
use crate::ui_item::WidgetUiItem;

type Created = Result<CreatedWidget, DialogError>;

/// The constructor registered for `ty` when a factory initializes.
pub fn builtin_constructor(ty: OptionUiType) -> WidgetCreateFn {
	match ty {
		OptionUiType::Internal => create_internal,
		OptionUiType::Boolean => create_boolean,
		OptionUiType::String => create_string,
		OptionUiType::Text => create_text,
		OptionUiType::Currency => create_currency,
		OptionUiType::Commodity => create_commodity,
		OptionUiType::Multichoice => create_multichoice,
		OptionUiType::DateAbsolute | OptionUiType::DateRelative | OptionUiType::DateBoth => {
			create_date
		}
		OptionUiType::AccountList => create_account_list,
		OptionUiType::AccountSel => create_account_sel,
		OptionUiType::List => create_list,
		OptionUiType::NumberRange => create_number_range,
		OptionUiType::Color => create_color,
		OptionUiType::Font => create_font,
		OptionUiType::PlotSize => create_plot_size,
		OptionUiType::Pixmap => create_pixmap,
		OptionUiType::Radiobutton => create_radiobutton,
		OptionUiType::DateFormat => create_date_format,
		OptionUiType::Budget
		| OptionUiType::Owner
		| OptionUiType::Customer
		| OptionUiType::Vendor
		| OptionUiType::Employee
		| OptionUiType::Invoice
		| OptionUiType::Job
		| OptionUiType::TaxTable
		| OptionUiType::InvReport => create_instance,
		OptionUiType::Query => create_query,
		OptionUiType::ReportList => create_report_list,
	}
}

fn control(args: &CreateArgs<'_>, kind: ControlKind) -> WidgetId {
	args.toolkit.create(WidgetKind::Control(kind))
}

fn finish(args: &CreateArgs<'_>, widget: WidgetId, enclosing: Option<WidgetId>, packed: bool) -> Created {
	let item = WidgetUiItem::with_default_bridge(args.toolkit.clone(), args.option.ui_type(), widget);
	Ok(CreatedWidget {
		widget,
		enclosing,
		packed,
		item: Box::new(item),
	})
}

fn plain(args: &CreateArgs<'_>, kind: ControlKind) -> Created {
	let widget = control(args, kind);
	finish(args, widget, None, false)
}

/// Wraps the control in a container of `wrapper` kind.
fn wrapped(args: &CreateArgs<'_>, kind: ControlKind, wrapper: WidgetKind) -> Created {
	let widget = control(args, kind);
	let outer = args.toolkit.create(wrapper);
	args.toolkit.attach(outer, widget, Placement::Append);
	finish(args, widget, Some(outer), false)
}

/// List-style controls take the full row width: a frame holding the name
/// label above the control, placed across both grid columns.
fn packed(args: &CreateArgs<'_>, widget: WidgetId) -> Created {
	let tk = args.toolkit;
	let frame = tk.create(WidgetKind::Frame);
	tk.attach(frame, args.name_label, Placement::Append);
	tk.attach(frame, widget, Placement::Append);
	tk.set_tooltip(frame, args.description);
	tk.attach(
		args.page,
		frame,
		Placement::Grid {
			column: 0,
			row: args.row,
			width: 2,
		},
	);
	finish(args, widget, Some(frame), true)
}

fn choice_labels(option: &OptionEntry) -> Vec<String> {
	option
		.constraint()
		.choices()
		.iter()
		.map(|c| c.label.clone())
		.collect()
}

fn with_items(args: &CreateArgs<'_>, kind: ControlKind) -> WidgetId {
	let widget = control(args, kind);
	args.toolkit.set_items(widget, &choice_labels(args.option));
	widget
}

fn create_internal(args: &CreateArgs<'_>) -> Created {
	let widget = control(args, ControlKind::Hidden);
	args.toolkit.set_visible(widget, false);
	finish(args, widget, None, false)
}

fn create_boolean(args: &CreateArgs<'_>) -> Created {
	wrapped(args, ControlKind::CheckButton, WidgetKind::HBox)
}

fn create_string(args: &CreateArgs<'_>) -> Created {
	plain(args, ControlKind::Entry)
}

fn create_text(args: &CreateArgs<'_>) -> Created {
	wrapped(args, ControlKind::TextView, WidgetKind::Frame)
}

fn create_currency(args: &CreateArgs<'_>) -> Created {
	plain(args, ControlKind::CommodityEdit { currency_only: true })
}

fn create_commodity(args: &CreateArgs<'_>) -> Created {
	plain(args, ControlKind::CommodityEdit { currency_only: false })
}

fn create_multichoice(args: &CreateArgs<'_>) -> Created {
	let widget = with_items(args, ControlKind::ComboBox);
	finish(args, widget, None, false)
}

fn create_date(args: &CreateArgs<'_>) -> Created {
	let mode = match args.option.ui_type() {
		OptionUiType::DateRelative => DateMode::Relative,
		OptionUiType::DateBoth => DateMode::Both,
		_ => DateMode::Absolute,
	};
	let widget = control(args, ControlKind::DateEdit(mode));
	if mode != DateMode::Absolute {
		let periods: Vec<String> = args
			.option
			.constraint()
			.relative_periods()
			.iter()
			.map(ToString::to_string)
			.collect();
		args.toolkit.set_items(widget, &periods);
	}
	if mode == DateMode::Both {
		let hbox = args.toolkit.create(WidgetKind::HBox);
		args.toolkit.attach(hbox, widget, Placement::Append);
		return finish(args, widget, Some(hbox), false);
	}
	finish(args, widget, None, false)
}

fn create_account_list(args: &CreateArgs<'_>) -> Created {
	let widget = control(args, ControlKind::AccountTree);
	packed(args, widget)
}

fn create_account_sel(args: &CreateArgs<'_>) -> Created {
	plain(args, ControlKind::AccountSelect)
}

fn create_list(args: &CreateArgs<'_>) -> Created {
	let widget = with_items(args, ControlKind::ListView);
	packed(args, widget)
}

fn create_number_range(args: &CreateArgs<'_>) -> Created {
	let widget = control(args, ControlKind::SpinButton);
	if let OptionConstraint::Range {
		min,
		max,
		step,
		decimals,
	} = *args.option.constraint()
	{
		args.toolkit.set_range(
			widget,
			NumericRange {
				min,
				max,
				step,
				decimals,
			},
		);
	}
	finish(args, widget, None, false)
}

fn create_color(args: &CreateArgs<'_>) -> Created {
	plain(args, ControlKind::ColorButton)
}

fn create_font(args: &CreateArgs<'_>) -> Created {
	plain(args, ControlKind::FontButton)
}

fn create_plot_size(args: &CreateArgs<'_>) -> Created {
	wrapped(args, ControlKind::PlotSize, WidgetKind::HBox)
}

fn create_pixmap(args: &CreateArgs<'_>) -> Created {
	wrapped(args, ControlKind::FileChooser, WidgetKind::HBox)
}

fn create_radiobutton(args: &CreateArgs<'_>) -> Created {
	let widget = with_items(args, ControlKind::RadioGroup);
	let frame = args.toolkit.create(WidgetKind::Frame);
	args.toolkit.attach(frame, widget, Placement::Append);
	finish(args, widget, Some(frame), false)
}

fn create_date_format(args: &CreateArgs<'_>) -> Created {
	wrapped(args, ControlKind::DateFormat, WidgetKind::Frame)
}

fn create_instance(args: &CreateArgs<'_>) -> Created {
	plain(args, ControlKind::InstanceSelect)
}

fn create_query(args: &CreateArgs<'_>) -> Created {
	plain(args, ControlKind::QueryView)
}

fn create_report_list(args: &CreateArgs<'_>) -> Created {
	let widget = control(args, ControlKind::ReportList);
	packed(args, widget)
}
