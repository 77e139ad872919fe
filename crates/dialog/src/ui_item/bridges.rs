use optdlg_options::{
	DateFormatSpec, DateFormatStyle, DateValue, Guid, MonthFormat, OptionEntry, OptionUiType,
	OptionValue, PlotSize, ReportPlacement, Rgba, ValueKind,
};
use optdlg_toolkit::ControlValue;
use strum::IntoEnumIterator;

/// Conversion between an option's value and its control's state.
///
/// `from_control` is total: every state the control can show, including an
/// unexpected or missing one, maps to a value the option accepts by type.
pub trait ValueBridge {
	fn to_control(&self, option: &OptionEntry) -> ControlValue;

	fn from_control(&self, option: &OptionEntry, shown: Option<ControlValue>) -> OptionValue;
}

/// Built-in conversions for a UI type.
pub fn bridge_for(ui_type: OptionUiType) -> Box<dyn ValueBridge> {
	match ui_type.value_kind() {
		ValueKind::Bool => Box::new(ToggleBridge),
		ValueKind::String | ValueKind::Query => Box::new(TextBridge),
		ValueKind::Number => Box::new(NumberBridge),
		ValueKind::Date => Box::new(DateBridge),
		ValueKind::Choice => Box::new(ChoiceBridge),
		ValueKind::List => Box::new(ListBridge),
		ValueKind::Color => Box::new(ColorBridge),
		ValueKind::Commodity => Box::new(CommodityBridge),
		ValueKind::Account | ValueKind::Instance => Box::new(GuidBridge),
		ValueKind::AccountList => Box::new(GuidListBridge),
		ValueKind::PlotSize => Box::new(PlotSizeBridge),
		ValueKind::DateFormat => Box::new(DateFormatBridge),
		ValueKind::ReportList => Box::new(ReportListBridge),
	}
}

struct ToggleBridge;

impl ValueBridge for ToggleBridge {
	fn to_control(&self, option: &OptionEntry) -> ControlValue {
		ControlValue::Toggle(option.value().as_bool().unwrap_or(false))
	}

	fn from_control(&self, _option: &OptionEntry, shown: Option<ControlValue>) -> OptionValue {
		OptionValue::Bool(matches!(shown, Some(ControlValue::Toggle(true))))
	}
}

/// Plain text, fonts, pixmap paths and serialized queries.
struct TextBridge;

impl ValueBridge for TextBridge {
	fn to_control(&self, option: &OptionEntry) -> ControlValue {
		ControlValue::Text(option.value().as_str().unwrap_or_default().to_string())
	}

	fn from_control(&self, option: &OptionEntry, shown: Option<ControlValue>) -> OptionValue {
		let text = match shown {
			Some(ControlValue::Text(text)) => text,
			_ => option.value().as_str().unwrap_or_default().to_string(),
		};
		match option.ui_type().value_kind() {
			ValueKind::Query => OptionValue::Query(text),
			_ => OptionValue::String(text),
		}
	}
}

struct NumberBridge;

impl ValueBridge for NumberBridge {
	fn to_control(&self, option: &OptionEntry) -> ControlValue {
		ControlValue::Number(option.value().as_number().unwrap_or(0.0))
	}

	fn from_control(&self, option: &OptionEntry, shown: Option<ControlValue>) -> OptionValue {
		let n = match shown {
			Some(ControlValue::Number(n)) if n.is_finite() => n,
			_ => option.value().as_number().unwrap_or(0.0),
		};
		OptionValue::Number(n)
	}
}

/// Absolute dates as seconds, relative dates as an index into the offered
/// periods, and both together for `DateBoth`.
struct DateBridge;

impl DateBridge {
	fn current(option: &OptionEntry) -> DateValue {
		match option.value() {
			OptionValue::Date(d) => *d,
			_ => DateValue::Absolute(0),
		}
	}

	fn relative_index(option: &OptionEntry, value: DateValue) -> Option<usize> {
		match value {
			DateValue::Relative(p) => option.constraint().relative_periods().iter().position(|&q| q == p),
			DateValue::Absolute(_) => None,
		}
	}

	fn relative_at(option: &OptionEntry, index: usize) -> Option<DateValue> {
		option
			.constraint()
			.relative_periods()
			.get(index)
			.copied()
			.map(DateValue::Relative)
	}
}

impl ValueBridge for DateBridge {
	fn to_control(&self, option: &OptionEntry) -> ControlValue {
		let current = Self::current(option);
		match option.ui_type() {
			OptionUiType::DateRelative => ControlValue::Index(Self::relative_index(option, current)),
			OptionUiType::DateBoth => ControlValue::DateChoice {
				use_absolute: matches!(current, DateValue::Absolute(_)),
				absolute: match current {
					DateValue::Absolute(secs) => secs,
					DateValue::Relative(_) => 0,
				},
				relative: Self::relative_index(option, current).unwrap_or(0),
			},
			_ => match current {
				DateValue::Absolute(secs) => ControlValue::Date(secs),
				DateValue::Relative(_) => ControlValue::Date(0),
			},
		}
	}

	fn from_control(&self, option: &OptionEntry, shown: Option<ControlValue>) -> OptionValue {
		let current = Self::current(option);
		let value = match (option.ui_type(), shown) {
			(OptionUiType::DateRelative, Some(ControlValue::Index(Some(i)))) => {
				Self::relative_at(option, i).unwrap_or(current)
			}
			(
				OptionUiType::DateBoth,
				Some(ControlValue::DateChoice {
					use_absolute,
					absolute,
					relative,
				}),
			) => {
				if use_absolute {
					DateValue::Absolute(absolute)
				} else {
					Self::relative_at(option, relative).unwrap_or(current)
				}
			}
			(OptionUiType::DateAbsolute | OptionUiType::DateBoth, Some(ControlValue::Date(secs))) => {
				DateValue::Absolute(secs)
			}
			_ => current,
		};
		OptionValue::Date(value)
	}
}

/// Multichoice and radio options: the control shows the index of the chosen
/// key among the option's choices.
struct ChoiceBridge;

impl ValueBridge for ChoiceBridge {
	fn to_control(&self, option: &OptionEntry) -> ControlValue {
		let index = option
			.value()
			.as_str()
			.and_then(|key| option.constraint().choice_index(key));
		ControlValue::Index(index)
	}

	fn from_control(&self, option: &OptionEntry, shown: Option<ControlValue>) -> OptionValue {
		let choices = option.constraint().choices();
		let picked = match shown {
			Some(ControlValue::Index(Some(i))) => choices.get(i),
			_ => None,
		};
		match picked {
			Some(choice) => OptionValue::Choice(choice.key.clone()),
			None => option.value().clone(),
		}
	}
}

struct ListBridge;

impl ValueBridge for ListBridge {
	fn to_control(&self, option: &OptionEntry) -> ControlValue {
		let rows = match option.value() {
			OptionValue::List(keys) => keys
				.iter()
				.filter_map(|k| option.constraint().choice_index(k))
				.collect(),
			_ => Vec::new(),
		};
		ControlValue::Indices(rows)
	}

	fn from_control(&self, option: &OptionEntry, shown: Option<ControlValue>) -> OptionValue {
		let choices = option.constraint().choices();
		match shown {
			Some(ControlValue::Indices(rows)) => OptionValue::List(
				rows.iter()
					.filter_map(|&i| choices.get(i))
					.map(|c| c.key.clone())
					.collect(),
			),
			_ => option.value().clone(),
		}
	}
}

struct ColorBridge;

impl ValueBridge for ColorBridge {
	fn to_control(&self, option: &OptionEntry) -> ControlValue {
		match option.value() {
			OptionValue::Color(c) => ControlValue::Color(c.to_array()),
			_ => ControlValue::Color(Rgba::default().to_array()),
		}
	}

	fn from_control(&self, option: &OptionEntry, shown: Option<ControlValue>) -> OptionValue {
		match shown {
			Some(ControlValue::Color(rgba)) => OptionValue::Color(Rgba::from_array(rgba)),
			_ => option.value().clone(),
		}
	}
}

struct CommodityBridge;

impl ValueBridge for CommodityBridge {
	fn to_control(&self, option: &OptionEntry) -> ControlValue {
		let mnemonic = option.value().as_str().filter(|s| !s.is_empty());
		ControlValue::Selection(mnemonic.map(str::to_string))
	}

	fn from_control(&self, _option: &OptionEntry, shown: Option<ControlValue>) -> OptionValue {
		match shown {
			Some(ControlValue::Selection(Some(m))) => OptionValue::Commodity(m),
			_ => OptionValue::Commodity(String::new()),
		}
	}
}

/// Single account or business object, shown as its GUID.
struct GuidBridge;

impl ValueBridge for GuidBridge {
	fn to_control(&self, option: &OptionEntry) -> ControlValue {
		let guid = match option.value() {
			OptionValue::Account(g) | OptionValue::Instance(g) => *g,
			_ => None,
		};
		ControlValue::Selection(guid.map(|g| g.to_string()))
	}

	fn from_control(&self, option: &OptionEntry, shown: Option<ControlValue>) -> OptionValue {
		let guid = match shown {
			Some(ControlValue::Selection(Some(s))) => Guid::parse_str(&s).ok(),
			_ => None,
		};
		match option.ui_type().value_kind() {
			ValueKind::Account => OptionValue::Account(guid),
			_ => OptionValue::Instance(guid),
		}
	}
}

struct GuidListBridge;

impl ValueBridge for GuidListBridge {
	fn to_control(&self, option: &OptionEntry) -> ControlValue {
		let ids = match option.value() {
			OptionValue::AccountList(ids) => ids.iter().map(Guid::to_string).collect(),
			_ => Vec::new(),
		};
		ControlValue::Selections(ids)
	}

	fn from_control(&self, _option: &OptionEntry, shown: Option<ControlValue>) -> OptionValue {
		let ids = match shown {
			Some(ControlValue::Selections(ids)) => ids
				.iter()
				.filter_map(|s| Guid::parse_str(s).ok())
				.collect(),
			_ => Vec::new(),
		};
		OptionValue::AccountList(ids)
	}
}

struct PlotSizeBridge;

impl ValueBridge for PlotSizeBridge {
	fn to_control(&self, option: &OptionEntry) -> ControlValue {
		let size = match option.value() {
			OptionValue::PlotSize(s) => *s,
			_ => PlotSize::default(),
		};
		ControlValue::PlotSize {
			percent: size.percent,
			value: size.value,
		}
	}

	fn from_control(&self, option: &OptionEntry, shown: Option<ControlValue>) -> OptionValue {
		match shown {
			Some(ControlValue::PlotSize { percent, value }) if value.is_finite() && value > 0.0 => {
				OptionValue::PlotSize(PlotSize { percent, value })
			}
			_ => option.value().clone(),
		}
	}
}

/// Format and month style as indices into their enumerations.
struct DateFormatBridge;

impl ValueBridge for DateFormatBridge {
	fn to_control(&self, option: &OptionEntry) -> ControlValue {
		let spec = match option.value() {
			OptionValue::DateFormat(spec) => spec.clone(),
			_ => DateFormatSpec::default(),
		};
		ControlValue::DateFormat {
			format: DateFormatStyle::iter()
				.position(|f| f == spec.format)
				.unwrap_or(0),
			months: MonthFormat::iter()
				.position(|m| m == spec.months)
				.unwrap_or(0),
			years: spec.years,
			custom: spec.custom,
		}
	}

	fn from_control(&self, option: &OptionEntry, shown: Option<ControlValue>) -> OptionValue {
		let Some(ControlValue::DateFormat {
			format,
			months,
			years,
			custom,
		}) = shown
		else {
			return option.value().clone();
		};
		OptionValue::DateFormat(DateFormatSpec {
			format: DateFormatStyle::iter()
				.nth(format)
				.unwrap_or(DateFormatStyle::Locale),
			months: MonthFormat::iter().nth(months).unwrap_or(MonthFormat::Number),
			years,
			custom,
		})
	}
}

struct ReportListBridge;

impl ValueBridge for ReportListBridge {
	fn to_control(&self, option: &OptionEntry) -> ControlValue {
		let rows = match option.value() {
			OptionValue::ReportList(reports) => reports
				.iter()
				.map(|r| (r.report_id, r.columns, r.rows))
				.collect(),
			_ => Vec::new(),
		};
		ControlValue::ReportList(rows)
	}

	fn from_control(&self, option: &OptionEntry, shown: Option<ControlValue>) -> OptionValue {
		match shown {
			Some(ControlValue::ReportList(rows)) => OptionValue::ReportList(
				rows.into_iter()
					.map(|(report_id, columns, rows)| ReportPlacement {
						report_id,
						columns,
						rows,
					})
					.collect(),
			),
			_ => option.value().clone(),
		}
	}
}
