//! Host-side option values.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::ui_type::{OptionUiType, ValueKind};

#[cfg(test)]
mod tests;

/// Identifier of a book object (account, budget, owner, invoice, ...).
pub type Guid = Uuid;

/// The value of an option.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
	Bool(bool),
	String(String),
	Number(f64),
	Date(DateValue),
	/// Key of the selected choice.
	Choice(String),
	/// Keys of the selected list entries.
	List(Vec<String>),
	Color(Rgba),
	/// Commodity or currency mnemonic.
	Commodity(String),
	Account(Option<Guid>),
	AccountList(Vec<Guid>),
	Instance(Option<Guid>),
	PlotSize(PlotSize),
	DateFormat(DateFormatSpec),
	ReportList(Vec<ReportPlacement>),
	/// Serialized query.
	Query(String),
}

impl OptionValue {
	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			OptionValue::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the number if this is a `Number` variant.
	pub fn as_number(&self) -> Option<f64> {
		match self {
			OptionValue::Number(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the text of string-like variants.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			OptionValue::String(v)
			| OptionValue::Choice(v)
			| OptionValue::Commodity(v)
			| OptionValue::Query(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the kind of this value.
	pub fn kind(&self) -> ValueKind {
		match self {
			OptionValue::Bool(_) => ValueKind::Bool,
			OptionValue::String(_) => ValueKind::String,
			OptionValue::Number(_) => ValueKind::Number,
			OptionValue::Date(_) => ValueKind::Date,
			OptionValue::Choice(_) => ValueKind::Choice,
			OptionValue::List(_) => ValueKind::List,
			OptionValue::Color(_) => ValueKind::Color,
			OptionValue::Commodity(_) => ValueKind::Commodity,
			OptionValue::Account(_) => ValueKind::Account,
			OptionValue::AccountList(_) => ValueKind::AccountList,
			OptionValue::Instance(_) => ValueKind::Instance,
			OptionValue::PlotSize(_) => ValueKind::PlotSize,
			OptionValue::DateFormat(_) => ValueKind::DateFormat,
			OptionValue::ReportList(_) => ValueKind::ReportList,
			OptionValue::Query(_) => ValueKind::Query,
		}
	}

	/// Returns true if this value can be stored in an option of the given type.
	pub fn matches_type(&self, ty: OptionUiType) -> bool {
		if self.kind() != ty.value_kind() {
			return false;
		}
		match (self, ty) {
			(OptionValue::Date(DateValue::Relative(_)), OptionUiType::DateAbsolute) => false,
			(OptionValue::Date(DateValue::Absolute(_)), OptionUiType::DateRelative) => false,
			_ => true,
		}
	}

	/// Returns the type name of this value.
	pub fn type_name(&self) -> &'static str {
		match self {
			OptionValue::Bool(_) => "bool",
			OptionValue::String(_) => "string",
			OptionValue::Number(_) => "number",
			OptionValue::Date(_) => "date",
			OptionValue::Choice(_) => "choice",
			OptionValue::List(_) => "list",
			OptionValue::Color(_) => "color",
			OptionValue::Commodity(_) => "commodity",
			OptionValue::Account(_) => "account",
			OptionValue::AccountList(_) => "account list",
			OptionValue::Instance(_) => "instance",
			OptionValue::PlotSize(_) => "plot size",
			OptionValue::DateFormat(_) => "date format",
			OptionValue::ReportList(_) => "report list",
			OptionValue::Query(_) => "query",
		}
	}

	/// A neutral value for the given type, used when an option is declared
	/// without a default.
	pub fn empty_for(ty: OptionUiType) -> Self {
		match ty.value_kind() {
			ValueKind::Bool => OptionValue::Bool(false),
			ValueKind::String => OptionValue::String(String::new()),
			ValueKind::Number => OptionValue::Number(0.0),
			ValueKind::Date => match ty {
				OptionUiType::DateRelative => {
					OptionValue::Date(DateValue::Relative(RelativeDatePeriod::Today))
				}
				_ => OptionValue::Date(DateValue::Absolute(0)),
			},
			ValueKind::Choice => OptionValue::Choice(String::new()),
			ValueKind::List => OptionValue::List(Vec::new()),
			ValueKind::Color => OptionValue::Color(Rgba::default()),
			ValueKind::Commodity => OptionValue::Commodity(String::new()),
			ValueKind::Account => OptionValue::Account(None),
			ValueKind::AccountList => OptionValue::AccountList(Vec::new()),
			ValueKind::Instance => OptionValue::Instance(None),
			ValueKind::PlotSize => OptionValue::PlotSize(PlotSize::default()),
			ValueKind::DateFormat => OptionValue::DateFormat(DateFormatSpec::default()),
			ValueKind::ReportList => OptionValue::ReportList(Vec::new()),
			ValueKind::Query => OptionValue::Query(String::new()),
		}
	}
}

impl From<bool> for OptionValue {
	fn from(v: bool) -> Self {
		OptionValue::Bool(v)
	}
}

impl From<f64> for OptionValue {
	fn from(v: f64) -> Self {
		OptionValue::Number(v)
	}
}

impl From<String> for OptionValue {
	fn from(v: String) -> Self {
		OptionValue::String(v)
	}
}

impl From<&str> for OptionValue {
	fn from(v: &str) -> Self {
		OptionValue::String(v.to_string())
	}
}

impl From<Rgba> for OptionValue {
	fn from(v: Rgba) -> Self {
		OptionValue::Color(v)
	}
}

impl From<DateValue> for OptionValue {
	fn from(v: DateValue) -> Self {
		OptionValue::Date(v)
	}
}

/// A date option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateValue {
	/// Seconds since the Unix epoch.
	Absolute(i64),
	Relative(RelativeDatePeriod),
}

/// Date periods resolved relative to today.
#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	Hash,
	Display,
	EnumIter,
	EnumString,
	IntoStaticStr,
	Serialize,
	Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum RelativeDatePeriod {
	Today,
	OneWeekAgo,
	OneWeekAhead,
	OneMonthAgo,
	OneMonthAhead,
	OneYearAgo,
	OneYearAhead,
	StartThisMonth,
	EndThisMonth,
	StartPrevMonth,
	EndPrevMonth,
	StartNextMonth,
	EndNextMonth,
	StartCurrentQuarter,
	EndCurrentQuarter,
	StartPrevQuarter,
	EndPrevQuarter,
	StartCalYear,
	EndCalYear,
	StartPrevYear,
	EndPrevYear,
	StartAccountingPeriod,
	EndAccountingPeriod,
}

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: u8,
}

impl Default for Rgba {
	fn default() -> Self {
		Self {
			r: 0,
			g: 0,
			b: 0,
			a: 0xff,
		}
	}
}

impl Rgba {
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self { r, g, b, a }
	}

	pub const fn to_array(self) -> [u8; 4] {
		[self.r, self.g, self.b, self.a]
	}

	pub const fn from_array([r, g, b, a]: [u8; 4]) -> Self {
		Self { r, g, b, a }
	}
}

impl std::fmt::Display for Rgba {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
	}
}

/// Chart size, either in pixels or as a percentage of the available space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotSize {
	pub percent: bool,
	pub value: f64,
}

impl Default for PlotSize {
	fn default() -> Self {
		Self {
			percent: true,
			value: 100.0,
		}
	}
}

/// Date display format plus the month/year rendering flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFormatSpec {
	pub format: DateFormatStyle,
	pub months: MonthFormat,
	pub years: bool,
	/// strftime-style pattern used when `format` is `Custom`.
	pub custom: String,
}

impl Default for DateFormatSpec {
	fn default() -> Self {
		Self {
			format: DateFormatStyle::Locale,
			months: MonthFormat::Number,
			years: true,
			custom: String::new(),
		}
	}
}

#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	Display,
	EnumIter,
	EnumString,
	IntoStaticStr,
	Serialize,
	Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DateFormatStyle {
	Us,
	Uk,
	Ce,
	Iso,
	Locale,
	Utc,
	Custom,
}

#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	Display,
	EnumIter,
	EnumString,
	IntoStaticStr,
	Serialize,
	Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MonthFormat {
	Number,
	Abbrev,
	Name,
}

/// One report in a multi-column report layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPlacement {
	pub report_id: u32,
	pub columns: u32,
	pub rows: u32,
}
