//! The closed set of option UI types.

use strum_macros::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Identifies the kind of editing control an option needs.
///
/// The set is closed: every variant must have a widget constructor once the
/// widget factory has been initialized. Discriminants are dense and start at
/// zero so a tag can index a fixed-size table.
#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	Hash,
	PartialOrd,
	Ord,
	Display,
	EnumCount,
	EnumIter,
	EnumString,
	IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum OptionUiType {
	/// Stored in the collection but never shown.
	Internal,
	Boolean,
	String,
	/// Multi-line text.
	Text,
	Currency,
	Commodity,
	Multichoice,
	DateAbsolute,
	DateRelative,
	/// Absolute or relative, chosen by the user.
	DateBoth,
	AccountList,
	AccountSel,
	List,
	NumberRange,
	Color,
	Font,
	PlotSize,
	Budget,
	/// Path to an image file.
	Pixmap,
	Radiobutton,
	DateFormat,
	Owner,
	Customer,
	Vendor,
	Employee,
	Invoice,
	Job,
	TaxTable,
	InvReport,
	Query,
	ReportList,
}

/// The shape of value an option of a given UI type holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
	Bool,
	String,
	Number,
	Date,
	Choice,
	List,
	Color,
	Commodity,
	Account,
	AccountList,
	Instance,
	PlotSize,
	DateFormat,
	ReportList,
	Query,
}

impl OptionUiType {
	/// Index of this tag in a dense table.
	#[inline]
	pub const fn index(self) -> usize {
		self as usize
	}

	/// Returns the value kind carried by options of this type.
	pub const fn value_kind(self) -> ValueKind {
		match self {
			Self::Boolean => ValueKind::Bool,
			Self::Internal | Self::String | Self::Text | Self::Font | Self::Pixmap => {
				ValueKind::String
			}
			Self::Currency | Self::Commodity => ValueKind::Commodity,
			Self::Multichoice | Self::Radiobutton => ValueKind::Choice,
			Self::DateAbsolute | Self::DateRelative | Self::DateBoth => ValueKind::Date,
			Self::AccountList => ValueKind::AccountList,
			Self::AccountSel => ValueKind::Account,
			Self::List => ValueKind::List,
			Self::NumberRange => ValueKind::Number,
			Self::Color => ValueKind::Color,
			Self::PlotSize => ValueKind::PlotSize,
			Self::Budget
			| Self::Owner
			| Self::Customer
			| Self::Vendor
			| Self::Employee
			| Self::Invoice
			| Self::Job
			| Self::TaxTable
			| Self::InvReport => ValueKind::Instance,
			Self::DateFormat => ValueKind::DateFormat,
			Self::Query => ValueKind::Query,
			Self::ReportList => ValueKind::ReportList,
		}
	}

	/// Whether options of this type never get a control in the dialog.
	pub const fn is_internal(self) -> bool {
		matches!(self, Self::Internal)
	}

	/// Whether a stored preference can seed a new book's value of this type.
	pub const fn supports_preference_default(self) -> bool {
		matches!(
			self,
			Self::Boolean
				| Self::String
				| Self::Text
				| Self::NumberRange
				| Self::Multichoice
				| Self::Radiobutton
				| Self::Currency
				| Self::Commodity
				| Self::Color
				| Self::Font
		)
	}
}
