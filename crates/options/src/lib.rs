//! Option model consumed by the options dialog.
//!
//! An option is a named, typed, documented value living in a section of an
//! [`OptionDb`]. Each option declares an [`OptionUiType`] that selects the
//! control used to edit it, and may carry one live [`OptionUiItem`] binding
//! it to that control.

pub mod db;
pub mod entry;
pub mod error;
pub mod parse;
pub mod ui_type;
pub mod value;

pub use db::{INTERNAL_SECTION_PREFIX, OptionDb, OptionSection};
pub use entry::{
	Choice, EnablePredicate, OptionConstraint, OptionEntry, OptionPath, OptionUiItem, PrefKey,
};
pub use error::OptionError;
pub use ui_type::{OptionUiType, ValueKind};
pub use value::{
	DateFormatSpec, DateFormatStyle, DateValue, Guid, MonthFormat, OptionValue, PlotSize,
	RelativeDatePeriod, ReportPlacement, Rgba,
};

/// Collection shared between its owner and an open dialog.
pub type SharedOptionDb = std::rc::Rc<std::cell::RefCell<OptionDb>>;

/// Wraps a collection for sharing with a dialog.
pub fn shared(db: OptionDb) -> SharedOptionDb {
	std::rc::Rc::new(std::cell::RefCell::new(db))
}
