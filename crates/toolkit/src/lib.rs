//! Toolkit boundary for the options dialog.
//!
//! The dialog never touches concrete widgets. It creates and wires controls
//! through the [`Toolkit`] trait and refers to them by opaque [`WidgetId`]
//! handles. [`HeadlessToolkit`] is an in-memory implementation used by tests
//! and the command-line driver.

use std::fmt;
use std::rc::Rc;

pub mod headless;
mod value;

pub use headless::HeadlessToolkit;
pub use value::{ControlValue, NumericRange};

/// Opaque handle to a toolkit widget.
///
/// Ids are allocated monotonically and never reused, so a handle kept past
/// its widget's destruction can never address a newer widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
	pub const fn from_raw(raw: u64) -> Self {
		Self(raw)
	}

	pub const fn raw(self) -> u64 {
		self.0
	}
}

impl fmt::Display for WidgetId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Which flavor of date a date control offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateMode {
	Absolute,
	Relative,
	Both,
}

/// Interactive controls, one per kind of value the dialog edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
	CheckButton,
	Entry,
	TextView,
	/// Commodity picker; `currency_only` restricts it to ISO currencies.
	CommodityEdit {
		currency_only: bool,
	},
	ComboBox,
	RadioGroup,
	DateEdit(DateMode),
	AccountTree,
	AccountSelect,
	ListView,
	SpinButton,
	ColorButton,
	FontButton,
	FileChooser,
	PlotSize,
	InstanceSelect,
	DateFormat,
	QueryView,
	ReportList,
	/// Never shown; holds a value without offering input.
	Hidden,
}

/// Everything the toolkit can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
	Window,
	/// Tabbed container of pages.
	Notebook,
	/// Scrollable list of page names beside the notebook.
	PageList,
	/// Grid laying out one section's labels and controls.
	Page,
	Label,
	Button,
	HBox,
	Frame,
	Control(ControlKind),
}

/// Where a child goes inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
	Grid { column: u32, row: u32, width: u32 },
	/// After the parent's existing children.
	Append,
}

/// Parameters for a top-level window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowSpec {
	pub title: String,
	/// Blocks input to the application's other windows while open.
	pub modal: bool,
	/// Keeps the window above this one.
	pub transient_for: Option<WidgetId>,
}

/// Operations the dialog needs from a windowing toolkit.
///
/// Calls on destroyed or unknown handles are no-ops, and queries on them
/// return neutral answers.
pub trait Toolkit {
	fn create_window(&self, spec: &WindowSpec) -> WidgetId;

	fn create(&self, kind: WidgetKind) -> WidgetId;

	/// Moves `child` under `parent`, detaching it from any previous parent.
	fn attach(&self, parent: WidgetId, child: WidgetId, placement: Placement);

	fn set_label(&self, widget: WidgetId, text: &str);

	fn set_tooltip(&self, widget: WidgetId, text: &str);

	fn set_sensitive(&self, widget: WidgetId, sensitive: bool);

	fn is_sensitive(&self, widget: WidgetId) -> bool;

	fn set_visible(&self, widget: WidgetId, visible: bool);

	fn is_visible(&self, widget: WidgetId) -> bool;

	/// Replaces the entries of a combo box, radio group or list control.
	fn set_items(&self, widget: WidgetId, items: &[String]);

	/// Bounds a numeric control.
	fn set_range(&self, widget: WidgetId, range: NumericRange);

	/// Current on-screen value of a control.
	fn value(&self, widget: WidgetId) -> Option<ControlValue>;

	fn set_value(&self, widget: WidgetId, value: ControlValue);

	fn children(&self, widget: WidgetId) -> Vec<WidgetId>;

	/// Destroys a widget and everything under it.
	fn destroy(&self, widget: WidgetId);

	fn is_alive(&self, widget: WidgetId) -> bool;

	fn set_show_tabs(&self, notebook: WidgetId, show: bool);

	fn set_current_page(&self, notebook: WidgetId, page: usize);

	/// Opens the help browser on a topic.
	fn show_help(&self, topic: &str);
}

/// Shared handle to a toolkit.
pub type ToolkitRef = Rc<dyn Toolkit>;
