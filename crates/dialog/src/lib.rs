//! Options dialog: per-type widget factory and dialog lifecycle controller.
//!
//! Given an [`OptionDb`](optdlg_options::OptionDb), an [`OptionsDialog`]
//! builds one page per section and asks the [`WidgetFactory`] for a control
//! per option. Each control is bound to its option through a
//! [`WidgetUiItem`]; edits flow back through [`option_changed_widget`] and
//! [`option_changed_option`] into the dialog's dirty state.

pub mod book_defaults;
mod changed;
pub mod component;
pub mod dialog;
mod error;
pub mod factory;
pub mod ui_item;

pub use book_defaults::{PrefValue, PreferenceStore, Preferences, set_new_book_option_values};
pub use changed::{option_changed_option, option_changed_widget};
pub use component::{ComponentId, ComponentManager};
pub use dialog::{
	BOOK_OPTIONS_HELP, DialogCallback, DialogConfig, DialogEvent, DialogResponse, DialogState,
	MAX_TAB_COUNT, OptionsDialog, STYLE_SHEET_HELP,
};
pub use error::{BuildFailure, BuildReport, DialogError};
pub use factory::{CreateArgs, CreatedWidget, SharedFactory, WidgetCreateFn, WidgetFactory};
pub use ui_item::{ValueBridge, WidgetUiItem, bridge_for, ui_item_widget};
