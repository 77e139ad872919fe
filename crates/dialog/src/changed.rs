//! Change notification entry points called when a control is edited.

use optdlg_options::OptionPath;
use optdlg_toolkit::WidgetId;
use tracing::{trace, warn};

use crate::OptionsDialog;

/// A raw control reported an edit.
///
/// Marks the control's option changed and notifies the dialog. Controls the
/// dialog does not know and internal options are ignored; returns whether the
/// edit was taken.
pub fn option_changed_widget(dialog: &mut OptionsDialog, widget: WidgetId) -> bool {
	let Some(path) = dialog.option_for_widget(widget).cloned() else {
		trace!(%widget, "change from unknown control");
		return false;
	};
	let Some(db) = dialog.get_option_db() else {
		return false;
	};
	{
		let mut db = db.borrow_mut();
		let Some(option) = db.option_mut(&path) else {
			warn!(option = %path, "control bound to a missing option");
			return false;
		};
		if option.is_internal() {
			return false;
		}
		option.set_changed(true);
	}
	option_changed_option(dialog, &path);
	true
}

/// An option's value was edited.
///
/// Marks the dialog changed and re-applies every enablement predicate, since
/// one option may gate others.
pub fn option_changed_option(dialog: &mut OptionsDialog, path: &OptionPath) {
	trace!(option = %path, "option changed");
	dialog.changed();
	if let Some(db) = dialog.get_option_db() {
		db.borrow().refresh_selectable();
	}
}
