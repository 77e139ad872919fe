use optdlg_options::{OptionError, OptionPath, OptionUiType};

/// Errors raised while building or driving an options dialog.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DialogError {
	/// The collection holds an option whose type has no widget constructor.
	#[error("no widget constructor registered for {ui_type} (option '{option}')")]
	UnregisteredOptionType {
		ui_type: OptionUiType,
		option: OptionPath,
	},

	#[error("dialog has been destroyed")]
	Destroyed,

	#[error(transparent)]
	Option(#[from] OptionError),
}

/// A control that could not be built.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildFailure {
	pub option: OptionPath,
	pub error: DialogError,
}

/// Outcome of populating a dialog.
///
/// Failures are per control; the rest of the dialog is still built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
	pub pages: usize,
	pub items: usize,
	pub failures: Vec<BuildFailure>,
}

impl BuildReport {
	pub fn is_complete(&self) -> bool {
		self.failures.is_empty()
	}
}
