use super::OptionsDialog;

/// Callback run with the dialog that owns it. Any user data is captured by
/// the closure.
pub type DialogCallback = Box<dyn FnMut(&mut OptionsDialog)>;

/// One overwrite-only callback slot.
///
/// While a callback runs it is taken out of its slot; it is put back
/// afterwards unless the callback registered a replacement meanwhile.
#[derive(Default)]
pub(super) struct CallbackSlot {
	callback: Option<DialogCallback>,
	generation: u64,
}

impl CallbackSlot {
	pub(super) fn set(&mut self, callback: DialogCallback) {
		self.callback = Some(callback);
		self.generation += 1;
	}

	pub(super) fn is_set(&self) -> bool {
		self.callback.is_some()
	}

	pub(super) fn take(&mut self) -> Option<(DialogCallback, u64)> {
		self.callback.take().map(|cb| (cb, self.generation))
	}

	pub(super) fn restore(&mut self, callback: DialogCallback, generation: u64) {
		if self.generation == generation && self.callback.is_none() {
			self.callback = Some(callback);
		}
	}
}

/// Which slot a callback lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Slot {
	Apply,
	Help,
	Close,
}
