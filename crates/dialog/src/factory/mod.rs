//! Widget factory: one constructor per option UI type.

use std::sync::{Arc, LazyLock};

use optdlg_options::{OptionEntry, OptionUiItem, OptionUiType};
use optdlg_toolkit::{ToolkitRef, WidgetId};
use parking_lot::RwLock;
use strum::{EnumCount, IntoEnumIterator};
use tracing::{debug, trace};

use crate::DialogError;

mod builtins;

pub use builtins::builtin_constructor;

#[cfg(test)]
mod tests;

/// Inputs handed to a widget constructor.
pub struct CreateArgs<'a> {
	pub toolkit: &'a ToolkitRef,
	pub option: &'a OptionEntry,
	/// Grid the row is placed in.
	pub page: WidgetId,
	pub row: u32,
	/// Label carrying the option's name, created by the caller.
	pub name_label: WidgetId,
	/// Tooltip text.
	pub description: &'a str,
}

/// A freshly built control.
pub struct CreatedWidget {
	pub widget: WidgetId,
	/// Decoration wrapping the control, placed in the layout instead of it.
	pub enclosing: Option<WidgetId>,
	/// The constructor already placed the control and the name label itself.
	pub packed: bool,
	pub item: Box<dyn OptionUiItem>,
}

impl CreatedWidget {
	/// The widget that goes into the page layout.
	pub fn outer(&self) -> WidgetId {
		self.enclosing.unwrap_or(self.widget)
	}
}

/// Builds and wires the control for one option.
pub type WidgetCreateFn = fn(&CreateArgs<'_>) -> Result<CreatedWidget, DialogError>;

pub type SharedFactory = Arc<RwLock<WidgetFactory>>;

static GLOBAL: LazyLock<SharedFactory> = LazyLock::new(|| Arc::new(RwLock::new(WidgetFactory::new())));

/// Table from option UI type to widget constructor.
///
/// A factory starts empty. The first [`create`](Self::create) fills every
/// slot that has no constructor yet with the built-in one, so constructors
/// registered beforehand with [`set_func`](Self::set_func) take precedence.
pub struct WidgetFactory {
	table: [Option<WidgetCreateFn>; OptionUiType::COUNT],
	initialized: bool,
}

impl std::fmt::Debug for WidgetFactory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WidgetFactory")
			.field("registered", &self.table.iter().flatten().count())
			.field("initialized", &self.initialized)
			.finish()
	}
}

impl Default for WidgetFactory {
	fn default() -> Self {
		Self::new()
	}
}

impl WidgetFactory {
	pub const fn new() -> Self {
		Self {
			table: [None; OptionUiType::COUNT],
			initialized: false,
		}
	}

	/// The process-wide factory.
	pub fn global() -> SharedFactory {
		GLOBAL.clone()
	}

	/// A factory for a single owner, for example one dialog under test.
	pub fn shared() -> SharedFactory {
		Arc::new(RwLock::new(Self::new()))
	}

	/// Registers `func` for `ty`, replacing any previous constructor.
	///
	/// Controls already built are unaffected.
	pub fn set_func(&mut self, ty: OptionUiType, func: WidgetCreateFn) {
		debug!(ui_type = %ty, replaced = self.table[ty.index()].is_some(), "registering widget constructor");
		self.table[ty.index()] = Some(func);
	}

	/// Removes the constructor for `ty`, returning it.
	pub fn unregister(&mut self, ty: OptionUiType) -> Option<WidgetCreateFn> {
		self.table[ty.index()].take()
	}

	pub fn func(&self, ty: OptionUiType) -> Option<WidgetCreateFn> {
		self.table[ty.index()]
	}

	pub fn is_initialized(&self) -> bool {
		self.initialized
	}

	/// Registers the built-in constructor in every empty slot. Runs once.
	pub fn initialize(&mut self) {
		if self.initialized {
			return;
		}
		let mut filled = 0;
		for ty in OptionUiType::iter() {
			let slot = &mut self.table[ty.index()];
			if slot.is_none() {
				*slot = Some(builtin_constructor(ty));
				filled += 1;
			}
		}
		self.initialized = true;
		debug!(filled, "widget factory initialized");
	}

	/// Types without a constructor.
	pub fn missing(&self) -> Vec<OptionUiType> {
		OptionUiType::iter()
			.filter(|ty| self.table[ty.index()].is_none())
			.collect()
	}

	/// Builds the control for `args.option`.
	///
	/// Constructor failures are returned unchanged.
	pub fn create(&mut self, args: &CreateArgs<'_>) -> Result<CreatedWidget, DialogError> {
		self.initialize();
		let ui_type = args.option.ui_type();
		let Some(func) = self.func(ui_type) else {
			return Err(DialogError::UnregisteredOptionType {
				ui_type,
				option: args.option.path().clone(),
			});
		};
		trace!(option = %args.option.path(), %ui_type, "creating widget");
		func(args)
	}
}
