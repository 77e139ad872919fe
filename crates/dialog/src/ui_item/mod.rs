//! UI items: the binding between one option and one live control.

use std::any::Any;

use optdlg_options::{OptionEntry, OptionUiItem, OptionUiType, OptionValue};
use optdlg_toolkit::{ControlValue, ToolkitRef, WidgetId};
use tracing::trace;

mod bridges;

pub use bridges::{ValueBridge, bridge_for};

#[cfg(test)]
mod tests;

/// UI item owning one toolkit control.
///
/// The control itself belongs to the page layout; clearing the item only
/// forgets the handle. Type-specific conversions live in the [`ValueBridge`].
pub struct WidgetUiItem {
	toolkit: ToolkitRef,
	ui_type: OptionUiType,
	widget: Option<WidgetId>,
	bridge: Box<dyn ValueBridge>,
}

impl WidgetUiItem {
	pub fn new(
		toolkit: ToolkitRef,
		ui_type: OptionUiType,
		widget: WidgetId,
		bridge: Box<dyn ValueBridge>,
	) -> Self {
		Self {
			toolkit,
			ui_type,
			widget: Some(widget),
			bridge,
		}
	}

	/// Item using the built-in conversions for `ui_type`.
	pub fn with_default_bridge(toolkit: ToolkitRef, ui_type: OptionUiType, widget: WidgetId) -> Self {
		Self::new(toolkit, ui_type, widget, bridge_for(ui_type))
	}

	/// The owned control, or `None` once cleared.
	pub fn get_widget(&self) -> Option<WidgetId> {
		self.widget
	}
}

impl OptionUiItem for WidgetUiItem {
	fn ui_type(&self) -> OptionUiType {
		self.ui_type
	}

	fn set_selectable(&self, selectable: bool) {
		if let Some(widget) = self.widget {
			self.toolkit.set_sensitive(widget, selectable);
		}
	}

	fn clear_ui_item(&mut self) {
		if let Some(widget) = self.widget.take() {
			trace!(%widget, ui_type = %self.ui_type, "cleared ui item");
		}
	}

	fn is_live(&self) -> bool {
		self.widget.is_some_and(|w| self.toolkit.is_alive(w))
	}

	fn set_ui_item_from_option(&self, option: &OptionEntry) {
		if let Some(widget) = self.widget {
			self.toolkit
				.set_value(widget, self.bridge.to_control(option));
		}
	}

	fn get_option_value(&self, option: &OptionEntry) -> Option<OptionValue> {
		if !self.is_live() {
			return None;
		}
		let shown: Option<ControlValue> = self.widget.and_then(|w| self.toolkit.value(w));
		Some(self.bridge.from_control(option, shown))
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// Control handle of a UI item built by this crate.
pub fn ui_item_widget(item: &dyn OptionUiItem) -> Option<WidgetId> {
	item.as_any()
		.downcast_ref::<WidgetUiItem>()
		.and_then(WidgetUiItem::get_widget)
}
