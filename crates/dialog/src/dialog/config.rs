use std::rc::Rc;

use optdlg_toolkit::WidgetId;

use crate::ComponentManager;

/// Construction parameters for an [`OptionsDialog`](super::OptionsDialog).
#[derive(Debug, Clone, Default)]
pub struct DialogConfig {
	/// Block the application's other windows while open.
	pub modal: bool,
	pub title: String,
	/// Registers the dialog under this class for lookup by other subsystems.
	pub component_class: Option<String>,
	/// Makes the dialog transient to this window.
	pub parent: Option<WidgetId>,
	/// Host container to build into instead of a new window. An embedded
	/// dialog never destroys its host.
	pub embed: Option<WidgetId>,
	pub components: Option<Rc<ComponentManager>>,
}

impl DialogConfig {
	pub fn new(title: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			..Self::default()
		}
	}

	pub fn modal(mut self, modal: bool) -> Self {
		self.modal = modal;
		self
	}

	pub fn component_class(mut self, class: impl Into<String>) -> Self {
		self.component_class = Some(class.into());
		self
	}

	pub fn parent(mut self, parent: WidgetId) -> Self {
		self.parent = Some(parent);
		self
	}

	pub fn embed(mut self, host: WidgetId) -> Self {
		self.embed = Some(host);
		self
	}

	pub fn components(mut self, components: Rc<ComponentManager>) -> Self {
		self.components = Some(components);
		self
	}
}
