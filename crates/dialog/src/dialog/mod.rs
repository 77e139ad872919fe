//! The options dialog controller.
//!
//! An [`OptionsDialog`] owns a window with a notebook of pages, a page list
//! and the help/cancel/apply/OK buttons. [`OptionsDialog::build_contents`]
//! fills it from an option collection, one page per section and one control
//! per option. Toolkit events come back in through
//! [`OptionsDialog::handle_event`].

use std::rc::Rc;

use optdlg_options::{OptionError, OptionPath, SharedOptionDb};
use optdlg_toolkit::{Placement, ToolkitRef, WidgetId, WidgetKind, WindowSpec};
use rustc_hash::FxHashMap;
use tracing::{debug, error, info, trace, warn};

use crate::factory::{CreateArgs, SharedFactory, WidgetFactory};
use crate::ui_item::ui_item_widget;
use crate::{
	BuildFailure, BuildReport, ComponentId, ComponentManager, DialogError, option_changed_option,
	option_changed_widget,
};

mod callbacks;
mod config;

use callbacks::{CallbackSlot, Slot};
pub use callbacks::DialogCallback;
pub use config::DialogConfig;


/// Above this many pages the page list replaces the notebook tabs.
pub const MAX_TAB_COUNT: usize = 6;

/// Help topic for book options.
pub const BOOK_OPTIONS_HELP: &str = "Book Options";

/// Help topic for style sheets.
pub const STYLE_SHEET_HELP: &str = "Style Sheet";

const RESET_LABEL: &str = "Defaults";
const RESET_TOOLTIP: &str = "Reset all values to their defaults.";

/// The dialog's action buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogResponse {
	Help,
	Cancel,
	Apply,
	Ok,
}

/// Something the toolkit or another subsystem reports to the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
	/// The user edited a control.
	ControlChanged(WidgetId),
	Response(DialogResponse),
	/// A page's "Defaults" button was pressed.
	ResetPage(WidgetId),
	/// A row of the page list was picked.
	PageSelected(usize),
	/// The window manager asked to close the window.
	WindowDeleted,
	/// The window was destroyed by someone else.
	WindowDestroyed,
	/// The component manager asked the dialog to close.
	CloseRequested,
}

/// Lifecycle of a dialog session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
	/// Window and buttons exist but nothing has been built.
	Constructed,
	Populated,
	/// The user has edited something since population or the last apply.
	Interacting,
	Applied,
	Closed,
	Cancelled,
	Destroyed,
}

#[derive(Debug, Clone, Copy)]
struct ActionButtons {
	help: WidgetId,
	cancel: WidgetId,
	apply: WidgetId,
	ok: WidgetId,
}

impl ActionButtons {
	fn get(&self, response: DialogResponse) -> WidgetId {
		match response {
			DialogResponse::Help => self.help,
			DialogResponse::Cancel => self.cancel,
			DialogResponse::Apply => self.apply,
			DialogResponse::Ok => self.ok,
		}
	}
}

#[derive(Debug)]
struct Page {
	section: String,
	page: WidgetId,
	list_row: WidgetId,
	reset: WidgetId,
}

/// Controller for one options-editing window.
pub struct OptionsDialog {
	toolkit: ToolkitRef,
	factory: SharedFactory,
	components: Option<Rc<ComponentManager>>,
	component: Option<ComponentId>,
	window: Option<WidgetId>,
	toplevel: bool,
	/// Holds the page list and notebook.
	body: WidgetId,
	button_box: WidgetId,
	notebook: WidgetId,
	page_list: WidgetId,
	buttons: ActionButtons,
	db: Option<SharedOptionDb>,
	/// Collection that was borrowed elsewhere when teardown ran.
	unreleased: Option<SharedOptionDb>,
	pages: Vec<Page>,
	controls: FxHashMap<WidgetId, OptionPath>,
	current_page: usize,
	apply_cb: CallbackSlot,
	help_cb: CallbackSlot,
	close_cb: CallbackSlot,
	sensitive: bool,
	dirty: bool,
	state: DialogState,
	destroying: bool,
}

impl OptionsDialog {
	/// Creates the dialog's window and buttons, using the process-wide
	/// widget factory.
	pub fn new(toolkit: ToolkitRef, config: DialogConfig) -> Self {
		Self::with_factory(toolkit, config, WidgetFactory::global())
	}

	pub fn with_factory(toolkit: ToolkitRef, config: DialogConfig, factory: SharedFactory) -> Self {
		let toplevel = config.embed.is_none();
		let window = match config.embed {
			Some(host) => host,
			None => toolkit.create_window(&WindowSpec {
				title: config.title.clone(),
				modal: config.modal,
				transient_for: config.parent,
			}),
		};

		let body = toolkit.create(WidgetKind::HBox);
		let page_list = toolkit.create(WidgetKind::PageList);
		let notebook = toolkit.create(WidgetKind::Notebook);
		toolkit.set_visible(page_list, false);
		toolkit.attach(body, page_list, Placement::Append);
		toolkit.attach(body, notebook, Placement::Append);
		toolkit.attach(window, body, Placement::Append);

		let button_box = toolkit.create(WidgetKind::HBox);
		let button = |label: &str| {
			let b = toolkit.create(WidgetKind::Button);
			toolkit.set_label(b, label);
			toolkit.attach(button_box, b, Placement::Append);
			b
		};
		let buttons = ActionButtons {
			help: button("_Help"),
			cancel: button("_Cancel"),
			apply: button("_Apply"),
			ok: button("_OK"),
		};
		toolkit.attach(window, button_box, Placement::Append);
		toolkit.set_sensitive(buttons.apply, false);
		toolkit.set_sensitive(buttons.ok, false);

		let component = match (&config.components, &config.component_class) {
			(Some(components), Some(class)) => Some(components.register(class)),
			_ => None,
		};

		debug!(title = %config.title, toplevel, modal = config.modal, "options dialog created");
		Self {
			toolkit,
			factory,
			components: config.components,
			component,
			window: Some(window),
			toplevel,
			body,
			button_box,
			notebook,
			page_list,
			buttons,
			db: None,
			unreleased: None,
			pages: Vec::new(),
			controls: FxHashMap::default(),
			current_page: 0,
			apply_cb: CallbackSlot::default(),
			help_cb: CallbackSlot::default(),
			close_cb: CallbackSlot::default(),
			sensitive: true,
			dirty: false,
			state: DialogState::Constructed,
			destroying: false,
		}
	}

	pub fn toolkit(&self) -> &ToolkitRef {
		&self.toolkit
	}

	/// Replaces the factory used by later builds.
	pub fn set_factory(&mut self, factory: SharedFactory) {
		self.factory = factory;
	}

	/// The dialog's window, or its host container when embedded. `None` once
	/// torn down.
	pub fn window(&self) -> Option<WidgetId> {
		self.window
	}

	pub fn notebook(&self) -> WidgetId {
		self.notebook
	}

	pub fn page_list(&self) -> WidgetId {
		self.page_list
	}

	pub fn button(&self, response: DialogResponse) -> WidgetId {
		self.buttons.get(response)
	}

	/// Whether the dialog owns its window.
	pub fn is_toplevel(&self) -> bool {
		self.toplevel
	}

	pub fn state(&self) -> DialogState {
		self.state
	}

	pub fn is_destroyed(&self) -> bool {
		self.state == DialogState::Destroyed
	}

	/// Edited since population or the last apply.
	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	pub fn component_id(&self) -> Option<ComponentId> {
		self.component
	}

	/// The bound option collection.
	pub fn get_option_db(&self) -> Option<SharedOptionDb> {
		self.db.clone()
	}

	pub fn page_names(&self) -> Vec<&str> {
		self.pages.iter().map(|p| p.section.as_str()).collect()
	}

	pub fn page_widget(&self, section: &str) -> Option<WidgetId> {
		self.pages
			.iter()
			.find(|p| p.section == section)
			.map(|p| p.page)
	}

	/// The "Defaults" button of a section's page.
	pub fn reset_button(&self, section: &str) -> Option<WidgetId> {
		self.pages
			.iter()
			.find(|p| p.section == section)
			.map(|p| p.reset)
	}

	pub fn current_page(&self) -> usize {
		self.current_page
	}

	/// The option a control edits.
	pub fn option_for_widget(&self, widget: WidgetId) -> Option<&OptionPath> {
		self.controls.get(&widget)
	}

	/// The control currently bound to an option.
	pub fn widget_for_option(&self, path: &OptionPath) -> Option<WidgetId> {
		let db = self.db.as_ref()?.borrow();
		db.option(path)?.ui_item().and_then(ui_item_widget)
	}

	/// Builds one page per visible section and one control per option.
	///
	/// Contents from an earlier build are cleared first, so rebuilding never
	/// duplicates controls. A control that cannot be built is skipped and
	/// recorded in the report; the rest of its page is still populated.
	pub fn build_contents(
		&mut self,
		db: SharedOptionDb,
		show: bool,
	) -> Result<BuildReport, DialogError> {
		if self.is_destroyed() || self.destroying {
			return Err(DialogError::Destroyed);
		}
		self.clear_contents();
		self.db = Some(db.clone());

		let tk = self.toolkit.clone();
		let mut report = BuildReport::default();
		let default_section = {
			let mut db = db.borrow_mut();
			let default_section = db.default_section().map(str::to_string);
			for section in db.sections_mut() {
				if section.is_internal() {
					trace!(section = section.name(), "skipping internal section");
					continue;
				}
				let name = section.name().to_string();
				let page = tk.create(WidgetKind::Page);
				tk.set_label(page, &name);
				tk.attach(self.notebook, page, Placement::Append);
				let list_row = tk.create(WidgetKind::Label);
				tk.set_label(list_row, &name);
				tk.attach(self.page_list, list_row, Placement::Append);

				let mut row = 0;
				for option in section.options_mut() {
					if option.is_internal() {
						continue;
					}
					let label = tk.create(WidgetKind::Label);
					tk.set_label(label, option.name());
					let created = {
						let args = CreateArgs {
							toolkit: &tk,
							option: &*option,
							page,
							row,
							name_label: label,
							description: option.doc(),
						};
						self.factory.write().create(&args)
					};
					match created {
						Ok(created) => {
							if !created.packed {
								tk.attach(page, label, Placement::Grid { column: 0, row, width: 1 });
								tk.attach(page, created.outer(), Placement::Grid { column: 1, row, width: 1 });
							}
							tk.set_tooltip(created.outer(), option.doc());
							self.controls.insert(created.widget, option.path().clone());
							option.set_ui_item(Some(created.item));
							option.set_ui_item_from_option();
							report.items += 1;
							row += 1;
						}
						Err(e) => {
							tk.destroy(label);
							error!(
								section = %name,
								option = option.name(),
								ui_type = %option.ui_type(),
								error = %e,
								"failed to build option control"
							);
							report.failures.push(BuildFailure {
								option: option.path().clone(),
								error: e,
							});
						}
					}
				}

				let reset = tk.create(WidgetKind::Button);
				tk.set_label(reset, RESET_LABEL);
				tk.set_tooltip(reset, RESET_TOOLTIP);
				tk.attach(page, reset, Placement::Grid { column: 0, row, width: 2 });
				self.pages.push(Page {
					section: name,
					page,
					list_row,
					reset,
				});
			}
			default_section
		};

		report.pages = self.pages.len();
		let use_list = self.pages.len() > MAX_TAB_COUNT;
		tk.set_visible(self.page_list, use_list);
		tk.set_show_tabs(self.notebook, !use_list);

		let start = default_section
			.and_then(|s| self.pages.iter().position(|p| p.section == s))
			.unwrap_or(0);
		self.select_page(start);
		db.borrow().refresh_selectable();

		self.dirty = false;
		self.set_action_sensitivity(false);
		self.state = DialogState::Populated;
		if show && let Some(window) = self.window {
			tk.set_visible(window, true);
		}
		info!(
			pages = report.pages,
			items = report.items,
			failures = report.failures.len(),
			"options dialog populated"
		);
		Ok(report)
	}

	/// Releases every UI item and page from the previous build.
	fn clear_contents(&mut self) {
		if let Some(db) = self.db.take() {
			db.borrow_mut().clear_ui_items();
		}
		for page in self.pages.drain(..) {
			self.toolkit.destroy(page.page);
			self.toolkit.destroy(page.list_row);
		}
		self.controls.clear();
		self.current_page = 0;
	}

	/// Enables or disables the notebook, page list and every button at once.
	///
	/// Apply and OK are only re-enabled while there are unapplied edits.
	pub fn set_sensitive(&mut self, sensitive: bool) {
		self.sensitive = sensitive;
		for widget in [
			self.notebook,
			self.page_list,
			self.buttons.help,
			self.buttons.cancel,
		] {
			self.toolkit.set_sensitive(widget, sensitive);
		}
		self.set_action_sensitivity(self.dirty);
	}

	fn set_action_sensitivity(&self, enabled: bool) {
		let enabled = enabled && self.sensitive;
		self.toolkit.set_sensitive(self.buttons.apply, enabled);
		self.toolkit.set_sensitive(self.buttons.ok, enabled);
	}

	/// Marks the session edited. Repeated calls coalesce.
	pub fn changed(&mut self) {
		if self.is_destroyed() {
			return;
		}
		self.dirty = true;
		if matches!(self.state, DialogState::Populated | DialogState::Applied) {
			self.state = DialogState::Interacting;
		}
		self.set_action_sensitivity(true);
	}

	pub fn set_apply_cb(&mut self, callback: impl FnMut(&mut OptionsDialog) + 'static) {
		self.apply_cb.set(Box::new(callback));
	}

	pub fn set_help_cb(&mut self, callback: impl FnMut(&mut OptionsDialog) + 'static) {
		self.help_cb.set(Box::new(callback));
	}

	pub fn set_close_cb(&mut self, callback: impl FnMut(&mut OptionsDialog) + 'static) {
		self.close_cb.set(Box::new(callback));
	}

	pub fn has_close_cb(&self) -> bool {
		self.close_cb.is_set()
	}

	/// Runs the apply callback. Returns whether one was registered.
	pub fn call_apply_cb(&mut self) -> bool {
		self.call(Slot::Apply)
	}

	pub fn call_help_cb(&mut self) -> bool {
		self.call(Slot::Help)
	}

	pub fn call_close_cb(&mut self) -> bool {
		self.call(Slot::Close)
	}

	/// Installs a help callback opening the book options help.
	pub fn set_book_help_cb(&mut self) {
		self.set_help_cb(OptionsDialog::call_book_help_cb);
	}

	/// Opens the book options help.
	pub fn call_book_help_cb(&mut self) {
		self.toolkit.show_help(BOOK_OPTIONS_HELP);
	}

	/// Installs a help callback opening the style sheet help.
	pub fn set_style_sheet_help_cb(&mut self) {
		self.set_help_cb(OptionsDialog::call_style_sheet_help_cb);
	}

	pub fn call_style_sheet_help_cb(&mut self) {
		self.toolkit.show_help(STYLE_SHEET_HELP);
	}

	fn slot_mut(&mut self, slot: Slot) -> &mut CallbackSlot {
		match slot {
			Slot::Apply => &mut self.apply_cb,
			Slot::Help => &mut self.help_cb,
			Slot::Close => &mut self.close_cb,
		}
	}

	fn call(&mut self, slot: Slot) -> bool {
		if self.is_destroyed() {
			return false;
		}
		let Some((mut callback, generation)) = self.slot_mut(slot).take() else {
			trace!(?slot, "no callback registered");
			return false;
		};
		callback(self);
		if !self.is_destroyed() {
			self.slot_mut(slot).restore(callback, generation);
		}
		true
	}

	/// Reads every edited control back into the collection.
	///
	/// This is the usual body of an apply callback. Failures are logged and
	/// returned; the failing options stay marked changed.
	pub fn commit(&mut self) -> Vec<OptionError> {
		let Some(db) = self.db.clone() else {
			return Vec::new();
		};
		let failures = db.borrow_mut().commit();
		db.borrow().refresh_selectable();
		if !failures.is_empty() {
			warn!(failures = failures.len(), "some options were not committed");
		}
		failures
	}

	/// Shows page `index` in both the notebook and the page list.
	pub fn select_page(&mut self, index: usize) -> bool {
		if index >= self.pages.len() {
			return false;
		}
		self.toolkit.set_current_page(self.notebook, index);
		self.toolkit.set_current_page(self.page_list, index);
		self.current_page = index;
		true
	}

	/// Dispatches a toolkit event. Returns whether the dialog acted on it.
	pub fn handle_event(&mut self, event: DialogEvent) -> bool {
		if self.is_destroyed() {
			trace!(?event, "event for destroyed dialog");
			return false;
		}
		match event {
			DialogEvent::ControlChanged(widget) => option_changed_widget(self, widget),
			DialogEvent::Response(response) => {
				self.respond(response);
				true
			}
			DialogEvent::ResetPage(button) => self.reset_page(button),
			DialogEvent::PageSelected(index) => self.select_page(index),
			DialogEvent::WindowDeleted => {
				self.respond(DialogResponse::Cancel);
				true
			}
			DialogEvent::WindowDestroyed => {
				self.window = None;
				self.call_close_cb();
				self.destroy();
				true
			}
			DialogEvent::CloseRequested => {
				self.close();
				true
			}
		}
	}

	fn respond(&mut self, response: DialogResponse) {
		debug!(?response, "dialog response");
		match response {
			DialogResponse::Help => {
				self.call_help_cb();
			}
			DialogResponse::Cancel => {
				self.state = DialogState::Cancelled;
				self.close();
			}
			DialogResponse::Apply => self.apply(),
			DialogResponse::Ok => {
				self.apply();
				self.close();
			}
		}
	}

	fn apply(&mut self) {
		self.dirty = false;
		self.set_action_sensitivity(false);
		self.state = DialogState::Applied;
		self.call_apply_cb();
	}

	/// Runs the close callback, or hides the window when none is set.
	fn close(&mut self) {
		if self.is_destroyed() {
			return;
		}
		if self.state != DialogState::Cancelled {
			self.state = DialogState::Closed;
		}
		if !self.call_close_cb()
			&& self.toplevel
			&& let Some(window) = self.window
		{
			self.toolkit.set_visible(window, false);
		}
	}

	fn reset_page(&mut self, button: WidgetId) -> bool {
		let Some(section) = self
			.pages
			.iter()
			.find(|p| p.reset == button)
			.map(|p| p.section.clone())
		else {
			return false;
		};
		let Some(db) = self.db.clone() else {
			return false;
		};
		let reset = db.borrow_mut().reset_section_defaults(&section);
		debug!(section = %section, reset = reset.len(), "section reset to defaults");
		for path in &reset {
			option_changed_option(self, path);
		}
		true
	}

	/// Tears the dialog down.
	///
	/// Unregisters from the component manager, clears every UI item and
	/// destroys the window. An embedded dialog removes its own contents from
	/// the host instead and leaves the host alive. Calls after the first are
	/// no-ops.
	pub fn destroy(&mut self) {
		if self.destroying || self.is_destroyed() {
			return;
		}
		self.destroying = true;

		if let Some(id) = self.component.take()
			&& let Some(components) = &self.components
		{
			components.unregister(id);
		}
		if let Some(db) = self.db.take() {
			match db.try_borrow_mut() {
				Ok(mut db) => db.clear_ui_items(),
				Err(_) => {
					warn!("option collection busy during teardown, releasing ui items later");
					self.unreleased = Some(Rc::clone(&db));
				}
			}
		}
		self.pages.clear();
		self.controls.clear();
		self.apply_cb = CallbackSlot::default();
		self.help_cb = CallbackSlot::default();
		self.close_cb = CallbackSlot::default();
		match self.window.take() {
			Some(window) if self.toplevel => self.toolkit.destroy(window),
			_ if !self.toplevel => {
				self.toolkit.destroy(self.body);
				self.toolkit.destroy(self.button_box);
			}
			_ => {}
		}

		self.state = DialogState::Destroyed;
		self.destroying = false;
		debug!("options dialog destroyed");
	}
}

impl OptionsDialog {
	/// Drops the UI items teardown could not reach.
	///
	/// Only items whose control is gone are released, so a collection that
	/// was rebound to another dialog in the meantime keeps its new items.
	fn release_deferred(&mut self) {
		let Some(db) = self.unreleased.take() else {
			return;
		};
		let Ok(mut db) = db.try_borrow_mut() else {
			error!("option collection still busy, ui items stay bound");
			return;
		};
		let mut released = 0;
		for option in db.options_mut() {
			if option.ui_item().is_some_and(|item| !item.is_live()) {
				option.set_ui_item(None);
				released += 1;
			}
		}
		debug!(released, "released deferred ui items");
	}
}

impl Drop for OptionsDialog {
	fn drop(&mut self) {
		self.destroy();
		self.release_deferred();
	}
}
