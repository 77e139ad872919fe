//! The option collection: options grouped into named sections.

use tracing::{debug, warn};

use crate::{OptionEntry, OptionError, OptionPath, OptionValue};

#[cfg(test)]
mod tests;

/// Prefix marking sections that are stored but never shown.
pub const INTERNAL_SECTION_PREFIX: &str = "__";

/// A named group of options, kept ordered by option sort key.
#[derive(Debug)]
pub struct OptionSection {
	name: String,
	options: Vec<OptionEntry>,
}

impl OptionSection {
	fn new(name: String) -> Self {
		Self {
			name,
			options: Vec::new(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Internal sections never get a dialog page.
	pub fn is_internal(&self) -> bool {
		self.name.starts_with(INTERNAL_SECTION_PREFIX)
	}

	pub fn options(&self) -> &[OptionEntry] {
		&self.options
	}

	pub fn options_mut(&mut self) -> impl Iterator<Item = &mut OptionEntry> {
		self.options.iter_mut()
	}

	pub fn find(&self, name: &str) -> Option<&OptionEntry> {
		self.options.iter().find(|o| o.name() == name)
	}

	pub fn find_mut(&mut self, name: &str) -> Option<&mut OptionEntry> {
		self.options.iter_mut().find(|o| o.name() == name)
	}

	pub fn len(&self) -> usize {
		self.options.len()
	}

	pub fn is_empty(&self) -> bool {
		self.options.is_empty()
	}

	fn insert(&mut self, option: OptionEntry) {
		let pos = self.options.partition_point(|o| o.key() <= option.key());
		self.options.insert(pos, option);
	}
}

/// An externally owned set of options grouped into sections.
///
/// Sections are ordered by name and options within a section by their sort
/// key; every traversal (including dialog population) follows that order.
#[derive(Debug, Default)]
pub struct OptionDb {
	sections: Vec<OptionSection>,
	default_section: Option<String>,
}

impl OptionDb {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds an option, creating its section on first use.
	///
	/// The option's default must satisfy its own type and constraint.
	pub fn register_option(&mut self, option: OptionEntry) -> Result<(), OptionError> {
		option.validate(option.default_value())?;
		if self.option(option.path()).is_some() {
			return Err(OptionError::DuplicateOption(option.path().clone()));
		}
		debug!(
			section = option.section(),
			option = option.name(),
			ui_type = %option.ui_type(),
			"registering option"
		);
		let section = match self
			.sections
			.binary_search_by(|s| s.name.as_str().cmp(option.section()))
		{
			Ok(idx) => &mut self.sections[idx],
			Err(idx) => {
				self.sections
					.insert(idx, OptionSection::new(option.section().to_string()));
				&mut self.sections[idx]
			}
		};
		section.insert(option);
		Ok(())
	}

	pub fn sections(&self) -> &[OptionSection] {
		&self.sections
	}

	pub fn sections_mut(&mut self) -> impl Iterator<Item = &mut OptionSection> {
		self.sections.iter_mut()
	}

	pub fn section(&self, name: &str) -> Option<&OptionSection> {
		self.sections.iter().find(|s| s.name == name)
	}

	pub fn section_mut(&mut self, name: &str) -> Option<&mut OptionSection> {
		self.sections.iter_mut().find(|s| s.name == name)
	}

	/// Section whose page is selected when a dialog opens.
	pub fn set_default_section(&mut self, name: impl Into<String>) {
		self.default_section = Some(name.into());
	}

	pub fn default_section(&self) -> Option<&str> {
		self.default_section.as_deref()
	}

	pub fn find_option(&self, section: &str, name: &str) -> Option<&OptionEntry> {
		self.section(section)?.find(name)
	}

	pub fn find_option_mut(&mut self, section: &str, name: &str) -> Option<&mut OptionEntry> {
		self.section_mut(section)?.find_mut(name)
	}

	pub fn option(&self, path: &OptionPath) -> Option<&OptionEntry> {
		self.find_option(&path.section, &path.name)
	}

	pub fn option_mut(&mut self, path: &OptionPath) -> Option<&mut OptionEntry> {
		self.find_option_mut(&path.section, &path.name)
	}

	/// All options in section/option order.
	pub fn options(&self) -> impl Iterator<Item = &OptionEntry> {
		self.sections.iter().flat_map(|s| s.options.iter())
	}

	pub fn options_mut(&mut self) -> impl Iterator<Item = &mut OptionEntry> {
		self.sections.iter_mut().flat_map(|s| s.options.iter_mut())
	}

	pub fn len(&self) -> usize {
		self.sections.iter().map(OptionSection::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn set_value(
		&mut self,
		path: &OptionPath,
		value: impl Into<OptionValue>,
	) -> Result<bool, OptionError> {
		self.option_mut(path)
			.ok_or_else(|| OptionError::UnknownOption(path.clone()))?
			.set_value(value.into())
	}

	pub fn reset_default(&mut self, path: &OptionPath) -> Result<bool, OptionError> {
		Ok(self
			.option_mut(path)
			.ok_or_else(|| OptionError::UnknownOption(path.clone()))?
			.reset_default())
	}

	/// Resets every option in a section to its default and refreshes the live
	/// controls. Options whose value moved are marked changed; their paths
	/// are returned.
	pub fn reset_section_defaults(&mut self, section: &str) -> Vec<OptionPath> {
		let Some(section) = self.section_mut(section) else {
			return Vec::new();
		};
		let mut reset = Vec::new();
		for option in section.options_mut() {
			if option.reset_default() {
				option.set_changed(true);
				option.set_ui_item_from_option();
				reset.push(option.path().clone());
			}
		}
		reset
	}

	/// Reads every changed option back from its control.
	///
	/// Failures do not stop the sweep; each is logged and returned, and the
	/// failing option stays marked changed.
	pub fn commit(&mut self) -> Vec<OptionError> {
		let mut failures = Vec::new();
		for option in self.options_mut().filter(|o| o.is_changed()) {
			match option.set_option_from_ui_item() {
				Ok(_) => option.set_changed(false),
				Err(e) => {
					warn!(option = %option.path(), error = %e, "option commit failed");
					failures.push(e);
				}
			}
		}
		failures
	}

	/// Applies each option's enablement predicate to its live control.
	pub fn refresh_selectable(&self) {
		for option in self.options() {
			option.set_ui_item_selectable(option.is_enabled(self));
		}
	}

	/// Clears and drops every UI item.
	pub fn clear_ui_items(&mut self) {
		for option in self.options_mut() {
			option.set_ui_item(None);
		}
	}

	/// Whether any option changed since it was last saved.
	pub fn is_dirty(&self) -> bool {
		self.options().any(OptionEntry::is_dirty)
	}

	pub fn mark_saved(&mut self) {
		for option in self.options_mut() {
			option.mark_saved();
		}
	}
}
