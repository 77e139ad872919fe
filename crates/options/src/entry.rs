//! A single option and its binding to an editing control.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;

use crate::{DateValue, OptionDb, OptionError, OptionUiType, OptionValue, RelativeDatePeriod};

/// Identifies an option by section and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionPath {
	pub section: String,
	pub name: String,
}

impl OptionPath {
	pub fn new(section: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			section: section.into(),
			name: name.into(),
		}
	}
}

impl fmt::Display for OptionPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.section, self.name)
	}
}

/// Preference consulted when seeding a new book: (group, key).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrefKey {
	pub group: String,
	pub key: String,
}

impl PrefKey {
	pub fn new(group: impl Into<String>, key: impl Into<String>) -> Self {
		Self {
			group: group.into(),
			key: key.into(),
		}
	}
}

/// One entry of a multichoice, radio or list option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
	pub key: String,
	pub label: String,
	pub tip: String,
}

impl Choice {
	pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			label: label.into(),
			tip: String::new(),
		}
	}

	pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
		self.tip = tip.into();
		self
	}
}

/// Restriction on the values an option accepts.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionConstraint {
	#[default]
	None,
	Choices(Vec<Choice>),
	Range {
		min: f64,
		max: f64,
		step: f64,
		decimals: u8,
	},
	RelativePeriods(Vec<RelativeDatePeriod>),
}

impl OptionConstraint {
	/// Returns the choices, or an empty slice for other constraints.
	pub fn choices(&self) -> &[Choice] {
		match self {
			OptionConstraint::Choices(c) => c,
			_ => &[],
		}
	}

	/// Index of the choice with the given key.
	pub fn choice_index(&self, key: &str) -> Option<usize> {
		self.choices().iter().position(|c| c.key == key)
	}

	/// Relative periods offered to the user; all periods when unconstrained.
	pub fn relative_periods(&self) -> Vec<RelativeDatePeriod> {
		use strum::IntoEnumIterator;
		match self {
			OptionConstraint::RelativePeriods(p) => p.clone(),
			_ => RelativeDatePeriod::iter().collect(),
		}
	}
}

/// Decides whether an option's control accepts input, given the whole collection.
///
/// Predicates should read other options through
/// [`OptionEntry::effective_value`] to follow uncommitted edits.
pub type EnablePredicate = Box<dyn Fn(&OptionDb) -> bool>;

/// Binding between an option and one live editing control.
///
/// Implemented by the dialog layer; the option model only stores it and
/// forwards to it. Implementations must tolerate every call after
/// [`clear_ui_item`](Self::clear_ui_item), which may itself be called any
/// number of times.
pub trait OptionUiItem {
	/// The UI type the control renders.
	fn ui_type(&self) -> OptionUiType;

	/// Toggles whether the control accepts user input. No-op once cleared.
	fn set_selectable(&self, selectable: bool);

	/// Releases resources not owned by the surrounding layout and forgets the
	/// control handle.
	fn clear_ui_item(&mut self);

	/// Whether the item still holds a control.
	fn is_live(&self) -> bool;

	/// Pushes the option's current value into the control.
	fn set_ui_item_from_option(&self, option: &OptionEntry);

	/// Reads the control's on-screen state as a value of the option's type.
	///
	/// Returns `None` only when the item has been cleared.
	fn get_option_value(&self, option: &OptionEntry) -> Option<OptionValue>;

	fn as_any(&self) -> &dyn Any;
}

/// A named, typed, documented configurable value.
pub struct OptionEntry {
	path: OptionPath,
	key: String,
	doc: String,
	ui_type: OptionUiType,
	value: OptionValue,
	default: OptionValue,
	constraint: OptionConstraint,
	enabled: Option<EnablePredicate>,
	pref: Option<PrefKey>,
	changed: bool,
	dirty: bool,
	ui_item: Option<Box<dyn OptionUiItem>>,
}

impl fmt::Debug for OptionEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OptionEntry")
			.field("path", &self.path)
			.field("ui_type", &self.ui_type)
			.field("value", &self.value)
			.field("changed", &self.changed)
			.field("has_ui_item", &self.ui_item.is_some())
			.finish()
	}
}

impl OptionEntry {
	/// Creates an option holding the neutral value for its type.
	pub fn new(section: impl Into<String>, name: impl Into<String>, ui_type: OptionUiType) -> Self {
		let path = OptionPath::new(section, name);
		let empty = OptionValue::empty_for(ui_type);
		Self {
			key: path.name.clone(),
			path,
			doc: String::new(),
			ui_type,
			value: empty.clone(),
			default: empty,
			constraint: OptionConstraint::None,
			enabled: None,
			pref: None,
			changed: false,
			dirty: false,
			ui_item: None,
		}
	}

	/// Sets both the default and the current value.
	pub fn with_default(mut self, value: impl Into<OptionValue>) -> Self {
		let value = value.into();
		self.value = value.clone();
		self.default = value;
		self
	}

	pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
		self.doc = doc.into();
		self
	}

	/// Sort key within the section.
	pub fn with_key(mut self, key: impl Into<String>) -> Self {
		self.key = key.into();
		self
	}

	pub fn with_constraint(mut self, constraint: OptionConstraint) -> Self {
		self.constraint = constraint;
		self
	}

	pub fn with_pref(mut self, pref: PrefKey) -> Self {
		self.pref = Some(pref);
		self
	}

	pub fn enabled_when(mut self, predicate: impl Fn(&OptionDb) -> bool + 'static) -> Self {
		self.enabled = Some(Box::new(predicate));
		self
	}

	pub fn path(&self) -> &OptionPath {
		&self.path
	}

	pub fn section(&self) -> &str {
		&self.path.section
	}

	pub fn name(&self) -> &str {
		&self.path.name
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn doc(&self) -> &str {
		&self.doc
	}

	pub fn ui_type(&self) -> OptionUiType {
		self.ui_type
	}

	pub fn is_internal(&self) -> bool {
		self.ui_type.is_internal()
	}

	pub fn value(&self) -> &OptionValue {
		&self.value
	}

	/// The value the user currently sees: the control's pending state while
	/// the option is marked changed, otherwise the stored value.
	///
	/// Enablement predicates read this so that an edit gates dependent
	/// controls before it is committed. A control state the option would
	/// reject falls back to the stored value.
	pub fn effective_value(&self) -> Cow<'_, OptionValue> {
		if self.changed
			&& let Some(item) = self.ui_item.as_deref()
			&& item.is_live()
			&& let Some(pending) = item.get_option_value(self)
			&& self.validate(&pending).is_ok()
		{
			return Cow::Owned(pending);
		}
		Cow::Borrowed(&self.value)
	}

	pub fn default_value(&self) -> &OptionValue {
		&self.default
	}

	pub fn constraint(&self) -> &OptionConstraint {
		&self.constraint
	}

	pub fn pref_key(&self) -> Option<&PrefKey> {
		self.pref.as_ref()
	}

	/// Whether the option's control should accept input. Options without a
	/// predicate are always enabled.
	pub fn is_enabled(&self, db: &OptionDb) -> bool {
		self.enabled.as_ref().is_none_or(|p| p(db))
	}

	/// Edited in the UI but not yet committed.
	pub fn is_changed(&self) -> bool {
		self.changed
	}

	pub fn set_changed(&mut self, changed: bool) {
		self.changed = changed;
	}

	/// Value differs from the last saved state.
	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	pub fn mark_saved(&mut self) {
		self.dirty = false;
	}

	pub fn is_default(&self) -> bool {
		self.value == self.default
	}

	/// Checks a candidate value against the option's type and constraint.
	pub fn validate(&self, value: &OptionValue) -> Result<(), OptionError> {
		if !value.matches_type(self.ui_type) {
			return Err(OptionError::TypeMismatch {
				option: self.path.clone(),
				expected: self.ui_type.value_kind(),
				got: value.type_name(),
			});
		}
		self.check_constraint(value).map_err(|reason| OptionError::InvalidValue {
			option: self.path.clone(),
			reason,
		})
	}

	fn check_constraint(&self, value: &OptionValue) -> Result<(), String> {
		match (&self.constraint, value) {
			(OptionConstraint::Choices(_), OptionValue::Choice(key)) => {
				if self.constraint.choice_index(key).is_none() {
					return Err(format!("'{key}' is not one of the offered choices"));
				}
			}
			(OptionConstraint::Choices(_), OptionValue::List(keys)) => {
				if let Some(bad) = keys.iter().find(|k| self.constraint.choice_index(k).is_none()) {
					return Err(format!("'{bad}' is not one of the offered choices"));
				}
			}
			(OptionConstraint::Range { min, max, .. }, OptionValue::Number(n)) => {
				if !n.is_finite() || n < min || n > max {
					return Err(format!("{n} is outside {min}..={max}"));
				}
			}
			(
				OptionConstraint::RelativePeriods(periods),
				OptionValue::Date(DateValue::Relative(period)),
			) => {
				if !periods.contains(period) {
					return Err(format!("'{period}' is not an offered period"));
				}
			}
			_ => {}
		}
		if let OptionValue::PlotSize(size) = value
			&& (!size.value.is_finite() || size.value <= 0.0)
		{
			return Err(format!("plot size must be positive, got {}", size.value));
		}
		Ok(())
	}

	/// Stores a new value after validating it. Returns whether the value
	/// actually changed.
	pub fn set_value(&mut self, value: OptionValue) -> Result<bool, OptionError> {
		self.validate(&value)?;
		if self.value == value {
			return Ok(false);
		}
		self.value = value;
		self.dirty = true;
		Ok(true)
	}

	/// Restores the default value.
	pub fn reset_default(&mut self) -> bool {
		if self.value == self.default {
			return false;
		}
		self.value = self.default.clone();
		self.dirty = true;
		true
	}

	/// Installs a new UI item, clearing and dropping any previous one first.
	pub fn set_ui_item(&mut self, item: Option<Box<dyn OptionUiItem>>) {
		if let Some(mut old) = self.ui_item.take() {
			old.clear_ui_item();
		}
		self.ui_item = item;
	}

	pub fn ui_item(&self) -> Option<&dyn OptionUiItem> {
		self.ui_item.as_deref()
	}

	/// Clears the UI item without dropping it.
	pub fn clear_ui_item(&mut self) {
		if let Some(item) = self.ui_item.as_mut() {
			item.clear_ui_item();
		}
	}

	pub fn set_ui_item_selectable(&self, selectable: bool) {
		if let Some(item) = self.ui_item.as_deref() {
			item.set_selectable(selectable);
		}
	}

	/// Pushes the current value into the live control, if any.
	pub fn set_ui_item_from_option(&self) {
		if let Some(item) = self.ui_item.as_deref()
			&& item.is_live()
		{
			item.set_ui_item_from_option(self);
		}
	}

	/// Reads the control's value back into the option.
	///
	/// Returns `Ok(false)` when there is no live control or the value did not
	/// change.
	pub fn set_option_from_ui_item(&mut self) -> Result<bool, OptionError> {
		let Some(value) = self.ui_item.as_deref().and_then(|item| item.get_option_value(self))
		else {
			return Ok(false);
		};
		self.set_value(value)
	}
}
