//! Seeds a new book's options from stored preferences.

use std::collections::BTreeMap;

use optdlg_options::parse::parse_value_for_type;
use optdlg_options::{OptionDb, OptionEntry, OptionValue, ValueKind};
use serde::Deserialize;
use tracing::{debug, warn};


/// A stored preference value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
}

impl From<bool> for PrefValue {
	fn from(v: bool) -> Self {
		PrefValue::Bool(v)
	}
}

impl From<i64> for PrefValue {
	fn from(v: i64) -> Self {
		PrefValue::Int(v)
	}
}

impl From<f64> for PrefValue {
	fn from(v: f64) -> Self {
		PrefValue::Float(v)
	}
}

impl From<&str> for PrefValue {
	fn from(v: &str) -> Self {
		PrefValue::String(v.to_string())
	}
}

/// Read access to stored preferences, addressed by (group, key).
pub trait Preferences {
	fn get(&self, group: &str, key: &str) -> Option<PrefValue>;
}

/// In-memory preferences, loadable from TOML with one table per group:
///
/// ```toml
/// [general]
/// currency-choice-other = "EUR"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct PreferenceStore {
	groups: BTreeMap<String, BTreeMap<String, PrefValue>>,
}

impl PreferenceStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
		toml::from_str(text)
	}

	pub fn set(&mut self, group: &str, key: &str, value: impl Into<PrefValue>) {
		self.groups
			.entry(group.to_string())
			.or_default()
			.insert(key.to_string(), value.into());
	}

	pub fn len(&self) -> usize {
		self.groups.values().map(BTreeMap::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl Preferences for PreferenceStore {
	fn get(&self, group: &str, key: &str) -> Option<PrefValue> {
		self.groups.get(group)?.get(key).cloned()
	}
}

/// Converts a preference to a value for `option`, if the shapes agree.
fn convert(option: &OptionEntry, pref: &PrefValue) -> Option<OptionValue> {
	match (option.ui_type().value_kind(), pref) {
		(ValueKind::Bool, PrefValue::Bool(b)) => Some(OptionValue::Bool(*b)),
		(ValueKind::Number, PrefValue::Int(n)) => Some(OptionValue::Number(*n as f64)),
		(ValueKind::Number, PrefValue::Float(n)) => Some(OptionValue::Number(*n)),
		(_, PrefValue::String(s)) => parse_value_for_type(s, option.ui_type()).ok(),
		_ => None,
	}
}

/// Overwrites options of a freshly created collection with stored
/// preferences.
///
/// Only options carrying a preference key and a type that supports a stored
/// default are considered; those without a stored value are left alone. Live
/// controls are refreshed but no UI is created. Returns how many options took
/// a preference value.
pub fn set_new_book_option_values(db: &mut OptionDb, prefs: &dyn Preferences) -> usize {
	let mut applied = 0;
	for option in db.options_mut() {
		if !option.ui_type().supports_preference_default() {
			continue;
		}
		let Some(key) = option.pref_key() else {
			continue;
		};
		let Some(pref) = prefs.get(&key.group, &key.key) else {
			continue;
		};
		let Some(value) = convert(option, &pref) else {
			warn!(option = %option.path(), ?pref, "preference does not fit option type");
			continue;
		};
		match option.set_value(value) {
			Ok(_) => {
				option.set_ui_item_from_option();
				applied += 1;
			}
			Err(e) => warn!(option = %option.path(), error = %e, "preference rejected"),
		}
	}
	debug!(applied, "new book options seeded from preferences");
	applied
}
