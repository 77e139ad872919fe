//! Option files: a TOML description of an option collection.
//!
//! ```toml
//! default_section = "General"
//!
//! [[option]]
//! section = "General"
//! name = "Show totals"
//! type = "boolean"
//! default = true
//!
//! [[option]]
//! section = "General"
//! name = "Depth"
//! type = "number_range"
//! range = { min = 1, max = 8 }
//! enabled_by = "General/Show totals"
//! ```

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use optdlg_options::parse::parse_value_for_type;
use optdlg_options::{
	Choice, DateValue, OptionConstraint, OptionDb, OptionEntry, OptionPath, OptionUiType,
	OptionValue, PrefKey, ValueKind,
};
use serde::Deserialize;
use tracing::debug;


#[derive(Debug, Default, Deserialize)]
struct OptionFile {
	default_section: Option<String>,
	#[serde(default, rename = "option")]
	options: Vec<OptionSpec>,
}

#[derive(Debug, Deserialize)]
struct OptionSpec {
	section: String,
	name: String,
	#[serde(rename = "type")]
	ui_type: String,
	#[serde(default)]
	doc: String,
	default: Option<toml::Value>,
	key: Option<String>,
	#[serde(default)]
	choices: Vec<ChoiceSpec>,
	range: Option<RangeSpec>,
	pref: Option<PrefSpec>,
	/// `Section/Name` of a boolean option; a leading `!` inverts it.
	enabled_by: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChoiceSpec {
	Key(String),
	Full {
		key: String,
		label: Option<String>,
		#[serde(default)]
		tip: String,
	},
}

impl From<ChoiceSpec> for Choice {
	fn from(spec: ChoiceSpec) -> Self {
		match spec {
			ChoiceSpec::Key(key) => Choice::new(key.clone(), key),
			ChoiceSpec::Full { key, label, tip } => {
				let label = label.unwrap_or_else(|| key.clone());
				Choice::new(key, label).with_tip(tip)
			}
		}
	}
}

#[derive(Debug, Deserialize)]
struct RangeSpec {
	min: f64,
	max: f64,
	#[serde(default = "default_step")]
	step: f64,
	#[serde(default)]
	decimals: u8,
}

fn default_step() -> f64 {
	1.0
}

#[derive(Debug, Deserialize)]
struct PrefSpec {
	group: String,
	key: String,
}

/// An enablement dependency on a boolean option.
#[derive(Debug, Clone, PartialEq)]
struct Toggle {
	path: OptionPath,
	negate: bool,
}

impl FromStr for Toggle {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self> {
		let (negate, rest) = match s.trim().strip_prefix('!') {
			Some(rest) => (true, rest.trim_start()),
			None => (false, s.trim()),
		};
		let Some((section, name)) = rest.split_once('/') else {
			bail!("'{s}' is not of the form Section/Name");
		};
		Ok(Self {
			path: OptionPath::new(section, name),
			negate,
		})
	}
}

/// Reads and parses an option file.
pub fn load_option_file(path: &Path) -> Result<OptionDb> {
	let text = std::fs::read_to_string(path)
		.with_context(|| format!("failed to read option file {}", path.display()))?;
	parse_option_file(&text).with_context(|| format!("invalid option file {}", path.display()))
}

/// Parses option file text into a collection.
pub fn parse_option_file(text: &str) -> Result<OptionDb> {
	let file: OptionFile = toml::from_str(text)?;
	let mut db = OptionDb::new();
	let mut toggles = Vec::new();

	for spec in file.options {
		let path = OptionPath::new(&spec.section, &spec.name);
		let (entry, toggle) = build_entry(spec).with_context(|| format!("option '{path}'"))?;
		if let Some(toggle) = toggle {
			toggles.push((path.clone(), toggle));
		}
		db.register_option(entry)?;
	}

	for (path, toggle) in &toggles {
		match db.option(&toggle.path) {
			Some(target) if target.ui_type().value_kind() == ValueKind::Bool => {}
			Some(target) => bail!(
				"option '{path}' is enabled by '{}', which is {} rather than boolean",
				toggle.path,
				target.ui_type()
			),
			None => bail!("option '{path}' is enabled by unknown option '{}'", toggle.path),
		}
	}

	if let Some(section) = file.default_section {
		if db.section(&section).is_none() {
			bail!("default section '{section}' has no options");
		}
		db.set_default_section(section);
	}
	debug!(options = db.len(), sections = db.sections().len(), "option file loaded");
	Ok(db)
}

fn build_entry(spec: OptionSpec) -> Result<(OptionEntry, Option<Toggle>)> {
	let ui_type = OptionUiType::from_str(&spec.ui_type)
		.map_err(|_| anyhow!("unknown option type '{}'", spec.ui_type))?;
	let mut entry = OptionEntry::new(spec.section, spec.name, ui_type).with_doc(spec.doc);
	if let Some(key) = spec.key {
		entry = entry.with_key(key);
	}

	let choices: Vec<Choice> = spec.choices.into_iter().map(Choice::from).collect();
	let first_choice = choices.first().map(|c| c.key.clone());
	if !choices.is_empty() {
		entry = entry.with_constraint(OptionConstraint::Choices(choices));
	}
	let mut floor = None;
	if let Some(range) = spec.range {
		if range.min.is_nan() || range.max.is_nan() || range.min > range.max {
			bail!("range minimum {} exceeds maximum {}", range.min, range.max);
		}
		floor = Some(0.0_f64.clamp(range.min, range.max));
		entry = entry.with_constraint(OptionConstraint::Range {
			min: range.min,
			max: range.max,
			step: range.step,
			decimals: range.decimals,
		});
	}
	if let Some(pref) = spec.pref {
		entry = entry.with_pref(PrefKey::new(pref.group, pref.key));
	}

	let default = match spec.default {
		Some(value) => Some(convert_default(value, ui_type)?),
		None => match ui_type.value_kind() {
			ValueKind::Choice => first_choice.map(OptionValue::Choice),
			ValueKind::Number => floor.map(OptionValue::Number),
			_ => None,
		},
	};
	if let Some(default) = default {
		entry = entry.with_default(default);
	}

	let toggle = spec.enabled_by.as_deref().map(Toggle::from_str).transpose()?;
	if let Some(toggle) = toggle.clone() {
		entry = entry.enabled_when(move |db| {
			db.option(&toggle.path)
				.and_then(|o| o.effective_value().as_bool())
				.is_none_or(|on| on != toggle.negate)
		});
	}
	Ok((entry, toggle))
}

/// Converts a TOML default to a value of the option's type.
fn convert_default(value: toml::Value, ty: OptionUiType) -> Result<OptionValue> {
	use toml::Value;

	let kind = ty.value_kind();
	let converted = match (kind, value) {
		(ValueKind::Bool, Value::Boolean(b)) => OptionValue::Bool(b),
		(ValueKind::Number, Value::Integer(n)) => OptionValue::Number(n as f64),
		(ValueKind::Number, Value::Float(n)) => OptionValue::Number(n),
		(ValueKind::Date, Value::Integer(secs)) if ty != OptionUiType::DateRelative => {
			OptionValue::Date(DateValue::Absolute(secs))
		}
		(ValueKind::Date, Value::Datetime(dt)) if ty != OptionUiType::DateRelative => {
			OptionValue::Date(DateValue::Absolute(datetime_seconds(&dt.to_string())?))
		}
		(ValueKind::PlotSize, value @ Value::Table(_)) => OptionValue::PlotSize(value.try_into()?),
		(ValueKind::DateFormat, value @ Value::Table(_)) => {
			OptionValue::DateFormat(value.try_into()?)
		}
		(ValueKind::ReportList, value @ Value::Array(_)) => {
			OptionValue::ReportList(value.try_into()?)
		}
		(ValueKind::List | ValueKind::AccountList, Value::Array(items)) => {
			let keys = items
				.iter()
				.map(|item| {
					item.as_str()
						.ok_or_else(|| anyhow!("list entries must be strings, got {}", item.type_str()))
				})
				.collect::<Result<Vec<_>>>()?;
			parse_value_for_type(&keys.join(","), ty).map_err(|e| anyhow!(e))?
		}
		(_, Value::String(s)) => parse_value_for_type(&s, ty).map_err(|e| anyhow!(e))?,
		(_, other) => bail!("a {} default cannot be used for a {ty} option", other.type_str()),
	};
	Ok(converted)
}

/// Seconds since the epoch for a TOML date or date-time.
fn datetime_seconds(text: &str) -> Result<i64> {
	if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text) {
		return Ok(dt.timestamp());
	}
	if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
		return Ok(dt.and_utc().timestamp());
	}
	let date = chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d")
		.with_context(|| format!("unsupported date '{text}'"))?;
	date.and_hms_opt(0, 0, 0)
		.map(|dt| dt.and_utc().timestamp())
		.ok_or_else(|| anyhow!("unsupported date '{text}'"))
}
