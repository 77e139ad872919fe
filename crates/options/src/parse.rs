//! Shared parsing utilities for option values.
//!
//! Used by configuration loading and by preference lookups, which both start
//! from text or loosely typed data.

use std::str::FromStr;

use crate::{DateValue, Guid, OptionUiType, OptionValue, RelativeDatePeriod, Rgba, ValueKind};


/// Parse a string value into an [`OptionValue`] for a known type.
pub fn parse_value_for_type(value: &str, ty: OptionUiType) -> Result<OptionValue, String> {
	match ty.value_kind() {
		ValueKind::Bool => parse_bool(value).map(OptionValue::Bool),
		ValueKind::String => Ok(OptionValue::String(value.to_string())),
		ValueKind::Number => parse_number(value).map(OptionValue::Number),
		ValueKind::Choice => Ok(OptionValue::Choice(value.to_string())),
		ValueKind::Commodity => Ok(OptionValue::Commodity(value.to_string())),
		ValueKind::Query => Ok(OptionValue::Query(value.to_string())),
		ValueKind::Color => parse_color(value).map(OptionValue::Color),
		ValueKind::Date => parse_date(value, ty).map(OptionValue::Date),
		ValueKind::Account => parse_optional_guid(value).map(OptionValue::Account),
		ValueKind::Instance => parse_optional_guid(value).map(OptionValue::Instance),
		ValueKind::List => Ok(OptionValue::List(split_list(value).map(str::to_string).collect())),
		ValueKind::AccountList => split_list(value)
			.map(parse_guid)
			.collect::<Result<Vec<_>, _>>()
			.map(OptionValue::AccountList),
		ValueKind::PlotSize | ValueKind::DateFormat | ValueKind::ReportList => {
			Err(format!("{ty} values cannot be given as plain text"))
		}
	}
}

/// Parse a boolean value from common string representations.
pub fn parse_bool(value: &str) -> Result<bool, String> {
	match value.to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" => Ok(false),
		_ => Err(format!(
			"invalid boolean: '{value}' (expected true/false, yes/no, on/off, 1/0)"
		)),
	}
}

/// Parse a finite number.
pub fn parse_number(value: &str) -> Result<f64, String> {
	value
		.trim()
		.parse::<f64>()
		.ok()
		.filter(|n| n.is_finite())
		.ok_or_else(|| format!("invalid number: '{value}'"))
}

/// Parse `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
pub fn parse_color(value: &str) -> Result<Rgba, String> {
	let hex = value.trim().trim_start_matches('#');
	let channel = |i: usize| {
		hex.get(i..i + 2)
			.and_then(|s| u8::from_str_radix(s, 16).ok())
			.ok_or_else(|| format!("invalid color: '{value}'"))
	};
	match hex.len() {
		6 => Ok(Rgba::new(channel(0)?, channel(2)?, channel(4)?, 0xff)),
		8 => Ok(Rgba::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
		_ => Err(format!("invalid color: '{value}' (expected #rrggbb or #rrggbbaa)")),
	}
}

/// Parse a date: an integer is an absolute time in seconds, anything else a
/// relative period name such as `start-this-month`.
pub fn parse_date(value: &str, ty: OptionUiType) -> Result<DateValue, String> {
	let value = value.trim();
	let date = match value.parse::<i64>() {
		Ok(secs) => DateValue::Absolute(secs),
		Err(_) => RelativeDatePeriod::from_str(value)
			.map(DateValue::Relative)
			.map_err(|_| format!("invalid date: '{value}'"))?,
	};
	match (ty, date) {
		(OptionUiType::DateAbsolute, DateValue::Relative(_)) => {
			Err(format!("'{value}' is relative but the option takes absolute dates"))
		}
		(OptionUiType::DateRelative, DateValue::Absolute(_)) => {
			Err(format!("'{value}' is absolute but the option takes relative dates"))
		}
		_ => Ok(date),
	}
}

/// Parse a GUID in hyphenated or simple form.
pub fn parse_guid(value: &str) -> Result<Guid, String> {
	Guid::parse_str(value.trim()).map_err(|_| format!("invalid guid: '{value}'"))
}

fn parse_optional_guid(value: &str) -> Result<Option<Guid>, String> {
	if value.trim().is_empty() {
		Ok(None)
	} else {
		parse_guid(value).map(Some)
	}
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
	value.split(',').map(str::trim).filter(|s| !s.is_empty())
}
