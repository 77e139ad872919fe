use strum::{EnumCount, IntoEnumIterator};

use super::*;

#[test]
fn empty_value_matches_every_type() {
	for ty in OptionUiType::iter() {
		let value = OptionValue::empty_for(ty);
		assert!(value.matches_type(ty), "{ty}: {value:?}");
	}
}

#[test]
fn ui_type_indices_are_dense() {
	for (i, ty) in OptionUiType::iter().enumerate() {
		assert_eq!(ty.index(), i);
	}
	assert_eq!(OptionUiType::iter().count(), OptionUiType::COUNT);
}

#[test]
fn relative_dates_do_not_fit_absolute_options() {
	let relative = OptionValue::Date(DateValue::Relative(RelativeDatePeriod::EndPrevYear));
	let absolute = OptionValue::Date(DateValue::Absolute(86_400));
	assert!(!relative.matches_type(OptionUiType::DateAbsolute));
	assert!(relative.matches_type(OptionUiType::DateRelative));
	assert!(relative.matches_type(OptionUiType::DateBoth));
	assert!(!absolute.matches_type(OptionUiType::DateRelative));
	assert!(absolute.matches_type(OptionUiType::DateBoth));
}

#[test]
fn ui_type_names_round_trip() {
	for ty in OptionUiType::iter() {
		let name: &'static str = ty.into();
		assert_eq!(name.parse::<OptionUiType>(), Ok(ty));
	}
	assert_eq!("number_range".parse(), Ok(OptionUiType::NumberRange));
}

#[test]
fn color_display_is_hex() {
	assert_eq!(Rgba::new(255, 0, 16, 128).to_string(), "#ff001080");
}

#[test]
fn as_str_covers_text_like_variants() {
	assert_eq!(OptionValue::Commodity("EUR".into()).as_str(), Some("EUR"));
	assert_eq!(OptionValue::Choice("a".into()).as_str(), Some("a"));
	assert_eq!(OptionValue::Number(1.0).as_str(), None);
}
