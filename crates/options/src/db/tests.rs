use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::{Choice, OptionConstraint, OptionUiItem, OptionUiType};

fn names(db: &OptionDb) -> Vec<String> {
	db.options().map(|o| o.path().to_string()).collect()
}

/// Control stand-in that reports a fixed value and records what it is shown.
#[derive(Default)]
struct Probe {
	shown: RefCell<Vec<OptionValue>>,
	selectable: Cell<Option<bool>>,
	cleared: Cell<u32>,
}

struct FakeItem {
	ty: OptionUiType,
	reply: Option<OptionValue>,
	probe: Rc<Probe>,
	live: bool,
}

impl OptionUiItem for FakeItem {
	fn ui_type(&self) -> OptionUiType {
		self.ty
	}

	fn set_selectable(&self, selectable: bool) {
		if self.live {
			self.probe.selectable.set(Some(selectable));
		}
	}

	fn clear_ui_item(&mut self) {
		self.live = false;
		self.probe.cleared.set(self.probe.cleared.get() + 1);
	}

	fn is_live(&self) -> bool {
		self.live
	}

	fn set_ui_item_from_option(&self, option: &OptionEntry) {
		self.probe.shown.borrow_mut().push(option.value().clone());
	}

	fn get_option_value(&self, _option: &OptionEntry) -> Option<OptionValue> {
		if self.live { self.reply.clone() } else { None }
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

fn attach(db: &mut OptionDb, path: &OptionPath, reply: Option<OptionValue>) -> Rc<Probe> {
	let probe = Rc::new(Probe::default());
	let option = db.option_mut(path).unwrap();
	let ty = option.ui_type();
	option.set_ui_item(Some(Box::new(FakeItem {
		ty,
		reply,
		probe: probe.clone(),
		live: true,
	})));
	probe
}

#[test]
fn sections_and_options_are_ordered() {
	let mut db = OptionDb::new();
	db.register_option(OptionEntry::new("Zeta", "b", OptionUiType::Boolean).with_key("b"))
		.unwrap();
	db.register_option(OptionEntry::new("Alpha", "second", OptionUiType::String).with_key("b"))
		.unwrap();
	db.register_option(OptionEntry::new("Alpha", "first", OptionUiType::String).with_key("a"))
		.unwrap();
	db.register_option(OptionEntry::new("Alpha", "third", OptionUiType::String).with_key("b"))
		.unwrap();

	assert_eq!(
		names(&db),
		vec!["Alpha/first", "Alpha/second", "Alpha/third", "Zeta/b"]
	);
	assert_eq!(db.len(), 4);
	assert_eq!(db.sections().len(), 2);
}

#[test]
fn duplicate_registration_is_rejected() {
	let mut db = OptionDb::new();
	db.register_option(OptionEntry::new("General", "Flag", OptionUiType::Boolean))
		.unwrap();
	let err = db
		.register_option(OptionEntry::new("General", "Flag", OptionUiType::Boolean))
		.unwrap_err();
	assert_eq!(
		err,
		OptionError::DuplicateOption(OptionPath::new("General", "Flag"))
	);
}

#[test]
fn default_must_satisfy_constraint() {
	let mut db = OptionDb::new();
	let option = OptionEntry::new("General", "Count", OptionUiType::NumberRange)
		.with_constraint(OptionConstraint::Range {
			min: 0.0,
			max: 10.0,
			step: 1.0,
			decimals: 0,
		})
		.with_default(42.0);
	assert!(matches!(
		db.register_option(option),
		Err(OptionError::InvalidValue { .. })
	));

	let option = OptionEntry::new("General", "Flag", OptionUiType::Boolean).with_default("yes");
	assert!(matches!(
		db.register_option(option),
		Err(OptionError::TypeMismatch { .. })
	));
	assert!(db.is_empty());
}

#[test]
fn choice_values_must_be_offered() {
	let mut db = OptionDb::new();
	db.register_option(
		OptionEntry::new("Display", "Style", OptionUiType::Multichoice)
			.with_constraint(OptionConstraint::Choices(vec![
				Choice::new("a", "A"),
				Choice::new("b", "B"),
			]))
			.with_default(OptionValue::Choice("a".into())),
	)
	.unwrap();
	let path = OptionPath::new("Display", "Style");

	assert_eq!(db.set_value(&path, OptionValue::Choice("b".into())), Ok(true));
	assert_eq!(db.set_value(&path, OptionValue::Choice("b".into())), Ok(false));
	assert!(db.set_value(&path, OptionValue::Choice("c".into())).is_err());
	assert_eq!(
		db.option(&path).unwrap().value(),
		&OptionValue::Choice("b".into())
	);
}

#[test]
fn set_value_on_unknown_option_fails() {
	let mut db = OptionDb::new();
	let path = OptionPath::new("Nope", "Missing");
	assert_eq!(
		db.set_value(&path, true),
		Err(OptionError::UnknownOption(path.clone()))
	);
}

#[test]
fn reset_section_defaults_marks_and_pushes() {
	let mut db = OptionDb::new();
	db.register_option(OptionEntry::new("General", "Flag", OptionUiType::Boolean).with_default(true))
		.unwrap();
	db.register_option(OptionEntry::new("General", "Name", OptionUiType::String).with_default("x"))
		.unwrap();
	let flag = OptionPath::new("General", "Flag");
	let name = OptionPath::new("General", "Name");
	db.set_value(&flag, false).unwrap();
	let probe = attach(&mut db, &flag, None);

	let reset = db.reset_section_defaults("General");

	assert_eq!(reset, vec![flag.clone()]);
	assert!(db.option(&flag).unwrap().is_changed());
	assert!(!db.option(&name).unwrap().is_changed());
	assert_eq!(*probe.shown.borrow(), vec![OptionValue::Bool(true)]);
	assert!(db.reset_section_defaults("Missing").is_empty());
}

#[test]
fn commit_reads_back_changed_options_only() {
	let mut db = OptionDb::new();
	db.register_option(OptionEntry::new("General", "Flag", OptionUiType::Boolean))
		.unwrap();
	db.register_option(OptionEntry::new("General", "Name", OptionUiType::String))
		.unwrap();
	let flag = OptionPath::new("General", "Flag");
	let name = OptionPath::new("General", "Name");
	attach(&mut db, &flag, Some(OptionValue::Bool(true)));
	attach(&mut db, &name, Some(OptionValue::String("ignored".into())));
	db.option_mut(&flag).unwrap().set_changed(true);

	assert!(db.commit().is_empty());

	let flag_opt = db.option(&flag).unwrap();
	assert_eq!(flag_opt.value(), &OptionValue::Bool(true));
	assert!(!flag_opt.is_changed());
	assert!(flag_opt.is_dirty());
	assert_eq!(db.option(&name).unwrap().value(), &OptionValue::String(String::new()));
}

#[test]
fn commit_failure_keeps_option_changed() {
	let mut db = OptionDb::new();
	db.register_option(OptionEntry::new("General", "Flag", OptionUiType::Boolean))
		.unwrap();
	db.register_option(OptionEntry::new("General", "Name", OptionUiType::String))
		.unwrap();
	let flag = OptionPath::new("General", "Flag");
	let name = OptionPath::new("General", "Name");
	attach(&mut db, &flag, Some(OptionValue::Number(3.0)));
	attach(&mut db, &name, Some(OptionValue::String("kept".into())));
	db.option_mut(&flag).unwrap().set_changed(true);
	db.option_mut(&name).unwrap().set_changed(true);

	let failures = db.commit();

	assert_eq!(failures.len(), 1);
	assert!(db.option(&flag).unwrap().is_changed());
	assert_eq!(
		db.option(&name).unwrap().value(),
		&OptionValue::String("kept".into())
	);
}

#[test]
fn refresh_selectable_follows_predicates() {
	let mut db = OptionDb::new();
	db.register_option(OptionEntry::new("General", "Flag", OptionUiType::Boolean))
		.unwrap();
	db.register_option(
		OptionEntry::new("General", "Count", OptionUiType::NumberRange).enabled_when(|db| {
			db.find_option("General", "Flag")
				.and_then(|o| o.effective_value().as_bool())
				.unwrap_or(false)
		}),
	)
	.unwrap();
	let flag = OptionPath::new("General", "Flag");
	let count = OptionPath::new("General", "Count");
	let flag_probe = attach(&mut db, &flag, None);
	let count_probe = attach(&mut db, &count, None);

	db.refresh_selectable();
	assert_eq!(flag_probe.selectable.get(), Some(true));
	assert_eq!(count_probe.selectable.get(), Some(false));

	db.set_value(&flag, true).unwrap();
	db.refresh_selectable();
	assert_eq!(count_probe.selectable.get(), Some(true));
}

#[test]
fn predicates_see_uncommitted_edits() {
	let mut db = OptionDb::new();
	db.register_option(OptionEntry::new("General", "Flag", OptionUiType::Boolean))
		.unwrap();
	db.register_option(
		OptionEntry::new("General", "Count", OptionUiType::NumberRange).enabled_when(|db| {
			db.find_option("General", "Flag")
				.and_then(|o| o.effective_value().as_bool())
				.unwrap_or(false)
		}),
	)
	.unwrap();
	let flag = OptionPath::new("General", "Flag");
	let count = OptionPath::new("General", "Count");
	attach(&mut db, &flag, Some(OptionValue::Bool(true)));
	let count_probe = attach(&mut db, &count, None);

	db.refresh_selectable();
	assert_eq!(count_probe.selectable.get(), Some(false));

	db.option_mut(&flag).unwrap().set_changed(true);
	db.refresh_selectable();
	assert_eq!(count_probe.selectable.get(), Some(true));
	assert_eq!(db.option(&flag).unwrap().value(), &OptionValue::Bool(false));
}

#[test]
fn effective_value_ignores_unusable_control_state() {
	let mut db = OptionDb::new();
	db.register_option(OptionEntry::new("General", "Flag", OptionUiType::Boolean))
		.unwrap();
	let flag = OptionPath::new("General", "Flag");

	attach(&mut db, &flag, Some(OptionValue::String("nope".into())));
	db.option_mut(&flag).unwrap().set_changed(true);
	assert_eq!(
		*db.option(&flag).unwrap().effective_value(),
		OptionValue::Bool(false)
	);

	db.option_mut(&flag).unwrap().clear_ui_item();
	assert_eq!(
		*db.option(&flag).unwrap().effective_value(),
		OptionValue::Bool(false)
	);
}

#[test]
fn clear_ui_items_is_idempotent() {
	let mut db = OptionDb::new();
	db.register_option(OptionEntry::new("General", "Flag", OptionUiType::Boolean))
		.unwrap();
	let flag = OptionPath::new("General", "Flag");
	let probe = attach(&mut db, &flag, None);

	db.clear_ui_items();
	db.clear_ui_items();

	assert_eq!(probe.cleared.get(), 1);
	assert!(db.option(&flag).unwrap().ui_item().is_none());
	db.refresh_selectable();
	assert_eq!(probe.selectable.get(), None);
}

#[test]
fn replacing_ui_item_clears_the_old_one() {
	let mut db = OptionDb::new();
	db.register_option(OptionEntry::new("General", "Flag", OptionUiType::Boolean))
		.unwrap();
	let flag = OptionPath::new("General", "Flag");
	let first = attach(&mut db, &flag, None);
	let second = attach(&mut db, &flag, None);

	assert_eq!(first.cleared.get(), 1);
	assert_eq!(second.cleared.get(), 0);
}

#[test]
fn saved_state_tracks_edits() {
	let mut db = OptionDb::new();
	db.register_option(OptionEntry::new("General", "Flag", OptionUiType::Boolean))
		.unwrap();
	assert!(!db.is_dirty());
	db.set_value(&OptionPath::new("General", "Flag"), true).unwrap();
	assert!(db.is_dirty());
	db.mark_saved();
	assert!(!db.is_dirty());
}
