use std::rc::Rc;

use optdlg_toolkit::{HeadlessToolkit, Placement, Toolkit, WidgetKind};
use pretty_assertions::assert_eq;

use super::*;

fn stub(args: &CreateArgs<'_>) -> Result<CreatedWidget, DialogError> {
	let widget = args.toolkit.create(WidgetKind::Label);
	args.toolkit.set_label(widget, "stub");
	let item = crate::WidgetUiItem::with_default_bridge(args.toolkit.clone(), args.option.ui_type(), widget);
	Ok(CreatedWidget {
		widget,
		enclosing: None,
		packed: false,
		item: Box::new(item),
	})
}

struct Fixture {
	tk: Rc<HeadlessToolkit>,
	toolkit: ToolkitRef,
	page: WidgetId,
	label: WidgetId,
}

impl Fixture {
	fn new() -> Self {
		let tk = Rc::new(HeadlessToolkit::new());
		let toolkit: ToolkitRef = tk.clone();
		let page = tk.create(WidgetKind::Page);
		let label = tk.create(WidgetKind::Label);
		Self { tk, toolkit, page, label }
	}

	fn args<'a>(&'a self, option: &'a OptionEntry) -> CreateArgs<'a> {
		CreateArgs {
			toolkit: &self.toolkit,
			option,
			page: self.page,
			row: 0,
			name_label: self.label,
			description: option.doc(),
		}
	}
}

#[test]
fn starts_empty_and_initializes_once() {
	let mut factory = WidgetFactory::new();
	assert!(!factory.is_initialized());
	assert_eq!(factory.missing().len(), OptionUiType::COUNT);

	factory.initialize();
	assert!(factory.missing().is_empty());

	factory.unregister(OptionUiType::Color);
	factory.initialize();
	assert_eq!(factory.missing(), vec![OptionUiType::Color]);
}

#[test]
fn pre_registered_constructor_survives_initialization() {
	let fx = Fixture::new();
	let mut factory = WidgetFactory::new();
	factory.set_func(OptionUiType::String, stub);

	let option = OptionEntry::new("General", "Name", OptionUiType::String);
	let created = factory.create(&fx.args(&option)).unwrap();

	assert!(factory.is_initialized());
	assert_eq!(fx.tk.label(created.widget).as_deref(), Some("stub"));
}

#[test]
fn unregistered_type_is_reported() {
	let fx = Fixture::new();
	let mut factory = WidgetFactory::new();
	factory.initialize();
	factory.unregister(OptionUiType::Font);

	let option = OptionEntry::new("Fonts", "Title", OptionUiType::Font);
	let err = factory.create(&fx.args(&option)).err();

	assert_eq!(
		err,
		Some(DialogError::UnregisteredOptionType {
			ui_type: OptionUiType::Font,
			option: option.path().clone(),
		})
	);
}

#[test]
fn packed_constructors_place_themselves() {
	let fx = Fixture::new();
	let mut factory = WidgetFactory::new();
	let option = OptionEntry::new("Accounts", "Selected", OptionUiType::AccountList);

	let created = factory.create(&fx.args(&option)).unwrap();

	assert!(created.packed);
	let frame = created.outer();
	assert_eq!(fx.tk.parent(frame), Some(fx.page));
	assert_eq!(
		fx.tk.placement(frame),
		Some(Placement::Grid { column: 0, row: 0, width: 2 })
	);
	assert_eq!(fx.tk.children(frame), vec![fx.label, created.widget]);
}

#[test]
fn number_range_gets_its_bounds() {
	let fx = Fixture::new();
	let mut factory = WidgetFactory::new();
	let option = OptionEntry::new("General", "Count", OptionUiType::NumberRange).with_constraint(
		optdlg_options::OptionConstraint::Range {
			min: 1.0,
			max: 9.0,
			step: 1.0,
			decimals: 0,
		},
	);

	let created = factory.create(&fx.args(&option)).unwrap();
	let range = fx.tk.range(created.widget).unwrap();
	assert_eq!((range.min, range.max), (1.0, 9.0));
}

#[test]
fn global_factory_is_shared() {
	assert!(Arc::ptr_eq(&WidgetFactory::global(), &WidgetFactory::global()));
	assert!(!Arc::ptr_eq(&WidgetFactory::shared(), &WidgetFactory::shared()));
}
