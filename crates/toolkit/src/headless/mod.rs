//! In-memory toolkit backed by a widget arena.

use std::cell::RefCell;

use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use crate::{
	ControlKind, ControlValue, DateMode, NumericRange, Placement, Toolkit, WidgetId, WidgetKind,
	WindowSpec,
};


#[derive(Debug)]
struct Node {
	kind: WidgetKind,
	parent: Option<WidgetId>,
	children: Vec<WidgetId>,
	placement: Option<Placement>,
	label: String,
	tooltip: String,
	sensitive: bool,
	visible: bool,
	items: Vec<String>,
	range: NumericRange,
	value: Option<ControlValue>,
	window: Option<WindowSpec>,
	show_tabs: bool,
	current_page: usize,
}

impl Node {
	fn new(kind: WidgetKind) -> Self {
		Self {
			kind,
			parent: None,
			children: Vec::new(),
			placement: None,
			label: String::new(),
			tooltip: String::new(),
			sensitive: true,
			visible: !matches!(kind, WidgetKind::Window),
			items: Vec::new(),
			range: NumericRange::default(),
			value: initial_value(kind),
			window: None,
			show_tabs: true,
			current_page: 0,
		}
	}

	/// Applies toolkit-side normalization before storing a value.
	fn accept(&mut self, value: ControlValue) -> Option<ControlValue> {
		match value {
			ControlValue::Number(n) => Some(ControlValue::Number(self.range.clamp(n))),
			ControlValue::Index(Some(i)) if i >= self.items.len() => None,
			ControlValue::Indices(ref rows) if rows.iter().any(|&i| i >= self.items.len()) => {
				None
			}
			other => Some(other),
		}
	}
}

fn initial_value(kind: WidgetKind) -> Option<ControlValue> {
	let WidgetKind::Control(control) = kind else {
		return None;
	};
	Some(match control {
		ControlKind::CheckButton => ControlValue::Toggle(false),
		ControlKind::Entry
		| ControlKind::TextView
		| ControlKind::FontButton
		| ControlKind::FileChooser
		| ControlKind::QueryView
		| ControlKind::Hidden => ControlValue::Text(String::new()),
		ControlKind::CommodityEdit { .. }
		| ControlKind::AccountSelect
		| ControlKind::InstanceSelect => ControlValue::Selection(None),
		ControlKind::ComboBox | ControlKind::RadioGroup => ControlValue::Index(None),
		ControlKind::DateEdit(DateMode::Absolute) => ControlValue::Date(0),
		ControlKind::DateEdit(DateMode::Relative) => ControlValue::Index(None),
		ControlKind::DateEdit(DateMode::Both) => ControlValue::DateChoice {
			use_absolute: true,
			absolute: 0,
			relative: 0,
		},
		ControlKind::AccountTree => ControlValue::Selections(Vec::new()),
		ControlKind::ListView => ControlValue::Indices(Vec::new()),
		ControlKind::SpinButton => ControlValue::Number(0.0),
		ControlKind::ColorButton => ControlValue::Color([0, 0, 0, 0xff]),
		ControlKind::PlotSize => ControlValue::PlotSize {
			percent: true,
			value: 100.0,
		},
		ControlKind::DateFormat => ControlValue::DateFormat {
			format: 0,
			months: 0,
			years: true,
			custom: String::new(),
		},
		ControlKind::ReportList => ControlValue::ReportList(Vec::new()),
	})
}

#[derive(Debug, Default)]
struct Arena {
	next_id: u64,
	nodes: FxHashMap<WidgetId, Node>,
	help: Vec<String>,
}

impl Arena {
	fn insert(&mut self, node: Node) -> WidgetId {
		self.next_id += 1;
		let id = WidgetId(self.next_id);
		self.nodes.insert(id, node);
		id
	}

	fn detach(&mut self, child: WidgetId) {
		let Some(parent) = self.nodes.get_mut(&child).and_then(|n| n.parent.take()) else {
			return;
		};
		if let Some(p) = self.nodes.get_mut(&parent) {
			p.children.retain(|&c| c != child);
		}
	}

	fn remove_subtree(&mut self, root: WidgetId) -> usize {
		let mut stack = vec![root];
		let mut removed = 0;
		while let Some(id) = stack.pop() {
			if let Some(node) = self.nodes.remove(&id) {
				stack.extend(node.children);
				removed += 1;
			}
		}
		removed
	}
}

/// A toolkit that keeps every widget in memory and renders nothing.
///
/// Besides implementing [`Toolkit`] it exposes inspection helpers so callers
/// can see what a dialog built.
#[derive(Debug, Default)]
pub struct HeadlessToolkit {
	arena: RefCell<Arena>,
}

impl HeadlessToolkit {
	pub fn new() -> Self {
		Self::default()
	}

	fn with_node<R>(&self, id: WidgetId, f: impl FnOnce(&Node) -> R) -> Option<R> {
		self.arena.borrow().nodes.get(&id).map(f)
	}

	fn update(&self, id: WidgetId, f: impl FnOnce(&mut Node)) {
		match self.arena.borrow_mut().nodes.get_mut(&id) {
			Some(node) => f(node),
			None => trace!(widget = %id, "ignoring call on dead widget"),
		}
	}

	pub fn kind(&self, id: WidgetId) -> Option<WidgetKind> {
		self.with_node(id, |n| n.kind)
	}

	pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
		self.with_node(id, |n| n.parent).flatten()
	}

	pub fn placement(&self, id: WidgetId) -> Option<Placement> {
		self.with_node(id, |n| n.placement).flatten()
	}

	pub fn label(&self, id: WidgetId) -> Option<String> {
		self.with_node(id, |n| n.label.clone())
	}

	pub fn tooltip(&self, id: WidgetId) -> Option<String> {
		self.with_node(id, |n| n.tooltip.clone())
	}

	pub fn items(&self, id: WidgetId) -> Vec<String> {
		self.with_node(id, |n| n.items.clone()).unwrap_or_default()
	}

	pub fn range(&self, id: WidgetId) -> Option<NumericRange> {
		self.with_node(id, |n| n.range)
	}

	pub fn window_spec(&self, id: WidgetId) -> Option<WindowSpec> {
		self.with_node(id, |n| n.window.clone()).flatten()
	}

	pub fn shows_tabs(&self, notebook: WidgetId) -> bool {
		self.with_node(notebook, |n| n.show_tabs).unwrap_or(false)
	}

	pub fn current_page(&self, notebook: WidgetId) -> Option<usize> {
		self.with_node(notebook, |n| n.current_page)
	}

	/// Number of live widgets.
	pub fn live_count(&self) -> usize {
		self.arena.borrow().nodes.len()
	}

	/// Every widget under `root` (excluding `root`), depth first.
	pub fn descendants(&self, root: WidgetId) -> Vec<WidgetId> {
		let arena = self.arena.borrow();
		let mut out = Vec::new();
		let mut stack: Vec<WidgetId> = arena
			.nodes
			.get(&root)
			.map(|n| n.children.iter().rev().copied().collect())
			.unwrap_or_default();
		while let Some(id) = stack.pop() {
			if let Some(node) = arena.nodes.get(&id) {
				out.push(id);
				stack.extend(node.children.iter().rev().copied());
			}
		}
		out
	}

	/// Counts widgets under `root` whose kind satisfies `pred`.
	pub fn count_kind(&self, root: WidgetId, pred: impl Fn(WidgetKind) -> bool) -> usize {
		self.descendants(root)
			.into_iter()
			.filter(|&id| self.kind(id).is_some_and(&pred))
			.count()
	}

	/// First widget under `root` carrying exactly this label.
	pub fn find_labelled(&self, root: WidgetId, text: &str) -> Option<WidgetId> {
		self.descendants(root)
			.into_iter()
			.find(|&id| self.with_node(id, |n| n.label == text).unwrap_or(false))
	}

	/// Help topics requested so far, oldest first.
	pub fn help_requests(&self) -> Vec<String> {
		self.arena.borrow().help.clone()
	}
}

impl Toolkit for HeadlessToolkit {
	fn create_window(&self, spec: &WindowSpec) -> WidgetId {
		let mut node = Node::new(WidgetKind::Window);
		node.label = spec.title.clone();
		node.window = Some(spec.clone());
		self.arena.borrow_mut().insert(node)
	}

	fn create(&self, kind: WidgetKind) -> WidgetId {
		self.arena.borrow_mut().insert(Node::new(kind))
	}

	fn attach(&self, parent: WidgetId, child: WidgetId, placement: Placement) {
		let mut arena = self.arena.borrow_mut();
		if parent == child || !arena.nodes.contains_key(&parent) || !arena.nodes.contains_key(&child)
		{
			warn!(%parent, %child, "attach on dead or identical widgets");
			return;
		}
		arena.detach(child);
		if let Some(p) = arena.nodes.get_mut(&parent) {
			p.children.push(child);
		}
		if let Some(c) = arena.nodes.get_mut(&child) {
			c.parent = Some(parent);
			c.placement = Some(placement);
		}
	}

	fn set_label(&self, widget: WidgetId, text: &str) {
		self.update(widget, |n| n.label = text.to_string());
	}

	fn set_tooltip(&self, widget: WidgetId, text: &str) {
		self.update(widget, |n| n.tooltip = text.to_string());
	}

	fn set_sensitive(&self, widget: WidgetId, sensitive: bool) {
		self.update(widget, |n| n.sensitive = sensitive);
	}

	fn is_sensitive(&self, widget: WidgetId) -> bool {
		self.with_node(widget, |n| n.sensitive).unwrap_or(false)
	}

	fn set_visible(&self, widget: WidgetId, visible: bool) {
		self.update(widget, |n| n.visible = visible);
	}

	fn is_visible(&self, widget: WidgetId) -> bool {
		self.with_node(widget, |n| n.visible).unwrap_or(false)
	}

	fn set_items(&self, widget: WidgetId, items: &[String]) {
		self.update(widget, |n| {
			n.items = items.to_vec();
			match &mut n.value {
				Some(ControlValue::Index(sel)) if sel.is_some_and(|i| i >= n.items.len()) => {
					*sel = None;
				}
				Some(ControlValue::Indices(rows)) => rows.retain(|&i| i < n.items.len()),
				_ => {}
			}
		});
	}

	fn set_range(&self, widget: WidgetId, range: NumericRange) {
		self.update(widget, |n| {
			n.range = range;
			if let Some(ControlValue::Number(v)) = &mut n.value {
				*v = range.clamp(*v);
			}
		});
	}

	fn value(&self, widget: WidgetId) -> Option<ControlValue> {
		self.with_node(widget, |n| n.value.clone()).flatten()
	}

	fn set_value(&self, widget: WidgetId, value: ControlValue) {
		self.update(widget, |n| match n.accept(value) {
			Some(v) => n.value = Some(v),
			None => warn!(%widget, items = n.items.len(), "rejecting out-of-range selection"),
		});
	}

	fn children(&self, widget: WidgetId) -> Vec<WidgetId> {
		self.with_node(widget, |n| n.children.clone())
			.unwrap_or_default()
	}

	fn destroy(&self, widget: WidgetId) {
		let mut arena = self.arena.borrow_mut();
		arena.detach(widget);
		let removed = arena.remove_subtree(widget);
		trace!(%widget, removed, "destroyed widget subtree");
	}

	fn is_alive(&self, widget: WidgetId) -> bool {
		self.arena.borrow().nodes.contains_key(&widget)
	}

	fn set_show_tabs(&self, notebook: WidgetId, show: bool) {
		self.update(notebook, |n| n.show_tabs = show);
	}

	fn set_current_page(&self, notebook: WidgetId, page: usize) {
		self.update(notebook, |n| n.current_page = page);
	}

	fn show_help(&self, topic: &str) {
		self.arena.borrow_mut().help.push(topic.to_string());
	}
}
