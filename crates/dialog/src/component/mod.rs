//! Tracks open dialogs by component class.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::debug;

#[cfg(test)]
mod tests;

/// Handle of a registered component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(u64);

#[derive(Debug, Default)]
struct Registry {
	next_id: u64,
	components: Vec<(ComponentId, String)>,
	close_requests: VecDeque<ComponentId>,
}

/// Registry other subsystems use to find and close open dialogs.
///
/// Close requests are queued; the host drains them with
/// [`take_close_requests`](Self::take_close_requests) and delivers each to
/// its dialog as a close event.
#[derive(Debug, Default)]
pub struct ComponentManager {
	inner: RefCell<Registry>,
}

impl ComponentManager {
	pub fn new() -> Rc<Self> {
		Rc::new(Self::default())
	}

	pub fn register(&self, class: &str) -> ComponentId {
		let mut inner = self.inner.borrow_mut();
		inner.next_id += 1;
		let id = ComponentId(inner.next_id);
		inner.components.push((id, class.to_string()));
		debug!(class, id = id.0, "component registered");
		id
	}

	/// Forgets a component and any close request pending for it.
	pub fn unregister(&self, id: ComponentId) -> bool {
		let mut inner = self.inner.borrow_mut();
		let before = inner.components.len();
		inner.components.retain(|(c, _)| *c != id);
		inner.close_requests.retain(|c| *c != id);
		let removed = inner.components.len() != before;
		if removed {
			debug!(id = id.0, "component unregistered");
		}
		removed
	}

	pub fn is_registered(&self, id: ComponentId) -> bool {
		self.inner.borrow().components.iter().any(|(c, _)| *c == id)
	}

	pub fn find_by_class(&self, class: &str) -> Vec<ComponentId> {
		self.inner
			.borrow()
			.components
			.iter()
			.filter(|(_, c)| c == class)
			.map(|(id, _)| *id)
			.collect()
	}

	pub fn count(&self, class: &str) -> usize {
		self.find_by_class(class).len()
	}

	/// Queues a close request for every component of `class`.
	pub fn request_close(&self, class: &str) -> usize {
		let ids = self.find_by_class(class);
		let mut inner = self.inner.borrow_mut();
		for id in &ids {
			if !inner.close_requests.contains(id) {
				inner.close_requests.push_back(*id);
			}
		}
		ids.len()
	}

	pub fn take_close_requests(&self) -> Vec<ComponentId> {
		self.inner.borrow_mut().close_requests.drain(..).collect()
	}
}
