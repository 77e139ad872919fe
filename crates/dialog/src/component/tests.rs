use pretty_assertions::assert_eq;

use super::*;

#[test]
fn register_and_find() {
	let mgr = ComponentManager::new();
	let a = mgr.register("dialog-book-options");
	let b = mgr.register("dialog-book-options");
	let c = mgr.register("dialog-style-sheet");

	assert_ne!(a, b);
	assert_eq!(mgr.find_by_class("dialog-book-options"), vec![a, b]);
	assert_eq!(mgr.count("dialog-style-sheet"), 1);
	assert!(mgr.is_registered(c));
	assert_eq!(mgr.count("unknown"), 0);
}

#[test]
fn unregister_drops_pending_requests() {
	let mgr = ComponentManager::new();
	let a = mgr.register("dialog-book-options");
	let b = mgr.register("dialog-book-options");

	assert_eq!(mgr.request_close("dialog-book-options"), 2);
	assert_eq!(mgr.request_close("dialog-book-options"), 2);
	assert!(mgr.unregister(a));
	assert!(!mgr.unregister(a));

	assert_eq!(mgr.take_close_requests(), vec![b]);
	assert!(mgr.take_close_requests().is_empty());
}
