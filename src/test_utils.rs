//! Recording components shared by the unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::Component;
use crate::ComponentContext;

/// Ordered log of lifecycle hook invocations.
#[derive(Clone, Default)]
pub(crate) struct Journal {
    entries: Rc<RefCell<Vec<String>>>,
}

impl Journal {
    pub(crate) fn push(&self, entry: String) {
        self.entries.borrow_mut().push(entry);
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// Entries ending with the given hook name, in invocation order.
    pub(crate) fn hooks(&self, hook: &str) -> Vec<String> {
        let suffix = format!(":{hook}");
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.ends_with(&suffix))
            .cloned()
            .collect()
    }

    pub(crate) fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

/// Writes `label:hook` into its journal for every hook.
pub(crate) struct Recorder {
    pub(crate) label: &'static str,
    journal: Journal,
}

impl Recorder {
    pub(crate) fn new(label: &'static str, journal: &Journal) -> Self {
        Self {
            label,
            journal: journal.clone(),
        }
    }

    fn record(&self, hook: &str) {
        self.journal.push(format!("{}:{hook}", self.label));
    }
}

impl Component for Recorder {
    fn add_to_system(&mut self, _context: ComponentContext) {
        self.record("add_to_system");
    }

    fn on_create(&mut self, _context: ComponentContext) {
        self.record("on_create");
    }

    fn initialize(&mut self, _context: ComponentContext) {
        self.record("initialize");
    }

    fn update(&mut self, _context: ComponentContext) {
        self.record("update");
    }

    fn shutdown_events(&mut self, _context: ComponentContext) {
        self.record("shutdown_events");
    }

    fn on_shutdown(&mut self, _context: ComponentContext) {
        self.record("on_shutdown");
    }

    fn remove_from_system(&mut self, _context: ComponentContext) {
        self.record("remove_from_system");
    }
}

/// Component without any hooks.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Marker(pub(crate) u32);

impl Component for Marker {}
