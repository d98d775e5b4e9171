//! Loading indicators and the drill-down gate

use std::sync::atomic::{AtomicBool, Ordering};

use super::DashboardElements;
use crate::dom::{Dom, NodeId};

pub const DEATHS_SPINNER_ID: &str = "deaths-spinner";
pub const RECOVERED_SPINNER_ID: &str = "recovered-spinner";

/// Build a detached ripple spinner with the given element id
pub fn create_spinner_element<D: Dom + ?Sized>(dom: &mut D, id: &str) -> NodeId {
    let wrapper = dom.create_element("div");
    dom.set_attribute(wrapper, "id", id);
    dom.set_attribute(wrapper, "class", "spinner-wrapper flex justify-center align-center");

    let spinner = dom.create_element("div");
    dom.set_attribute(spinner, "class", "ripple-spinner");
    let ring = dom.create_element("div");
    dom.append_child(spinner, ring);
    let ring = dom.create_element("div");
    dom.append_child(spinner, ring);

    dom.append_child(wrapper, spinner);
    wrapper
}

/// Show the spinners in both result lists
pub fn start_loading_animation<D: Dom + ?Sized>(dom: &mut D, elements: &DashboardElements) {
    dom.append_child(elements.deaths_list, elements.deaths_spinner);
    dom.append_child(elements.recovered_list, elements.recovered_spinner);
}

/// Remove the spinners from both result lists
pub fn end_loading_animation<D: Dom + ?Sized>(dom: &mut D, elements: &DashboardElements) {
    dom.remove_child(elements.deaths_list, elements.deaths_spinner);
    dom.remove_child(elements.recovered_list, elements.recovered_spinner);
}

/// Re-entrancy gate for the drill-down
///
/// At most one [`LoadingGuard`] exists at a time. Acquisition never waits: a
/// caller that finds the gate closed is turned away.
#[derive(Debug, Default)]
pub struct LoadingGate {
    loading: AtomicBool,
}

impl LoadingGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Enter the loading state, or `None` if already loading
    pub fn try_acquire(&self) -> Option<LoadingGuard<'_>> {
        self.loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadingGuard { gate: self })
    }
}

/// Holds the gate closed until dropped
#[derive(Debug)]
pub struct LoadingGuard<'a> {
    gate: &'a LoadingGate,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.gate.loading.store(false, Ordering::Release);
    }
}
