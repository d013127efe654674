//! Browser entry point for the marathon pace calculator.
//! Attaches the calculator to the page markup once the DOM is ready.

use log::{info, warn};
use marathon_pace::config::{GoalPageConfig, GOAL_PAGE_GLOBAL};
use marathon_pace::page::{PaceCalculator, Trigger};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

mod components;
mod dom;
mod mounts;

use dom::DomFields;

/// Read `window.GOAL_PAGE` if the page defines one.
///
/// An object that does not deserialize still marks a goal page, just one
/// without a usable goal.
fn read_goal_page() -> Option<GoalPageConfig> {
    let value = js_sys::Reflect::get(&gloo_utils::window(), &JsValue::from_str(GOAL_PAGE_GLOBAL))
        .ok()
        .filter(|v| v.is_truthy())?;

    match serde_wasm_bindgen::from_value(value) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Ignoring malformed {}: {}", GOAL_PAGE_GLOBAL, e);
            Some(GoalPageConfig::default())
        }
    }
}

/// Wire the buttons, then draw the chart and apply goal page defaults.
fn start() {
    let goal = read_goal_page();
    info!("Starting pace calculator (goal page: {})", goal.is_some());

    let fields = DomFields::new();
    let calculator = Rc::new(RefCell::new(PaceCalculator::new(DomFields::new(), goal)));

    let calc = calculator.clone();
    fields.on_click(Trigger::Calculate, move || calc.borrow_mut().calculate());
    let calc = calculator.clone();
    fields.on_click(Trigger::Reset, move || calc.borrow_mut().reset());

    calculator.borrow_mut().init();
}

/// Entry point: runs `start` now, or after DOMContentLoaded while still loading.
fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();

    let document = gloo_utils::document();
    if document.ready_state() != "loading" {
        start();
        return;
    }

    let on_ready = Closure::once(start);
    if let Err(e) = document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
    {
        warn!("Failed to wait for DOMContentLoaded: {:?}", e);
        return;
    }
    on_ready.forget();
}
