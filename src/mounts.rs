//! Thread-local registry of the yew apps mounted into page containers.
//!
//! Each output container gets one app on first render. Later renders update
//! its props instead of mounting again.

use crate::components::{OutputView, OutputViewProps};
use marathon_pace::page::{Content, Output};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use web_sys::Element;
use yew::AppHandle;

thread_local! {
    /// Mounted apps keyed by the container they render into.
    static MOUNTS: RefCell<HashMap<Output, AppHandle<OutputView>>> =
        RefCell::new(HashMap::new());
}

/// Show `content` inside `host`, mounting a view on first use.
pub fn show(output: Output, host: Element, content: Content) {
    let props = OutputViewProps {
        content: Rc::new(content),
    };
    MOUNTS.with(|m| {
        let mut mounts = m.borrow_mut();
        match mounts.get_mut(&output) {
            Some(handle) => handle.update(props),
            None => {
                let handle = yew::Renderer::<OutputView>::with_root_and_props(host, props).render();
                mounts.insert(output, handle);
            }
        }
    });
}
