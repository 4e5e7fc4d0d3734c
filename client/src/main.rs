mod animation;
mod app;
mod layers;
mod lifecycle;
mod loader;
mod logo;
mod map;
mod render_loop;
mod sections;
mod tooltip;

use leptos::mount::mount_to;
use std::any::Any;
use std::cell::RefCell;
use wasm_bindgen::JsCast;

thread_local! {
    static APP_MOUNT_HANDLE: RefCell<Option<Box<dyn Any>>> = RefCell::new(None);
}

fn main() {
    console_error_panic_hook::set_once();
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let Some(target) = document
        .get_element_by_id("app")
        .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .or_else(|| document.body())
    else {
        return;
    };

    APP_MOUNT_HANDLE.with(move |slot| {
        // Unmounting the previous tree first runs its cleanups (pending frame,
        // pointer listener, in-flight load guard) before anything new attaches.
        let _previous = slot.borrow_mut().take();
        let handle = mount_to(target, app::App);
        *slot.borrow_mut() = Some(Box::new(handle));
    });
}
