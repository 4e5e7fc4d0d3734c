use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

/// Milliseconds on the page's monotonic clock. All animation timestamps use it.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map_or(0.0, |performance| performance.now())
}

/// Drives per-frame work through `requestAnimationFrame`.
///
/// `mark_dirty()` requests a frame; repeated requests before the frame fires
/// collapse into one. The frame function returns `true` to keep the loop going
/// for another frame. Dropping the scheduler cancels any pending frame.
pub struct RenderScheduler {
    inner: Rc<Inner>,
}

struct Inner {
    window: Option<web_sys::Window>,
    dirty: Cell<bool>,
    scheduled: Cell<bool>,
    raf_id: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl Inner {
    fn request_frame(&self) {
        if self.scheduled.replace(true) {
            return;
        }
        let callback = self.callback.borrow();
        let (Some(window), Some(callback)) = (self.window.as_ref(), callback.as_ref()) else {
            self.scheduled.set(false);
            return;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => self.raf_id.set(Some(id)),
            Err(_) => self.scheduled.set(false),
        }
    }
}

impl RenderScheduler {
    pub fn new(frame_fn: impl Fn() -> bool + 'static) -> Self {
        let inner = Rc::new(Inner {
            window: web_sys::window(),
            dirty: Cell::new(false),
            scheduled: Cell::new(false),
            raf_id: Cell::new(None),
            callback: RefCell::new(None),
        });

        let frame_inner = Rc::clone(&inner);
        let callback = Closure::<dyn FnMut()>::new(move || {
            frame_inner.scheduled.set(false);
            frame_inner.raf_id.set(None);
            if !frame_inner.dirty.replace(false) {
                return;
            }
            if frame_fn() {
                frame_inner.dirty.set(true);
                frame_inner.request_frame();
            }
        });
        *inner.callback.borrow_mut() = Some(callback);

        Self { inner }
    }

    pub fn mark_dirty(&self) {
        self.inner.dirty.set(true);
        self.inner.request_frame();
    }
}

impl Drop for RenderScheduler {
    fn drop(&mut self) {
        if let Some(raf_id) = self.inner.raf_id.replace(None)
            && let Some(window) = self.inner.window.as_ref()
        {
            let _ = window.cancel_animation_frame(raf_id);
        }
        self.inner.scheduled.set(false);
        self.inner.dirty.set(false);
        // The closure holds an Rc to `inner`; dropping it breaks the cycle.
        self.inner.callback.borrow_mut().take();
    }
}
