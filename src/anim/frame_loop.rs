use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A `requestAnimationFrame` loop that reschedules itself until stopped.
///
/// The callback only holds a weak reference to itself, so dropping the
/// `FrameLoop` frees it.
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
    request_id: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    /// Schedule `tick` on every display refresh. It receives the frame
    /// timestamp in milliseconds.
    pub fn start(mut tick: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let running = Rc::new(Cell::new(true));
        let request_id = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let weak_cb = Rc::downgrade(&callback);
        let running_cb = running.clone();
        let request_cb = request_id.clone();
        let window_cb = window.clone();
        *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |ts: f64| {
            request_cb.set(None);
            if !running_cb.get() {
                return;
            }
            tick(ts);

            let Some(cb) = weak_cb.upgrade() else { return };
            let cb = cb.borrow();
            let Some(closure) = cb.as_ref() else { return };
            match window_cb.request_animation_frame(closure.as_ref().unchecked_ref()) {
                Ok(id) => request_cb.set(Some(id)),
                Err(e) => {
                    log::error!("requestAnimationFrame failed: {:?}", e);
                    running_cb.set(false);
                }
            }
        }));

        {
            let cb = callback.borrow();
            if let Some(closure) = cb.as_ref() {
                let id = window.request_animation_frame(closure.as_ref().unchecked_ref())?;
                request_id.set(Some(id));
            }
        }

        Ok(Self {
            running,
            request_id,
            callback,
        })
    }

    /// Cancel the pending frame and release the callback. Must not be called
    /// from inside the tick.
    pub fn stop(&self) {
        self.running.set(false);
        if let Some(id) = self.request_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        self.callback.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
