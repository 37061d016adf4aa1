use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// A `setInterval` timer that is cleared when stopped or dropped.
pub struct IntervalTimer {
    handle: Option<i32>,
    _callback: Closure<dyn FnMut()>,
}

impl IntervalTimer {
    pub fn start(period_ms: u32, tick: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let callback = Closure::<dyn FnMut()>::new(tick);
        let timeout = i32::try_from(period_ms).unwrap_or(i32::MAX);
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            timeout,
        )?;
        Ok(Self {
            handle: Some(handle),
            _callback: callback,
        })
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }
}

impl Drop for IntervalTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
