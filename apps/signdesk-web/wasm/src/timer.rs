//! `setTimeout` as a future

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// Resolve after `ms` milliseconds
pub async fn sleep(ms: u32) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;
    let timeout = i32::try_from(ms).unwrap_or(i32::MAX);

    let promise = Promise::new(&mut |resolve, reject| {
        if let Err(err) =
            window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout)
        {
            let _ = reject.call1(&JsValue::NULL, &err);
        }
    });

    JsFuture::from(promise).await?;
    Ok(())
}

/// Promise-returning wrapper for hosts that want the same delay
#[wasm_bindgen]
pub fn delay(ms: u32) -> Promise {
    wasm_bindgen_futures::future_to_promise(async move {
        sleep(ms).await?;
        Ok(JsValue::UNDEFINED)
    })
}
