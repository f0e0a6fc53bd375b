#![cfg(target_arch = "wasm32")]

use crate::create_app;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

/// Id of the `<canvas>` element the page provides.
const CANVAS_ID: &str = "schema_mapper_canvas";

fn find_canvas() -> Result<HtmlCanvasElement, JsValue> {
    let element = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CANVAS_ID))
        .ok_or_else(|| {
            JsValue::from_str(&format!("no #{CANVAS_ID} element on the page"))
        })?;
    element.dyn_into::<HtmlCanvasElement>().map_err(JsValue::from)
}

/// Browser entry point: mounts the editor on the page canvas.
#[wasm_bindgen]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let canvas = find_canvas()?;

    eframe::WebRunner::new()
        .start(
            canvas,
            eframe::WebOptions::default(),
            Box::new(|cc| Ok(Box::new(create_app(cc)))),
        )
        .await
}
