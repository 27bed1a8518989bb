//! `DrawingCanvas` exported to JavaScript.

use crate::canvas_surface::CanvasSurface;
use crate::events::pointer_input;
use examink_core::{CanvasConfig, ContainerMetrics, DrawingData, ToolKind};
use examink_render::DrawingSession;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlCanvasElement, HtmlElement};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"examink: logger already initialized".into());
    }
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

/// A drawing canvas bound to a `<canvas>` element and its container.
#[wasm_bindgen]
pub struct DrawingCanvas {
    session: DrawingSession<CanvasSurface>,
    container: HtmlElement,
}

#[wasm_bindgen]
impl DrawingCanvas {
    /// Mount on `canvas`, sizing it to `container`.
    ///
    /// `config` and `initial_data` may be `undefined`. `on_data_change`
    /// receives the full drawing after every commit, undo and clear.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        container: HtmlElement,
        config: JsValue,
        initial_data: JsValue,
        on_data_change: js_sys::Function,
    ) -> Result<DrawingCanvas, JsValue> {
        let config: CanvasConfig = if config.is_undefined() || config.is_null() {
            CanvasConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(js_error)?
        };
        let initial: Option<DrawingData> = if initial_data.is_undefined() || initial_data.is_null() {
            None
        } else {
            Some(serde_wasm_bindgen::from_value(initial_data).map_err(js_error)?)
        };

        let metrics = container_metrics(&container);
        let session = DrawingSession::mount(CanvasSurface::new(canvas), config, metrics, initial)
            .with_on_change(move |data| {
                let value = match serde_wasm_bindgen::to_value(data) {
                    Ok(value) => value,
                    Err(e) => {
                        log::error!("Failed to serialize drawing: {}", e);
                        return;
                    }
                };
                if let Err(e) = on_data_change.call1(&JsValue::NULL, &value) {
                    log::error!("onDataChange threw: {:?}", e);
                }
            });
        Ok(Self { session, container })
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, event: &Event) {
        event.prevent_default();
        let point = self.resolve(event);
        self.session.pointer_down(point);
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, event: &Event) {
        if !self.session.is_capturing() {
            return;
        }
        event.prevent_default();
        let point = self.resolve(event);
        self.session.pointer_move(point);
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.session.pointer_up();
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) {
        self.session.pointer_leave();
    }

    /// Re-measure the container and redraw. Call from a window resize listener.
    pub fn resize(&mut self) {
        self.session.resize(container_metrics(&self.container));
    }

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    pub fn clear(&mut self) {
        self.session.clear();
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    /// Select a tool by name. Returns false for unknown or disabled tools.
    #[wasm_bindgen(js_name = setTool)]
    pub fn set_tool(&mut self, name: &str) -> bool {
        match ToolKind::from_name(name) {
            Some(tool) => self.session.set_tool(tool),
            None => {
                log::debug!("Unknown tool {:?}", name);
                false
            }
        }
    }

    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&mut self, color: &str) {
        self.session.set_color(color);
    }

    #[wasm_bindgen(js_name = setWidth)]
    pub fn set_width(&mut self, width: f64) {
        self.session.set_width(width);
    }

    #[wasm_bindgen(js_name = drawingData)]
    pub fn drawing_data(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.session.drawing_data()).map_err(js_error)
    }

    fn resolve(&self, event: &Event) -> examink_core::Point {
        let rect = self.session.surface().canvas().get_bounding_client_rect();
        self.session
            .resolve(&pointer_input(event), rect.left(), rect.top())
    }
}

fn container_metrics(container: &HtmlElement) -> ContainerMetrics {
    let width = container.get_bounding_client_rect().width();
    let device_pixel_ratio = web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0);
    ContainerMetrics::new(width, device_pixel_ratio)
}
