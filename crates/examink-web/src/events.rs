//! DOM event to pointer input conversion.

use examink_core::{Point, PointerInput};
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, TouchEvent};

/// Extract client coordinates from a mouse or touch event.
///
/// Touch events are recognized by their `type` so browsers without a
/// `TouchEvent` constructor never hit an `instanceof` check.
pub fn pointer_input(event: &Event) -> PointerInput {
    if event.type_().starts_with("touch") {
        let touches = event.unchecked_ref::<TouchEvent>().touches();
        let contacts = (0..touches.length())
            .filter_map(|i| touches.get(i))
            .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())))
            .collect();
        return PointerInput::touch(contacts);
    }
    match event.dyn_ref::<MouseEvent>() {
        Some(mouse) => PointerInput::mouse(f64::from(mouse.client_x()), f64::from(mouse.client_y())),
        None => PointerInput::touch(Vec::new()),
    }
}
