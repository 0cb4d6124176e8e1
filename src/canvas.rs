// Surface backed by a 2d canvas appended to the host container.

use crate::color::Color;
use crate::error::FieldError;
use crate::surface::Surface;
use std::f64::consts::PI;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

pub struct CanvasSurface {
    container: HtmlElement,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    // fillStyle is only touched when the colour actually changes
    fill: Option<Color>,
}

impl CanvasSurface {
    /// Creates a canvas, appends it to `container` and grabs its 2d context.
    pub fn create(document: &Document, container: HtmlElement) -> Result<CanvasSurface, FieldError> {
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| FieldError::Js("created element is not a canvas".to_owned()))?;

        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"alpha".into(), &JsValue::from_bool(true))?;
        let context = canvas
            .get_context_with_context_options("2d", &options)?
            .ok_or(FieldError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FieldError::NoContext)?;

        container.append_child(&canvas)?;

        Ok(CanvasSurface {
            container,
            canvas,
            context,
            fill: None,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn container_size(&self) -> (u32, u32) {
        let width = self.container.offset_width().max(0) as u32;
        let height = self.container.offset_height().max(0) as u32;
        (width, height)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        // Resizing a canvas resets its context state, fillStyle included
        self.fill = None;
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.clear_rect(x, y, width, height);
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.fill == Some(color) {
            return;
        }
        self.context.set_fill_style(&JsValue::from_str(&color.to_css()));
        self.fill = Some(color);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.context.begin_path();
        if let Err(err) = self.context.arc(x, y, radius, 0.0, PI * 2.0) {
            log::warn!("canvas arc rejected: {:?}", err);
            return;
        }
        self.context.fill();
    }
}
