// Browser wiring: finds the container, mounts the canvas, and connects
// requestAnimationFrame, mousemove, resize and the resize debounce timer to a
// ParticleField.

use crate::canvas::CanvasSurface;
use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::field::ParticleField;
use crate::random::{thread_random, ThreadRandom};
use crate::schedule::{CallbackHandle, Scheduler};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

pub const DEFAULT_CONTAINER: &str = ".neon-particles";

type WebField = ParticleField<CanvasSurface, BrowserScheduler, ThreadRandom>;
type FrameCallback = Closure<dyn FnMut(f64)>;
type TimerCallback = Closure<dyn FnMut()>;
type PointerCallback = Closure<dyn FnMut(MouseEvent)>;

pub struct ConsoleTimer<'a> {
    name: &'a str,
}

impl<'a> ConsoleTimer<'a> {
    pub fn new(name: &'a str) -> ConsoleTimer<'a> {
        console::time_with_label(name);
        ConsoleTimer { name }
    }
}

impl<'a> Drop for ConsoleTimer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

// Closures the scheduler hands to the browser. They capture the field, so they are
// filled in after the field exists and dropped on teardown to break the cycle.
#[derive(Default)]
struct Callbacks {
    frame: RefCell<Option<FrameCallback>>,
    resize_timer: RefCell<Option<TimerCallback>>,
}

pub struct BrowserScheduler {
    window: Window,
    callbacks: Rc<Callbacks>,
}

impl Scheduler for BrowserScheduler {
    fn request_frame(&mut self) -> Option<CallbackHandle> {
        let slot = self.callbacks.frame.borrow();
        let callback = slot.as_ref()?;
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::warn!("requestAnimationFrame failed: {:?}", err);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: CallbackHandle) {
        if let Err(err) = self.window.cancel_animation_frame(handle) {
            log::warn!("cancelAnimationFrame failed: {:?}", err);
        }
    }

    fn start_timer(&mut self, delay_ms: u32) -> Option<CallbackHandle> {
        let slot = self.callbacks.resize_timer.borrow();
        let callback = slot.as_ref()?;
        let delay = delay_ms.min(i32::MAX as u32) as i32;
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay,
            ) {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::warn!("setTimeout failed: {:?}", err);
                None
            }
        }
    }

    fn cancel_timer(&mut self, handle: CallbackHandle) {
        self.window.clear_timeout_with_handle(handle);
    }
}

/// Returned to JS by `init_particles`. Call `teardown()` to stop the animation and
/// detach every listener.
#[wasm_bindgen]
pub struct ParticleHandle {
    field: Rc<RefCell<WebField>>,
    window: Window,
    canvas: HtmlCanvasElement,
    callbacks: Rc<Callbacks>,
    pointer_listener: Option<PointerCallback>,
    resize_listener: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl ParticleHandle {
    pub fn teardown(&mut self) {
        self.field.borrow_mut().teardown();

        if let Some(listener) = self.pointer_listener.take() {
            if let Err(err) = self
                .canvas
                .remove_event_listener_with_callback("mousemove", listener.as_ref().unchecked_ref())
            {
                log::warn!("failed to detach mousemove listener: {:?}", err);
            }
        }
        if let Some(listener) = self.resize_listener.take() {
            if let Err(err) = self
                .window
                .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())
            {
                log::warn!("failed to detach resize listener: {:?}", err);
            }
        }

        self.callbacks.frame.borrow_mut().take();
        self.callbacks.resize_timer.borrow_mut().take();
    }

    pub fn is_running(&self) -> bool {
        self.field.borrow().is_running()
    }

    pub fn particle_count(&self) -> usize {
        self.field.borrow().particles().len()
    }

    pub fn frames_rendered(&self) -> f64 {
        self.field.borrow().stats().frames_rendered as f64
    }

    pub fn spawns_dropped(&self) -> f64 {
        self.field.borrow().stats().spawns_dropped as f64
    }

    /// Feeds a pointer position directly, as if the mouse moved there.
    pub fn pointer_moved(&self, x: f64, y: f64) -> usize {
        self.field.borrow_mut().pointer_moved(x, y, js_sys::Date::now())
    }

    pub fn canvas(&self) -> HtmlCanvasElement {
        self.canvas.clone()
    }
}

/// Mounts a particle field in the first element matching `selector`. `Ok(None)` when
/// nothing matches; the page simply has no particles then.
pub fn attach(selector: &str, config: FieldConfig) -> Result<Option<ParticleHandle>, FieldError> {
    config.validate()?;
    let window = web_sys::window().ok_or(FieldError::NoWindow)?;
    let document = window.document().ok_or(FieldError::NoDocument)?;

    let container = match document.query_selector(selector)? {
        Some(element) => element,
        None => {
            log::debug!("no element matches {:?}; particles disabled", selector);
            return Ok(None);
        }
    };
    let container = container
        .dyn_into::<HtmlElement>()
        .map_err(|_| FieldError::Js(format!("{} is not an HTML element", selector)))?;

    let surface = CanvasSurface::create(&document, container)?;
    let canvas = surface.canvas().clone();
    let callbacks = Rc::new(Callbacks::default());
    let scheduler = BrowserScheduler {
        window: window.clone(),
        callbacks: Rc::clone(&callbacks),
    };
    let field = Rc::new(RefCell::new(ParticleField::new(
        surface,
        scheduler,
        thread_random(),
        config,
    )?));

    {
        let field = Rc::clone(&field);
        let profile = config.profile;
        let frame = Closure::wrap(Box::new(move |now: f64| {
            let _timer = if profile {
                Some(ConsoleTimer::new("particle frame"))
            } else {
                None
            };
            field.borrow_mut().tick(now);
        }) as Box<dyn FnMut(f64)>);
        *callbacks.frame.borrow_mut() = Some(frame);
    }
    {
        let field = Rc::clone(&field);
        let resize_timer = Closure::wrap(Box::new(move || {
            field.borrow_mut().resize_timer_fired();
        }) as Box<dyn FnMut()>);
        *callbacks.resize_timer.borrow_mut() = Some(resize_timer);
    }

    let pointer_listener = {
        let field = Rc::clone(&field);
        let target = canvas.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            let rect = target.get_bounding_client_rect();
            let x = event.client_x() as f64 - rect.left();
            let y = event.client_y() as f64 - rect.top();
            field.borrow_mut().pointer_moved(x, y, js_sys::Date::now());
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    canvas.add_event_listener_with_callback("mousemove", pointer_listener.as_ref().unchecked_ref())?;

    let resize_listener = {
        let field = Rc::clone(&field);
        Closure::wrap(Box::new(move || {
            field.borrow_mut().request_resize();
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_listener.as_ref().unchecked_ref())?;

    field.borrow_mut().start();

    Ok(Some(ParticleHandle {
        field,
        window,
        canvas,
        callbacks,
        pointer_listener: Some(pointer_listener),
        resize_listener: Some(resize_listener),
    }))
}

#[wasm_bindgen]
pub fn init_particles(selector: Option<String>) -> Result<Option<ParticleHandle>, JsValue> {
    let selector = selector.unwrap_or_else(|| DEFAULT_CONTAINER.to_owned());
    Ok(attach(&selector, FieldConfig::default())?)
}

#[wasm_bindgen]
pub fn init_particles_with(
    selector: Option<String>,
    config: &FieldConfig,
) -> Result<Option<ParticleHandle>, JsValue> {
    let selector = selector.unwrap_or_else(|| DEFAULT_CONTAINER.to_owned());
    Ok(attach(&selector, *config)?)
}
