// Browser driver: binds an Animator to a canvas, the window resize event and
// requestAnimationFrame.
//
// The frame and resize closures only hold a Weak reference to the shared
// state, so freeing the HeroAnimator from JS tears everything down. The
// pending frame handle lives in a Cell and is taken on shutdown, which makes
// cancellation happen at most once per scheduled frame.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};

use crate::animator::{Animator, Lifecycle, Viewport};
use crate::config::AnimatorConfig;
use crate::error::{describe_js, AnimatorError};
use crate::surface::CanvasSurface;
use crate::Timer;

const RESIZE_EVENT: &str = "resize";

struct Driver {
    animator: RefCell<Animator<CanvasSurface>>,
    pending_frame: Cell<Option<i32>>,
    listening: Cell<bool>,
    resize_events: Cell<u32>,
    frame_callback: RefCell<Option<Closure<dyn FnMut()>>>,
    resize_callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

fn window() -> Result<Window, AnimatorError> {
    web_sys::window().ok_or(AnimatorError::NoWindow)
}

fn as_function(callback: &Closure<dyn FnMut()>) -> &js_sys::Function {
    callback.as_ref().unchecked_ref()
}

fn measure_viewport(window: &Window) -> Viewport {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Viewport::new(width, height)
}

impl Driver {
    fn new(config: AnimatorConfig) -> Rc<Driver> {
        let driver = Rc::new(Driver {
            animator: RefCell::new(Animator::new(config)),
            pending_frame: Cell::new(None),
            listening: Cell::new(false),
            resize_events: Cell::new(0),
            frame_callback: RefCell::new(None),
            resize_callback: RefCell::new(None),
        });

        let weak: Weak<Driver> = Rc::downgrade(&driver);
        let on_frame = Closure::wrap(Box::new(move || {
            if let Some(driver) = weak.upgrade() {
                driver.on_frame();
            }
        }) as Box<dyn FnMut()>);

        let weak: Weak<Driver> = Rc::downgrade(&driver);
        let on_resize = Closure::wrap(Box::new(move || {
            if let Some(driver) = weak.upgrade() {
                driver.resize_events.set(driver.resize_events.get() + 1);
                driver.on_resize();
            }
        }) as Box<dyn FnMut()>);

        *driver.frame_callback.borrow_mut() = Some(on_frame);
        *driver.resize_callback.borrow_mut() = Some(on_resize);
        driver
    }

    fn initialize(&self, canvas: Option<HtmlCanvasElement>) {
        if self.animator.borrow().is_running() {
            self.shutdown();
        }
        if let Err(err) = self.try_initialize(canvas) {
            warn!("particle field not started: {}", err);
            self.shutdown();
        }
    }

    fn try_initialize(&self, canvas: Option<HtmlCanvasElement>) -> Result<(), AnimatorError> {
        let canvas = match canvas {
            Some(canvas) => canvas,
            None => {
                debug!("no canvas supplied, particle field stays idle");
                return Ok(());
            }
        };
        let window = window()?;
        let surface = CanvasSurface::new(canvas)?;
        let viewport = measure_viewport(&window);
        let state = self
            .animator
            .borrow_mut()
            .initialize(Some(surface), viewport);
        debug!("particle field is {:?} after initialize", state);
        if state != Lifecycle::Running {
            return Ok(());
        }

        self.subscribe_resize(&window)?;
        self.schedule_frame(&window)
    }

    fn subscribe_resize(&self, window: &Window) -> Result<(), AnimatorError> {
        if let Some(callback) = self.resize_callback.borrow().as_ref() {
            window
                .add_event_listener_with_callback(RESIZE_EVENT, as_function(callback))
                .map_err(|e| AnimatorError::Listener {
                    event: RESIZE_EVENT,
                    reason: describe_js(&e),
                })?;
            self.listening.set(true);
        }
        Ok(())
    }

    fn unsubscribe_resize(&self, window: &Window) -> Result<(), AnimatorError> {
        if !self.listening.replace(false) {
            return Ok(());
        }
        if let Some(callback) = self.resize_callback.borrow().as_ref() {
            window
                .remove_event_listener_with_callback(RESIZE_EVENT, as_function(callback))
                .map_err(|e| AnimatorError::Listener {
                    event: RESIZE_EVENT,
                    reason: describe_js(&e),
                })?;
        }
        Ok(())
    }

    fn schedule_frame(&self, window: &Window) -> Result<(), AnimatorError> {
        if let Some(callback) = self.frame_callback.borrow().as_ref() {
            let handle = window
                .request_animation_frame(as_function(callback))
                .map_err(|e| AnimatorError::Schedule(describe_js(&e)))?;
            self.pending_frame.set(Some(handle));
        }
        Ok(())
    }

    fn on_frame(&self) {
        self.pending_frame.set(None);

        let rearm = {
            let mut animator = self.animator.borrow_mut();
            let _timer = if animator.config().profile_frames {
                Some(Timer::new("HeroAnimator::tick"))
            } else {
                None
            };
            match animator.tick() {
                Ok(running) => running,
                Err(err) => {
                    warn!("particle frame failed: {}", err);
                    animator.is_running()
                }
            }
        };
        if !rearm {
            return;
        }

        let scheduled = window().and_then(|window| self.schedule_frame(&window));
        if let Err(err) = scheduled {
            warn!("particle field stopped: {}", err);
            self.shutdown();
        }
    }

    fn on_resize(&self) {
        match window() {
            Ok(window) => {
                let viewport = measure_viewport(&window);
                self.animator.borrow_mut().on_resize(viewport);
            }
            Err(err) => warn!("resize ignored: {}", err),
        }
    }

    fn shutdown(&self) {
        let window = match window() {
            Ok(window) => Some(window),
            Err(err) => {
                debug!("shutdown without window: {}", err);
                None
            }
        };
        if let Some(window) = window.as_ref() {
            if let Some(handle) = self.pending_frame.take() {
                if let Err(e) = window.cancel_animation_frame(handle) {
                    warn!("failed to cancel frame {}: {}", handle, describe_js(&e));
                }
            }
            if let Err(err) = self.unsubscribe_resize(window) {
                warn!("{}", err);
            }
        }
        self.pending_frame.set(None);
        self.listening.set(false);
        self.animator.borrow_mut().shutdown();
    }
}

/// Ambient particle background for the landing page hero canvas.
#[wasm_bindgen]
pub struct HeroAnimator {
    driver: Rc<Driver>,
}

#[wasm_bindgen]
impl HeroAnimator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> HeroAnimator {
        HeroAnimator {
            driver: Driver::new(AnimatorConfig::default()),
        }
    }

    /// Builds an animator from a JSON object of config overrides.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<HeroAnimator, JsValue> {
        let config = AnimatorConfig::from_json(json)?;
        Ok(HeroAnimator {
            driver: Driver::new(config),
        })
    }

    /// Starts the animation on `canvas`. Does nothing when no canvas (or no
    /// 2d context) is available. Restarts if already running.
    pub fn initialize(&self, canvas: Option<HtmlCanvasElement>) {
        self.driver.initialize(canvas);
    }

    #[wasm_bindgen(js_name = onResize)]
    pub fn on_resize(&self) {
        self.driver.on_resize();
    }

    pub fn shutdown(&self) {
        self.driver.shutdown();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.driver.animator.borrow().is_running()
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.driver.animator.borrow().field().len()
    }

    #[wasm_bindgen(js_name = frameCount)]
    pub fn frame_count(&self) -> f64 {
        self.driver.animator.borrow().frame_count() as f64
    }

    /// Window `resize` events delivered to the listener so far.
    #[wasm_bindgen(js_name = resizeEvents)]
    pub fn resize_events(&self) -> u32 {
        self.driver.resize_events.get()
    }

    /// Particle positions flattened as `[x0, y0, x1, y1, ..]`.
    #[wasm_bindgen(js_name = particlePositions)]
    pub fn particle_positions(&self) -> Vec<f64> {
        self.driver
            .animator
            .borrow()
            .field()
            .particles()
            .iter()
            .flat_map(|p| p.pos.iter().copied())
            .collect()
    }

    #[wasm_bindgen(js_name = surfaceWidth)]
    pub fn surface_width(&self) -> u32 {
        self.driver.animator.borrow().field().bounds().width
    }

    #[wasm_bindgen(js_name = surfaceHeight)]
    pub fn surface_height(&self) -> u32 {
        self.driver.animator.borrow().field().bounds().height
    }
}

impl Default for HeroAnimator {
    fn default() -> Self {
        HeroAnimator::new()
    }
}

impl Drop for HeroAnimator {
    fn drop(&mut self) {
        self.driver.shutdown();
    }
}
