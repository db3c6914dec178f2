//! Browser host for the landing page motion
//!
//! Binds the motion engine to real elements: resolves node refs to ids,
//! ticks the engine from `requestAnimationFrame`, feeds scroll and layout
//! geometry to scroll triggers, and writes changed targets back as inline
//! styles. Dropping the driver cancels the setup timer, stops the frame loop,
//! removes the window listeners and releases this mount's animations.
//!
//! On the server everything here is inert.

use leptos::html::{Button, Div, H1, Nav, P, Section};
use leptos::prelude::*;

use crate::core::choreography::HoverTarget;
#[cfg(not(feature = "ssr"))]
use crate::core::choreography::{Host, LandingMotion, LandingTargets, SETUP_DELAY_MS};
#[cfg(not(feature = "ssr"))]
use crate::core::motion::{Bounds, Engine, TargetId, Viewport};

#[cfg(not(feature = "ssr"))]
use gloo_timers::callback::Timeout;
#[cfg(not(feature = "ssr"))]
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};
#[cfg(not(feature = "ssr"))]
use wasm_bindgen::{JsCast, closure::Closure};
#[cfg(not(feature = "ssr"))]
use web_sys::HtmlElement;

/// Longest frame step fed to the engine, in seconds.
///
/// Background tabs stop animation frames; without a cap the first frame back
/// would skip every running animation to its end.
#[cfg(not(feature = "ssr"))]
const MAX_FRAME_STEP: f64 = 0.1;

/// Node refs for every animated element on the landing page.
#[derive(Clone, Copy)]
pub struct LandingNodes {
    pub backdrop: NodeRef<Div>,
    pub navbar: NodeRef<Nav>,
    pub login: NodeRef<Button>,
    pub hero: NodeRef<Section>,
    pub card: NodeRef<Div>,
    pub title: NodeRef<H1>,
    pub subtitle: NodeRef<P>,
    pub button: NodeRef<Button>,
    pub circles: [NodeRef<Div>; 3],
    pub features: [NodeRef<Div>; 3],
}

impl LandingNodes {
    pub fn new() -> Self {
        Self {
            backdrop: NodeRef::new(),
            navbar: NodeRef::new(),
            login: NodeRef::new(),
            hero: NodeRef::new(),
            card: NodeRef::new(),
            title: NodeRef::new(),
            subtitle: NodeRef::new(),
            button: NodeRef::new(),
            circles: std::array::from_fn(|_| NodeRef::new()),
            features: std::array::from_fn(|_| NodeRef::new()),
        }
    }

    /// Mounted elements keyed by target id; missing ones are skipped.
    #[cfg(not(feature = "ssr"))]
    fn resolve(&self, targets: &LandingTargets) -> Vec<(TargetId, HtmlElement)> {
        let mut pairs: Vec<(TargetId, Option<HtmlElement>)> = vec![
            (targets.backdrop, self.backdrop.get_untracked().map(|el| el.unchecked_into())),
            (targets.navbar, self.navbar.get_untracked().map(|el| el.unchecked_into())),
            (targets.login, self.login.get_untracked().map(|el| el.unchecked_into())),
            (targets.hero, self.hero.get_untracked().map(|el| el.unchecked_into())),
            (targets.card, self.card.get_untracked().map(|el| el.unchecked_into())),
            (targets.title, self.title.get_untracked().map(|el| el.unchecked_into())),
            (targets.subtitle, self.subtitle.get_untracked().map(|el| el.unchecked_into())),
            (targets.button, self.button.get_untracked().map(|el| el.unchecked_into())),
        ];
        for (id, node) in targets.circles.into_iter().zip(self.circles) {
            pairs.push((id, node.get_untracked().map(|el| el.unchecked_into())));
        }
        for (id, node) in targets.features.into_iter().zip(self.features) {
            pairs.push((id, node.get_untracked().map(|el| el.unchecked_into())));
        }
        pairs
            .into_iter()
            .filter_map(|(id, el)| el.map(|el| (id, el)))
            .collect()
    }
}

impl Default for LandingNodes {
    fn default() -> Self {
        Self::new()
    }
}

/// The browser window as a motion host.
#[cfg(not(feature = "ssr"))]
struct WebHost {
    window: web_sys::Window,
}

#[cfg(not(feature = "ssr"))]
impl Host for WebHost {
    fn scroll_to_top(&mut self) {
        self.window.scroll_to_with_x_and_y(0.0, 0.0);
        if let Some(document) = self.window.document() {
            if let Some(root) = document.document_element() {
                root.set_scroll_top(0);
            }
            if let Some(body) = document.body() {
                body.set_scroll_top(0);
            }
        }
    }
}

#[cfg(not(feature = "ssr"))]
type Elements = Rc<RefCell<Vec<(TargetId, HtmlElement)>>>;

/// Self-rescheduling `requestAnimationFrame` loop that ticks the engine.
#[cfg(not(feature = "ssr"))]
#[derive(Default)]
struct FrameLoop {
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    request: Cell<Option<i32>>,
    last: Cell<Option<f64>>,
}

#[cfg(not(feature = "ssr"))]
impl FrameLoop {
    fn start(window: web_sys::Window, engine: Rc<RefCell<Engine>>, elements: Elements) -> Rc<Self> {
        let frame = Rc::new(Self::default());
        let frame_for_callback = Rc::clone(&frame);
        let window_for_callback = window.clone();

        let callback = Closure::new(move |timestamp: f64| {
            let frame = &frame_for_callback;
            let dt = frame
                .last
                .replace(Some(timestamp))
                .map(|last| ((timestamp - last) / 1000.0).clamp(0.0, MAX_FRAME_STEP))
                .unwrap_or(0.0);
            if let Ok(mut engine) = engine.try_borrow_mut() {
                engine.tick(dt);
                flush(&mut engine, &elements.borrow());
            }
            frame.request_next(&window_for_callback);
        });
        *frame.callback.borrow_mut() = Some(callback);
        frame.request_next(&window);
        frame
    }

    fn request_next(&self, window: &web_sys::Window) {
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        if let Ok(id) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            self.request.set(Some(id));
        }
    }

    /// Cancels the pending frame and breaks the closure's reference cycle.
    fn stop(&self, window: &web_sys::Window) {
        if let Some(id) = self.request.take() {
            let _ = window.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
    }
}

/// Writes changed targets to their elements.
#[cfg(not(feature = "ssr"))]
fn flush(engine: &mut Engine, elements: &[(TargetId, HtmlElement)]) {
    for (id, transform, touched) in engine.take_dirty() {
        let Some((_, element)) = elements.iter().find(|(target, _)| *target == id) else {
            continue;
        };
        let style = element.style();
        for (property, value) in transform.css_declarations(touched) {
            let _ = style.set_property(property, &value);
        }
    }
}

/// Distance from the top of the document, ignoring transforms.
#[cfg(not(feature = "ssr"))]
fn document_top(element: &HtmlElement) -> f64 {
    let mut top = 0.0;
    let mut node = Some(element.clone());
    while let Some(current) = node {
        top += f64::from(current.offset_top());
        node = current
            .offset_parent()
            .and_then(|parent| parent.dyn_into::<HtmlElement>().ok());
    }
    top
}

#[cfg(not(feature = "ssr"))]
fn viewport(window: &web_sys::Window) -> Viewport {
    Viewport {
        scroll_y: window.scroll_y().unwrap_or(0.0),
        height: window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0),
    }
}

/// Re-reads layout boxes of trigger elements and the viewport.
#[cfg(not(feature = "ssr"))]
fn measure(
    window: &web_sys::Window,
    engine: &mut Engine,
    elements: &[(TargetId, HtmlElement)],
    targets: &LandingTargets,
) {
    for id in targets.scroll_observed() {
        if let Some((_, element)) = elements.iter().find(|(target, _)| *target == id) {
            engine.set_bounds(
                id,
                Bounds {
                    top: document_top(element),
                    height: f64::from(element.offset_height()),
                },
            );
        }
    }
    engine.set_viewport(viewport(window));
}

/// Everything one landing page mount holds in the browser.
#[cfg(not(feature = "ssr"))]
struct MotionDriver {
    window: web_sys::Window,
    engine: Rc<RefCell<Engine>>,
    motion: Rc<RefCell<LandingMotion>>,
    setup: Option<Timeout>,
    frame: Rc<FrameLoop>,
    listeners: Vec<WindowListenerHandle>,
}

#[cfg(not(feature = "ssr"))]
impl MotionDriver {
    fn mount(nodes: LandingNodes, on_ready: impl Fn() + 'static) -> Option<Self> {
        let Some(window) = web_sys::window() else {
            leptos::logging::warn!("No window available, landing motion disabled");
            return None;
        };
        let targets = LandingTargets::default();
        let engine = Rc::new(RefCell::new(Engine::new()));
        let motion = Rc::new(RefCell::new(LandingMotion::new(targets)));
        let elements: Elements = Rc::new(RefCell::new(Vec::new()));

        motion.borrow_mut().mount(&mut WebHost {
            window: window.clone(),
        });

        let frame = FrameLoop::start(window.clone(), Rc::clone(&engine), Rc::clone(&elements));

        let setup = Timeout::new(SETUP_DELAY_MS, {
            let window = window.clone();
            let engine = Rc::clone(&engine);
            let motion = Rc::clone(&motion);
            let elements = Rc::clone(&elements);
            move || {
                *elements.borrow_mut() = nodes.resolve(&targets);
                let mut engine = engine.borrow_mut();
                motion
                    .borrow_mut()
                    .start(&mut engine, &mut rand::thread_rng());
                measure(&window, &mut engine, &elements.borrow(), &targets);
                flush(&mut engine, &elements.borrow());
                leptos::logging::log!(
                    "Landing motion started: {} elements, {} animations, {} scroll triggers",
                    elements.borrow().len(),
                    engine.active_animations(),
                    engine.active_triggers()
                );
                on_ready();
            }
        });

        let on_scroll = window_event_listener(leptos::ev::scroll, {
            let window = window.clone();
            let engine = Rc::clone(&engine);
            move |_| {
                if let Ok(mut engine) = engine.try_borrow_mut() {
                    engine.scroll_to(window.scroll_y().unwrap_or(0.0));
                }
            }
        });
        let on_resize = window_event_listener(leptos::ev::resize, {
            let window = window.clone();
            let engine = Rc::clone(&engine);
            let elements = Rc::clone(&elements);
            move |_| {
                if let Ok(mut engine) = engine.try_borrow_mut() {
                    measure(&window, &mut engine, &elements.borrow(), &targets);
                }
            }
        });

        Some(Self {
            window,
            engine,
            motion,
            setup: Some(setup),
            frame,
            listeners: vec![on_scroll, on_resize],
        })
    }

    fn hover(&self, target: HoverTarget, entering: bool) {
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            self.motion.borrow_mut().hover(&mut engine, target, entering);
        }
    }
}

#[cfg(not(feature = "ssr"))]
impl Drop for MotionDriver {
    fn drop(&mut self) {
        if let Some(setup) = self.setup.take() {
            setup.cancel();
        }
        self.frame.stop(&self.window);
        for listener in self.listeners.drain(..) {
            listener.remove();
        }
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            let released = self.motion.borrow_mut().dispose(&mut engine);
            leptos::logging::log!("Landing motion disposed: {} handles released", released);
        }
    }
}

/// Copyable handle to the current mount's motion, usable from event handlers.
#[derive(Clone, Copy)]
pub struct MotionHandle {
    #[cfg(not(feature = "ssr"))]
    driver: StoredValue<Option<MotionDriver>, LocalStorage>,
}

impl MotionHandle {
    pub fn new() -> Self {
        Self {
            #[cfg(not(feature = "ssr"))]
            driver: StoredValue::new_local(None),
        }
    }

    /// Scrolls to the top and schedules animation setup.
    ///
    /// `on_ready` runs once the initial hidden state has been written.
    pub fn mount(&self, nodes: LandingNodes, on_ready: impl Fn() + 'static) {
        #[cfg(not(feature = "ssr"))]
        {
            let driver = MotionDriver::mount(nodes, on_ready);
            // a previous driver, if any, is dropped and torn down here
            self.driver.set_value(driver);
        }
        #[cfg(feature = "ssr")]
        {
            let _ = (nodes, on_ready);
        }
    }

    pub fn hover(&self, target: HoverTarget, entering: bool) {
        #[cfg(not(feature = "ssr"))]
        {
            self.driver.with_value(|driver| {
                if let Some(driver) = driver {
                    driver.hover(target, entering);
                }
            });
        }
        #[cfg(feature = "ssr")]
        {
            let _ = (target, entering);
        }
    }

    /// Tears down the current mount's timer, frame loop, listeners and animations.
    pub fn dispose(&self) {
        #[cfg(not(feature = "ssr"))]
        {
            let _ = self.driver.try_update_value(|driver| driver.take());
        }
    }
}

impl Default for MotionHandle {
    fn default() -> Self {
        Self::new()
    }
}
