use anyhow::Result;
use input_analyzer::analyzer::Analyzer;
use input_analyzer::cfg;
use input_analyzer::report::render_key_log;
use input_analyzer::sim::Simulation;
use input_analyzer::{Disposition, InputEvent, KeyInput, Modifiers, Target};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, KeyboardEvent, MouseEvent};

use std::sync::Once;

static INIT: Once = Once::new();

#[wasm_bindgen]
pub fn init() {
    INIT.call_once(|| {
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("could not init logging: {e}").into());
        }
    });
}

#[wasm_bindgen]
pub fn check_config(cfg: &str) -> JsValue {
    JsValue::from_str(&match cfg::new_from_str(cfg) {
        Ok(_) => "Config is good!".to_owned(),
        Err(e) => format!("{e:?}"),
    })
}

#[wasm_bindgen]
pub fn simulate(cfg: &str, sim: &str) -> JsValue {
    JsValue::from_str(&match simulate_impl(cfg, sim) {
        Ok(s) => s,
        Err(e) => format!("Config or simulation input has error.\n\n{e:?}"),
    })
}

fn simulate_impl(cfg: &str, sim: &str) -> Result<String> {
    let mut s = Simulation::new(Analyzer::new_from_str(cfg)?);
    s.run(sim)?;
    Ok(s.transcript())
}

fn wall_clock_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// `<input>`, `<textarea>` and contenteditable elements keep their default behaviour.
fn event_target(e: &Event) -> Target {
    let Some(el) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return Target::Document;
    };
    let tag = el.tag_name();
    let editable = tag.eq_ignore_ascii_case("input")
        || tag.eq_ignore_ascii_case("textarea")
        || el
            .dyn_ref::<HtmlElement>()
            .is_some_and(|h| h.is_content_editable());
    if editable {
        Target::Editable
    } else {
        Target::Document
    }
}

fn mods(ctrl: bool, meta: bool, alt: bool, shift: bool) -> Modifiers {
    let mut m = Modifiers::empty();
    m.set(Modifiers::CTRL, ctrl);
    m.set(Modifiers::META, meta);
    m.set(Modifiers::ALT, alt);
    m.set(Modifiers::SHIFT, shift);
    m
}

fn key_input(e: &KeyboardEvent) -> KeyInput {
    let mut k = KeyInput::new(e.code(), e.key())
        .with_mods(mods(e.ctrl_key(), e.meta_key(), e.alt_key(), e.shift_key()))
        .with_target(event_target(e));
    k.repeat = e.repeat();
    k
}

fn target_of(editable: bool) -> Target {
    if editable {
        Target::Editable
    } else {
        Target::Document
    }
}

/// Browser facing wrapper around [`Analyzer`]. The `handle*` methods take DOM events and call
/// `preventDefault` themselves; the other entry points take plain values and return whether the
/// default action should be prevented.
#[wasm_bindgen]
pub struct InputAnalyzer {
    inner: Analyzer,
}

#[wasm_bindgen]
impl InputAnalyzer {
    #[wasm_bindgen(constructor)]
    pub fn new(cfg: &str) -> Result<InputAnalyzer, JsValue> {
        init();
        let inner = Analyzer::new_from_str(cfg)
            .map_err(|e| JsValue::from_str(&format!("{e:?}")))?
            .with_start_time(wall_clock_ms());
        Ok(InputAnalyzer { inner })
    }

    fn dispatch(&mut self, event: &InputEvent) -> Disposition {
        self.inner.advance_to(wall_clock_ms());
        self.inner.handle_input_event(event)
    }

    fn dispatch_dom(&mut self, dom_event: &Event, event: &InputEvent) {
        if self.dispatch(event).prevent_default {
            dom_event.prevent_default();
        }
    }

    #[wasm_bindgen(js_name = handleKeyDown)]
    pub fn handle_key_down(&mut self, e: &KeyboardEvent) {
        self.dispatch_dom(e, &InputEvent::KeyDown(key_input(e)));
    }

    #[wasm_bindgen(js_name = handleKeyUp)]
    pub fn handle_key_up(&mut self, e: &KeyboardEvent) {
        self.dispatch_dom(e, &InputEvent::KeyUp(key_input(e)));
    }

    #[wasm_bindgen(js_name = handleMouseDown)]
    pub fn handle_mouse_down(&mut self, e: &MouseEvent) {
        let ev = InputEvent::MouseDown {
            button: e.button(),
            target: event_target(e),
        };
        self.dispatch_dom(e, &ev);
    }

    #[wasm_bindgen(js_name = handleMouseUp)]
    pub fn handle_mouse_up(&mut self, e: &MouseEvent) {
        let ev = InputEvent::MouseUp {
            button: e.button(),
            target: event_target(e),
        };
        self.dispatch_dom(e, &ev);
    }

    #[wasm_bindgen(js_name = handleContextMenu)]
    pub fn handle_context_menu(&mut self, e: &Event) {
        let ev = InputEvent::ContextMenu {
            target: event_target(e),
        };
        self.dispatch_dom(e, &ev);
    }

    #[wasm_bindgen(js_name = handleBlur)]
    pub fn handle_blur(&mut self) {
        self.dispatch(&InputEvent::FocusLost);
    }

    #[allow(clippy::too_many_arguments)]
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(
        &mut self,
        code: &str,
        key: &str,
        ctrl: bool,
        meta: bool,
        alt: bool,
        shift: bool,
        repeat: bool,
        editable: bool,
    ) -> bool {
        let mut k = KeyInput::new(code, key)
            .with_mods(mods(ctrl, meta, alt, shift))
            .with_target(target_of(editable));
        k.repeat = repeat;
        self.dispatch(&InputEvent::KeyDown(k)).prevent_default
    }

    #[wasm_bindgen(js_name = keyUp)]
    pub fn key_up(&mut self, code: &str, key: &str) -> bool {
        self.dispatch(&InputEvent::KeyUp(KeyInput::new(code, key)))
            .prevent_default
    }

    #[wasm_bindgen(js_name = mouseDown)]
    pub fn mouse_down(&mut self, button: i16, editable: bool) -> bool {
        let target = target_of(editable);
        self.dispatch(&InputEvent::MouseDown { button, target })
            .prevent_default
    }

    #[wasm_bindgen(js_name = mouseUp)]
    pub fn mouse_up(&mut self, button: i16, editable: bool) -> bool {
        let target = target_of(editable);
        self.dispatch(&InputEvent::MouseUp { button, target })
            .prevent_default
    }

    #[wasm_bindgen(js_name = contextMenu)]
    pub fn context_menu(&mut self, editable: bool) -> bool {
        let target = target_of(editable);
        self.dispatch(&InputEvent::ContextMenu { target })
            .prevent_default
    }

    /// Call periodically, e.g. from `requestAnimationFrame`, so flashes end on time.
    pub fn tick(&mut self) {
        self.inner.advance_to(wall_clock_ms());
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[wasm_bindgen(js_name = keyStatus)]
    pub fn key_status(&self, code: &str) -> String {
        self.inner.key_status(code).legend_label().to_owned()
    }

    #[wasm_bindgen(js_name = activeKey)]
    pub fn active_key(&self) -> Option<String> {
        self.inner.active_key().map(str::to_owned)
    }

    #[wasm_bindgen(js_name = keyLog)]
    pub fn key_log(&self) -> String {
        render_key_log(self.inner.key_log().iter())
    }

    /// The full state as JSON.
    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.inner
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
