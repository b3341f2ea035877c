//! Presentation-layer interactivity for the marketing site, compiled to
//! WebAssembly.
//!
//! The crate splits into a browser-free controller and a thin `web-sys` host.
//! [`engine::PageCore`] turns page events (scroll, hover, intersection, timers)
//! into [`engine::Effect`]s; [`host`] applies them to the DOM and [`wire`]
//! attaches the listeners that produce the events in the first place.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Controller state machine, events, and effects |
//! | [`theme`] | Light/dark preference and the storage seam |
//! | [`frame`] | Per-frame coalescing of scroll-driven updates |
//! | [`counter`] | Count-up animation for statistic figures |
//! | [`ripple`] | Click ripple geometry and live-ripple ledger |
//! | [`anchor`] | Same-page anchor resolution |
//! | [`config`] | Tunable thresholds and timings |
//! | [`host`] | DOM registry, effect application, `localStorage` store |
//! | [`wire`] | Event listeners, intersection observers, startup |
//! | [`styles`] | Injected keyframes and state classes |
//! | [`consts`] | Selectors, class names, and style values |

pub mod anchor;
pub mod config;
pub mod consts;
pub mod counter;
pub mod engine;
pub mod error;
pub mod frame;
pub mod host;
pub mod ripple;
pub mod styles;
pub mod theme;
pub mod wire;

use wasm_bindgen::prelude::*;

use crate::config::FxConfig;

fn init_logging(config: &FxConfig) {
    let level = config.log_level().unwrap_or(log::Level::Info);
    if let Err(err) = console_log::init_with_level(level) {
        log::debug!("logger already installed: {err}");
    }
}

/// Module entry point. Boots immediately when the document is already parsed,
/// otherwise on `DOMContentLoaded`.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let loaded = wire::load_config(&document);
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        Ok(None) | Err(_) => FxConfig::default(),
    };
    init_logging(&config);
    if let Err(err) = loaded {
        log::warn!("ignoring page config: {err}");
    }

    if document.ready_state() != "loading" {
        wire::boot(&window, &document, config);
        return;
    }

    let target = document.clone();
    let mut pending = Some(config);
    let cb = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
        if let Some(config) = pending.take() {
            wire::boot(&window, &document, config);
        }
    });
    if let Err(err) = target.add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref()) {
        log::warn!("could not wait for DOMContentLoaded: {err:?}");
        return;
    }
    cb.forget();
}
