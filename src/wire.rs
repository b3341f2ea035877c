//! DOM listeners and observers that turn browser events into [`PageEvent`]s.
//!
//! Each behaviour is wired on its own; a failure wiring one is logged and the
//! rest still attach.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, Document, Element, ErrorEvent, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent, Window,
};

use crate::anchor;
use crate::config::FxConfig;
use crate::consts::*;
use crate::engine::{Environment, PageCore, PageEvent, PageState};
use crate::error::FxError;
use crate::host::{LocalStore, Page, Registry, SharedPage, dispatch, query_all};
use crate::ripple::Rect;
use crate::theme::initial_theme;

fn js_err(what: &str, err: JsValue) -> FxError {
    FxError::Dom(format!("{what}: {err:?}"))
}

fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) -> Result<(), FxError> {
    let cb = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())
        .map_err(|err| js_err(kind, err))?;
    cb.forget();
    Ok(())
}

fn listen_hover(
    el: &Element,
    page: &SharedPage,
    event: impl Fn(bool) -> PageEvent + Clone + 'static,
) -> Result<(), FxError> {
    for (kind, entered) in [("mouseenter", true), ("mouseleave", false)] {
        let page = Rc::clone(page);
        let event = event.clone();
        listen(el, kind, move |_| {
            dispatch(&page, event(entered));
        })?;
    }
    Ok(())
}

fn report(behaviour: &str, result: Result<(), FxError>) {
    if let Err(err) = result {
        log::warn!("{behaviour} not wired: {err}");
    }
}

// =============================================================
// Behaviours
// =============================================================

fn wire_theme(page: &SharedPage) -> Result<(), FxError> {
    let Some(button) = page.borrow().registry.theme_button.clone() else {
        return Ok(());
    };
    let page = Rc::clone(page);
    listen(&button, "click", move |_| {
        dispatch(&page, PageEvent::ThemeToggled);
    })
}

fn wire_scroll(page: &SharedPage, window: &Window) -> Result<(), FxError> {
    let page = Rc::clone(page);
    let cb = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        dispatch(&page, PageEvent::Scrolled);
    });
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    window
        .add_event_listener_with_callback_and_add_event_listener_options("scroll", cb.as_ref().unchecked_ref(), &options)
        .map_err(|err| js_err("scroll", err))?;
    cb.forget();
    Ok(())
}

fn wire_back_to_top(page: &SharedPage) -> Result<(), FxError> {
    let Some(button) = page.borrow().registry.back_to_top.clone() else {
        return Ok(());
    };
    let page = Rc::clone(page);
    listen(&button, "click", move |event| {
        event.prevent_default();
        dispatch(&page, PageEvent::BackToTopClicked);
    })
}

fn observer(
    threshold: f64,
    root_margin: &str,
    on_visible: impl Fn(&Element) + 'static,
) -> Result<IntersectionObserver, FxError> {
    let cb = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(move |entries: Array, _: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            if entry.is_intersecting() {
                on_visible(&entry.target());
            }
        }
    });
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    init.set_root_margin(root_margin);
    let observer = IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &init)
        .map_err(|err| js_err("IntersectionObserver", err))?;
    cb.forget();
    Ok(observer)
}

fn wire_reveals(page: &SharedPage) -> Result<(), FxError> {
    let targets: Vec<Element> = {
        let page = page.borrow();
        page.registry.sections.iter().chain(&page.registry.cards).cloned().collect()
    };
    if targets.is_empty() {
        return Ok(());
    }
    let page = Rc::clone(page);
    let observer = observer(REVEAL_THRESHOLD, REVEAL_ROOT_MARGIN, move |el| {
        let event = page.borrow().registry.reveal_event(el);
        if let Some(event) = event {
            dispatch(&page, event);
        }
    })?;
    for el in &targets {
        observer.observe(el);
    }
    Ok(())
}

fn wire_counters(page: &SharedPage) -> Result<(), FxError> {
    let counters = page.borrow().registry.counters.clone();
    if counters.is_empty() {
        return Ok(());
    }
    let page = Rc::clone(page);
    let observer = observer(COUNTER_THRESHOLD, COUNTER_ROOT_MARGIN, move |el| {
        let counter = page.borrow().registry.counter_index(el);
        if let Some(counter) = counter {
            dispatch(&page, PageEvent::CounterVisible(counter));
        }
    })?;
    for el in &counters {
        observer.observe(el);
    }
    Ok(())
}

fn wire_nodes(page: &SharedPage) -> Result<(), FxError> {
    let nodes = page.borrow().registry.nodes.clone();
    for (node, el) in nodes.iter().enumerate() {
        listen_hover(el, page, move |entered| PageEvent::NodeHover { node, entered })?;
    }
    Ok(())
}

fn wire_cards(page: &SharedPage) -> Result<(), FxError> {
    let cards = page.borrow().registry.cards.clone();
    for (card, el) in cards.iter().enumerate() {
        listen_hover(el, page, move |entered| PageEvent::CardHover { card, entered })?;

        let page = Rc::clone(page);
        let host = el.clone();
        listen(el, "click", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let bounds = host.get_bounding_client_rect();
            let rect = Rect { left: bounds.left(), top: bounds.top(), width: bounds.width(), height: bounds.height() };
            dispatch(
                &page,
                PageEvent::CardClicked {
                    card,
                    rect,
                    client_x: f64::from(mouse.client_x()),
                    client_y: f64::from(mouse.client_y()),
                },
            );
        })?;
    }
    Ok(())
}

fn anchor_target_top(document: &Document, href: &str) -> Option<f64> {
    let selector = anchor::target_selector(href)?;
    match document.query_selector(selector) {
        Ok(Some(target)) => target.dyn_ref::<HtmlElement>().map(|el| f64::from(el.offset_top())),
        Ok(None) => None,
        Err(err) => {
            log::debug!("anchor `{href}` is not a selector: {err:?}");
            None
        }
    }
}

fn wire_anchors(page: &SharedPage, document: &Document) -> Result<(), FxError> {
    for link in query_all(document, ANCHORS) {
        let page = Rc::clone(page);
        let document = document.clone();
        let href_source = link.clone();
        listen(&link, "click", move |event| {
            let href = href_source.get_attribute("href").unwrap_or_default();
            let target_top = anchor_target_top(&document, &href);
            if dispatch(&page, PageEvent::AnchorActivated { href, target_top }) {
                event.prevent_default();
            }
        })?;
    }
    Ok(())
}

fn wire_marquee(page: &SharedPage) -> Result<(), FxError> {
    let Some(marquee) = page.borrow().registry.marquee.clone() else {
        return Ok(());
    };
    listen_hover(&marquee, page, |entered| PageEvent::MarqueeHover { entered })
}

fn wire_errors(window: &Window) -> Result<(), FxError> {
    listen(window, "error", |event| match event.dyn_ref::<ErrorEvent>() {
        Some(error) => log::warn!("uncaught error: {} ({}:{})", error.message(), error.filename(), error.lineno()),
        None => log::warn!("uncaught error event: {:?}", event.type_()),
    })
}

fn wire_load(page: &SharedPage, window: &Window, document: &Document) -> Result<(), FxError> {
    if document.ready_state() == "complete" {
        dispatch(page, PageEvent::Loaded);
        return Ok(());
    }
    let page = Rc::clone(page);
    listen(window, "load", move |_| {
        dispatch(&page, PageEvent::Loaded);
    })
}

// =============================================================
// Startup
// =============================================================

fn prefers_reduced_motion(window: &Window) -> bool {
    match window.match_media(REDUCED_MOTION_QUERY) {
        Ok(Some(query)) => query.matches(),
        Ok(None) => false,
        Err(err) => {
            log::debug!("matchMedia failed: {err:?}");
            false
        }
    }
}

/// Read the optional JSON override embedded in the page.
///
/// # Errors
///
/// Returns an error when the override exists but does not parse or validate.
pub fn load_config(document: &Document) -> Result<Option<FxConfig>, FxError> {
    let Some(script) = document.get_element_by_id(CONFIG_SCRIPT_ID) else {
        return Ok(None);
    };
    let raw = script.text_content().unwrap_or_default();
    FxConfig::from_json(&raw).map(Some)
}

/// Discover the page, build the controller, and attach every behaviour.
pub fn boot(window: &Window, document: &Document, config: FxConfig) {
    let registry = Registry::discover(document);
    let layout = registry.layout();
    log::debug!("discovered layout: {layout:?}");

    let store = LocalStore::open(window);
    let root_theme = registry.root.as_ref().and_then(|root| root.get_attribute(THEME_ATTR));
    let theme = initial_theme(root_theme.as_deref(), &store, &config.storage_key);
    let env = Environment { reduced_motion: prefers_reduced_motion(window) };

    let core = PageCore::new(config, layout, env, PageState { theme, loaded: false }, store);
    let page = Rc::new(RefCell::new(Page::new(core, registry, window.clone(), document.clone())));

    report("error log", wire_errors(window));
    report("theme toggle", wire_theme(&page));
    report("navigation bar", wire_scroll(&page, window));
    report("entrance animations", wire_reveals(&page));
    report("back to top", wire_back_to_top(&page));
    report("counters", wire_counters(&page));
    report("nodes", wire_nodes(&page));
    report("smooth scroll", wire_anchors(&page, document));
    report("marquee", wire_marquee(&page));
    report("cards", wire_cards(&page));

    dispatch(&page, PageEvent::Ready);
    report("page load", wire_load(&page, window, document));

    log::info!("page effects initialized");
}
