//! Browser side of the controller: element discovery, effect application, and
//! the `localStorage` preference store.
//!
//! ARCHITECTURE
//! ============
//! [`PageCore`] decides; this module only performs. The host resolves each
//! effect's [`Target`] to the element found at startup and turns deferred
//! effects into `gloo-timers` timeouts and animation-frame callbacks that feed
//! events back through [`dispatch`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CssStyleDeclaration, Document, Element, HtmlElement, NodeList, ScrollBehavior, ScrollToOptions, Storage,
    SvgElement, Window,
};

use crate::consts::*;
use crate::engine::{Effect, Layout, PageCore, PageEvent, Target};
use crate::error::FxError;
use crate::frame::FrameChannel;
use crate::ripple::RippleId;
use crate::theme::PreferenceStore;

pub type SharedPage = Rc<RefCell<Page>>;

// =============================================================
// Preference storage
// =============================================================

/// `window.localStorage`, which may be missing or throw (private mode,
/// disabled cookies, sandboxed frames).
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    #[must_use]
    pub fn open(window: &Window) -> Self {
        match window.local_storage() {
            Ok(storage) => Self { storage },
            Err(err) => {
                log::debug!("localStorage unavailable: {err:?}");
                Self { storage: None }
            }
        }
    }

    fn storage(&self) -> Result<&Storage, FxError> {
        self.storage.as_ref().ok_or_else(|| FxError::Storage("localStorage unavailable".to_owned()))
    }
}

impl PreferenceStore for LocalStore {
    fn load(&self, key: &str) -> Result<Option<String>, FxError> {
        self.storage()?.get_item(key).map_err(|err| FxError::Storage(format!("{err:?}")))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), FxError> {
        self.storage()?.set_item(key, value).map_err(|err| FxError::Storage(format!("{err:?}")))
    }
}

// =============================================================
// DOM helpers
// =============================================================

pub(crate) fn log_dom<T>(what: &str, result: Result<T, JsValue>) {
    if let Err(err) = result {
        log::debug!("{what} failed: {err:?}");
    }
}

fn collect(selector: &str, found: Result<NodeList, JsValue>) -> Vec<Element> {
    match found {
        Ok(list) => (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_ref::<Element>().cloned())
            .collect(),
        Err(err) => {
            log::debug!("selector `{selector}` rejected: {err:?}");
            Vec::new()
        }
    }
}

pub(crate) fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    collect(selector, document.query_selector_all(selector))
}

fn query(document: &Document, selector: &str) -> Option<Element> {
    match document.query_selector(selector) {
        Ok(found) => found,
        Err(err) => {
            log::debug!("selector `{selector}` rejected: {err:?}");
            None
        }
    }
}

fn query_in(scope: &Element, selector: &str) -> Option<Element> {
    match scope.query_selector(selector) {
        Ok(found) => found,
        Err(err) => {
            log::debug!("selector `{selector}` rejected: {err:?}");
            None
        }
    }
}

fn same_element(a: &Element, b: &Element) -> bool {
    let a: &JsValue = a.as_ref();
    let b: &JsValue = b.as_ref();
    a == b
}

fn index_in(list: &[Element], el: &Element) -> Option<usize> {
    list.iter().position(|candidate| same_element(candidate, el))
}

/// Inline style of an HTML or SVG element.
fn style_of(el: &Element) -> Option<CssStyleDeclaration> {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        return Some(html.style());
    }
    el.dyn_ref::<SvgElement>().map(SvgElement::style)
}

// =============================================================
// Registry
// =============================================================

/// Elements found at startup, addressed by [`Target`].
#[derive(Default)]
pub struct Registry {
    pub root: Option<Element>,
    pub body: Option<Element>,
    pub nav: Option<Element>,
    pub theme_button: Option<Element>,
    pub moon_icon: Option<Element>,
    pub sun_icon: Option<Element>,
    pub back_to_top: Option<Element>,
    pub hero_visual: Option<Element>,
    pub marquee: Option<Element>,
    pub sections: Vec<Element>,
    pub section_cards: Vec<Vec<usize>>,
    pub cards: Vec<Element>,
    pub counters: Vec<Element>,
    pub nodes: Vec<Element>,
    pub paths: Vec<Element>,
    pub hero_children: Vec<Element>,
}

impl Registry {
    #[must_use]
    pub fn discover(document: &Document) -> Self {
        let theme_button = document.get_element_by_id(THEME_BUTTON_ID);
        let (moon_icon, sun_icon) = match &theme_button {
            Some(button) => (query_in(button, MOON_ICON), query_in(button, SUN_ICON)),
            None => (None, None),
        };

        let cards = query_all(document, CARDS);
        let sections = query_all(document, SECTIONS);
        let section_cards = sections
            .iter()
            .map(|section| {
                collect(CARDS, section.query_selector_all(CARDS))
                    .iter()
                    .filter_map(|card| index_in(&cards, card))
                    .collect()
            })
            .collect();

        Self {
            root: document.document_element(),
            body: document.body().map(Element::from),
            nav: document.get_element_by_id(NAV_ID),
            theme_button,
            moon_icon,
            sun_icon,
            back_to_top: document.get_element_by_id(BACK_TO_TOP_ID),
            hero_visual: query(document, HERO_VISUAL),
            marquee: query(document, MARQUEE),
            sections,
            section_cards,
            cards,
            counters: query_all(document, COUNTERS),
            nodes: query_all(document, NODES),
            paths: query_all(document, PATHS),
            hero_children: query_all(document, HERO_CHILDREN),
        }
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout {
            nav: self.nav.is_some(),
            theme_button: self.theme_button.is_some(),
            theme_icons: self.moon_icon.is_some() && self.sun_icon.is_some(),
            back_to_top: self.back_to_top.is_some(),
            hero_visual: self.hero_visual.is_some(),
            marquee: self.marquee.is_some(),
            sections: self.section_cards.clone(),
            cards: self.cards.len(),
            counters: self.counters.iter().map(|el| el.text_content().unwrap_or_default()).collect(),
            nodes: self.nodes.len(),
            paths: self.paths.len(),
            hero_children: self.hero_children.len(),
        }
    }

    #[must_use]
    pub fn resolve(&self, target: Target) -> Option<&Element> {
        match target {
            Target::Root => self.root.as_ref(),
            Target::Body => self.body.as_ref(),
            Target::Nav => self.nav.as_ref(),
            Target::ThemeButton => self.theme_button.as_ref(),
            Target::MoonIcon => self.moon_icon.as_ref(),
            Target::SunIcon => self.sun_icon.as_ref(),
            Target::BackToTop => self.back_to_top.as_ref(),
            Target::HeroVisual => self.hero_visual.as_ref(),
            Target::Marquee => self.marquee.as_ref(),
            Target::Section(i) => self.sections.get(i),
            Target::Card(i) => self.cards.get(i),
            Target::Counter(i) => self.counters.get(i),
            Target::Node(i) => self.nodes.get(i),
            Target::Path(i) => self.paths.get(i),
            Target::HeroChild(i) => self.hero_children.get(i),
        }
    }

    /// Map an intersection target back to a reveal event.
    #[must_use]
    pub fn reveal_event(&self, el: &Element) -> Option<PageEvent> {
        if let Some(section) = index_in(&self.sections, el) {
            return Some(PageEvent::SectionVisible(section));
        }
        index_in(&self.cards, el).map(PageEvent::CardVisible)
    }

    #[must_use]
    pub fn counter_index(&self, el: &Element) -> Option<usize> {
        index_in(&self.counters, el)
    }
}

// =============================================================
// Page
// =============================================================

pub struct Page {
    pub core: PageCore<LocalStore>,
    pub registry: Registry,
    pub window: Window,
    pub document: Document,
    ripples: HashMap<RippleId, Element>,
}

impl Page {
    #[must_use]
    pub fn new(core: PageCore<LocalStore>, registry: Registry, window: Window, document: Document) -> Self {
        Self { core, registry, window, document, ripples: HashMap::new() }
    }

    #[must_use]
    pub fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn element(&self, target: Target) -> Option<&Element> {
        let found = self.registry.resolve(target);
        if found.is_none() {
            log::debug!("no element for {target:?}");
        }
        found
    }

    fn set_style(&self, target: Target, property: &str, value: &str) {
        if let Some(style) = self.element(target).and_then(style_of) {
            log_dom("style.setProperty", style.set_property(property, value));
        }
    }

    fn clear_style(&self, target: Target, property: &str) {
        if let Some(style) = self.element(target).and_then(style_of) {
            log_dom("style.removeProperty", style.remove_property(property));
        }
    }

    fn inject_styles(&self, css: &str) {
        let Some(head) = self.document.head() else {
            return;
        };
        match self.document.create_element("style") {
            Ok(style) => {
                style.set_text_content(Some(css));
                log_dom("head.appendChild", head.append_child(&style));
            }
            Err(err) => log::debug!("createElement(style) failed: {err:?}"),
        }
    }

    fn scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn spawn_ripple(&mut self, id: RippleId, card: usize, css: &str) {
        let Some(host) = self.registry.cards.get(card) else {
            return;
        };
        let ripple = match self.document.create_element("div") {
            Ok(ripple) => ripple,
            Err(err) => {
                log::debug!("createElement(div) failed: {err:?}");
                return;
            }
        };
        log_dom("ripple style", ripple.set_attribute("style", css));
        match host.append_child(&ripple) {
            Ok(_) => {
                self.ripples.insert(id, ripple);
            }
            Err(err) => log::debug!("ripple append failed: {err:?}"),
        }
    }

    fn remove_ripple(&mut self, id: RippleId) {
        if let Some(ripple) = self.ripples.remove(&id) {
            ripple.remove();
        }
    }

    /// Apply one immediate DOM effect.
    fn apply_dom(&mut self, effect: Effect) {
        match effect {
            Effect::SetAttribute { target, name, value } => {
                if let Some(el) = self.element(target) {
                    log_dom("setAttribute", el.set_attribute(name, &value));
                }
            }
            Effect::SetClass { target, class, on } => {
                if let Some(el) = self.element(target) {
                    log_dom("classList.toggle", el.class_list().toggle_with_force(class, on));
                }
            }
            Effect::SetStyle { target, property, value } => self.set_style(target, property, &value),
            Effect::ClearStyle { target, property } => self.clear_style(target, property),
            Effect::SetText { target, text } => {
                if let Some(el) = self.element(target) {
                    el.set_text_content(Some(&text));
                }
            }
            Effect::InjectStyles(css) => self.inject_styles(css),
            Effect::ScrollTo { top } => self.scroll_to(top),
            Effect::SpawnRipple { id, card, css } => self.spawn_ripple(id, card, &css),
            Effect::RemoveRipple(id) => self.remove_ripple(id),
            Effect::RequestFrame(_) | Effect::After { .. } => {
                log::debug!("scheduling effect reached the DOM applier: {effect:?}");
            }
        }
    }
}

// =============================================================
// Dispatch
// =============================================================

/// Feed one event through the core and apply what comes back.
///
/// Returns `true` when the core produced any effect, which DOM handlers use to
/// decide whether to suppress the browser default.
pub fn dispatch(page: &SharedPage, event: PageEvent) -> bool {
    let effects = page.borrow_mut().core.handle(event);
    let handled = !effects.is_empty();
    for effect in effects {
        apply(page, effect);
    }
    handled
}

fn apply(page: &SharedPage, effect: Effect) {
    match effect {
        Effect::After { delay_ms, event } => {
            let page = Rc::clone(page);
            Timeout::new(delay_ms, move || {
                dispatch(&page, event);
            })
            .forget();
        }
        Effect::RequestFrame(channel) => request_frame(page, channel),
        other => page.borrow_mut().apply_dom(other),
    }
}

fn request_frame(page: &SharedPage, channel: FrameChannel) {
    let window = page.borrow().window.clone();
    let page_for_cb = Rc::clone(page);
    let cb = Closure::once_into_js(move |_ts: f64| {
        let scroll_y = page_for_cb.borrow().scroll_y();
        dispatch(&page_for_cb, PageEvent::Frame { channel, scroll_y });
    });

    if let Err(err) = window.request_animation_frame(cb.unchecked_ref()) {
        log::debug!("requestAnimationFrame failed, updating inline: {err:?}");
        let scroll_y = page.borrow().scroll_y();
        dispatch(page, PageEvent::Frame { channel, scroll_y });
    }
}
