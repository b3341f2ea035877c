//! Browser-free page controller.
//!
//! [`PageCore`] is a small state machine: the host feeds it [`PageEvent`]s and
//! applies the [`Effect`]s it returns. Deferred work is expressed as
//! [`Effect::After`] and [`Effect::RequestFrame`], which the host turns back
//! into events later. Nothing here touches the DOM, so every behaviour is
//! testable by replaying events.

use std::collections::HashMap;

use crate::anchor;
use crate::config::FxConfig;
use crate::consts::*;
use crate::counter::{CounterAnimation, CounterTarget};
use crate::frame::{FrameChannel, FrameGates};
use crate::ripple::{Rect, RippleGeometry, RippleId, RippleLedger};
use crate::styles::PAGE_CSS;
use crate::theme::{PreferenceStore, Theme};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Elements the core can address. Indexed variants refer to positions in the
/// matching [`Layout`] list, in document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Root,
    Body,
    Nav,
    ThemeButton,
    MoonIcon,
    SunIcon,
    BackToTop,
    HeroVisual,
    Marquee,
    Section(usize),
    Card(usize),
    Counter(usize),
    Node(usize),
    Path(usize),
    HeroChild(usize),
}

/// What the host found on the page. Anything absent turns its behaviour off.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    pub nav: bool,
    pub theme_button: bool,
    /// Both the moon and the sun icon exist inside the theme button.
    pub theme_icons: bool,
    pub back_to_top: bool,
    pub hero_visual: bool,
    pub marquee: bool,
    /// Card indices contained in each section.
    pub sections: Vec<Vec<usize>>,
    pub cards: usize,
    /// Initial text of each statistic figure.
    pub counters: Vec<String>,
    pub nodes: usize,
    pub paths: usize,
    pub hero_children: usize,
}

/// Client signals read once at startup.
#[derive(Clone, Copy, Debug, Default)]
pub struct Environment {
    pub reduced_motion: bool,
}

/// Page-wide state that would otherwise live in globals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageState {
    pub theme: Theme,
    pub loaded: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    /// Document parsed; wire initial state.
    Ready,
    Scrolled,
    Frame { channel: FrameChannel, scroll_y: f64 },
    ThemeToggled,
    ThemePulseEnded,
    SectionVisible(usize),
    CardVisible(usize),
    CardRevealDue(usize),
    CounterVisible(usize),
    CounterTick(usize),
    NodeHover { node: usize, entered: bool },
    NodeFloatDue(usize),
    PathRevealDue(usize),
    CardHover { card: usize, entered: bool },
    CardClicked { card: usize, rect: Rect, client_x: f64, client_y: f64 },
    RippleExpired(RippleId),
    BackToTopClicked,
    /// `target_top` is the matched element's `offsetTop`, if any matched.
    AnchorActivated { href: String, target_top: Option<f64> },
    MarqueeHover { entered: bool },
    /// Window `load` fired.
    Loaded,
    HeroChildDue(usize),
    BodyFadeDue,
}

/// DOM mutation or scheduling request for the host.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SetAttribute { target: Target, name: &'static str, value: String },
    SetClass { target: Target, class: &'static str, on: bool },
    SetStyle { target: Target, property: &'static str, value: String },
    ClearStyle { target: Target, property: &'static str },
    SetText { target: Target, text: String },
    InjectStyles(&'static str),
    RequestFrame(FrameChannel),
    ScrollTo { top: f64 },
    SpawnRipple { id: RippleId, card: usize, css: String },
    RemoveRipple(RippleId),
    /// Deliver `event` back to the core after `delay_ms`.
    After { delay_ms: u32, event: PageEvent },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Reveal {
    Hidden,
    Scheduled,
    Shown,
}

/// Delay for the `index`-th item of a staggered sequence.
fn stagger(step_ms: u32, index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX).saturating_mul(step_ms)
}

fn set_style(target: Target, property: &'static str, value: impl Into<String>) -> Effect {
    Effect::SetStyle { target, property, value: value.into() }
}

fn set_class(target: Target, class: &'static str, on: bool) -> Effect {
    Effect::SetClass { target, class, on }
}

fn after(delay_ms: u32, event: PageEvent) -> Effect {
    Effect::After { delay_ms, event }
}

pub struct PageCore<S: PreferenceStore> {
    config: FxConfig,
    layout: Layout,
    env: Environment,
    state: PageState,
    store: S,
    frames: FrameGates,
    sections_shown: Vec<bool>,
    cards: Vec<Reveal>,
    counted: Vec<bool>,
    counters: HashMap<usize, CounterAnimation>,
    ripples: RippleLedger,
}

impl<S: PreferenceStore> PageCore<S> {
    #[must_use]
    pub fn new(config: FxConfig, layout: Layout, env: Environment, state: PageState, store: S) -> Self {
        let sections_shown = vec![false; layout.sections.len()];
        let cards = vec![Reveal::Hidden; layout.cards];
        let counted = vec![false; layout.counters.len()];
        Self {
            config,
            layout,
            env,
            state,
            store,
            frames: FrameGates::default(),
            sections_shown,
            cards,
            counted,
            counters: HashMap::new(),
            ripples: RippleLedger::default(),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> PageState {
        self.state
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub fn live_ripples(&self) -> usize {
        self.ripples.live_count()
    }

    #[must_use]
    pub fn parallax_enabled(&self) -> bool {
        self.layout.hero_visual && !self.env.reduced_motion
    }

    // --- Events ---

    pub fn handle(&mut self, event: PageEvent) -> Vec<Effect> {
        let mut out = Vec::new();
        match event {
            PageEvent::Ready => self.on_ready(&mut out),
            PageEvent::Scrolled => {
                for channel in FrameChannel::ALL {
                    self.request_frame(channel, &mut out);
                }
            }
            PageEvent::Frame { channel, scroll_y } => self.on_frame(channel, scroll_y, &mut out),
            PageEvent::ThemeToggled => self.on_theme_toggled(&mut out),
            PageEvent::ThemePulseEnded => {
                if self.layout.theme_button {
                    out.push(set_style(Target::ThemeButton, "transform", PULSE_UP));
                }
            }
            PageEvent::SectionVisible(section) => self.on_section_visible(section, &mut out),
            PageEvent::CardVisible(card) => {
                if self.cards.get(card) == Some(&Reveal::Hidden) {
                    self.reveal_card(card, &mut out);
                }
            }
            PageEvent::CardRevealDue(card) => {
                if self.cards.get(card) == Some(&Reveal::Scheduled) {
                    self.reveal_card(card, &mut out);
                }
            }
            PageEvent::CounterVisible(counter) => self.on_counter_visible(counter, &mut out),
            PageEvent::CounterTick(counter) => self.on_counter_tick(counter, &mut out),
            PageEvent::NodeHover { node, entered } => {
                if node < self.layout.nodes {
                    let target = Target::Node(node);
                    if entered {
                        out.push(set_style(target, "transform", NODE_LIFT_TRANSFORM));
                        out.push(set_style(target, "z-index", NODE_LIFT_Z_INDEX));
                    } else {
                        out.push(Effect::ClearStyle { target, property: "transform" });
                        out.push(Effect::ClearStyle { target, property: "z-index" });
                    }
                }
            }
            PageEvent::NodeFloatDue(node) => {
                if node < self.layout.nodes {
                    out.push(set_class(Target::Node(node), FLOATING_CLASS, true));
                }
            }
            PageEvent::PathRevealDue(path) => {
                if path < self.layout.paths {
                    out.push(set_style(Target::Path(path), "opacity", PATH_OPACITY));
                    out.push(set_style(Target::Path(path), "animation", PATH_ANIMATION));
                }
            }
            PageEvent::CardHover { card, entered } => {
                if card < self.layout.cards {
                    let target = Target::Card(card);
                    if entered {
                        out.push(set_style(target, "box-shadow", CARD_HOVER_SHADOW));
                    } else {
                        out.push(Effect::ClearStyle { target, property: "box-shadow" });
                    }
                }
            }
            PageEvent::CardClicked { card, rect, client_x, client_y } => {
                self.on_card_clicked(card, rect, client_x, client_y, &mut out);
            }
            PageEvent::RippleExpired(id) => {
                if self.ripples.expire(id).is_some() {
                    out.push(Effect::RemoveRipple(id));
                }
            }
            PageEvent::BackToTopClicked => {
                if self.layout.back_to_top {
                    out.push(Effect::ScrollTo { top: 0.0 });
                }
            }
            PageEvent::AnchorActivated { href, target_top } => {
                if let Some(top) = target_top
                    && anchor::target_selector(&href).is_some()
                {
                    out.push(Effect::ScrollTo { top: anchor::scroll_top_for(top, self.config.anchor_offset_px) });
                }
            }
            PageEvent::MarqueeHover { entered } => {
                if self.layout.marquee {
                    let state = if entered { "paused" } else { "running" };
                    out.push(set_style(Target::Marquee, "animation-play-state", state));
                }
            }
            PageEvent::Loaded => self.on_loaded(&mut out),
            PageEvent::HeroChildDue(child) => {
                if child < self.layout.hero_children {
                    out.push(set_class(Target::HeroChild(child), FADE_IN_CLASS, true));
                }
            }
            PageEvent::BodyFadeDue => out.push(set_style(Target::Body, "opacity", "1")),
        }
        out
    }

    fn on_ready(&mut self, out: &mut Vec<Effect>) {
        out.push(Effect::InjectStyles(PAGE_CSS));

        // Mask the unstyled flash until the first fade.
        out.push(set_style(Target::Body, "opacity", "0"));
        out.push(set_style(Target::Body, "transition", BODY_TRANSITION));
        out.push(after(self.config.body_fade_delay_ms, PageEvent::BodyFadeDue));

        out.push(Effect::SetAttribute {
            target: Target::Root,
            name: THEME_ATTR,
            value: self.state.theme.as_str().to_owned(),
        });
        self.sync_theme_icons(out);

        // Bring scroll-derived state in line with wherever the page opened.
        for channel in FrameChannel::ALL {
            self.request_frame(channel, out);
        }

        for card in 0..self.layout.cards {
            let target = Target::Card(card);
            out.push(set_style(target, "opacity", "0"));
            out.push(set_style(target, "transform", CARD_HIDDEN_TRANSFORM));
            out.push(set_style(target, "transition", CARD_TRANSITION));
        }

        for node in 0..self.layout.nodes {
            out.push(after(stagger(self.config.node_float_stagger_ms, node), PageEvent::NodeFloatDue(node)));
        }
        for path in 0..self.layout.paths {
            out.push(after(stagger(self.config.path_stagger_ms, path), PageEvent::PathRevealDue(path)));
        }
    }

    fn channel_enabled(&self, channel: FrameChannel) -> bool {
        match channel {
            FrameChannel::Nav => self.layout.nav,
            FrameChannel::BackToTop => self.layout.back_to_top,
            FrameChannel::Parallax => self.parallax_enabled(),
        }
    }

    fn request_frame(&mut self, channel: FrameChannel, out: &mut Vec<Effect>) {
        if self.channel_enabled(channel) && self.frames.gate_mut(channel).request() {
            out.push(Effect::RequestFrame(channel));
        }
    }

    fn on_frame(&mut self, channel: FrameChannel, scroll_y: f64, out: &mut Vec<Effect>) {
        self.frames.gate_mut(channel).release();
        if !self.channel_enabled(channel) {
            return;
        }
        match channel {
            FrameChannel::Nav => {
                out.push(set_class(Target::Nav, SCROLLED_CLASS, scroll_y > self.config.nav_threshold_px));
            }
            FrameChannel::BackToTop => {
                let display = if scroll_y > self.config.back_to_top_threshold_px { "flex" } else { "none" };
                out.push(set_style(Target::BackToTop, "display", display));
            }
            FrameChannel::Parallax => {
                // `+ 0.0` folds a negative zero so the top of the page reads `translateY(0px)`.
                let offset = scroll_y * self.config.parallax_rate + 0.0;
                out.push(set_style(Target::HeroVisual, "transform", format!("translateY({offset}px)")));
            }
        }
    }

    fn sync_theme_icons(&self, out: &mut Vec<Effect>) {
        if !self.layout.theme_icons {
            return;
        }
        let dark = self.state.theme.is_dark();
        out.push(set_class(Target::MoonIcon, HIDDEN_CLASS, !dark));
        out.push(set_class(Target::SunIcon, HIDDEN_CLASS, dark));
    }

    fn on_theme_toggled(&mut self, out: &mut Vec<Effect>) {
        if !self.layout.theme_button {
            return;
        }
        let next = self.state.theme.toggled();
        self.state.theme = next;
        out.push(Effect::SetAttribute { target: Target::Root, name: THEME_ATTR, value: next.as_str().to_owned() });

        if let Err(err) = self.store.save(&self.config.storage_key, next.as_str()) {
            log::debug!("theme preference not persisted: {err}");
        }

        self.sync_theme_icons(out);
        out.push(set_style(Target::ThemeButton, "transform", PULSE_DOWN));
        out.push(after(self.config.theme_pulse_ms, PageEvent::ThemePulseEnded));
    }

    fn on_section_visible(&mut self, section: usize, out: &mut Vec<Effect>) {
        match self.sections_shown.get_mut(section) {
            Some(shown) if !*shown => *shown = true,
            _ => return,
        }
        out.push(set_class(Target::Section(section), FADE_IN_CLASS, true));

        for (k, &card) in self.layout.sections[section].iter().enumerate() {
            let Some(reveal) = self.cards.get_mut(card) else {
                continue;
            };
            if *reveal == Reveal::Hidden {
                *reveal = Reveal::Scheduled;
                out.push(after(stagger(self.config.card_stagger_ms, k), PageEvent::CardRevealDue(card)));
            }
        }
    }

    fn reveal_card(&mut self, card: usize, out: &mut Vec<Effect>) {
        self.cards[card] = Reveal::Shown;
        out.push(set_class(Target::Card(card), FADE_IN_CLASS, true));
    }

    fn on_counter_visible(&mut self, counter: usize, out: &mut Vec<Effect>) {
        match self.counted.get_mut(counter) {
            Some(counted) if !*counted => *counted = true,
            _ => return,
        }
        out.push(Effect::SetAttribute {
            target: Target::Counter(counter),
            name: COUNTED_ATTR,
            value: "true".to_owned(),
        });

        let Some(target) = CounterTarget::parse(&self.layout.counters[counter]) else {
            return;
        };
        self.counters.insert(counter, CounterAnimation::new(target, self.config.counter_steps));
        out.push(after(self.config.counter_step_ms(), PageEvent::CounterTick(counter)));
    }

    fn on_counter_tick(&mut self, counter: usize, out: &mut Vec<Effect>) {
        let Some(anim) = self.counters.get_mut(&counter) else {
            return;
        };
        if let Some(text) = anim.advance() {
            out.push(Effect::SetText { target: Target::Counter(counter), text });
        }
        if anim.is_finished() {
            self.counters.remove(&counter);
        } else {
            out.push(after(self.config.counter_step_ms(), PageEvent::CounterTick(counter)));
        }
    }

    fn on_card_clicked(&mut self, card: usize, rect: Rect, client_x: f64, client_y: f64, out: &mut Vec<Effect>) {
        if card >= self.layout.cards {
            return;
        }
        let geometry = RippleGeometry::centered(rect, client_x, client_y);
        let id = self.ripples.spawn(card);
        out.push(set_style(Target::Card(card), "position", "relative"));
        out.push(set_style(Target::Card(card), "overflow", "hidden"));
        out.push(Effect::SpawnRipple { id, card, css: geometry.css_text(self.config.ripple_ms) });
        out.push(after(self.config.ripple_ms, PageEvent::RippleExpired(id)));
    }

    fn on_loaded(&mut self, out: &mut Vec<Effect>) {
        if self.state.loaded {
            return;
        }
        self.state.loaded = true;
        out.push(set_class(Target::Body, LOADED_CLASS, true));
        for child in 0..self.layout.hero_children {
            out.push(after(stagger(self.config.hero_stagger_ms, child), PageEvent::HeroChildDue(child)));
        }
    }
}
