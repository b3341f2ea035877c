//! Selectors, class names, and fixed style values used by the page controller.

// ── Element discovery ───────────────────────────────────────────

pub const NAV_ID: &str = "mainNav";
pub const THEME_BUTTON_ID: &str = "themeToggle";
pub const BACK_TO_TOP_ID: &str = "backToTop";
pub const CONFIG_SCRIPT_ID: &str = "fx-config";

pub const MOON_ICON: &str = "[data-icon=\"moon\"]";
pub const SUN_ICON: &str = "[data-icon=\"sun\"]";
pub const HERO_VISUAL: &str = ".hero-visual";
pub const HERO_CHILDREN: &str = ".hero-content > *";
pub const MARQUEE: &str = ".marquee-content";
pub const SECTIONS: &str = ".features-section, .how-it-works, .testimonials-section, .cta-section";
pub const CARDS: &str = ".feature-card, .step-card, .testimonial-card";
pub const COUNTERS: &str = ".stat-number";
pub const NODES: &str = ".node-card";
pub const PATHS: &str = ".connection-path";
pub const ANCHORS: &str = "a[href^=\"#\"]";

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// ── Observers ───────────────────────────────────────────────────

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -100px 0px";
pub const COUNTER_THRESHOLD: f64 = 0.5;
pub const COUNTER_ROOT_MARGIN: &str = "0px";

// ── Attributes and classes ──────────────────────────────────────

pub const THEME_ATTR: &str = "data-theme";
pub const COUNTED_ATTR: &str = "data-counted";
pub const HIDDEN_CLASS: &str = "d-none";
pub const SCROLLED_CLASS: &str = "scrolled";
pub const FADE_IN_CLASS: &str = "fade-in";
pub const FLOATING_CLASS: &str = "floating";
pub const LOADED_CLASS: &str = "loaded";

// ── Inline style values ─────────────────────────────────────────

pub const CARD_HIDDEN_TRANSFORM: &str = "translateY(30px)";
pub const CARD_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";
pub const CARD_HOVER_SHADOW: &str = "0 20px 60px rgba(59, 130, 246, 0.15)";
pub const NODE_LIFT_TRANSFORM: &str = "translateY(-8px) scale(1.05)";
pub const NODE_LIFT_Z_INDEX: &str = "10";
pub const PATH_OPACITY: &str = "0.6";
pub const PATH_ANIMATION: &str = "dash 2s linear infinite";
pub const BODY_TRANSITION: &str = "opacity 0.3s ease";
pub const PULSE_DOWN: &str = "scale(0.9)";
pub const PULSE_UP: &str = "scale(1)";
