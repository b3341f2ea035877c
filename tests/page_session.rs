//! End-to-end replay of a visitor session through the public controller API.

use landing_fx::config::FxConfig;
use landing_fx::consts::{FADE_IN_CLASS, SCROLLED_CLASS};
use landing_fx::engine::{Effect, Environment, Layout, PageCore, PageEvent, PageState, Target};
use landing_fx::frame::FrameChannel;
use landing_fx::theme::{MemoryStore, Theme, initial_theme};

fn landing_layout() -> Layout {
    Layout {
        nav: true,
        theme_button: true,
        theme_icons: true,
        back_to_top: true,
        hero_visual: true,
        marquee: false,
        sections: vec![vec![0, 1, 2]],
        cards: 3,
        counters: vec!["500+".to_owned()],
        nodes: 0,
        paths: 0,
        hero_children: 2,
    }
}

/// Run the frames the core asked for, at the given scroll offset.
fn run_frames(core: &mut PageCore<MemoryStore>, requested: &[Effect], scroll_y: f64) -> Vec<Effect> {
    requested
        .iter()
        .filter_map(|effect| match effect {
            Effect::RequestFrame(channel) => Some(*channel),
            _ => None,
        })
        .flat_map(|channel| core.handle(PageEvent::Frame { channel, scroll_y }))
        .collect()
}

#[test]
fn returning_visitor_session() {
    let config = FxConfig::default();
    let store = MemoryStore::with_entry(&config.storage_key, "light");
    let theme = initial_theme(None, &store, &config.storage_key);
    assert_eq!(theme, Theme::Light);

    let mut core = PageCore::new(
        config,
        landing_layout(),
        Environment::default(),
        PageState { theme, loaded: false },
        store,
    );

    let ready = core.handle(PageEvent::Ready);
    let at_top = run_frames(&mut core, &ready, 0.0);
    assert!(at_top.contains(&Effect::SetClass { target: Target::Nav, class: SCROLLED_CLASS, on: false }));
    assert!(at_top.contains(&Effect::SetStyle {
        target: Target::BackToTop,
        property: "display",
        value: "none".to_owned()
    }));

    // A fast fling: many scroll events, one frame per channel.
    let requested: Vec<Effect> = (0..40).flat_map(|_| core.handle(PageEvent::Scrolled)).collect();
    assert_eq!(requested.len(), 3);
    let deep = run_frames(&mut core, &requested, 1_200.0);
    assert!(deep.contains(&Effect::SetClass { target: Target::Nav, class: SCROLLED_CLASS, on: true }));
    assert!(deep.contains(&Effect::SetStyle {
        target: Target::HeroVisual,
        property: "transform",
        value: "translateY(-600px)".to_owned()
    }));

    let section = core.handle(PageEvent::SectionVisible(0));
    let scheduled = section.iter().filter(|e| matches!(e, Effect::After { .. })).count();
    assert_eq!(scheduled, 3);
    assert_eq!(
        core.handle(PageEvent::CardRevealDue(2)),
        vec![Effect::SetClass { target: Target::Card(2), class: FADE_IN_CLASS, on: true }]
    );

    core.handle(PageEvent::ThemeToggled);
    assert_eq!(core.store().get("theme"), Some("dark"));

    core.handle(PageEvent::Loaded);
    assert!(core.state().loaded);

    assert_eq!(core.handle(PageEvent::BackToTopClicked), vec![Effect::ScrollTo { top: 0.0 }]);
    assert_eq!(core.handle(PageEvent::Frame { channel: FrameChannel::Nav, scroll_y: 0.0 }).len(), 1);
}
