// Copyright 2026 the Awning Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scenario tests for the popup controller: controlled visibility, width
//! syncing, height caps, click toggling, dismissal, teardown, and
//! repositioning across viewport scrolls.

mod common;

use std::rc::Rc;

use awning_overlay::trigger::{TriggerConfig, TriggerSet};
use awning_overlay::{ElementId, Hub, OverlayLayer, Popup, PopupConfig, Target};
use awning_placement::Viewport;
use kurbo::{Rect, Size, Vec2};

use common::{FakeHost, click, dispatch};

const ANCHOR: ElementId = ElementId(1);
const ANCHOR_RECT: Rect = Rect::new(150.0, 150.0, 300.0, 300.0);

fn setup() -> (Hub, Rc<FakeHost>, OverlayLayer) {
    let hub = Hub::new();
    let host = FakeHost::new();
    host.put_element(ANCHOR, ANCHOR_RECT);
    (hub, host, OverlayLayer::new())
}

fn open_cfg() -> PopupConfig {
    PopupConfig {
        anchor: Some(ANCHOR),
        open: Some(true),
        ..Default::default()
    }
}

#[test]
fn controlled_open_mounts_and_places_below_the_anchor() {
    let (hub, host, layer) = setup();
    let popup = Popup::new(&hub, host, &layer, open_cfg());

    let surface = popup.surface().expect("open popup with an anchor mounts");
    assert!(layer.contains(surface));
    assert_eq!(layer.owner_of(surface), Some(ANCHOR));

    let style = popup.style().expect("anchor and surface are measurable");
    // Default attachment: below the anchor, left edges flush.
    assert_eq!((style.left, style.top), (150.0, 300.0));
}

#[test]
fn closed_popup_is_not_in_the_layer() {
    let (hub, host, layer) = setup();
    let popup = Popup::new(
        &hub,
        host,
        &layer,
        PopupConfig {
            anchor: Some(ANCHOR),
            open: Some(false),
            ..Default::default()
        },
    );

    assert!(!popup.is_open());
    assert_eq!(popup.surface(), None);
    assert_eq!(layer.surface_count(), 0);
}

#[test]
fn no_anchor_renders_nothing_even_when_open() {
    let (hub, host, layer) = setup();
    let popup = Popup::new(
        &hub,
        host,
        &layer,
        PopupConfig {
            anchor: None,
            open: Some(true),
            ..Default::default()
        },
    );

    // Let timers settle; nothing may appear.
    for now in [0, 200, 400] {
        popup.pump(now);
    }
    assert!(popup.is_open());
    assert_eq!(popup.surface(), None);
    assert_eq!(popup.style(), None);
    assert_eq!(layer.surface_count(), 0);
}

#[test]
fn syncs_the_popup_width_to_the_anchor() {
    let (hub, host, layer) = setup();
    let popup = Popup::new(&hub, host, &layer, open_cfg());

    let style = popup.style().expect("placed");
    assert_eq!(style.width, Some(150.0));
}

#[test]
fn unsynced_width_keeps_the_measured_size() {
    let (hub, host, layer) = setup();
    let popup = Popup::new(
        &hub,
        host,
        &layer,
        PopupConfig {
            sync_width: false,
            ..open_cfg()
        },
    );

    let style = popup.style().expect("placed");
    assert_eq!(style.width, None);
}

#[test]
fn sets_the_default_max_height() {
    let (hub, host, layer) = setup();
    let popup = Popup::new(&hub, host, &layer, open_cfg());

    assert_eq!(popup.style().expect("placed").max_height, Some(500.0));
}

#[test]
fn sets_and_enforces_an_explicit_max_height() {
    let (hub, host, layer) = setup();
    let popup = Popup::new(
        &hub,
        host,
        &layer,
        PopupConfig {
            max_height: 5.0,
            ..open_cfg()
        },
    );

    assert_eq!(popup.style().expect("placed").max_height, Some(5.0));
}

#[test]
fn style_waits_for_the_surface_to_become_measurable() {
    let (hub, host, layer) = setup();
    host.set_surface_size(None);
    let popup = Popup::new(&hub, host.clone(), &layer, open_cfg());

    let surface = popup.surface().expect("mounted while unplaced");
    assert_eq!(popup.style(), None);
    assert_eq!(layer.style_of(surface), None);

    host.set_surface_size(Some(Size::new(120.0, 48.0)));
    popup.pump(10);
    assert!(popup.style().is_some());
    assert!(layer.style_of(surface).is_some());
}

#[test]
fn two_sequential_clicks_toggle_open_then_closed() {
    let (hub, host, layer) = setup();
    let popup = Popup::new(
        &hub,
        host,
        &layer,
        PopupConfig {
            anchor: Some(ANCHOR),
            open: None,
            triggers: TriggerConfig {
                show: TriggerSet::single("click"),
                hide: TriggerSet::single("click"),
                ..Default::default()
            },
            ..Default::default()
        },
    );
    assert!(!popup.is_open());

    click(&hub, ANCHOR, 0);
    assert!(popup.is_open());
    assert_eq!(layer.surface_count(), 1);

    click(&hub, ANCHOR, 100);
    assert!(!popup.is_open());
    assert_eq!(layer.surface_count(), 0);
}

#[test]
fn outside_press_dismisses_an_open_popup() {
    let (hub, host, layer) = setup();
    let popup = Popup::new(&hub, host, &layer, open_cfg());
    assert!(popup.is_open());

    dispatch(&hub, "mousedown", None, 50);
    assert!(!popup.is_open());
    assert_eq!(layer.surface_count(), 0);
}

#[test]
fn press_on_the_popup_surface_does_not_dismiss_it() {
    let (hub, host, layer) = setup();
    let popup = Popup::new(&hub, host, &layer, open_cfg());
    let surface = popup.surface().expect("mounted");

    // The press lands on the floating content; the document-level handler
    // that follows in the same dispatch must not treat it as outside.
    dispatch(&hub, "mousedown", Some(Target::Surface(surface)), 50);
    assert!(popup.is_open());

    // A genuinely outside press still dismisses.
    dispatch(&hub, "mousedown", None, 100);
    assert!(!popup.is_open());
}

#[test]
fn disable_global_events_turns_off_outside_dismissal() {
    let (hub, host, layer) = setup();
    let popup = Popup::new(
        &hub,
        host,
        &layer,
        PopupConfig {
            disable_global_events: true,
            ..open_cfg()
        },
    );

    dispatch(&hub, "mousedown", None, 50);
    assert!(popup.is_open());
}

#[test]
fn controlled_open_changes_through_set_config() {
    let (hub, host, layer) = setup();
    let popup = Popup::new(
        &hub,
        host,
        &layer,
        PopupConfig {
            anchor: Some(ANCHOR),
            open: Some(false),
            ..Default::default()
        },
    );
    assert_eq!(layer.surface_count(), 0);

    popup.set_config(open_cfg(), 0);
    assert!(popup.is_open());
    assert_eq!(layer.surface_count(), 1);

    popup.set_config(
        PopupConfig {
            anchor: Some(ANCHOR),
            open: Some(false),
            ..Default::default()
        },
        100,
    );
    assert!(!popup.is_open());
    assert_eq!(layer.surface_count(), 0);
}

#[test]
fn dropping_an_open_popup_unmounts_and_releases_every_listener() {
    let (hub, host, layer) = setup();
    let popup = Popup::new(
        &hub,
        host,
        &layer,
        PopupConfig {
            triggers: TriggerConfig {
                show: TriggerSet::single("click"),
                hide: TriggerSet::single("click"),
                ..Default::default()
            },
            ..open_cfg()
        },
    );
    assert!(hub.subscriber_count() > 0);
    assert_eq!(layer.surface_count(), 1);

    drop(popup);
    assert_eq!(hub.subscriber_count(), 0);
    assert_eq!(layer.surface_count(), 0);

    // Events after teardown reach nothing and change nothing.
    click(&hub, ANCHOR, 500);
    dispatch(&hub, "scroll", None, 600);
    assert_eq!(hub.subscriber_count(), 0);
    assert_eq!(layer.surface_count(), 0);
}

#[test]
fn popup_below_a_scrolled_out_anchor_stays_in_vertical_sequence() {
    let hub = Hub::new();
    let host = FakeHost::new();
    let layer = OverlayLayer::new();
    // An anchor far down the document, with the window scrolled to it.
    let anchor_rect = Rect::new(100.0, 1000.0, 200.0, 1064.0);
    host.put_element(ANCHOR, anchor_rect);
    host.set_viewport(Viewport::new(Vec2::new(500.0, 500.0), Size::new(800.0, 600.0)));

    let popup = Popup::new(&hub, host.clone(), &layer, open_cfg());
    let style = popup.style().expect("placed");
    // Document coordinates: directly below the anchor's bottom edge.
    assert_eq!(style.top, anchor_rect.y1);
    assert_eq!(style.left, anchor_rect.x0);
}

#[test]
fn scroll_repositions_after_the_debounce_window() {
    let (hub, host, layer) = setup();
    let popup = Popup::new(&hub, host.clone(), &layer, open_cfg());
    assert_eq!(popup.style().expect("placed").top, 300.0);

    // Layout shifts while the user scrolls.
    host.put_element(ANCHOR, Rect::new(150.0, 450.0, 300.0, 600.0));
    dispatch(&hub, "scroll", None, 1000);
    popup.pump(1100);
    assert_eq!(popup.style().expect("placed").top, 300.0, "still inside the debounce window");

    popup.pump(1200);
    assert_eq!(popup.style().expect("placed").top, 600.0);
}

#[test]
fn hide_on_scroll_dismisses_instead_of_repositioning() {
    let (hub, host, layer) = setup();
    let popup = Popup::new(
        &hub,
        host,
        &layer,
        PopupConfig {
            hide_on_scroll: true,
            ..open_cfg()
        },
    );

    dispatch(&hub, "scroll", None, 50);
    assert!(!popup.is_open());
    assert_eq!(layer.surface_count(), 0);
}

#[test]
fn moving_the_anchor_remounts_against_the_new_owner() {
    let (hub, host, layer) = setup();
    let other = ElementId(2);
    host.put_element(other, Rect::new(400.0, 400.0, 500.0, 440.0));

    let popup = Popup::new(&hub, host, &layer, open_cfg());
    popup.set_config(
        PopupConfig {
            anchor: Some(other),
            ..open_cfg()
        },
        0,
    );

    assert!(popup.is_open());
    let surface = popup.surface().expect("remounted");
    assert_eq!(layer.owner_of(surface), Some(other));
    assert_eq!(layer.surface_count(), 1);
    assert_eq!(popup.style().expect("placed").top, 440.0);
}
