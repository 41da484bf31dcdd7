//! Mounted tab strip against a host-driven width source.

use std::sync::{Arc, Mutex};

use splitkit_core::measure::ManualWidthSource;
use splitkit_widgets::{
    LabelWidth, OverflowControls, PathPrefixMatcher, ScrollableTabStrip, TabDescriptor,
    TabStripConfig, TabStripProps,
};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

fn nav_props() -> TabStripProps {
    TabStripProps::new([
        TabDescriptor::new("Overview", "/"),
        TabDescriptor::new("Pipelines", "/pipelines").right_content("14"),
        TabDescriptor::new("Deployments", "/deployments").loading(true),
        TabDescriptor::new("Insights", "/insights").beta(true),
        TabDescriptor::new("Settings", "/settings").icon("gear"),
    ])
    .class_name("project-nav")
}

#[test]
fn strip_follows_viewport_resizes() {
    let viewport = ManualWidthSource::new();
    let strip = ScrollableTabStrip::mount(
        nav_props(),
        LabelWidth::default(),
        TabStripConfig::default(),
        &viewport,
    );
    assert_eq!(strip.measured_viewport_width(), 0.0);
    assert_eq!(strip.controls(), OverflowControls::default());

    let content = strip.content_width();
    viewport.set_width(content / 2.0);
    assert_eq!(
        strip.controls(),
        OverflowControls {
            show_left: false,
            show_right: true
        }
    );

    strip.scroll_right();
    assert!(strip.controls().show_left);

    viewport.set_width(content + 10.0);
    assert_eq!(strip.scroll_offset(), 0.0);
    assert_eq!(strip.controls(), OverflowControls::default());
}

#[test]
fn loading_tab_stays_navigable_and_decorated() {
    let viewport = ManualWidthSource::with_width(2_000.0);
    let strip = ScrollableTabStrip::mount(
        nav_props(),
        LabelWidth::default(),
        TabStripConfig::default(),
        &viewport,
    );
    let view = strip.render(&PathPrefixMatcher::new("/deployments/prod"));
    let deployments = &view.tabs[2];
    assert!(deployments.active);
    assert!(deployments.tab.is_loading());
    assert_eq!(deployments.tab.destination(), "/deployments");
    assert!(view.tabs[3].tab.is_beta());
    assert_eq!(view.tabs[1].tab.trailing(), Some("14"));
    assert!(!view.tabs[0].active);
    assert_eq!(view.class_name.as_deref(), Some("project-nav"));
}

#[test]
fn revealing_active_tab_after_narrowing() {
    let viewport = ManualWidthSource::with_width(2_000.0);
    let strip = ScrollableTabStrip::mount(
        nav_props(),
        LabelWidth::default(),
        TabStripConfig::default(),
        &viewport,
    );
    viewport.set_width(150.0);
    strip.reveal(4);
    let view = strip.render(&PathPrefixMatcher::new("/settings"));
    let settings = &view.tabs[4];
    assert!(settings.visible);
    assert!(view.controls.show_left);
    assert_eq!(strip.tab_at(149.0), Some(4));
}

#[derive(Default)]
struct Captured {
    messages: Vec<String>,
    saw_view_span: bool,
}

struct CaptureLayer {
    captured: Arc<Mutex<Captured>>,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::Id,
        _ctx: Context<'_, S>,
    ) {
        if attrs.metadata().name() == "tab_strip.view" {
            self.captured.lock().expect("capture lock").saw_view_span = true;
        }
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        struct Msg {
            message: Option<String>,
        }
        impl tracing::field::Visit for Msg {
            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    self.message = Some(value.to_string());
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = Some(format!("{value:?}").trim_matches('"').to_string());
                }
            }
        }
        let mut msg = Msg { message: None };
        event.record(&mut msg);
        if let Some(message) = msg.message {
            self.captured
                .lock()
                .expect("capture lock")
                .messages
                .push(message);
        }
    }
}

#[test]
fn measurement_and_scroll_emit_debug_events() {
    let captured = Arc::new(Mutex::new(Captured::default()));
    let subscriber = tracing_subscriber::registry().with(CaptureLayer {
        captured: Arc::clone(&captured),
    });
    let _guard = tracing::subscriber::set_default(subscriber);

    let viewport = ManualWidthSource::with_width(200.0);
    let strip = ScrollableTabStrip::mount(
        nav_props(),
        LabelWidth::default(),
        TabStripConfig::default(),
        &viewport,
    );
    strip.scroll_right();
    let _ = strip.render(&PathPrefixMatcher::new("/"));

    let snapshot = captured.lock().expect("capture lock");
    assert!(snapshot.saw_view_span, "expected tab_strip.view span");
    for expected in ["tab_strip.measure", "tab_strip.scroll"] {
        assert!(
            snapshot.messages.iter().any(|m| m == expected),
            "missing {expected}: {:?}",
            snapshot.messages
        );
    }
}
