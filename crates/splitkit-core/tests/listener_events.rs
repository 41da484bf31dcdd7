//! Debug events emitted as document listeners attach and detach.

use std::sync::{Arc, Mutex};

use splitkit_core::event::PointerEvent;
use splitkit_core::pointer::{PointerKinds, PointerTarget};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Debug, Clone, PartialEq, Eq)]
struct ListenerEvent {
    action: String,
    owner: String,
    total: u64,
}

struct CaptureLayer {
    captured: Arc<Mutex<Vec<ListenerEvent>>>,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        #[derive(Default)]
        struct Fields {
            message: Option<String>,
            action: Option<String>,
            owner: Option<String>,
            total: Option<u64>,
        }
        impl tracing::field::Visit for Fields {
            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                match field.name() {
                    "message" => self.message = Some(value.to_string()),
                    "action" => self.action = Some(value.to_string()),
                    "owner" => self.owner = Some(value.to_string()),
                    _ => {}
                }
            }

            fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
                if field.name() == "total" {
                    self.total = Some(value);
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                let text = format!("{value:?}").trim_matches('"').to_string();
                match field.name() {
                    "message" => self.message = Some(text),
                    "action" => self.action = Some(text),
                    "owner" => self.owner = Some(text),
                    _ => {}
                }
            }
        }
        let mut fields = Fields::default();
        event.record(&mut fields);
        if fields.message.as_deref() != Some("pointer_target.listener") {
            return;
        }
        if let (Some(action), Some(owner)) = (fields.action, fields.owner) {
            self.captured
                .lock()
                .expect("capture lock")
                .push(ListenerEvent {
                    action,
                    owner,
                    total: fields.total.unwrap_or_default(),
                });
        }
    }
}

fn capture() -> (Arc<Mutex<Vec<ListenerEvent>>>, tracing::subscriber::DefaultGuard) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(CaptureLayer {
        captured: Arc::clone(&captured),
    });
    let guard = tracing::subscriber::set_default(subscriber);
    (captured, guard)
}

fn actions(captured: &Arc<Mutex<Vec<ListenerEvent>>>) -> Vec<(String, String)> {
    captured
        .lock()
        .expect("capture lock")
        .iter()
        .map(|event| (event.action.clone(), event.owner.clone()))
        .collect()
}

#[test]
fn listen_then_release_logs_attach_then_detach() {
    let (captured, _guard) = capture();
    let target = PointerTarget::new();

    let guard = target.listen("drag", PointerKinds::DRAG, |_| {});
    target.dispatch(&PointerEvent::moved(10.0, 10.0));
    guard.release();

    assert_eq!(
        actions(&captured),
        vec![
            ("attach".to_string(), "drag".to_string()),
            ("detach".to_string(), "drag".to_string()),
        ]
    );
    let totals: Vec<u64> = captured
        .lock()
        .expect("capture lock")
        .iter()
        .map(|event| event.total)
        .collect();
    assert_eq!(totals, vec![1, 0]);
}

#[test]
fn interleaved_owners_detach_in_release_order() {
    let (captured, _guard) = capture();
    let target = PointerTarget::new();

    let first = target.listen("first", PointerKinds::MOVE, |_| {});
    let second = target.listen("second", PointerKinds::UP, |_| {});
    drop(second);
    drop(first);

    assert_eq!(
        actions(&captured),
        vec![
            ("attach".to_string(), "first".to_string()),
            ("attach".to_string(), "second".to_string()),
            ("detach".to_string(), "second".to_string()),
            ("detach".to_string(), "first".to_string()),
        ]
    );
}

#[test]
fn guard_outliving_target_logs_no_detach() {
    let (captured, _guard) = capture();
    let target = PointerTarget::new();
    let guard = target.listen("orphan", PointerKinds::DRAG, |_| {});
    drop(target);
    assert!(!guard.is_attached());
    drop(guard);

    assert_eq!(
        actions(&captured),
        vec![("attach".to_string(), "orphan".to_string())]
    );
}
