#![forbid(unsafe_code)]

//! Spans emitted by language switches and context loads.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::executor::block_on;
use jinrou_i18n::{I18nError, Localization, LocalizationCache, ResourceCatalog};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

struct SpanCapture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
}

impl<S> tracing_subscriber::Layer<S> for SpanCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn captured_spans(f: impl FnOnce()) -> Vec<CapturedSpan> {
    let spans = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(SpanCapture {
        spans: Arc::clone(&spans),
    });
    tracing::subscriber::with_default(subscriber, f);
    let captured = spans.lock().unwrap().clone();
    captured
}

fn localization() -> Localization {
    let mut catalog = ResourceCatalog::new();
    catalog.add_resource("ja", "common", "ok", "了解");
    Localization::builder(catalog).build()
}

#[test]
fn language_change_span_records_languages() {
    let spans = captured_spans(|| {
        let loc = localization();
        let _sub = loc.on_language_changed(|_| {});
        loc.change_language("en");
        loc.change_language("en");
    });
    let changes: Vec<_> = spans.iter().filter(|s| s.name == "i18n.language_changed").collect();
    assert_eq!(changes.len(), 1, "unchanged language emits nothing");
    assert_eq!(changes[0].fields.get("from").map(String::as_str), Some("ja"));
    assert_eq!(changes[0].fields.get("to").map(String::as_str), Some("en"));
    assert_eq!(changes[0].fields.get("listeners").map(String::as_str), Some("1"));
}

#[test]
fn each_load_attempt_gets_a_generation() {
    let spans = captured_spans(|| {
        let cache = LocalizationCache::new(|| async { Err(I18nError::Load("offline".into())) });
        assert!(block_on(cache.get()).is_err());
        assert!(block_on(cache.get()).is_err());
    });
    let generations: Vec<_> = spans
        .iter()
        .filter(|s| s.name == "i18n.load")
        .filter_map(|s| s.fields.get("generation").cloned())
        .collect();
    assert_eq!(generations, vec!["1", "2"]);
}
