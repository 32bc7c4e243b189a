use async_trait::async_trait;
use ragelang_core::{FALLBACK_ROASTS, ROAST_MARKER, RoastContext, RoastPicker};
use ragelang_runtime::{FallbackRoaster, ProviderError, RoastProvider};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct AlwaysFails {
    calls: AtomicUsize,
}

#[async_trait]
impl RoastProvider for AlwaysFails {
    fn name(&self) -> &str {
        "always-fails"
    }

    async fn generate(&self, _context: &RoastContext) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::Status { status: 401 })
    }
}

struct Canned(String);

#[async_trait]
impl RoastProvider for Canned {
    fn name(&self) -> &str {
        "canned"
    }

    async fn generate(&self, _context: &RoastContext) -> Result<String, ProviderError> {
        Ok(self.0.clone())
    }
}

fn context() -> RoastContext {
    RoastContext {
        language_id: "rust".to_string(),
        errored_line_text: "let x = ;".to_string(),
        error_messages: vec!["expected expression, found `;`".to_string()],
    }
}

#[tokio::test]
async fn test_failing_provider_always_yields_a_fallback_roast() {
    let provider = Arc::new(AlwaysFails {
        calls: AtomicUsize::new(0),
    });
    let roaster = FallbackRoaster::new(Some(provider.clone() as Arc<dyn RoastProvider>));

    for _ in 0..50 {
        let roast = roaster.roast(&context()).await;
        assert!(!roast.is_empty());
        assert!(FALLBACK_ROASTS.contains(&roast.as_str()), "{roast}");
    }
    assert_eq!(provider.calls.load(Ordering::SeqCst), 50);
}

#[tokio::test]
async fn test_offline_roaster_never_calls_out() {
    let roaster = FallbackRoaster::offline();
    assert!(!roaster.has_provider());
    let roast = roaster.roast(&RoastContext::default()).await;
    assert!(FALLBACK_ROASTS.contains(&roast.as_str()));
}

#[tokio::test]
async fn test_seeded_fallback_is_reproducible() {
    let a = FallbackRoaster::offline().with_picker(RoastPicker::seeded(7));
    let b = FallbackRoaster::offline().with_picker(RoastPicker::seeded(7));
    for _ in 0..10 {
        assert_eq!(a.roast(&context()).await, b.roast(&context()).await);
    }
}

#[tokio::test]
async fn test_provider_text_is_normalized() {
    let roaster = FallbackRoaster::new(Some(Arc::new(Canned(
        "\n\"Your semicolon left you.\"\nsecond line".to_string(),
    ))));
    assert_eq!(
        roaster.roast(&context()).await,
        format!("{ROAST_MARKER} Your semicolon left you.")
    );

    let marked = FallbackRoaster::new(Some(Arc::new(Canned("🔥 already marked".to_string()))));
    assert_eq!(marked.roast(&context()).await, "🔥 already marked");
}

#[tokio::test]
async fn test_blank_provider_text_falls_back() {
    let roaster = FallbackRoaster::new(Some(Arc::new(Canned("   \n  ".to_string()))));
    let roast = roaster.roast(&context()).await;
    assert!(FALLBACK_ROASTS.contains(&roast.as_str()));
}

#[tokio::test]
async fn test_long_provider_text_is_cut_to_width() {
    let roaster =
        FallbackRoaster::new(Some(Arc::new(Canned("a".repeat(500))))).with_max_width(20);
    let roast = roaster.roast(&context()).await;
    assert!(roast.starts_with(ROAST_MARKER));
    assert!(roast.ends_with('…'));
    assert!(roast.chars().count() <= 20);
}
