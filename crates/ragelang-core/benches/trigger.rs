use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use ragelang_core::{Diagnostic, DocumentId, ManualClock, TriggerEngine};
use std::time::Duration;

fn snapshot(error_count: usize) -> Vec<Diagnostic> {
    (0..error_count)
        .map(|i| Diagnostic::error(i * 3, format!("error {i}: cannot find value `x{i}`")))
        .collect()
}

fn bench_cursor_sweep(c: &mut Criterion) {
    let doc = DocumentId::new("file:///bench.rs");
    let diagnostics = snapshot(2_000);
    c.bench_function("cursor_sweep/10k_moves_2k_errors", |b| {
        b.iter_batched(
            || {
                let clock = ManualClock::new();
                let mut engine = TriggerEngine::with_clock(clock.clone(), Duration::ZERO);
                engine.set_active_document(doc.clone());
                engine.on_diagnostics_changed(&doc, &diagnostics);
                engine
            },
            |mut engine| {
                let mut fires = 0usize;
                for line in 0..10_000 {
                    if engine.on_cursor_moved(black_box(line % 6_000)).is_some() {
                        fires += 1;
                    }
                }
                black_box(fires);
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_reconcile(c: &mut Criterion) {
    let doc = DocumentId::new("file:///bench.rs");
    let diagnostics = snapshot(5_000);
    let mut engine = TriggerEngine::with_clock(ManualClock::new(), Duration::from_secs(3));
    engine.set_active_document(doc.clone());
    c.bench_function("reconcile/5k_errors", |b| {
        b.iter(|| {
            engine.on_document_changed(&doc, black_box(&diagnostics));
            black_box(engine.pending().len());
        })
    });
}

criterion_group!(benches, bench_cursor_sweep, bench_reconcile);
criterion_main!(benches);
