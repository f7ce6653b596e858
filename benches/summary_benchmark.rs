use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jobhunt::models::ApplicationStatus;
use jobhunt::services::summarize;

fn status_set(len: usize) -> Vec<ApplicationStatus> {
    (0..len)
        .map(|i| match i % 4 {
            0 => ApplicationStatus::Applied,
            1 => ApplicationStatus::Interview,
            2 => ApplicationStatus::Offer,
            _ => ApplicationStatus::Rejected,
        })
        .collect()
}

fn benchmark_summarize(c: &mut Criterion) {
    let typical = status_set(100);
    let large = status_set(10_000);

    let mut group = c.benchmark_group("analytics_summary");

    group.bench_function("typical_user_100", |b| {
        b.iter(|| summarize(black_box(&typical).iter().copied()))
    });

    group.bench_function("heavy_user_10k", |b| {
        b.iter(|| summarize(black_box(&large).iter().copied()))
    });

    group.finish();
}

criterion_group!(benches, benchmark_summarize);
criterion_main!(benches);
