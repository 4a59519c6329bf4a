use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dogstatsd::prelude::*;
use dogstatsd::{EventOpts, EventPriority, NopMetricSink, StatsdClient};

fn new_nop_client() -> StatsdClient {
    StatsdClient::builder(NopMetricSink)
        .with_namespace("client.bench.")
        .with_tags(vec!["env:bench", "host:localhost"])
        .build()
}

fn benchmark_statsdclient_metrics(c: &mut Criterion) {
    let client = new_nop_client();

    c.bench_function("statsdclient_count", |b| {
        b.iter(|| client.count(black_box("some.counter"), 4, &[], 1.0))
    });
    c.bench_function("statsdclient_count_with_tags", |b| {
        b.iter(|| client.count(black_box("some.counter"), 4, &["route:/", "method:GET"], 1.0))
    });
    c.bench_function("statsdclient_gauge_with_sample_rate", |b| {
        b.iter(|| client.gauge(black_box("some.gauge"), 4.5, &[], 0.5))
    });
    c.bench_function("statsdclient_histogram", |b| {
        b.iter(|| client.histogram(black_box("some.histogram"), 12.0, &["route:/"], 1.0))
    });
    c.bench_function("statsdclient_set", |b| {
        b.iter(|| client.set(black_box("some.set"), "user-1234", &[], 1.0))
    });
}

fn benchmark_statsdclient_events(c: &mut Criterion) {
    let client = new_nop_client();
    let opts = EventOpts {
        priority: Some(EventPriority::Low),
        host: Some("localhost".to_string()),
        tags: vec!["deploy".to_string()],
        ..EventOpts::default()
    };

    c.bench_function("statsdclient_event", |b| {
        b.iter(|| client.event(black_box("Deploy"), "version 1.2.3 is live", &opts))
    });
    c.bench_function("statsdclient_warning", |b| {
        b.iter(|| client.warning(black_box("Disk"), "disk is 90% full", &["host:db1"]))
    });
}

criterion_group!(benches, benchmark_statsdclient_metrics, benchmark_statsdclient_events);
criterion_main!(benches);
