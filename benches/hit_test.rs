//! Hit-test performance benchmarks.
//!
//! A tap resolves its row arithmetically and then scans that row's events,
//! so cost should track events per channel, not channel count.
//!
//! Run with: cargo bench --bench hit_test

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use epgview::model::{Channel, ChannelId, Event, GuideData, ImageKey};
use epgview::view_state::layout_params::{DAY_MILLIS, MINUTE_MILLIS};
use epgview::view_state::{
    GridGeometry, LayoutModel, ScrollOffset, TimeAxis, TimeWindow, Viewport, ViewportSize,
    hit_test,
};

const NOW: i64 = 1_700_000_000_000;

/// `channels` rows, each with back-to-back events of `slot_minutes` across
/// the whole window.
fn generate_guide(channels: usize, slot_minutes: i64) -> GuideData {
    let slot = slot_minutes * MINUTE_MILLIS;
    let rows = (0..channels)
        .map(|n| {
            let channel = Channel::new(
                ChannelId::new(format!("ch-{n}")).expect("valid id"),
                format!("Channel {n}"),
                ImageKey::new(format!("logos/{n}.png")).expect("valid key"),
            );
            let mut events = Vec::new();
            let mut start = NOW - 3 * DAY_MILLIS;
            while start < NOW + 3 * DAY_MILLIS {
                events.push(Event::new(start, start + slot, format!("Show {}", events.len())));
                start += slot;
            }
            (channel, events)
        })
        .collect();
    GuideData::new(rows)
}

fn viewport(scroll: ScrollOffset) -> Viewport {
    let size = ViewportSize::new(200, 60);
    let geometry = GridGeometry::default();
    Viewport {
        axis: TimeAxis::recompute(TimeWindow::default(), &geometry, size.width, NOW)
            .expect("positive width"),
        layout: LayoutModel::new(geometry),
        size,
        scroll,
        now_millis: NOW,
    }
}

/// Benchmark a program-area tap with varying channel counts.
fn benchmark_hit_test_channels(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test_channels");

    for channels in [100, 1_000, 10_000] {
        let data = generate_guide(channels, 30);
        let vp = viewport(ScrollOffset::new(2000, 0));

        group.bench_with_input(BenchmarkId::new("tap", channels), &data, |b, data| {
            b.iter(|| hit_test(black_box(&vp), data, black_box(120), black_box(30)));
        });
    }

    group.finish();
}

/// Benchmark a tap at different points of a long schedule.
fn benchmark_hit_test_schedule_position(c: &mut Criterion) {
    let data = generate_guide(50, 5);
    let mut group = c.benchmark_group("hit_test_schedule_position");

    for (name, scroll_x) in [("start", 0), ("middle", 2900), ("end", 5700)] {
        let vp = viewport(ScrollOffset::new(scroll_x, 0));
        group.bench_with_input(BenchmarkId::new("position", name), &vp, |b, vp| {
            b.iter(|| hit_test(black_box(vp), &data, black_box(100), black_box(10)));
        });
    }

    group.finish();
}

/// Benchmark visible-row computation alone.
fn benchmark_visible_rows(c: &mut Criterion) {
    let layout = LayoutModel::new(GridGeometry::default());
    c.bench_function("visible_rows", |b| {
        b.iter(|| layout.visible_rows(black_box(20_000), black_box(60), black_box(10_000)));
    });
}

criterion_group!(
    benches,
    benchmark_hit_test_channels,
    benchmark_hit_test_schedule_position,
    benchmark_visible_rows
);
criterion_main!(benches);
