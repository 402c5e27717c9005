//! Frame rendering benchmarks.
//!
//! Draws into a recording canvas, so this measures the draw pipeline
//! (visible-row selection, event culling, op generation) and not a
//! terminal backend.
//!
//! Run with: cargo bench --bench render_benchmark

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use epgview::model::{Bitmap, Channel, ChannelId, Event, GuideData, ImageKey};
use epgview::view_state::layout_params::{DAY_MILLIS, MINUTE_MILLIS};
use epgview::view_state::time_labels::UtcLabels;
use epgview::view_state::{
    FrameContext, GridGeometry, ImageCache, ImageLoader, LayoutModel, LoadCompletion,
    RecordingCanvas, RedrawRequest, ScrollOffset, TimeAxis, TimeWindow, Viewport, ViewportSize,
    ZonedLabels, render_frame,
};

const NOW: i64 = 1_700_000_000_000;

/// Completes every load synchronously with a small solid thumbnail.
struct SolidLoader;

impl ImageLoader for SolidLoader {
    fn load(&self, _key: &ImageKey, width: u32, height: u32, completion: LoadCompletion) {
        completion(Ok(Bitmap::solid(width.max(1), height.max(1), [40, 90, 200, 255])));
    }
}

fn generate_guide(channels: usize) -> GuideData {
    let rows = (0..channels)
        .map(|n| {
            let channel = Channel::new(
                ChannelId::new(format!("ch-{n}")).expect("valid id"),
                format!("Channel {n}"),
                ImageKey::new(format!("logos/{}.png", n % 40)).expect("valid key"),
            );
            // Mixed slot lengths so rows don't line up.
            let slot = (15 + (n as i64 % 4) * 15) * MINUTE_MILLIS;
            let mut events = Vec::new();
            let mut start = NOW - 3 * DAY_MILLIS;
            while start < NOW + 3 * DAY_MILLIS {
                events.push(Event::new(start, start + slot, format!("Programme {}", events.len())));
                start += slot;
            }
            (channel, events)
        })
        .collect();
    GuideData::new(rows)
}

fn viewport(size: ViewportSize) -> Viewport {
    let geometry = GridGeometry::default();
    let axis = TimeAxis::recompute(TimeWindow::default(), &geometry, size.width, NOW)
        .expect("positive width");
    Viewport {
        axis,
        layout: LayoutModel::new(geometry),
        size,
        scroll: ScrollOffset::new(axis.now_scroll_position(NOW), 400),
        now_millis: NOW,
    }
}

/// Benchmark one full frame at different terminal sizes.
fn benchmark_render_frame(c: &mut Criterion) {
    let data = generate_guide(1_000);
    let labels: UtcLabels = ZonedLabels(chrono::Utc);
    let redraw = RedrawRequest::new();
    let mut images = ImageCache::new(Box::new(SolidLoader));

    let mut group = c.benchmark_group("render_frame");

    for (width, height) in [(80, 24), (200, 60), (400, 120)] {
        let ctx = FrameContext {
            viewport: viewport(ViewportSize::new(width, height)),
            data: &data,
            labels: &labels,
            redraw: &redraw,
        };
        // Warm the thumbnail cache so frames measure drawing only.
        render_frame(&ctx, &mut images, &mut RecordingCanvas::new());
        images.pump();

        group.bench_with_input(
            BenchmarkId::new("size", format!("{width}x{height}")),
            &ctx,
            |b, ctx| {
                b.iter_batched(
                    RecordingCanvas::new,
                    |mut canvas| render_frame(ctx, &mut images, &mut canvas),
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_render_frame);
criterion_main!(benches);
