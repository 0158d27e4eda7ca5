use proptest::prelude::*;

use screenwiz_processing_core::{
    canvas_size, pad_working_frame, preceding_event, CornerEligibility, Size, ZoomAnchor,
    ZoomCurve, ZoomLayout,
};
use screenwiz_project_model::settings::{AspectRatio, PaddingSpec};
use screenwiz_project_model::timeline::{ZoomEvent, ZoomTimeline};

fn signature(layouts: &[ZoomLayout]) -> String {
    layouts
        .iter()
        .map(|l| {
            format!(
                "{:.4}|{}x{}|{},{}|{},{}",
                l.factor, l.zoomed.width, l.zoomed.height, l.x1, l.y1, l.crop_x, l.crop_y
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Geometry for every frame of a short clip, computed the way the zoom
/// stage does it.
fn layouts_for(timeline: &ZoomTimeline, frames: std::ops::Range<u64>, fps: f64) -> Vec<ZoomLayout> {
    let source = Size::new(1280, 720);
    let canvas = canvas_size(AspectRatio::ratio(16.0, 9.0).unwrap(), source);
    let working = pad_working_frame(canvas, source, PaddingSpec::Uniform(40)).working;

    let events = timeline.live_events();
    let indices = timeline.live_frame_indices();
    let curve = ZoomCurve::default();

    frames
        .map(|frame| match preceding_event(&events, &indices, frame) {
            Some(event) => {
                let sample = curve.sample(event, frame, fps);
                let anchor = ZoomAnchor::classify(event.x, event.y, 0.3);
                ZoomLayout::compute(canvas, working, sample.factor, anchor)
            }
            None => ZoomLayout::centered(canvas, working),
        })
        .collect()
}

#[test]
fn frames_before_first_event_are_centered_and_round() {
    let mut timeline = ZoomTimeline::new();
    timeline
        .insert(ZoomEvent::new(0.2, 0.8, 30, 2.0).unwrap())
        .unwrap();

    for layout in layouts_for(&timeline, 0..30, 30.0) {
        assert!((layout.factor - 1.0).abs() < 1e-12);
        assert_eq!(layout.corners, CornerEligibility::ALL);
        assert_eq!((layout.crop_x, layout.crop_y), (0, 0));
    }
}

#[test]
fn seek_order_does_not_change_geometry() {
    let mut timeline = ZoomTimeline::new();
    timeline
        .insert(ZoomEvent::new(0.1, 0.1, 10, 1.5).unwrap())
        .unwrap();
    timeline
        .insert(ZoomEvent::new(0.9, 0.5, 70, 2.5).unwrap())
        .unwrap();

    let sequential = layouts_for(&timeline, 0..160, 30.0);
    let mut shuffled: Vec<u64> = (0..160).rev().collect();
    shuffled.rotate_left(37);
    for frame in shuffled {
        let single = layouts_for(&timeline, frame..frame + 1, 30.0);
        assert_eq!(signature(&single), signature(&sequential[frame as usize..=frame as usize]));
    }
}

#[test]
fn anchored_edge_stays_on_canvas_during_zoom() {
    let mut timeline = ZoomTimeline::new();
    timeline
        .insert(ZoomEvent::new(0.05, 0.5, 0, 3.0).unwrap())
        .unwrap();

    let rest = layouts_for(&timeline, 0..1, 30.0)[0];
    for layout in layouts_for(&timeline, 1..90, 30.0) {
        // Left-anchored: the left edge never moves off its resting column.
        assert_eq!(layout.frame_x1, rest.frame_x1);
        assert!(layout.corners.top_left == (layout.frame_y1 >= 0));
    }
}

proptest! {
    #[test]
    fn prop_visible_region_fits_canvas(
        w in 1u32..2000,
        h in 1u32..2000,
        pad in 0u32..300,
        factor in 1.0f64..4.0,
        x in 0.0f64..=1.0,
        y in 0.0f64..=1.0,
    ) {
        let canvas = Size::new(w, h);
        let working = pad_working_frame(canvas, canvas, PaddingSpec::Uniform(pad)).working;
        let layout = ZoomLayout::compute(canvas, working, factor, ZoomAnchor::classify(x, y, 0.3));

        prop_assert!(layout.x2 <= w && layout.y2 <= h);
        prop_assert!(layout.x1 <= layout.x2 && layout.y1 <= layout.y2);
        prop_assert!(layout.crop_x + layout.visible_size().width <= layout.zoomed.width);
        prop_assert!(layout.crop_y + layout.visible_size().height <= layout.zoomed.height);
    }
}
