use cgmath::InnerSpace;
use region_viewer::{
    animation::{OVERVIEW_EYE, TargetMode},
    config::Palette,
    hover::HoverEvent,
    registry::Slot,
    state::ViewerState,
};

mod common;

use crate::common::test_utils::{fovy, offset, registry, run_frames, square_bounds, viewer};

fn enter(label: &str) -> HoverEvent {
    HoverEvent::Enter(label.to_string())
}

#[test]
fn should_pause_while_unfocused() {
    let mut state = viewer(&[0, 1], &[]);
    state.on_hover(&enter("Barddhaman"));
    run_frames(&mut state, 10);

    let offsets = (offset(&state, 0), offset(&state, 1));
    let eye = state.rig.eye();
    let yaw = state.rig.yaw();

    state.set_focus(false);
    assert!(!state.is_running());
    for _ in 0..30 {
        assert!(!state.update(fovy()));
    }
    assert_eq!((offset(&state, 0), offset(&state, 1)), offsets);
    assert_eq!(state.rig.eye(), eye);
    assert_eq!(state.rig.yaw(), yaw);

    // hover still lands while paused and takes effect on resume
    state.on_hover(&HoverEvent::Leave);
    assert_eq!(state.hover.hovered(), None);

    state.set_focus(true);
    assert!(state.update(fovy()));
    assert!(offset(&state, 1) < offsets.1);
    assert_eq!(state.rig.mode(), TargetMode::Overview);
}

#[test]
fn should_survive_hovering_a_failed_region() {
    let mut state = viewer(&[0, 1, 2], &[3]);
    assert_eq!(state.regions.slot(3), Some(&Slot::Failed));

    state.on_hover(&enter("Coochbihar"));
    assert_eq!(state.hover.hovered(), Some(3));
    run_frames(&mut state, 50);

    assert_eq!(state.rig.mode(), TargetMode::Overview);
    assert!((state.rig.eye() - OVERVIEW_EYE).magnitude() < 1e-3);
    assert!(state.regions.get(3).is_none());
    for i in 0..3 {
        assert_eq!(offset(&state, i), 0.0);
    }
}

#[test]
fn should_follow_once_a_pending_region_arrives() {
    let mut state = viewer(&[], &[]);
    state.on_hover(&enter("Kolkata"));
    run_frames(&mut state, 5);
    assert_eq!(state.rig.mode(), TargetMode::Overview);

    assert!(state.region_loaded(9, square_bounds(1.0, 1.0)));
    run_frames(&mut state, 1);
    assert_eq!(state.rig.mode(), TargetMode::Following(9));
    assert!(offset(&state, 9) > 0.0);
    assert_eq!(state.rig.target(), square_bounds(1.0, 1.0).center());
}

#[test]
fn should_ignore_duplicate_and_out_of_range_results() {
    let mut state = ViewerState::new(registry(), Palette::default());
    assert!(state.region_loaded(2, square_bounds(0.0, 0.0)));
    assert!(!state.region_loaded(2, square_bounds(5.0, 5.0)));
    assert!(!state.region_failed(2));
    assert!(!state.region_loaded(19, square_bounds(0.0, 0.0)));
    assert!(!state.region_failed(42));
    assert_eq!(state.regions.get(2).map(|r| r.bounds), Some(square_bounds(0.0, 0.0)));
    assert_eq!(state.regions.len(), 19);
}

#[test]
fn unmatched_hover_keeps_the_current_region() {
    let mut state = viewer(&[7], &[]);
    state.on_hover(&enter("Hugli"));
    run_frames(&mut state, 3);
    assert!(!state.on_hover(&enter("Hooghly")));
    run_frames(&mut state, 3);
    assert_eq!(state.hover.hovered(), Some(7));
    assert_eq!(state.rig.mode(), TargetMode::Following(7));
}

#[test]
fn loaded_regions_start_at_rest() {
    let state = viewer(&[0], &[]);
    let region = state.regions.get(0).expect("loaded");
    assert_eq!(region.anim.offset, 0.0);
    assert_eq!(region.anim.color, Palette::default().rest);
    assert!(state.is_running());
}
