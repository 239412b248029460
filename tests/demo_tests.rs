//! Integration tests for DemoSession

mod common;
use common::*;

use touch_light_controller::colors::{SHOW_BEACON_A, SHOW_BEACON_B, SHOW_MAIN, SHOW_TURN};
use touch_light_controller::demo::CHASER_PIXELS;
use touch_light_controller::{DemoSession, DemoStatus, Presets, StripId, Strips, touch};

fn start(strips: &mut Strips<MockStrip>) -> DemoSession<TestInstant> {
    DemoSession::begin(TestInstant(0), 500, &Presets::default(), strips)
}

#[test]
fn begin_applies_brightness_and_clears() {
    let mut strips = mock_strips();
    strips.head(true, SHOW_MAIN);
    let presets = Presets {
        beacon_brightness: 42,
        ..Presets::default()
    };

    let demo = DemoSession::begin(TestInstant(0), 500, &presets, &mut strips);

    assert_eq!(demo.chaser_position(), 0);
    assert_eq!(strips.strip(StripId::Beacon).brightness(), 42);
    assert_eq!(strips.strip(StripId::Main).brightness(), 100);
    for id in [StripId::Beacon, StripId::Turn, StripId::Main] {
        assert!(lit(&strips, id).is_empty());
    }
}

#[test]
fn chaser_walks_centre_pixels_during_even_period() {
    let mut strips = mock_strips();
    let mut demo = start(&mut strips);

    for (frame, &pixel) in CHASER_PIXELS.iter().enumerate() {
        demo.step(TestInstant(frame as u64 * 20), 0, &mut strips);
        assert_eq!(lit(&strips, StripId::Main), [pixel]);
        assert_eq!(strips.strip(StripId::Main).pixels()[pixel], SHOW_MAIN);
    }
    assert_eq!(demo.chaser_position(), 0);

    // Wraps: lights pixel 1 again and darkens pixel 6
    demo.step(TestInstant(100), 0, &mut strips);
    assert_eq!(lit(&strips, StripId::Main), [1]);
}

#[test]
fn chaser_holds_during_odd_period() {
    let mut strips = mock_strips();
    let mut demo = start(&mut strips);
    demo.step(TestInstant(0), 0, &mut strips);
    demo.step(TestInstant(20), 0, &mut strips);

    demo.step(TestInstant(600), 0, &mut strips);
    demo.step(TestInstant(700), 0, &mut strips);

    assert_eq!(demo.chaser_position(), 2);
    assert_eq!(lit(&strips, StripId::Main), [2]);
}

#[test]
fn beacon_and_turn_flash_with_period_phase() {
    let mut strips = mock_strips();
    let mut demo = start(&mut strips);

    demo.step(TestInstant(0), 0, &mut strips);
    assert!(lit(&strips, StripId::Turn).is_empty());
    let beacon = strips.strip(StripId::Beacon).pixels();
    assert_eq!(beacon[0], SHOW_BEACON_A);
    assert_eq!(beacon[3], SHOW_BEACON_B);

    demo.step(TestInstant(500), 0, &mut strips);
    assert_eq!(lit(&strips, StripId::Turn), [0, 1, 2, 3]);
    assert_eq!(strips.strip(StripId::Turn).pixels()[0], SHOW_TURN);
    let beacon = strips.strip(StripId::Beacon).pixels();
    assert_eq!(beacon[0], SHOW_BEACON_B);
    assert_eq!(beacon[3], SHOW_BEACON_A);
}

#[test]
fn only_show_alone_ends_the_demo() {
    let mut strips = mock_strips();
    let mut demo = start(&mut strips);

    assert_eq!(
        demo.step(TestInstant(0), touch::SHOW | touch::CTRL, &mut strips),
        DemoStatus::Running
    );
    assert_eq!(
        demo.step(TestInstant(20), touch::SHOW, &mut strips),
        DemoStatus::Finished
    );

    demo.finish(&mut strips);
    for id in [StripId::Beacon, StripId::Turn, StripId::Main] {
        assert!(lit(&strips, id).is_empty());
    }
}
