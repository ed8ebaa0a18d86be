//! Mode transitions: boot, mode button, rotary selector.

use homewatch::alerts::AlertFlags;
use homewatch::app::events::AppEvent;
use homewatch::config::SystemConfig;
use homewatch::drivers::led_patterns::COLOUR_OFF;
use homewatch::drivers::rotary::RotaryDirection;
use homewatch::events::Event;
use homewatch::fsm::StateId;
use homewatch::report::MONITOR_ENTRY_MESSAGE;

use crate::mock_hw::Rig;

#[test]
fn boots_into_stable_with_everything_blank() {
    let rig = Rig::new();

    assert_eq!(rig.app.state(), StateId::Stable);
    assert_eq!(rig.sink.events.first(), Some(&AppEvent::Started(StateId::Stable)));
    assert!(rig.hw.last_screen().is_some_and(|f| f.is_blank()));
    assert_eq!(rig.hw.last_seven_segment(), None);
    assert_eq!(rig.hw.last_led_bar(), 0);
    assert_eq!(rig.hw.rgb_history(), vec![COLOUR_OFF]);
    assert_eq!(rig.hw.thresholds(), vec![50]);
    assert!(rig.hw.serial.is_empty());
}

#[test]
fn mode_button_enters_monitor_once() {
    let mut rig = Rig::new();
    rig.tap_mode();

    assert_eq!(rig.app.state(), StateId::Monitor);
    assert_eq!(rig.hw.serial, vec![MONITOR_ENTRY_MESSAGE.to_string()]);
    assert_eq!(rig.app.context().cycle.step(), 0);
    assert!(rig.sink.events.contains(&AppEvent::ModeChanged {
        from: StateId::Stable,
        to: StateId::Monitor,
    }));
    assert!(rig.hw.last_screen().is_some_and(|f| f.text_at(30, 0) == Some("MONITOR")));
}

#[test]
fn presses_inside_debounce_window_are_ignored() {
    let mut rig = Rig::new();
    rig.tap_mode();
    assert_eq!(rig.app.state(), StateId::Monitor);

    rig.tap_mode();
    assert_eq!(rig.app.state(), StateId::Monitor);

    rig.run_for(500);
    rig.tap_mode();
    assert_eq!(rig.app.state(), StateId::Stable);
}

#[test]
fn held_button_toggles_once_per_window() {
    let mut rig = Rig::new();
    rig.hw.mode_pressed = true;
    rig.run_for(1200);

    let toggles = rig
        .sink
        .count(|e| matches!(e, AppEvent::ModeChanged { .. }));
    assert_eq!(toggles, 3);
    assert_eq!(rig.app.state(), StateId::Monitor);
    assert_eq!(rig.hw.serial_count("Entering MONITOR"), 2);
}

#[test]
fn rotary_selects_game_and_stable() {
    let mut rig = Rig::new();

    rig.rotate(RotaryDirection::Neutral);
    assert_eq!(rig.app.state(), StateId::Stable);

    rig.rotate(RotaryDirection::Right);
    assert_eq!(rig.app.state(), StateId::Game);

    rig.rotate(RotaryDirection::Left);
    assert_eq!(rig.app.state(), StateId::Stable);
}

#[test]
fn neutral_rotary_repeats_last_decision() {
    let mut rig = Rig::new();
    rig.rotate(RotaryDirection::Left);
    rig.tap_mode();
    assert_eq!(rig.app.state(), StateId::Monitor);

    rig.rotate(RotaryDirection::Neutral);
    assert_eq!(rig.app.state(), StateId::Stable);
}

#[test]
fn mode_button_ignored_while_round_runs() {
    let mut rig = Rig::new();
    rig.rotate(RotaryDirection::Right);
    assert!(rig.app.context().game.round_active());

    rig.tap_mode();
    assert_eq!(rig.app.state(), StateId::Game);

    // Wait for the round to run out; the button works in the gap.
    let mut guard = 0;
    while rig.app.context().game.round_active() {
        rig.run_for(10);
        guard += 1;
        assert!(guard < 5_000, "round never ended");
    }
    rig.tap_mode();
    assert_eq!(rig.app.state(), StateId::Monitor);
}

#[test]
fn returning_to_stable_rearms_light_alarm_and_clears_alerts() {
    let mut rig = Rig::into_monitor();
    rig.hw.temperature_tenths = 500;
    rig.light_low();
    assert!(rig.app.context().alerts.is_dark);
    assert!(rig.app.context().alerts.is_fire);

    rig.run_for(500);
    rig.tap_mode();
    assert_eq!(rig.app.state(), StateId::Stable);
    assert_eq!(rig.hw.thresholds(), vec![0, 50]);
    assert_eq!(rig.app.context().alerts, AlertFlags::default());
    assert_eq!(rig.hw.rgb_history().last(), Some(&COLOUR_OFF));
}

#[test]
fn last_rotary_decision_in_one_iteration_wins() {
    let mut rig = Rig::new();
    assert!(rig.inbox.push(Event::RotaryMoved(RotaryDirection::Right)));
    assert!(rig.inbox.push(Event::RotaryMoved(RotaryDirection::Left)));
    rig.run_for(20);

    assert_eq!(rig.app.state(), StateId::Stable);
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::ModeChanged { .. })), 0);
    assert_eq!(rig.sink.count(|e| *e == AppEvent::RoundStarted), 0);

    rig.tap_mode();
    assert!(rig.inbox.push(Event::RotaryMoved(RotaryDirection::Left)));
    assert!(rig.inbox.push(Event::RotaryMoved(RotaryDirection::Right)));
    rig.run_for(20);
    assert_eq!(rig.app.state(), StateId::Game);
}

#[test]
fn mode_button_settles_after_boot() {
    let mut rig = Rig::booted_at(SystemConfig::default(), 0);
    rig.tap_mode();
    assert_eq!(rig.app.state(), StateId::Stable);

    rig.run_for(480);
    rig.tap_mode();
    assert_eq!(rig.app.state(), StateId::Monitor);
}

#[test]
fn overflowing_inbox_is_reported() {
    let mut rig = Rig::new();
    while rig.inbox.push(Event::RotaryMoved(RotaryDirection::Neutral)) {}
    rig.step();

    assert!(rig.sink.events.iter().any(|e| matches!(e, AppEvent::EventsDropped(n) if *n >= 1)));
    assert!(rig.inbox.is_empty());
    assert_eq!(rig.app.state(), StateId::Stable);
}
