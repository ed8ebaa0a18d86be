//! MONITOR mode: step display, periodic report, alerts, blink.

use homewatch::app::events::AppEvent;
use homewatch::drivers::led_patterns::{COLOUR_FIRE, COLOUR_FIRE_AND_DARKNESS, COLOUR_OFF};
use homewatch::fsm::StateId;
use homewatch::report::{DARKNESS_MESSAGE, FIRE_MESSAGE, MONITOR_ENTRY_MESSAGE};
use homewatch::sensors::Acceleration;

use crate::mock_hw::{BoardCall, Rig};

#[test]
fn step_display_counts_seconds_in_hex() {
    let mut rig = Rig::into_monitor();

    rig.run_for(1_000);
    assert_eq!(rig.hw.last_seven_segment(), Some('0'));
    rig.run_for(10_000);
    assert_eq!(rig.hw.last_seven_segment(), Some('A'));
    rig.run_for(5_000);
    assert_eq!(rig.hw.last_seven_segment(), Some('F'));
    rig.run_for(1_000);
    assert_eq!(rig.hw.last_seven_segment(), Some('0'));
}

#[test]
fn quiet_report_after_sixteen_steps() {
    let mut rig = Rig::into_monitor();

    rig.run_for(15_000);
    assert!(rig.hw.serial.is_empty());

    rig.run_for(1_000);
    assert_eq!(
        rig.hw.serial,
        vec!["000_-_T22.5_L120_AX0_AY0_AZ64\r\n".to_string()]
    );
    assert_eq!(rig.app.context().sequence.digits(), [0, 0, 1]);
    assert!(rig.sink.events.contains(&AppEvent::ReportSent { sequence: 0 }));
}

#[test]
fn fire_report_precedes_status_line() {
    let mut rig = Rig::into_monitor();
    rig.hw.temperature_tenths = 460;

    rig.run_for(16_000);
    assert_eq!(rig.hw.serial.len(), 2);
    assert_eq!(rig.hw.serial[0], FIRE_MESSAGE);
    // Sampled on step 6 and 11, so the line carries the hot reading.
    assert!(rig.hw.serial[1].starts_with("000_-_T46.0_L120"));
    assert_eq!(rig.app.context().sequence.digits(), [0, 0, 1]);
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::FireDetected { .. })),
        1
    );
}

#[test]
fn alarm_threshold_itself_is_not_fire() {
    let mut rig = Rig::into_monitor();
    rig.hw.temperature_tenths = 450;
    rig.run_for(16_000);

    assert!(!rig.app.context().alerts.is_fire);
    assert_eq!(rig.hw.serial_count("Fire"), 0);
    assert!(rig.hw.rgb_history().is_empty());
}

#[test]
fn sequence_continues_across_monitor_visits() {
    let mut rig = Rig::into_monitor();
    rig.run_for(16_000);
    assert!(rig.hw.serial[0].starts_with("000_"));

    rig.tap_mode();
    assert_eq!(rig.app.state(), StateId::Stable);
    rig.run_for(500);
    rig.tap_mode();
    assert_eq!(rig.app.state(), StateId::Monitor);
    assert_eq!(rig.app.context().cycle.step(), 0);

    rig.hw.serial.clear();
    rig.run_for(16_000);
    assert_eq!(rig.hw.serial.len(), 1);
    assert!(rig.hw.serial[0].starts_with("001_"));
}

#[test]
fn sensors_resampled_only_on_sample_steps() {
    let mut rig = Rig::into_monitor();
    let reads_at_entry = rig.hw.light_reads;
    rig.hw.light_lux = 300;

    rig.run_for(5_000);
    assert_eq!(rig.hw.light_reads, reads_at_entry);
    assert_eq!(rig.app.sensors().light_lux, 120);

    rig.run_for(1_000);
    assert_eq!(rig.hw.light_reads, reads_at_entry + 1);
    assert_eq!(rig.app.sensors().light_lux, 300);

    rig.run_for(10_000);
    assert_eq!(rig.hw.light_reads, reads_at_entry + 3);
    assert!(
        rig.hw
            .last_screen()
            .is_some_and(|f| f.text_at(0, 20) == Some("L = 300"))
    );
}

#[test]
fn light_low_latches_darkness_and_silences_the_alarm() {
    let mut rig = Rig::into_monitor();
    rig.light_low();

    assert!(rig.app.context().alerts.is_dark);
    assert_eq!(rig.hw.thresholds(), vec![0]);
    assert!(rig.hw.calls.contains(&BoardCall::AckLight));
    assert!(rig.sink.events.contains(&AppEvent::DarknessDetected));
    // Darkness alone does not blink.
    assert!(rig.hw.rgb_history().is_empty());
}

#[test]
fn movement_in_darkness_is_reported() {
    let mut rig = Rig::into_monitor();
    rig.light_low();
    rig.run_for(100);

    rig.hw.acceleration = Acceleration::new(0, 0, 40);
    rig.run_for(100);
    assert!(rig.app.context().alerts.is_walking_dark);
    assert_eq!(rig.sink.count(|e| *e == AppEvent::WalkingInDarkDetected), 1);

    rig.run_for(16_000);
    assert_eq!(rig.hw.serial[0], DARKNESS_MESSAGE);
    assert!(rig.hw.serial[1].starts_with("000_-_T"));
}

#[test]
fn movement_in_light_is_ignored() {
    let mut rig = Rig::into_monitor();
    rig.run_for(100);
    rig.hw.acceleration = Acceleration::new(0, 0, 10);
    rig.run_for(100);

    assert!(!rig.app.context().alerts.is_walking_dark);
    assert_eq!(rig.sink.count(|e| *e == AppEvent::WalkingInDarkDetected), 0);
}

#[test]
fn fire_blinks_red_then_purple_with_movement() {
    let mut rig = Rig::into_monitor();
    rig.hw.temperature_tenths = 470;
    rig.run_for(1_500);

    let history = rig.hw.rgb_history();
    assert_eq!(&history[..4], &[COLOUR_FIRE, COLOUR_OFF, COLOUR_FIRE, COLOUR_OFF]);

    rig.light_low();
    rig.hw.acceleration = Acceleration::new(0, 0, 30);
    rig.run_for(20);
    assert_eq!(rig.hw.rgb_history().last(), Some(&COLOUR_FIRE_AND_DARKNESS));

    rig.run_for(500);
    rig.tap_mode();
    assert_eq!(rig.app.state(), StateId::Stable);
    assert_eq!(rig.hw.rgb_history().last(), Some(&COLOUR_OFF));
}

#[test]
fn failed_temperature_read_keeps_monitoring() {
    let mut rig = Rig::into_monitor();
    rig.hw.fail_temperature = true;
    rig.hw.temperature_tenths = 900;
    rig.run_for(16_000);

    assert_eq!(rig.app.state(), StateId::Monitor);
    assert!(!rig.app.context().alerts.is_fire);
    assert_eq!(rig.hw.serial.len(), 1);
    assert!(rig.hw.serial[0].starts_with("000_-_T22.5"));
}

#[test]
fn serial_failure_is_surfaced_not_fatal() {
    let mut rig = Rig::new();
    rig.hw.fail_serial = true;
    rig.tap_mode();

    assert_eq!(rig.app.state(), StateId::Monitor);
    assert!(rig.sink.events.contains(&AppEvent::SerialFailed));
    assert!(rig.hw.serial.is_empty());

    rig.hw.fail_serial = false;
    rig.run_for(16_000);
    assert_eq!(rig.hw.serial_count(MONITOR_ENTRY_MESSAGE), 0);
    assert_eq!(rig.hw.status_lines().len(), 1);
}
