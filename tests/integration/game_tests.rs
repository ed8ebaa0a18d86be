//! GAME mode: countdown bar, guesses, tunes, best score.

use homewatch::app::events::AppEvent;
use homewatch::config::SystemConfig;
use homewatch::drivers::rotary::RotaryDirection;
use homewatch::fsm::StateId;
use homewatch::melody::{CHAMPION_TUNE, Note, WIN_TUNE, parse};

use crate::mock_hw::{BoardCall, Rig};

fn notes_of(songs: &[&str]) -> Vec<Note> {
    songs
        .iter()
        .flat_map(|s| parse(s).filter_map(|t| t.note))
        .collect()
}

fn into_game(config: SystemConfig) -> Rig {
    let mut rig = Rig::with_config(config);
    rig.rotate(RotaryDirection::Right);
    assert_eq!(rig.app.state(), StateId::Game);
    rig
}

#[test]
fn entering_game_shows_title_and_starts_round() {
    let rig = into_game(SystemConfig::default());

    let screen = rig.hw.last_screen().expect("title frame");
    assert_eq!(screen.text_at(30, 0), Some("GAME"));
    assert_eq!(screen.text_at(30, 40), Some("NUMBER!"));
    assert_eq!(rig.hw.last_led_bar(), 0);
    assert!(rig.sink.events.contains(&AppEvent::RoundStarted));
}

#[test]
fn bar_fills_each_second_until_round_ends() {
    let mut rig = into_game(SystemConfig::default());

    rig.run_for(1_000);
    assert_eq!(rig.hw.last_led_bar(), 0x0001);
    rig.run_for(1_000);
    assert_eq!(rig.hw.last_led_bar(), 0x0003);
    assert_eq!(rig.app.context().game.score(), 2);

    rig.run_for(14_000);
    assert!(rig.hw.calls.contains(&BoardCall::LedBar(0xFFFF)));
    assert_eq!(rig.sink.count(|e| *e == AppEvent::RoundLost), 1);

    // A fresh round follows straight away.
    assert_eq!(rig.sink.count(|e| *e == AppEvent::RoundStarted), 2);
    assert!(rig.app.context().game.round_active());
    assert_eq!(rig.hw.last_led_bar(), 0);
}

#[test]
fn target_digit_shown_each_second() {
    let mut rig = into_game(SystemConfig::default());
    rig.run_for(1_000);

    let target = rig.app.context().game.target();
    assert!(target < 16);
    let expected = homewatch::drivers::seven_seg::hex_glyph(target);
    assert_eq!(rig.hw.last_seven_segment(), Some(expected));
}

#[test]
fn record_win_plays_both_tunes_and_announces_best() {
    let mut rig = into_game(SystemConfig::default());

    // Fresh round: target and lit-LED count are both zero.
    rig.hw.guess_pressed = true;
    rig.run_for(10);
    rig.hw.guess_pressed = false;

    let screen = rig.hw.last_screen().expect("win frame");
    assert_eq!(screen.text_at(10, 10), Some("Score: 0"));
    assert_eq!(screen.text_at(20, 50), Some("YOU WIN!"));
    assert_eq!(
        rig.hw.serial,
        vec!["CONGRATULATIONS! Your Highest Score is now 0.\r\n".to_string()]
    );
    assert!(rig.sink.events.contains(&AppEvent::GameWon {
        score: 0,
        new_best: Some(0),
    }));
    assert_eq!(rig.app.context().game.best(), 0);

    // Scoring is frozen while the tunes play.
    rig.run_for(3_000);
    assert_eq!(rig.app.context().game.score(), 0);
    assert_eq!(rig.hw.last_led_bar(), 0);

    rig.run_for(2_000);
    assert_eq!(rig.hw.notes_played(), notes_of(&[WIN_TUNE, CHAMPION_TUNE]));
    assert!(!rig.app.context().melody.is_busy());
}

#[test]
fn win_without_record_plays_only_short_tune() {
    let config = SystemConfig { initial_best_score: 0, ..SystemConfig::default() };
    let mut rig = into_game(config);

    rig.hw.guess_pressed = true;
    rig.run_for(10);
    rig.hw.guess_pressed = false;

    assert!(rig.sink.events.contains(&AppEvent::GameWon {
        score: 0,
        new_best: None,
    }));
    assert!(rig.hw.serial.is_empty());

    rig.run_for(2_000);
    assert_eq!(rig.hw.notes_played(), notes_of(&[WIN_TUNE]));
}

#[test]
fn leaving_game_silences_speaker_and_bar() {
    let mut rig = into_game(SystemConfig::default());
    rig.hw.guess_pressed = true;
    rig.run_for(10);
    rig.hw.guess_pressed = false;
    rig.run_for(100);
    assert!(rig.app.context().melody.is_busy());

    rig.rotate(RotaryDirection::Left);
    assert_eq!(rig.app.state(), StateId::Stable);
    assert_eq!(rig.hw.last_led_bar(), 0);
    assert!(!rig.app.context().melody.is_busy());
    assert_eq!(rig.hw.calls.last(), Some(&BoardCall::Tone(None)));
}

#[test]
fn rotating_right_again_resets_score() {
    let mut rig = into_game(SystemConfig::default());
    rig.run_for(3_000);
    assert_eq!(rig.app.context().game.score(), 3);

    rig.rotate(RotaryDirection::Right);
    assert_eq!(rig.app.state(), StateId::Game);
    assert_eq!(rig.app.context().game.score(), 0);
}
