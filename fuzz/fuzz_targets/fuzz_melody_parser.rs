//! Fuzz target: melody parser and player
//!
//! Parses arbitrary text as a song, then plays it to completion on a
//! simulated clock. The player must never panic and must go idle once
//! the song's total length has elapsed.
//!
//! cargo fuzz run fuzz_melody_parser

#![no_main]

use homewatch::melody::{MelodyPlayer, parse, song_length_ms};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    let tones = parse(text).count();
    assert_eq!(tones, text.len() / 3);

    // The player only takes 'static songs.
    let song: &'static str = Box::leak(text.to_owned().into_boxed_str());
    let total = song_length_ms(song);

    let mut player = MelodyPlayer::new();
    player.play(song);
    let mut now = 0u32;
    // Each tone may start up to one step late.
    let limit = total + 10 * (tones as u32 + 1);
    while now <= limit {
        let _ = player.tick(now);
        now += 10;
    }
    assert!(!player.is_busy(), "player still busy after the whole song");
});
