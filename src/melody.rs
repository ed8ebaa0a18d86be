//! Melody mini-language and cooperative player.
//!
//! A song is a string of three-character tones:
//!
//! ```text
//!   "C2."   note  duration  pause
//!            │       │        └─ '+' 0 ms, ',' 5 ms, '.' 20 ms, '_' 30 ms, other 5 ms
//!            │       └────────── '0'..'9' × 200 ms, other 400 ms
//!            └────────────────── 'A'..'G', 'a'..'g' (one octave up), other = rest
//! ```
//!
//! A trailing incomplete tone is ignored. [`MelodyPlayer`] walks a song one
//! phase at a time from the main loop; it never blocks.

use heapless::Deque;

use crate::tick::TickSnapshot;

/// Played on every game win.
pub const WIN_TUNE: &str = "b1,c1,d1,e1,f1,g1,";
/// Played after the win tune when the best score improves.
pub const CHAMPION_TUNE: &str = "C2.C2.C2,D1,E1,D1.D1.D1,";

// ── Notes ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Note {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    HighA,
    HighB,
    HighC,
    HighD,
    HighE,
    HighF,
    HighG,
}

/// Square-wave periods in µs, indexed like [`Note`].
const NOTE_PERIOD_US: [u16; 14] = [
    2272, 2024, 3816, 3401, 3030, 2865, 2551, // A B C D E F G
    1136, 1012, 1912, 1703, 1517, 1432, 1275, // a b c d e f g
];

const NOTES: [Note; 14] = [
    Note::A,
    Note::B,
    Note::C,
    Note::D,
    Note::E,
    Note::F,
    Note::G,
    Note::HighA,
    Note::HighB,
    Note::HighC,
    Note::HighD,
    Note::HighE,
    Note::HighF,
    Note::HighG,
];

impl Note {
    pub fn from_char(ch: u8) -> Option<Self> {
        match ch {
            b'A'..=b'G' => Some(NOTES[(ch - b'A') as usize]),
            b'a'..=b'g' => Some(NOTES[(ch - b'a') as usize + 7]),
            _ => None,
        }
    }

    pub const fn period_us(self) -> u16 {
        NOTE_PERIOD_US[self as usize]
    }

    pub const fn frequency_hz(self) -> u32 {
        1_000_000 / self.period_us() as u32
    }
}

// ── Tones ─────────────────────────────────────────────────────

/// One parsed tone. `note == None` is a rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub note: Option<Note>,
    pub duration_ms: u32,
    pub pause_ms: u32,
}

fn duration_from_char(ch: u8) -> u32 {
    match ch {
        b'0'..=b'9' => u32::from(ch - b'0') * 200,
        _ => 400,
    }
}

fn pause_from_char(ch: u8) -> u32 {
    match ch {
        b'+' => 0,
        b',' => 5,
        b'.' => 20,
        b'_' => 30,
        _ => 5,
    }
}

/// Iterator over the tones of a song.
#[derive(Debug, Clone)]
pub struct Tones<'a> {
    chunks: core::slice::ChunksExact<'a, u8>,
}

impl Iterator for Tones<'_> {
    type Item = Tone;

    fn next(&mut self) -> Option<Tone> {
        let chunk = self.chunks.next()?;
        Some(Tone {
            note: Note::from_char(chunk[0]),
            duration_ms: duration_from_char(chunk[1]),
            pause_ms: pause_from_char(chunk[2]),
        })
    }
}

pub fn parse(song: &str) -> Tones<'_> {
    Tones { chunks: song.as_bytes().chunks_exact(3) }
}

/// Total playing time of a song, pauses included.
pub fn song_length_ms(song: &str) -> u32 {
    parse(song).map(|t| t.duration_ms + t.pause_ms).sum()
}

// ── Player ────────────────────────────────────────────────────

const SONG_QUEUE_LEN: usize = 2;

#[derive(Debug, Clone, Copy)]
struct ActiveTone {
    tone: Tone,
    started: TickSnapshot,
}

/// Step-driven melody player.
///
/// `tick()` is called once per main-loop iteration and returns the note
/// the speaker should be sounding right now (`None` = silent).
#[derive(Debug)]
pub struct MelodyPlayer {
    queue: Deque<&'static str, SONG_QUEUE_LEN>,
    song: Option<Tones<'static>>,
    active: Option<ActiveTone>,
}

impl MelodyPlayer {
    pub const fn new() -> Self {
        Self { queue: Deque::new(), song: None, active: None }
    }

    /// Replace whatever is playing with `song`.
    pub fn play(&mut self, song: &'static str) {
        self.stop();
        self.song = Some(parse(song));
    }

    /// Play `song` after the current one. Returns `false` if the queue is full.
    pub fn enqueue(&mut self, song: &'static str) -> bool {
        if self.song.is_none() && self.active.is_none() {
            self.song = Some(parse(song));
            return true;
        }
        self.queue.push_back(song).is_ok()
    }

    pub fn stop(&mut self) {
        self.queue.clear();
        self.song = None;
        self.active = None;
    }

    pub fn is_busy(&self) -> bool {
        self.active.is_some() || self.song.is_some() || !self.queue.is_empty()
    }

    pub fn tick(&mut self, now_ms: u32) -> Option<Note> {
        loop {
            if let Some(active) = self.active {
                let elapsed = active.started.elapsed(now_ms);
                if elapsed < active.tone.duration_ms {
                    return active.tone.note;
                }
                if elapsed < active.tone.duration_ms + active.tone.pause_ms {
                    return None;
                }
                self.active = None;
            }

            match self.next_tone() {
                Some(tone) => {
                    self.active = Some(ActiveTone { tone, started: TickSnapshot::at(now_ms) });
                }
                None => return None,
            }
        }
    }

    fn next_tone(&mut self) -> Option<Tone> {
        loop {
            if let Some(tone) = self.song.as_mut().and_then(Iterator::next) {
                return Some(tone);
            }
            self.song = None;
            let next = self.queue.pop_front()?;
            self.song = Some(parse(next));
        }
    }
}

impl Default for MelodyPlayer {
    fn default() -> Self {
        Self::new()
    }
}
