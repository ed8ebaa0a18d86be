//! Piezo speaker: a 50 % duty square wave at the note frequency.

use crate::drivers::hw_init;
use crate::melody::Note;

pub struct Speaker {
    sounding: Option<Note>,
}

impl Speaker {
    pub const fn new() -> Self {
        Self { sounding: None }
    }

    /// Start `note`, or silence on `None`. Only reprograms the PWM when
    /// the note changes.
    pub fn set_tone(&mut self, note: Option<Note>) {
        if note == self.sounding {
            return;
        }
        hw_init::speaker_set(note.map(Note::frequency_hz));
        self.sounding = note;
    }

    #[cfg(test)]
    fn sounding(&self) -> Option<Note> {
        self.sounding
    }
}

impl Default for Speaker {
    fn default() -> Self {
        Self::new()
    }
}
