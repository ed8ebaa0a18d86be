//! Alert evaluation for MONITOR mode.
//!
//! Three latched flags and the priority table that folds them into one
//! indicator signal:
//!
//! | fire | walking in dark | signal            | colour |
//! |------|-----------------|-------------------|--------|
//! | yes  | yes             | `FireAndDarkness` | purple |
//! | yes  | no              | `Fire`            | red    |
//! | no   | yes             | `Darkness`        | blue   |
//! | no   | no              | `None`            | off    |
//!
//! `is_dark` is set only by the light-low interrupt and gates the
//! walking-in-dark check; it does not drive the indicator on its own.

/// Latched alert state. Owned by the FSM context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertFlags {
    pub is_dark: bool,
    pub is_fire: bool,
    pub is_walking_dark: bool,
}

impl AlertFlags {
    /// Clear everything, including darkness. Used on entering STABLE.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Clear the two MONITOR-derived flags. `is_dark` stays latched until
    /// the light alarm is re-armed.
    pub fn clear_detections(&mut self) {
        self.is_fire = false;
        self.is_walking_dark = false;
    }

    /// Latch `is_fire` if `temperature_tenths` is strictly above the alarm.
    /// Returns `true` when the flag was newly set.
    pub fn observe_temperature(&mut self, temperature_tenths: i32, alarm_tenths: i32) -> bool {
        if temperature_tenths > alarm_tenths && !self.is_fire {
            self.is_fire = true;
            return true;
        }
        false
    }

    /// Latch `is_walking_dark` if the magnitude dropped by more than
    /// `threshold` since the previous reading while it is dark.
    /// Returns `true` when the flag was newly set.
    pub fn observe_motion(&mut self, previous: Option<u32>, current: u32, threshold: u32) -> bool {
        if !self.is_dark || self.is_walking_dark {
            return false;
        }
        match previous {
            Some(prev) if prev.saturating_sub(current) > threshold => {
                self.is_walking_dark = true;
                true
            }
            _ => false,
        }
    }

    pub fn signal(&self) -> AlertSignal {
        AlertSignal::combine(self.is_fire, self.is_walking_dark)
    }
}

/// Combined indicator signal, ordered by priority (highest last).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertSignal {
    None,
    Darkness,
    Fire,
    FireAndDarkness,
}

impl AlertSignal {
    pub const fn combine(fire: bool, walking_dark: bool) -> Self {
        match (fire, walking_dark) {
            (true, true) => Self::FireAndDarkness,
            (true, false) => Self::Fire,
            (false, true) => Self::Darkness,
            (false, false) => Self::None,
        }
    }

    pub const fn is_active(self) -> bool {
        !matches!(self, Self::None)
    }
}
