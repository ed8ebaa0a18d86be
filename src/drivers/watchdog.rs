//! Main-loop watchdog.
//!
//! Subscribes the main task to the ESP-IDF task watchdog (TWDT). If
//! `AppService::step` stops coming back for `watchdog_timeout_secs`, the
//! TWDT panics and the board reboots into STABLE.

use log::{info, warn};

pub struct Watchdog {
    timeout_secs: u32,
    armed: bool,
    feeds: u64,
}

impl Watchdog {
    /// Subscribe the calling task. A failed subscription is logged and the
    /// loop runs unguarded.
    pub fn arm(timeout_secs: u32) -> Self {
        let armed = subscribe(timeout_secs);
        if armed {
            info!("watchdog armed, {}s timeout", timeout_secs);
        } else {
            warn!("watchdog not armed, main loop is unguarded");
        }
        Self { timeout_secs, armed, feeds: 0 }
    }

    /// Call once per main-loop iteration.
    pub fn feed(&mut self) {
        if self.armed {
            reset();
        }
        self.feeds = self.feeds.wrapping_add(1);
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn feeds(&self) -> u64 {
        self.feeds
    }

    pub fn timeout_secs(&self) -> u32 {
        self.timeout_secs
    }
}

#[cfg(target_os = "espidf")]
fn subscribe(timeout_secs: u32) -> bool {
    use esp_idf_svc::sys::{
        ESP_OK, esp_task_wdt_add, esp_task_wdt_config_t, esp_task_wdt_reconfigure,
    };

    let cfg = esp_task_wdt_config_t {
        timeout_ms: timeout_secs * 1000,
        idle_core_mask: 0,
        trigger_panic: true,
    };
    // SAFETY: plain IDF calls on the current task; cfg outlives the call.
    unsafe {
        let ret = esp_task_wdt_reconfigure(&cfg);
        if ret != ESP_OK {
            warn!("TWDT reconfigure returned {}", ret);
        }
        esp_task_wdt_add(core::ptr::null_mut()) == ESP_OK
    }
}

#[cfg(not(target_os = "espidf"))]
fn subscribe(_timeout_secs: u32) -> bool {
    false
}

#[cfg(target_os = "espidf")]
fn reset() {
    // SAFETY: only reached after the current task subscribed.
    unsafe {
        esp_idf_svc::sys::esp_task_wdt_reset();
    }
}

#[cfg(not(target_os = "espidf"))]
fn reset() {}
