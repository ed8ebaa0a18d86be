//! 1 kHz tick timer using ESP-IDF's esp_timer API.
//!
//! The periodic callback advances the millisecond counter in
//! [`crate::tick`]. Callbacks execute in the ESP timer task context (not
//! ISR) and only touch an `AtomicU32`.
//!
//! On host builds the timer is never started; tests drive `now_ms`
//! directly.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::drivers::hw_init::HwInitError;

/// Tick period in microseconds.
pub const TICK_PERIOD_US: u64 = 1_000;

#[cfg(target_os = "espidf")]
unsafe extern "C" fn systick_cb(_arg: *mut core::ffi::c_void) {
    crate::tick::on_systick();
}

/// Owns the periodic timer. Dropping it stops the tick.
pub struct TickTimer {
    #[cfg(target_os = "espidf")]
    handle: esp_timer_handle_t,
}

impl TickTimer {
    #[cfg(target_os = "espidf")]
    pub fn start() -> Result<Self, HwInitError> {
        let args = esp_timer_create_args_t {
            callback: Some(systick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"systick".as_ptr(),
            skip_unhandled_events: false,
        };
        let mut handle: esp_timer_handle_t = core::ptr::null_mut();
        // SAFETY: `args` outlives the call; the callback only touches an atomic.
        let ret = unsafe { esp_timer_create(&args, &mut handle) };
        if ret != ESP_OK {
            return Err(HwInitError::TimerFailed(ret));
        }
        // SAFETY: `handle` was just created successfully.
        let ret = unsafe { esp_timer_start_periodic(handle, TICK_PERIOD_US) };
        if ret != ESP_OK {
            // SAFETY: stopped timer, valid handle.
            unsafe { esp_timer_delete(handle) };
            return Err(HwInitError::TimerFailed(ret));
        }
        info!("hw_timer: systick @1kHz started");
        Ok(Self { handle })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn start() -> Result<Self, HwInitError> {
        log::info!("hw_timer(sim): systick not started (tests drive time)");
        Ok(Self {})
    }
}

#[cfg(target_os = "espidf")]
impl Drop for TickTimer {
    fn drop(&mut self) {
        // SAFETY: handle is valid for the lifetime of `self`.
        unsafe {
            esp_timer_stop(self.handle);
            esp_timer_delete(self.handle);
        }
    }
}
