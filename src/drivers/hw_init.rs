//! One-shot hardware peripheral initialization.
//!
//! Configures the ADC channel, GPIO directions, the LEDC speaker timer,
//! the UART and the GPIO ISR service using raw ESP-IDF sys calls. Called
//! once from `main()` before the event loop starts. The I²C buses are
//! brought up separately through `esp-idf-hal` because their drivers are
//! generic over `embedded_hal::i2c::I2c`.
//!
//! Every accessor has a host twin that is a no-op, so the pure logic
//! above it builds and tests on the host.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
    UartInitFailed(i32),
    IsrInstallFailed(i32),
    TimerFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc) => write!(f, "LEDC timer/channel config failed (rc={})", rc),
            Self::UartInitFailed(rc) => write!(f, "UART driver install failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::TimerFailed(rc) => write!(f, "esp_timer setup failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
fn check(ret: esp_err_t, err: fn(i32) -> HwInitError) -> Result<(), HwInitError> {
    if ret == ESP_OK { Ok(()) } else { Err(err(ret)) }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals(uart_baud: u32) -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before event loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_inputs()?;
        init_gpio_outputs()?;
        init_ledc()?;
        init_uart(uart_baud)?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals(_uart_baud: u32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

/// NTC thermistor divider, GPIO 9 on ESP32-S3.
pub const ADC1_CH_TEMP: u32 = 8;

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path. `init_adc()` completes before the event loop
/// starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    check(unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) }, HwInitError::AdcInitFailed)?;

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    check(
        unsafe { adc_oneshot_config_channel(adc1_handle(), ADC1_CH_TEMP, &chan_cfg) },
        HwInitError::AdcInitFailed,
    )?;

    info!("hw_init: ADC1 configured (CH8=temp)");
    Ok(())
}

/// `None` if the conversion failed.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> Option<u16> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract: single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    (ret == ESP_OK).then(|| raw.max(0) as u16)
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> Option<u16> {
    None
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    let input_pins = [
        (pins::MODE_BUTTON_GPIO, gpio_int_type_t_GPIO_INTR_DISABLE),
        (pins::GUESS_BUTTON_GPIO, gpio_int_type_t_GPIO_INTR_DISABLE),
        (pins::LIGHT_INT_GPIO, gpio_int_type_t_GPIO_INTR_NEGEDGE),
        (pins::ROTARY_A_GPIO, gpio_int_type_t_GPIO_INTR_ANYEDGE),
        (pins::ROTARY_B_GPIO, gpio_int_type_t_GPIO_INTR_ANYEDGE),
    ];

    for &(pin, intr_type) in &input_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type,
        };
        check(unsafe { gpio_config(&cfg) }, HwInitError::GpioConfigFailed)?;
    }

    info!("hw_init: GPIO inputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: read-only register access on an already-configured input pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Host: every pull-up input reads high (buttons released).
#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let output_pins = [
        pins::LED_R_GPIO,
        pins::LED_G_GPIO,
        pins::LED_B_GPIO,
        pins::SEG_DATA_GPIO,
        pins::SEG_CLOCK_GPIO,
        pins::SEG_LATCH_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        check(unsafe { gpio_config(&cfg) }, HwInitError::GpioConfigFailed)?;
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: writes to an output pin configured in init_gpio_outputs().
    // Main-loop only.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── LEDC (speaker) ────────────────────────────────────────────

pub const LEDC_CH_SPEAKER: u32 = 0;
/// 50 % of the 8-bit duty range.
#[cfg(target_os = "espidf")]
const SPEAKER_DUTY_ON: u32 = 128;

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    let timer0 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_8_BIT,
        freq_hz: 1_000,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    check(unsafe { ledc_timer_config(&timer0) }, HwInitError::LedcInitFailed)?;

    check(
        unsafe {
            ledc_channel_config(&ledc_channel_config_t {
                speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
                channel: LEDC_CH_SPEAKER,
                timer_sel: ledc_timer_t_LEDC_TIMER_0,
                gpio_num: pins::SPEAKER_GPIO,
                duty: 0,
                hpoint: 0,
                ..Default::default()
            })
        },
        HwInitError::LedcInitFailed,
    )?;

    info!("hw_init: LEDC configured (speaker=CH0)");
    Ok(())
}

/// Sound a square wave at `freq_hz`, or silence the speaker.
#[cfg(target_os = "espidf")]
pub fn speaker_set(freq_hz: Option<u32>) {
    // SAFETY: LEDC timer/channel configured in init_ledc(); main loop only.
    unsafe {
        let duty = match freq_hz {
            Some(f) => {
                ledc_set_freq(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_timer_t_LEDC_TIMER_0, f);
                SPEAKER_DUTY_ON
            }
            None => 0,
        };
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, LEDC_CH_SPEAKER, duty);
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, LEDC_CH_SPEAKER);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn speaker_set(_freq_hz: Option<u32>) {}

// ── UART ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_uart(baud: u32) -> Result<(), HwInitError> {
    let cfg = uart_config_t {
        baud_rate: baud as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };
    unsafe {
        check(uart_param_config(pins::UART_PORT, &cfg), HwInitError::UartInitFailed)?;
        check(
            uart_set_pin(pins::UART_PORT, pins::UART_TX_GPIO, pins::UART_RX_GPIO, -1, -1),
            HwInitError::UartInitFailed,
        )?;
        check(
            uart_driver_install(pins::UART_PORT, 256, 0, 0, core::ptr::null_mut(), 0),
            HwInitError::UartInitFailed,
        )?;
    }
    info!("hw_init: UART{} @{} baud", pins::UART_PORT, baud);
    Ok(())
}

/// Blocking write. Returns the number of bytes queued, or `None` on error.
#[cfg(target_os = "espidf")]
pub fn uart_write(bytes: &[u8]) -> Option<usize> {
    // SAFETY: driver installed in init_uart(); buffer valid for the call.
    let n = unsafe { uart_write_bytes(pins::UART_PORT, bytes.as_ptr().cast(), bytes.len()) };
    usize::try_from(n).ok()
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_write(bytes: &[u8]) -> Option<usize> {
    Some(bytes.len())
}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn light_gpio_isr(_arg: *mut core::ffi::c_void) {
    crate::events::ISR_EVENTS.push(crate::events::Event::LightLow);
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn rotary_gpio_isr(_arg: *mut core::ffi::c_void) {
    // SAFETY: gpio_get_level is a register read; safe in ISR context.
    let (a, b) = unsafe {
        (gpio_get_level(pins::ROTARY_A_GPIO) != 0, gpio_get_level(pins::ROTARY_B_GPIO) != 0)
    };
    crate::drivers::rotary::rotary_isr_handler(a, b);
}

/// Install per-pin GPIO ISR service and register interrupt handlers.
/// The service clears each pin's pending bit before calling the handler.
/// Call after init_peripherals() and before the event loop.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: ESP_ERR_INVALID_STATE means the service was already
    // installed (acceptable). Handlers below only push to the lock-free
    // event queue.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        // Light sensor: falling edge on the active-low INT line
        check(
            gpio_isr_handler_add(pins::LIGHT_INT_GPIO, Some(light_gpio_isr), core::ptr::null_mut()),
            HwInitError::IsrInstallFailed,
        )?;
        check(gpio_intr_enable(pins::LIGHT_INT_GPIO), HwInitError::IsrInstallFailed)?;

        // Rotary: both channels, any edge
        for pin in [pins::ROTARY_A_GPIO, pins::ROTARY_B_GPIO] {
            check(
                gpio_isr_handler_add(pin, Some(rotary_gpio_isr), core::ptr::null_mut()),
                HwInitError::IsrInstallFailed,
            )?;
            check(gpio_intr_enable(pin), HwInitError::IsrInstallFailed)?;
        }

        info!("hw_init: ISR service installed (light, rotary×2)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
