//! GPIO output wrapper
//!
//! Adapts embassy-rp outputs to the `picobrot_hal::OutputPin` trait.

use embassy_rp::gpio::{Level, Output, Pin};
use embassy_rp::Peri;

/// Push-pull output driven through the HAL trait
pub struct GpioOutput<'d> {
    pin: Output<'d>,
}

impl<'d> GpioOutput<'d> {
    /// Configure `pin` as an output at `initial` level
    pub fn new(pin: Peri<'d, impl Pin>, initial: Level) -> Self {
        Self {
            pin: Output::new(pin, initial),
        }
    }
}

impl picobrot_hal::OutputPin for GpioOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
