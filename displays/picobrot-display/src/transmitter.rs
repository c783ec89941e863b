//! Page-oriented framebuffer transmitter
//!
//! Drives an SSD1306 over a write-only serial link plus the D/C and
//! reset lines. Every operation runs to completion; the only waits are
//! the reset hold time and the per-byte settling delay inside
//! [`SerialTx::send_byte`].

use embedded_hal::delay::DelayNs;
use picobrot_core::framebuffer::{Framebuffer, PAGES, WIDTH};
use picobrot_hal::{OutputPin, SerialTx};

use crate::command::{page_select, INIT_SEQUENCE, UPDATE_SETUP};

/// Default reset pulse width in microseconds
pub const RESET_HOLD_US: u32 = 1000;

/// How the controller interprets the following bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// D/C low: bytes are commands and command parameters
    Command,
    /// D/C high: bytes are written to display RAM
    Data,
}

/// SSD1306 page transmitter
///
/// - `TX`: byte transmitter with settling delay
/// - `DC`: data/command select line
/// - `RST`: active-low reset line
pub struct PageTransmitter<TX, DC, RST> {
    tx: TX,
    dc: DC,
    rst: RST,
    reset_hold_us: u32,
}

impl<TX, DC, RST> PageTransmitter<TX, DC, RST>
where
    TX: SerialTx,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a transmitter with the default reset pulse width
    pub fn new(tx: TX, dc: DC, rst: RST) -> Self {
        Self {
            tx,
            dc,
            rst,
            reset_hold_us: RESET_HOLD_US,
        }
    }

    /// Override the reset pulse width
    pub fn with_reset_hold(mut self, hold_us: u32) -> Self {
        self.reset_hold_us = hold_us;
        self
    }

    /// Drive the D/C line for the next byte group
    pub fn set_mode(&mut self, mode: Mode) {
        match mode {
            Mode::Command => self.dc.set_low(),
            Mode::Data => self.dc.set_high(),
        }
    }

    /// Pulse the reset line: low, hold, high
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) {
        self.rst.set_low();
        delay.delay_us(self.reset_hold_us);
        self.rst.set_high();
    }

    /// Reset the controller and send the power-up configuration
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) {
        self.reset(delay);
        self.command(&INIT_SEQUENCE);
    }

    /// Send bytes in command mode
    pub fn command(&mut self, bytes: &[u8]) {
        self.set_mode(Mode::Command);
        self.tx.write(bytes);
    }

    /// Point the controller at column 0 of `page`
    fn select_page(&mut self, page: u8) {
        self.command(&page_select(page));
    }

    /// Blank the display RAM
    ///
    /// Streams zeros for every page; the framebuffer is not involved.
    pub fn clear(&mut self) {
        for page in 0..PAGES as u8 {
            self.select_page(page);
            self.set_mode(Mode::Data);
            self.tx.write_repeated(0x00, WIDTH);
        }
    }

    /// Upload the whole framebuffer
    pub fn update(&mut self, fb: &Framebuffer) {
        self.command(&UPDATE_SETUP);

        for (page, bytes) in fb.pages().enumerate() {
            self.select_page(page as u8);
            self.set_mode(Mode::Data);
            self.tx.write(bytes);
        }
    }

    /// Release the underlying peripherals
    pub fn release(self) -> (TX, DC, RST) {
        (self.tx, self.dc, self.rst)
    }
}
