//! PIO-based SPI transmitter configuration
//!
//! Uses RP2040's Programmable I/O to clock bytes out MSB first on a
//! MOSI/SCK pair (SPI mode 0). The display link is write-only, so the
//! state machine needs no input pin.
//!
//! # Timing
//!
//! The program spends 2 instructions per bit, each with one delay cycle:
//!
//! ```text
//!   out pins, 1  side 0 [1]   ; data changes while SCK is low
//!   nop          side 1 [1]   ; receiver samples on the rising edge
//! ```
//!
//! so one bit takes 4 PIO cycles and the bit rate is
//! `SYS_CLK / (divider * 4)`.

use picobrot_hal::spi::{Mode, SpiConfig};

/// System clock frequency (RP2040 default)
pub const SYS_CLK_HZ: u32 = 125_000_000;

/// PIO cycles per transmitted bit
pub const CYCLES_PER_BIT: u32 = 4;

/// Fastest bit rate the program can produce (divider = 1)
pub const MAX_SPI_FREQ_HZ: u32 = SYS_CLK_HZ / CYCLES_PER_BIT;

/// Default settling delay after each byte in microseconds
pub const DEFAULT_SETTLE_US: u32 = 100;

/// Errors when configuring the PIO transmitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PioSpiError {
    /// Only SPI mode 0 is implemented by the PIO program
    UnsupportedMode,
    /// Frequency is zero or above [`MAX_SPI_FREQ_HZ`]
    InvalidFrequency,
    /// Settling delay shorter than one byte on the wire
    SettleTooShort,
}

/// PIO transmitter configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PioSpiConfig {
    /// Bus clock and mode
    pub spi: SpiConfig,
    /// Wait after pushing each byte, in microseconds
    pub settle_us: u32,
}

impl Default for PioSpiConfig {
    fn default() -> Self {
        Self {
            spi: SpiConfig::default(),
            settle_us: DEFAULT_SETTLE_US,
        }
    }
}

impl PioSpiConfig {
    /// Check the configuration against what the PIO program can do
    ///
    /// The settling delay must cover the byte's own shift time, otherwise
    /// a following D/C change could land while bits are still going out.
    pub fn validate(&self) -> Result<(), PioSpiError> {
        if self.spi.mode() != Mode::Mode0 {
            return Err(PioSpiError::UnsupportedMode);
        }
        let freq = self.spi.frequency;
        if freq == 0 || freq > MAX_SPI_FREQ_HZ {
            return Err(PioSpiError::InvalidFrequency);
        }
        if self.settle_us < byte_time_us(freq) {
            return Err(PioSpiError::SettleTooShort);
        }
        Ok(())
    }
}

/// Time to shift out 8 bits at `freq_hz`, rounded up to whole microseconds
pub fn byte_time_us(freq_hz: u32) -> u32 {
    if freq_hz == 0 {
        return u32::MAX;
    }
    8_000_000u32.div_ceil(freq_hz)
}

/// Calculate the clock divider for a target bit rate
///
/// The PIO program runs at SYS_CLK / divider Hz and needs
/// [`CYCLES_PER_BIT`] cycles per bit, so:
/// divider = SYS_CLK / (freq * CYCLES_PER_BIT)
///
/// Returns (integer_part, fractional_part) for the 16.8 fixed-point divider.
pub fn calc_clock_divider(freq_hz: u32) -> (u16, u8) {
    if freq_hz == 0 {
        return (0xFFFF, 0xFF); // Maximum divider = slowest clock
    }

    // To get 8-bit fractional precision, multiply by 256 first
    let divisor = freq_hz as u64 * CYCLES_PER_BIT as u64;
    let divider_x256 = (SYS_CLK_HZ as u64 * 256) / divisor;

    // The hardware divider cannot go below 1.0
    let divider_x256 = divider_x256.clamp(256, 0xFFFF_FF);

    let int_part = (divider_x256 / 256) as u16;
    let frac_part = (divider_x256 % 256) as u8;

    (int_part, frac_part)
}

/// Left-align a byte in the 32-bit OSR word
///
/// The state machine shifts left and autopulls after 8 bits, so only
/// the top byte of each FIFO word is clocked out.
#[inline]
pub const fn byte_to_word(byte: u8) -> u32 {
    (byte as u32) << 24
}

#[cfg(test)]
mod tests {
    use super::*;
    use picobrot_hal::spi::{Phase, Polarity};

    #[test]
    fn test_clock_divider() {
        // 500kHz: 125MHz / (500k * 4) = 62.5
        assert_eq!(calc_clock_divider(500_000), (62, 128));

        // 1MHz: 31.25
        assert_eq!(calc_clock_divider(1_000_000), (31, 64));

        // Fastest rate is divider 1.0
        assert_eq!(calc_clock_divider(MAX_SPI_FREQ_HZ), (1, 0));
        assert_eq!(calc_clock_divider(u32::MAX), (1, 0));

        assert_eq!(calc_clock_divider(0), (0xFFFF, 0xFF));
    }

    #[test]
    fn test_byte_time() {
        assert_eq!(byte_time_us(500_000), 16);
        assert_eq!(byte_time_us(1_000_000), 8);
        assert_eq!(byte_time_us(3_000_000), 3);
    }

    #[test]
    fn test_byte_to_word() {
        assert_eq!(byte_to_word(0xB0), 0xB000_0000);
        assert_eq!(byte_to_word(0x01), 0x0100_0000);
    }

    #[test]
    fn test_validate() {
        assert_eq!(PioSpiConfig::default().validate(), Ok(()));

        let mut config = PioSpiConfig::default();
        config.settle_us = 10;
        assert_eq!(config.validate(), Err(PioSpiError::SettleTooShort));

        let mut config = PioSpiConfig::default();
        config.spi.frequency = 0;
        assert_eq!(config.validate(), Err(PioSpiError::InvalidFrequency));

        let mut config = PioSpiConfig::default();
        config.spi.polarity = Polarity::IdleHigh;
        config.spi.phase = Phase::CaptureOnSecondTransition;
        assert_eq!(config.validate(), Err(PioSpiError::UnsupportedMode));
    }
}
