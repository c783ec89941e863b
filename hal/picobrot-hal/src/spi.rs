//! Serial bus abstractions
//!
//! The display link is write-only: there is no MISO line and no
//! acknowledgement channel, so transmission cannot fail at this layer.

/// Blocking, write-only serial transmitter
///
/// One operation: clock out a byte and wait for the receiver's settling
/// time. Implementations must not return from [`SerialTx::send_byte`]
/// before the settling delay has elapsed, so a caller can never issue
/// the next byte early.
pub trait SerialTx {
    /// Send one byte, MSB first, then block for the settling delay
    fn send_byte(&mut self, byte: u8);

    /// Send a sequence of bytes in order
    ///
    /// Each byte gets its own settling delay.
    fn write(&mut self, data: &[u8]) {
        for &byte in data {
            self.send_byte(byte);
        }
    }

    /// Send `count` copies of `byte`
    fn write_repeated(&mut self, byte: u8, count: usize) {
        for _ in 0..count {
            self.send_byte(byte);
        }
    }
}

impl<T: SerialTx + ?Sized> SerialTx for &mut T {
    fn send_byte(&mut self, byte: u8) {
        (**self).send_byte(byte);
    }
}

/// SPI configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity
    pub polarity: Polarity,
    /// Clock phase
    pub phase: Phase,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            frequency: 500_000, // 500 kHz
            polarity: Polarity::IdleLow,
            phase: Phase::CaptureOnFirstTransition,
        }
    }
}

impl SpiConfig {
    /// SPI mode implied by polarity and phase
    pub fn mode(&self) -> Mode {
        match (self.polarity, self.phase) {
            (Polarity::IdleLow, Phase::CaptureOnFirstTransition) => Mode::Mode0,
            (Polarity::IdleLow, Phase::CaptureOnSecondTransition) => Mode::Mode1,
            (Polarity::IdleHigh, Phase::CaptureOnFirstTransition) => Mode::Mode2,
            (Polarity::IdleHigh, Phase::CaptureOnSecondTransition) => Mode::Mode3,
        }
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingTx {
        sent: usize,
        last: u8,
    }

    impl SerialTx for CountingTx {
        fn send_byte(&mut self, byte: u8) {
            self.sent += 1;
            self.last = byte;
        }
    }

    #[test]
    fn test_write_sends_each_byte() {
        let mut tx = CountingTx { sent: 0, last: 0 };
        tx.write(&[0xB0, 0x00, 0x10]);
        assert_eq!(tx.sent, 3);
        assert_eq!(tx.last, 0x10);

        tx.write_repeated(0xAA, 128);
        assert_eq!(tx.sent, 131);
        assert_eq!(tx.last, 0xAA);
    }

    #[test]
    fn test_default_config_is_mode0() {
        let config = SpiConfig::default();
        assert_eq!(config.frequency, 500_000);
        assert_eq!(config.mode(), Mode::Mode0);
    }

    #[test]
    fn test_mode_round_trip() {
        for mode in [Mode::Mode0, Mode::Mode1, Mode::Mode2, Mode::Mode3] {
            let (polarity, phase) = mode.into();
            let config = SpiConfig {
                frequency: 1_000_000,
                polarity,
                phase,
            };
            assert_eq!(config.mode(), mode);
        }
    }
}
