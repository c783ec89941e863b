//! Board wiring
//!
//! Pin assignments and bus timing come from `board.toml`, validated and
//! turned into constants by the build script.

use embassy_rp::peripherals::PIO0;
use embassy_rp::{Peri, Peripherals};
use picobrot_hal::SpiConfig;
use picobrot_hal_rp2040::PioSpiConfig;

include!(concat!(env!("OUT_DIR"), "/board.rs"));

/// Display pins as configured in `board.toml`
pub struct BoardPins {
    pub reset: Peri<'static, ResetPin>,
    pub dc: Peri<'static, DcPin>,
    pub mosi: Peri<'static, MosiPin>,
    pub clk: Peri<'static, ClkPin>,
}

/// Peripherals the firmware uses
pub struct Board {
    pub pins: BoardPins,
    pub pio: Peri<'static, PIO0>,
}

impl Board {
    /// Take the display pins and the PIO block out of `p`
    pub fn split(p: Peripherals) -> Self {
        Self {
            pins: take_board_pins!(p),
            pio: p.PIO0,
        }
    }
}

/// PIO transmitter settings for this board
pub fn spi_config() -> PioSpiConfig {
    PioSpiConfig {
        spi: SpiConfig {
            frequency: SPI_FREQUENCY_HZ,
            ..SpiConfig::default()
        },
        settle_us: SETTLE_US,
    }
}
