//! PIO-based SPI transmitter
//!
//! Clocks display bytes out of one PIO state machine and enforces the
//! receiver's settling delay after each byte.

use embassy_rp::pio::{
    Common, Config, Direction as PioDirection, FifoJoin, Instance, PioPin, ShiftConfig,
    ShiftDirection, StateMachine,
};
use embassy_rp::Peri;
use embassy_time::{block_for, Duration};
use fixed::types::U24F8;
use picobrot_hal::SerialTx;

use crate::pio::{byte_to_word, calc_clock_divider, PioSpiConfig, PioSpiError};

/// Write-only SPI master on a PIO state machine
///
/// MOSI is the OUT pin and SCK the side-set pin. Both are driven as
/// outputs; there is no chip select (the display's CS is tied low).
pub struct PioSpiTx<'d, PIO: Instance, const SM: usize> {
    /// PIO state machine running the shift program
    sm: StateMachine<'d, PIO, SM>,
    /// Wait after each byte
    settle: Duration,
    /// Configuration
    config: PioSpiConfig,
}

impl<'d, PIO: Instance, const SM: usize> PioSpiTx<'d, PIO, SM> {
    /// Create and start a PIO SPI transmitter
    ///
    /// # Arguments
    /// * `common` - PIO common resources (for loading program)
    /// * `sm` - State machine to use
    /// * `mosi` - Data output pin
    /// * `clk` - Clock output pin
    /// * `config` - Bus frequency and settling delay
    pub fn new<MOSI: PioPin, CLK: PioPin>(
        common: &mut Common<'d, PIO>,
        mut sm: StateMachine<'d, PIO, SM>,
        mosi: Peri<'d, MOSI>,
        clk: Peri<'d, CLK>,
        config: PioSpiConfig,
    ) -> Result<Self, PioSpiError> {
        config.validate()?;

        // Data changes while SCK is low and is sampled on the rising edge.
        // `out` stalls on an empty OSR, holding SCK low between bytes.
        let prg = pio::pio_asm!(
            ".side_set 1",
            ".wrap_target",
            "out pins, 1 side 0 [1]",
            "nop side 1 [1]",
            ".wrap"
        );

        let installed = common.load_program(&prg.program);

        let mosi_pin = common.make_pio_pin(mosi);
        let clk_pin = common.make_pio_pin(clk);

        let mut cfg = Config::default();
        cfg.use_program(&installed, &[&clk_pin]);
        cfg.set_out_pins(&[&mosi_pin]);

        // MSB first, refill the OSR every 8 bits
        cfg.shift_out = ShiftConfig {
            auto_fill: true,
            threshold: 8,
            direction: ShiftDirection::Left,
        };
        cfg.fifo_join = FifoJoin::TxOnly;

        // Convert to U24F8: integer in upper 24 bits, fractional in lower 8 bits
        let (int_div, frac_div) = calc_clock_divider(config.spi.frequency);
        let divider_bits = ((int_div as u32) << 8) | (frac_div as u32);
        cfg.clock_divider = U24F8::from_bits(divider_bits);

        sm.set_config(&cfg);
        sm.set_pin_dirs(PioDirection::Out, &[&mosi_pin, &clk_pin]);
        sm.set_enable(true);

        Ok(Self {
            sm,
            settle: Duration::from_micros(config.settle_us as u64),
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &PioSpiConfig {
        &self.config
    }
}

impl<PIO: Instance, const SM: usize> SerialTx for PioSpiTx<'_, PIO, SM> {
    fn send_byte(&mut self, byte: u8) {
        let word = byte_to_word(byte);
        while !self.sm.tx().try_push(word) {}
        block_for(self.settle);
    }
}
