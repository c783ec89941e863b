//! Board configuration for the Picobrot firmware
//!
//! The firmware build script reads `board.toml` with this crate, rejects
//! wiring the RP2040 cannot provide, and writes the result out as Rust
//! source. Everything here runs on the host.
//!
//! ```toml
//! [pins]
//! reset = 14
//! dc = 15
//! mosi = 3
//! clk = 2
//!
//! [spi]
//! frequency_hz = 500_000
//! settle_us = 100
//! reset_hold_us = 1000
//! ```

/// Number of GPIO pins on the RP2040
pub const GPIO_COUNT: i64 = 30;

/// PIO transmitter limits (125 MHz system clock, 4 cycles per bit)
pub const MIN_FREQUENCY_HZ: i64 = 1_000;
pub const MAX_FREQUENCY_HZ: i64 = 31_250_000;

/// Pin roles in declaration order
const PIN_ROLES: [&str; 4] = ["reset", "dc", "mosi", "clk"];

/// Validated board configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    pub reset: u8,
    pub dc: u8,
    pub mosi: u8,
    pub clk: u8,
    pub frequency_hz: u32,
    pub settle_us: u32,
    pub reset_hold_us: u32,
}

/// Read an integer field, recording an error if it is missing or mistyped
fn integer_field(
    table: &toml::value::Table,
    section: &str,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match table.get(key) {
        Some(toml::Value::Integer(v)) => Some(*v),
        Some(_) => {
            errors.push(format!("[{}] '{}' must be an integer", section, key));
            None
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            None
        }
    }
}

/// Time to shift out one byte at `freq_hz`, rounded up to microseconds
fn byte_time_us(freq_hz: i64) -> i64 {
    (8_000_000 + freq_hz - 1) / freq_hz
}

/// Validate all sections and collect every problem found
pub fn validate_board(config: &toml::Value) -> Result<BoardConfig, Vec<String>> {
    let mut errors = Vec::new();

    let pins = config.get("pins").and_then(|p| p.as_table());
    let spi = config.get("spi").and_then(|s| s.as_table());

    if pins.is_none() {
        errors.push("Missing [pins] section".to_string());
    }
    if spi.is_none() {
        errors.push("Missing [spi] section".to_string());
    }
    let (Some(pins), Some(spi)) = (pins, spi) else {
        return Err(errors);
    };

    // Pins: in range and each used once
    let mut assigned: Vec<(&str, u8)> = Vec::new();
    for role in PIN_ROLES {
        let Some(pin) = integer_field(pins, "pins", role, &mut errors) else {
            continue;
        };
        if !(0..GPIO_COUNT).contains(&pin) {
            errors.push(format!("[pins] {} = {} is not a GPIO (0-29)", role, pin));
            continue;
        }
        let pin = pin as u8;
        if let Some((other, _)) = assigned.iter().find(|(_, p)| *p == pin) {
            errors.push(format!("[pins] {} and {} both use GPIO{}", other, role, pin));
        }
        assigned.push((role, pin));
    }

    let frequency = integer_field(spi, "spi", "frequency_hz", &mut errors);
    let settle = integer_field(spi, "spi", "settle_us", &mut errors);
    let reset_hold = integer_field(spi, "spi", "reset_hold_us", &mut errors);

    let frequency = frequency.filter(|freq| {
        let ok = (MIN_FREQUENCY_HZ..=MAX_FREQUENCY_HZ).contains(freq);
        if !ok {
            errors.push(format!(
                "[spi] frequency_hz must be {}-{}",
                MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ
            ));
        }
        ok
    });

    if let Some(settle) = settle {
        if settle <= 0 || settle > u32::MAX as i64 {
            errors.push("[spi] settle_us must be positive".to_string());
        } else if let Some(freq) = frequency {
            // The wait must outlast the byte itself
            let min = byte_time_us(freq);
            if settle < min {
                errors.push(format!("[spi] settle_us must be >= {} at {} Hz", min, freq));
            }
        }
    }

    if let Some(hold) = reset_hold {
        if hold <= 0 || hold > u32::MAX as i64 {
            errors.push("[spi] reset_hold_us must be positive".to_string());
        }
    }

    // Every field is present and in range once no errors were recorded
    match (
        assigned.as_slice(),
        frequency,
        settle,
        reset_hold,
        errors.is_empty(),
    ) {
        (
            [(_, reset), (_, dc), (_, mosi), (_, clk)],
            Some(frequency),
            Some(settle),
            Some(hold),
            true,
        ) => Ok(BoardConfig {
            reset: *reset,
            dc: *dc,
            mosi: *mosi,
            clk: *clk,
            frequency_hz: frequency as u32,
            settle_us: settle as u32,
            reset_hold_us: hold as u32,
        }),
        _ => Err(errors),
    }
}

/// Rust source for the firmware's `board` module
///
/// Pin numbers become both constants (for logging) and peripheral type
/// names, since embassy-rp pins are distinct types.
pub fn board_module_source(board: &BoardConfig) -> String {
    format!(
        "// Generated by build.rs from board.toml. Do not edit.\n\
        \n\
        /// Reset line GPIO\n\
        pub const RESET_PIN: u8 = {reset};\n\
        /// Data/command select GPIO\n\
        pub const DC_PIN: u8 = {dc};\n\
        /// PIO data output GPIO\n\
        pub const MOSI_PIN: u8 = {mosi};\n\
        /// PIO clock output GPIO\n\
        pub const CLK_PIN: u8 = {clk};\n\
        \n\
        /// PIO transmitter bit rate\n\
        pub const SPI_FREQUENCY_HZ: u32 = {freq};\n\
        /// Wait after each byte\n\
        pub const SETTLE_US: u32 = {settle};\n\
        /// Reset pulse width\n\
        pub const RESET_HOLD_US: u32 = {hold};\n\
        \n\
        pub type ResetPin = embassy_rp::peripherals::PIN_{reset};\n\
        pub type DcPin = embassy_rp::peripherals::PIN_{dc};\n\
        pub type MosiPin = embassy_rp::peripherals::PIN_{mosi};\n\
        pub type ClkPin = embassy_rp::peripherals::PIN_{clk};\n\
        \n\
        /// Move the configured pins out of `Peripherals`\n\
        macro_rules! take_board_pins {{\n\
        \x20   ($p:ident) => {{\n\
        \x20       BoardPins {{\n\
        \x20           reset: $p.PIN_{reset},\n\
        \x20           dc: $p.PIN_{dc},\n\
        \x20           mosi: $p.PIN_{mosi},\n\
        \x20           clk: $p.PIN_{clk},\n\
        \x20       }}\n\
        \x20   }};\n\
        }}\n",
        reset = board.reset,
        dc = board.dc,
        mosi = board.mosi,
        clk = board.clk,
        freq = board.frequency_hz,
        settle = board.settle_us,
        hold = board.reset_hold_us,
    )
}
