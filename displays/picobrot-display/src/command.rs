//! SSD1306 command bytes
//!
//! Single-byte commands and the parameter bytes the firmware sends with
//! them. Several commands carry their argument in the low bits of the
//! opcode (`SET_PAGE_ADDR | page`, `SET_START_LINE | line`).

/// SSD1306 commands
pub mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const ENTIRE_DISPLAY_RESUME: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Parameter for [`cmd::SET_MEMORY_MODE`]: horizontal addressing
pub const MEMORY_MODE_HORIZONTAL: u8 = 0x02;

/// Controller power-up configuration
///
/// Sent once, in command mode, right after the reset pulse. Order matters:
/// the charge pump must be enabled before the panel is switched on.
#[rustfmt::skip]
pub const INIT_SEQUENCE: [u8; 25] = [
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV, 0x80,           // Default oscillator, divide ratio 1
    cmd::SET_MUX_RATIO, 0x3F,           // 64 lines
    cmd::SET_DISPLAY_OFFSET, 0x00,
    cmd::SET_START_LINE | 0x00,
    cmd::SET_CHARGE_PUMP, 0x14,         // Internal DC/DC
    cmd::SET_MEMORY_MODE, MEMORY_MODE_HORIZONTAL,
    cmd::SET_SEG_REMAP,                 // Column 127 mapped to SEG0
    cmd::SET_COM_SCAN_DEC,
    cmd::SET_COM_PINS, 0x12,            // Alternative COM config
    cmd::SET_CONTRAST, 0xCF,
    cmd::SET_PRECHARGE, 0xF1,           // Internal supply
    cmd::SET_VCOM_DETECT, 0x40,
    cmd::ENTIRE_DISPLAY_RESUME,         // Show RAM contents, not all-on
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// Addressing setup sent before every framebuffer upload
#[rustfmt::skip]
pub const UPDATE_SETUP: [u8; 5] = [
    cmd::SET_MEMORY_MODE, MEMORY_MODE_HORIZONTAL,
    cmd::SET_START_LINE | 0x00,
    cmd::SET_DISPLAY_OFFSET, 0x00,
];

/// Page select followed by column address 0 (low and high nibble)
pub const fn page_select(page: u8) -> [u8; 3] {
    [
        cmd::SET_PAGE_ADDR | page,
        cmd::SET_LOW_COLUMN,
        cmd::SET_HIGH_COLUMN,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_sequence_bytes() {
        assert_eq!(
            INIT_SEQUENCE,
            [
                0xAE, 0xD5, 0x80, 0xA8, 0x3F, 0xD3, 0x00, 0x40, 0x8D, 0x14, 0x20, 0x02, 0xA1,
                0xC8, 0xDA, 0x12, 0x81, 0xCF, 0xD9, 0xF1, 0xDB, 0x40, 0xA4, 0xA6, 0xAF,
            ]
        );
    }

    #[test]
    fn test_charge_pump_before_display_on() {
        let pump = INIT_SEQUENCE
            .iter()
            .position(|&b| b == cmd::SET_CHARGE_PUMP)
            .unwrap();
        let on = INIT_SEQUENCE
            .iter()
            .position(|&b| b == cmd::DISPLAY_ON)
            .unwrap();
        assert!(pump < on);
        assert_eq!(INIT_SEQUENCE[0], cmd::DISPLAY_OFF);
    }

    #[test]
    fn test_update_setup_bytes() {
        assert_eq!(UPDATE_SETUP, [0x20, 0x02, 0x40, 0xD3, 0x00]);
    }

    #[test]
    fn test_page_select() {
        assert_eq!(page_select(0), [0xB0, 0x00, 0x10]);
        assert_eq!(page_select(7), [0xB7, 0x00, 0x10]);
    }
}
