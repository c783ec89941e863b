//! RP2040-specific HAL for the Picobrot firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `picobrot-hal` traits:
//!
//! - PIO-based write-only SPI transmitter with per-byte settling delay
//! - GPIO output wrapper for the D/C and reset lines
//! - PIO clock divider math

#![no_std]

pub mod gpio;
pub mod pio;
pub mod spi;

pub use gpio::GpioOutput;
pub use pio::{PioSpiConfig, PioSpiError};
pub use spi::PioSpiTx;
