//! Picobrot Hardware Abstraction Layer
//!
//! This crate defines the hardware seams the display protocol is written
//! against. Chip-specific crates implement them; host tests implement them
//! with recording mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  picobrot-display (page transmitter)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  picobrot-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ picobrot-hal- │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output (D/C select, reset)
//! - [`spi::SerialTx`] - Blocking byte transmit with settling delay

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use spi::{SerialTx, SpiConfig};
