//! SSD1306 display protocol for Picobrot
//!
//! This crate provides:
//! - The controller command set and the fixed init sequence
//! - `PageTransmitter`, which streams a [`Framebuffer`] page by page
//!
//! # Architecture
//!
//! The controller has one byte stream carrying two logical channels.
//! A side-band D/C line selects how the next bytes are interpreted:
//! low for commands, high for display RAM data. The transmitter is
//! generic over the HAL traits, so the protocol sequencing does not
//! depend on how bytes are physically clocked out.
//!
//! [`Framebuffer`]: picobrot_core::Framebuffer

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod transmitter;

// Re-export key types
pub use transmitter::{Mode, PageTransmitter};
