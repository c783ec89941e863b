//! Board-agnostic core logic for the Mandelbrot firmware
//!
//! This crate contains everything that does not depend on the display
//! controller or the chip:
//!
//! - 8.24 fixed-point arithmetic
//! - Packed 1-bit framebuffer in SSD1306 page layout
//! - Fixed-point escape-time evaluator and viewport mapping

#![no_std]
#![deny(unsafe_code)]

pub mod fixed;
pub mod framebuffer;
pub mod mandelbrot;

pub use fixed::Fixed824;
pub use framebuffer::{Framebuffer, HEIGHT, PAGES, WIDTH};
pub use mandelbrot::{render, RenderStats, MAX_ITER};
