//! Picobrot - Fixed-Point Mandelbrot Firmware
//!
//! Renders one Mandelbrot frame with 8.24 integer arithmetic and uploads
//! it to a 128x64 SSD1306 OLED driven by a PIO transmitter.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::Level;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::Pio;
use embassy_time::{Delay, Duration, Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

use picobrot_core::{render, Framebuffer, MAX_ITER};
use picobrot_display::PageTransmitter;
use picobrot_hal_rp2040::{GpioOutput, PioSpiTx};

mod board;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Picobrot firmware starting...");

    let p = embassy_rp::init(Default::default());
    let board::Board { pins, pio } = board::Board::split(p);
    info!(
        "Board: RST=GPIO{} DC=GPIO{} MOSI=GPIO{} CLK=GPIO{}",
        board::RESET_PIN,
        board::DC_PIN,
        board::MOSI_PIN,
        board::CLK_PIN
    );

    // PIO transmitter for MOSI/CLK
    let spi_config = board::spi_config();
    let Pio {
        mut common, sm0, ..
    } = Pio::new(pio, Irqs);
    let spi = unwrap!(PioSpiTx::new(
        &mut common,
        sm0,
        pins.mosi,
        pins.clk,
        spi_config
    ));
    info!(
        "PIO SPI: {} Hz, settle {} us",
        spi_config.spi.frequency, spi_config.settle_us
    );

    // Reset idles high, D/C starts in command mode
    let dc = GpioOutput::new(pins.dc, Level::Low);
    let rst = GpioOutput::new(pins.reset, Level::High);

    let mut display = PageTransmitter::new(spi, dc, rst).with_reset_hold(board::RESET_HOLD_US);
    display.init(&mut Delay);
    info!("Display initialized");
    display.clear();
    debug!("Display RAM cleared");

    let mut fb = Framebuffer::new();
    let start = Instant::now();
    let stats = render(&mut fb);
    info!(
        "Rendered in {} ms: {} pixels inside, {} iterations (max {})",
        start.elapsed().as_millis(),
        stats.inside,
        stats.total_iterations,
        MAX_ITER
    );

    let start = Instant::now();
    display.update(&fb);
    info!("Frame uploaded in {} ms", start.elapsed().as_millis());

    // Single static frame; nothing left to do
    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}
