//! Packed monochrome framebuffer
//!
//! One bit per pixel, organized the way SSD1306-class controllers address
//! their display RAM: 8 pages of 128 column bytes, each byte covering
//! 8 vertically stacked pixels.
//!
//! ```text
//!          col 0   col 1        col 127
//! page 0 │ byte 0│ byte 1│ ... │ byte 127 │
//! page 1 │ 128   │ 129   │ ... │ 255      │
//!   ...
//! page 7 │ 896   │ 897   │ ... │ 1023     │
//! ```
//!
//! Pixel `y` is stored inverted across pages: `y = 0..7` lands in page 7,
//! `y = 56..63` in page 0. Within a byte, `y % 8 = 0` is bit 7.

/// Display width in pixels
pub const WIDTH: usize = 128;

/// Display height in pixels
pub const HEIGHT: usize = 64;

/// Number of 8-row pages
pub const PAGES: usize = HEIGHT / 8;

/// Total backing storage in bytes
pub const BUFFER_SIZE: usize = WIDTH * PAGES;

/// 1-bit framebuffer in page layout
///
/// Zero-initialized (all pixels off). Plotting toggles bits, so plotting
/// the same pixel twice erases it.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pages: [[u8; WIDTH]; PAGES],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &WIDTH)
            .field("height", &HEIGHT)
            .finish_non_exhaustive()
    }
}

impl Framebuffer {
    /// Create an empty framebuffer
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
        }
    }

    /// Page, column and bit mask addressing pixel `(x, y)`
    #[inline]
    fn locate(x: u8, y: u8) -> (usize, usize, u8) {
        debug_assert!((y as usize) < HEIGHT, "pixel row {} out of range", y);

        let mask = 1 << (7 - (y % 8));
        let page = (HEIGHT - 1 - y as usize) / 8;
        let col = x as usize % WIDTH;
        (page, col, mask)
    }

    /// Toggle pixel `(x, y)`
    ///
    /// `x` wraps modulo the width. `y` must be below the height; this is
    /// only checked in debug builds.
    pub fn set_pixel(&mut self, x: u8, y: u8) {
        let (page, col, mask) = Self::locate(x, y);
        self.pages[page][col] ^= mask;
    }

    /// Read back pixel `(x, y)` through the same mapping as [`set_pixel`](Self::set_pixel)
    pub fn pixel(&self, x: u8, y: u8) -> bool {
        let (page, col, mask) = Self::locate(x, y);
        self.pages[page][col] & mask != 0
    }

    /// Column bytes of one page, in transmit order
    ///
    /// Panics if `page >= PAGES`.
    pub fn read_page(&self, page: usize) -> &[u8; WIDTH] {
        &self.pages[page]
    }

    /// All pages, page 0 first
    pub fn pages(&self) -> impl Iterator<Item = &[u8; WIDTH]> + '_ {
        self.pages.iter()
    }

    /// Linear view of the backing storage (`page * WIDTH + col`)
    pub fn as_bytes(&self) -> &[u8] {
        self.pages.as_flattened()
    }

    /// Number of pixels currently on
    pub fn count_lit(&self) -> u32 {
        self.as_bytes().iter().map(|b| b.count_ones()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_blank() {
        let fb = Framebuffer::new();
        assert_eq!(fb.as_bytes().len(), BUFFER_SIZE);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(fb.count_lit(), 0);
    }

    #[test]
    fn test_pixel_layout() {
        let mut fb = Framebuffer::new();

        // y = 0 lands in the last page, top bit
        fb.set_pixel(0, 0);
        assert_eq!(fb.read_page(7)[0], 0x80);

        // y = 63 lands in the first page, bit 0
        fb.set_pixel(5, 63);
        assert_eq!(fb.read_page(0)[5], 0x01);

        // y = 10: page (63 - 10) / 8 = 6, bit 7 - 2 = 5
        fb.set_pixel(127, 10);
        assert_eq!(fb.read_page(6)[127], 0x20);
        assert_eq!(fb.as_bytes()[6 * WIDTH + 127], 0x20);

        assert_eq!(fb.count_lit(), 3);
    }

    #[test]
    fn test_set_pixel_toggles() {
        let mut fb = Framebuffer::new();

        fb.set_pixel(42, 17);
        assert!(fb.pixel(42, 17));

        fb.set_pixel(42, 17);
        assert!(!fb.pixel(42, 17));
        assert_eq!(fb, Framebuffer::new());
    }

    #[test]
    fn test_x_wraps() {
        let mut fb = Framebuffer::new();
        fb.set_pixel(130, 32);
        assert!(fb.pixel(2, 32));
    }

    #[test]
    fn test_neighbours_share_byte() {
        let mut fb = Framebuffer::new();
        for y in 0..8 {
            fb.set_pixel(9, y);
        }
        assert_eq!(fb.read_page(7)[9], 0xFF);
        assert_eq!(fb.pages().filter(|p| p[9] != 0).count(), 1);
    }
}
