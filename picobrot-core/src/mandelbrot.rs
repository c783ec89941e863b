//! Fixed-point escape-time evaluator
//!
//! Iterates `z ← z² + c` from `z = 0` for every pixel of the framebuffer
//! and plots the points whose orbit stays within radius 2 for (almost)
//! the whole iteration budget. All arithmetic is Q8.24; see [`crate::fixed`].

use crate::fixed::{fixed_div, fixed_mul, int_to_fixed, Fixed824};
use crate::framebuffer::{Framebuffer, HEIGHT, WIDTH};

/// Iteration budget per pixel
pub const MAX_ITER: u32 = 500;

/// Orbits at least this long are plotted
///
/// One below the budget: an orbit that escapes on the very last check is
/// still counted as inside.
pub const INSIDE_THRESHOLD: u32 = MAX_ITER - 1;

/// Left edge of the viewport (-2.0)
pub const XMIN: Fixed824 = Fixed824::from_raw(0xFE00_0000_u32 as i32);
/// Right edge of the viewport (1.0)
pub const XMAX: Fixed824 = Fixed824::from_raw(0x0100_0000);
/// Bottom edge of the viewport (-1.5)
pub const YMIN: Fixed824 = Fixed824::from_raw(0xFE80_0000_u32 as i32);
/// Top edge of the viewport (1.5)
pub const YMAX: Fixed824 = Fixed824::from_raw(0x0180_0000);

/// A point in the complex plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Complex {
    /// Real part
    pub re: Fixed824,
    /// Imaginary part
    pub im: Fixed824,
}

impl Complex {
    /// The origin
    pub const ZERO: Self = Self::new(Fixed824::ZERO, Fixed824::ZERO);

    /// Create from real and imaginary parts
    pub const fn new(re: Fixed824, im: Fixed824) -> Self {
        Self { re, im }
    }
}

/// Summary of one full-frame render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderStats {
    /// Pixels classified inside the set (and plotted)
    pub inside: u32,
    /// Sum of orbit lengths over all pixels
    pub total_iterations: u32,
}

/// Map `origin + span * index / extent` with 64-bit intermediates
///
/// `span * index` reaches 381.0 and `extent` is 128.0, neither of which
/// fit Q8.24, so only the final sum is narrowed.
#[inline]
fn map_axis(origin: Fixed824, span: Fixed824, index: u8, extent: usize) -> Fixed824 {
    let scaled = fixed_mul(span.widen(), int_to_fixed(index as i32));
    let offset = fixed_div(scaled, int_to_fixed(extent as i32));
    Fixed824::from_wide(origin.widen() + offset)
}

/// Complex coordinate sampled by pixel `(px, py)`
///
/// `(0, 0)` maps to `(xmin, ymin)`; the far edges stop one pixel short
/// of `xmax` and `ymax`.
pub fn pixel_to_complex(px: u8, py: u8) -> Complex {
    Complex::new(
        map_axis(XMIN, XMAX - XMIN, px, WIDTH),
        map_axis(YMIN, YMAX - YMIN, py, HEIGHT),
    )
}

/// Number of iterations before the orbit of `c` leaves radius 2
///
/// Returns [`MAX_ITER`] if it never does. The radius test is strict:
/// `|z|² = 4.0` exactly does not escape.
pub fn escape_iterations(c: Complex) -> u32 {
    let four = Fixed824::FOUR.widen();
    let two = Fixed824::TWO.widen();

    let mut x = Fixed824::ZERO;
    let mut y = Fixed824::ZERO;
    let mut iter = 0;

    loop {
        let x2 = fixed_mul(x.widen(), x.widen());
        let y2 = fixed_mul(y.widen(), y.widen());
        if x2 + y2 > four || iter >= MAX_ITER {
            break;
        }

        // Real part must see the old y
        let x_next = x2 - y2 + c.re.widen();
        y = Fixed824::from_wide(fixed_mul(fixed_mul(two, x.widen()), y.widen()) + c.im.widen());
        x = Fixed824::from_wide(x_next);
        iter += 1;
    }

    iter
}

/// Whether an orbit of `iterations` steps counts as inside the set
#[inline]
pub const fn is_inside(iterations: u32) -> bool {
    iterations >= INSIDE_THRESHOLD
}

/// Evaluate every pixel and plot the inside points into `fb`
///
/// Plotting toggles, so `fb` is expected to be blank.
pub fn render(fb: &mut Framebuffer) -> RenderStats {
    let mut stats = RenderStats::default();

    for py in 0..HEIGHT as u8 {
        for px in 0..WIDTH as u8 {
            let iterations = escape_iterations(pixel_to_complex(px, py));
            stats.total_iterations += iterations;

            if is_inside(iterations) {
                fb.set_pixel(px, py);
                stats.inside += 1;
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: i8, im: i8) -> Complex {
        Complex::new(Fixed824::from_int(re), Fixed824::from_int(im))
    }

    #[test]
    fn test_origin_never_escapes() {
        let iterations = escape_iterations(Complex::ZERO);
        assert_eq!(iterations, MAX_ITER);
        assert!(is_inside(iterations));
    }

    #[test]
    fn test_known_escaper() {
        // z1 = 2 (|z|² = 4, not escaped), z2 = 6
        let iterations = escape_iterations(c(2, 0));
        assert_eq!(iterations, 2);
        assert!(!is_inside(iterations));
    }

    #[test]
    fn test_escape_radius_is_strict() {
        // Orbit of -2 settles at z = 2, sitting exactly on the radius
        assert_eq!(escape_iterations(c(-2, 0)), MAX_ITER);
    }

    #[test]
    fn test_periodic_orbit() {
        // c = i cycles through i, -1 + i, -i, -1 + i, ...
        assert_eq!(escape_iterations(c(0, 1)), MAX_ITER);
    }

    #[test]
    fn test_outside_point() {
        // c = -1 + i escapes after a few steps
        let iterations = escape_iterations(c(-1, 1));
        assert!(iterations < 10);
        assert!(!is_inside(iterations));
    }

    #[test]
    fn test_budget_threshold() {
        assert!(!is_inside(0));
        assert!(!is_inside(MAX_ITER - 2));
        assert!(is_inside(MAX_ITER - 1));
        assert!(is_inside(MAX_ITER));
    }

    #[test]
    fn test_pixel_mapping() {
        assert_eq!(pixel_to_complex(0, 0), Complex::new(XMIN, YMIN));

        // Column 85 lands just left of the imaginary axis, row 32 on the real axis
        let centre = pixel_to_complex(85, 32);
        assert_eq!(centre.re, Fixed824::from_raw(-0x0002_0000)); // -1/128
        assert_eq!(centre.im, Fixed824::ZERO);

        let corner = pixel_to_complex(127, 63);
        assert_eq!(corner.re, Fixed824::from_raw(0x00FA_0000)); // 0.9765625
        assert_eq!(corner.im, Fixed824::from_raw(0x0174_0000)); // 1.453125
    }

    #[test]
    fn test_right_edge_escapes_quickly() {
        assert_eq!(escape_iterations(pixel_to_complex(127, 32)), 3);
    }

    #[test]
    fn test_render() {
        let mut fb = Framebuffer::new();
        let stats = render(&mut fb);

        assert!(fb.pixel(85, 32));
        assert!(!fb.pixel(127, 32));
        assert!(!fb.pixel(0, 0));
        assert!(stats.inside > 0);
        assert_eq!(stats.inside, fb.count_lit());
        assert!(stats.total_iterations >= stats.inside * INSIDE_THRESHOLD);
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut first = Framebuffer::new();
        let mut second = Framebuffer::new();

        let a = render(&mut first);
        let b = render(&mut second);

        assert_eq!(a, b);
        assert_eq!(first.as_bytes(), second.as_bytes());
    }
}
