//! Escape-time evaluation ([Wikipedia](https://en.wikipedia.org/wiki/Plotting_algorithms_for_the_Mandelbrot_set#Escape_time_algorithm)).

use crate::pixel::Complex;

/// Iteration budget per point.
pub const MAX_ITERATIONS: u32 = 40;

/**
Counts the iterations of `z ← z² + c` a point survives.

This variant seeds `z = c` rather than `z = 0`, so the first textbook step is
skipped. A point counts as escaped once `|re(z) + im(z)| >= 2`. That is
neither the modulus nor `|re(z)| + |im(z)|`, and it shapes the picture, so it
stays as is.

Returns the iteration index at which the point escaped, or
`MAX_ITERATIONS - 1` if it never did.
*/
pub fn escape_count(c: Complex) -> u32 {
    let mut z = c;

    for iteration in 0..MAX_ITERATIONS {
        z = Complex {
            real: z.real * z.real - z.imaginary * z.imaginary + c.real,
            imaginary: 2.0 * z.real * z.imaginary + c.imaginary,
        };
        if (z.real + z.imaginary).abs() >= 2.0 {
            return iteration;
        }
    }

    MAX_ITERATIONS - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(real: f64, imaginary: f64) -> u32 {
        escape_count(Complex { real, imaginary })
    }

    #[test]
    fn far_point_escapes_on_first_step() {
        assert_eq!(count(100.0, 100.0), 0);
    }

    #[test]
    fn origin_never_escapes() {
        assert_eq!(count(0.0, 0.0), MAX_ITERATIONS - 1);
        assert_eq!(count(0.0, 0.0), 39);
    }

    #[test]
    fn period_two_cycle_never_escapes() {
        // -1 -> 0 -> -1 -> ...
        assert_eq!(count(-1.0, 0.0), MAX_ITERATIONS - 1);
    }

    #[test]
    fn escape_is_found_at_the_step_it_happens() {
        // 0.75, 1.0625, 1.6289..., 3.1533...
        assert_eq!(count(0.5, 0.0), 3);
        // Seeded at c, the first step lands on exactly 2.
        assert_eq!(count(1.0, 0.0), 0);
    }

    #[test]
    fn escape_test_uses_the_component_sum() {
        // First step is (-2.25, 1.5): modulus 2.7, but the sum is -0.75.
        assert_eq!(count(0.0, 1.5), 1);
        // (-1, 1) cancels out entirely before (-1, -3) escapes.
        assert_eq!(count(-1.0, -1.0), 1);
    }

    #[test]
    fn counts_stay_within_budget() {
        for x in -20..=20 {
            for y in -20..=20 {
                let result = count(f64::from(x) / 10.0, f64::from(y) / 10.0);
                assert!(result < MAX_ITERATIONS, "{result} for ({x}, {y})");
            }
        }
    }
}
