//! Colouring: escape counts become grey levels, black for points that leave
//! immediately up to white for points that exhaust the budget.

use crate::{escape::MAX_ITERATIONS, pixel::Pixel, scale::scale};

pub fn grey_level(count: u32) -> u8 {
    // `count` is at most `MAX_ITERATIONS - 1`, so the cast never saturates.
    scale(
        f64::from(count),
        0.0,
        f64::from(MAX_ITERATIONS - 1),
        0.0,
        255.0,
    ) as u8
}

pub fn colour(count: u32) -> Pixel {
    Pixel::grey(grey_level(count))
}
