use bytemuck::{Pod, Zeroable};
use winit::dpi::{LogicalSize, PhysicalSize};

/// Window or frame dimensions in pixels, read fresh every frame.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Size { width, height }
    }

    /// A minimised window reports a zero dimension; nothing can be drawn to it.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// `size` in logical pixels, the resolution frames are rendered at.
    pub fn logical(size: PhysicalSize<u32>, scale_factor: f64) -> Self {
        let logical: LogicalSize<u32> = size.to_logical(scale_factor);
        Size::new(logical.width, logical.height)
    }

    pub fn fits_within(&self, max_dimension: u32) -> bool {
        self.width <= max_dimension && self.height <= max_dimension
    }
}

impl From<PhysicalSize<u32>> for Size {
    fn from(size: PhysicalSize<u32>) -> Self {
        Size::new(size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_size_divides_out_the_scale_factor() {
        assert_eq!(
            Size::logical(PhysicalSize::new(640, 480), 2.0),
            Size::new(320, 240)
        );
        assert_eq!(
            Size::logical(PhysicalSize::new(320, 240), 1.0),
            Size::new(320, 240)
        );
    }

    #[test]
    fn empty_sizes() {
        assert!(Size::new(0, 240).is_empty());
        assert!(Size::new(320, 0).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }

    #[test]
    fn fits_within_checks_both_dimensions() {
        assert!(Size::new(8192, 8192).fits_within(8192));
        assert!(!Size::new(8193, 100).fits_within(8192));
        assert!(!Size::new(100, 8193).fits_within(8192));
    }
}
