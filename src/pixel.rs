use bytemuck::{Pod, Zeroable};

/// A point on the complex plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Complex {
    pub real: f64,
    pub imaginary: f64,
}

/// An RGBA8 pixel, laid out the way the frame texture expects it.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const BLUE: Self = Pixel {
        r: 0x00,
        g: 0x00,
        b: 0xff,
        a: 0xff,
    };

    /// An opaque grey with every channel set to `intensity`.
    pub const fn grey(intensity: u8) -> Self {
        Pixel {
            r: intensity,
            g: intensity,
            b: intensity,
            a: 0xff,
        }
    }
}
