use crate::{pixel::Pixel, screen};

/// Something the frame renderer can plot points onto.
pub trait Canvas {
    fn draw_point(&mut self, x: u32, y: u32, pixel: Pixel);
}

/// CPU-side frame, row-major, uploaded to the frame texture once per tick.
pub struct Framebuffer {
    size: screen::Size,
    pixels: Vec<Pixel>,
}

impl Framebuffer {
    pub fn new(size: screen::Size) -> Self {
        Self {
            size,
            pixels: vec![Pixel::BLUE; size.area()],
        }
    }

    pub fn size(&self) -> screen::Size {
        self.size
    }

    /// Reallocates for a new window size. Contents are unspecified afterwards.
    pub fn resize(&mut self, size: screen::Size) {
        if size != self.size {
            self.size = size;
            self.pixels.resize(size.area(), Pixel::BLUE);
        }
    }

    pub fn clear(&mut self, pixel: Pixel) {
        self.pixels.fill(pixel);
    }

    #[cfg(test)]
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        self.index(x, y).map(|index| self.pixels[index])
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.size.width && y < self.size.height {
            Some(y as usize * self.size.width as usize + x as usize)
        } else {
            None
        }
    }
}

impl Canvas for Framebuffer {
    /// Points outside the frame are dropped.
    fn draw_point(&mut self, x: u32, y: u32, pixel: Pixel) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = pixel;
        }
    }
}
