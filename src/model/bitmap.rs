//! Decoded RGBA thumbnail.

/// A decoded image, RGBA8, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Bitmap {
    /// Build from raw RGBA bytes. Returns `None` if the byte count does
    /// not match the dimensions or either dimension is zero.
    pub fn from_rgba(width: u32, height: u32, raw: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 || raw.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        let pixels = raw
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
            .collect();
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Single-color bitmap.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = (width.max(1) as usize) * (height.max(1) as usize);
        Self {
            width: width.max(1),
            height: height.max(1),
            pixels: vec![rgba; count],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, clamped to the image bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        self.pixels[y * self.width as usize + x]
    }
}
