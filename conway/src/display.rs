// display.rs - Monochrome display contract and an in-memory framebuffer

use std::convert::Infallible;

/// A 1-bit pixel display such as an SSD1306 panel.
///
/// The simulation only ever hands a sink pixel coordinates, never its own
/// cell buffers. Bus failures and the like are the sink's business and come
/// back through its own error type.
pub trait DisplaySink {
    type Error;

    fn clear(&mut self) -> Result<(), Self::Error>;
    fn set_pixel(&mut self, px: usize, py: usize, on: bool) -> Result<(), Self::Error>;
    fn present(&mut self) -> Result<(), Self::Error>;
}

/// Draw one frame: clear, fill a `cell_size` square per alive cell, present.
pub fn render_cells<S: DisplaySink>(
    sink: &mut S,
    cells: impl IntoIterator<Item = (usize, usize)>,
    cell_size: usize,
) -> Result<(), S::Error> {
    sink.clear()?;
    for (x, y) in cells {
        for cy in 0..cell_size {
            for cx in 0..cell_size {
                sink.set_pixel(x * cell_size + cx, y * cell_size + cy, true)?;
            }
        }
    }
    sink.present()
}

/// Packed 1-bit framebuffer, row-major, 8 pixels per byte.
///
/// Writes outside the panel are dropped, the same way a panel driver clips.
/// [`MonoFramebuffer::pixel`] reads back what was drawn, even before it is
/// presented; `frames_presented` counts completed frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoFramebuffer {
    width: usize,
    height: usize,
    stride: usize,
    bits: Vec<u8>,
    frames_presented: u64,
}

impl MonoFramebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let stride = width.div_ceil(8);
        Self {
            width,
            height,
            stride,
            bits: vec![0; stride * height],
            frames_presented: 0,
        }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn frames_presented(&self) -> u64 { self.frames_presented }

    pub fn pixel(&self, px: usize, py: usize) -> bool {
        if px >= self.width || py >= self.height {
            return false;
        }
        self.bits[py * self.stride + px / 8] & (0x80u8 >> (px % 8)) != 0
    }

    pub fn lit_pixels(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Lit pixels in row-major order.
    pub fn iter_lit(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height)
            .flat_map(move |py| (0..self.width).map(move |px| (px, py)))
            .filter(|&(px, py)| self.pixel(px, py))
    }
}

impl DisplaySink for MonoFramebuffer {
    type Error = Infallible;

    fn clear(&mut self) -> Result<(), Infallible> {
        self.bits.fill(0);
        Ok(())
    }

    fn set_pixel(&mut self, px: usize, py: usize, on: bool) -> Result<(), Infallible> {
        if px < self.width && py < self.height {
            let mask = 0x80u8 >> (px % 8);
            let byte = &mut self.bits[py * self.stride + px / 8];
            if on { *byte |= mask } else { *byte &= !mask }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), Infallible> {
        self.frames_presented += 1;
        Ok(())
    }
}
