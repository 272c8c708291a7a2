//! Image-buffer abstraction for the raster pipeline.
//!
//! All post-processing (binarization, logo compositing) operates on a plain
//! RGBA8 buffer with row stride `width * 4`, decoupled from any rendering
//! surface so it can be tested without one.

use std::io::Cursor;

use anyhow::Context as _;

use crate::error::{QrForgeError, QrForgeResult};

pub type Rgba8 = [u8; 4];

#[derive(Clone, Debug)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    /// RGBA8, straight alpha, row-major.
    pub data: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32, fill: Rgba8) -> Self {
        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for _ in 0..(width as usize) * (height as usize) {
            data.extend_from_slice(&fill);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn from_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Rejects buffers whose length does not match their dimensions. Every
    /// compositing entry point calls this before touching pixels.
    pub fn check_geometry(&self) -> QrForgeResult<()> {
        let expected = (self.width as usize) * (self.height as usize) * 4;
        if self.width == 0 || self.height == 0 || self.data.len() != expected {
            return Err(QrForgeError::compositing(format!(
                "raster buffer is unusable: {}x{} with {} bytes",
                self.width,
                self.height,
                self.data.len()
            )));
        }
        Ok(())
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, px: Rgba8) {
        let i = ((y * self.width + x) * 4) as usize;
        self.data[i..i + 4].copy_from_slice(&px);
    }

    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, px: Rgba8) {
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);
        for yy in y.min(self.height)..y1 {
            for xx in x.min(self.width)..x1 {
                self.put_pixel(xx, yy, px);
            }
        }
    }

    pub fn binarize(&mut self) {
        binarize_in_place(&mut self.data);
    }

    pub fn to_png(&self) -> QrForgeResult<Vec<u8>> {
        self.check_geometry()?;
        let img = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| QrForgeError::compositing("raster buffer rejected by image crate"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }
}

/// Forces every pixel to pure black or pure white: channel average below 128
/// becomes black, everything else white. Alpha is left unchanged.
///
/// One pass, fixed threshold, no dithering. Idempotent: a second pass over
/// an already binarized buffer is a no-op.
pub fn binarize_in_place(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let sum = u16::from(px[0]) + u16::from(px[1]) + u16::from(px[2]);
        // avg < 128 without the division: sum/3 < 128 iff sum < 384.
        let v = if sum < 384 { 0 } else { 255 };
        px[0] = v;
        px[1] = v;
        px[2] = v;
    }
}

/// Source-over for a straight-alpha `src` on top of `dst`.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    out[3] = (src[3]).saturating_add(mul_div255(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), sa);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binarize_thresholds_at_128_average() {
        // avg 127.67 -> black, avg 128 -> white
        let mut data = vec![127, 128, 128, 255, 128, 128, 128, 255];
        binarize_in_place(&mut data);
        assert_eq!(data, vec![0, 0, 0, 255, 255, 255, 255, 255]);
    }

    #[test]
    fn binarize_preserves_alpha() {
        let mut data = vec![10, 10, 10, 42];
        binarize_in_place(&mut data);
        assert_eq!(data, vec![0, 0, 0, 42]);
    }

    #[test]
    fn binarize_is_idempotent() {
        let mut data: Vec<u8> = (0u16..64)
            .flat_map(|i| [(i * 4) as u8, (i * 3) as u8, (255 - i) as u8, 255])
            .collect();
        binarize_in_place(&mut data);
        let once = data.clone();
        binarize_in_place(&mut data);
        assert_eq!(data, once);
    }

    #[test]
    fn over_transparent_src_is_noop() {
        let dst = [10, 20, 30, 255];
        assert_eq!(over(dst, [200, 200, 200, 0]), dst);
    }

    #[test]
    fn over_opaque_src_replaces_dst() {
        let dst = [0, 0, 0, 255];
        let src = [255, 0, 0, 255];
        assert_eq!(over(dst, src), src);
    }

    #[test]
    fn over_half_alpha_blends_toward_src() {
        let out = over([0, 0, 0, 255], [255, 255, 255, 128]);
        assert!(out[0] > 120 && out[0] < 136);
        assert_eq!(out[3], 255);
    }

    #[test]
    fn fill_rect_clamps_to_bounds() {
        let mut r = Raster::new(4, 4, [0, 0, 0, 255]);
        r.fill_rect(2, 2, 10, 10, [255, 255, 255, 255]);
        assert_eq!(r.pixel(3, 3), [255, 255, 255, 255]);
        assert_eq!(r.pixel(1, 1), [0, 0, 0, 255]);
    }

    #[test]
    fn png_roundtrip_preserves_dimensions() {
        let r = Raster::new(8, 8, [255, 255, 255, 255]);
        let png = r.to_png().unwrap();
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!(img.width(), 8);
        assert_eq!(img.height(), 8);
    }

    #[test]
    fn bad_geometry_is_a_compositing_error() {
        let r = Raster {
            width: 4,
            height: 4,
            data: vec![0u8; 7],
        };
        assert!(matches!(
            r.check_geometry(),
            Err(crate::error::QrForgeError::Compositing(_))
        ));
    }
}
