//! Logo decoding and centered overlay on top of a binarized QR raster.
//!
//! The logo keeps its original colors; it is drawn after binarization, over
//! an opaque white backing plate that restores scanner contrast around it.

use crate::error::{QrForgeError, QrForgeResult};
use crate::raster::{Raster, over};

/// White plate padding around the logo, in canvas pixels.
pub const PLATE_PADDING: u32 = 4;

/// Decodes a logo blob into an RGBA raster.
pub fn decode_logo(bytes: &[u8]) -> QrForgeResult<Raster> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| QrForgeError::logo_load(format!("logo is not a decodable image: {e}")))?;
    Ok(Raster::from_image(dyn_img.to_rgba8()))
}

/// Centered square covered by a logo occupying `size_percent` of `canvas_width`.
/// Returns `(origin, edge_len)`; the square is fully contained for any
/// percentage below 100.
pub fn logo_geometry(canvas_width: u32, size_percent: u32) -> (u32, u32) {
    let logo_px = canvas_width * size_percent / 100;
    let origin = (canvas_width - logo_px) / 2;
    (origin, logo_px)
}

/// Draws `logo` centered on `canvas`, scaled to `size_percent` of the canvas
/// width, behind a white plate padded by [`PLATE_PADDING`] pixels.
///
/// Must run after binarization; the logo itself is never binarized.
pub fn overlay_logo(canvas: &mut Raster, logo: &Raster, size_percent: u32) -> QrForgeResult<()> {
    canvas.check_geometry()?;
    logo.check_geometry()?;

    let (x, logo_px) = logo_geometry(canvas.width, size_percent);
    if logo_px == 0 || logo_px > canvas.height {
        return Err(QrForgeError::compositing(format!(
            "logo of {logo_px}px cannot fit a {}x{} canvas",
            canvas.width, canvas.height
        )));
    }
    let y = (canvas.height - logo_px) / 2;

    let plate_x = x.saturating_sub(PLATE_PADDING);
    let plate_y = y.saturating_sub(PLATE_PADDING);
    canvas.fill_rect(
        plate_x,
        plate_y,
        logo_px + 2 * PLATE_PADDING,
        logo_px + 2 * PLATE_PADDING,
        [255, 255, 255, 255],
    );

    let img = image::RgbaImage::from_raw(logo.width, logo.height, logo.data.clone())
        .ok_or_else(|| QrForgeError::compositing("logo buffer rejected by image crate"))?;
    let scaled = image::imageops::resize(
        &img,
        logo_px,
        logo_px,
        image::imageops::FilterType::Triangle,
    );

    for (lx, ly, px) in scaled.enumerate_pixels() {
        let dst = canvas.pixel(x + lx, y + ly);
        canvas.put_pixel(x + lx, y + ly, over(dst, px.0));
    }
    Ok(())
}
