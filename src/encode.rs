//! Adapter over the `qrcode` matrix encoder.
//!
//! The module layout itself is delegated to the external crate; this module
//! only marshals parameters (level, margin, size, colors), renders the
//! module grid into the two artifact representations and translates
//! capacity failures into [`QrForgeError::Encoding`].
//!
//! Raster and vector output are derived from the same matrix with the same
//! margin arithmetic, so both representations stay geometrically consistent
//! for identical inputs.

use qrcode::{Color, EcLevel, QrCode};

use crate::error::{QrForgeError, QrForgeResult};
use crate::model::{ErrorCorrection, StyleOptions, format_hex_color};
use crate::raster::Raster;

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::L => EcLevel::L,
            ErrorCorrection::M => EcLevel::M,
            ErrorCorrection::Q => EcLevel::Q,
            ErrorCorrection::H => EcLevel::H,
        }
    }
}

fn encode_matrix(payload: &str, level: ErrorCorrection) -> QrForgeResult<QrCode> {
    QrCode::with_error_correction_level(payload, level.into()).map_err(|e| {
        QrForgeError::encoding(format!(
            "payload of {} bytes not encodable at level {level:?}: {e}",
            payload.len()
        ))
    })
}

/// Encodes `payload` as an RGBA raster of exactly `style.size` square pixels.
///
/// The grid is rendered at one pixel per module (margin included) and then
/// scaled to the requested size. Scaling may anti-alias module edges; the
/// binarization pass downstream restores pure black/white.
pub fn encode_raster(payload: &str, style: &StyleOptions) -> QrForgeResult<Raster> {
    let code = encode_matrix(payload, style.error_correction)?;
    let modules = code.width() as u32;
    let total = modules + 2 * style.margin;
    let colors = code.to_colors();

    let fg = image::Rgba([style.foreground[0], style.foreground[1], style.foreground[2], 255]);
    let bg = image::Rgba([style.background[0], style.background[1], style.background[2], 255]);

    let mut img = image::RgbaImage::from_pixel(total, total, bg);
    for y in 0..modules {
        for x in 0..modules {
            if colors[(y * modules + x) as usize] == Color::Dark {
                img.put_pixel(x + style.margin, y + style.margin, fg);
            }
        }
    }

    let img = if total == style.size {
        img
    } else {
        image::imageops::resize(
            &img,
            style.size,
            style.size,
            image::imageops::FilterType::Triangle,
        )
    };
    Ok(Raster::from_image(img))
}

/// Encodes `payload` as SVG markup with the same module layout, margin and
/// colors as [`encode_raster`]. The vector artifact is final as returned:
/// it never passes through binarization or logo compositing.
pub fn encode_svg(payload: &str, style: &StyleOptions) -> QrForgeResult<String> {
    let code = encode_matrix(payload, style.error_correction)?;
    let modules = code.width() as u32;
    let total = modules + 2 * style.margin;
    let colors = code.to_colors();

    let mut path = String::new();
    for y in 0..modules {
        for x in 0..modules {
            if colors[(y * modules + x) as usize] == Color::Dark {
                if !path.is_empty() {
                    path.push(' ');
                }
                path.push_str(&format!(
                    "M{},{}h1v1h-1z",
                    x + style.margin,
                    y + style.margin
                ));
            }
        }
    }

    let mut svg = String::new();
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {total} {total}\" width=\"{size}\" height=\"{size}\" shape-rendering=\"crispEdges\">\n",
        size = style.size,
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
        format_hex_color(style.background)
    ));
    svg.push_str(&format!(
        "<path d=\"{path}\" fill=\"{}\"/>\n",
        format_hex_color(style.foreground)
    ));
    svg.push_str("</svg>\n");
    Ok(svg)
}
