//! One-shot artifact generation.
//!
//! Pipeline: payload formatting -> matrix encoding -> (raster only)
//! binarization and logo compositing. Scratch buffers are allocated fresh
//! per call and dropped with it; nothing is cached between records.

use crate::encode::{encode_raster, encode_svg};
use crate::error::QrForgeResult;
use crate::logo::{decode_logo, overlay_logo};
use crate::model::{ContentRecord, OutputFormat, QrArtifact, StyleOptions};
use crate::payload;

/// Produces the artifact for one (record, style) pair.
///
/// Returns `Ok(None)` when the record formats to an empty payload: the
/// encoder is never invoked for nothing-to-encode, rather than encoding an
/// empty string.
///
/// Raster output is always binarized before the optional logo overlay; the
/// SVG output is taken straight from the encoder and never composited. A
/// logo that fails to decode downgrades to the logo-less raster with a
/// warning instead of failing the artifact.
pub fn generate(
    record: &ContentRecord,
    style: &StyleOptions,
    format: OutputFormat,
) -> QrForgeResult<Option<QrArtifact>> {
    style.validate()?;

    let payload = payload::format(record);
    if payload.is_empty() {
        return Ok(None);
    }

    let mut artifact = QrArtifact::default();

    if format.wants_png() {
        let mut raster = encode_raster(&payload, style)?;
        raster.binarize();
        if let Some(logo) = &style.logo {
            match decode_logo(&logo.bytes) {
                Ok(decoded) => overlay_logo(&mut raster, &decoded, logo.size_percent)?,
                Err(err) => {
                    tracing::warn!(%err, "logo unusable, emitting artifact without it");
                }
            }
        }
        artifact.png = Some(raster.to_png()?);
    }

    if format.wants_svg() {
        artifact.svg = Some(encode_svg(&payload, style)?);
    }

    Ok(Some(artifact))
}
