//! Rendering of encoded payload text into a QR code image.
//!
//! The QR matrix comes from `qrcodegen`; this module only lays the modules
//! out on an `image` buffer, encodes it as PNG and wraps it in a data URI.

use std::io::Cursor;

use base64::prelude::BASE64_STANDARD;
use base64::Engine as _;
use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};
use qrcodegen::{QrCode, QrCodeEcc, QrSegment, Version};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RenderError;

/// Pixels per module when `width` is too small to hold the symbol.
pub const DEFAULT_SCALE: u32 = 4;

/// Largest image side, in pixels, the renderer will allocate.
pub const MAX_IMAGE_SIDE: u32 = 8192;

/// Error correction level of the rendered symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCorrection {
    /// About 7% recovery.
    Low,
    /// About 15% recovery.
    #[default]
    Medium,
    /// About 25% recovery.
    Quartile,
    /// About 30% recovery.
    High,
}

impl From<ErrorCorrection> for QrCodeEcc {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => QrCodeEcc::Low,
            ErrorCorrection::Medium => QrCodeEcc::Medium,
            ErrorCorrection::Quartile => QrCodeEcc::Quartile,
            ErrorCorrection::High => QrCodeEcc::High,
        }
    }
}

/// Output settings for [`PngRasterizer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Side length of the output image in pixels.
    pub width: u32,
    /// Quiet zone around the symbol, in modules.
    pub margin: u32,
    /// Fallback pixels per module, used only when `width` cannot fit the symbol.
    pub scale: u32,
    pub error_correction: ErrorCorrection,
    /// RGB colour of dark modules.
    pub dark: [u8; 3],
    /// RGB colour of light modules and the margin.
    pub light: [u8; 3],
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 400,
            margin: 2,
            scale: DEFAULT_SCALE,
            error_correction: ErrorCorrection::Medium,
            dark: [0, 0, 0],
            light: [255, 255, 255],
        }
    }
}

/// Turns payload text into an embeddable image.
pub trait Rasterizer {
    /// Returns the rendered code as a data URI.
    fn rasterize(&self, text: &str) -> Result<String, RenderError>;
}

/// Renders PNG data URIs with fixed [`RenderOptions`].
#[derive(Debug, Clone, Default)]
pub struct PngRasterizer {
    options: RenderOptions,
}

impl PngRasterizer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

impl Rasterizer for PngRasterizer {
    fn rasterize(&self, text: &str) -> Result<String, RenderError> {
        let img = generate_image_buffer(text, &self.options)?;
        let png = image_to_png(&img)?;
        Ok(png_data_uri(&png))
    }
}

/*---- Utilities ----*/

/// Encodes text into a QR symbol at exactly the given error correction level.
///
/// The smallest version from 1 to 40 that fits is chosen. The level is never
/// boosted, so the output is stable for a given input.
///
/// # Errors
///
/// Returns [`RenderError::DataTooLong`] if the text does not fit in a version
/// 40 symbol at this level.
pub fn encode_qr(text: &str, ecc: ErrorCorrection) -> Result<QrCode, RenderError> {
    let segs = QrSegment::make_segments(text);
    let qr = QrCode::encode_segments_advanced(
        &segs,
        ecc.into(),
        Version::MIN,
        Version::MAX,
        None,
        false,
    )?;
    Ok(qr)
}

/// Lays a QR symbol out on an RGB image buffer.
///
/// # Arguments
///
/// * `qr` - The symbol to draw.
/// * `options` - Image width, margin, fallback scale and colours.
///
/// When `options.width` can hold the symbol plus its margin, the image is
/// exactly `width` pixels square and each module spans `width / (size + 2 *
/// margin)` pixels. Otherwise every module is `options.scale` pixels.
///
/// # Errors
///
/// Returns [`RenderError::ImageTooLarge`] if the resulting side would exceed
/// [`MAX_IMAGE_SIDE`] or overflow.
pub fn qr_to_image_buffer(
    qr: &QrCode,
    options: &RenderOptions,
) -> Result<RgbImage, RenderError> {
    let size = qr.size() as u32;
    let too_large = || RenderError::ImageTooLarge {
        max: MAX_IMAGE_SIDE,
    };
    let span = options
        .margin
        .checked_mul(2)
        .and_then(|m| m.checked_add(size))
        .ok_or_else(too_large)?;
    let (side, scale) = if options.width >= span {
        (options.width, f64::from(options.width) / f64::from(span))
    } else {
        let scale = options.scale.max(1);
        (span.checked_mul(scale).ok_or_else(too_large)?, f64::from(scale))
    };
    if side > MAX_IMAGE_SIDE {
        return Err(too_large());
    }
    let margin = f64::from(options.margin) * scale;
    let inner_end = f64::from(side) - margin;

    let dark = Rgb(options.dark);
    let light = Rgb(options.light);

    Ok(ImageBuffer::from_fn(side, side, |x, y| {
        let (px, py) = (f64::from(x), f64::from(y));
        if px < margin || py < margin || px >= inner_end || py >= inner_end {
            return light;
        }
        let mx = ((px - margin) / scale).floor() as i32;
        let my = ((py - margin) / scale).floor() as i32;
        if qr.get_module(mx, my) {
            dark
        } else {
            light
        }
    }))
}

/// Encodes `content` and renders it into an image buffer.
///
/// # Example
///
/// ```
/// use qrpayload::helper::{generate_image_buffer, RenderOptions};
///
/// let img = generate_image_buffer("Hello, World!", &RenderOptions::default()).unwrap();
/// assert_eq!(img.dimensions(), (400, 400));
/// ```
pub fn generate_image_buffer(
    content: &str,
    options: &RenderOptions,
) -> Result<RgbImage, RenderError> {
    let qr = encode_qr(content, options.error_correction)?;
    let img = qr_to_image_buffer(&qr, options)?;
    debug!(
        version = qr.version().value(),
        modules = qr.size(),
        pixels = img.width(),
        "rendered QR code"
    );
    Ok(img)
}

/// Encodes an image buffer as PNG bytes.
pub fn image_to_png(img: &RgbImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Wraps PNG bytes in a `data:image/png;base64,` URI.
pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64_STANDARD.encode(png))
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;

    fn decode_data_uri(uri: &str) -> image::DynamicImage {
        let b64 = uri
            .strip_prefix("data:image/png;base64,")
            .expect("png data uri prefix");
        let bytes = BASE64_STANDARD.decode(b64).unwrap();
        image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap()
    }

    #[test]
    fn test_encode_qr_keeps_requested_level() {
        let qr = encode_qr("HELLO WORLD", ErrorCorrection::Medium).unwrap();
        assert_eq!(qr.error_correction_level(), QrCodeEcc::Medium);
        assert_eq!(qr.version().value(), 1);
    }

    #[test]
    fn test_encode_qr_rejects_oversized_text() {
        let text = "x".repeat(3000);
        let result = encode_qr(&text, ErrorCorrection::Medium);
        assert!(matches!(result, Err(RenderError::DataTooLong(_))));
    }

    #[test]
    fn test_generate_image_buffer_default_width() {
        let img = generate_image_buffer("Hello, world!", &RenderOptions::default()).unwrap();
        assert_eq!(img.dimensions(), (400, 400));
        // Margin pixels are light.
        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(img.get_pixel(399, 399), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_finder_pattern_lands_after_margin() {
        let qr = encode_qr("A", ErrorCorrection::Medium).unwrap();
        let options = RenderOptions::default();
        // Version 1: 21 modules + 2 * 2 margin = 25, so 16 px per module.
        let img = qr_to_image_buffer(&qr, &options).unwrap();
        assert_eq!(img.get_pixel(31, 31), &Rgb([255, 255, 255]));
        assert_eq!(img.get_pixel(32, 32), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_narrow_width_falls_back_to_scale() {
        let options = RenderOptions {
            width: 10,
            ..RenderOptions::default()
        };
        let img = generate_image_buffer("A", &options).unwrap();
        assert_eq!(img.dimensions(), (25 * DEFAULT_SCALE, 25 * DEFAULT_SCALE));
    }

    #[test]
    fn test_custom_colours() {
        let options = RenderOptions {
            dark: [255, 165, 0],
            light: [0, 0, 64],
            ..RenderOptions::default()
        };
        let img = generate_image_buffer("A", &options).unwrap();
        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 64]));
        assert_eq!(img.get_pixel(32, 32), &Rgb([255, 165, 0]));
    }

    #[test]
    fn test_png_rasterizer_produces_data_uri() {
        let uri = PngRasterizer::default().rasterize("Hello, world!").unwrap();
        assert!(uri.starts_with("data:image/png;base64,iVBORw0KGgo"));
        let img = decode_data_uri(&uri);
        assert_eq!((img.width(), img.height()), (400, 400));
    }

    #[test]
    fn test_render_options_from_partial_json() {
        let options: RenderOptions =
            serde_json::from_str(r#"{ "width": 256, "errorCorrection": "High" }"#).unwrap();
        assert_eq!(options.width, 256);
        assert_eq!(options.margin, 2);
        assert_eq!(options.error_correction, ErrorCorrection::High);

        let rasterizer = PngRasterizer::new(options);
        assert_eq!(rasterizer.options().width, 256);
        let img = decode_data_uri(&rasterizer.rasterize("A").unwrap());
        assert_eq!((img.width(), img.height()), (256, 256));
    }

    #[test]
    fn test_oversized_geometry_is_an_error() {
        let qr = encode_qr("A", ErrorCorrection::Medium).unwrap();
        for options in [
            RenderOptions {
                margin: u32::MAX,
                ..RenderOptions::default()
            },
            RenderOptions {
                width: 0,
                scale: u32::MAX,
                ..RenderOptions::default()
            },
            RenderOptions {
                width: MAX_IMAGE_SIDE + 1,
                ..RenderOptions::default()
            },
        ] {
            let result = qr_to_image_buffer(&qr, &options);
            assert!(
                matches!(result, Err(RenderError::ImageTooLarge { .. })),
                "{options:?}"
            );
        }
    }
}
