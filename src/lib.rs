//! # qrpayload
//!
//! Turn form input into QR codes for websites, contacts, email, SMS, plain
//! text and WiFi networks.
//!
//! `qrpayload` validates each kind of input, builds the standard text encoding
//! for it (vCard 3.0, `mailto:`, `sms:`, `WIFI:`), and renders the result as a
//! PNG image embedded in a data URI.
//!
//! ## Features
//!
//! - Six payload kinds selected by a tag: `url`, `vcard`, `email`, `sms`, `text`, `wifi`.
//! - User-facing validation messages, returned verbatim.
//! - Payload records deserialize from camelCase JSON form data.
//! - Configurable output: width, margin, error correction level, colours.
//! - Pluggable rendering through the [`Rasterizer`] trait.
//!
//! ## Example
//!
//! ```rust
//! use qrpayload::{generate, PayloadBundle, WifiEncryption};
//!
//! let mut bundle = PayloadBundle::default();
//! bundle.wifi.ssid = "Home".into();
//! bundle.wifi.encryption = WifiEncryption::NoPass;
//!
//! let uri = generate("wifi", &bundle).unwrap();
//! assert!(uri.starts_with("data:image/png;base64,"));
//! ```
//!
//! Only the text payload, without rendering:
//!
//! ```rust
//! use qrpayload::{encode_payload, PayloadBundle, QrKind};
//!
//! let mut bundle = PayloadBundle::default();
//! bundle.sms.phone = "555-1234".into();
//!
//! assert_eq!(encode_payload(QrKind::Sms, &bundle).unwrap(), "sms:555-1234");
//! ```
//!
//! ## Modules
//!
//! - [`payload`]: Input records and kind tags.
//! - [`validate`]: Per-kind validation rules.
//! - [`encode`]: Per-kind text builders.
//! - [`helper`]: QR rendering to image buffers, PNG and data URIs.
//! - [`error`]: Error types.

#![forbid(unsafe_code)]

pub mod encode;
pub mod error;
pub mod helper;
pub mod payload;
pub mod validate;

use tracing::{debug, warn};

pub use error::{GenerateError, RenderError, UnknownEncryption, ValidationError};
pub use helper::{ErrorCorrection, PngRasterizer, Rasterizer, RenderOptions};
pub use payload::{
    ContactPayload, EmailPayload, PayloadBundle, QrKind, SmsPayload, TextPayload, UrlPayload,
    WifiEncryption, WifiPayload,
};

/// Validates the slot of `bundle` selected by `kind` and builds its text payload.
///
/// Other slots are ignored.
pub fn encode_payload(kind: QrKind, bundle: &PayloadBundle) -> Result<String, ValidationError> {
    let text = match kind {
        QrKind::Url => validate::validate_url(&bundle.url)?,
        QrKind::Vcard => {
            validate::validate_contact(&bundle.vcard)?;
            encode::encode_vcard(&bundle.vcard)
        }
        QrKind::Email => {
            validate::validate_email(&bundle.email)?;
            encode::encode_email(&bundle.email)
        }
        QrKind::Sms => {
            validate::validate_sms(&bundle.sms)?;
            encode::encode_sms(&bundle.sms)
        }
        QrKind::Text => {
            validate::validate_text(&bundle.text)?;
            encode::encode_text(&bundle.text)
        }
        QrKind::Wifi => {
            validate::validate_wifi(&bundle.wifi)?;
            encode::encode_wifi(&bundle.wifi)
        }
    };
    debug!(%kind, len = text.len(), "encoded payload");
    Ok(text)
}

/// Generates a QR code for the given kind tag as a PNG data URI, using the
/// default 400 px, margin 2, level M rendering.
///
/// # Errors
///
/// The error's `Display` is the message to show the user: the validation
/// message for bad input, "Invalid QR code type" for an unknown tag, and a
/// generic retry prompt when rendering fails.
pub fn generate(kind: &str, bundle: &PayloadBundle) -> Result<String, GenerateError> {
    generate_with(kind, bundle, &PngRasterizer::default())
}

/// Same as [`generate`], rendering through `rasterizer`.
pub fn generate_with<R>(
    kind: &str,
    bundle: &PayloadBundle,
    rasterizer: &R,
) -> Result<String, GenerateError>
where
    R: Rasterizer + ?Sized,
{
    let kind: QrKind = kind.parse()?;
    let text = encode_payload(kind, bundle)?;
    rasterizer.rasterize(&text).map_err(|err| {
        warn!(%kind, error = %err, "QR rendering failed");
        GenerateError::Render(err)
    })
}
