//! Error types for payload validation and QR rendering.
//!
//! Every failure surfaces to the caller as a [`GenerateError`] whose `Display`
//! is the user-facing message. Validation messages are passed through verbatim;
//! render failures collapse to a generic retry prompt while keeping the cause
//! reachable through [`std::error::Error::source`].

use thiserror::Error;

/// Message shown for any failure that is not the user's fault.
pub const GENERIC_FAILURE: &str = "Failed to generate QR code. Please try again.";

/// Message shown for an unrecognized kind tag.
pub const INVALID_KIND: &str = "Invalid QR code type";

/// A payload field was missing or malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty after trimming.
    #[error("{message}")]
    MissingField {
        field: &'static str,
        message: &'static str,
    },

    /// A field was present but did not have the expected shape.
    #[error("{message}")]
    InvalidField { field: &'static str, message: String },
}

impl ValidationError {
    pub(crate) fn missing(field: &'static str, message: &'static str) -> Self {
        Self::MissingField { field, message }
    }

    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Name of the offending field, as it appears in the input form.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field, .. } | Self::InvalidField { field, .. } => field,
        }
    }
}

/// A WiFi encryption token other than `WPA`, `WEP` or `nopass`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown WiFi encryption '{0}'")]
pub struct UnknownEncryption(pub String);

/// The rasterizer could not turn the text into an image.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The text does not fit in a version 40 symbol at the requested level.
    #[error("QR code data too long: {0}")]
    DataTooLong(#[from] qrcodegen::DataTooLong),

    /// The requested width, margin or scale gives an image side beyond the limit.
    #[error("QR code image would exceed {max} pixels per side")]
    ImageTooLarge { max: u32 },

    #[error("Failed to encode PNG: {0}")]
    Image(#[from] image::ImageError),
}

/// Top-level error returned by [`crate::generate`].
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{}", INVALID_KIND)]
    UnknownKind { kind: String },

    #[error("{}", GENERIC_FAILURE)]
    Render(#[source] RenderError),
}

impl GenerateError {
    /// The message to show the end user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
