//! Input records for each kind of QR code.
//!
//! Every record is a flat set of strings where an empty string means "not
//! provided". Field names deserialize in camelCase so a form submitted as JSON
//! (`firstName`, `workPhone`, ...) binds directly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, UnknownEncryption};

/// The kind of content a QR code carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrKind {
    Url,
    Vcard,
    Email,
    Sms,
    Text,
    Wifi,
}

impl QrKind {
    pub const ALL: [QrKind; 6] = [
        QrKind::Url,
        QrKind::Vcard,
        QrKind::Email,
        QrKind::Sms,
        QrKind::Text,
        QrKind::Wifi,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QrKind::Url => "url",
            QrKind::Vcard => "vcard",
            QrKind::Email => "email",
            QrKind::Sms => "sms",
            QrKind::Text => "text",
            QrKind::Wifi => "wifi",
        }
    }
}

impl fmt::Display for QrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QrKind {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QrKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| GenerateError::UnknownKind { kind: s.to_string() })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UrlPayload {
    pub url: String,
}

/// Contact details rendered as a vCard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactPayload {
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub phone: String,
    pub work_phone: String,
    pub fax: String,
    pub email: String,
    pub company: String,
    pub job_title: String,
    pub street: String,
    pub city: String,
    pub zip: String,
    pub state: String,
    pub country: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailPayload {
    pub email: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmsPayload {
    pub phone: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextPayload {
    pub text: String,
}

/// Authentication scheme advertised in a `WIFI:` payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WifiEncryption {
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WEP")]
    Wep,
    #[serde(rename = "nopass")]
    NoPass,
}

impl WifiEncryption {
    pub fn as_str(self) -> &'static str {
        match self {
            WifiEncryption::Wpa => "WPA",
            WifiEncryption::Wep => "WEP",
            WifiEncryption::NoPass => "nopass",
        }
    }

    pub fn requires_password(self) -> bool {
        self != WifiEncryption::NoPass
    }
}

impl fmt::Display for WifiEncryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WifiEncryption {
    type Err = UnknownEncryption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WPA" => Ok(WifiEncryption::Wpa),
            "WEP" => Ok(WifiEncryption::Wep),
            "nopass" => Ok(WifiEncryption::NoPass),
            other => Err(UnknownEncryption(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WifiPayload {
    pub ssid: String,
    pub password: String,
    pub encryption: WifiEncryption,
    pub hidden: bool,
}

/// One record per kind. Only the slot selected by the kind tag is read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadBundle {
    pub url: UrlPayload,
    pub vcard: ContactPayload,
    pub email: EmailPayload,
    pub sms: SmsPayload,
    pub text: TextPayload,
    pub wifi: WifiPayload,
}
