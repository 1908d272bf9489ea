// src/core/qr.rs
use crate::core::codec::encode_component;
use crate::error::QrError;
use crate::utils::format_number;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const QR_API: &str = "https://api.qrserver.com/v1/create-qr-code/";
pub const SIZES: [u32; 4] = [128, 256, 512, 1024];
pub const DEFAULT_SIZE: u32 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorLevel {
    /// ~7% recovery
    L,
    /// ~15% recovery
    #[default]
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

impl FromStr for ErrorLevel {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            _ => Err(QrError::InvalidErrorLevel(s.to_owned())),
        }
    }
}

impl fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        };
        f.write_str(level)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WifiSecurity {
    #[default]
    Wpa,
    Wep,
    NoPass,
}

impl WifiSecurity {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Wpa => "WPA",
            Self::Wep => "WEP",
            Self::NoPass => "nopass",
        }
    }
}

impl FromStr for WifiSecurity {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wpa" | "wpa2" => Ok(Self::Wpa),
            "wep" => Ok(Self::Wep),
            "nopass" | "none" | "open" => Ok(Self::NoPass),
            _ => Err(QrError::InvalidSecurity(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VCard {
    pub first_name: String,
    pub last_name: String,
    pub organization: String,
    pub title: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Coordinates { latitude: f64, longitude: f64 },
    Query(String),
}

/// What a QR code should carry. Each variant knows its own URI scheme.
#[derive(Debug, Clone, PartialEq)]
pub enum QrPayload {
    Text(String),
    Url(String),
    Email {
        to: String,
        subject: String,
        body: String,
    },
    Phone(String),
    Sms {
        number: String,
        message: String,
    },
    Wifi {
        ssid: String,
        password: String,
        security: WifiSecurity,
        hidden: bool,
    },
    VCard(VCard),
    Location(Location),
}

impl QrPayload {
    /// The string that gets encoded into the QR image.
    #[must_use]
    pub fn data(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Url(url) if url.trim().is_empty() => String::new(),
            Self::Url(url) if url.starts_with("http") => url.clone(),
            Self::Url(url) => format!("https://{url}"),
            Self::Email { to, subject, body } => format!(
                "mailto:{to}?subject={}&body={}",
                encode_component(subject),
                encode_component(body)
            ),
            Self::Phone(number) => format!("tel:{number}"),
            Self::Sms { number, message } => {
                format!("sms:{number}?body={}", encode_component(message))
            }
            Self::Wifi {
                ssid,
                password,
                security,
                hidden,
            } => format!(
                "WIFI:T:{};S:{ssid};P:{password};H:{hidden};;",
                security.as_str()
            ),
            Self::VCard(card) => [
                String::from("BEGIN:VCARD"),
                String::from("VERSION:3.0"),
                format!("FN:{} {}", card.first_name, card.last_name),
                format!("ORG:{}", card.organization),
                format!("TITLE:{}", card.title),
                format!("TEL:{}", card.phone),
                format!("EMAIL:{}", card.email),
                format!("URL:{}", card.website),
                format!("ADR:;;{};;;;", card.address),
                String::from("END:VCARD"),
            ]
            .join("\n"),
            Self::Location(Location::Coordinates {
                latitude,
                longitude,
            }) => format!(
                "geo:{},{}",
                format_number(*latitude),
                format_number(*longitude)
            ),
            Self::Location(Location::Query(query)) if query.trim().is_empty() => String::new(),
            Self::Location(Location::Query(query)) => {
                format!("geo:0,0?q={}", encode_component(query))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QrRequest {
    pub payload: QrPayload,
    pub size: u32,
    pub error_level: ErrorLevel,
}

impl QrRequest {
    /// # Errors
    ///
    /// [`QrError::InvalidSize`] unless `size` is one of [`SIZES`].
    pub fn new(payload: QrPayload, size: u32, error_level: ErrorLevel) -> Result<Self, QrError> {
        if !SIZES.contains(&size) {
            return Err(QrError::InvalidSize(size));
        }
        Ok(Self {
            payload,
            size,
            error_level,
        })
    }

    /// URL of the rendered image. Nothing is fetched.
    ///
    /// # Errors
    ///
    /// [`QrError::EmptyPayload`] when the payload data is blank.
    pub fn image_url(&self) -> Result<String, QrError> {
        let data = self.payload.data();
        if data.trim().is_empty() {
            return Err(QrError::EmptyPayload);
        }
        debug!(size = self.size, level = %self.error_level, bytes = data.len(), "built QR request");
        Ok(format!(
            "{QR_API}?size={size}x{size}&data={}&ecc={}",
            encode_component(&data),
            self.error_level,
            size = self.size,
        ))
    }
}
