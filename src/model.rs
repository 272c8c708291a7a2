use crate::error::{QrForgeError, QrForgeResult};

/// One contact row, either typed into the vCard form or parsed from a CSV
/// line. Field names follow the CSV header of the lanyard template.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub address: String,
}

/// The content to encode, tagged by kind. The active variant decides which
/// fields the payload formatter reads; absent fields are empty strings,
/// never placeholders.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ContentRecord {
    Url {
        #[serde(default)]
        url: String,
    },
    Text {
        #[serde(default)]
        text: String,
    },
    #[serde(rename = "vcard")]
    VCard(Contact),
    LanyardContact(Contact),
    Email {
        #[serde(default)]
        address: String,
        #[serde(default)]
        subject: String,
        #[serde(default)]
        body: String,
    },
    Phone {
        #[serde(default)]
        phone: String,
    },
    Wifi {
        #[serde(default)]
        ssid: String,
        #[serde(default)]
        password: String,
        #[serde(default)]
        encryption: WifiEncryption,
        #[serde(default)]
        hidden: bool,
    },
    Geo {
        #[serde(default)]
        latitude: String,
        #[serde(default)]
        longitude: String,
    },
    Calendar {
        #[serde(default)]
        title: String,
        #[serde(default)]
        location: String,
        #[serde(default)]
        description: String,
        #[serde(default)]
        start_date: String,
        #[serde(default)]
        end_date: String,
    },
    Sms {
        #[serde(default)]
        phone: String,
        #[serde(default)]
        message: String,
    },
    Social {
        platform: SocialPlatform,
        #[serde(default)]
        username: String,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WifiEncryption {
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WEP")]
    Wep,
    #[serde(rename = "nopass")]
    Nopass,
}

impl WifiEncryption {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wpa => "WPA",
            Self::Wep => "WEP",
            Self::Nopass => "nopass",
        }
    }
}

/// Closed set of supported platforms. An unknown platform is rejected when
/// the record is parsed instead of silently encoding an empty URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Twitter,
    Linkedin,
    Facebook,
    Instagram,
}

/// QR error correction level, ordered by increasing redundancy
/// (L ~7%, M ~15%, Q ~25%, H ~30%).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorCorrection {
    L,
    #[default]
    M,
    Q,
    H,
}

/// Which artifact representations to produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Both,
}

impl OutputFormat {
    pub fn wants_png(self) -> bool {
        matches!(self, Self::Png | Self::Both)
    }

    pub fn wants_svg(self) -> bool {
        matches!(self, Self::Svg | Self::Both)
    }
}

/// Logo blob and its relative size travel together; one without the other
/// is unrepresentable.
#[derive(Clone, Debug)]
pub struct LogoOptions {
    pub bytes: Vec<u8>,
    /// Percentage of the QR pixel width, 10..=30.
    pub size_percent: u32,
}

pub const MAX_LOGO_BYTES: usize = 500 * 1024;

pub const MIN_SIZE_PX: u32 = 100;
pub const MAX_SIZE_PX: u32 = 1000;
pub const MAX_MARGIN_MODULES: u32 = 10;
pub const MIN_LOGO_PERCENT: u32 = 10;
pub const MAX_LOGO_PERCENT: u32 = 30;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleOptions {
    #[serde(with = "hex_color")]
    pub foreground: [u8; 3],
    #[serde(with = "hex_color")]
    pub background: [u8; 3],
    /// Final artifact edge length in pixels.
    pub size: u32,
    /// Quiet-zone width in module units.
    pub margin: u32,
    pub error_correction: ErrorCorrection,
    #[serde(skip)]
    pub logo: Option<LogoOptions>,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            foreground: [0x00, 0x00, 0x00],
            background: [0xff, 0xff, 0xff],
            size: 300,
            margin: 4,
            error_correction: ErrorCorrection::M,
            logo: None,
        }
    }
}

impl StyleOptions {
    pub fn validate(&self) -> QrForgeResult<()> {
        if self.size < MIN_SIZE_PX || self.size > MAX_SIZE_PX {
            return Err(QrForgeError::validation(format!(
                "size must be within {MIN_SIZE_PX}..={MAX_SIZE_PX} px, got {}",
                self.size
            )));
        }
        if self.margin > MAX_MARGIN_MODULES {
            return Err(QrForgeError::validation(format!(
                "margin must be at most {MAX_MARGIN_MODULES} modules, got {}",
                self.margin
            )));
        }
        if let Some(logo) = &self.logo {
            if logo.size_percent < MIN_LOGO_PERCENT || logo.size_percent > MAX_LOGO_PERCENT {
                return Err(QrForgeError::validation(format!(
                    "logo size must be within {MIN_LOGO_PERCENT}..={MAX_LOGO_PERCENT} percent, got {}",
                    logo.size_percent
                )));
            }
            if logo.bytes.len() > MAX_LOGO_BYTES {
                return Err(QrForgeError::validation(format!(
                    "logo exceeds the {MAX_LOGO_BYTES} byte limit ({} bytes)",
                    logo.bytes.len()
                )));
            }
        }
        Ok(())
    }
}

/// The encoding result for one (record, style) pair: raster bytes, vector
/// markup, or both, depending on the requested format.
#[derive(Clone, Debug, Default)]
pub struct QrArtifact {
    pub png: Option<Vec<u8>>,
    pub svg: Option<String>,
}

pub fn parse_hex_color(s: &str) -> QrForgeResult<[u8; 3]> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(QrForgeError::validation(format!(
            "color must be '#rrggbb' hex, got '{s}'"
        )));
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    Ok([
        channel(0).map_err(|e| QrForgeError::validation(e.to_string()))?,
        channel(2).map_err(|e| QrForgeError::validation(e.to_string()))?,
        channel(4).map_err(|e| QrForgeError::validation(e.to_string()))?,
    ])
}

pub fn format_hex_color(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

mod hex_color {
    use serde::{Deserialize as _, Deserializer, Serializer, de::Error as _};

    pub fn serialize<S: Serializer>(rgb: &[u8; 3], ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&super::format_hex_color(*rgb))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<[u8; 3], D::Error> {
        let s = String::deserialize(de)?;
        super::parse_hex_color(&s).map_err(D::Error::custom)
    }
}
