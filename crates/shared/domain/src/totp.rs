use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, VariantNames};

/// Issuer shown by authenticator apps when `totp-issuer` is not configured.
pub const DEFAULT_ISSUER: &str = "Apache Guacamole";
/// Digits per generated code when `totp-digits` is not configured.
pub const DEFAULT_DIGITS: i32 = 6;
/// Code validity in seconds when `totp-period` is not configured.
pub const DEFAULT_PERIOD: i32 = 30;

/// Fewest digits a TOTP code may have.
pub const MIN_DIGITS: i32 = 6;
/// Most digits a TOTP code may have.
pub const MAX_DIGITS: i32 = 8;

/// Hash algorithm used to generate TOTP codes.
///
/// Parsing is case-sensitive: only the lowercase symbols are legal property values.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TotpMode {
    #[default]
    Sha1,
    Sha256,
    Sha512,
}

/// Fully resolved TOTP tunables handed to the code generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotpSettings {
    pub issuer: String,
    pub digits: i32,
    pub period: i32,
    pub mode: TotpMode,
}

impl Default for TotpSettings {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_owned(),
            digits: DEFAULT_DIGITS,
            period: DEFAULT_PERIOD,
            mode: TotpMode::default(),
        }
    }
}
