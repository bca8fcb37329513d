use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;
use std::str::FromStr;

/// The 62 symbols a short code is built from, in selection order.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Shortest code the system ever hands out.
pub const MIN_LENGTH: usize = 3;
/// Longest code the system ever hands out. Generation fails past this.
pub const MAX_LENGTH: usize = 10;

/// A validated short public code standing in for an entity's primary key.
///
/// Short codes are 3-10 characters long and contain only ASCII letters and
/// digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortCode(SmolStr);

impl ShortCode {
    /// Creates a new `ShortCode` after validating the input.
    pub fn new(code: impl AsRef<str>) -> Result<Self, CoreError> {
        let code = code.as_ref();
        Self::validate(code)?;
        Ok(Self(SmolStr::new(code)))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (the generator, or rows read back from the registry).
    pub fn new_unchecked(code: impl AsRef<str>) -> Self {
        Self(SmolStr::new(code))
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters in the code.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Builds the public short link, `<base-url>/s/<code>/`.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/s/{}/", base_url.trim_end_matches('/'), self.0)
    }

    fn validate(code: &str) -> Result<(), CoreError> {
        if code.len() < MIN_LENGTH || code.len() > MAX_LENGTH {
            return Err(CoreError::InvalidShortCode(format!(
                "length must be between {} and {}, got {}",
                MIN_LENGTH,
                MAX_LENGTH,
                code.len()
            )));
        }

        if !code.bytes().all(|b| ALPHABET.contains(&b)) {
            return Err(CoreError::InvalidShortCode(format!(
                "must contain only ASCII letters and digits: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ShortCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ShortCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShortCode> for String {
    fn from(value: ShortCode) -> Self {
        value.0.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_has_no_duplicates() {
        let mut symbols = ALPHABET.to_vec();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), 62);
    }

    #[test]
    fn valid_codes() {
        assert!(ShortCode::new("abc").is_ok());
        assert!(ShortCode::new("qsR").is_ok());
        assert!(ShortCode::new("Z9z9Z9z9Z9").is_ok());
    }

    #[test]
    fn too_short() {
        assert!(ShortCode::new("ab").is_err());
        assert!(ShortCode::new("").is_err());
    }

    #[test]
    fn too_long() {
        assert!(ShortCode::new("a".repeat(11)).is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(ShortCode::new("ab-c").is_err());
        assert!(ShortCode::new("ab_c").is_err());
        assert!(ShortCode::new("abc/").is_err());
        assert!(ShortCode::new("abé").is_err());
    }

    #[test]
    fn parse_from_str() {
        let code: ShortCode = "qsR".parse().unwrap();
        assert_eq!(code.as_str(), "qsR");
        assert!("no!".parse::<ShortCode>().is_err());
    }

    #[test]
    fn to_url_appends_redirect_path() {
        let code = ShortCode::new("qsR").unwrap();
        assert_eq!(code.to_url("https://foodgram.io"), "https://foodgram.io/s/qsR/");
        assert_eq!(code.to_url("https://foodgram.io/"), "https://foodgram.io/s/qsR/");
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let code: ShortCode = serde_json::from_str("\"qsR\"").unwrap();
        assert_eq!(code.as_str(), "qsR");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"qsR\"");
        assert!(serde_json::from_str::<ShortCode>("\"a-b\"").is_err());
    }
}
