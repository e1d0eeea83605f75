//! US ZIP code handling for tax and mileage lookups

/// A syntactically valid 5-digit ZIP code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZipCode([u8; 5]);

impl ZipCode {
    /// Parse exactly five ASCII digits, ignoring surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let bytes = raw.trim().as_bytes();
        if bytes.len() != 5 || !bytes.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let mut digits = [0u8; 5];
        digits.copy_from_slice(bytes);
        Some(Self(digits))
    }

    /// Numeric value of the first three digits (the sectional center).
    pub fn prefix3(&self) -> u32 {
        self.0[..3]
            .iter()
            .fold(0, |acc, d| acc * 10 + u32::from(d - b'0'))
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.as_str().starts_with(prefix)
    }
}

/// Three-digit prefix of a ZIP, or 0 when the ZIP is not valid.
pub fn prefix3_or_zero(raw: &str) -> u32 {
    ZipCode::parse(raw).map(|z| z.prefix3()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_zip() {
        let zip = ZipCode::parse(" 63052 ").unwrap();
        assert_eq!(zip.prefix3(), 630);
        assert_eq!(zip.as_str(), "63052");
        assert!(zip.starts_with("63"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["", "6305", "630521", "63O52", "63052-1234", "６３０５２"] {
            assert!(ZipCode::parse(raw).is_none(), "{raw} should be invalid");
        }
        assert_eq!(prefix3_or_zero("abc"), 0);
        assert_eq!(prefix3_or_zero("00501"), 5);
    }
}
