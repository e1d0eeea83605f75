//! Error types for cut-sheet generation.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CutSheetError {
    /// A fabrication option is out of range.
    #[error("Invalid cut-sheet option {name}: {value}")]
    InvalidOption { name: String, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_option_display() {
        let err = CutSheetError::InvalidOption {
            name: "text_height".to_string(),
            value: -1.0,
        };
        assert_eq!(err.to_string(), "Invalid cut-sheet option text_height: -1");
    }
}
