//! Qualcomm Adreno model identification

use serde::{Deserialize, Serialize};
use std::fmt;

/// GPU models distinguished by the classifier.
///
/// Only Adreno parts are enumerated; every other vendor reports `Unknown`.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GpuModel {
    /// Model not recognized, or not an Adreno GPU
    #[default]
    Unknown,
    // Adreno 6xx series
    Adreno640,
    Adreno630,
    Adreno616,
    Adreno615,
    Adreno612,
    Adreno605,
    // Adreno 5xx series
    Adreno540,
    Adreno530,
    Adreno512,
    Adreno510,
    Adreno509,
    Adreno508,
    Adreno506,
    Adreno505,
    Adreno504,
    // Adreno 4xx series
    Adreno430,
    Adreno420,
    Adreno418,
    Adreno405,
    // Adreno 3xx series
    Adreno330,
    Adreno320,
    Adreno308,
    Adreno306,
    Adreno305,
    Adreno304,
    // Adreno 2xx series
    Adreno225,
    Adreno220,
    Adreno205,
    Adreno203,
    Adreno200,
    // Adreno 1xx series
    Adreno130,
}

/// Model tokens searched in a lower-cased renderer string.
///
/// Order is priority: the first token contained in the string wins, so a
/// renderer mentioning both "640" and "130" resolves to Adreno 640.
pub const ADRENO_MODEL_TOKENS: &[(&str, GpuModel)] = &[
    // Adreno 6xx series
    ("640", GpuModel::Adreno640),
    ("630", GpuModel::Adreno630),
    ("616", GpuModel::Adreno616),
    ("615", GpuModel::Adreno615),
    ("612", GpuModel::Adreno612),
    ("605", GpuModel::Adreno605),
    // Adreno 5xx series
    ("540", GpuModel::Adreno540),
    ("530", GpuModel::Adreno530),
    ("512", GpuModel::Adreno512),
    ("510", GpuModel::Adreno510),
    ("509", GpuModel::Adreno509),
    ("508", GpuModel::Adreno508),
    ("506", GpuModel::Adreno506),
    ("505", GpuModel::Adreno505),
    ("504", GpuModel::Adreno504),
    // Adreno 4xx series
    ("430", GpuModel::Adreno430),
    ("420", GpuModel::Adreno420),
    ("418", GpuModel::Adreno418),
    ("405", GpuModel::Adreno405),
    // Adreno 3xx series
    ("330", GpuModel::Adreno330),
    ("320", GpuModel::Adreno320),
    ("308", GpuModel::Adreno308),
    ("306", GpuModel::Adreno306),
    ("305", GpuModel::Adreno305),
    ("304", GpuModel::Adreno304),
    // Adreno 2xx series
    ("225", GpuModel::Adreno225),
    ("220", GpuModel::Adreno220),
    ("205", GpuModel::Adreno205),
    ("203", GpuModel::Adreno203),
    ("200", GpuModel::Adreno200),
    // Adreno 1xx series
    ("130", GpuModel::Adreno130),
];

/// Find the Adreno model named in an already lower-cased renderer string
///
/// Plain substring search with no word boundaries: "1300" contains "130".
pub fn identify_adreno_model(lowered: &str) -> GpuModel {
    ADRENO_MODEL_TOKENS
        .iter()
        .find(|(token, _)| lowered.contains(token))
        .map(|&(_, model)| model)
        .unwrap_or(GpuModel::Unknown)
}

impl GpuModel {
    /// Numeric designation, e.g. `630` for Adreno 630
    pub fn number(self) -> Option<u16> {
        ADRENO_MODEL_TOKENS
            .iter()
            .find(|(_, model)| *model == self)
            .and_then(|(token, _)| token.parse().ok())
    }

    /// Series digit: `Some(6)` for the 6xx family
    pub fn adreno_series(self) -> Option<u8> {
        self.number().map(|n| (n / 100) as u8)
    }
}

impl fmt::Display for GpuModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number() {
            Some(number) => write!(f, "Adreno {}", number),
            None => write!(f, "Unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("adreno (tm) 640", GpuModel::Adreno640)]
    #[case("adreno (tm) 616", GpuModel::Adreno616)]
    #[case("adreno (tm) 509", GpuModel::Adreno509)]
    #[case("adreno (tm) 418", GpuModel::Adreno418)]
    #[case("adreno (tm) 304", GpuModel::Adreno304)]
    #[case("adreno 203", GpuModel::Adreno203)]
    #[case("adreno 130", GpuModel::Adreno130)]
    #[case("adreno (tm) 740", GpuModel::Unknown)]
    #[case("adreno", GpuModel::Unknown)]
    fn test_identify_adreno_model(#[case] lowered: &str, #[case] expected: GpuModel) {
        assert_eq!(identify_adreno_model(lowered), expected);
    }

    #[test]
    fn test_first_token_in_table_wins() {
        // Both tokens present, table order decides rather than position
        assert_eq!(identify_adreno_model("adreno 130 rev 640"), GpuModel::Adreno640);
        assert_eq!(identify_adreno_model("adreno 1300"), GpuModel::Adreno130);
    }

    #[test]
    fn test_table_covers_every_model_once() {
        assert_eq!(ADRENO_MODEL_TOKENS.len(), 31);
        for (i, (_, model)) in ADRENO_MODEL_TOKENS.iter().enumerate() {
            assert_ne!(*model, GpuModel::Unknown);
            assert!(ADRENO_MODEL_TOKENS[i + 1..].iter().all(|(_, m)| m != model));
        }
    }

    #[test]
    fn test_series_and_display() {
        assert_eq!(GpuModel::Adreno630.number(), Some(630));
        assert_eq!(GpuModel::Adreno630.adreno_series(), Some(6));
        assert_eq!(GpuModel::Adreno130.adreno_series(), Some(1));
        assert_eq!(GpuModel::Unknown.adreno_series(), None);
        assert_eq!(GpuModel::Adreno540.to_string(), "Adreno 540");
        assert_eq!(GpuModel::Unknown.to_string(), "Unknown");
    }
}
