//! Renderer string classification into vendor and model

pub mod adreno;

pub use adreno::{identify_adreno_model, GpuModel, ADRENO_MODEL_TOKENS};

use serde::{Deserialize, Serialize};

/// GPU vendors recognized in renderer strings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GpuVendor {
    /// Unknown or unsupported vendor
    #[default]
    Unknown,
    /// ARM Mali GPUs
    Mali,
    /// Qualcomm Adreno GPUs
    Adreno,
    /// Imagination PowerVR GPUs
    PowerVr,
    /// Intel integrated GPUs
    Intel,
    /// NVIDIA GPUs
    Nvidia,
}

impl std::fmt::Display for GpuVendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GpuVendor::Mali => write!(f, "ARM Mali"),
            GpuVendor::Adreno => write!(f, "Qualcomm Adreno"),
            GpuVendor::PowerVr => write!(f, "Imagination PowerVR"),
            GpuVendor::Intel => write!(f, "Intel"),
            GpuVendor::Nvidia => write!(f, "NVIDIA"),
            GpuVendor::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Vendor keywords searched in a lower-cased renderer string, highest
/// priority first
pub const VENDOR_KEYWORDS: &[(&str, GpuVendor)] = &[
    ("mali", GpuVendor::Mali),
    ("adreno", GpuVendor::Adreno),
    ("powervr", GpuVendor::PowerVr),
    ("intel", GpuVendor::Intel),
    ("nvidia", GpuVendor::Nvidia),
];

/// Find the vendor named in an already lower-cased renderer string
pub fn identify_vendor(lowered: &str) -> GpuVendor {
    VENDOR_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|&(_, vendor)| vendor)
        .unwrap_or(GpuVendor::Unknown)
}

/// Classify a renderer string (`GL_RENDERER`) into vendor and model.
///
/// Matching is ASCII case-insensitive. The model is only looked up for
/// Adreno renderers, every other vendor gets [`GpuModel::Unknown`].
///
/// # Example
///
/// ```
/// use gpuprobe::{classify, GpuModel, GpuVendor};
///
/// assert_eq!(classify("Adreno (TM) 630"), (GpuVendor::Adreno, GpuModel::Adreno630));
/// assert_eq!(classify("Mali-G72"), (GpuVendor::Mali, GpuModel::Unknown));
/// ```
pub fn classify(renderer: &str) -> (GpuVendor, GpuModel) {
    let lowered = renderer.to_ascii_lowercase();
    let vendor = identify_vendor(&lowered);
    let model = match vendor {
        GpuVendor::Adreno => identify_adreno_model(&lowered),
        _ => GpuModel::Unknown,
    };
    (vendor, model)
}
