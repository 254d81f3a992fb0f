use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// Pixel intensities at or above this value become `true`.
pub const PIXEL_THRESHOLD: u8 = 128;

/// One labelled record with binarized pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub label: bool,
    pub features: Vec<bool>,
}

pub fn binarize(pixels: &[u8]) -> Vec<bool> {
    pixels.iter().map(|&p| p >= PIXEL_THRESHOLD).collect()
}

/// The two accepted raw label values and which of them is the positive class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassFilter {
    positive: u8,
    negative: u8,
}

impl ClassFilter {
    pub fn new(positive: u8, negative: u8) -> Result<Self, AnalysisError> {
        if positive == negative {
            return Err(AnalysisError::InvalidClasses(positive));
        }
        Ok(Self { positive, negative })
    }

    /// `Some(label)` for an accepted raw label, `None` for one to skip.
    pub fn classify(&self, raw: u8) -> Option<bool> {
        if raw == self.positive {
            Some(true)
        } else if raw == self.negative {
            Some(false)
        } else {
            None
        }
    }
}
