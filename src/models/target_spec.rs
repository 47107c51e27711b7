use flag_quantize::{TARGET_HEIGHT, TARGET_WIDTH};
use serde::{Deserialize, Serialize};

/// Resolution a source image is reduced to before matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub width: usize,
    pub height: usize,
}

impl TargetSpec {
    /// The host flag grid: 100x66
    pub const FLAG: Self = Self {
        width: TARGET_WIDTH,
        height: TARGET_HEIGHT,
    };

    /// Number of tokens an encoded flag of this size carries
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for TargetSpec {
    fn default() -> Self {
        Self::FLAG
    }
}

impl std::fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
