//! Packed texture slots

use serde::{Serialize, Deserialize};

/// Bytes per texel in the packed texture buffer
pub const RGB_CHANNELS: usize = 3;

/// Dimensions of one texture stored in the model's packed RGB buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureSlot {
    /// Width in texels
    pub width: u32,
    /// Height in texels
    pub height: u32,
}

impl TextureSlot {
    /// Create a texture slot
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of bytes this texture occupies in the packed buffer
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * RGB_CHANNELS
    }
}
