use serde::{Deserialize, Serialize};

pub const PROMPT_MAX_CHARS: usize = 500;
pub const MIN_DIMENSION: u32 = 1024;
pub const MAX_DIMENSION: u32 = 4096;
pub const MAX_NUM_IMAGES: u8 = 4;

/// Image size as the Seedream endpoint expects it: either a named preset
/// (serialized as a bare string) or explicit dimensions.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ImageSize {
    Preset(SizePreset),
    Custom { width: u32, height: u32 },
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SizePreset {
    #[serde(rename = "square_hd")]
    SquareHd,
    #[serde(rename = "portrait_4_3")]
    Portrait43,
    #[serde(rename = "landscape_16_9")]
    Landscape169,
}

fn default_size() -> ImageSize {
    ImageSize::Preset(SizePreset::SquareHd)
}

fn default_num_images() -> u8 {
    1
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default = "default_size")]
    pub size: ImageSize,
    #[serde(default = "default_num_images")]
    pub num_images: u8,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub enable_safety_checker: bool,
}

impl GenerateRequest {
    /// Input bounds checked before any network call is made.
    pub fn validate(&self) -> Result<(), String> {
        if self.prompt.trim().is_empty() {
            return Err("Please enter a prompt".into());
        }
        if self.prompt.chars().count() > PROMPT_MAX_CHARS {
            return Err(format!("Prompt must be at most {PROMPT_MAX_CHARS} characters"));
        }
        if let ImageSize::Custom { width, height } = self.size {
            for dim in [width, height] {
                if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&dim) {
                    return Err(format!(
                        "Custom dimensions must be between {MIN_DIMENSION} and {MAX_DIMENSION} pixels"
                    ));
                }
            }
        }
        if self.num_images == 0 || self.num_images > MAX_NUM_IMAGES {
            return Err(format!("Number of images must be between 1 and {MAX_NUM_IMAGES}"));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeneratedImage {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerateResponse {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub images: Vec<GeneratedImage>,
}
