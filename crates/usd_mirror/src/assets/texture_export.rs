//! Texture extraction to PNG files
//!
//! Each texture slot of the model is a `height * width * 3` byte range of the
//! packed RGB buffer with rows stored bottom-to-top. Image files store rows
//! top-to-bottom, so every texture is flipped vertically before encoding.

use image::{imageops, ImageFormat, RgbImage};
use std::path::{Path, PathBuf};

use crate::assets::AssetError;
use crate::model::Model;

/// One texture written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureAsset {
    /// Texture slot in the model
    pub texid: usize,
    /// Absolute path of the PNG file
    pub path: PathBuf,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

/// File name used for texture slot `texid`
pub fn texture_file_name(texid: usize) -> String {
    format!("{texid}.png")
}

/// Decode texture slot `texid` into a top-to-bottom RGB image
pub fn texture_image(model: &Model, texid: usize) -> Result<RgbImage, AssetError> {
    let slot = model.textures.get(texid).ok_or(AssetError::NotFound(texid))?;
    let bytes = model.texture_bytes(texid).ok_or_else(|| {
        AssetError::InvalidData(format!("texture {texid} lies outside the packed buffer"))
    })?;

    let image = RgbImage::from_raw(slot.width, slot.height, bytes.to_vec()).ok_or_else(|| {
        AssetError::InvalidData(format!(
            "texture {texid}: {} bytes do not fill {}x{} pixels",
            bytes.len(),
            slot.width,
            slot.height
        ))
    })?;

    Ok(imageops::flip_vertical(&image))
}

/// Write every texture of `model` to `<dir>/<texid>.png`
///
/// Returns the written assets in slot order. The directory is created when
/// missing. Running the export twice on the same model produces identical
/// files.
pub fn extract_textures(model: &Model, dir: impl AsRef<Path>) -> Result<Vec<TextureAsset>, AssetError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let mut assets = Vec::with_capacity(model.texture_count());
    for texid in 0..model.texture_count() {
        let image = texture_image(model, texid)?;
        let path = std::path::absolute(dir.join(texture_file_name(texid)))?;

        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| AssetError::Encode { path: path.display().to_string(), source })?;

        log::debug!("Wrote texture {} ({}x{}) to {:?}", texid, image.width(), image.height(), path);

        assets.push(TextureAsset {
            texid,
            path,
            width: image.width(),
            height: image.height(),
        });
    }

    if !assets.is_empty() {
        log::info!("Extracted {} textures to {:?}", assets.len(), dir);
    }
    Ok(assets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_models::example_model;

    #[test]
    fn test_texture_image_is_flipped() {
        let model = example_model();
        let image = texture_image(&model, 1).unwrap();
        let bytes = model.texture_bytes(1).unwrap();

        assert_eq!(image.dimensions(), (2, 2));
        // First stored row (bottom) becomes the last image row
        assert_eq!(image.get_pixel(0, 1).0, [bytes[0], bytes[1], bytes[2]]);
        assert_eq!(image.get_pixel(1, 1).0, [bytes[3], bytes[4], bytes[5]]);
        assert_eq!(image.get_pixel(0, 0).0, [bytes[6], bytes[7], bytes[8]]);
    }

    #[test]
    fn test_extract_writes_indexed_files() {
        let dir = tempfile::tempdir().unwrap();
        let model = example_model();

        let assets = extract_textures(&model, dir.path()).unwrap();

        assert_eq!(assets.len(), 2);
        assert!(assets[0].path.ends_with("0.png"));
        assert!(assets[1].path.ends_with("1.png"));
        assert!(assets.iter().all(|asset| asset.path.is_absolute()));
        assert_eq!((assets[0].width, assets[0].height), (4, 4));

        let decoded = image::open(&assets[0].path).unwrap().to_rgb8();
        assert_eq!(decoded, texture_image(&model, 0).unwrap());
    }

    #[test]
    fn test_extract_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let model = example_model();

        let first = extract_textures(&model, dir.path()).unwrap();
        let first_bytes: Vec<Vec<u8>> = first.iter().map(|a| std::fs::read(&a.path).unwrap()).collect();

        let second = extract_textures(&model, dir.path()).unwrap();
        let second_bytes: Vec<Vec<u8>> = second.iter().map(|a| std::fs::read(&a.path).unwrap()).collect();

        assert_eq!(first, second);
        assert_eq!(first_bytes, second_bytes);
    }

    #[test]
    fn test_missing_texture_slot() {
        let model = example_model();
        assert!(matches!(texture_image(&model, 9), Err(AssetError::NotFound(9))));
    }
}
