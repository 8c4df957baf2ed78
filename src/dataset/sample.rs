use std::path::Path;

use image::RgbImage;

use super::error::DatasetError;

/// One decoded sample: pixels in RGB channel order, the dense integer
/// label, and the sample's name from the source metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub image: RgbImage,
    pub label: usize,
    pub name: String,
}

/// Decode the image at `path` into an RGB8 buffer.
///
/// Pure in the path: no cache involvement, no dataset state. Fails with the
/// offending path attached when the file is missing, unreadable or not a
/// valid image.
pub fn decode_image(path: &Path) -> Result<RgbImage, DatasetError> {
    let img = image::open(path).map_err(|source| DatasetError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgb8())
}
