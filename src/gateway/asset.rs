// SPDX-License-Identifier: MPL-2.0
//! Decoding of downloaded image assets and the placeholder shown when an
//! asset cannot be displayed.

use crate::error::{Error, Result};
use image_rs::{Rgba, RgbaImage};

/// Edge length of the generated placeholder (matches the card width).
pub const PLACEHOLDER_SIZE: u32 = 200;

const PLACEHOLDER_BACKGROUND: Rgba<u8> = Rgba([0xcc, 0xcc, 0xcc, 0xff]);
const PLACEHOLDER_MARK: Rgba<u8> = Rgba([0x88, 0x88, 0x88, 0xff]);

/// Stroke thickness of the placeholder cross, in pixels.
const MARK_THICKNESS: u32 = 3;

/// An RGBA8 bitmap ready to hand to the renderer.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedAsset {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for DecodedAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedAsset")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

impl From<RgbaImage> for DecodedAsset {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            pixels: image.into_raw(),
        }
    }
}

/// Decodes an encoded image (format sniffed from content).
pub fn decode(bytes: &[u8]) -> Result<DecodedAsset> {
    let image = image_rs::load_from_memory(bytes).map_err(|e| Error::Decode(e.to_string()))?;
    Ok(image.to_rgba8().into())
}

/// Light grey square with a darker diagonal cross.
pub fn placeholder() -> DecodedAsset {
    let size = PLACEHOLDER_SIZE;
    RgbaImage::from_fn(size, size, |x, y| {
        let on_diagonal = x.abs_diff(y) < MARK_THICKNESS;
        let on_anti_diagonal = (x + y).abs_diff(size - 1) < MARK_THICKNESS;
        if on_diagonal || on_anti_diagonal {
            PLACEHOLDER_MARK
        } else {
            PLACEHOLDER_BACKGROUND
        }
    })
    .into()
}

/// Guesses the MIME type sent with an upload from its file name.
pub fn mime_for_filename(filename: &str) -> &'static str {
    image_rs::ImageFormat::from_path(filename)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::ImageFormat;
    use std::io::Cursor;

    fn encoded_png(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn decodes_png_into_rgba() {
        let asset = decode(&encoded_png(4, 3)).unwrap();
        assert_eq!((asset.width, asset.height), (4, 3));
        assert_eq!(asset.pixels.len(), 4 * 3 * 4);
        assert_eq!(&asset.pixels[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode(b"<html>Access Denied</html>").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn placeholder_has_expected_shape() {
        let asset = placeholder();
        assert_eq!(asset.width, PLACEHOLDER_SIZE);
        assert_eq!(asset.pixels.len(), (PLACEHOLDER_SIZE * PLACEHOLDER_SIZE * 4) as usize);
        // Corner sits on the diagonal, the middle of the top edge does not
        assert_eq!(&asset.pixels[..4], &PLACEHOLDER_MARK.0);
        let top_middle = (PLACEHOLDER_SIZE / 2 * 4) as usize;
        assert_eq!(&asset.pixels[top_middle..top_middle + 4], &PLACEHOLDER_BACKGROUND.0);
    }

    #[test]
    fn mime_guess_uses_extension() {
        assert_eq!(mime_for_filename("photo.png"), "image/png");
        assert_eq!(mime_for_filename("PHOTO.JPG"), "image/jpeg");
        assert_eq!(mime_for_filename("notes.txt"), "application/octet-stream");
        assert_eq!(mime_for_filename("no_extension"), "application/octet-stream");
    }
}
