// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cover loading — turn encoded image bytes into a cover descriptor, and fit a
// cover onto a page.
//
// The whole image is decoded so a damaged body is rejected here rather than
// by the renderer. Only the dimensions are kept. Reading the file is the
// caller's job.

use std::io::Cursor;
use std::path::PathBuf;

use folio_core::error::{FolioError, Result};
use folio_core::{CoverImage, PageSize};
use image::ImageReader;
use tracing::{debug, instrument};

/// Build a [`CoverImage`] from encoded bytes (JPEG, PNG, ...).
///
/// `path` is kept for the renderer, which embeds the original file.
#[instrument(skip_all, fields(path = %path.as_ref().display(), bytes_len = bytes.len()))]
pub fn load_cover(path: impl AsRef<std::path::Path>, bytes: &[u8]) -> Result<CoverImage> {
    let path: PathBuf = path.as_ref().to_path_buf();
    if bytes.is_empty() {
        return Err(FolioError::ImageLoadFailure(format!(
            "{} contains no image data",
            path.display()
        )));
    }

    let image = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| {
            FolioError::ImageLoadFailure(format!("failed to read {}: {}", path.display(), err))
        })?
        .decode()
        .map_err(|err| {
            FolioError::ImageLoadFailure(format!("failed to decode {}: {}", path.display(), err))
        })?;

    let (width, height) = (image.width(), image.height());
    debug!(width, height, "cover dimensions decoded");
    CoverImage::new(path, width, height)
}

/// Scale a cover to fit inside `page` while preserving its aspect ratio.
///
/// The scale factor is `min(page_w / image_w, page_h / image_h)`, capped at 1.0
/// so small covers are never enlarged. Both returned dimensions are within the
/// page bounds.
pub fn fit_to_page(cover: &CoverImage, page: PageSize) -> (f32, f32) {
    let image_w = cover.width as f32;
    let image_h = cover.height as f32;

    let scale = (page.width / image_w).min(page.height / image_h).min(1.0);

    let width = (image_w * scale).min(page.width);
    let height = (image_h * scale).min(page.height);
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut buffer = Vec::new();
        RgbImage::new(width, height)
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn decodes_png_dimensions() {
        let cover = load_cover("covers/front.png", &png_bytes(40, 60)).unwrap();
        assert_eq!((cover.width, cover.height), (40, 60));
        assert_eq!(cover.path, PathBuf::from("covers/front.png"));
    }

    #[test]
    fn corrupt_bytes_fail() {
        let err = load_cover("front.png", b"definitely not an image").unwrap_err();
        assert!(matches!(err, FolioError::ImageLoadFailure(_)));
    }

    #[test]
    fn truncated_png_fails() {
        let bytes = png_bytes(10, 10);
        let err = load_cover("front.png", &bytes[..8]).unwrap_err();
        assert!(matches!(err, FolioError::ImageLoadFailure(_)));
    }

    #[test]
    fn valid_header_with_corrupt_body_fails() {
        let err = load_cover("front.gif", b"GIF89a but not really").unwrap_err();
        assert!(matches!(err, FolioError::ImageLoadFailure(_)));

        // Signature (8) + IHDR (25) + IDAT length and type (8) stay intact;
        // the compressed pixel data up to the IDAT CRC and IEND is flipped.
        let mut bytes = png_bytes(16, 16);
        let body_end = bytes.len() - 16;
        for byte in &mut bytes[41..body_end] {
            *byte ^= 0xA5;
        }
        assert!(matches!(
            load_cover("front.png", &bytes),
            Err(FolioError::ImageLoadFailure(_))
        ));
    }

    #[test]
    fn empty_bytes_fail() {
        assert!(matches!(
            load_cover("front.png", &[]),
            Err(FolioError::ImageLoadFailure(_))
        ));
    }

    #[test]
    fn wide_cover_is_limited_by_page_width() {
        let cover = CoverImage::new("c.png", 2000, 1000).unwrap();
        let page = PageSize {
            width: 600.0,
            height: 800.0,
        };
        let (w, h) = fit_to_page(&cover, page);
        assert!((w - 600.0).abs() < 1e-3);
        assert!((h - 300.0).abs() < 1e-3);
        assert!(w <= page.width && h <= page.height);
    }

    #[test]
    fn tall_cover_is_limited_by_page_height() {
        let cover = CoverImage::new("c.png", 1000, 4000).unwrap();
        let (w, h) = fit_to_page(&cover, PageSize::LETTER);
        assert!((h - 792.0).abs() < 1e-3);
        assert!((w - 198.0).abs() < 1e-3);
    }

    #[test]
    fn small_cover_is_not_enlarged() {
        let cover = CoverImage::new("c.png", 100, 50).unwrap();
        assert_eq!(fit_to_page(&cover, PageSize::LETTER), (100.0, 50.0));
    }
}
