//! Loading of the external image assets (photos, maps, header emblems).
//!
//! Paths in the page compositions are relative to the asset directory; a leading `/` (web
//! root) is ignored.  Anything the [`image`] crate can decode is accepted.  PDF images must not
//! carry an alpha channel, so transparency is flattened onto white here.

use std::path::{Path, PathBuf};

use genpdf::error::{Context as _, Error};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, RgbImage};
use log::{debug, warn};

use crate::model::ImageFit;
use crate::palette::neutral;

/// Default asset directory, relative to the working directory.
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Loads an image from the given path using the [`image`] crate with descriptive errors.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> Result<DynamicImage, Error> {
    let path = path.as_ref();
    let reader = image::io::Reader::open(path)
        .with_context(|| format!("Failed to open image file {}", path.display()))?;
    reader
        .with_guessed_format()
        .context("Unable to determine image format")?
        .decode()
        .with_context(|| format!("Failed to decode image file {}", path.display()))
}

/// Composites the image onto a white background and drops the alpha channel.
pub fn flatten_alpha(image: DynamicImage) -> RgbImage {
    if let DynamicImage::ImageRgb8(rgb) = image {
        return rgb;
    }
    let white = neutral::WHITE;
    let rgba = image.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = f64::from(pixel[3]) / 255.0;
        let mix = |channel: u8, background: u8| -> u8 {
            (f64::from(channel) * alpha + f64::from(background) * (1.0 - alpha)).round() as u8
        };
        out.put_pixel(
            x,
            y,
            image::Rgb([
                mix(pixel[0], white.0),
                mix(pixel[1], white.1),
                mix(pixel[2], white.2),
            ]),
        );
    }
    out
}

/// Scales `image` for a `width` × `height` pixel box.
///
/// `Cover` crops the centre of the image to the box's aspect ratio and returns exactly the box
/// size; `Contain` returns the largest size that fits inside the box.
pub fn fit_image(image: &RgbImage, width: u32, height: u32, fit: ImageFit) -> RgbImage {
    let (src_w, src_h) = image.dimensions();
    let (width, height) = (width.max(1), height.max(1));
    if src_w == 0 || src_h == 0 {
        return RgbImage::from_pixel(width, height, neutral::WHITE.to_pixel());
    }

    let box_ratio = f64::from(width) / f64::from(height);
    let src_ratio = f64::from(src_w) / f64::from(src_h);
    match fit {
        ImageFit::Cover => {
            let (crop_w, crop_h) = if src_ratio > box_ratio {
                (((f64::from(src_h) * box_ratio).round() as u32).clamp(1, src_w), src_h)
            } else {
                (src_w, ((f64::from(src_w) / box_ratio).round() as u32).clamp(1, src_h))
            };
            let x = (src_w - crop_w) / 2;
            let y = (src_h - crop_h) / 2;
            let cropped = imageops::crop_imm(image, x, y, crop_w, crop_h).to_image();
            imageops::resize(&cropped, width, height, FilterType::Triangle)
        }
        ImageFit::Contain => {
            let scale = (f64::from(width) / f64::from(src_w)).min(f64::from(height) / f64::from(src_h));
            let out_w = ((f64::from(src_w) * scale).round() as u32).max(1);
            let out_h = ((f64::from(src_h) * scale).round() as u32).max(1);
            imageops::resize(image, out_w, out_h, FilterType::Triangle)
        }
    }
}

/// Resolves and loads image assets from a root directory.
#[derive(Clone, Debug)]
pub struct Assets {
    root: PathBuf,
}

impl Assets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute or root-relative location of an asset path.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative.trim_start_matches('/'))
    }

    /// Loads the asset, or logs a warning and returns `None` if it is missing or unreadable.
    pub fn load(&self, relative: &str) -> Option<RgbImage> {
        let path = self.resolve(relative);
        if !path.is_file() {
            warn!("Image asset {} not found; drawing a placeholder", path.display());
            return None;
        }
        match decode_image_from_path(&path) {
            Ok(image) => {
                let (w, h) = image.dimensions();
                debug!("Loaded {} ({}x{})", path.display(), w, h);
                Some(flatten_alpha(image))
            }
            Err(err) => {
                warn!("Image asset {} could not be used: {}", path.display(), err);
                None
            }
        }
    }
}

impl Default for Assets {
    fn default() -> Self {
        Self::new(DEFAULT_ASSETS_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn leading_slash_is_relative_to_root() {
        let assets = Assets::new("/srv/assets");
        assert_eq!(assets.resolve("/1-tea.jpeg"), PathBuf::from("/srv/assets/1-tea.jpeg"));
        assert_eq!(
            assets.resolve("tea population.png"),
            PathBuf::from("/srv/assets/tea population.png")
        );
    }

    #[test]
    fn missing_asset_yields_none() {
        let assets = Assets::new("/nonexistent/plantation-assets");
        assert!(assets.load("tealeaf.png").is_none());
    }

    #[test]
    fn transparent_pixels_become_white() {
        let mut rgba = RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        rgba.put_pixel(1, 0, Rgba([10, 20, 30, 255]));
        let flat = flatten_alpha(DynamicImage::ImageRgba8(rgba));
        assert_eq!(flat.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(flat.get_pixel(1, 0).0, [10, 20, 30]);
    }

    #[test]
    fn cover_fills_the_box_exactly() {
        let source = RgbImage::new(400, 100);
        let fitted = fit_image(&source, 50, 50, ImageFit::Cover);
        assert_eq!(fitted.dimensions(), (50, 50));
    }

    #[test]
    fn contain_keeps_aspect_ratio() {
        let source = RgbImage::new(400, 100);
        let fitted = fit_image(&source, 50, 50, ImageFit::Contain);
        assert_eq!(fitted.dimensions(), (50, 13));
    }
}
