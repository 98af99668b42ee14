//! Image source for the 2D viewport
//!
//! Decodes an image once and renders it for display either as its RGB
//! channels or as the per-pixel channel magnitude mapped to grayscale (the
//! useful view for multi-channel scientific images).

use anyhow::Context;
use image::{DynamicImage, Rgba, RgbaImage};
use std::path::Path;

/// A decoded image plus the handle the viewport draws
#[derive(Clone, Debug)]
pub struct ImageSource {
    raw: DynamicImage,
    pub handle: cosmic::widget::image::Handle,
}

impl ImageSource {
    /// Decode `path` and prepare the requested display rendering
    pub fn open(path: &Path, rgb_display: bool) -> anyhow::Result<Self> {
        let raw = image::open(path)
            .with_context(|| format!("could not decode image {}", path.display()))?;
        log::debug!("image loaded: {}x{} pixels", raw.width(), raw.height());
        let handle = make_handle(render(&raw, rgb_display));
        Ok(Self { raw, handle })
    }

    /// Re-render the display without re-reading the file
    pub fn set_display(&mut self, rgb_display: bool) {
        self.handle = make_handle(render(&self.raw, rgb_display));
    }

    pub fn width(&self) -> u32 {
        self.raw.width()
    }

    pub fn height(&self) -> u32 {
        self.raw.height()
    }
}

fn make_handle(rgba: RgbaImage) -> cosmic::widget::image::Handle {
    cosmic::widget::image::Handle::from_rgba(rgba.width(), rgba.height(), rgba.into_vec())
}

fn render(raw: &DynamicImage, rgb_display: bool) -> RgbaImage {
    if rgb_display {
        raw.to_rgba8()
    } else {
        magnitude_rgba(raw)
    }
}

/// Per-pixel channel magnitude, rescaled over the image into grayscale
fn magnitude_rgba(raw: &DynamicImage) -> RgbaImage {
    let float = raw.to_rgba32f();
    let magnitudes: Vec<f32> = float
        .pixels()
        .map(|p| {
            let [r, g, b, _] = p.0;
            (r * r + g * g + b * b).sqrt()
        })
        .collect();
    let (lo, hi) = magnitudes
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), m| (lo.min(*m), hi.max(*m)));
    let span = if hi > lo { hi - lo } else { 1.0 };

    let mut out = RgbaImage::new(raw.width(), raw.height());
    for (pixel, magnitude) in out.pixels_mut().zip(magnitudes) {
        let level = (((magnitude - lo) / span) * 255.0).round() as u8;
        *pixel = Rgba([level, level, level, 255]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn two_pixel_image() -> DynamicImage {
        let mut img = image::RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 255, 255]));
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn magnitude_rescales_between_darkest_and_brightest() {
        let out = magnitude_rgba(&two_pixel_image());
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(out.get_pixel(1, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn constant_image_maps_to_black_not_nan() {
        let img = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(3, 3, Rgb([80, 80, 80])));
        let out = magnitude_rgba(&img);
        for p in out.pixels() {
            assert_eq!(p.0, [0, 0, 0, 255]);
        }
    }

    #[test]
    fn rgb_display_keeps_channels() {
        let out = render(&two_pixel_image(), true);
        assert_eq!(out.get_pixel(1, 0).0, [255, 255, 255, 255]);
    }
}
