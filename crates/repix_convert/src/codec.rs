use std::path::Path;

use async_trait::async_trait;
use image::DynamicImage;
use repix_core::TargetFormat;

use crate::{error::ConvertError, traits::ImageCodec};

/// Default codec backed by the `image` crate.
///
/// Decoding and encoding are CPU-bound, so both run on the blocking pool.
pub struct RasterCodec;

#[async_trait]
impl ImageCodec for RasterCodec {
    async fn convert(
        &self,
        source: &Path,
        destination: &Path,
        format: TargetFormat,
    ) -> Result<(), ConvertError> {
        let source = source.to_owned();
        let destination = destination.to_owned();

        tokio::task::spawn_blocking(move || {
            let decoded = image::open(&source).map_err(|e| ConvertError::Image {
                path: source.clone(),
                source: e,
            })?;

            // JPEG cannot encode an alpha channel,
            // and the WebP encoder only accepts 8-bit RGB(A)
            let decoded = match format {
                TargetFormat::Jpeg => DynamicImage::ImageRgb8(decoded.to_rgb8()),
                TargetFormat::Webp => DynamicImage::ImageRgba8(decoded.to_rgba8()),
                TargetFormat::Png => decoded,
            };

            let image_format = match format {
                TargetFormat::Webp => image::ImageFormat::WebP,
                TargetFormat::Jpeg => image::ImageFormat::Jpeg,
                TargetFormat::Png => image::ImageFormat::Png,
            };

            decoded
                .save_with_format(&destination, image_format)
                .map_err(|e| ConvertError::Image {
                    path: destination.clone(),
                    source: e,
                })
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[tokio::test]
    async fn it_converts_png_to_target_formats() {
        let dir = tempfile::tempdir().expect("Should create a temp dir");
        let source = dir.path().join("dot.png");

        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.save(&source).expect("Should save the fixture");

        for (format, name) in [
            (TargetFormat::Webp, "dot.webp"),
            (TargetFormat::Jpeg, "dot.jpeg"),
        ] {
            let destination = dir.path().join(name);
            RasterCodec
                .convert(&source, &destination, format)
                .await
                .expect("Should convert");
            assert!(destination.exists());
        }
    }

    #[tokio::test]
    async fn it_fails_on_missing_source() {
        let dir = tempfile::tempdir().expect("Should create a temp dir");
        let result = RasterCodec
            .convert(
                &dir.path().join("missing.png"),
                &dir.path().join("missing.webp"),
                TargetFormat::Webp,
            )
            .await;
        assert!(matches!(result, Err(ConvertError::Image { .. })));
    }
}
