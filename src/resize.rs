use crate::RgbImage;
use fir::{FilterType, PixelType, ResizeAlg, ResizeOptions, images::Image};

/// Frames at least this wide get halved before being handed to a display
/// surface
pub const PREVIEW_DOWNSCALE_WIDTH: usize = 3840;

/// Everything that can go wrong when calling [`Preview::halve`]
#[derive(Debug, thiserror::Error)]
pub enum ResizeError {
    #[error("a {width}x{height} image is too small to halve")]
    TooSmall { width: usize, height: usize },

    #[error(transparent)]
    Buffer(#[from] fir::ImageBufferError),

    #[error(transparent)]
    Resize(#[from] fir::ResizeError),
}

/// Wrapper over [`fast_image_resize`](fir) downscaling decoded [`RgbImage`]s
/// for presentation.
///
/// This is strictly a post-processing step; the decoded pixel values that
/// feed it are never altered.
pub struct Preview {
    fir: fir::Resizer,
    options: ResizeOptions,
}

impl Preview {
    pub fn new() -> Self {
        Self {
            fir: fir::Resizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear)),
        }
    }

    /// Downscale an image to half its width and height.
    ///
    /// The source must be at least 2x2 pixels, halving anything smaller has
    /// no target resolution.
    pub fn halve(&mut self, src: &RgbImage) -> Result<RgbImage, ResizeError> {
        if src.width() < 2 || src.height() < 2 {
            return Err(ResizeError::TooSmall {
                width: src.width(),
                height: src.height(),
            });
        }

        let (dst_width, dst_height) = (src.width() / 2, src.height() / 2);

        let src_view = Image::from_vec_u8(
            src.width() as u32,
            src.height() as u32,
            src.data().to_vec(),
            PixelType::U8x3,
        )?;

        let mut dst = Image::new(dst_width as u32, dst_height as u32, PixelType::U8x3);

        self.fir.resize(&src_view, &mut dst, &self.options)?;

        Ok(RgbImage::new(dst_width, dst_height, dst.into_vec()))
    }

    /// Halve images that are [`PREVIEW_DOWNSCALE_WIDTH`] or wider, pass
    /// everything else through untouched
    pub fn downscale_for_preview(&mut self, src: RgbImage) -> Result<RgbImage, ResizeError> {
        if src.width() >= PREVIEW_DOWNSCALE_WIDTH {
            self.halve(&src)
        } else {
            Ok(src)
        }
    }
}

impl Default for Preview {
    fn default() -> Self {
        Self::new()
    }
}
