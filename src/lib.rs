//! Decode raw 4:2:0 YUV frame streams into RGB or grayscale images.
//!
//! A raw stream is a flat byte sequence of fixed-size frames with no headers
//! or delimiters; the caller supplies the dimensions and the layout
//! ([`FrameFormat::I420`] or [`FrameFormat::NV12`]). Conversion applies the
//! BT.601 limited-range integer transform with saturating clipping and
//! reconstructs chroma by 2x2 nearest-neighbor lookup.
//!
//! ```no_run
//! use rawyuv::{FrameDecoder, FrameFormat, FrameLayout, FrameSource, Output};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let layout = FrameLayout::new(1920, 1080, FrameFormat::I420)?;
//! let source = FrameSource::open("capture.yuv", layout)?;
//!
//! let mut decoder = FrameDecoder::new(source);
//!
//! for index in 0..decoder.frame_count() {
//!     let decoded = decoder.decode(index, Output::Both)?;
//! }
//! # Ok(())
//! # }
//! ```

pub use checksum::frame_digest;
pub use convert::{luma_to_gray, yuv_to_rgb};
#[cfg(feature = "multi-thread")]
pub use decode::decode_rgb_multi_thread;
pub use decode::{Decoded, FrameDecoder, GrayImage, Output, RgbImage, decode_gray, decode_rgb};
pub use frame::{FrameError, FramePlanes, RawFrame, SampleOutOfBounds};
pub use layout::{FrameFormat, FrameLayout, LayoutError, PlaneOffsets};
#[cfg(feature = "resize")]
pub use resize::{PREVIEW_DOWNSCALE_WIDTH, Preview, ResizeError};
pub use source::{FrameSource, SourceError};

mod checksum;
mod convert;
mod decode;
mod frame;
mod layout;
#[cfg(feature = "resize")]
mod resize;
mod source;
