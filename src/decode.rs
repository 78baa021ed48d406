use crate::{FrameLayout, FramePlanes, FrameSource, RawFrame, SourceError, convert::yuv_to_rgb};
use std::io::{Read, Seek};

/// Decoded RGB image, 3 bytes per pixel, row-major
#[derive(Debug, Clone)]
pub struct RgbImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbImage {
    pub(crate) fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height * 3);

        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;

        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

/// Decoded grayscale image, 1 byte per pixel, row-major
#[derive(Debug, Clone)]
pub struct GrayImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImage {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}

/// Which image(s) [`FrameDecoder::decode`] should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Rgb,
    Gray,
    Both,
}

/// Result of [`FrameDecoder::decode`], fields populated per the requested [`Output`]
#[derive(Debug, Clone)]
pub struct Decoded {
    pub rgb: Option<RgbImage>,
    pub gray: Option<GrayImage>,
}

/// Convert one raw frame into an RGB image.
///
/// A pure function of the frame bytes; decoding the same frame twice yields
/// identical buffers.
pub fn decode_rgb(frame: &RawFrame) -> RgbImage {
    let width = frame.layout().width();
    let height = frame.layout().height();

    let mut data = vec![0u8; width * height * 3];
    convert_rows(frame, 0, &mut data);

    RgbImage::new(width, height, data)
}

/// Convert one raw frame into a grayscale image.
///
/// The luma plane already is the grayscale image, so this is a plain copy.
pub fn decode_gray(frame: &RawFrame) -> GrayImage {
    let (FramePlanes::I420 { y, .. } | FramePlanes::Nv12 { y, .. }) = frame.planes();

    GrayImage {
        width: frame.layout().width(),
        height: frame.layout().height(),
        data: y.to_vec(),
    }
}

/// Convert one raw frame into an RGB image, splitting the pixel loop across
/// worker threads.
///
/// Rows are partitioned into disjoint bands; workers share only the read-only
/// frame. Output is identical to [`decode_rgb`].
#[cfg(feature = "multi-thread")]
pub fn decode_rgb_multi_thread(frame: &RawFrame) -> RgbImage {
    use rayon::iter::{IndexedParallelIterator, ParallelIterator};
    use rayon::slice::ParallelSliceMut;

    let threads = num_cpus::get();

    if threads == 1 {
        return decode_rgb(frame);
    }

    let width = frame.layout().width();
    let height = frame.layout().height();

    let mut data = vec![0u8; width * height * 3];
    let rows_per_band = height.div_ceil(threads);

    data.par_chunks_mut(rows_per_band * width * 3)
        .enumerate()
        .for_each(|(band, out)| convert_rows(frame, band * rows_per_band, out));

    RgbImage::new(width, height, data)
}

/// Convert the rows starting at `first_row` into `out`, which must hold a
/// whole number of `width * 3` byte rows.
fn convert_rows(frame: &RawFrame, first_row: usize, out: &mut [u8]) {
    let width = frame.layout().width();

    for (dy, row_out) in out.chunks_exact_mut(width * 3).enumerate() {
        let y = first_row + dy;

        match frame.planes() {
            FramePlanes::I420 { y: y_plane, u, v } => {
                let luma_row = &y_plane[y * width..][..width];
                let chroma_row = (y / 2) * (width / 2);

                for (x, (dst, &luma)) in row_out.chunks_exact_mut(3).zip(luma_row).enumerate() {
                    let i = chroma_row + x / 2;

                    dst.copy_from_slice(&yuv_to_rgb(luma, u[i], v[i]));
                }
            }
            FramePlanes::Nv12 { y: y_plane, uv } => {
                let luma_row = &y_plane[y * width..][..width];
                let chroma_row = &uv[(y / 2) * width..][..width];

                for (x, (dst, &luma)) in row_out.chunks_exact_mut(3).zip(luma_row).enumerate() {
                    let i = 2 * (x / 2);

                    dst.copy_from_slice(&yuv_to_rgb(luma, chroma_row[i], chroma_row[i + 1]));
                }
            }
        }
    }
}

/// Couples a [`FrameSource`] with the conversion loop: reads the frame at a
/// given index and decodes it in one call.
///
/// Errors from the source are surfaced per frame; a session looping over many
/// frames decides itself whether to abort or skip.
#[derive(Debug)]
pub struct FrameDecoder<R> {
    source: FrameSource<R>,
}

impl<R: Read + Seek> FrameDecoder<R> {
    pub fn new(source: FrameSource<R>) -> Self {
        Self { source }
    }

    pub fn layout(&self) -> FrameLayout {
        self.source.layout()
    }

    pub fn frame_count(&self) -> u64 {
        self.source.frame_count()
    }

    pub fn decode(&mut self, index: u64, output: Output) -> Result<Decoded, SourceError> {
        let frame = self.source.read_frame(index)?;

        let rgb = matches!(output, Output::Rgb | Output::Both).then(|| decode_rgb(&frame));
        let gray = matches!(output, Output::Gray | Output::Both).then(|| decode_gray(&frame));

        Ok(Decoded { rgb, gray })
    }

    pub fn decode_rgb(&mut self, index: u64) -> Result<RgbImage, SourceError> {
        Ok(decode_rgb(&self.source.read_frame(index)?))
    }

    pub fn decode_gray(&mut self, index: u64) -> Result<GrayImage, SourceError> {
        Ok(decode_gray(&self.source.read_frame(index)?))
    }

    pub fn source(&mut self) -> &mut FrameSource<R> {
        &mut self.source
    }

    pub fn into_source(self) -> FrameSource<R> {
        self.source
    }
}
