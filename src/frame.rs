use crate::{FrameLayout, PlaneOffsets};

/// Everything that can go wrong when constructing a [`RawFrame`]
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("buffer holds {got} bytes but the layout requires exactly {expected}")]
    SizeMismatch { expected: usize, got: usize },
}

/// Error indicating a pixel coordinate outside the frame bounds
#[derive(Debug, thiserror::Error)]
#[error("sample coordinate ({x}, {y}) is outside the {width}x{height} frame")]
pub struct SampleOutOfBounds {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Borrowed view of the planes inside one frame's byte buffer
#[derive(Debug, Clone, Copy)]
pub enum FramePlanes<'a> {
    I420 {
        y: &'a [u8],
        u: &'a [u8],
        v: &'a [u8],
    },
    Nv12 {
        y: &'a [u8],
        uv: &'a [u8],
    },
}

/// One frame's raw bytes, exactly `frame_size` of them
///
/// Transient per-frame buffer produced by [`FrameSource`](crate::FrameSource)
/// (or built from caller supplied bytes) and consumed by the decode functions.
#[derive(Debug, Clone)]
pub struct RawFrame {
    layout: FrameLayout,
    buf: Vec<u8>,
}

impl RawFrame {
    /// Wrap an in-memory frame buffer.
    ///
    /// `buf` must hold exactly [`FrameLayout::frame_size`] bytes.
    pub fn from_bytes(layout: FrameLayout, buf: Vec<u8>) -> Result<Self, FrameError> {
        if buf.len() != layout.frame_size() {
            return Err(FrameError::SizeMismatch {
                expected: layout.frame_size(),
                got: buf.len(),
            });
        }

        Ok(Self { layout, buf })
    }

    pub fn layout(&self) -> FrameLayout {
        self.layout
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Split the buffer into its planes
    pub fn planes(&self) -> FramePlanes<'_> {
        match self.layout.plane_offsets() {
            PlaneOffsets::I420 { y, u, v } => {
                let chroma = self.layout.chroma_plane_size();

                FramePlanes::I420 {
                    y: &self.buf[y..u],
                    u: &self.buf[u..v],
                    v: &self.buf[v..v + chroma],
                }
            }
            PlaneOffsets::Nv12 { y, uv } => FramePlanes::Nv12 {
                y: &self.buf[y..uv],
                uv: &self.buf[uv..],
            },
        }
    }

    fn bounds_check(&self, x: usize, y: usize) -> Result<(), SampleOutOfBounds> {
        if x >= self.layout.width() || y >= self.layout.height() {
            return Err(SampleOutOfBounds {
                x,
                y,
                width: self.layout.width(),
                height: self.layout.height(),
            });
        }

        Ok(())
    }

    /// Luma sample at the given pixel coordinate
    pub fn luma(&self, x: usize, y: usize) -> Result<u8, SampleOutOfBounds> {
        self.bounds_check(x, y)?;

        let (FramePlanes::I420 { y: luma, .. } | FramePlanes::Nv12 { y: luma, .. }) = self.planes();

        Ok(luma[y * self.layout.width() + x])
    }

    /// Chroma (U, V) pair applying to the given pixel coordinate.
    ///
    /// Every 2x2 block of luma samples shares one chroma pair, so this is a
    /// nearest-neighbor lookup at `(x / 2, y / 2)`. Interpolating
    /// reconstruction would change output pixel values and is deliberately
    /// not offered.
    pub fn chroma(&self, x: usize, y: usize) -> Result<(u8, u8), SampleOutOfBounds> {
        self.bounds_check(x, y)?;

        let (col, row) = (x / 2, y / 2);

        match self.planes() {
            FramePlanes::I420 { u, v, .. } => {
                let idx = row * (self.layout.width() / 2) + col;

                Ok((u[idx], v[idx]))
            }
            FramePlanes::Nv12 { uv, .. } => {
                // One interleaved plane of U0 V0 U1 V1 .. pairs
                let idx = row * self.layout.width() + 2 * col;

                Ok((uv[idx], uv[idx + 1]))
            }
        }
    }
}
