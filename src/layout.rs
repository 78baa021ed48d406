/// Supported raw frame layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FrameFormat {
    /// Y, U and V planes, 4:2:0 sub sampling, 8 bits per sample
    I420,

    /// Y and interleaved UV planes, 4:2:0 sub sampling, 8 bits per sample
    NV12,
}

/// Description for a plane, used to implement frame size and offset calculation.
///
/// Not used for the implementation of the decode loop, only utility functions.
#[derive(Clone, Copy)]
pub(crate) struct PlaneDesc {
    pub(crate) width_op: Op,
    pub(crate) height_op: Op,
}

impl PlaneDesc {
    pub(crate) fn size(&self, width: usize, height: usize) -> usize {
        self.width_op.op(width) * self.height_op.op(height)
    }
}

/// Plane's number of samples in relation to width / height
#[derive(Clone, Copy)]
pub(crate) enum Op {
    Div(usize),
    Identity,
}

impl Op {
    pub(crate) fn op(self, lhs: usize) -> usize {
        match self {
            Op::Div(rhs) => lhs / rhs,
            Op::Identity => lhs,
        }
    }
}

pub(crate) const I420_PLANES: [PlaneDesc; 3] = [
    PlaneDesc {
        width_op: Op::Identity,
        height_op: Op::Identity,
    },
    PlaneDesc {
        width_op: Op::Div(2),
        height_op: Op::Div(2),
    },
    PlaneDesc {
        width_op: Op::Div(2),
        height_op: Op::Div(2),
    },
];

pub(crate) const NV12_PLANES: [PlaneDesc; 2] = [
    PlaneDesc {
        width_op: Op::Identity,
        height_op: Op::Identity,
    },
    PlaneDesc {
        width_op: Op::Identity,
        height_op: Op::Div(2),
    },
];

impl FrameFormat {
    pub(crate) fn plane_desc(&self) -> &'static [PlaneDesc] {
        match self {
            FrameFormat::I420 => &I420_PLANES,
            FrameFormat::NV12 => &NV12_PLANES,
        }
    }

    pub(crate) fn variants() -> impl IntoIterator<Item = Self> {
        [FrameFormat::I420, FrameFormat::NV12]
    }
}

/// Everything that can go wrong when constructing a [`FrameLayout`]
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("width or height must not be zero")]
    InvalidDimensions,

    #[error("4:2:0 sub sampling requires even dimensions, got {width}x{height}")]
    OddDimensions { width: usize, height: usize },
}

/// Byte layout of a single frame in a raw YUV stream.
///
/// Immutable value describing where each plane of a `width` x `height` frame
/// lives inside its `frame_size` byte range. Constructed once per stream and
/// shared by every frame read from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    width: usize,
    height: usize,
    format: FrameFormat,
}

/// Byte offsets of each plane, relative to the start of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneOffsets {
    I420 { y: usize, u: usize, v: usize },
    Nv12 { y: usize, uv: usize },
}

impl FrameLayout {
    pub fn new(width: usize, height: usize, format: FrameFormat) -> Result<Self, LayoutError> {
        if width == 0 || height == 0 {
            return Err(LayoutError::InvalidDimensions);
        }

        // Chroma planes are half resolution in both dimensions, which only
        // divides exactly for even luma dimensions
        if width % 2 != 0 || height % 2 != 0 {
            return Err(LayoutError::OddDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            format,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn format(&self) -> FrameFormat {
        self.format
    }

    /// Size of the Y plane in bytes
    pub fn luma_size(&self) -> usize {
        self.width * self.height
    }

    /// Size of a single half-resolution chroma plane in bytes
    pub fn chroma_plane_size(&self) -> usize {
        self.luma_size() / 4
    }

    /// Total size of one frame in bytes
    pub fn frame_size(&self) -> usize {
        self.format
            .plane_desc()
            .iter()
            .map(|desc| desc.size(self.width, self.height))
            .sum()
    }

    /// Calculate the byte offset of every plane within one frame
    pub fn plane_offsets(&self) -> PlaneOffsets {
        let luma_size = self.luma_size();

        match self.format {
            FrameFormat::I420 => PlaneOffsets::I420 {
                y: 0,
                u: luma_size,
                v: luma_size + self.chroma_plane_size(),
            },
            FrameFormat::NV12 => PlaneOffsets::Nv12 {
                y: 0,
                uv: luma_size,
            },
        }
    }
}
