use crate::{FrameLayout, RawFrame};
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Everything that can go wrong when reading frames from a stream
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("stream holds {stream_len} bytes which is less than one {frame_size} byte frame")]
    EmptyStream { stream_len: u64, frame_size: u64 },

    #[error("frame index {index} is out of range, the stream holds {frame_count} complete frames")]
    OutOfRange { index: u64, frame_count: u64 },

    #[error("stream ended mid-frame while reading frame {index}")]
    ShortRead { index: u64 },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Reads fixed-size frames out of a finite, seekable byte stream.
///
/// The stream is a flat sequence of `frame_size` byte frames with no headers
/// or delimiters. A trailing partial frame (fewer than `frame_size` bytes
/// after the last complete frame) is not a frame and is excluded from
/// [`frame_count`](Self::frame_count).
///
/// Reading moves the stream cursor, so a `FrameSource` must be driven from
/// one place at a time; parallel consumers each need their own handle to the
/// underlying file.
#[derive(Debug)]
pub struct FrameSource<R> {
    reader: R,
    layout: FrameLayout,
    frame_count: u64,
}

impl FrameSource<BufReader<File>> {
    /// Open a raw frame file
    pub fn open(path: impl AsRef<Path>, layout: FrameLayout) -> Result<Self, SourceError> {
        Self::new(BufReader::new(File::open(path)?), layout)
    }
}

impl<R: Read + Seek> FrameSource<R> {
    pub fn new(mut reader: R, layout: FrameLayout) -> Result<Self, SourceError> {
        let stream_len = reader.seek(SeekFrom::End(0))?;
        reader.rewind()?;

        let frame_size = layout.frame_size() as u64;

        if stream_len < frame_size {
            return Err(SourceError::EmptyStream {
                stream_len,
                frame_size,
            });
        }

        let frame_count = stream_len / frame_size;

        tracing::debug!(
            stream_len,
            frame_size,
            frame_count,
            "found {frame_count} complete frames"
        );

        Ok(Self {
            reader,
            layout,
            frame_count,
        })
    }

    pub fn layout(&self) -> FrameLayout {
        self.layout
    }

    /// Number of *complete* frames in the stream
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Read the frame at `index` into an owned buffer.
    ///
    /// A stream that ends mid-frame despite `index` passing the
    /// [`frame_count`](Self::frame_count) bound was truncated after it was
    /// measured; that is reported as [`SourceError::ShortRead`] and never
    /// retried.
    pub fn read_frame(&mut self, index: u64) -> Result<RawFrame, SourceError> {
        if index >= self.frame_count {
            return Err(SourceError::OutOfRange {
                index,
                frame_count: self.frame_count,
            });
        }

        let frame_size = self.layout.frame_size();

        self.reader
            .seek(SeekFrom::Start(index * frame_size as u64))?;

        let mut buf = vec![0u8; frame_size];

        self.reader.read_exact(&mut buf).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                SourceError::ShortRead { index }
            } else {
                SourceError::Io(e)
            }
        })?;

        Ok(RawFrame::from_bytes(self.layout, buf).expect("buffer was sized from the layout"))
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}
