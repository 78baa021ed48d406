use rawyuv::{
    FrameDecoder, FrameFormat, FrameLayout, FrameSource, Output, RawFrame, SourceError,
    decode_gray, decode_rgb,
};
use std::io::{Cursor, Read, Seek, SeekFrom};

fn layout(width: usize, height: usize, format: FrameFormat) -> FrameLayout {
    FrameLayout::new(width, height, format).unwrap()
}

/// Build one I420 frame from per-plane byte lists
fn i420_frame(layout: FrameLayout, y: &[u8], u: &[u8], v: &[u8]) -> RawFrame {
    assert_eq!(y.len(), layout.luma_size());
    assert_eq!(u.len(), layout.chroma_plane_size());
    assert_eq!(v.len(), layout.chroma_plane_size());

    let buf = [y, u, v].concat();

    RawFrame::from_bytes(layout, buf).unwrap()
}

/// Build one NV12 frame from a luma plane and (U, V) pairs
fn nv12_frame(layout: FrameLayout, y: &[u8], uv_pairs: &[(u8, u8)]) -> RawFrame {
    assert_eq!(y.len(), layout.luma_size());
    assert_eq!(uv_pairs.len(), layout.chroma_plane_size());

    let mut buf = y.to_vec();
    for &(u, v) in uv_pairs {
        buf.push(u);
        buf.push(v);
    }

    RawFrame::from_bytes(layout, buf).unwrap()
}

#[test]
fn trailing_partial_frame_is_not_a_frame() {
    let layout = layout(4, 4, FrameFormat::I420);
    let frame_size = layout.frame_size();

    for trailing in [0, 1, frame_size - 1] {
        let stream = Cursor::new(vec![0u8; 5 * frame_size + trailing]);
        let mut source = FrameSource::new(stream, layout).unwrap();

        assert_eq!(source.frame_count(), 5);
        assert!(source.read_frame(4).is_ok());
        assert!(matches!(
            source.read_frame(5),
            Err(SourceError::OutOfRange { .. })
        ));
    }
}

#[test]
fn studio_black_frame_decodes_to_pure_black() {
    let layout = layout(2, 2, FrameFormat::I420);
    let frame = i420_frame(layout, &[16, 16, 16, 16], &[128], &[128]);

    let rgb = decode_rgb(&frame);

    for x in 0..2 {
        for y in 0..2 {
            assert_eq!(rgb.pixel(x, y), [0, 0, 0]);
        }
    }
}

#[test]
fn studio_white_frame_decodes_to_pure_white() {
    let layout = layout(2, 2, FrameFormat::I420);
    let frame = i420_frame(layout, &[235, 235, 235, 235], &[128], &[128]);

    let rgb = decode_rgb(&frame);

    for x in 0..2 {
        for y in 0..2 {
            assert_eq!(rgb.pixel(x, y), [255, 255, 255]);
        }
    }
}

#[test]
fn chroma_is_constant_within_each_2x2_block() {
    let layout = layout(4, 4, FrameFormat::I420);

    // Constant luma, a distinct chroma pair per 2x2 block
    let frame = i420_frame(
        layout,
        &[128; 16],
        &[32, 96, 160, 224],
        &[224, 160, 96, 32],
    );

    let rgb = decode_rgb(&frame);

    for block_y in 0..2 {
        for block_x in 0..2 {
            let expected = rgb.pixel(block_x * 2, block_y * 2);

            // Nearest-neighbor reconstruction, all 4 pixels of the block match
            for dy in 0..2 {
                for dx in 0..2 {
                    assert_eq!(rgb.pixel(block_x * 2 + dx, block_y * 2 + dy), expected);
                }
            }
        }
    }

    // And the blocks themselves differ
    assert_ne!(rgb.pixel(0, 0), rgb.pixel(2, 0));
    assert_ne!(rgb.pixel(0, 0), rgb.pixel(0, 2));
}

#[test]
fn out_of_gamut_values_saturate() {
    let layout = layout(2, 2, FrameFormat::I420);

    // Black luma with maximum V drives green and blue below zero
    let frame = i420_frame(layout, &[16; 4], &[128], &[255]);
    let rgb = decode_rgb(&frame);

    assert_eq!(rgb.pixel(0, 0), [203, 0, 0]);

    // Max luma and chroma overflow the red channel upwards
    let frame = i420_frame(layout, &[255; 4], &[255], &[255]);
    assert_eq!(decode_rgb(&frame).pixel(0, 0)[0], 255);
}

#[test]
fn grayscale_is_the_luma_plane() {
    let layout = layout(4, 2, FrameFormat::I420);
    let luma: Vec<u8> = (0..8).map(|i| i * 30).collect();

    let frame = i420_frame(layout, &luma, &[128; 2], &[128; 2]);
    let gray = decode_gray(&frame);

    assert_eq!(gray.data(), &luma[..]);
    assert_eq!(gray.pixel(3, 1), 210);
}

#[test]
fn nv12_and_i420_decode_identically() {
    let layout_i420 = layout(4, 4, FrameFormat::I420);
    let layout_nv12 = layout(4, 4, FrameFormat::NV12);

    let luma: Vec<u8> = (0..16).map(|i| 16 + i * 13).collect();
    let u = [50, 100, 150, 200];
    let v = [210, 140, 70, 35];

    let i420 = i420_frame(layout_i420, &luma, &u, &v);
    let nv12 = nv12_frame(
        layout_nv12,
        &luma,
        &[(50, 210), (100, 140), (150, 70), (200, 35)],
    );

    assert_eq!(decode_rgb(&i420).data(), decode_rgb(&nv12).data());
    assert_eq!(decode_gray(&i420).data(), decode_gray(&nv12).data());
}

#[test]
fn decode_matches_per_pixel_sampling() {
    let layout = layout(6, 4, FrameFormat::NV12);

    let buf: Vec<u8> = (0..layout.frame_size()).map(|i| (i * 37 % 256) as u8).collect();
    let frame = RawFrame::from_bytes(layout, buf).unwrap();

    let rgb = decode_rgb(&frame);

    for y in 0..4 {
        for x in 0..6 {
            let luma = frame.luma(x, y).unwrap();
            let (u, v) = frame.chroma(x, y).unwrap();

            assert_eq!(rgb.pixel(x, y), rawyuv::yuv_to_rgb(luma, u, v));
        }
    }
}

#[cfg(feature = "multi-thread")]
#[test]
fn multi_thread_decode_matches_single_thread() {
    let layout = layout(64, 36, FrameFormat::I420);

    let buf: Vec<u8> = (0..layout.frame_size()).map(|i| (i * 31 % 256) as u8).collect();
    let frame = RawFrame::from_bytes(layout, buf).unwrap();

    assert_eq!(
        rawyuv::decode_rgb_multi_thread(&frame).data(),
        decode_rgb(&frame).data()
    );
}

#[test]
fn decoder_populates_requested_outputs() {
    let layout = layout(2, 2, FrameFormat::I420);
    let stream = Cursor::new(vec![128u8; 2 * layout.frame_size()]);

    let mut decoder = FrameDecoder::new(FrameSource::new(stream, layout).unwrap());

    let rgb_only = decoder.decode(0, Output::Rgb).unwrap();
    assert!(rgb_only.rgb.is_some() && rgb_only.gray.is_none());

    let gray_only = decoder.decode(0, Output::Gray).unwrap();
    assert!(gray_only.rgb.is_none() && gray_only.gray.is_some());

    let both = decoder.decode(1, Output::Both).unwrap();
    assert!(both.rgb.is_some() && both.gray.is_some());

    assert!(matches!(
        decoder.decode(2, Output::Both),
        Err(SourceError::OutOfRange { .. })
    ));
}

#[test]
fn decoded_buffers_round_trip_through_image_files() {
    let layout = layout(4, 4, FrameFormat::I420);

    let luma: Vec<u8> = (0..16).map(|i| 16 + i * 13).collect();
    let frame = i420_frame(layout, &luma, &[50, 100, 150, 200], &[210, 140, 70, 35]);

    // RGB buffer through a real PNG and back
    let rgb = decode_rgb(&frame);

    let buffer = image::RgbImage::from_raw(4, 4, rgb.data().to_vec())
        .expect("decoded buffer must match its advertised dimensions");

    let mut png = Vec::new();
    buffer
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();

    let restored = image::load_from_memory(&png).unwrap().into_rgb8();
    assert_eq!(restored.as_raw(), rgb.data());

    // Grayscale the same way
    let gray = decode_gray(&frame);

    let buffer = image::GrayImage::from_raw(4, 4, gray.data().to_vec())
        .expect("decoded buffer must match its advertised dimensions");

    let mut png = Vec::new();
    buffer
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();

    let restored = image::load_from_memory(&png).unwrap().into_luma8();
    assert_eq!(restored.as_raw(), gray.data());
}

/// Stream that claims more bytes than it can deliver, standing in for a file
/// truncated after it was measured
struct LyingStream {
    inner: Cursor<Vec<u8>>,
    claimed_len: u64,
}

impl Read for LyingStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Seek for LyingStream {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        match pos {
            SeekFrom::End(offset) => Ok(self.claimed_len.checked_add_signed(offset).unwrap()),
            pos => self.inner.seek(pos),
        }
    }
}

#[test]
fn truncated_stream_is_a_short_read() {
    let layout = layout(4, 4, FrameFormat::I420);
    let frame_size = layout.frame_size();

    let stream = LyingStream {
        inner: Cursor::new(vec![0u8; frame_size + frame_size / 2]),
        claimed_len: 2 * frame_size as u64,
    };

    let mut source = FrameSource::new(stream, layout).unwrap();
    assert_eq!(source.frame_count(), 2);

    assert!(source.read_frame(0).is_ok());
    assert!(matches!(
        source.read_frame(1),
        Err(SourceError::ShortRead { index: 1 })
    ));
}
