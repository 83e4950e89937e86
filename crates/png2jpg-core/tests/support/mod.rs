#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Encode packed scanlines as a PNG, optionally with a palette and tRNS chunk.
pub fn encode_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    depth: png::BitDepth,
    palette: Option<&[u8]>,
    trns: Option<&[u8]>,
    data: &[u8],
) -> Vec<u8> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(depth);
        if let Some(palette) = palette {
            encoder.set_palette(palette.to_vec());
        }
        if let Some(trns) = trns {
            encoder.set_trns(trns.to_vec());
        }
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    bytes
}

/// Write `bytes` to `name` inside `dir` and return the path.
pub fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Decode a JPEG file into RGB triples.
pub fn read_jpeg(path: &Path) -> image::RgbImage {
    let bytes = std::fs::read(path).unwrap();
    assert_eq!(&bytes[0..2], &[0xFF, 0xD8], "not a JPEG");
    image::load_from_memory_with_format(&bytes, image::ImageFormat::Jpeg)
        .unwrap()
        .to_rgb8()
}

/// Assert every channel of `got` is within `tolerance` of `want`.
pub fn assert_close(got: [u8; 3], want: [u8; 3], tolerance: u8) {
    for (g, w) in got.iter().zip(want) {
        assert!(
            g.abs_diff(w) <= tolerance,
            "pixel {:?} not within {} of {:?}",
            got,
            tolerance,
            want
        );
    }
}

/// A minimal PNG whose IHDR declares arbitrary (possibly invalid) fields.
///
/// Chunk CRCs are valid, so only the field values make it unacceptable.
pub fn png_with_header(width: u32, height: u32, bit_depth: u8, color_type: u8) -> Vec<u8> {
    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[bit_depth, color_type, 0, 0, 0]);

    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    push_chunk(&mut bytes, b"IHDR", &ihdr);
    // zlib stream of a single empty stored block
    push_chunk(&mut bytes, b"IDAT", &[0x78, 0x01, 0x01, 0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x01]);
    push_chunk(&mut bytes, b"IEND", &[]);
    bytes
}

fn push_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    let mut crc_input = kind.to_vec();
    crc_input.extend_from_slice(data);
    out.extend_from_slice(&crc32(&crc_input).to_be_bytes());
}

fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}
