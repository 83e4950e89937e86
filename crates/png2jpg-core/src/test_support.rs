//! Fixture helpers shared by unit tests.

/// Encode packed scanlines as a PNG with the given color type and depth.
pub(crate) fn encode_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    depth: png::BitDepth,
    data: &[u8],
) -> Vec<u8> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(depth);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    bytes
}
