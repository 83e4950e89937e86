//! Transparency chunk (tRNS) resolution.
//!
//! Images without an alpha channel can still mark pixels transparent: a
//! single gray or RGB key for grayscale and truecolor images, or one alpha
//! byte per palette entry for palette images.

use crate::decode::{BitDepth, ColorType};

/// A parsed tRNS chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransparencyKey<'a> {
    /// No tRNS chunk, or one that does not apply to the color type.
    None,
    /// Gray value (at the stored bit depth) that is fully transparent.
    Gray(u16),
    /// RGB value (at the stored bit depth) that is fully transparent.
    Rgb([u16; 3]),
    /// Alpha per palette entry. Entries past the end are opaque.
    Palette(&'a [u8]),
}

impl<'a> TransparencyKey<'a> {
    /// Interpret raw tRNS bytes for the given color type.
    ///
    /// A chunk with the wrong length is ignored with a warning, as is a
    /// chunk on a color type that already has an alpha channel.
    pub(crate) fn parse(color_type: ColorType, depth: BitDepth, trns: Option<&'a [u8]>) -> Self {
        let Some(trns) = trns else {
            return TransparencyKey::None;
        };
        if color_type.has_alpha_channel() {
            log::warn!("ignoring tRNS chunk on {:?} image", color_type);
            return TransparencyKey::None;
        }
        let mask = depth.max_value();

        match (color_type, trns) {
            (ColorType::Grayscale, [hi, lo]) => {
                TransparencyKey::Gray(u16::from_be_bytes([*hi, *lo]) & mask)
            }
            (ColorType::Rgb, [r0, r1, g0, g1, b0, b1]) => TransparencyKey::Rgb([
                u16::from_be_bytes([*r0, *r1]) & mask,
                u16::from_be_bytes([*g0, *g1]) & mask,
                u16::from_be_bytes([*b0, *b1]) & mask,
            ]),
            (ColorType::Indexed, alpha) => TransparencyKey::Palette(alpha),
            (color_type, _) => {
                log::warn!(
                    "ignoring {}-byte tRNS chunk on {:?} image",
                    trns.len(),
                    color_type
                );
                TransparencyKey::None
            }
        }
    }

    /// Alpha of a gray pixel given its stored sample.
    #[inline]
    pub(crate) fn gray_alpha(&self, sample: u16) -> u8 {
        match self {
            TransparencyKey::Gray(key) if *key == sample => 0,
            _ => u8::MAX,
        }
    }

    /// Alpha of an RGB pixel given its stored samples.
    #[inline]
    pub(crate) fn rgb_alpha(&self, samples: [u16; 3]) -> u8 {
        match self {
            TransparencyKey::Rgb(key) if *key == samples => 0,
            _ => u8::MAX,
        }
    }

    /// Alpha of a palette entry.
    #[inline]
    pub(crate) fn palette_alpha(&self, index: u8) -> u8 {
        match self {
            TransparencyKey::Palette(alpha) => {
                alpha.get(index as usize).copied().unwrap_or(u8::MAX)
            }
            _ => u8::MAX,
        }
    }
}
