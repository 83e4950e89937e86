//! Sample extraction from packed PNG scanlines.

use crate::decode::BitDepth;

/// Read sample `index` from a packed row at its stored depth.
///
/// Sub-byte samples are packed most significant bit first; 16-bit samples
/// are big-endian.
#[inline]
pub(crate) fn read_sample(row: &[u8], index: usize, depth: BitDepth) -> u16 {
    match depth {
        BitDepth::Eight => row[index] as u16,
        BitDepth::Sixteen => u16::from_be_bytes([row[2 * index], row[2 * index + 1]]),
        packed => {
            let bits = packed.bits();
            let bit_offset = index * bits;
            let shift = 8 - bits - bit_offset % 8;
            (row[bit_offset / 8] >> shift) as u16 & packed.max_value()
        }
    }
}

/// Reduce a sample to 8 bits.
///
/// 16-bit samples keep their high byte. Sub-byte samples are scaled to the
/// full range, so the maximum at any depth maps to 255.
#[inline]
pub(crate) fn to_u8(value: u16, depth: BitDepth) -> u8 {
    match depth {
        BitDepth::Sixteen => (value >> 8) as u8,
        BitDepth::Eight => value as u8,
        packed => (value * (255 / packed.max_value())) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_one_bit() {
        let row = [0b1011_0001];
        let bits: Vec<u16> = (0..8).map(|i| read_sample(&row, i, BitDepth::One)).collect();
        assert_eq!(bits, vec![1, 0, 1, 1, 0, 0, 0, 1]);
    }

    #[test]
    fn test_read_two_bit() {
        let row = [0b11_10_01_00, 0b01_00_00_00];
        let samples: Vec<u16> = (0..5).map(|i| read_sample(&row, i, BitDepth::Two)).collect();
        assert_eq!(samples, vec![3, 2, 1, 0, 1]);
    }

    #[test]
    fn test_read_four_bit() {
        let row = [0xA5, 0xF0];
        assert_eq!(read_sample(&row, 0, BitDepth::Four), 0xA);
        assert_eq!(read_sample(&row, 1, BitDepth::Four), 0x5);
        assert_eq!(read_sample(&row, 2, BitDepth::Four), 0xF);
    }

    #[test]
    fn test_read_sixteen_bit_big_endian() {
        let row = [0x12, 0x34, 0xAB, 0xCD];
        assert_eq!(read_sample(&row, 0, BitDepth::Sixteen), 0x1234);
        assert_eq!(read_sample(&row, 1, BitDepth::Sixteen), 0xABCD);
    }

    #[test]
    fn test_to_u8_scaling() {
        assert_eq!(to_u8(0, BitDepth::One), 0);
        assert_eq!(to_u8(1, BitDepth::One), 255);
        assert_eq!(to_u8(1, BitDepth::Two), 85);
        assert_eq!(to_u8(2, BitDepth::Two), 170);
        assert_eq!(to_u8(3, BitDepth::Two), 255);
        assert_eq!(to_u8(7, BitDepth::Four), 119);
        assert_eq!(to_u8(15, BitDepth::Four), 255);
        assert_eq!(to_u8(200, BitDepth::Eight), 200);
    }

    #[test]
    fn test_to_u8_keeps_high_byte() {
        assert_eq!(to_u8(0xFFFF, BitDepth::Sixteen), 0xFF);
        assert_eq!(to_u8(0x80FF, BitDepth::Sixteen), 0x80);
        assert_eq!(to_u8(0x00FF, BitDepth::Sixteen), 0x00);
    }
}
