//! Packed tile-cell decoding.
//!
//! Tiled stores each placed tile as a 32-bit GID whose top three bits record how the
//! tile is mirrored. [`decode_cell`] splits such a value into the clean GID and a
//! one-byte [`FlipFlags`] so per-cell flag checks are a single byte mask.

use bitflags::bitflags;

use crate::error::DocumentError;

/// Bit 31 of a raw cell: mirrored horizontally.
pub const FLIPPED_HORIZONTALLY: u32 = 0x8000_0000;
/// Bit 30 of a raw cell: mirrored vertically.
pub const FLIPPED_VERTICALLY: u32 = 0x4000_0000;
/// Bit 29 of a raw cell: transposed along the (anti-)diagonal.
pub const FLIPPED_DIAGONALLY: u32 = 0x2000_0000;

/// All orientation bits of a raw cell.
pub const FLIP_MASK: u32 = FLIPPED_HORIZONTALLY | FLIPPED_VERTICALLY | FLIPPED_DIAGONALLY;

/// Shift that moves the orientation bits into bits 2..0 of a byte.
const FLIP_SHIFT: u32 = 29;

bitflags! {
    /// Orientation of a placed tile, packed into the low three bits of a byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FlipFlags: u8 {
        const HORIZONTAL = 0b100;
        const VERTICAL = 0b010;
        const DIAGONAL = 0b001;
    }
}

/// Split a raw cell value into `(clean gid, flip flags)`.
pub const fn decode_cell(raw: u32) -> (u32, FlipFlags) {
    let flags = ((raw & FLIP_MASK) >> FLIP_SHIFT) as u8;
    (raw & !FLIP_MASK, FlipFlags::from_bits_retain(flags))
}

/// Pack a clean gid and its flip flags back into a raw cell value.
pub const fn encode_cell(gid: u32, flags: FlipFlags) -> u32 {
    (gid & !FLIP_MASK) | (((flags.bits() & 0b111) as u32) << FLIP_SHIFT)
}

/// Decode comma-separated cell text into parallel gid and flag arrays.
///
/// Whitespace around tokens (Tiled writes one row per line) is ignored. Text that is
/// entirely blank yields no cells.
pub(crate) fn decode_csv(
    layer: &str,
    text: &str,
) -> Result<(Vec<u32>, Vec<FlipFlags>), DocumentError> {
    if text.trim().is_empty() {
        return Ok((Vec::new(), Vec::new()));
    }

    let tokens = text.split(',');
    let (lower, _) = tokens.size_hint();
    let mut cells = Vec::with_capacity(lower);
    let mut flip_flags = Vec::with_capacity(lower);

    for (index, token) in tokens.enumerate() {
        let raw: u32 = token
            .trim()
            .parse()
            .map_err(|_| DocumentError::InvalidCell {
                layer: layer.to_owned(),
                index,
                value: token.trim().to_owned(),
            })?;
        let (gid, flags) = decode_cell(raw);
        cells.push(gid);
        flip_flags.push(flags);
    }

    Ok((cells, flip_flags))
}
