//! Footprint enumeration: rotations, translations and free segments

use crate::grid::{Cell, GRID_SIZE};

use super::types::{PlacementMask, mask_of};

/// Rotate offsets by `quarter_turns` × 90° and shift them back so the
/// smallest row and column are both 0
pub fn rotate(offsets: &[(i32, i32)], quarter_turns: u8) -> Vec<(i32, i32)> {
    let rotated: Vec<(i32, i32)> = offsets
        .iter()
        .map(|&(r, c)| match quarter_turns % 4 {
            0 => (r, c),
            1 => (-c, r),
            2 => (-r, -c),
            _ => (c, -r),
        })
        .collect();

    let min_r = rotated.iter().map(|&(r, _)| r).min().unwrap_or(0);
    let min_c = rotated.iter().map(|&(_, c)| c).min().unwrap_or(0);
    rotated
        .into_iter()
        .map(|(r, c)| (r - min_r, c - min_c))
        .collect()
}

/// Every translation of a normalised footprint that stays on the board
pub fn translations(footprint: &[(i32, i32)]) -> Vec<PlacementMask> {
    let size = GRID_SIZE as i32;
    let max_r = footprint.iter().map(|&(r, _)| r).max().unwrap_or(0);
    let max_c = footprint.iter().map(|&(_, c)| c).max().unwrap_or(0);

    let mut masks = Vec::new();
    for start_r in 0..(size - max_r).max(0) {
        for start_c in 0..(size - max_c).max(0) {
            let cells = footprint
                .iter()
                .filter_map(|&(r, c)| Cell::new((start_r + r).into(), (start_c + c).into()).ok());
            masks.push(mask_of(cells));
        }
    }
    masks
}

/// All four rotations of a rigid footprint at every position.
///
/// Rotations are not deduplicated, so a shape with rotational symmetry
/// contributes the same cells more than once.
pub fn rigid_placements(offsets: &[(i32, i32)]) -> Vec<PlacementMask> {
    (0..4)
        .flat_map(|turns| translations(&rotate(offsets, turns)))
        .collect()
}

/// Every straight run of `len` cells, along rows and along columns
pub fn straight_segments(len: usize) -> Vec<PlacementMask> {
    if len == 0 || len > GRID_SIZE {
        return Vec::new();
    }
    let span = GRID_SIZE - len + 1;
    let mut segments = Vec::with_capacity(2 * GRID_SIZE * span);
    for line in 0..GRID_SIZE {
        for start in 0..span {
            let along_col =
                (start..start + len).filter_map(|r| Cell::new(r as i64, line as i64).ok());
            segments.push(mask_of(along_col));
        }
    }
    for line in 0..GRID_SIZE {
        for start in 0..span {
            let along_row =
                (start..start + len).filter_map(|c| Cell::new(line as i64, c as i64).ok());
            segments.push(mask_of(along_row));
        }
    }
    segments
}

/// Pairs of one `long` segment and one non-overlapping `short` segment
pub fn segment_pair_placements(long: usize, short: usize) -> Vec<PlacementMask> {
    let shorts = straight_segments(short);
    straight_segments(long)
        .into_iter()
        .flat_map(|a| {
            shorts
                .iter()
                .filter(move |&&b| a & b == 0)
                .map(move |&b| a | b)
        })
        .collect()
}
