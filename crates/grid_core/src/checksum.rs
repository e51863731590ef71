//! Cheap change-detection checksum over cell colors. Not cryptographic.

use shared::domain::{CellEncoding, ChecksumScheme, Color};

fn encode(color: Color, encoding: CellEncoding) -> u64 {
    let name = color.name().as_bytes();
    match encoding {
        CellEncoding::FullName => name.iter().map(|b| u64::from(*b)).sum(),
        CellEncoding::Initial => name.first().map(|b| u64::from(*b)).unwrap_or(0),
    }
}

/// Depends only on the cell sequence and the scheme. `scheme.modulus` must be
/// non-zero; a zero modulus yields 0.
pub fn checksum(cells: &[Color], scheme: ChecksumScheme) -> u32 {
    if scheme.modulus == 0 {
        return 0;
    }
    let total: u64 = cells
        .iter()
        .map(|color| encode(*color, scheme.encoding))
        .sum();
    (total % u64::from(scheme.modulus)) as u32
}
