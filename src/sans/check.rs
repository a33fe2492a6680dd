//! Helpers for computing image checksums.

/// The outcome of comparing the checksum stored in an image against the value
/// recomputed over its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    /// The checksum stored in the image's trailing field.
    pub found: u32,
    /// The checksum recomputed over the image.
    pub calculated: u32,
}

impl Check {
    /// Whether the stored and recomputed checksums agree.
    pub fn matches(&self) -> bool {
        self.found == self.calculated
    }
}

/// Accumulate a slice of bytes into a running checksum value.
pub fn accumulate(init: u32, r: &[u8]) -> u32 {
    r.iter().fold(init, |acc, b| acc.wrapping_add(u32::from(*b)))
}

/// Finalize a running checksum value by two's-complement negation.
pub fn finalize(sum: u32) -> u32 {
    sum.wrapping_neg()
}

/// Compute the checksum of a complete image.
///
/// Sums every byte of the image, header included, excluding only the trailing
/// four-byte checksum field, then negates the sum.
pub fn checksum(r: &[u8]) -> u32 {
    let n = r.len().saturating_sub(4);

    finalize(accumulate(0, &r[..n]))
}
