//! Permutation tables used for lattice corner hashing.

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::errors::{Result, TerrainError};

/// A permutation of `0..=255`.
///
/// The only way to obtain a value is through a constructor that guarantees
/// every byte appears exactly once, so gradient selection stays uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermutationTable([u8; 256]);

impl PermutationTable {
    /// Ken Perlin's reference permutation, the table the mountain scenes ship with.
    pub const CANONICAL: PermutationTable = PermutationTable([
        151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225,
        140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148,
        247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32,
        57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
        74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
        60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54,
        65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169,
        200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64,
        52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
        207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213,
        119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9,
        129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104,
        218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
        81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
        184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
        222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
    ]);

    /// Builds a table from arbitrary values, rejecting anything that is not
    /// a permutation of `0..=255`.
    pub fn new(values: &[u8]) -> Result<Self> {
        if values.len() != 256 {
            return Err(TerrainError::InvalidTable(format!(
                "expected 256 entries, got {}",
                values.len()
            )));
        }

        let mut seen = [false; 256];
        for &value in values {
            if std::mem::replace(&mut seen[value as usize], true) {
                return Err(TerrainError::InvalidTable(format!(
                    "value {value} appears more than once"
                )));
            }
        }

        let mut table = [0u8; 256];
        table.copy_from_slice(values);
        Ok(Self(table))
    }

    /// Deterministically shuffles the identity permutation with the given seed.
    pub fn shuffled(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut table: [u8; 256] = std::array::from_fn(|i| i as u8);
        table.shuffle(&mut rng);
        Self(table)
    }

    pub const fn as_array(&self) -> &[u8; 256] {
        &self.0
    }

    /// Expands the table to 512 entries so `p[p[X] + Y + 1]` never overflows.
    pub(crate) const fn doubled(&self) -> [u8; 512] {
        let mut out = [0u8; 512];
        let mut i = 0;
        while i < 512 {
            out[i] = self.0[i & 255];
            i += 1;
        }
        out
    }
}

impl Default for PermutationTable {
    fn default() -> Self {
        Self::CANONICAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_permutation(values: &[u8; 256]) -> bool {
        let mut sorted = *values;
        sorted.sort_unstable();
        sorted.iter().enumerate().all(|(i, &v)| v as usize == i)
    }

    #[test]
    fn test_canonical_is_permutation() {
        assert!(is_permutation(PermutationTable::CANONICAL.as_array()));
        assert!(PermutationTable::new(PermutationTable::CANONICAL.as_array()).is_ok());
    }

    #[test]
    fn test_rejects_duplicates() {
        let mut values = *PermutationTable::CANONICAL.as_array();
        values[1] = values[0];
        let err = PermutationTable::new(&values).unwrap_err();
        assert!(matches!(err, TerrainError::InvalidTable(_)));
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(PermutationTable::new(&[0, 1, 2]).is_err());
        assert!(PermutationTable::new(&[0u8; 512]).is_err());
    }

    #[test]
    fn test_shuffled_is_deterministic_permutation() {
        let a = PermutationTable::shuffled(7);
        let b = PermutationTable::shuffled(7);
        let c = PermutationTable::shuffled(8);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(is_permutation(a.as_array()));
    }

    #[test]
    fn test_doubled_wraps() {
        let doubled = PermutationTable::CANONICAL.doubled();
        for i in 0..256 {
            assert_eq!(doubled[i], doubled[i + 256]);
        }
        assert_eq!(doubled[0], 151);
        assert_eq!(doubled[511], 180);
    }
}
