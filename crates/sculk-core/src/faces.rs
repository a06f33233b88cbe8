use serde::{Deserialize, Serialize};

use crate::direction::{Direction, ALL_DIRECTIONS};

/// A set of block faces packed into the low 6 bits of a byte.
///
/// Bit `d.bit()` is set when face `d` is present. Used both for the faces a
/// vein block covers and for the cached facings carried by a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceSet(u8);

impl FaceSet {
    pub const EMPTY: FaceSet = FaceSet(0);
    pub const ALL: FaceSet = FaceSet(0b11_1111);

    /// Build from a packed mask. Returns `None` if bits above the sixth are set.
    pub fn from_bits(bits: u8) -> Option<FaceSet> {
        if bits & !Self::ALL.0 != 0 {
            None
        } else {
            Some(FaceSet(bits))
        }
    }

    pub fn single(dir: Direction) -> FaceSet {
        FaceSet(1 << dir.bit())
    }

    /// Packed mask, as carried by spread events.
    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, dir: Direction) -> bool {
        self.0 & (1 << dir.bit()) != 0
    }

    pub fn with(self, dir: Direction) -> FaceSet {
        FaceSet(self.0 | (1 << dir.bit()))
    }

    pub fn without(self, dir: Direction) -> FaceSet {
        FaceSet(self.0 & !(1 << dir.bit()))
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        ALL_DIRECTIONS.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Direction> for FaceSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter().fold(FaceSet::EMPTY, FaceSet::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bits_rejects_high_bits() {
        assert_eq!(FaceSet::from_bits(0b11_1111), Some(FaceSet::ALL));
        assert_eq!(FaceSet::from_bits(0b100_0000), None);
    }

    #[test]
    fn test_with_without() {
        let set = FaceSet::EMPTY.with(Direction::Down).with(Direction::East);
        assert!(set.contains(Direction::Down));
        assert!(set.contains(Direction::East));
        assert!(!set.contains(Direction::Up));
        assert_eq!(set.len(), 2);
        assert_eq!(set.bits(), 0b10_0001);
        let set = set.without(Direction::Down);
        assert_eq!(set, FaceSet::single(Direction::East));
    }

    #[test]
    fn test_iter_collect() {
        let set: FaceSet = [Direction::North, Direction::Up].into_iter().collect();
        let dirs: Vec<Direction> = set.iter().collect();
        assert_eq!(dirs, vec![Direction::Up, Direction::North]);
    }
}
