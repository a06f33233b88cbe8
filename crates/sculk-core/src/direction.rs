use glam::IVec3;
use serde::{Deserialize, Serialize};

/// One of the 6 axis directions. Discriminants are the bit positions used
/// when a set of faces is packed into a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    Down = 0,
    Up = 1,
    North = 2,
    South = 3,
    West = 4,
    East = 5,
}

/// All 6 directions in packing order.
pub const ALL_DIRECTIONS: [Direction; 6] = [
    Direction::Down,
    Direction::Up,
    Direction::North,
    Direction::South,
    Direction::West,
    Direction::East,
];

impl Direction {
    /// Offset vector for this direction. Y-up convention: Down = (0,-1,0).
    pub fn offset(self) -> IVec3 {
        match self {
            Direction::Down => IVec3::new(0, -1, 0),
            Direction::Up => IVec3::new(0, 1, 0),
            Direction::North => IVec3::new(0, 0, -1),
            Direction::South => IVec3::new(0, 0, 1),
            Direction::West => IVec3::new(-1, 0, 0),
            Direction::East => IVec3::new(1, 0, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    /// Bit index of this direction in a packed face mask.
    pub fn bit(self) -> u8 {
        self as u8
    }

    /// Direction along the X axis pointing toward the sign of `component`.
    pub fn along_x(component: i32) -> Direction {
        if component < 0 {
            Direction::West
        } else {
            Direction::East
        }
    }

    /// Direction along the Y axis pointing toward the sign of `component`.
    pub fn along_y(component: i32) -> Direction {
        if component < 0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }

    /// Direction along the Z axis pointing toward the sign of `component`.
    pub fn along_z(component: i32) -> Direction {
        if component < 0 {
            Direction::North
        } else {
            Direction::South
        }
    }
}

/// Classification of a neighbour offset by how many axes it moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighbourKind {
    Face,
    Edge,
    Corner,
}

/// Classify a unit offset. Returns `None` for the zero offset or anything
/// outside the 3x3x3 neighbourhood.
pub fn neighbour_kind(offset: IVec3) -> Option<NeighbourKind> {
    if offset.abs().max_element() != 1 {
        return None;
    }
    match offset.abs().element_sum() {
        1 => Some(NeighbourKind::Face),
        2 => Some(NeighbourKind::Edge),
        _ => Some(NeighbourKind::Corner),
    }
}

/// The 18 face and edge neighbour offsets (the 3x3x3 cube minus its centre
/// and 8 corners), enumerated in (x, y, z) order.
pub const NON_CORNER_OFFSETS: [IVec3; 18] = [
    IVec3::new(-1, -1, 0),
    IVec3::new(-1, 0, -1),
    IVec3::new(-1, 0, 0),
    IVec3::new(-1, 0, 1),
    IVec3::new(-1, 1, 0),
    IVec3::new(0, -1, -1),
    IVec3::new(0, -1, 0),
    IVec3::new(0, -1, 1),
    IVec3::new(0, 0, -1),
    IVec3::new(0, 0, 1),
    IVec3::new(0, 1, -1),
    IVec3::new(0, 1, 0),
    IVec3::new(0, 1, 1),
    IVec3::new(1, -1, 0),
    IVec3::new(1, 0, -1),
    IVec3::new(1, 0, 0),
    IVec3::new(1, 0, 1),
    IVec3::new(1, 1, 0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for dir in ALL_DIRECTIONS {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.offset() + dir.opposite().offset(), IVec3::ZERO);
        }
    }

    #[test]
    fn test_bits_unique() {
        let mut seen = 0u8;
        for dir in ALL_DIRECTIONS {
            assert_eq!(seen & (1 << dir.bit()), 0, "{dir:?} reuses a bit");
            seen |= 1 << dir.bit();
        }
        assert_eq!(seen, 0b11_1111);
    }

    #[test]
    fn test_non_corner_offsets() {
        for (i, a) in NON_CORNER_OFFSETS.iter().enumerate() {
            let kind = neighbour_kind(*a);
            assert!(
                matches!(kind, Some(NeighbourKind::Face | NeighbourKind::Edge)),
                "{a} classified as {kind:?}"
            );
            for b in &NON_CORNER_OFFSETS[i + 1..] {
                assert_ne!(a, b);
            }
        }
        let faces = NON_CORNER_OFFSETS
            .iter()
            .filter(|o| neighbour_kind(**o) == Some(NeighbourKind::Face))
            .count();
        assert_eq!(faces, 6);
    }

    #[test]
    fn test_neighbour_kind() {
        assert_eq!(neighbour_kind(IVec3::ZERO), None);
        assert_eq!(neighbour_kind(IVec3::new(2, 0, 0)), None);
        assert_eq!(neighbour_kind(IVec3::new(0, -1, 0)), Some(NeighbourKind::Face));
        assert_eq!(neighbour_kind(IVec3::new(1, -1, 0)), Some(NeighbourKind::Edge));
        assert_eq!(
            neighbour_kind(IVec3::new(1, -1, 1)),
            Some(NeighbourKind::Corner)
        );
    }

    #[test]
    fn test_axis_helpers() {
        assert_eq!(Direction::along_x(-1), Direction::West);
        assert_eq!(Direction::along_y(1), Direction::Up);
        assert_eq!(Direction::along_z(-1), Direction::North);
    }
}
