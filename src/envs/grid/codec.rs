use crate::error::{MdpError, Result};
use crate::mdps::StateId;
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const N_HEADINGS: usize = 4;
const N_FLAG_COMBINATIONS: usize = 8;

const BIT_TREASURE: usize = 0x1;
const BIT_PROJECTILE: usize = 0x2;
const BIT_KILLED: usize = 0x4;
const HEADING_SHIFT: usize = 3;
const POSITION_SHIFT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    Right = 0,
    Up = 1,
    Left = 2,
    Down = 3,
}

impl Heading {
    pub const ALL: [Heading; N_HEADINGS] = [Heading::Right, Heading::Up, Heading::Left, Heading::Down];

    fn from_index(i: usize) -> Self {
        Self::ALL[i % N_HEADINGS]
    }

    pub fn turn_left(self) -> Self {
        Self::from_index(self as usize + 1)
    }

    pub fn turn_right(self) -> Self {
        Self::from_index(self as usize + N_HEADINGS - 1)
    }

    pub fn about_face(self) -> Self {
        Self::from_index(self as usize + 2)
    }

    /// Unit step; y grows downwards.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Heading::Right => (1, 0),
            Heading::Up => (0, -1),
            Heading::Left => (-1, 0),
            Heading::Down => (0, 1),
        }
    }
}

/// Named view of a packed state id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateDescriptor {
    pub x: usize,
    pub y: usize,
    pub heading: Heading,
    pub has_treasure: bool,
    pub used_projectile: bool,
    pub killed_monster: bool,
}

impl StateDescriptor {
    /// Facing right, nothing held, projectile unused, monster alive.
    pub fn start(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            heading: Heading::Right,
            has_treasure: false,
            used_projectile: false,
            killed_monster: false,
        }
    }
}

impl fmt::Display for StateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{},{}) : [{}{}{}]",
            self.x,
            self.y,
            self.heading as usize,
            self.has_treasure as u8,
            self.used_projectile as u8,
            self.killed_monster as u8
        )
    }
}

/// Dense bijection between descriptors of a `width` x `height` grid and
/// `0..n_states()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateCodec {
    width: usize,
    height: usize,
}

impl StateCodec {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn n_states(&self) -> usize {
        N_FLAG_COMBINATIONS * N_HEADINGS * self.width * self.height
    }

    pub fn encode(&self, d: &StateDescriptor) -> Result<StateId> {
        if d.x >= self.width || d.y >= self.height {
            return Err(MdpError::InvalidCoordinates {
                x: d.x,
                y: d.y,
                width: self.width,
                height: self.height,
            });
        }

        let mut s = 0;
        if d.has_treasure {
            s |= BIT_TREASURE;
        }
        if d.used_projectile {
            s |= BIT_PROJECTILE;
        }
        if d.killed_monster {
            s |= BIT_KILLED;
        }
        s |= (d.heading as usize) << HEADING_SHIFT;
        s |= (d.x + self.width * d.y) << POSITION_SHIFT;

        Ok(s)
    }

    pub fn decode(&self, s: StateId) -> Result<StateDescriptor> {
        if s >= self.n_states() {
            return Err(MdpError::InvalidState {
                state: s,
                n_s: self.n_states(),
            });
        }

        let p = s >> POSITION_SHIFT;
        Ok(StateDescriptor {
            x: p % self.width,
            y: p / self.width,
            heading: Heading::from_index((s >> HEADING_SHIFT) & 0x3),
            has_treasure: s & BIT_TREASURE != 0,
            used_projectile: s & BIT_PROJECTILE != 0,
            killed_monster: s & BIT_KILLED != 0,
        })
    }

    /// Every in-bounds descriptor, in no particular order.
    pub fn descriptors(&self) -> impl Iterator<Item = StateDescriptor> {
        let flags = [false, true];
        iproduct!(0..self.width, 0..self.height, Heading::ALL, flags, flags, flags).map(
            |(x, y, heading, has_treasure, used_projectile, killed_monster)| StateDescriptor {
                x,
                y,
                heading,
                has_treasure,
                used_projectile,
                killed_monster,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn round_trips_every_descriptor() {
        let codec = StateCodec::new(3, 2);
        let mut seen = HashSet::new();

        for d in codec.descriptors() {
            let s = codec.encode(&d).unwrap();
            assert!(s < codec.n_states());
            assert_eq!(codec.decode(s).unwrap(), d);
            assert!(seen.insert(s), "{d} collides");
        }

        assert_eq!(seen.len(), codec.n_states());
        assert_eq!(codec.n_states(), 8 * 4 * 3 * 2);
    }

    #[test]
    fn rejects_out_of_range_input() {
        let codec = StateCodec::new(4, 4);

        assert!(matches!(
            codec.encode(&StateDescriptor::start(4, 0)),
            Err(MdpError::InvalidCoordinates { x: 4, .. })
        ));
        assert!(matches!(
            codec.decode(512),
            Err(MdpError::InvalidState { state: 512, n_s: 512 })
        ));
    }

    #[test]
    fn turns_are_cyclic() {
        assert_eq!(Heading::Right.turn_left(), Heading::Up);
        assert_eq!(Heading::Down.turn_left(), Heading::Right);
        assert_eq!(Heading::Right.turn_right(), Heading::Down);
        assert_eq!(Heading::Up.about_face(), Heading::Down);
        for h in Heading::ALL {
            assert_eq!(h.turn_left().turn_right(), h);
            assert_eq!(h.about_face().about_face(), h);
        }
    }

    #[test]
    fn descriptor_display() {
        let d = StateDescriptor {
            x: 2,
            y: 3,
            heading: Heading::Up,
            has_treasure: true,
            used_projectile: true,
            killed_monster: false,
        };

        insta::assert_snapshot!(d.to_string(), @"(2,3,1) : [110]");
    }
}
