//! A single tile slide: [`Move`].

use std::fmt;

use crate::square::{Direction, Square, Tile};

/// One slide of a tile: which piece, from which square, in which
/// direction. The destination square is derived at construction, so a
/// `Move` value always stays on the board.
///
/// A `Move` records intent only; whether it is legal for a particular
/// board (destination actually empty, source actually holding the piece)
/// is checked by [`Board::apply`](crate::Board::apply).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    piece: Tile,
    from: Square,
    direction: Direction,
    to: Square,
}

impl Move {
    /// Create a move of `piece` from `from` one step in `direction`.
    /// Returns `None` if the destination would fall off the board.
    pub const fn new(piece: Tile, from: Square, direction: Direction) -> Option<Self> {
        match from.step(direction) {
            Some(to) => Some(Self {
                piece,
                from,
                direction,
                to,
            }),
            None => None,
        }
    }

    /// The tile being slid.
    #[inline]
    pub const fn piece(self) -> Tile {
        self.piece
    }

    /// The square the tile starts on.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// The direction of travel of the tile itself.
    #[inline]
    pub const fn direction(self) -> Direction {
        self.direction
    }

    /// The square the tile lands on.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// The move that slides the same tile straight back.
    #[inline]
    pub const fn inverse(self) -> Self {
        Self {
            piece: self.piece,
            from: self.to,
            direction: self.direction.opposite(),
            to: self.from,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.piece, self.direction)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Move {
    /// Display form for the exchange surface: piece number and direction
    /// name only. There is no deserialize counterpart, since the source
    /// square is not part of this shape.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Move", 2)?;
        s.serialize_field("piece", &self.piece)?;
        s.serialize_field("direction", &self.direction)?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(x: u8, y: u8) -> Square {
        Square::new(x, y).unwrap()
    }

    #[test]
    fn destination_is_derived() {
        let mv = Move::new(Tile::new(6), sq(2, 2), Direction::Right).unwrap();
        assert_eq!(mv.to(), sq(3, 2));
        assert_eq!(mv.piece(), Tile::new(6));
        assert_eq!(mv.direction(), Direction::Right);
    }

    #[test]
    fn off_board_destination_is_rejected() {
        assert!(Move::new(Tile::new(1), sq(1, 1), Direction::Left).is_none());
        assert!(Move::new(Tile::new(1), sq(1, 1), Direction::Up).is_none());
        assert!(Move::new(Tile::new(15), sq(4, 4), Direction::Down).is_none());
        assert!(Move::new(Tile::new(15), sq(4, 4), Direction::Right).is_none());
    }

    #[test]
    fn inverse_swaps_endpoints() {
        let mv = Move::new(Tile::new(9), sq(3, 3), Direction::Up).unwrap();
        let back = mv.inverse();
        assert_eq!(back.piece(), mv.piece());
        assert_eq!(back.from(), mv.to());
        assert_eq!(back.to(), mv.from());
        assert_eq!(back.direction(), Direction::Down);
        assert_eq!(back.inverse(), mv);
    }

    #[test]
    fn display_is_piece_and_direction() {
        let mv = Move::new(Tile::new(12), sq(2, 4), Direction::Left).unwrap();
        assert_eq!(mv.to_string(), "12 Left");
    }
}
