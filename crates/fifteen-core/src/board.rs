//! The immutable puzzle state: [`Board`].
//!
//! A board is a total mapping from the 16 squares to either a tile or the
//! empty marker. Boards are value objects: applying a move yields a new
//! board and never mutates the input. Both heuristic measures used by the
//! solver (misplaced pieces, total Manhattan distance) are computed once
//! at construction and cached, which immutability makes safe.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::moves::Move;
use crate::square::{Direction, SIDE, Square, Tile};

/// A fifteen-puzzle position.
///
/// Invariants, enforced by every constructor:
/// - all 16 squares are present,
/// - exactly one square is empty,
/// - tiles 1 through 15 each appear exactly once.
#[derive(Copy, Clone, Debug)]
pub struct Board {
    /// Row-major occupants; `None` is the empty square.
    cells: [Option<Tile>; 16],
    empty: Square,
    misplaced: u32,
    distance: u32,
}

impl Board {
    /// The goal position: tiles in ascending row-major order, bottom-right
    /// square empty.
    pub fn solved() -> Self {
        let mut cells = [None; 16];
        for sq in Square::all() {
            cells[sq.index()] = sq.solution_piece();
        }
        Self::assemble(cells, Square::BOTTOM_RIGHT)
    }

    /// Build a board from `(square, occupant)` pairs, `None` marking the
    /// empty square. Order does not matter. This is the canonical
    /// validated constructor; every invariant violation maps to a
    /// [`MalformedBoard`] variant.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, MalformedBoard>
    where
        I: IntoIterator<Item = (Square, Option<Tile>)>,
    {
        let mut cells: [Option<Tile>; 16] = [None; 16];
        let mut squares_seen: u16 = 0;
        let mut count = 0usize;
        for (sq, occupant) in pairs {
            let bit = 1u16 << sq.index();
            if squares_seen & bit != 0 {
                return Err(MalformedBoard::DuplicateSquare(sq));
            }
            squares_seen |= bit;
            if let Some(tile) = occupant {
                if !(1..=15).contains(&tile.value()) {
                    return Err(MalformedBoard::TileOutOfRange(tile.value()));
                }
            }
            cells[sq.index()] = occupant;
            count += 1;
        }
        if count != 16 {
            return Err(MalformedBoard::WrongSquareCount(count));
        }

        let mut empty: Option<Square> = None;
        for sq in Square::all() {
            if cells[sq.index()].is_none() {
                if empty.is_some() {
                    return Err(MalformedBoard::ExtraEmptySquare(sq));
                }
                empty = Some(sq);
            }
        }
        let Some(empty) = empty else {
            return Err(MalformedBoard::NoEmptySquare);
        };

        let mut tiles_seen: u16 = 0;
        for tile in cells.iter().flatten() {
            let bit = 1u16 << (tile.value() - 1);
            if tiles_seen & bit != 0 {
                return Err(MalformedBoard::DuplicateTile(*tile));
            }
            tiles_seen |= bit;
        }
        // 16 squares, one empty, 15 unique in-range tiles: the tile set
        // is complete by counting.
        Ok(Self::assemble(cells, empty))
    }

    /// Build a board from row-major literals, `0` marking the empty
    /// square. Validates like [`from_pairs`](Self::from_pairs).
    pub fn from_rows(rows: [[u8; 4]; 4]) -> Result<Self, MalformedBoard> {
        Self::from_pairs(Square::all().map(|sq| {
            let n = rows[(sq.y() - 1) as usize][(sq.x() - 1) as usize];
            (sq, if n == 0 { None } else { Some(Tile::new(n)) })
        }))
    }

    /// Finish construction from already-validated cells, caching the
    /// derived measures.
    fn assemble(cells: [Option<Tile>; 16], empty: Square) -> Self {
        let mut misplaced = 0;
        let mut distance = 0;
        for sq in Square::all() {
            if let Some(tile) = cells[sq.index()] {
                if sq.solution_piece() != Some(tile) {
                    misplaced += 1;
                }
                distance += sq.manhattan(tile.home());
            }
        }
        Self {
            cells,
            empty,
            misplaced,
            distance,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The tile on `sq`, or `None` if `sq` is the empty square.
    #[inline]
    pub fn occupant(&self, sq: Square) -> Option<Tile> {
        self.cells[sq.index()]
    }

    /// The square currently holding no tile.
    #[inline]
    pub fn empty_square(&self) -> Square {
        self.empty
    }

    /// Whether every square holds its solution piece.
    #[inline]
    pub fn is_solved(&self) -> bool {
        self.misplaced == 0
    }

    /// Number of tiles not on their solution square. The empty square is
    /// never counted.
    #[inline]
    pub fn misplaced_pieces(&self) -> u32 {
        self.misplaced
    }

    /// Sum over all 15 tiles of the Manhattan distance from the tile's
    /// current square to its solution square.
    #[inline]
    pub fn total_distance(&self) -> u32 {
        self.distance
    }

    // -----------------------------------------------------------------------
    // Moves
    // -----------------------------------------------------------------------

    /// The moves applicable in this position: one per square orthogonally
    /// adjacent to the empty square, sliding that square's tile into the
    /// vacancy. Always 2 to 4 moves.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(4);
        for dir in Direction::ALL {
            // A tile sliding in `dir` onto the empty square starts one
            // step the other way.
            let Some(from) = self.empty.step(dir.opposite()) else {
                continue;
            };
            let Some(piece) = self.occupant(from) else {
                continue;
            };
            let Some(mv) = Move::new(piece, from, dir) else {
                continue;
            };
            moves.push(mv);
        }
        moves
    }

    /// Apply a move, returning the resulting position. The move must
    /// start on an occupied square and land on the current empty square;
    /// anything else is an [`IllegalMove`]. `self` is left untouched.
    pub fn apply(&self, mv: Move) -> Result<Self, IllegalMove> {
        let Some(piece) = self.occupant(mv.from()) else {
            return Err(IllegalMove::UnoccupiedSource(mv.from()));
        };
        if mv.to() != self.empty {
            return Err(IllegalMove::OccupiedDestination(mv.to()));
        }
        let mut cells = self.cells;
        cells[mv.to().index()] = Some(piece);
        cells[mv.from().index()] = None;
        Ok(Self::assemble(cells, mv.from()))
    }

    // -----------------------------------------------------------------------
    // Solvability
    // -----------------------------------------------------------------------

    /// Whether the goal is reachable from this position under legal
    /// moves.
    ///
    /// Classic permutation-parity test for an even-width board: count the
    /// inversions of the row-major tile sequence; the position is
    /// solvable iff inversions plus the empty square's 0-based row index
    /// is odd.
    pub fn is_solvable(&self) -> bool {
        (self.inversions() + u32::from(self.empty.y()) - 1) % 2 == 1
    }

    fn inversions(&self) -> u32 {
        let tiles: Vec<u8> = self.cells.iter().flatten().map(|t| t.value()).collect();
        let mut count = 0;
        for i in 0..tiles.len() {
            for j in i + 1..tiles.len() {
                if tiles[i] > tiles[j] {
                    count += 1;
                }
            }
        }
        count
    }
}

// --- trait impls for Board ---

impl PartialEq for Board {
    /// Content equality over the square→occupant mapping. The cached
    /// measures are derived from the cells and are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells.hash(state);
    }
}

impl fmt::Display for Board {
    /// Four text rows of `|`-separated cells, the empty square blank:
    ///
    /// ```text
    /// |  1 |  2 |  3 |  4 |
    /// |  5 |  6 |  7 |  8 |
    /// |  9 | 10 | 11 | 12 |
    /// | 13 | 14 | 15 |    |
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sq in Square::all() {
            match self.cells[sq.index()] {
                Some(tile) => write!(f, "| {:>2} ", tile.value())?,
                None => f.write_str("|    ")?,
            }
            if sq.x() == SIDE {
                f.write_str("|")?;
                if sq.y() != SIDE {
                    f.write_str("\n")?;
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from building a board out of external data.
#[derive(Debug, Clone)]
pub enum MalformedBoard {
    /// A key is not of the `"col:row"` form, or names an off-board square.
    BadSquareKey(String),
    /// Not exactly 16 squares were supplied.
    WrongSquareCount(usize),
    /// The same square was supplied more than once.
    DuplicateSquare(Square),
    /// A tile number outside `1..=15`.
    TileOutOfRange(u8),
    /// The same tile was placed on two squares.
    DuplicateTile(Tile),
    /// Every square holds a tile; no empty marker.
    NoEmptySquare,
    /// More than one square was marked empty.
    ExtraEmptySquare(Square),
}

impl fmt::Display for MalformedBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadSquareKey(key) => {
                write!(f, "board key {key:?} is not a \"col:row\" square")
            }
            Self::WrongSquareCount(n) => write!(f, "board has {n} squares, expected 16"),
            Self::DuplicateSquare(sq) => write!(f, "square {sq} appears more than once"),
            Self::TileOutOfRange(n) => write!(f, "tile {n} is outside 1..=15"),
            Self::DuplicateTile(tile) => {
                write!(f, "tile {tile} appears on more than one square")
            }
            Self::NoEmptySquare => write!(f, "board has no empty square"),
            Self::ExtraEmptySquare(sq) => {
                write!(f, "board has a second empty square at {sq}")
            }
        }
    }
}

impl std::error::Error for MalformedBoard {}

/// Errors from applying a move that does not fit the current position.
#[derive(Debug, Clone, Copy)]
pub enum IllegalMove {
    /// The move's source square holds no tile.
    UnoccupiedSource(Square),
    /// The move's destination is not the current empty square.
    OccupiedDestination(Square),
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnoccupiedSource(sq) => write!(f, "no tile to slide on {sq}"),
            Self::OccupiedDestination(sq) => {
                write!(f, "destination {sq} is not the empty square")
            }
        }
    }
}

impl std::error::Error for IllegalMove {}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
impl serde::Serialize for Board {
    /// The exchange shape: a 16-entry map of `"col:row"` keys to tile
    /// number or `null`, in row-major key order.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(16))?;
        for sq in Square::all() {
            map.serialize_entry(&sq, &self.occupant(sq))?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Board {
    /// Accepts the exchange shape and runs the full [`MalformedBoard`]
    /// validation.
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;
        use std::collections::BTreeMap;

        let raw: BTreeMap<String, Option<u8>> = serde::Deserialize::deserialize(deserializer)?;
        let mut pairs = Vec::with_capacity(raw.len());
        for (key, occupant) in &raw {
            let sq: Square = key.parse().map_err(D::Error::custom)?;
            pairs.push((sq, occupant.map(Tile::new)));
        }
        Board::from_pairs(pairs).map_err(D::Error::custom)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn board_round_trip() {
        let board = Board::from_rows([
            [5, 1, 3, 4],
            [2, 6, 7, 8],
            [9, 10, 11, 12],
            [13, 0, 14, 15],
        ])
        .unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn exchange_shape_is_a_keyed_map() {
        let json = serde_json::to_value(Board::solved()).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), 16);
        assert_eq!(map["1:1"], 1);
        assert_eq!(map["4:1"], 4);
        assert_eq!(map["1:2"], 5);
        assert_eq!(map["3:4"], 15);
        assert!(map["4:4"].is_null());
    }

    #[test]
    fn wrong_key_count_is_rejected() {
        let mut value = serde_json::to_value(Board::solved()).unwrap();
        value.as_object_mut().unwrap().remove("2:3");
        assert!(serde_json::from_value::<Board>(value).is_err());
    }

    #[test]
    fn bad_key_is_rejected() {
        let mut value = serde_json::to_value(Board::solved()).unwrap();
        let moved = value.as_object_mut().unwrap().remove("2:3").unwrap();
        value.as_object_mut().unwrap().insert("9:9".into(), moved);
        let err = serde_json::from_value::<Board>(value).unwrap_err();
        assert!(err.to_string().contains("9:9"));
    }

    #[test]
    fn duplicate_tile_is_rejected() {
        let mut value = serde_json::to_value(Board::solved()).unwrap();
        value.as_object_mut().unwrap()["2:3"] = 1.into();
        let err = serde_json::from_value::<Board>(value).unwrap_err();
        assert!(err.to_string().contains("more than one square"));
    }

    #[test]
    fn second_empty_is_rejected() {
        let mut value = serde_json::to_value(Board::solved()).unwrap();
        value.as_object_mut().unwrap()["2:3"] = serde_json::Value::Null;
        assert!(serde_json::from_value::<Board>(value).is_err());
    }
}
