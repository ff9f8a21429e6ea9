//! Labyrinth core value types: grid positions, directions, insertion arrows,
//! tile shapes and the objective catalogue.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Side length of the square board.
pub const BOARD_SIZE: usize = 7;

// --- Position ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_in_bounds(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// The adjacent cell in `direction`, or `None` when it would leave a
    /// `size` x `size` grid.
    pub fn neighbor(self, direction: Direction, size: usize) -> Option<Self> {
        let (row, col) = match direction {
            Direction::North => (self.row.checked_sub(1)?, self.col),
            Direction::East => (self.row, self.col + 1),
            Direction::South => (self.row + 1, self.col),
            Direction::West => (self.row, self.col.checked_sub(1)?),
        };
        let next = Self::new(row, col);
        next.is_in_bounds(size).then_some(next)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

// --- Direction ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Clockwise order, starting at north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self::ALL[idx % 4]
    }

    /// Apply `steps` quarter turns clockwise.
    #[inline]
    pub fn rotate(self, steps: usize) -> Self {
        Self::from_index(self.index() + steps % 4)
    }

    #[inline]
    pub fn rotate_clockwise(self) -> Self {
        self.rotate(1)
    }

    #[inline]
    pub fn opposite(self) -> Self {
        self.rotate(2)
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }
}

// --- Arrow ---

/// An insertion point on the board edge: the cell the spare tile enters and
/// the direction in which the line is pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Arrow {
    pub position: Position,
    pub direction: Direction,
}

/// The 12 insertion arrows of a 7x7 board: columns 1, 3, 5 from the top and
/// bottom, rows 1, 3, 5 from the left and right.
static ALL_ARROWS: Lazy<Vec<Arrow>> = Lazy::new(|| {
    let last = BOARD_SIZE - 1;
    let lines: Vec<usize> = (1..BOARD_SIZE).step_by(2).collect();
    let mut arrows = Vec::with_capacity(lines.len() * 4);
    arrows.extend(lines.iter().map(|&c| Arrow::new(Position::new(0, c), Direction::South)));
    arrows.extend(lines.iter().map(|&c| Arrow::new(Position::new(last, c), Direction::North)));
    arrows.extend(lines.iter().map(|&r| Arrow::new(Position::new(r, 0), Direction::East)));
    arrows.extend(lines.iter().map(|&r| Arrow::new(Position::new(r, last), Direction::West)));
    arrows
});

impl Arrow {
    pub const fn new(position: Position, direction: Direction) -> Self {
        Self { position, direction }
    }

    pub fn all() -> &'static [Arrow] {
        &ALL_ARROWS
    }

    pub fn is_horizontal(self) -> bool {
        self.direction.is_horizontal()
    }

    /// Index of the row (horizontal arrows) or column (vertical arrows) that
    /// this arrow shifts.
    pub fn line(self) -> usize {
        if self.is_horizontal() {
            self.position.row
        } else {
            self.position.col
        }
    }

    /// The arrow that would push the same line back: opposite end, opposite direction.
    pub fn opposite(self, size: usize) -> Self {
        let last = size - 1;
        let Position { row, col } = self.position;
        let position = match self.direction {
            Direction::South => Position::new(last, col),
            Direction::North => Position::new(0, col),
            Direction::East => Position::new(row, last),
            Direction::West => Position::new(row, 0),
        };
        Self::new(position, self.direction.opposite())
    }

    /// Whether `pos` lies on the line this arrow shifts.
    pub fn affects(self, pos: Position) -> bool {
        if self.is_horizontal() {
            pos.row == self.position.row
        } else {
            pos.col == self.position.col
        }
    }

    /// Where a pawn standing on `pos` ends up after this insertion.
    ///
    /// Pawns ride their line cyclically: one pushed off the far end re-enters
    /// on the inserted tile at the near end. Tiles do not wrap; see
    /// `Board::insert_and_shift`.
    pub fn shift_position(self, pos: Position, size: usize) -> Position {
        if !self.affects(pos) {
            return pos;
        }
        match self.direction {
            Direction::South => Position::new((pos.row + 1) % size, pos.col),
            Direction::North => Position::new((pos.row + size - 1) % size, pos.col),
            Direction::East => Position::new(pos.row, (pos.col + 1) % size),
            Direction::West => Position::new(pos.row, (pos.col + size - 1) % size),
        }
    }
}

impl fmt::Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{:?}", self.position, self.direction)
    }
}

// --- Tile shapes ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileType {
    /// Two opposite openings.
    Straight,
    /// Two adjacent openings.
    Corner,
    /// Three openings, one wall.
    TJunction,
}

// --- Objectives ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    // mobile corners
    Ghost,
    Dragon,
    Bat,
    Owl,
    Spider,
    Lizard,
    // mobile T-junctions
    Gnome,
    Fairy,
    Genie,
    Scarab,
    Rat,
    Butterfly,
    // fixed T-junctions
    Grimoire,
    GoldBag,
    Map,
    Crown,
    Keys,
    Bones,
    Ring,
    TreasureChest,
    Emerald,
    Sword,
    Candle,
    Helmet,
}

impl Objective {
    pub const MOBILE_CORNER: [Objective; 6] = [
        Objective::Ghost,
        Objective::Dragon,
        Objective::Bat,
        Objective::Owl,
        Objective::Spider,
        Objective::Lizard,
    ];

    pub const MOBILE_T: [Objective; 6] = [
        Objective::Gnome,
        Objective::Fairy,
        Objective::Genie,
        Objective::Scarab,
        Objective::Rat,
        Objective::Butterfly,
    ];

    pub const FIXED: [Objective; 12] = [
        Objective::Grimoire,
        Objective::GoldBag,
        Objective::Map,
        Objective::Crown,
        Objective::Keys,
        Objective::Bones,
        Objective::Ring,
        Objective::TreasureChest,
        Objective::Emerald,
        Objective::Sword,
        Objective::Candle,
        Objective::Helmet,
    ];

    /// All 24 objectives, mobile corners first, fixed last.
    pub fn all() -> impl Iterator<Item = Objective> {
        Self::MOBILE_CORNER
            .into_iter()
            .chain(Self::MOBILE_T)
            .chain(Self::FIXED)
    }

    /// Asset name the display layer uses for this objective's artwork.
    pub fn asset_key(self) -> &'static str {
        match self {
            Objective::Ghost => "goal_ghost",
            Objective::Dragon => "goal_dragon",
            Objective::Bat => "goal_bat",
            Objective::Owl => "goal_hibou",
            Objective::Spider => "goal_spider",
            Objective::Lizard => "goal_lezard",
            Objective::Gnome => "goal_pig",
            Objective::Fairy => "goal_witch",
            Objective::Genie => "goal_ghost2",
            Objective::Scarab => "goal_insecte",
            Objective::Rat => "goal_mouse",
            Objective::Butterfly => "goal_butteryfly",
            Objective::Grimoire => "goal_book",
            Objective::GoldBag => "goal_money",
            Objective::Map => "goal_map",
            Objective::Crown => "goal_crown",
            Objective::Keys => "goal_keys",
            Objective::Bones => "goal_skull",
            Objective::Ring => "goal_ring",
            Objective::TreasureChest => "goal_coffre",
            Objective::Emerald => "goal_saphir",
            Objective::Sword => "goal_sword",
            Objective::Candle => "goal_candleholder",
            Objective::Helmet => "goal_helmet",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_direction_rotation() {
        assert_eq!(Direction::North.rotate_clockwise(), Direction::East);
        assert_eq!(Direction::West.rotate_clockwise(), Direction::North);
        assert_eq!(Direction::East.rotate(3), Direction::North);
        assert_eq!(Direction::South.rotate(4), Direction::South);
        assert_eq!(Direction::South.rotate(6), Direction::North);
        for dir in Direction::ALL {
            assert_eq!(dir.opposite(), dir.rotate(2));
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_position_neighbor() {
        let pos = Position::new(3, 3);
        assert_eq!(pos.neighbor(Direction::North, BOARD_SIZE), Some(Position::new(2, 3)));
        assert_eq!(pos.neighbor(Direction::East, BOARD_SIZE), Some(Position::new(3, 4)));
        assert_eq!(pos.neighbor(Direction::South, BOARD_SIZE), Some(Position::new(4, 3)));
        assert_eq!(pos.neighbor(Direction::West, BOARD_SIZE), Some(Position::new(3, 2)));

        let corner = Position::new(0, 6);
        assert_eq!(corner.neighbor(Direction::North, BOARD_SIZE), None);
        assert_eq!(corner.neighbor(Direction::East, BOARD_SIZE), None);
    }

    #[test]
    fn test_twelve_distinct_arrows() {
        let arrows = Arrow::all();
        assert_eq!(arrows.len(), 12);
        let unique: HashSet<_> = arrows.iter().collect();
        assert_eq!(unique.len(), 12);
        for arrow in arrows {
            assert_eq!(arrow.line() % 2, 1, "{arrow} must push an odd line");
        }
    }

    #[test]
    fn test_arrow_opposite() {
        let top = Arrow::new(Position::new(0, 1), Direction::South);
        assert_eq!(
            top.opposite(BOARD_SIZE),
            Arrow::new(Position::new(6, 1), Direction::North)
        );
        let right = Arrow::new(Position::new(3, 6), Direction::West);
        assert_eq!(
            right.opposite(BOARD_SIZE),
            Arrow::new(Position::new(3, 0), Direction::East)
        );
        for arrow in Arrow::all() {
            let opp = arrow.opposite(BOARD_SIZE);
            assert!(Arrow::all().contains(&opp));
            assert_eq!(opp.opposite(BOARD_SIZE), *arrow);
        }
    }

    #[test]
    fn test_shift_position_wraps_pawns() {
        let south = Arrow::new(Position::new(0, 3), Direction::South);
        assert_eq!(south.shift_position(Position::new(2, 3), BOARD_SIZE), Position::new(3, 3));
        assert_eq!(south.shift_position(Position::new(6, 3), BOARD_SIZE), Position::new(0, 3));
        assert_eq!(south.shift_position(Position::new(6, 2), BOARD_SIZE), Position::new(6, 2));

        let west = Arrow::new(Position::new(5, 6), Direction::West);
        assert_eq!(west.shift_position(Position::new(5, 0), BOARD_SIZE), Position::new(5, 6));
        assert_eq!(west.shift_position(Position::new(5, 4), BOARD_SIZE), Position::new(5, 3));
    }

    #[test]
    fn test_objective_catalogue() {
        let all: HashSet<_> = Objective::all().collect();
        assert_eq!(all.len(), 24);
        let assets: HashSet<_> = Objective::all().map(Objective::asset_key).collect();
        assert_eq!(assets.len(), 24);
    }
}
