//! Corridor tiles and the tile catalog of the base game (16 fixed, 34 mobile).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::types::*;

/// Openings indexed by `[tile type][orientation][direction]`.
///
/// - Straight: open along the orientation axis, walls on the two perpendicular sides.
/// - Corner: open at the orientation and the next direction clockwise.
/// - T-junction: a single wall opposite the orientation.
static OPENINGS: Lazy<[[[bool; 4]; 4]; 3]> = Lazy::new(|| {
    let mut table = [[[false; 4]; 4]; 3];
    for (type_idx, tile_type) in [TileType::Straight, TileType::Corner, TileType::TJunction]
        .into_iter()
        .enumerate()
    {
        for orientation in Direction::ALL {
            for direction in Direction::ALL {
                let walls: &[Direction] = match tile_type {
                    TileType::Straight => &[orientation.rotate(1), orientation.rotate(3)],
                    TileType::Corner => &[orientation.rotate(2), orientation.rotate(3)],
                    TileType::TJunction => &[orientation.rotate(2)],
                };
                table[type_idx][orientation.index()][direction.index()] =
                    !walls.contains(&direction);
            }
        }
    }
    table
});

#[inline]
fn type_index(tile_type: TileType) -> usize {
    match tile_type {
        TileType::Straight => 0,
        TileType::Corner => 1,
        TileType::TJunction => 2,
    }
}

/// A corridor segment. Fixed tiles keep their cell and orientation for the
/// whole game; every other tile can be rotated while it is the spare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    tile_type: TileType,
    orientation: Direction,
    #[serde(default)]
    objective: Option<Objective>,
    #[serde(default)]
    fixed: bool,
}

impl Tile {
    pub fn new(
        tile_type: TileType,
        orientation: Direction,
        objective: Option<Objective>,
        fixed: bool,
    ) -> Self {
        Self {
            tile_type,
            orientation,
            objective,
            fixed,
        }
    }

    pub fn mobile(tile_type: TileType, orientation: Direction) -> Self {
        Self::new(tile_type, orientation, None, false)
    }

    pub fn with_objective(self, objective: Objective) -> Self {
        Self {
            objective: Some(objective),
            ..self
        }
    }

    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }

    pub fn orientation(&self) -> Direction {
        self.orientation
    }

    pub fn objective(&self) -> Option<Objective> {
        self.objective
    }

    pub fn has_objective(&self) -> bool {
        self.objective.is_some()
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Turn a quarter clockwise. Returns false (and does nothing) on fixed tiles.
    pub fn rotate_clockwise(&mut self) -> bool {
        self.set_orientation(self.orientation.rotate_clockwise())
    }

    /// Returns false (and does nothing) on fixed tiles.
    pub fn set_orientation(&mut self, orientation: Direction) -> bool {
        if self.fixed {
            return false;
        }
        self.orientation = orientation;
        true
    }

    #[inline]
    pub fn is_open_to(&self, direction: Direction) -> bool {
        OPENINGS[type_index(self.tile_type)][self.orientation.index()][direction.index()]
    }

    #[inline]
    pub fn has_wall_at(&self, direction: Direction) -> bool {
        !self.is_open_to(direction)
    }

    pub fn openings(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|&d| self.is_open_to(d))
    }
}

// --- Catalog ---

/// Fixed cells of the base game with their tile type and orientation.
/// Corners come first (seat order), then the 12 objective-bearing T-junctions.
pub const FIXED_LAYOUT: [(Position, TileType, Direction); 16] = [
    (Position::new(0, 0), TileType::Corner, Direction::East),
    (Position::new(0, 6), TileType::Corner, Direction::South),
    (Position::new(6, 6), TileType::Corner, Direction::West),
    (Position::new(6, 0), TileType::Corner, Direction::North),
    (Position::new(0, 2), TileType::TJunction, Direction::South),
    (Position::new(0, 4), TileType::TJunction, Direction::South),
    (Position::new(2, 0), TileType::TJunction, Direction::East),
    (Position::new(2, 2), TileType::TJunction, Direction::South),
    (Position::new(2, 4), TileType::TJunction, Direction::South),
    (Position::new(2, 6), TileType::TJunction, Direction::West),
    (Position::new(4, 0), TileType::TJunction, Direction::East),
    (Position::new(4, 2), TileType::TJunction, Direction::North),
    (Position::new(4, 4), TileType::TJunction, Direction::North),
    (Position::new(4, 6), TileType::TJunction, Direction::West),
    (Position::new(6, 2), TileType::TJunction, Direction::North),
    (Position::new(6, 4), TileType::TJunction, Direction::North),
];

pub const STRAIGHT_COUNT: usize = 12;
pub const MOBILE_CORNER_COUNT: usize = 16;
pub const MOBILE_T_COUNT: usize = 6;

/// Whether `pos` is one of the 16 cells that hold a fixed tile.
pub fn is_fixed_cell(pos: Position) -> bool {
    pos.row % 2 == 0 && pos.col % 2 == 0
}

/// Build the 16 fixed tiles. `fixed_objectives` are handed out to the
/// T-junctions in layout order; corners carry none.
pub fn build_fixed_tiles(fixed_objectives: &[Objective; 12]) -> Vec<(Position, Tile)> {
    let mut objectives = fixed_objectives.iter().copied();
    FIXED_LAYOUT
        .iter()
        .map(|&(pos, tile_type, orientation)| {
            let objective = match tile_type {
                TileType::TJunction => objectives.next(),
                _ => None,
            };
            (pos, Tile::new(tile_type, orientation, objective, true))
        })
        .collect()
}

/// Build the 34 mobile tiles in catalog order (unshuffled): 12 straights,
/// 16 corners of which the first 6 carry `corner_objectives`, and 6
/// T-junctions carrying `t_objectives`.
pub fn build_mobile_tiles(
    corner_objectives: &[Objective; 6],
    t_objectives: &[Objective; 6],
) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(STRAIGHT_COUNT + MOBILE_CORNER_COUNT + MOBILE_T_COUNT);
    for i in 0..STRAIGHT_COUNT {
        tiles.push(Tile::mobile(TileType::Straight, Direction::from_index(i % 2)));
    }
    for i in 0..MOBILE_CORNER_COUNT {
        let tile = Tile::mobile(TileType::Corner, Direction::from_index(i));
        tiles.push(match corner_objectives.get(i) {
            Some(&objective) => tile.with_objective(objective),
            None => tile,
        });
    }
    for (i, &objective) in t_objectives.iter().enumerate() {
        tiles.push(Tile::mobile(TileType::TJunction, Direction::from_index(i)).with_objective(objective));
    }
    tiles
}
