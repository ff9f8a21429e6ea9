//! Board logic: tile grid, spare tile, insertion/shift, and reachability.

use std::collections::{HashSet, VecDeque};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::tiles::{build_fixed_tiles, build_mobile_tiles, is_fixed_cell, Tile, FIXED_LAYOUT};
use super::types::*;
use crate::error::GameError;

pub type Grid = [[Tile; BOARD_SIZE]; BOARD_SIZE];

/// The 7x7 maze, the spare tile, and the last insertion (which forbids its
/// immediate reversal).
///
/// Cloning gives a fully independent snapshot: tiles are plain values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Grid,
    spare: Tile,
    last_arrow: Option<Arrow>,
}

impl Board {
    /// Seed a fresh board: fixed tiles in their cells, fixed objectives and
    /// mobile tiles shuffled with `rng`, the leftover mobile tile as spare.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut fixed_objectives = Objective::FIXED;
        fixed_objectives.shuffle(rng);
        let mut corner_objectives = Objective::MOBILE_CORNER;
        corner_objectives.shuffle(rng);
        let mut t_objectives = Objective::MOBILE_T;
        t_objectives.shuffle(rng);

        let mut mobile = build_mobile_tiles(&corner_objectives, &t_objectives);
        mobile.shuffle(rng);
        let mut mobile = mobile.into_iter();

        let mut tiles = [[Tile::mobile(TileType::Straight, Direction::North); BOARD_SIZE]; BOARD_SIZE];
        for (pos, tile) in build_fixed_tiles(&fixed_objectives) {
            tiles[pos.row][pos.col] = tile;
        }
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if is_fixed_cell(Position::new(row, col)) {
                    continue;
                }
                let Some(tile) = mobile.next() else {
                    unreachable!("tile catalog holds one mobile tile per free cell plus the spare");
                };
                tiles[row][col] = tile;
            }
        }
        let Some(spare) = mobile.next() else {
            unreachable!("tile catalog holds one mobile tile per free cell plus the spare");
        };

        Self {
            tiles,
            spare,
            last_arrow: None,
        }
    }

    /// Assemble a board from explicit parts. No catalog checks are made; see
    /// [`Board::check_invariants`].
    pub fn from_parts(tiles: Grid, spare: Tile, last_arrow: Option<Arrow>) -> Self {
        Self {
            tiles,
            spare,
            last_arrow,
        }
    }

    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Tile at `pos`. Panics if `pos` is off the board.
    pub fn tile(&self, pos: Position) -> &Tile {
        &self.tiles[pos.row][pos.col]
    }

    pub fn get(&self, pos: Position) -> Option<&Tile> {
        self.tiles.get(pos.row).and_then(|row| row.get(pos.col))
    }

    pub fn tiles(&self) -> &Grid {
        &self.tiles
    }

    pub fn spare_tile(&self) -> &Tile {
        &self.spare
    }

    pub fn spare_tile_mut(&mut self) -> &mut Tile {
        &mut self.spare
    }

    pub fn last_arrow(&self) -> Option<Arrow> {
        self.last_arrow
    }

    pub fn all_arrows(&self) -> &'static [Arrow] {
        Arrow::all()
    }

    /// An insertion is allowed at any of the 12 arrows except the one that
    /// would push back the line moved by the most recent insertion.
    pub fn can_insert(&self, arrow: Arrow) -> bool {
        if !Arrow::all().contains(&arrow) {
            return false;
        }
        match self.last_arrow {
            Some(last) => arrow != last.opposite(BOARD_SIZE),
            None => true,
        }
    }

    pub fn valid_arrows(&self) -> Vec<Arrow> {
        Arrow::all()
            .iter()
            .copied()
            .filter(|&arrow| self.can_insert(arrow))
            .collect()
    }

    /// Push the spare tile in at `arrow`, shifting its line one cell. The tile
    /// pushed off the far end becomes the new spare and is returned.
    ///
    /// The spare is inserted with whatever orientation it currently has.
    pub fn insert_and_shift(&mut self, arrow: Arrow) -> Result<Tile, GameError> {
        if !Arrow::all().contains(&arrow) {
            return Err(GameError::UnknownArrow(arrow));
        }
        if !self.can_insert(arrow) {
            return Err(GameError::ReversedInsertion(arrow));
        }

        let line = arrow.line();
        let towards_end = matches!(arrow.direction, Direction::South | Direction::East);
        let evicted = if arrow.is_horizontal() {
            push_line(&mut self.tiles[line], towards_end, self.spare)
        } else {
            let mut column: [Tile; BOARD_SIZE] = std::array::from_fn(|row| self.tiles[row][line]);
            let evicted = push_line(&mut column, towards_end, self.spare);
            for (row, tile) in column.into_iter().enumerate() {
                self.tiles[row][line] = tile;
            }
            evicted
        };

        self.spare = evicted;
        self.last_arrow = Some(arrow);
        tracing::trace!(%arrow, "tile inserted");
        Ok(evicted)
    }

    /// Every cell reachable from `start` through matching openings, in
    /// breadth-first order. `start` itself is always first.
    ///
    /// Two neighbours connect only if both tiles open towards each other.
    pub fn reachable_positions(&self, start: Position) -> Vec<Position> {
        if !start.is_in_bounds(BOARD_SIZE) {
            return Vec::new();
        }

        let mut visited = [[false; BOARD_SIZE]; BOARD_SIZE];
        let mut queue = VecDeque::new();
        let mut reachable = Vec::new();

        visited[start.row][start.col] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            reachable.push(current);
            let tile = self.tile(current);

            for dir in Direction::ALL {
                let Some(next) = current.neighbor(dir, BOARD_SIZE) else {
                    continue;
                };
                if visited[next.row][next.col] {
                    continue;
                }
                if tile.is_open_to(dir) && self.tile(next).is_open_to(dir.opposite()) {
                    visited[next.row][next.col] = true;
                    queue.push_back(next);
                }
            }
        }

        reachable
    }

    pub fn is_reachable(&self, from: Position, to: Position) -> bool {
        self.reachable_positions(from).contains(&to)
    }

    /// Grid cell holding `objective`, or `None` if it is on the spare tile.
    pub fn find_objective(&self, objective: Objective) -> Option<Position> {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
            .find(|&pos| self.tile(pos).objective() == Some(objective))
    }

    /// Validate the catalog invariants of a seeded board. Returns an error
    /// message or `None` if the board is consistent.
    ///
    /// Checks: 50 tiles with 24 objectives each present exactly once, fixed
    /// tiles only (and always) in their cells with their original shape.
    pub fn check_invariants(&self) -> Option<String> {
        let mut seen = HashSet::new();
        let all_tiles = self.tiles.iter().flatten().chain(std::iter::once(&self.spare));
        for tile in all_tiles {
            if let Some(objective) = tile.objective() {
                if !seen.insert(objective) {
                    return Some(format!("Objective {objective:?} appears more than once"));
                }
            }
        }
        if seen.len() != Objective::all().count() {
            return Some(format!("Expected 24 objectives, found {}", seen.len()));
        }

        if self.spare.is_fixed() {
            return Some("Spare tile is a fixed tile".into());
        }
        for (pos, tile_type, orientation) in FIXED_LAYOUT {
            let tile = self.tile(pos);
            if !tile.is_fixed() || tile.tile_type() != tile_type || tile.orientation() != orientation {
                return Some(format!("Fixed cell {pos} holds {tile:?}"));
            }
        }
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let pos = Position::new(row, col);
                if !is_fixed_cell(pos) && self.tile(pos).is_fixed() {
                    return Some(format!("Fixed tile found on mobile cell {pos}"));
                }
            }
        }
        None
    }
}

/// Shift `cells` one step, inserting `incoming` at the entry end, and return
/// the tile pushed out of the other end.
fn push_line(cells: &mut [Tile; BOARD_SIZE], towards_end: bool, incoming: Tile) -> Tile {
    if towards_end {
        cells.rotate_right(1);
        std::mem::replace(&mut cells[0], incoming)
    } else {
        cells.rotate_left(1);
        std::mem::replace(&mut cells[BOARD_SIZE - 1], incoming)
    }
}
