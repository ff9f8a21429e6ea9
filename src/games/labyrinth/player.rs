//! Players, their start corners and objective backlogs.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::game::WinCondition;
use super::types::{Objective, Position, BOARD_SIZE};

pub const PLAYER_COUNT: usize = 4;
pub const CARDS_PER_PLAYER: usize = 6;

/// Pawn colour. The seat order fixes the start corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    Yellow,
    Blue,
    Green,
    Red,
}

impl PlayerColor {
    pub const ALL: [PlayerColor; PLAYER_COUNT] = [
        PlayerColor::Yellow,
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Red,
    ];

    pub fn from_seat(seat: usize) -> Self {
        Self::ALL[seat % PLAYER_COUNT]
    }

    pub fn start_position(self) -> Position {
        let last = BOARD_SIZE - 1;
        match self {
            PlayerColor::Yellow => Position::new(0, 0),
            PlayerColor::Blue => Position::new(0, last),
            PlayerColor::Green => Position::new(last, last),
            PlayerColor::Red => Position::new(last, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectiveCard {
    pub objective: Objective,
    pub reached: bool,
}

impl ObjectiveCard {
    pub fn new(objective: Objective) -> Self {
        Self {
            objective,
            reached: false,
        }
    }
}

/// Shuffle the 24 objective cards and deal them out, 6 per seat.
pub fn deal_objectives<R: Rng + ?Sized>(rng: &mut R) -> Vec<Vec<ObjectiveCard>> {
    let mut cards: Vec<ObjectiveCard> = Objective::all().map(ObjectiveCard::new).collect();
    cards.shuffle(rng);
    cards
        .chunks(CARDS_PER_PLAYER)
        .map(<[ObjectiveCard]>::to_vec)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: usize,
    name: String,
    color: PlayerColor,
    position: Position,
    /// Backlog; the top of the stack (current objective) is the last element.
    objectives: Vec<ObjectiveCard>,
    /// Reached cards in the order they were achieved.
    achieved: Vec<ObjectiveCard>,
    is_robot: bool,
}

impl Player {
    /// A player seated at `id`, standing on its start corner.
    pub fn new(id: usize, objectives: Vec<ObjectiveCard>, is_robot: bool) -> Self {
        let color = PlayerColor::from_seat(id);
        Self {
            id,
            name: format!("Player {}", id + 1),
            color,
            position: color.start_position(),
            objectives,
            achieved: Vec::new(),
            is_robot,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> PlayerColor {
        self.color
    }

    pub fn start_position(&self) -> Position {
        self.color.start_position()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        debug_assert!(position.is_in_bounds(BOARD_SIZE));
        self.position = position;
    }

    pub fn is_robot(&self) -> bool {
        self.is_robot
    }

    pub fn current_objective(&self) -> Option<Objective> {
        self.objectives.last().map(|card| card.objective)
    }

    /// Remaining cards, bottom of the stack first.
    pub fn objectives(&self) -> &[ObjectiveCard] {
        &self.objectives
    }

    pub fn remaining_objectives(&self) -> usize {
        self.objectives.len()
    }

    pub fn achieved_objectives(&self) -> &[ObjectiveCard] {
        &self.achieved
    }

    pub fn has_completed_all_objectives(&self) -> bool {
        self.objectives.is_empty()
    }

    pub fn is_at_start(&self) -> bool {
        self.position == self.start_position()
    }

    pub fn has_won(&self, win_condition: WinCondition) -> bool {
        match win_condition {
            WinCondition::Simplified => self.has_completed_all_objectives(),
            WinCondition::Standard => self.has_completed_all_objectives() && self.is_at_start(),
        }
    }

    /// Pop the current objective, mark it reached and file it as achieved.
    pub(crate) fn achieve_current(&mut self) -> Option<ObjectiveCard> {
        let mut card = self.objectives.pop()?;
        card.reached = true;
        self.achieved.push(card);
        Some(card)
    }

    /// Put the most recently achieved card back on top of the backlog.
    pub(crate) fn restore_last_achieved(&mut self) -> Option<ObjectiveCard> {
        let mut card = self.achieved.pop()?;
        card.reached = false;
        self.objectives.push(card);
        Some(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_start_corners() {
        let starts: Vec<_> = PlayerColor::ALL.iter().map(|c| c.start_position()).collect();
        assert_eq!(
            starts,
            vec![
                Position::new(0, 0),
                Position::new(0, 6),
                Position::new(6, 6),
                Position::new(6, 0)
            ]
        );
    }

    #[test]
    fn test_deal_is_even_and_complete() {
        let hands = deal_objectives(&mut StdRng::seed_from_u64(3));
        assert_eq!(hands.len(), PLAYER_COUNT);
        assert!(hands.iter().all(|h| h.len() == CARDS_PER_PLAYER));
        let distinct: HashSet<_> = hands.iter().flatten().map(|c| c.objective).collect();
        assert_eq!(distinct.len(), 24);
        assert!(hands.iter().flatten().all(|c| !c.reached));
    }

    #[test]
    fn test_new_player() {
        let player = Player::new(2, vec![ObjectiveCard::new(Objective::Map)], true);
        assert_eq!(player.name(), "Player 3");
        assert_eq!(player.color(), PlayerColor::Green);
        assert!(player.is_at_start());
        assert!(player.is_robot());
        assert_eq!(player.current_objective(), Some(Objective::Map));
    }

    #[test]
    fn test_achieve_and_restore() {
        let cards = vec![ObjectiveCard::new(Objective::Ring), ObjectiveCard::new(Objective::Bat)];
        let mut player = Player::new(0, cards, false);
        assert_eq!(player.current_objective(), Some(Objective::Bat));

        let card = player.achieve_current().unwrap();
        assert!(card.reached);
        assert_eq!(player.remaining_objectives(), 1);
        assert_eq!(player.achieved_objectives(), &[card]);
        assert_eq!(player.current_objective(), Some(Objective::Ring));

        let restored = player.restore_last_achieved().unwrap();
        assert!(!restored.reached);
        assert_eq!(player.current_objective(), Some(Objective::Bat));
        assert!(player.achieved_objectives().is_empty());
    }

    #[test]
    fn test_win_conditions() {
        let mut player = Player::new(1, Vec::new(), false);
        assert!(player.has_won(WinCondition::Simplified));
        assert!(player.has_won(WinCondition::Standard));

        player.set_position(Position::new(3, 3));
        assert!(player.has_won(WinCondition::Simplified));
        assert!(!player.has_won(WinCondition::Standard));

        let busy = Player::new(1, vec![ObjectiveCard::new(Objective::Keys)], false);
        assert!(!busy.has_won(WinCondition::Simplified));
    }
}
