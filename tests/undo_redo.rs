//! Undo/redo restores exact prior state, through both the command layer and
//! the facade.
//!
//! Run with:
//!     cargo test --test undo_redo

use labyrinth_engine::engine::history::CommandHistory;
use labyrinth_engine::games::labyrinth::commands::TurnCommand;
use labyrinth_engine::games::labyrinth::player::{ObjectiveCard, Player};
use labyrinth_engine::games::labyrinth::{
    Arrow, Board, Direction, Game, GameState, LabyrinthFacade, Objective, Position, Tile,
    TileType, WinCondition, BOARD_SIZE,
};

fn connected_board(objectives: &[(Position, Objective)]) -> Board {
    let open = Tile::mobile(TileType::TJunction, Direction::South);
    let spine = Tile::mobile(TileType::TJunction, Direction::East);
    let mut tiles = [[open; BOARD_SIZE]; BOARD_SIZE];
    for row in tiles.iter_mut() {
        row[0] = spine;
    }
    for &(pos, objective) in objectives {
        tiles[pos.row][pos.col] = tiles[pos.row][pos.col].with_objective(objective);
    }
    Board::from_parts(tiles, open, None)
}

fn objective_game(win_condition: WinCondition) -> Game {
    let board = connected_board(&[(Position::new(4, 2), Objective::Bat)]);
    let hand = vec![ObjectiveCard::new(Objective::Owl), ObjectiveCard::new(Objective::Bat)];
    let players = vec![
        Player::new(0, hand, false),
        Player::new(1, vec![ObjectiveCard::new(Objective::Crown)], false),
        Player::new(2, vec![ObjectiveCard::new(Objective::Keys)], false),
        Player::new(3, vec![ObjectiveCard::new(Objective::Ring)], false),
    ];
    let mut game = Game::from_parts(board, players, win_condition).unwrap();
    game.start().unwrap();
    game
}

#[test]
fn test_turn_with_objective_round_trip() {
    let mut game = objective_game(WinCondition::Simplified);
    let mut history = CommandHistory::new();
    let before = game.snapshot();

    let turn = TurnCommand::new(
        Arrow::new(Position::new(6, 5), Direction::North),
        Direction::West,
        Position::new(4, 2),
    );
    history.execute_command(turn, &mut game).unwrap();
    let after = game.snapshot();
    assert_eq!(after.players[0].remaining_objectives(), 1);
    assert_eq!(after.current_player, 1);

    assert!(history.undo(&mut game));
    assert_eq!(game.snapshot(), before);
    let player = &game.players()[0];
    assert_eq!(player.current_objective(), Some(Objective::Bat));
    assert!(!player.objectives().last().unwrap().reached);
    assert!(player.achieved_objectives().is_empty());
    assert_eq!(game.board().last_arrow(), None);

    assert!(history.redo(&mut game));
    assert_eq!(game.snapshot(), after);
}

#[test]
fn test_undo_everything_then_redo_everything() {
    let mut game = objective_game(WinCondition::Simplified);
    let mut history = CommandHistory::new();
    history
        .execute_command(
            TurnCommand::new(
                Arrow::new(Position::new(0, 3), Direction::South),
                Direction::South,
                Position::new(4, 2),
            ),
            &mut game,
        )
        .unwrap();
    for _ in 0..3 {
        let here = game.current_player().position();
        history
            .execute_command(
                TurnCommand::new(Arrow::new(Position::new(0, 3), Direction::South), Direction::South, here),
                &mut game,
            )
            .unwrap();
    }
    assert_eq!(game.current_player_index(), 0);
    assert_eq!(history.undo_count(), 4);

    let mid = game.snapshot();
    while history.undo(&mut game) {}
    assert_eq!(game.state(), GameState::WaitingInsert);
    assert_eq!(game.current_player_index(), 0);
    assert_eq!(game.players()[0].remaining_objectives(), 2);
    while history.redo(&mut game) {}
    assert_eq!(game.snapshot(), mid);
}

#[test]
fn test_forbidden_arrow_follows_history() {
    let mut game = objective_game(WinCondition::Standard);
    let mut history = CommandHistory::new();
    let first = Arrow::new(Position::new(0, 1), Direction::South);
    let second = Arrow::new(Position::new(0, 5), Direction::South);

    let here = game.current_player().position();
    history
        .execute_command(TurnCommand::new(first, Direction::North, here), &mut game)
        .unwrap();
    let here = game.current_player().position();
    history
        .execute_command(TurnCommand::new(second, Direction::North, here), &mut game)
        .unwrap();
    assert!(!game.can_insert(second.opposite(BOARD_SIZE)));
    assert!(game.can_insert(first.opposite(BOARD_SIZE)));

    history.undo(&mut game);
    assert!(!game.can_insert(first.opposite(BOARD_SIZE)));
    assert!(game.can_insert(second.opposite(BOARD_SIZE)));

    history.redo(&mut game);
    assert!(!game.can_insert(second.opposite(BOARD_SIZE)));
}

#[test]
fn test_facade_round_trip() {
    let mut facade = LabyrinthFacade::seeded(21);
    facade.start_new_game(4, 0, true).unwrap();
    assert!(facade.rotate_spare_tile());
    let before = facade.snapshot().unwrap();

    facade
        .insert_tile(Arrow::new(Position::new(5, 0), Direction::East))
        .unwrap();
    let destination = *facade.reachable_positions().last().unwrap();
    facade.move_player(destination).unwrap();
    let after = facade.snapshot().unwrap();

    assert!(facade.can_undo());
    assert!(facade.undo());
    assert_eq!(facade.snapshot().unwrap(), before);

    assert!(facade.can_redo());
    assert!(facade.redo());
    assert_eq!(facade.snapshot().unwrap(), after);
}

#[test]
fn test_empty_history_noops() {
    let mut facade = LabyrinthFacade::seeded(22);
    facade.start_new_game(1, 0, false).unwrap();
    let before = facade.snapshot();

    assert!(!facade.can_undo());
    assert!(!facade.can_redo());
    assert!(!facade.undo());
    assert!(!facade.redo());
    assert_eq!(facade.snapshot(), before);
    assert_eq!((facade.undo_count(), facade.redo_count()), (0, 0));
}

#[test]
fn test_new_action_clears_redo() {
    let mut facade = LabyrinthFacade::seeded(23);
    facade.start_new_game(4, 0, true).unwrap();

    let here = facade.current_player().unwrap().position();
    facade
        .play_turn(Arrow::new(Position::new(1, 6), Direction::West), here)
        .unwrap();
    assert!(facade.undo());
    assert_eq!(facade.redo_count(), 1);

    let here = facade.current_player().unwrap().position();
    facade
        .play_turn(Arrow::new(Position::new(6, 3), Direction::North), here)
        .unwrap();
    assert_eq!(facade.redo_count(), 0);
    assert!(!facade.redo());
}

#[test]
fn test_no_undo_after_game_over() {
    let mut facade = LabyrinthFacade::seeded(24);
    facade.start_new_game(4, 0, true).unwrap();
    let here = facade.current_player().unwrap().position();
    facade
        .play_turn(Arrow::new(Position::new(3, 0), Direction::East), here)
        .unwrap();
    facade.abandon();
    assert!(!facade.can_undo());
    assert!(!facade.undo());
    assert_eq!(facade.state(), GameState::Aborted);
}
