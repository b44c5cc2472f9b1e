//! Behavioural scenarios for the match state machine and the engine.

use noughts_core::{
    Board, Game, GameStatus, Mode, MoveError, Origin, Player, Session, SessionConfig, best_move,
    evaluate,
};

fn board(notation: &str) -> Board {
    notation.parse().expect("valid board")
}

#[test]
fn test_center_opening_hands_turn_to_o() {
    let mut game = Game::new();
    game.apply_move(4).expect("legal move");

    assert_eq!(evaluate(game.board()), GameStatus::InProgress);
    assert_eq!(game.to_move(), Player::O);
}

#[test]
fn test_engine_blocks_open_row() {
    // X X . / O . . / . . .  O to move must take 2.
    let best = best_move(&board("XX.O....."), Player::O, Player::X);
    assert_eq!(best.index, Some(2));
}

#[test]
fn test_engine_wins_before_blocking() {
    // X X . / O O . / . . .  O can block at 2 or complete its own row at 5.
    // Finishing the row now is the quickest win.
    let best = best_move(&board("XX.OO...."), Player::O, Player::X);
    assert_eq!(best.index, Some(5));
    assert_eq!(best.score, 9);
}

#[test]
fn test_full_board_without_line_is_draw() {
    assert_eq!(evaluate(&board("XOXXOOOXX")), GameStatus::Draw);
}

#[test]
fn test_top_row_is_reported_with_its_line() {
    assert_eq!(
        evaluate(&board("XXXOO.O..")),
        GameStatus::Won {
            winner: Player::X,
            line: [0, 1, 2]
        }
    );
}

#[test]
fn test_turn_alternates_from_x() {
    let mut session = Session::new(SessionConfig {
        mode: Mode::HumanVsHuman,
        human_side: Player::X,
    });
    let mut turns = Vec::new();
    for index in [0, 4, 8, 2, 6, 3, 5, 7, 1] {
        turns.push(session.game().to_move());
        session.apply_move(index, Origin::Human).expect("legal move");
    }

    let expected: Vec<Player> = (0..turns.len())
        .map(|ply| if ply % 2 == 0 { Player::X } else { Player::O })
        .collect();
    assert_eq!(turns, expected);
}

#[test]
fn test_move_then_undo_restores_state() {
    let mut session = Session::new(SessionConfig {
        mode: Mode::HumanVsHuman,
        human_side: Player::X,
    });
    session.apply_move(4, Origin::Human).expect("legal move");
    let before = session.clone();

    session.apply_move(0, Origin::Human).expect("legal move");
    session.undo();

    assert_eq!(session.game().board(), before.game().board());
    assert_eq!(session.game().to_move(), before.game().to_move());
    assert_eq!(session, before);
}

#[test]
fn test_repeated_undo_from_start_changes_nothing() {
    let mut session = Session::default();
    let start = session.clone();
    for _ in 0..5 {
        assert_eq!(session.undo(), 0);
        assert_eq!(session, start);
    }
}

#[test]
fn test_rejected_moves_leave_state_unchanged() {
    let mut session = Session::new(SessionConfig {
        mode: Mode::HumanVsEngine,
        human_side: Player::X,
    });
    session.apply_move(4, Origin::Human).expect("legal move");
    let before = session.clone();

    assert!(matches!(
        session.apply_move(0, Origin::Human),
        Err(MoveError::NotYourTurn { .. })
    ));
    session.engine_reply().expect("engine agrees with rules");
    let after_reply = session.clone();

    assert_eq!(
        session.apply_move(4, Origin::Human),
        Err(MoveError::SquareOccupied(4))
    );
    assert_eq!(session, after_reply);
    assert_ne!(session, before);
}

#[test]
fn test_engine_vs_engine_is_a_draw() {
    let mut game = Game::new();
    while !game.status().is_terminal() {
        let side = game.to_move();
        let best = best_move(game.board(), side, side.opponent());
        let index = best.index.expect("non-terminal position has a move");
        game.apply_move(index).expect("engine move is legal");
    }
    assert_eq!(game.status(), GameStatus::Draw);
    assert_eq!(game.history_len(), 9);
}

#[test]
fn test_game_state_serializes() {
    let mut game = Game::new();
    game.apply_move(4).expect("legal move");
    let json = serde_json::to_string(&game).expect("serializable");
    let restored: Game = serde_json::from_str(&json).expect("deserializable");
    assert_eq!(restored, game);
}
