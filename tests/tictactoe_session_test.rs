//! Tests for the tic-tac-toe session state machine.

use turnplay::{
    Board, GameSession, Mode, Player, Position, RecordingView, ScriptedRandomness,
    SessionSnapshot, SessionStatus, Square,
};

fn session(flips: &[bool]) -> (GameSession, RecordingView<SessionSnapshot>) {
    let view = RecordingView::new();
    let session = GameSession::new(
        Box::new(ScriptedRandomness::flips(flips.iter().copied())),
        Box::new(view.clone()),
    );
    (session, view)
}

fn board(cells: [&str; 9]) -> Board {
    Board::from_symbols(&cells).expect("valid board")
}

#[test]
fn test_new_session_is_pending_and_ignores_input() {
    let (mut session, view) = session(&[true]);
    assert_eq!(session.status(), SessionStatus::Pending);
    assert_eq!(session.apply_local_input(4), None);
    assert!(view.is_empty());
}

#[test]
fn test_start_local_uses_coin_for_first_mover() {
    let (mut session, view) = session(&[false]);
    session.start(Mode::Local, None);

    assert_eq!(session.status(), SessionStatus::Active);
    assert_eq!(session.current_turn_owner(), Player::O);
    assert_eq!(session.local_side(), Player::O);
    assert_eq!(session.board(), &Board::new());
    assert_eq!(view.len(), 1);
    assert_eq!(view.last().unwrap().status_line(), "Turn: O");
}

#[test]
fn test_start_online_keeps_assigned_side() {
    let (mut session, _view) = session(&[true]);
    session.start(Mode::Online, Some(Player::O));

    assert_eq!(session.current_turn_owner(), Player::X);
    assert_eq!(session.local_side(), Player::O);
    assert!(!session.is_my_turn());
    assert_eq!(session.snapshot().status_line(), "Opponent's move (X)");
}

#[test]
fn test_start_online_self_assigns_without_handshake() {
    // First flip picks the first mover, second flip the local side.
    let (mut session, _view) = session(&[true, false]);
    session.start(Mode::Online, None);

    assert_eq!(session.current_turn_owner(), Player::X);
    assert_eq!(session.local_side(), Player::O);
}

#[test]
fn test_local_moves_alternate_and_notify() {
    let (mut session, view) = session(&[true]);
    session.start(Mode::Local, None);

    let first = session.apply_local_input(4).expect("center is free");
    assert_eq!(first.player, Player::X);
    assert_eq!(first.position, Position::Center);
    assert_eq!(session.current_turn_owner(), Player::O);

    let second = session.apply_local_input(0).expect("corner is free");
    assert_eq!(second.player, Player::O);
    assert_eq!(session.board().get(Position::TopLeft), Square::Occupied(Player::O));
    assert_eq!(view.len(), 3);
}

#[test]
fn test_status_is_exclusive_and_monotonic() {
    let (mut session, _view) = session(&[true]);
    session.start(Mode::Local, None);

    let mut seen_terminal = false;
    for index in [0, 3, 1, 4, 2, 5, 6, 7, 8] {
        session.apply_local_input(index);
        let status = session.status();
        if seen_terminal {
            assert!(status.is_terminal(), "status reverted to {status}");
        }
        seen_terminal |= status.is_terminal();
    }
    assert_eq!(session.status(), SessionStatus::Won(Player::X));
}

#[test]
fn test_terminal_status_rejects_further_input() {
    let (mut session, view) = session(&[true]);
    session.start(Mode::Local, None);
    for index in [0, 3, 1, 4, 2] {
        session.apply_local_input(index);
    }
    assert_eq!(session.status(), SessionStatus::Won(Player::X));

    let before = session.snapshot();
    let frames = view.len();
    assert_eq!(session.apply_local_input(8), None);
    assert_eq!(session.snapshot(), before);
    assert_eq!(view.len(), frames);
    assert_eq!(before.status_line(), "Game over");
}

#[test]
fn test_winning_final_move_is_a_win_not_a_draw() {
    let (mut session, _view) = session(&[true]);
    session.start(Mode::Local, None);
    for index in [0, 1, 2, 3, 4, 5, 7, 6, 8] {
        assert!(session.apply_local_input(index).is_some(), "move {index}");
    }
    assert_eq!(session.status(), SessionStatus::Won(Player::X));
}

#[test]
fn test_full_board_without_line_is_draw() {
    let (mut session, _view) = session(&[true]);
    session.start(Mode::Local, None);
    for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
        assert!(session.apply_local_input(index).is_some(), "move {index}");
    }
    assert_eq!(session.status(), SessionStatus::Draw);
}

#[test]
fn test_evaluate_terminal_on_remote_boards() {
    let (mut won, _) = session(&[true]);
    won.start(Mode::Online, Some(Player::X));
    won.apply_remote_update(board(["X", "X", "X", "", "", "", "", "", ""]), Player::O);
    assert_eq!(won.evaluate_terminal(), SessionStatus::Won(Player::X));

    let (mut drawn, _) = session(&[true]);
    drawn.start(Mode::Online, Some(Player::X));
    drawn.apply_remote_update(board(["X", "O", "X", "O", "X", "O", "O", "X", "O"]), Player::X);
    assert_eq!(drawn.evaluate_terminal(), SessionStatus::Draw);
}

#[test]
fn test_occupied_slot_input_is_idempotent() {
    let (mut once, _) = session(&[true]);
    once.start(Mode::Local, None);
    once.apply_local_input(4);

    let (mut twice, _) = session(&[true]);
    twice.start(Mode::Local, None);
    twice.apply_local_input(4);
    assert_eq!(twice.apply_local_input(4), None);

    assert_eq!(once.snapshot(), twice.snapshot());
}

#[test]
fn test_off_board_index_is_ignored() {
    let (mut session, _view) = session(&[true]);
    session.start(Mode::Local, None);
    assert_eq!(session.apply_local_input(9), None);
    assert_eq!(session.current_turn_owner(), Player::X);
}

#[test]
fn test_out_of_turn_online_input_changes_nothing() {
    let (mut session, view) = session(&[true]);
    session.start(Mode::Online, Some(Player::O));
    let before = session.snapshot();
    let frames = view.len();

    for index in 0..9 {
        assert_eq!(session.apply_local_input(index), None);
    }
    assert_eq!(session.board(), &before.board);
    assert_eq!(session.current_turn_owner(), before.current_turn_owner);
    assert_eq!(view.len(), frames);
}

#[test]
fn test_online_move_hands_turn_to_peer() {
    let (mut session, _view) = session(&[true]);
    session.start(Mode::Online, Some(Player::X));

    let mv = session.apply_local_input(0).expect("our turn");
    assert_eq!(mv.player, Player::X);
    assert!(!session.is_my_turn());
    assert_eq!(session.apply_local_input(1), None);
}

#[test]
fn test_remote_update_always_wins() {
    let (mut session, view) = session(&[true]);
    session.start(Mode::Online, Some(Player::X));
    session.apply_local_input(0);
    session.apply_local_input(4);

    let remote = board(["", "O", "", "", "", "X", "", "", ""]);
    session.apply_remote_update(remote.clone(), Player::X);

    assert_eq!(session.board(), &remote);
    assert_eq!(session.current_turn_owner(), Player::X);
    assert!(session.is_my_turn());
    let last = view.last().unwrap();
    assert_eq!(last.board, remote);
    assert_eq!(last.status_line(), "Your move (X)");
}

#[test]
fn test_force_outcome_sets_terminal_status() {
    let (mut session, _view) = session(&[true]);
    session.start(Mode::Online, Some(Player::X));
    assert_eq!(session.force_outcome(Some(Player::O)), SessionStatus::Won(Player::O));
    assert_eq!(session.force_outcome(None), SessionStatus::Draw);
    assert_eq!(session.apply_local_input(0), None);
}

#[test]
fn test_local_reset_clears_board_and_redraws_first_mover() {
    let (mut session, _view) = session(&[true, false]);
    session.start(Mode::Local, None);
    session.apply_local_input(0);

    session.reset();
    assert_eq!(session.board(), &Board::new());
    assert_eq!(session.status(), SessionStatus::Active);
    assert_eq!(session.current_turn_owner(), Player::O);
}

#[test]
fn test_online_reset_reassigns_local_side() {
    // start: first mover X (flip 1), assigned X; reset: flip 2 -> O for both.
    let (mut session, _view) = session(&[true, false]);
    session.start(Mode::Online, Some(Player::X));
    assert_eq!(session.local_side(), Player::X);

    session.reset();
    assert_eq!(session.local_side(), Player::O);
    assert_eq!(session.current_turn_owner(), Player::O);
    assert!(session.is_my_turn());
}

#[test]
fn test_reset_before_start_stays_pending() {
    let (mut session, view) = session(&[true, false]);
    session.reset();

    assert_eq!(session.status(), SessionStatus::Pending);
    assert_eq!(session.mode(), Mode::Local);
    assert_eq!(session.apply_local_input(0), None);
    assert_eq!(session.apply_local_input(1), None);
    assert_eq!(session.board(), &Board::new());
    assert!(view.is_empty());

    // The coin was not consumed, so a later start sees the first flip.
    session.start(Mode::Online, Some(Player::O));
    assert_eq!(session.current_turn_owner(), Player::X);
}

#[test]
fn test_start_from_peer_adopts_opening_state() {
    let (mut session, view) = session(&[true]);
    let opening = board(["X", "", "", "", "", "", "", "", ""]);
    session.start_from_peer(Some(Player::O), opening.clone(), Player::O);

    assert_eq!(session.mode(), Mode::Online);
    assert_eq!(session.status(), SessionStatus::Active);
    assert_eq!(session.board(), &opening);
    assert_eq!(session.current_turn_owner(), Player::O);
    assert!(session.is_my_turn());
    assert_eq!(view.len(), 1);
    assert_eq!(view.last().unwrap().status_line(), "Your move (O)");
}
