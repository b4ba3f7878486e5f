//! Tests for the peer sync boundary.

use serde_json::{Value, json};
use tokio::sync::mpsc::UnboundedReceiver;
use turnplay::{
    ChannelTransport, GameSession, Mode, NullView, PeerEvent, Player, Position, RecordingView,
    ScriptedRandomness, SessionId, SessionSnapshot, SessionStatus, Square, SyncAdapter, SyncError,
};

fn setup() -> (GameSession, SyncAdapter, UnboundedReceiver<String>) {
    let id = SessionId::parse("123456").unwrap();
    let session = GameSession::new(Box::new(ScriptedRandomness::flips([true])), Box::new(NullView))
        .with_session_id(id.clone());
    let (transport, rx) = ChannelTransport::pair();
    let adapter = SyncAdapter::new(id, Some("u-42".to_string()), Box::new(transport));
    (session, adapter, rx)
}

fn sent(rx: &mut UnboundedReceiver<String>) -> Value {
    let raw = rx.try_recv().expect("a message was sent");
    serde_json::from_str(&raw).expect("outbound message is JSON")
}

fn peer(adapter: &mut SyncAdapter, session: &mut GameSession, message: Value) -> Result<PeerEvent, SyncError> {
    adapter.on_peer_message(session, &message.to_string())
}

#[test]
fn test_join_sends_join_game() {
    let (_session, mut adapter, mut rx) = setup();
    assert!(adapter.join());
    assert_eq!(
        sent(&mut rx),
        json!({"action": "join_game", "game_id": "123456", "user_id": "u-42"})
    );
}

#[test]
fn test_game_state_starts_session_with_peer_assignment() {
    let (mut session, mut adapter, mut rx) = setup();
    let event = peer(
        &mut adapter,
        &mut session,
        json!({"action": "game_state", "current_player": "X", "symbol": "O", "players": 2}),
    )
    .unwrap();

    assert_eq!(
        event,
        PeerEvent::Started {
            local_side: Player::O,
            current_player: Player::X
        }
    );
    assert_eq!(session.mode(), Mode::Online);
    assert_eq!(session.status(), SessionStatus::Active);
    assert!(!session.is_my_turn());

    assert_eq!(adapter.local_input(&mut session, 0), None);
    assert!(rx.try_recv().is_err(), "ignored input must not be sent");
}

#[test]
fn test_game_state_adopts_peer_turn_owner() {
    let (mut session, mut adapter, _rx) = setup();
    peer(
        &mut adapter,
        &mut session,
        json!({"action": "game_state", "current_player": "O", "symbol": "O"}),
    )
    .unwrap();
    assert_eq!(session.current_turn_owner(), Player::O);
    assert!(session.is_my_turn());
}

#[test]
fn test_local_move_is_sent_as_make_move() {
    let (mut session, mut adapter, mut rx) = setup();
    peer(
        &mut adapter,
        &mut session,
        json!({"action": "game_state", "current_player": "O", "symbol": "O"}),
    )
    .unwrap();

    let mv = adapter.local_input(&mut session, 4).expect("our turn");
    assert_eq!(mv.player, Player::O);
    assert_eq!(
        sent(&mut rx),
        json!({
            "action": "make_move",
            "game_id": "123456",
            "move": {"index": 4, "symbol": "O", "player_id": "u-42"}
        })
    );
    assert!(!session.is_my_turn());
}

#[test]
fn test_update_board_overwrites_local_state() {
    let (mut session, mut adapter, _rx) = setup();
    peer(
        &mut adapter,
        &mut session,
        json!({"action": "game_state", "current_player": "X", "symbol": "O"}),
    )
    .unwrap();

    let event = peer(
        &mut adapter,
        &mut session,
        json!({"action": "update_board", "board": ["X", "", "", "", "", "", "", "", ""], "current_player": "O"}),
    )
    .unwrap();

    assert_eq!(event, PeerEvent::BoardUpdated { is_my_turn: true });
    assert_eq!(session.board().get(Position::TopLeft), Square::Occupied(Player::X));
    assert_eq!(session.current_turn_owner(), Player::O);
}

#[test]
fn test_game_over_reports_winner_and_draw() {
    let (mut session, mut adapter, _rx) = setup();
    peer(
        &mut adapter,
        &mut session,
        json!({"action": "game_state", "current_player": "X", "symbol": "X"}),
    )
    .unwrap();

    let event = peer(&mut adapter, &mut session, json!({"action": "game_over", "winner": "X"})).unwrap();
    assert_eq!(
        event,
        PeerEvent::GameOver {
            status: SessionStatus::Won(Player::X),
            text: "X won!".to_string()
        }
    );

    let event = peer(&mut adapter, &mut session, json!({"action": "game_over", "winner": "draw"})).unwrap();
    assert_eq!(
        event,
        PeerEvent::GameOver {
            status: SessionStatus::Draw,
            text: "Draw!".to_string()
        }
    );
    assert_eq!(adapter.local_input(&mut session, 0), None);
}

#[test]
fn test_unknown_winner_is_rejected() {
    let (mut session, mut adapter, _rx) = setup();
    let err = peer(&mut adapter, &mut session, json!({"action": "game_over", "winner": "Z"})).unwrap_err();
    assert!(matches!(err, SyncError::UnknownWinner(w) if w == "Z"));
    assert_eq!(session.status(), SessionStatus::Pending);
}

#[test]
fn test_malformed_messages_leave_session_untouched() {
    let (mut session, mut adapter, _rx) = setup();
    let before = session.snapshot();

    let err = adapter.on_peer_message(&mut session, "not json").unwrap_err();
    assert!(matches!(err, SyncError::Malformed(_)));

    let err = peer(&mut adapter, &mut session, json!({"action": "teleport"})).unwrap_err();
    assert!(matches!(err, SyncError::Malformed(_)));

    let err = peer(
        &mut adapter,
        &mut session,
        json!({"action": "update_board", "board": ["X"], "current_player": "O"}),
    )
    .unwrap_err();
    assert!(matches!(err, SyncError::Board(_)));

    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_closed_transport_keeps_local_move() {
    let (mut session, mut adapter, rx) = setup();
    peer(
        &mut adapter,
        &mut session,
        json!({"action": "game_state", "current_player": "X", "symbol": "X"}),
    )
    .unwrap();
    drop(rx);

    assert!(adapter.local_input(&mut session, 8).is_some());
    assert_eq!(session.board().get(Position::BottomRight), Square::Occupied(Player::X));
    assert!(!adapter.join());
}

#[test]
fn test_local_mode_moves_are_not_sent() {
    let (mut session, mut adapter, mut rx) = setup();
    session.start(Mode::Local, None);
    assert!(adapter.local_input(&mut session, 0).is_some());
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_reset_before_game_state_keeps_waiting_for_peer() {
    let (mut session, mut adapter, mut rx) = setup();
    session.reset();

    assert_eq!(adapter.local_input(&mut session, 0), None);
    assert_eq!(adapter.local_input(&mut session, 1), None);
    assert!(rx.try_recv().is_err());
    assert_eq!(session.status(), SessionStatus::Pending);

    peer(
        &mut adapter,
        &mut session,
        json!({"action": "game_state", "current_player": "X", "symbol": "X"}),
    )
    .unwrap();
    assert_eq!(session.mode(), Mode::Online);
    assert!(adapter.local_input(&mut session, 0).is_some());
    assert_eq!(sent(&mut rx)["action"], "make_move");
}

#[test]
fn test_game_state_renders_one_frame_with_peer_turn_owner() {
    let id = SessionId::parse("123456").unwrap();
    let view = RecordingView::<SessionSnapshot>::new();
    // The coin would pick X; the peer says O moves first.
    let mut session = GameSession::new(Box::new(ScriptedRandomness::flips([true])), Box::new(view.clone()))
        .with_session_id(id.clone());
    let (transport, _rx) = ChannelTransport::pair();
    let mut adapter = SyncAdapter::new(id, None, Box::new(transport));

    peer(
        &mut adapter,
        &mut session,
        json!({
            "action": "game_state",
            "current_player": "O",
            "symbol": "X",
            "board": ["X", "", "", "", "", "", "", "", ""]
        }),
    )
    .unwrap();

    let frames = view.frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].current_turn_owner, Player::O);
    assert_eq!(frames[0].local_side, Player::X);
    assert_eq!(frames[0].board.get(Position::TopLeft), Square::Occupied(Player::X));
    assert_eq!(frames[0].status, SessionStatus::Active);
}
