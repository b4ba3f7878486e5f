//! Terminal rendering and input loops.
//!
//! Each loop owns its session and processes one event to completion before
//! taking the next, so handlers never overlap.

use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument, warn};
use turnplay::{
    Choice, ChoiceGameSession, ChoiceSnapshot, ChoiceStatus, GameConfig, GameSession,
    HOTSEAT_SIDE, LOCAL_SEAT, Mode, OpponentScheduler, Position, RandomOpponent, RngRandomness,
    Scoreboard, Seat, SessionId, SessionSnapshot, SessionStatus, StdoutTransport, Submission,
    SyncAdapter, ViewSink,
};

/// Where terminal views print.
#[derive(Debug, Clone, Copy)]
pub enum Screen {
    /// Standard output.
    Stdout,
    /// Standard error, when stdout carries peer messages.
    Stderr,
}

impl Screen {
    fn print(self, text: &str) {
        let result = match self {
            Screen::Stdout => writeln!(std::io::stdout().lock(), "{}", text),
            Screen::Stderr => writeln!(std::io::stderr().lock(), "{}", text),
        };
        if let Err(e) = result {
            debug!(error = %e, "Terminal write failed");
        }
    }
}

/// Draws tic-tac-toe snapshots.
#[derive(Debug, Clone, Copy)]
pub struct BoardView {
    screen: Screen,
}

impl ViewSink<SessionSnapshot> for BoardView {
    fn render(&mut self, snapshot: &SessionSnapshot) {
        let mut text = format!("\n{}\n\n{}", snapshot.board.display(), snapshot.status_line());
        if snapshot.status.is_terminal() {
            text.push_str(&format!("\n{}", snapshot.status));
        }
        self.screen.print(&text);
    }
}

/// Draws rock-paper-scissors snapshots.
#[derive(Debug, Clone, Copy)]
pub struct ChoiceView;

impl ViewSink<ChoiceSnapshot> for ChoiceView {
    fn render(&mut self, snapshot: &ChoiceSnapshot) {
        let text = match (snapshot.status, snapshot.revealed) {
            (ChoiceStatus::Resolved(outcome), Some([first, second])) => {
                format!("Player 1: {first}  Player 2: {second}  =>  {outcome}")
            }
            (ChoiceStatus::AwaitingChoices, _) if snapshot.mode == Mode::Local => {
                format!("{}, choose rock, paper or scissors", snapshot.turn_owner)
            }
            (ChoiceStatus::AwaitingChoices, _) => "Choose rock, paper or scissors".to_string(),
            (ChoiceStatus::ReadyToReveal, _) => "Both players chose. Type 'reveal'.".to_string(),
            (ChoiceStatus::AwaitingOpponent, _) => "Waiting for the opponent...".to_string(),
            (status, _) => status.to_string(),
        };
        Screen::Stdout.print(&text);
    }
}

/// A line typed by the user or received from the peer.
enum Line {
    Quit,
    Reset,
    Reveal,
    Other(String),
}

impl Line {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "q" | "quit" | "exit" => Line::Quit,
            "reset" | "again" => Line::Reset,
            "reveal" => Line::Reveal,
            _ => Line::Other(raw.trim().to_string()),
        }
    }
}

/// Maps 1-9 (as drawn on the board) or a position label to a board index.
fn cell_index(input: &str) -> Option<usize> {
    match input.parse::<usize>() {
        Ok(n) if (1..=9).contains(&n) => Some(n - 1),
        Ok(_) => None,
        Err(_) => Position::from_label_or_number(input).map(Position::to_index),
    }
}

fn stdin_lines() -> tokio::io::Lines<BufReader<tokio::io::Stdin>> {
    BufReader::new(tokio::io::stdin()).lines()
}

/// Local hotseat tic-tac-toe.
#[instrument(skip(config))]
pub async fn run_local_tictactoe(config: &GameConfig) -> Result<()> {
    let rng = RngRandomness::from_seed_option(*config.seed());
    let view = BoardView { screen: Screen::Stdout };
    let mut session = GameSession::new(Box::new(rng), Box::new(view));
    let mut scoreboard = Scoreboard::new();
    let mut recorded = false;

    Screen::Stdout.print("Tic-tac-toe. Enter 1-9 to move, 'reset' for a new game, 'quit' to leave.");
    session.start(Mode::Local, None);

    let mut lines = stdin_lines();
    while let Some(raw) = lines.next_line().await? {
        match Line::parse(&raw) {
            Line::Quit => break,
            Line::Reset => {
                session.reset();
                recorded = false;
            }
            Line::Reveal => {}
            Line::Other(input) => {
                if let Some(index) = cell_index(&input) {
                    session.apply_local_input(index);
                }
            }
        }
        if !recorded && session.status().is_terminal() {
            scoreboard.record_hotseat(session.status());
            recorded = true;
            Screen::Stdout.print(&format!("{}: {}", HOTSEAT_SIDE, scoreboard.summary()));
        }
    }

    info!(summary = %scoreboard.summary(), "Leaving tic-tac-toe");
    Ok(())
}

/// Online tic-tac-toe over stdio: moves are written to stdout as JSON lines,
/// peer messages are read from stdin.
#[instrument(skip(config, rng))]
pub async fn run_online_tictactoe(
    config: &GameConfig,
    session_id: SessionId,
    rng: RngRandomness,
) -> Result<()> {
    let view = BoardView { screen: Screen::Stderr };
    let mut session =
        GameSession::new(Box::new(rng), Box::new(view)).with_session_id(session_id.clone());
    let mut adapter = SyncAdapter::new(session_id.clone(), config.user_id().clone(), Box::new(StdoutTransport));
    let mut scoreboard = Scoreboard::new();
    let mut recorded = false;

    Screen::Stderr.print(&format!(
        "Game id {} (peer {}). Waiting for game_state; enter 1-9 to move.",
        session_id,
        config.peer_url()
    ));
    adapter.join();

    let mut lines = stdin_lines();
    while let Some(raw) = lines.next_line().await? {
        let trimmed = raw.trim();
        if trimmed.starts_with('{') {
            match adapter.on_peer_message(&mut session, trimmed) {
                Ok(event) => debug!(?event, "Peer message applied"),
                Err(e) => warn!(error = %e, "Peer message rejected"),
            }
        } else {
            match Line::parse(trimmed) {
                Line::Quit => break,
                Line::Reset => {
                    session.reset();
                    recorded = false;
                }
                Line::Reveal => {}
                Line::Other(input) => {
                    if let Some(index) = cell_index(&input) {
                        adapter.local_input(&mut session, index);
                    }
                }
            }
        }

        if session.status() == SessionStatus::Active {
            recorded = false;
        } else if !recorded && session.status().is_terminal() {
            scoreboard.record_tictactoe(session.status(), session.local_side());
            recorded = true;
            Screen::Stderr.print(&scoreboard.summary());
        }
    }

    info!(summary = %scoreboard.summary(), "Leaving online tic-tac-toe");
    Ok(())
}

/// Rock-paper-scissors, hotseat or against the simulated online opponent.
#[instrument(skip(config))]
pub async fn run_rps(config: &GameConfig, mode: Mode) -> Result<()> {
    let rng = RngRandomness::from_seed_option(*config.seed());
    let (mut scheduler, mut replies) = OpponentScheduler::new(
        Box::new(RandomOpponent::new(rng)),
        config.opponent_delay(),
    );
    let mut session = ChoiceGameSession::new(mode, Box::new(ChoiceView));
    let mut scoreboard = Scoreboard::new();
    let mut lines = stdin_lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(raw) = line? else { break };
                match Line::parse(&raw) {
                    Line::Quit => break,
                    Line::Reset => {
                        scheduler.cancel();
                        session.reset();
                    }
                    Line::Reveal => {
                        if let Some(outcome) = session.reveal() {
                            scoreboard.record_choice(outcome, Seat::One);
                            Screen::Stdout.print(&scoreboard.summary());
                        }
                    }
                    Line::Other(input) => {
                        let Some(choice) = Choice::parse(&input) else {
                            continue;
                        };
                        let seat = match mode {
                            Mode::Local => session.turn_owner(),
                            Mode::Online => LOCAL_SEAT,
                        };
                        if let Submission::AwaitOpponent(ticket) = session.submit_choice(seat, choice) {
                            scheduler.schedule(ticket);
                        }
                    }
                }
            }
            Some(reply) = replies.recv() => {
                if let Some(outcome) = session.apply_opponent_choice(reply.ticket, reply.choice) {
                    scoreboard.record_choice(outcome, LOCAL_SEAT);
                    Screen::Stdout.print(&scoreboard.summary());
                }
            }
        }
    }

    scheduler.cancel();
    info!(summary = %scoreboard.summary(), "Leaving rock-paper-scissors");
    Ok(())
}
