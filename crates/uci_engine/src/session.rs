//! Line-oriented UCI session.
//!
//! `handle_line` takes one command and returns the lines to print, so the
//! protocol can be driven without real stdin/stdout.

use chess_core::{
    move_to_uci, set_position_from_uci, Board, Color, Engine, Game, Outcome,
};
use classical_engine::ClassicalEngine;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{clamp_depth, EngineConfig, MAX_DEPTH, MIN_DEPTH};

/// JSON view of the current game for the `board` command.
#[derive(Serialize)]
struct Snapshot<'a> {
    board: &'a Board,
    side_to_move: Color,
    in_check: bool,
    outcome: Option<Outcome>,
    fen: String,
}

pub struct UciSession<E: Engine = ClassicalEngine> {
    game: Game,
    engine: E,
    depth: u8,
    pruning: bool,
    quit: bool,
}

impl UciSession<ClassicalEngine> {
    pub fn new(config: &EngineConfig) -> Self {
        let engine = ClassicalEngine::new().with_pruning(config.pruning);
        let mut session = Self::with_engine(engine, config.depth);
        session.pruning = config.pruning;
        session
    }
}

impl<E: Engine> UciSession<E> {
    pub fn with_engine(engine: E, depth: u8) -> Self {
        Self {
            game: Game::new(),
            engine,
            depth: clamp_depth(depth as u32),
            pruning: true,
            quit: false,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// True once `quit` has been received.
    pub fn is_quit(&self) -> bool {
        self.quit
    }

    /// Handles one protocol line and returns the response lines.
    pub fn handle_line(&mut self, line: &str) -> Vec<String> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&cmd, args)) = parts.split_first() else {
            return Vec::new();
        };

        match cmd {
            "uci" => vec![
                format!("id name {}", self.engine.name()),
                format!("id author {}", self.engine.author()),
                format!(
                    "option name Depth type spin default {} min {MIN_DEPTH} max {MAX_DEPTH}",
                    self.depth
                ),
                format!("option name Pruning type check default {}", self.pruning),
                "uciok".to_string(),
            ],
            "isready" => vec!["readyok".to_string()],
            "ucinewgame" => {
                self.game.reset();
                self.engine.new_game();
                Vec::new()
            }
            "position" => self.position(args),
            "go" => self.go(args),
            "setoption" => self.set_option(args),
            "d" => self.describe(),
            "board" => self.snapshot(),
            "undo" => match self.game.undo() {
                Some(rec) => vec![format!(
                    "info string undid {}{}",
                    rec.from.to_coord(),
                    rec.to.to_coord()
                )],
                None => vec!["info string nothing to undo".to_string()],
            },
            "quit" => {
                self.quit = true;
                Vec::new()
            }
            other => {
                debug!(command = other, "ignoring unknown command");
                Vec::new()
            }
        }
    }

    fn position(&mut self, args: &[&str]) -> Vec<String> {
        // Work on a copy so a bad move list leaves the current game alone
        let mut next = self.game.clone();
        match set_position_from_uci(&mut next, args) {
            Ok(()) => {
                self.game = next;
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "rejected position command");
                vec![format!("info string error: {e}")]
            }
        }
    }

    fn go(&mut self, args: &[&str]) -> Vec<String> {
        if self.game.is_terminal() {
            return vec!["bestmove 0000".to_string()];
        }

        // `depth N` overrides for this search only; clock parameters are ignored
        let depth = args
            .iter()
            .position(|&a| a == "depth")
            .and_then(|i| args.get(i + 1))
            .and_then(|v| v.parse::<u32>().ok())
            .map(clamp_depth)
            .unwrap_or(self.depth);

        let result = self.engine.search(&mut self.game, depth);
        let Some(mv) = result.best_move else {
            return vec!["bestmove 0000".to_string()];
        };

        // UCI scores are from the mover's point of view
        let score = match self.game.side_to_move() {
            Color::White => result.score,
            Color::Black => -result.score,
        };
        let best = move_to_uci(self.game.board(), mv);
        info!(best = %best, score, nodes = result.nodes, "go");

        vec![
            format!(
                "info depth {} score cp {} nodes {}",
                result.depth, score, result.nodes
            ),
            format!("bestmove {best}"),
        ]
    }

    fn set_option(&mut self, args: &[&str]) -> Vec<String> {
        let name_at = args.iter().position(|&a| a == "name");
        let value_at = args.iter().position(|&a| a == "value");
        let Some(name_at) = name_at else {
            return vec!["info string setoption needs a name".to_string()];
        };
        let name_end = value_at.unwrap_or(args.len());
        if name_end <= name_at {
            return vec!["info string setoption needs a name".to_string()];
        }
        let name = args[name_at + 1..name_end].join(" ");
        let value = value_at
            .map(|i| args[i + 1..].join(" "))
            .unwrap_or_default();

        if name.eq_ignore_ascii_case("depth") {
            return match value.parse::<u32>() {
                Ok(d) => {
                    self.depth = clamp_depth(d);
                    Vec::new()
                }
                Err(_) => vec![format!("info string invalid depth {value:?}")],
            };
        }

        if self.engine.set_option(&name, &value) {
            if name.eq_ignore_ascii_case("pruning") {
                self.pruning = value.eq_ignore_ascii_case("true");
            }
            Vec::new()
        } else {
            vec![format!("info string unknown option {name}")]
        }
    }

    fn status(&self) -> String {
        match self.game.outcome() {
            Some(Outcome::Checkmate { winner }) => format!("checkmate, {winner} wins"),
            Some(Outcome::Stalemate) => "stalemate".to_string(),
            None if self.game.is_in_check(self.game.side_to_move()) => "check".to_string(),
            None => "in progress".to_string(),
        }
    }

    fn describe(&self) -> Vec<String> {
        let mut out: Vec<String> = self.game.board().to_string().lines().map(String::from).collect();
        out.push(format!("side to move: {}", self.game.side_to_move()));
        out.push(format!("status: {}", self.status()));
        out.push(format!("fen: {}", self.game.to_fen()));
        out
    }

    fn snapshot(&self) -> Vec<String> {
        let snap = Snapshot {
            board: self.game.board(),
            side_to_move: self.game.side_to_move(),
            in_check: self.game.is_in_check(self.game.side_to_move()),
            outcome: self.game.outcome(),
            fen: self.game.to_fen(),
        };
        match serde_json::to_string(&snap) {
            Ok(json) => vec![json],
            Err(e) => vec![format!("info string error: {e}")],
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
