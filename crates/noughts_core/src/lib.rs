//! Noughts core - game rules, match state and a perfect-play opponent.
//!
//! # Architecture
//!
//! - **Rules**: pure functions over a 3x3 [`Board`]: legal moves and outcome
//! - **Search**: exhaustive negamax with alpha-beta pruning ([`best_move`])
//! - **Game**: the match state machine with undo history ([`Game`])
//! - **Session**: mode and side policy, and when the engine replies ([`Session`])
//!
//! # Example
//!
//! ```
//! use noughts_core::{Mode, Origin, Player, Session, SessionConfig};
//!
//! let mut session = Session::new(SessionConfig {
//!     mode: Mode::HumanVsEngine,
//!     human_side: Player::X,
//! });
//! session.apply_move(4, Origin::Human).expect("center is free");
//! let reply = session.engine_reply().expect("engine agrees with rules");
//! assert!(reply.is_some());
//! assert_eq!(session.game().to_move(), Player::X);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod error;
mod game;
mod history;
mod position;
mod search;
mod session;
mod types;

// Public modules
pub mod invariants;
pub mod rules;

// Crate-level exports - Domain types
pub use position::Position;
pub use types::{Board, GameStatus, Line, Player, Square};

// Crate-level exports - Errors
pub use error::{BoardParseError, EngineError, MoveError};

// Crate-level exports - Rules
pub use rules::{LINES, evaluate, legal_moves};

// Crate-level exports - Search engine
pub use search::{BestMove, SearchReport, WIN_SCORE, best_move, search};

// Crate-level exports - Match state machine
pub use game::Game;
pub use history::{History, Snapshot};

// Crate-level exports - Session policy
pub use session::{EngineMove, Mode, Origin, Session, SessionConfig};
