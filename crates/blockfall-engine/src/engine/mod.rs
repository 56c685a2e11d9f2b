//! Gameplay orchestration on top of the core grid model.
//!
//! - [`GameField`] - Single-turn game state (board, falling piece, piece
//!   source)
//! - [`GameSession`] - The engine boundary: commands, gravity tick, and
//!   read-only queries
//! - [`GameStats`] - Score, level, cleared lines, and drop pacing
//! - [`PieceSource`] / [`PieceSeed`] - Seedable uniform piece generation
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] (randomly seeded, or [`GameSession::with_seed`]
//!    for a reproducible piece sequence)
//! 2. Forward player input as commands (move, rotate, soft/hard drop)
//! 3. Call [`GameSession::tick`] every frame with the elapsed time
//! 4. Render from the query methods after each command or tick
//! 5. On game over (a fresh spawn collided), offer
//!    [`GameSession::restart`]
//!
//! Invalid commands are silent no-ops, so hosts can forward input
//! unconditionally.

pub use self::{game_field::*, game_session::*, game_stats::*, piece_source::*};

mod game_field;
mod game_session;
mod game_stats;
mod piece_source;
