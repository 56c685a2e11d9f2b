use std::time::Duration;

use crate::core::{board::Board, piece::Piece};

use super::{
    game_field::GameField,
    game_stats::GameStats,
    piece_source::{PieceSeed, PieceSource},
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// A running game: board, falling piece, counters, and gravity pacing.
///
/// This is the engine boundary consumed by a presentation layer. Commands
/// are zero-argument triggers that silently do nothing when the requested
/// move would collide or the game is over; after each command the caller
/// reads the outcome through the query methods.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::GameSession;
///
/// let mut session = GameSession::new();
/// session.move_left();
/// session.rotate();
/// session.hard_drop();
///
/// // the first piece is locked and the next one is falling
/// assert!(session.falling_piece().is_some());
/// assert!(session.session_state().is_playing());
///
/// // gravity advances with the per-frame elapsed time
/// session.tick(Duration::from_millis(16));
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    field: GameField,
    stats: GameStats,
    session_state: SessionState,
    since_drop: Duration,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates a session with a randomly seeded piece source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(PieceSource::new())
    }

    /// Like [`Self::new`], but with a fixed seed for a reproducible piece
    /// sequence.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_source(PieceSource::with_seed(seed))
    }

    fn with_source(piece_source: PieceSource) -> Self {
        Self {
            field: GameField::new(piece_source),
            stats: GameStats::new(),
            session_state: SessionState::Playing,
            since_drop: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.field.board()
    }

    /// The falling piece, or `None` once the game is over.
    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.field.falling_piece()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn total_cleared_lines(&self) -> usize {
        self.stats.total_cleared_lines()
    }

    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.stats.drop_interval()
    }

    #[must_use]
    pub fn session_state(&self) -> &SessionState {
        &self.session_state
    }

    /// Moves the falling piece one column left, if the move fits.
    pub fn move_left(&mut self) {
        if self.session_state.is_playing() {
            let _ = self.field.try_shift(-1);
        }
    }

    /// Moves the falling piece one column right, if the move fits.
    pub fn move_right(&mut self) {
        if self.session_state.is_playing() {
            let _ = self.field.try_shift(1);
        }
    }

    /// Rotates the falling piece 90° clockwise in place, if the rotated
    /// shape fits.
    pub fn rotate(&mut self) {
        if self.session_state.is_playing() {
            let _ = self.field.try_rotate();
        }
    }

    /// Drops the falling piece one row. When it cannot descend further, the
    /// piece locks: its cells join the board, filled rows clear, counters
    /// update, and the next piece spawns — all within this call.
    pub fn soft_drop(&mut self) {
        if !self.session_state.is_playing() {
            return;
        }
        if self.field.try_descend().is_ok() {
            return;
        }
        self.lock_and_respawn();
    }

    /// Drops the falling piece straight to its resting row and locks it,
    /// with the same lock/clear/spawn sequence as a landing soft drop.
    pub fn hard_drop(&mut self) {
        if !self.session_state.is_playing() {
            return;
        }
        while self.field.try_descend().is_ok() {}
        self.lock_and_respawn();
    }

    /// Advances game time by the per-frame elapsed delta.
    ///
    /// Once the accumulated time reaches the current drop interval, one
    /// soft-drop step runs and the accumulator resets to zero.
    pub fn tick(&mut self, delta: Duration) {
        if !self.session_state.is_playing() {
            return;
        }
        self.since_drop += delta;
        if self.since_drop >= self.stats.drop_interval() {
            self.soft_drop();
            self.since_drop = Duration::ZERO;
        }
    }

    /// Resets the board, counters, and state, then spawns a new piece.
    /// Callable at any time, including mid-game and after game-over.
    pub fn restart(&mut self) {
        self.field.reset();
        self.stats = GameStats::new();
        self.session_state = SessionState::Playing;
        self.since_drop = Duration::ZERO;
    }

    fn lock_and_respawn(&mut self) {
        let cleared_lines = self.field.lock_piece();
        self.stats.record_lock(cleared_lines);
        if self.field.spawn_piece().is_err() {
            self.session_state = SessionState::GameOver;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        board::{BOARD_HEIGHT, BOARD_WIDTH, Cell},
        piece::PieceKind,
    };

    fn seeded_session(n: u8) -> GameSession {
        GameSession::with_seed(PieceSeed::from_bytes([n; 16]))
    }

    /// Hard-drops until the stack tops out. Centered spawns never touch the
    /// outer columns, so no row can fill and the game must end.
    fn play_to_game_over(session: &mut GameSession) {
        for _ in 0..1000 {
            if session.session_state().is_game_over() {
                return;
            }
            session.hard_drop();
        }
        panic!("session did not top out");
    }

    #[test]
    fn new_session_starts_playing_with_a_piece() {
        let session = seeded_session(1);
        assert!(session.session_state().is_playing());
        assert!(session.falling_piece().is_some());
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), 1);
        assert_eq!(session.total_cleared_lines(), 0);
        assert_eq!(session.drop_interval(), Duration::from_millis(1000));
    }

    #[test]
    fn soft_drop_moves_the_piece_one_row() {
        let mut session = seeded_session(2);
        let y = session.falling_piece().unwrap().y();

        session.soft_drop();
        assert_eq!(session.falling_piece().unwrap().y(), y + 1);
    }

    #[test]
    fn hard_drop_locks_and_spawns_the_next_piece() {
        let mut session = seeded_session(3);

        session.hard_drop();

        assert_eq!(session.board().occupied_cells(), 4);
        assert_eq!(session.stats().completed_pieces(), 1);
        assert_eq!(session.falling_piece().unwrap().y(), 0);
    }

    #[test]
    fn moves_against_the_wall_are_silently_ignored() {
        let mut session = seeded_session(4);
        for _ in 0..BOARD_WIDTH {
            session.move_left();
        }
        let x = session.falling_piece().unwrap().x();

        session.move_left();
        assert_eq!(session.falling_piece().unwrap().x(), x);
    }

    #[test]
    fn tick_advances_gravity_at_the_drop_interval() {
        let mut session = seeded_session(5);
        let y = session.falling_piece().unwrap().y();

        session.tick(Duration::from_millis(999));
        assert_eq!(session.falling_piece().unwrap().y(), y);

        session.tick(Duration::from_millis(1));
        assert_eq!(session.falling_piece().unwrap().y(), y + 1);
    }

    #[test]
    fn tick_performs_one_step_and_resets_the_accumulator() {
        let mut session = seeded_session(6);
        let y = session.falling_piece().unwrap().y();

        // a long frame still advances a single row
        session.tick(Duration::from_millis(2500));
        assert_eq!(session.falling_piece().unwrap().y(), y + 1);

        // the overshoot was not carried over
        session.tick(Duration::from_millis(600));
        assert_eq!(session.falling_piece().unwrap().y(), y + 1);

        session.tick(Duration::from_millis(400));
        assert_eq!(session.falling_piece().unwrap().y(), y + 2);
    }

    #[test]
    fn locking_into_full_rows_scores_and_clears() {
        let mut session = seeded_session(7);
        for y in [BOARD_HEIGHT - 2, BOARD_HEIGHT - 1] {
            for x in (0..BOARD_WIDTH).filter(|&x| x != 4 && x != 5) {
                session.field.board.set_cell(x, y, Cell::Block(PieceKind::J));
            }
        }
        session.field.falling_piece = Some(Piece::spawn(PieceKind::O, BOARD_WIDTH));

        session.hard_drop();

        assert_eq!(session.total_cleared_lines(), 2);
        assert_eq!(session.score(), 200);
        assert_eq!(session.level(), 1);
        assert_eq!(session.board().occupied_cells(), 0);
        assert!(session.falling_piece().is_some());
    }

    #[test]
    fn stacking_without_clearing_ends_the_game() {
        let mut session = seeded_session(8);
        play_to_game_over(&mut session);

        assert!(session.session_state().is_game_over());
        assert!(session.falling_piece().is_none());
        assert_eq!(session.total_cleared_lines(), 0);
    }

    #[test]
    fn commands_are_inert_after_game_over() {
        let mut session = seeded_session(9);
        play_to_game_over(&mut session);
        let board_before = session.board().clone();
        let score_before = session.score();

        session.move_left();
        session.move_right();
        session.rotate();
        session.soft_drop();
        session.hard_drop();
        session.tick(Duration::from_millis(5000));

        assert!(session.session_state().is_game_over());
        assert!(session.falling_piece().is_none());
        assert_eq!(*session.board(), board_before);
        assert_eq!(session.score(), score_before);
    }

    #[test]
    fn restart_is_idempotent() {
        fn assert_fresh(session: &GameSession) {
            assert!(session.session_state().is_playing());
            assert_eq!(session.board().occupied_cells(), 0);
            assert_eq!(session.score(), 0);
            assert_eq!(session.level(), 1);
            assert_eq!(session.total_cleared_lines(), 0);
            assert_eq!(session.drop_interval(), Duration::from_millis(1000));
            assert_eq!(session.falling_piece().unwrap().y(), 0);
        }

        let mut session = seeded_session(10);
        for _ in 0..3 {
            session.hard_drop();
        }

        session.restart();
        assert_fresh(&session);

        session.restart();
        assert_fresh(&session);
    }

    #[test]
    fn restart_recovers_from_game_over() {
        let mut session = seeded_session(11);
        play_to_game_over(&mut session);

        session.restart();

        assert!(session.session_state().is_playing());
        assert!(session.falling_piece().is_some());
        assert_eq!(session.board().occupied_cells(), 0);
    }

    #[test]
    fn restart_discards_pending_gravity() {
        let mut session = seeded_session(12);
        session.tick(Duration::from_millis(900));

        session.restart();
        let y = session.falling_piece().unwrap().y();

        // the pre-restart accumulation does not count toward the next drop
        session.tick(Duration::from_millis(100));
        assert_eq!(session.falling_piece().unwrap().y(), y);
    }
}
