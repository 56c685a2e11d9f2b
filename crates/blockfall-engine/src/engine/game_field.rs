use crate::{
    PieceCollisionError, SpawnCollisionError,
    core::{board::Board, piece::Piece},
};

use super::piece_source::PieceSource;

/// Single-turn game state: the grid, the falling piece, and the source of
/// upcoming pieces.
///
/// Every movement method probes the proposed position against the current
/// board before mutating anything, so rejected moves leave the field
/// untouched.
#[derive(Debug, Clone)]
pub struct GameField {
    pub(crate) board: Board,
    pub(crate) falling_piece: Option<Piece>,
    piece_source: PieceSource,
}

impl GameField {
    /// Creates a field with an empty board and the first piece spawned.
    #[must_use]
    pub fn new(mut piece_source: PieceSource) -> Self {
        let falling_piece = Piece::spawn(piece_source.next_kind(), Board::WIDTH);
        Self {
            board: Board::EMPTY,
            falling_piece: Some(falling_piece),
            piece_source,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The falling piece, or `None` after a spawn collision ended the game.
    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.falling_piece.as_ref()
    }

    /// Moves the falling piece one column sideways (`dx` of -1 or +1).
    pub fn try_shift(&mut self, dx: i32) -> Result<(), PieceCollisionError> {
        let Some(piece) = self.falling_piece.as_mut() else {
            return Err(PieceCollisionError);
        };
        if self.board.collides(piece.x() + dx, piece.y(), piece.shape()) {
            return Err(PieceCollisionError);
        }
        piece.translate(dx, 0);
        Ok(())
    }

    /// Moves the falling piece down one row.
    pub fn try_descend(&mut self) -> Result<(), PieceCollisionError> {
        let Some(piece) = self.falling_piece.as_mut() else {
            return Err(PieceCollisionError);
        };
        if self.board.collides(piece.x(), piece.y() + 1, piece.shape()) {
            return Err(PieceCollisionError);
        }
        piece.translate(0, 1);
        Ok(())
    }

    /// Replaces the falling piece's shape with its clockwise rotation, if
    /// the rotated matrix fits at the current position. There is no
    /// wall-kick fallback: the piece rotates in place or not at all.
    pub fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        let Some(piece) = self.falling_piece.as_mut() else {
            return Err(PieceCollisionError);
        };
        let rotated = piece.shape().rotated_right();
        if self.board.collides(piece.x(), piece.y(), &rotated) {
            return Err(PieceCollisionError);
        }
        piece.set_shape(rotated);
        Ok(())
    }

    /// Locks the falling piece into the board and clears any filled rows.
    ///
    /// Returns the number of rows cleared. The falling-piece slot is left
    /// empty; callers follow up with [`Self::spawn_piece`].
    pub fn lock_piece(&mut self) -> usize {
        let Some(piece) = self.falling_piece.take() else {
            return 0;
        };
        self.board.fill_piece(&piece);
        self.board.clear_lines()
    }

    /// Spawns the next piece from the source, horizontally centered at the
    /// top row.
    ///
    /// On collision the piece is discarded and the board is left untouched;
    /// the session layer treats this as the game-over transition.
    pub fn spawn_piece(&mut self) -> Result<(), SpawnCollisionError> {
        let piece = Piece::spawn(self.piece_source.next_kind(), Board::WIDTH);
        if self.board.collides(piece.x(), piece.y(), piece.shape()) {
            return Err(SpawnCollisionError);
        }
        self.falling_piece = Some(piece);
        Ok(())
    }

    /// Discards the board contents and spawns a fresh piece, keeping the
    /// piece source (and its seed stream) intact.
    pub fn reset(&mut self) {
        self.board = Board::EMPTY;
        self.falling_piece = Some(Piece::spawn(self.piece_source.next_kind(), Board::WIDTH));
    }
}
