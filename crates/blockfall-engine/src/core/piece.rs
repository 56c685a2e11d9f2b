use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Enum representing the type of piece.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::Display,
)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    #[display("I")]
    I = 0,
    /// O-piece.
    #[display("O")]
    O = 1,
    /// T-piece.
    #[display("T")]
    T = 2,
    /// S-piece.
    #[display("S")]
    S = 3,
    /// Z-piece.
    #[display("Z")]
    Z = 4,
    /// J-piece.
    #[display("J")]
    J = 5,
    /// L-piece.
    #[display("L")]
    L = 6,
}

/// Allows drawing a uniformly random piece kind with `rng.random()`.
///
/// Every kind is equally likely; there is no bag system smoothing the
/// distribution.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..=6) {
            0 => PieceKind::I,
            1 => PieceKind::O,
            2 => PieceKind::T,
            3 => PieceKind::S,
            4 => PieceKind::Z,
            5 => PieceKind::J,
            _ => PieceKind::L,
        }
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// Builds a fresh spawn-orientation shape matrix for this kind.
    ///
    /// Every call copies the catalog template, so the returned matrix can be
    /// rotated and replaced freely without affecting the catalog or other
    /// pieces of the same kind.
    #[must_use]
    pub fn shape(self) -> Shape {
        Shape::from_template(SPAWN_TEMPLATES[self as usize])
    }

    /// Returns the display color of this kind as `0xRRGGBB`.
    #[must_use]
    pub const fn color(self) -> u32 {
        match self {
            PieceKind::I => 0x00_FFFF,
            PieceKind::O => 0xFF_FF00,
            PieceKind::T => 0x80_0080,
            PieceKind::S => 0x00_FF00,
            PieceKind::Z => 0xFF_0000,
            PieceKind::J => 0x00_00FF,
            PieceKind::L => 0xFF_8000,
        }
    }
}

/// Largest side length of any catalog shape in any rotation (the I-piece
/// spans 4 cells).
const MAX_SHAPE_DIM: usize = 4;

type ShapeRow = ArrayVec<bool, MAX_SHAPE_DIM>;

/// Spawn-orientation cell matrices, indexed by `PieceKind as usize`.
const SPAWN_TEMPLATES: [&[&[u8]]; PieceKind::LEN] = [
    // I-piece
    &[&[1, 1, 1, 1]],
    // O-piece
    &[&[1, 1], &[1, 1]],
    // T-piece
    &[&[0, 1, 0], &[1, 1, 1]],
    // S-piece
    &[&[0, 1, 1], &[1, 1, 0]],
    // Z-piece
    &[&[1, 1, 0], &[0, 1, 1]],
    // J-piece
    &[&[1, 0, 0], &[1, 1, 1]],
    // L-piece
    &[&[0, 0, 1], &[1, 1, 1]],
];

/// Rectangular 0/1 cell matrix of a piece, in board orientation.
///
/// Shapes are value objects: rotation returns a fresh matrix and never
/// touches the template it was built from. A `rows × cols` matrix rotated
/// clockwise becomes `cols × rows`, so non-square shapes (like the flat
/// I-piece) change dimensions as they turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    rows: ArrayVec<ShapeRow, MAX_SHAPE_DIM>,
}

impl Shape {
    fn from_template(template: &[&[u8]]) -> Self {
        let rows = template
            .iter()
            .map(|row| row.iter().map(|&cell| cell != 0).collect())
            .collect();
        Self { rows }
    }

    /// Number of columns in the matrix.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    /// Number of rows in the matrix.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the cell at `(x, y)` within the matrix is occupied.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> bool {
        self.rows[y][x]
    }

    /// Iterates over the `(x, y)` offsets of all occupied cells.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(x, &cell)| cell.then_some((x, y)))
        })
    }

    /// Returns the matrix rotated 90° clockwise.
    ///
    /// For a `rows × cols` input the output is `cols × rows`, with
    /// `rotated[x][rows - 1 - y] = original[y][x]`. Applying the transform
    /// four times yields the original matrix.
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        let height = self.height();
        let mut rows: ArrayVec<ShapeRow, MAX_SHAPE_DIM> = (0..self.width())
            .map(|_| (0..height).map(|_| false).collect())
            .collect();
        for (y, row) in self.rows.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                rows[x][height - 1 - y] = cell;
            }
        }
        Self { rows }
    }
}

/// The active falling piece: a catalog kind, its current shape matrix, and
/// the position of the matrix's top-left cell in board coordinates.
///
/// The position is signed: movement and rotation are probed at *proposed*
/// positions before being applied, and proposals one column past the left
/// wall are legal to test (they collide and get rejected).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    x: i32,
    y: i32,
}

impl Piece {
    /// Creates a piece of the given kind at its spawn position:
    /// horizontally centered on a board `board_width` columns wide,
    /// vertically at row 0.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        let shape = kind.shape();
        let x = (board_width / 2 - shape.width() / 2) as i32;
        Self {
            kind,
            shape,
            x,
            y: 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the display color of this piece as `0xRRGGBB`.
    #[must_use]
    pub const fn color(&self) -> u32 {
        self.kind.color()
    }

    /// Column of the shape's top-left cell.
    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Row of the shape's top-left cell.
    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Iterates over the absolute board positions of all occupied cells.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied_cells()
            .map(move |(dx, dy)| (self.x + dx as i32, self.y + dy as i32))
    }

    pub(crate) fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    pub(crate) fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }
}
