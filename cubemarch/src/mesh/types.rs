//! Strongly-typed indexes of various flavors
//!
//! Users are unlikely to need these directly; they appear in the signatures
//! of [`Cube`](super::Cube) accessors.

/// A single axis, represented as a `u8` with one bit (between 0 and 3) set
///
/// Only the [`X`], [`Y`], and [`Z`] constants exist.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Axis(u8);

/// The X axis, i.e. `[1, 0, 0]` (left to right)
pub const X: Axis = Axis(1);
/// The Y axis, i.e. `[0, 1, 0]` (bottom to top)
pub const Y: Axis = Axis(2);
/// The Z axis, i.e. `[0, 0, 1]` (back to front)
pub const Z: Axis = Axis(4);

impl std::ops::BitAnd<Corner> for Axis {
    type Output = bool;
    fn bitand(self, rhs: Corner) -> bool {
        (self.0 & rhs.0) != 0
    }
}

impl std::ops::BitOr<Axis> for Axis {
    type Output = Corner;
    fn bitor(self, rhs: Axis) -> Self::Output {
        Corner(self.0 | rhs.0)
    }
}

impl From<Axis> for Corner {
    fn from(a: Axis) -> Self {
        Corner::new(a.0)
    }
}

/// Strongly-typed cube corner, in the `[0, 8)` range
///
/// The corner index is a position bitmask: bit 0 is set for corners on the
/// right (`+X`) face, bit 1 for the top (`+Y`) face, and bit 2 for the front
/// (`+Z`) face.
///
/// ```text
///         6 -------- 7
///        /|         /|      Y
///       / |        / |      ^
///      2----------3  |      |
///      |  4-------|--5      ---> X
///      | /        | /      /
///      |/         |/      Z
///      0----------1
/// ```
///
/// This is **not** the same as the corner's bit within a [`CaseMask`]; see
/// [`Corner::case_bit`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Corner(u8);

impl Corner {
    /// Builds a new corner
    ///
    /// # Panics
    /// If `i >= 8`, which is not a valid corner index
    pub const fn new(i: u8) -> Self {
        assert!(i < 8);
        Self(i)
    }

    /// Returns the value of this corner as an index
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterates over all 8 corners
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..8).map(Corner)
    }

    /// Returns the corner's offset within a unit cube
    pub fn offset(self) -> [f32; 3] {
        [X, Y, Z].map(|a| if a & self { 1.0 } else { 0.0 })
    }

    /// Returns the bit that this corner sets in a [`CaseMask`]
    ///
    /// The triangulation table is defined relative to this assignment, so it
    /// must not be changed:
    ///
    /// | Corner             | Bit |
    /// |--------------------|-----|
    /// | back-bottom-left   | 1   |
    /// | back-bottom-right  | 2   |
    /// | back-top-left      | 16  |
    /// | back-top-right     | 32  |
    /// | front-bottom-left  | 8   |
    /// | front-bottom-right | 4   |
    /// | front-top-left     | 128 |
    /// | front-top-right    | 64  |
    pub fn case_bit(self) -> u8 {
        CORNER_TO_CASE_BIT[self.index()]
    }
}

/// Case bit for each corner, indexed by [`Corner::index`]
const CORNER_TO_CASE_BIT: [u8; 8] = [
    1,   // back-bottom-left
    2,   // back-bottom-right
    16,  // back-top-left
    32,  // back-top-right
    8,   // front-bottom-left
    4,   // front-bottom-right
    128, // front-top-left
    64,  // front-top-right
];

impl std::ops::BitAnd<Axis> for Corner {
    type Output = bool;
    fn bitand(self, rhs: Axis) -> bool {
        (self.0 & rhs.0) != 0
    }
}

impl std::ops::BitOr<Axis> for Corner {
    type Output = Self;
    fn bitor(self, rhs: Axis) -> Self {
        Corner(self.0 | rhs.0)
    }
}

/// An edge within a cube, in the `[0, 12)` range
///
/// Edges are numbered to match the triangulation table; use
/// [`Edge::corners`] to find the endpoints.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Edge(u8);

impl Edge {
    /// Builds a new edge
    ///
    /// # Panics
    /// If `i >= 12`, since that's an invalid edge
    pub const fn new(i: u8) -> Self {
        assert!(i < 12, "invalid edge index");
        Self(i)
    }

    /// Converts from an edge to an index
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Iterates over all 12 edges
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..12).map(Edge)
    }

    /// Returns a `(start, end)` tuple for the given edge
    ///
    /// The start corner is always the one nearer to the cube's origin.
    pub fn corners(&self) -> (Corner, Corner) {
        let (a, b) = super::tables::EDGE_CORNERS[self.index()];
        (Corner(a), Corner(b))
    }

    /// Returns the fixed fractional position of this edge's midpoint
    pub fn midpoint(&self) -> [f32; 3] {
        super::tables::EDGE_MIDPOINTS[self.index()]
    }
}

/// Bitmask of which corners in a cube are inside the shape
///
/// Bits are assigned per [`Corner::case_bit`], so the mask can be used
/// directly as an index into the triangulation table.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct CaseMask(u8);

impl CaseMask {
    /// Builds a new `CaseMask` from its raw bits
    pub fn new(i: u8) -> Self {
        Self(i)
    }

    /// Builds a mask from a per-corner inside / outside test
    pub fn from_fn<F: FnMut(Corner) -> bool>(mut inside: F) -> Self {
        Self(
            Corner::iter()
                .filter(|c| inside(*c))
                .fold(0, |acc, c| acc | c.case_bit()),
        )
    }

    /// Returns the bitmask as an index
    ///
    /// The index has the same value as the bitmask, but is cast to a `usize`
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Checks whether the mask is uniformly inside or outside
    pub fn is_uniform(&self) -> bool {
        self.0 == 0 || self.0 == u8::MAX
    }
}

impl std::ops::BitAnd<Corner> for CaseMask {
    type Output = bool;
    fn bitand(self, c: Corner) -> bool {
        (self.0 & c.case_bit()) != 0
    }
}
