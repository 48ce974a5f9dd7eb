//! Fixed-size 2×2 linear algebra.
//!
//! The hand models are second order with two inputs (reference angle and
//! perturbation force), so every matrix in the engine is 2×2, 2×1 or 1×2.
//! These value types are `Copy` and never allocate.

use core::ops::{Add, AddAssign, Mul, Neg, Sub};

use static_assertions::assert_eq_size;

/// Relative determinant tolerance below which a matrix is treated as singular.
const SINGULAR_EPS: f64 = 1e-12;

// ─── Column Vector (2×1) ────────────────────────────────────────────

/// 2×1 column vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2(pub [f64; 2]);

impl Vec2 {
    /// Zero vector.
    pub const ZERO: Self = Self([0.0, 0.0]);

    /// Build from components.
    #[inline]
    pub const fn new(x0: f64, x1: f64) -> Self {
        Self([x0, x1])
    }

    /// First component.
    #[inline]
    pub const fn x0(&self) -> f64 {
        self.0[0]
    }

    /// Second component.
    #[inline]
    pub const fn x1(&self) -> f64 {
        self.0[1]
    }

    /// Multiply every component by `k`.
    #[inline]
    pub fn scale(self, k: f64) -> Self {
        Self([self.0[0] * k, self.0[1] * k])
    }

    /// Largest absolute component.
    #[inline]
    pub fn max_abs(&self) -> f64 {
        self.0[0].abs().max(self.0[1].abs())
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self([self.0[0] + rhs.0[0], self.0[1] + rhs.0[1]])
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0[0] += rhs.0[0];
        self.0[1] += rhs.0[1];
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self([self.0[0] - rhs.0[0], self.0[1] - rhs.0[1]])
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self([-self.0[0], -self.0[1]])
    }
}

// ─── Row Vector (1×2) ───────────────────────────────────────────────

/// 1×2 row vector (output and feed-through matrices).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Row2(pub [f64; 2]);

impl Row2 {
    /// Build from components.
    #[inline]
    pub const fn new(x0: f64, x1: f64) -> Self {
        Self([x0, x1])
    }

    /// Inner product with a column vector (1×2 · 2×1 → scalar).
    #[inline]
    pub fn dot(&self, v: Vec2) -> f64 {
        self.0[0] * v.0[0] + self.0[1] * v.0[1]
    }

    /// Multiply every component by `k`.
    #[inline]
    pub fn scale(self, k: f64) -> Self {
        Self([self.0[0] * k, self.0[1] * k])
    }
}

impl Add for Row2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self([self.0[0] + rhs.0[0], self.0[1] + rhs.0[1]])
    }
}

/// Row × matrix (1×2 · 2×2 → 1×2).
impl Mul<Mat2> for Row2 {
    type Output = Row2;
    #[inline]
    fn mul(self, m: Mat2) -> Row2 {
        Row2([
            self.0[0] * m.0[0][0] + self.0[1] * m.0[1][0],
            self.0[0] * m.0[0][1] + self.0[1] * m.0[1][1],
        ])
    }
}

// ─── Matrix (2×2) ───────────────────────────────────────────────────

/// Row-major 2×2 matrix.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mat2(pub [[f64; 2]; 2]);

impl Mat2 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self([[1.0, 0.0], [0.0, 1.0]]);

    /// Build from rows.
    #[inline]
    pub const fn new(r0: [f64; 2], r1: [f64; 2]) -> Self {
        Self([r0, r1])
    }

    /// Multiply every entry by `k`.
    #[inline]
    pub fn scale(self, k: f64) -> Self {
        let m = self.0;
        Self([[m[0][0] * k, m[0][1] * k], [m[1][0] * k, m[1][1] * k]])
    }

    /// Determinant.
    #[inline]
    pub fn det(&self) -> f64 {
        let m = self.0;
        m[0][0] * m[1][1] - m[0][1] * m[1][0]
    }

    /// Column `j` as a vector.
    #[inline]
    pub fn column(&self, j: usize) -> Vec2 {
        Vec2([self.0[0][j], self.0[1][j]])
    }

    /// Inverse, or `None` when the matrix is (numerically) singular.
    ///
    /// The determinant is compared against the product of the row norms so
    /// the test is independent of the matrix scale.
    pub fn inverse(&self) -> Option<Self> {
        let m = self.0;
        let det = self.det();
        let r0 = m[0][0].hypot(m[0][1]);
        let r1 = m[1][0].hypot(m[1][1]);
        let scale = r0 * r1;
        if !det.is_finite() || scale == 0.0 || det.abs() <= SINGULAR_EPS * scale {
            return None;
        }
        let inv_det = 1.0 / det;
        Some(Self([
            [m[1][1] * inv_det, -m[0][1] * inv_det],
            [-m[1][0] * inv_det, m[0][0] * inv_det],
        ]))
    }

    /// Largest absolute entry.
    pub fn max_abs(&self) -> f64 {
        self.0
            .iter()
            .flat_map(|r| r.iter())
            .fold(0.0_f64, |acc, x| acc.max(x.abs()))
    }
}

impl Add for Mat2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        let (a, b) = (self.0, rhs.0);
        Self([
            [a[0][0] + b[0][0], a[0][1] + b[0][1]],
            [a[1][0] + b[1][0], a[1][1] + b[1][1]],
        ])
    }
}

impl Sub for Mat2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self + rhs.scale(-1.0)
    }
}

impl Mul for Mat2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let (a, b) = (self.0, rhs.0);
        Self([
            [
                a[0][0] * b[0][0] + a[0][1] * b[1][0],
                a[0][0] * b[0][1] + a[0][1] * b[1][1],
            ],
            [
                a[1][0] * b[0][0] + a[1][1] * b[1][0],
                a[1][0] * b[0][1] + a[1][1] * b[1][1],
            ],
        ])
    }
}

impl Mul<Vec2> for Mat2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, v: Vec2) -> Vec2 {
        let m = self.0;
        Vec2([
            m[0][0] * v.0[0] + m[0][1] * v.0[1],
            m[1][0] * v.0[0] + m[1][1] * v.0[1],
        ])
    }
}

assert_eq_size!(Vec2, [f64; 2]);
assert_eq_size!(Mat2, [f64; 4]);

// ─── Tests ──────────────────────────────────────────────────────────
