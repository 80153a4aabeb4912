//! Polynomial interpolation over GF(251) by Gaussian elimination.
//!
//! A shadow with index `x` holds `f(x)` for every pixel group polynomial `f`
//! of degree `k - 1`. Given `k` such evaluations at distinct non-zero points,
//! the coefficients of `f` are the solution of the Vandermonde system
//!
//! ```text
//! | 1  x_0      ...  x_0^(k-1)     | f(x_0)     |
//! | 1  x_1      ...  x_1^(k-1)     | f(x_1)     |
//! | ...                            | ...        |
//! | 1  x_(k-1)  ...  x_(k-1)^(k-1) | f(x_(k-1)) |
//! ```

use crate::zp::{self, PRIME};
use crate::{Error, Result};
use itertools::Itertools;
use ndarray::Array2;

/// Solver for the Vandermonde systems defined by a fixed set of points.
///
/// The powers of the points do not depend on the evaluations, so they are
/// computed once and copied into a scratch matrix for every solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VandermondeSolver {
    points: Box<[u16]>,
    base: Array2<i64>,
}

impl VandermondeSolver {
    /// Creates a solver for the interpolation points `points`.
    ///
    /// Returns an error if there are no points, if a point is congruent to 0
    /// modulo 251, or if two points coincide. Any of these makes a pivot of
    /// the elimination non-invertible.
    pub fn new(points: &[u16]) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::InvalidSystem("no interpolation points".to_string()));
        }
        if let Some(x) = points.iter().find(|&&x| x % PRIME == 0) {
            return Err(Error::InvalidSystem(format!(
                "interpolation point {x} is 0 modulo {PRIME}"
            )));
        }
        if !points.iter().map(|x| x % PRIME).all_unique() {
            return Err(Error::InvalidSystem(format!(
                "interpolation points {points:?} are not distinct"
            )));
        }

        let k = points.len();
        let mut base = Array2::<i64>::zeros((k, k + 1));
        for (row, &x) in points.iter().enumerate() {
            for col in 0..k {
                base[[row, col]] = zp::pow(x, col);
            }
        }

        Ok(Self {
            points: points.into(),
            base,
        })
    }

    /// The interpolation points, in row order.
    pub fn points(&self) -> &[u16] {
        &self.points
    }

    /// The number of unknowns, i.e. the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a solver has at least one point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns a scratch matrix of the right shape for [`Self::solve_into`].
    pub fn scratch(&self) -> Array2<i64> {
        self.base.clone()
    }

    /// Solves the system for the evaluations `values` and returns the `k`
    /// polynomial coefficients, lowest degree first.
    pub fn solve(&self, values: &[u8]) -> Result<Vec<u8>> {
        let mut scratch = self.scratch();
        let mut out = vec![0u8; self.len()];
        self.solve_into(&mut scratch, values, &mut out)?;
        Ok(out)
    }

    /// Solves the system for the evaluations `values`, writing the
    /// coefficients into `out` and using `scratch` as working memory.
    pub fn solve_into(
        &self,
        scratch: &mut Array2<i64>,
        values: &[u8],
        out: &mut [u8],
    ) -> Result<()> {
        let k = self.len();
        if values.len() != k || out.len() != k || scratch.dim() != (k, k + 1) {
            return Err(Error::InvalidSystem(format!(
                "expected {k} values and outputs, found {} and {}",
                values.len(),
                out.len()
            )));
        }

        scratch.assign(&self.base);
        for (row, &v) in values.iter().enumerate() {
            scratch[[row, k]] = v as i64;
        }

        eliminate(scratch)?;

        for (row, o) in out.iter_mut().enumerate() {
            *o = scratch[[row, k]] as u8;
        }
        Ok(())
    }
}

/// Brings the `k x (k + 1)` augmented matrix `mat` to reduced row echelon
/// form modulo 251, leaving the solution in the last column.
///
/// Forward elimination clears column `j` bottom-up, each row using the row
/// immediately above it as pivot source. With distinct non-zero points every
/// pivot `mat[i - 1][j]` is a product of point differences, hence invertible.
fn eliminate(mat: &mut Array2<i64>) -> Result<()> {
    let k = mat.nrows();
    let p = PRIME as i64;

    for j in 0..k.saturating_sub(1) {
        for i in (j + 1..k).rev() {
            let factor = zp::reduce(mat[[i, j]] * zp::inverse(mat[[i - 1, j]])?);
            for t in j..=k {
                let temp = mat[[i, t]] - (mat[[i - 1, t]] * factor) % p;
                mat[[i, t]] = zp::mod_normalize(temp, p);
            }
        }
    }

    for i in (1..k).rev() {
        let inv = zp::inverse(mat[[i, i]])?;
        mat[[i, k]] = (mat[[i, k]] * inv) % p;
        mat[[i, i]] = (mat[[i, i]] * inv) % p;
        for t in (0..i).rev() {
            let temp = mat[[t, k]] - (mat[[i, k]] * mat[[t, i]]) % p;
            mat[[t, k]] = zp::mod_normalize(temp, p);
            mat[[t, i]] = 0;
        }
    }

    // Row 0 is never touched by the forward pass and starts with x^0 = 1.
    debug_assert_eq!(mat[[0, 0]], 1);
    Ok(())
}
