//! Minimum-cost bipartite assignment (Kuhn-Munkres).
//!
//! The classic six-step formulation is driven as a finite-state loop: every
//! step works on the solver's own matrices and returns the next [`Step`].
//! Real-valued costs are converted to fixed-point integers first, so the
//! zero tests inside the steps are exact.

use super::error::{BgcError, Result};

/// Fixed-point factor applied to real-valued costs.
pub const COST_SCALE: f64 = 1e9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Plain,
    Star,
    Prime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    RowReduce,
    StarZeros,
    CoverTest,
    PrimeZeros,
    Augment,
    Adjust,
    Done,
}

/// `(row, column)` pairs selected by the solver, ordered by row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    pairs: Vec<(usize, usize)>,
}

impl Assignment {
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(usize, usize)> {
        self.pairs.iter()
    }

    /// Sum of the selected cells of `cost`.
    ///
    /// ```
    /// use bgcdist::libs::assign::Munkres;
    /// let cost = vec![vec![0.5, 0.1], vec![0.2, 0.9]];
    /// let assignment = Munkres::solve(&cost).unwrap();
    /// assert!((assignment.total(&cost) - 0.3).abs() < 1e-9);
    /// ```
    pub fn total(&self, cost: &[Vec<f64>]) -> f64 {
        self.pairs.iter().map(|&(r, c)| cost[r][c]).sum()
    }
}

/// Working state of one solver run. Nothing here outlives [`Munkres::solve`].
pub struct Munkres {
    c: Vec<Vec<i64>>,
    n: usize,
    row_covered: Vec<bool>,
    col_covered: Vec<bool>,
    marked: Vec<Vec<Mark>>,
    z0: (usize, usize),
    path: Vec<(usize, usize)>,
}

impl Munkres {
    /// Solve the assignment problem for a rectangular matrix of non-negative,
    /// finite costs.
    ///
    /// Non-square inputs are padded with zero-cost cells; pairs landing in the
    /// padding are dropped, so the result has `min(rows, cols)` entries.
    ///
    /// ```
    /// use bgcdist::libs::assign::Munkres;
    /// let cost = vec![
    ///     vec![400.0, 150.0, 400.0],
    ///     vec![400.0, 450.0, 600.0],
    ///     vec![300.0, 225.0, 300.0],
    /// ];
    /// let assignment = Munkres::solve(&cost).unwrap();
    /// assert_eq!(assignment.total(&cost), 850.0);
    /// ```
    pub fn solve(cost: &[Vec<f64>]) -> Result<Assignment> {
        let cols = check_shape(cost)?;
        let n = cost.len().max(cols);
        let limit = overflow_limit(n);

        let mut scaled = Vec::with_capacity(cost.len());
        for (i, row) in cost.iter().enumerate() {
            let mut out = Vec::with_capacity(cols);
            for (j, &v) in row.iter().enumerate() {
                if !v.is_finite() || v < 0.0 {
                    return Err(BgcError::InvalidCost(format!(
                        "cell ({}, {}) is {}, costs must be finite and non-negative",
                        i, j, v
                    )));
                }
                let fixed = (v * COST_SCALE).round();
                if fixed > limit as f64 {
                    return Err(BgcError::InvalidCost(format!(
                        "cell ({}, {}) = {} is too large for a {}x{} problem",
                        i, j, v, n, n
                    )));
                }
                out.push(fixed as i64);
            }
            scaled.push(out);
        }

        Ok(Self::run(&scaled, cols))
    }

    /// Same as [`Munkres::solve`] on integer costs, which need no scaling.
    pub fn solve_int(cost: &[Vec<i64>]) -> Result<Assignment> {
        let cols = check_shape(cost)?;
        let limit = overflow_limit(cost.len().max(cols));

        for (i, row) in cost.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                if v < 0 || v > limit {
                    return Err(BgcError::InvalidCost(format!(
                        "cell ({}, {}) is {}, out of range 0..={}",
                        i, j, v, limit
                    )));
                }
            }
        }

        Ok(Self::run(cost, cols))
    }

    fn run(cost: &[Vec<i64>], cols: usize) -> Assignment {
        let rows = cost.len();
        if rows == 0 || cols == 0 {
            return Assignment::default();
        }

        let mut solver = Self::padded(cost, rows, cols);
        tracing::trace!(rows, cols, n = solver.n, "munkres");

        let mut step = Step::RowReduce;
        while step != Step::Done {
            step = match step {
                Step::RowReduce => solver.row_reduce(),
                Step::StarZeros => solver.star_zeros(),
                Step::CoverTest => solver.cover_test(),
                Step::PrimeZeros => solver.prime_zeros(),
                Step::Augment => solver.augment(),
                Step::Adjust => solver.adjust(),
                Step::Done => Step::Done,
            };
        }

        let mut pairs = Vec::with_capacity(rows.min(cols));
        for i in 0..rows {
            for j in 0..cols {
                if solver.marked[i][j] == Mark::Star {
                    pairs.push((i, j));
                }
            }
        }

        Assignment { pairs }
    }

    fn padded(cost: &[Vec<i64>], rows: usize, cols: usize) -> Self {
        let n = rows.max(cols);
        let mut c = vec![vec![0i64; n]; n];
        for (i, row) in cost.iter().enumerate() {
            c[i][..cols].copy_from_slice(row);
        }

        Self {
            c,
            n,
            row_covered: vec![false; n],
            col_covered: vec![false; n],
            marked: vec![vec![Mark::Plain; n]; n],
            z0: (0, 0),
            path: Vec::with_capacity(2 * n),
        }
    }

    /// Subtract each row's minimum from the row.
    fn row_reduce(&mut self) -> Step {
        for row in self.c.iter_mut() {
            if let Some(&min) = row.iter().min() {
                for v in row.iter_mut() {
                    *v -= min;
                }
            }
        }
        Step::StarZeros
    }

    /// Star a zero in every row and column that has none yet.
    fn star_zeros(&mut self) -> Step {
        for i in 0..self.n {
            for j in 0..self.n {
                if self.c[i][j] == 0 && !self.row_covered[i] && !self.col_covered[j] {
                    self.marked[i][j] = Mark::Star;
                    self.row_covered[i] = true;
                    self.col_covered[j] = true;
                }
            }
        }
        self.clear_covers();
        Step::CoverTest
    }

    /// Cover the starred columns; n of them means a complete assignment.
    fn cover_test(&mut self) -> Step {
        let mut count = 0;
        for i in 0..self.n {
            for j in 0..self.n {
                if self.marked[i][j] == Mark::Star {
                    self.col_covered[j] = true;
                    count += 1;
                }
            }
        }

        if count >= self.n {
            Step::Done
        } else {
            Step::PrimeZeros
        }
    }

    fn prime_zeros(&mut self) -> Step {
        loop {
            let Some((row, col)) = self.find_uncovered_zero() else {
                return Step::Adjust;
            };

            self.marked[row][col] = Mark::Prime;
            match self.find_in_row(row, Mark::Star) {
                Some(star_col) => {
                    self.row_covered[row] = true;
                    self.col_covered[star_col] = false;
                }
                None => {
                    self.z0 = (row, col);
                    return Step::Augment;
                }
            }
        }
    }

    /// Flip stars along the alternating prime/star chain rooted at `z0`.
    fn augment(&mut self) -> Step {
        self.path.clear();
        self.path.push(self.z0);

        loop {
            let (_, col) = self.path[self.path.len() - 1];
            let Some(row) = self.find_in_col(col, Mark::Star) else {
                break;
            };
            self.path.push((row, col));

            // a starred row reached here was covered by a prime
            let Some(prime_col) = self.find_in_row(row, Mark::Prime) else {
                break;
            };
            self.path.push((row, prime_col));
        }

        for &(r, c) in &self.path {
            self.marked[r][c] = match self.marked[r][c] {
                Mark::Star => Mark::Plain,
                _ => Mark::Star,
            };
        }

        self.clear_covers();
        self.erase_primes();
        Step::CoverTest
    }

    /// Shift the smallest uncovered value onto covered rows and off uncovered
    /// columns, creating a new uncovered zero.
    fn adjust(&mut self) -> Step {
        let Some(min) = self.smallest_uncovered() else {
            return Step::Done;
        };

        for i in 0..self.n {
            for j in 0..self.n {
                if self.row_covered[i] {
                    self.c[i][j] += min;
                }
                if !self.col_covered[j] {
                    self.c[i][j] -= min;
                }
            }
        }
        Step::PrimeZeros
    }

    fn smallest_uncovered(&self) -> Option<i64> {
        let mut min = None;
        for i in (0..self.n).filter(|&i| !self.row_covered[i]) {
            for j in (0..self.n).filter(|&j| !self.col_covered[j]) {
                let v = self.c[i][j];
                if min.map_or(true, |m| v < m) {
                    min = Some(v);
                }
            }
        }
        min
    }

    fn find_uncovered_zero(&self) -> Option<(usize, usize)> {
        for i in (0..self.n).filter(|&i| !self.row_covered[i]) {
            for j in 0..self.n {
                if self.c[i][j] == 0 && !self.col_covered[j] {
                    return Some((i, j));
                }
            }
        }
        None
    }

    fn find_in_row(&self, row: usize, mark: Mark) -> Option<usize> {
        (0..self.n).find(|&j| self.marked[row][j] == mark)
    }

    fn find_in_col(&self, col: usize, mark: Mark) -> Option<usize> {
        (0..self.n).find(|&i| self.marked[i][col] == mark)
    }

    fn clear_covers(&mut self) {
        self.row_covered.fill(false);
        self.col_covered.fill(false);
    }

    fn erase_primes(&mut self) {
        for row in self.marked.iter_mut() {
            for m in row.iter_mut() {
                if *m == Mark::Prime {
                    *m = Mark::Plain;
                }
            }
        }
    }
}

// Returns the column count of a rectangular matrix.
fn check_shape<T>(cost: &[Vec<T>]) -> Result<usize> {
    let cols = cost.first().map_or(0, |row| row.len());
    for (i, row) in cost.iter().enumerate() {
        if row.len() != cols {
            return Err(BgcError::InvalidCost(format!(
                "row {} has {} columns, expected {}",
                i,
                row.len(),
                cols
            )));
        }
    }
    Ok(cols)
}

// Largest cell value whose adjustments cannot overflow an i64.
fn overflow_limit(n: usize) -> i64 {
    i64::MAX / (4 * (n as i64 + 1))
}
