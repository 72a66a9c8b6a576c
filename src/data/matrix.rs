//! Dense distance/duration matrices, one pair per vehicle profile.

/// A dense `n x n` matrix of `i64` edge weights, stored row-major.
#[derive(Debug, Clone)]
pub struct Matrix {
    data: Vec<i64>,
    n: usize,
}

impl Matrix {
    /// Builds a matrix from row-major data. Returns `None` if `data.len()
    /// != n * n`.
    pub fn from_rows(n: usize, data: Vec<i64>) -> Option<Self> {
        if data.len() != n * n {
            return None;
        }
        Some(Self { data, n })
    }

    /// Builds an all-zero `n x n` matrix.
    pub fn zeros(n: usize) -> Self {
        Self {
            data: vec![0; n * n],
            n,
        }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.n + to]
    }

    pub fn set(&mut self, from: usize, to: usize, value: i64) {
        self.data[from * self.n + to] = value;
    }

    /// `true` if every diagonal entry is zero.
    pub fn has_zero_diagonal(&self) -> bool {
        (0..self.n).all(|i| self.get(i, i) == 0)
    }

    /// Index of the first nonzero diagonal entry, if any.
    pub fn first_nonzero_diagonal(&self) -> Option<usize> {
        (0..self.n).find(|&i| self.get(i, i) != 0)
    }
}

/// The distance and duration matrix pair for one vehicle profile.
#[derive(Debug, Clone)]
pub struct ProfileMatrices {
    pub distance: Matrix,
    pub duration: Matrix,
}

impl ProfileMatrices {
    pub fn new(distance: Matrix, duration: Matrix) -> Self {
        Self { distance, duration }
    }
}
