/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Minimal 3x3 matrix support for lattice transforms
//!
//! The largest matrices in this crate are the 3x3 fractional/Cartesian
//! transform pair and space-group rotation parts, so a small fixed-size
//! type is used instead of a general linear-algebra crate.

/// A 3x3 matrix stored row-major
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    rows: [[f64; 3]; 3],
}

impl Mat3 {
    /// Create a matrix from three rows
    pub fn new(rows: [[f64; 3]; 3]) -> Self {
        Self { rows }
    }

    /// The identity matrix
    pub fn identity() -> Self {
        Self::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Access an element by (row, column)
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    /// Apply the matrix to a column vector
    pub fn mul_vec(&self, v: [f64; 3]) -> [f64; 3] {
        let mut out = [0.0; 3];
        for (i, row) in self.rows.iter().enumerate() {
            out[i] = row[0] * v[0] + row[1] * v[1] + row[2] * v[2];
        }
        out
    }

    /// Determinant by cofactor expansion
    pub fn det(&self) -> f64 {
        let m = &self.rows;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Inverse via the adjugate; `None` when the determinant is negligible
    pub fn inverse(&self) -> Option<Mat3> {
        let det = self.det();
        if det.abs() < 1e-12 {
            return None;
        }
        let m = &self.rows;
        let inv_det = 1.0 / det;
        let mut out = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                let (r0, r1) = match i {
                    0 => (1, 2),
                    1 => (0, 2),
                    _ => (0, 1),
                };
                let (c0, c1) = match j {
                    0 => (1, 2),
                    1 => (0, 2),
                    _ => (0, 1),
                };
                let minor = m[r0][c0] * m[r1][c1] - m[r0][c1] * m[r1][c0];
                let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
                // adjugate transposes the cofactor matrix
                out[j][i] = sign * minor * inv_det;
            }
        }
        Some(Mat3::new(out))
    }

    /// Euclidean norm of one row
    pub fn row_norm(&self, row: usize) -> f64 {
        let r = self.rows[row];
        (r[0] * r[0] + r[1] * r[1] + r[2] * r[2]).sqrt()
    }
}

/// Length of a 3-vector
pub fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Component-wise difference `a - b`
pub fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Component-wise sum
pub fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}
