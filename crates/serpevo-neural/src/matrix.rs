use serde::{Deserialize, Serialize};

/// Row-major dense matrix over `f32`.
///
/// The shape is fixed at construction; only the element values change over a
/// network's lifetime (the genetic algorithm rewrites them in place).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Creates a `rows x cols` matrix filled by `f(row, col)`.
    #[must_use]
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f32,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self { rows, cols, data }
    }

    /// Creates a zero-filled `rows x cols` matrix.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_fn(rows, cols, |_, _| 0.0)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of elements (`rows * cols`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row * self.cols + col] = value;
    }

    /// Row-major flat view of the elements.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Overwrites all elements from a row-major flat slice.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != self.len()`; callers validate the total
    /// genome length before slicing it up.
    pub fn copy_from_slice(&mut self, values: &[f32]) {
        assert_eq!(values.len(), self.data.len());
        self.data.copy_from_slice(values);
    }

    /// Matrix-vector product `self * vec`.
    ///
    /// # Panics
    ///
    /// Panics if `vec.len() != self.cols()`.
    #[must_use]
    pub fn mul_vec(&self, vec: &[f32]) -> Vec<f32> {
        assert_eq!(vec.len(), self.cols);
        (0..self.rows)
            .map(|row| {
                let row_start = row * self.cols;
                self.data[row_start..row_start + self.cols]
                    .iter()
                    .zip(vec)
                    .map(|(w, x)| w * x)
                    .sum()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_is_row_major() {
        #[expect(clippy::cast_precision_loss)]
        let m = Matrix::from_fn(2, 3, |r, c| (r * 3 + c) as f32);
        assert_eq!(m.as_slice(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(m.get(1, 0), 3.0);
    }

    #[test]
    fn test_mul_vec() {
        let m = Matrix::from_fn(2, 2, |r, c| if r == c { 2.0 } else { 0.0 });
        assert_eq!(m.mul_vec(&[1.0, 3.0]), vec![2.0, 6.0]);
    }

    #[test]
    fn test_mul_vec_rectangular() {
        // [1 2 3; 4 5 6] * [1, 1, 1] = [6, 15]
        #[expect(clippy::cast_precision_loss)]
        let m = Matrix::from_fn(2, 3, |r, c| (r * 3 + c + 1) as f32);
        assert_eq!(m.mul_vec(&[1.0, 1.0, 1.0]), vec![6.0, 15.0]);
    }

    #[test]
    #[should_panic(expected = "assertion `left == right` failed")]
    fn test_mul_vec_wrong_length_panics() {
        let m = Matrix::zeros(2, 3);
        let _ = m.mul_vec(&[1.0, 2.0]);
    }
}
