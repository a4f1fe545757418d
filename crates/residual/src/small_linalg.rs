//! Stack-allocated small linear algebra types for the daily VAR recursion.
//!
//! The dimension is the number of cross-correlated variables (two for
//! Tmax/Tmin), so everything stays on the stack.

/// Stack-allocated row vector of dimension `K`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmallVec<const K: usize> {
    /// Elements in variable order.
    pub data: [f64; K],
}

/// Stack-allocated `K x K` matrix stored in row-major order.
///
/// `rows[r][c]` = element at row r, column c.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmallMat<const K: usize> {
    rows: [[f64; K]; K],
}

impl<const K: usize> SmallVec<K> {
    /// Wraps an array.
    pub fn new(data: [f64; K]) -> Self {
        Self { data }
    }

    /// Returns a vector with every element equal to `value`.
    #[inline(always)]
    pub fn splat(value: f64) -> Self {
        Self { data: [value; K] }
    }

    /// Element-wise sum.
    #[inline(always)]
    pub fn plus(&self, other: &Self) -> Self {
        let mut out = *self;
        for (o, &b) in out.data.iter_mut().zip(&other.data) {
            *o += b;
        }
        out
    }
}

impl<const K: usize> SmallMat<K> {
    /// Builds a matrix from its rows.
    pub fn from_rows(rows: [[f64; K]; K]) -> Self {
        Self { rows }
    }

    /// Returns the identity matrix.
    pub fn identity() -> Self {
        let mut rows = [[0.0; K]; K];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self { rows }
    }

    /// Returns the element at `(row, col)`.
    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    /// Position of the first non-finite element, if any.
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(r, row)| {
            row.iter()
                .position(|v| !v.is_finite())
                .map(|c| (r, c))
        })
    }

    /// Computes the row-vector product `v · self`.
    #[inline(always)]
    pub fn left_mul(&self, v: &SmallVec<K>) -> SmallVec<K> {
        let mut result = SmallVec::splat(0.0);
        for j in 0..K {
            let mut sum = 0.0;
            for i in 0..K {
                sum += v.data[i] * self.rows[i][j];
            }
            result.data[j] = sum;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_mul_is_row_vector_product() {
        let m = SmallMat::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        let v = SmallVec::new([1.0, 10.0]);
        // [1, 10] · [[1, 2], [3, 4]] = [31, 42]
        assert_eq!(m.left_mul(&v).data, [31.0, 42.0]);
    }

    #[test]
    fn identity_preserves_vector() {
        let v = SmallVec::new([0.3, -1.2, 4.0]);
        assert_eq!(SmallMat::<3>::identity().left_mul(&v), v);
    }

    #[test]
    fn first_non_finite_reports_position() {
        let m = SmallMat::from_rows([[1.0, 2.0], [f64::NAN, 4.0]]);
        assert_eq!(m.first_non_finite(), Some((1, 0)));
        assert_eq!(SmallMat::<2>::identity().first_non_finite(), None);
    }

    #[test]
    fn plus_is_elementwise() {
        let a = SmallVec::new([1.0, 2.0]);
        let b = SmallVec::new([0.5, -2.0]);
        assert_eq!(a.plus(&b).data, [1.5, 0.0]);
    }
}
