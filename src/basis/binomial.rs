//! Binomial coefficients
use crate::types::{cast, RealScalar};

/// Write the binomial coefficients `C(n, 0), ..., C(n, n)` into `row[..=n]`
pub fn binomial_row<T: RealScalar>(n: usize, row: &mut [T]) {
    debug_assert!(row.len() > n);
    let mut c: u64 = 1;
    row[0] = T::one();
    for k in 1..=n {
        c = c * (n - k + 1) as u64 / k as u64;
        row[k] = cast(c as f64);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rows() {
        let mut row = [0.0; 6];
        binomial_row::<f64>(0, &mut row);
        assert_eq!(row[0], 1.0);
        binomial_row::<f64>(5, &mut row);
        assert_eq!(row, [1.0, 5.0, 10.0, 10.0, 5.0, 1.0]);
    }

    #[test]
    fn test_symmetric_and_exact() {
        let mut row = [0.0; 21];
        binomial_row::<f64>(20, &mut row);
        assert_eq!(row[10], 184756.0);
        for k in 0..=20 {
            assert_eq!(row[k], row[20 - k]);
        }
    }
}
