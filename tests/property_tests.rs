//! Property tests for genotensor
//!
//! These tests check the index arithmetic and summation laws over random
//! inputs.

use genotensor::data::{
    checked_num_diploids, dim_width, diploid_alleles, diploid_index, num_diploids, Diploid,
    Haploid, Layout, TensorView,
};
use genotensor::model::{kronecker_product_coef, sum_kahan, KroneckerProduct};
use ndarray::Array2;
use proptest::prelude::*;

fn matrix(max_dim: usize) -> impl Strategy<Value = Array2<f64>> {
    (1..=max_dim, 1..=max_dim).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(-100.0f64..100.0, rows * cols)
            .prop_map(move |data| Array2::from_shape_vec((rows, cols), data).unwrap())
    })
}

// ============================================================
// Dimension math
// ============================================================

proptest! {
    #[test]
    fn num_diploids_closed_form(n in 0usize..100_000) {
        prop_assert_eq!(num_diploids(n), n * (n + 1) / 2);
        prop_assert_eq!(checked_num_diploids(n).unwrap(), num_diploids(n));
        prop_assert_eq!(dim_width::<Haploid>(n), n);
        prop_assert_eq!(dim_width::<Diploid>(n), num_diploids(n));
    }

    #[test]
    fn diploid_index_is_symmetric_and_invertible(a in 0usize..5_000, b in 0usize..5_000) {
        let idx = diploid_index(a, b);
        prop_assert_eq!(idx, diploid_index(b, a));
        prop_assert!(idx < num_diploids(a.max(b) + 1));
        prop_assert_eq!(diploid_alleles(idx), (a.min(b), a.max(b)));
    }
}

// ============================================================
// Layout / views
// ============================================================

proptest! {
    #[test]
    fn view_offsets_are_column_major(
        rows in 1usize..8,
        cols in 1usize..8,
        depth in 1usize..5,
    ) {
        let len = rows * cols * depth;
        let buf: Vec<usize> = (0..len).collect();
        let view = TensorView::new(&buf, [rows, cols, depth]).unwrap();
        for d in 0..depth {
            for c in 0..cols {
                for r in 0..rows {
                    prop_assert_eq!(view[[r, c, d]], r + rows * (c + cols * d));
                }
            }
        }
    }

    #[test]
    fn short_buffers_are_rejected(rows in 1usize..10, cols in 1usize..10, short in 1usize..10) {
        let needed = rows * cols;
        let buf = vec![0.0f32; needed.saturating_sub(short)];
        prop_assert!(TensorView::new(&buf, [rows, cols]).is_err());
    }

    #[test]
    fn unravel_inverts_offset(e0 in 1usize..6, e1 in 1usize..6, e2 in 1usize..6, e3 in 1usize..6) {
        let layout = Layout::column_major([e0, e1, e2, e3]).unwrap();
        for offset in 0..layout.len() {
            let index = layout.unravel(offset).unwrap();
            prop_assert_eq!(layout.offset(&index), Some(offset));
        }
    }
}

// ============================================================
// Summation
// ============================================================

proptest! {
    #[test]
    fn kahan_matches_exact_integer_sums(values in prop::collection::vec(-1_000_000i32..1_000_000, 0..500)) {
        let exact: i64 = values.iter().map(|&v| v as i64).sum();
        let floats = values.iter().map(|&v| v as f64);
        prop_assert_eq!(sum_kahan(floats), exact as f64);
    }

    #[test]
    fn kahan_recovers_tiny_terms(big in 1e6f64..1e10, count in 1usize..2_000) {
        let tiny = 1e-9f64;
        let mut values = vec![big];
        values.extend(std::iter::repeat(tiny).take(count));
        values.push(-big);

        let expected = tiny * count as f64;
        let err = (sum_kahan(values.iter().copied()) - expected).abs();
        // bounded by the rounding of the final positive total
        prop_assert!(err <= 2.0 * big * f64::EPSILON, "err = {}", err);
    }
}

// ============================================================
// Kronecker access
// ============================================================

proptest! {
    #[test]
    fn kronecker_matches_block_definition(a in matrix(4), b in matrix(4)) {
        let (ra, ca) = a.dim();
        let (rb, cb) = b.dim();
        let ab = KroneckerProduct::new(&a, &b);
        prop_assert_eq!((ab.rows(), ab.cols()), (ra * rb, ca * cb));
        for p in 0..ra {
            for q in 0..ca {
                for r in 0..rb {
                    for s in 0..cb {
                        let i = p * rb + r;
                        let j = q * cb + s;
                        prop_assert_eq!(kronecker_product_coef(&a, &b, i, j), a[[p, q]] * b[[r, s]]);
                        prop_assert_eq!(ab.get(i, j), a[[p, q]] * b[[r, s]]);
                    }
                }
            }
        }
    }

    #[test]
    fn kronecker_is_associative(a in matrix(3), b in matrix(3), c in matrix(3)) {
        let ab = KroneckerProduct::new(&a, &b);
        let bc = KroneckerProduct::new(&b, &c);
        let left = KroneckerProduct::new(&ab, &c);
        let right = KroneckerProduct::new(&a, &bc);
        prop_assert_eq!((left.rows(), left.cols()), (right.rows(), right.cols()));
        for i in 0..left.rows() {
            for j in 0..left.cols() {
                let (l, r) = (left.get(i, j), right.get(i, j));
                prop_assert!((l - r).abs() <= 1e-9 * l.abs().max(1.0), "{} vs {}", l, r);
            }
        }
    }
}
