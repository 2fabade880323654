//! # Dimension Math
//!
//! Maps allele counts to state-space sizes.
//!
//! A locus with `n` alleles has `n` haploid states and `n*(n+1)/2` diploid
//! states (unordered pairs, homozygous pairs included). Diploid states are
//! ordered the way VCF orders genotypes: pair `{lo, hi}` with `lo <= hi` sits
//! at `hi*(hi+1)/2 + lo`, so for two alleles the order is `0/0, 0/1, 1/1`.

use crate::data::rank::RankKind;
use crate::error::{GenotensorError, Result};

/// Number of unordered allele pairs drawable from `n` alleles.
#[inline]
pub const fn num_diploids(n: usize) -> usize {
    // halve the even factor first so the product only overflows when the result does
    if n % 2 == 0 {
        (n / 2) * (n + 1)
    } else {
        n * ((n + 1) / 2)
    }
}

/// Overflow-checked [`num_diploids`].
pub fn checked_num_diploids(n: usize) -> Result<usize> {
    n.checked_add(1)
        .and_then(|m| if n % 2 == 0 { (n / 2).checked_mul(m) } else { n.checked_mul(m / 2) })
        .ok_or_else(|| GenotensorError::overflow(format!("num_diploids({n})")))
}

/// State-space width of one axis of rank `R` for `n` alleles.
///
/// Resolved at compile time: haploid returns `n`, diploid returns
/// `num_diploids(n)`.
#[inline(always)]
pub fn dim_width<R: RankKind>(n: usize) -> usize {
    R::width(n)
}

/// Validate a signed allele count coming from the caller.
pub fn allele_count(n: i64) -> Result<usize> {
    usize::try_from(n).map_err(|_| {
        tracing::debug!(value = n, "rejected allele count");
        GenotensorError::invalid_allele_count(n)
    })
}

/// Diploid-axis index of the unordered pair `{a, b}`.
#[inline]
pub const fn diploid_index(a: usize, b: usize) -> usize {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    num_diploids(hi) + lo
}

/// Inverse of [`diploid_index`]: the `(lo, hi)` allele pair of a diploid state.
pub fn diploid_alleles(index: usize) -> (usize, usize) {
    // Largest hi with num_diploids(hi) <= index
    let mut hi = ((((8 * index as u128 + 1) as f64).sqrt() - 1.0) / 2.0) as usize;
    while num_diploids(hi + 1) <= index {
        hi += 1;
    }
    while num_diploids(hi) > index {
        hi -= 1;
    }
    (index - num_diploids(hi), hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::rank::{Diploid, Haploid};

    #[test]
    fn test_num_diploids_small() {
        let expected = [0, 1, 3, 6, 10];
        for (n, &want) in expected.iter().enumerate() {
            assert_eq!(num_diploids(n), want);
        }
    }

    #[test]
    fn test_dim_width() {
        for n in 0..64 {
            assert_eq!(dim_width::<Haploid>(n), n);
            assert_eq!(dim_width::<Diploid>(n), num_diploids(n));
        }
    }

    #[test]
    fn test_checked_num_diploids() {
        assert_eq!(checked_num_diploids(4).unwrap(), 10);
        assert_eq!(checked_num_diploids(5).unwrap(), 15);
        assert!(matches!(
            checked_num_diploids(usize::MAX),
            Err(GenotensorError::Overflow { .. })
        ));
    }

    #[test]
    fn test_allele_count_rejects_negative() {
        assert_eq!(allele_count(4).unwrap(), 4);
        assert_eq!(allele_count(0).unwrap(), 0);
        assert_eq!(
            allele_count(-3),
            Err(GenotensorError::InvalidAlleleCount { value: -3 })
        );
    }

    #[test]
    fn test_diploid_index_vcf_order() {
        // 0/0, 0/1, 1/1, 0/2, 1/2, 2/2
        assert_eq!(diploid_index(0, 0), 0);
        assert_eq!(diploid_index(0, 1), 1);
        assert_eq!(diploid_index(1, 1), 2);
        assert_eq!(diploid_index(2, 0), 3);
        assert_eq!(diploid_index(1, 2), 4);
        assert_eq!(diploid_index(2, 2), 5);
    }

    #[test]
    fn test_diploid_alleles_inverse() {
        let n = 12;
        let mut seen = vec![false; num_diploids(n)];
        for hi in 0..n {
            for lo in 0..=hi {
                let idx = diploid_index(lo, hi);
                assert!(!seen[idx]);
                seen[idx] = true;
                assert_eq!(diploid_alleles(idx), (lo, hi));
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_large_counts_do_not_wrap() {
        let n = 5_000_000_000usize;
        let expected = checked_num_diploids(n).unwrap();
        assert_eq!(expected, 12_500_000_002_500_000_000);
        assert_eq!(num_diploids(n), expected);
        assert_eq!(num_diploids(n + 1), checked_num_diploids(n + 1).unwrap());
        assert_eq!(dim_width::<Diploid>(n), expected);

        // last state of the largest allele and first state past it
        assert_eq!(diploid_alleles(expected - 1), (n - 1, n - 1));
        assert_eq!(diploid_alleles(expected), (0, n));
    }
}
