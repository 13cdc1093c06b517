//! Algebraic properties of the multiprecision helper.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use tds_smp::Smp;

proptest! {
    #[test]
    fn negate_is_additive_inverse(n in any::<i64>()) {
        let a = Smp::from_i64(n);
        prop_assert_eq!(a.negate().add(a), Smp::ZERO);
    }

    #[test]
    fn string_roundtrip(n in any::<i64>()) {
        let a = Smp::from_i64(n);
        let s = a.to_string();
        prop_assert_eq!(s.parse::<Smp>().unwrap(), a);
    }

    #[test]
    fn cmp_consistent_with_sub_sign(x in any::<i64>(), y in any::<i64>()) {
        let a = Smp::from_i64(x);
        let b = Smp::from_i64(y);
        prop_assert_eq!(a.cmp(&b), x.cmp(&y));
        prop_assert_eq!(a.sub(b).is_negative(), x < y);
    }

    #[test]
    fn add_matches_i64(x in -(1i64 << 40)..(1i64 << 40), y in -(1i64 << 40)..(1i64 << 40)) {
        let sum = Smp::from_i64(x).add(Smp::from_i64(y));
        prop_assert_eq!(sum, Smp::from_i64(x + y));
    }

    #[test]
    fn mul_div_roundtrip(n in 0i64..i64::MAX, f in 1u16..u16::MAX) {
        let a = Smp::from_i64(n);
        if let Some(product) = a.checked_mul_small(f) {
            let (quot, rem) = product.div_rem_small(f);
            prop_assert_eq!(quot, a);
            prop_assert_eq!(rem, 0);
        }
    }
}
