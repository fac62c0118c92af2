//! Algebraic laws checked over random weights for every semiring.

use kleene_core::{Boolean, Product, Real, Semiring, StringWeight, Tropical};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn boolean() -> impl Strategy<Value = Boolean> {
    any::<bool>().prop_map(Boolean)
}

/// Integer scores keep floating-point sums exact; `∞` is included so the
/// zero takes part in every law.
fn tropical() -> impl Strategy<Value = Tropical> {
    prop_oneof![
        9 => (0u32..1000).prop_map(|s| Tropical(s as f64)),
        1 => Just(Tropical::zero()),
    ]
}

fn real() -> impl Strategy<Value = Real> {
    (0.0f64..2.0).prop_map(Real)
}

fn string() -> impl Strategy<Value = StringWeight> {
    prop_oneof![
        9 => "[ab]{0,5}".prop_map(StringWeight::from),
        1 => Just(StringWeight::zero()),
    ]
}

fn product() -> impl Strategy<Value = Product<Tropical, Real>> {
    (tropical(), real()).prop_map(|(a, b)| Product(a, b))
}

// ---------------------------------------------------------------------------
// Laws
// ---------------------------------------------------------------------------

fn check_monoid_laws<W: Semiring>(x: &W, y: &W, z: &W) -> Result<(), TestCaseError> {
    prop_assert_eq!(x.add(y), y.add(x));
    prop_assert_eq!(x.add(y).add(z), x.add(&y.add(z)));
    prop_assert_eq!(x.multiply(y).multiply(z), x.multiply(&y.multiply(z)));
    prop_assert_eq!(x.add(&W::zero()), x.clone());
    prop_assert_eq!(x.multiply(&W::one()), x.clone());
    prop_assert_eq!(W::one().multiply(x), x.clone());
    prop_assert!(x.multiply(&W::zero()).is_zero());
    prop_assert!(W::zero().multiply(x).is_zero());
    if W::IDEMPOTENT {
        prop_assert_eq!(x.add(x), x.clone());
    }
    Ok(())
}

fn check_left_distributive<W: Semiring>(x: &W, y: &W, z: &W) -> Result<(), TestCaseError> {
    prop_assert_eq!(x.multiply(&y.add(z)), x.multiply(y).add(&x.multiply(z)));
    Ok(())
}

fn check_right_distributive<W: Semiring>(x: &W, y: &W, z: &W) -> Result<(), TestCaseError> {
    prop_assert_eq!(y.add(z).multiply(x), y.multiply(x).add(&z.multiply(x)));
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn boolean_laws(x in boolean(), y in boolean(), z in boolean()) {
        check_monoid_laws(&x, &y, &z)?;
        check_left_distributive(&x, &y, &z)?;
        check_right_distributive(&x, &y, &z)?;
    }

    #[test]
    fn tropical_laws(x in tropical(), y in tropical(), z in tropical()) {
        check_monoid_laws(&x, &y, &z)?;
        check_left_distributive(&x, &y, &z)?;
        check_right_distributive(&x, &y, &z)?;
    }

    #[test]
    fn real_laws(x in real(), y in real(), z in real()) {
        check_monoid_laws(&x, &y, &z)?;
        check_left_distributive(&x, &y, &z)?;
        check_right_distributive(&x, &y, &z)?;
    }

    #[test]
    fn string_laws(x in string(), y in string(), z in string()) {
        check_monoid_laws(&x, &y, &z)?;
        check_left_distributive(&x, &y, &z)?;
    }

    #[test]
    fn product_laws(x in product(), y in product(), z in product()) {
        check_monoid_laws(&x, &y, &z)?;
        check_left_distributive(&x, &y, &z)?;
        check_right_distributive(&x, &y, &z)?;
    }

    #[test]
    fn tropical_divide_inverts_multiply(x in 0u32..1000, y in 0u32..1000) {
        let (x, y) = (Tropical(x as f64), Tropical(y as f64));
        prop_assert_eq!(x.multiply(&y).divide(&y).unwrap(), x);
    }

    #[test]
    fn real_divide_inverts_multiply(x in 0.0f64..10.0, y in 0.1f64..10.0) {
        let (x, y) = (Real(x), Real(y));
        prop_assert_eq!(x.multiply(&y).divide(&y).unwrap(), x);
    }

    #[test]
    fn string_left_division_undoes_left_multiply(x in "[ab]{0,4}", y in "[ab]{0,4}") {
        let (x, y) = (StringWeight::from(x), StringWeight::from(y));
        prop_assert_eq!(x.multiply(&y).divide(&x).unwrap(), y);
    }
}
