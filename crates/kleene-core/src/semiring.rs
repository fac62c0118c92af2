// Semiring weights: Boolean, Tropical, Real, String, Product.

use std::cmp::Ordering;
use std::fmt;

use crate::WeightError;

/// Absolute tolerance used by [`Real`] equality.
///
/// Real scores accumulate rounding error through repeated products and sums,
/// so two Real weights are equal when their scores differ by at most this.
pub const REAL_TOLERANCE: f64 = 1e-3;

/// A semiring weight.
///
/// Implementations must satisfy the usual laws, which the automaton
/// algorithms rely on:
///
/// - `add` is commutative and associative with identity `zero`;
/// - `multiply` is associative with identity `one`;
/// - `zero` annihilates under `multiply`;
/// - `multiply` distributes over `add` ([`StringWeight`] is only
///   left-distributive).
///
/// `multiply` must short-circuit on `zero` and `one` before touching the
/// underlying arithmetic.
pub trait Semiring: Clone + PartialEq + fmt::Debug + fmt::Display {
    /// `x + x == x` for every `x`.
    const IDEMPOTENT: bool;
    /// Division is well defined and exact.
    const CANCELLATIVE: bool;
    /// Human-readable name used in error messages.
    const NAME: &'static str;

    fn zero() -> Self;
    fn one() -> Self;
    fn add(&self, other: &Self) -> Self;
    fn multiply(&self, other: &Self) -> Self;

    /// Kleene closure: the sum of all non-negative powers.
    fn star(&self) -> Result<Self, WeightError>;

    /// Multiplicative inverse.
    fn invert(&self) -> Result<Self, WeightError> {
        Err(WeightError::NotCancellative {
            semiring: Self::NAME,
        })
    }

    /// `self / other`.
    fn divide(&self, _other: &Self) -> Result<Self, WeightError> {
        Err(WeightError::NotCancellative {
            semiring: Self::NAME,
        })
    }

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    fn is_one(&self) -> bool {
        *self == Self::one()
    }

    /// Sum of an iterator of weights; `zero` when empty.
    fn sum<'a, I>(weights: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a,
    {
        weights
            .into_iter()
            .fold(Self::zero(), |acc, w| acc.add(w))
    }

    /// Product of an iterator of weights; `one` when empty.
    fn product<'a, I>(weights: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a,
    {
        weights
            .into_iter()
            .fold(Self::one(), |acc, w| acc.multiply(w))
    }
}

/// Exact comparison on raw scores.
///
/// Unlike `PartialOrd`, which agrees with the tolerant [`Real`] equality,
/// this never treats nearby scores as equal.
pub trait StrictOrder: Semiring {
    fn strictly_greater(&self, other: &Self) -> bool;
}

// ---------------------------------------------------------------------------
// Boolean
// ---------------------------------------------------------------------------

/// The Boolean semiring `({false, true}, ∨, ∧, false, true)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Boolean(pub bool);

impl Semiring for Boolean {
    const IDEMPOTENT: bool = true;
    const CANCELLATIVE: bool = true;
    const NAME: &'static str = "Boolean";

    fn zero() -> Self {
        Boolean(false)
    }

    fn one() -> Self {
        Boolean(true)
    }

    fn add(&self, other: &Self) -> Self {
        Boolean(self.0 || other.0)
    }

    fn multiply(&self, other: &Self) -> Self {
        Boolean(self.0 && other.0)
    }

    fn star(&self) -> Result<Self, WeightError> {
        Ok(Self::one())
    }

    fn invert(&self) -> Result<Self, WeightError> {
        Ok(Self::one())
    }

    fn divide(&self, other: &Self) -> Result<Self, WeightError> {
        if !other.0 {
            return Err(WeightError::DivisionByZero {
                semiring: Self::NAME,
            });
        }
        Ok(*self)
    }
}

impl fmt::Display for Boolean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<bool> for Boolean {
    fn from(score: bool) -> Self {
        Boolean(score)
    }
}

// ---------------------------------------------------------------------------
// Tropical
// ---------------------------------------------------------------------------

/// The tropical semiring `(ℝ ∪ {∞}, min, +, ∞, 0)`.
#[derive(Debug, Clone, Copy)]
pub struct Tropical(pub f64);

impl Tropical {
    pub fn new(score: f64) -> Self {
        Tropical(score)
    }

    pub fn score(&self) -> f64 {
        self.0
    }
}

impl Semiring for Tropical {
    const IDEMPOTENT: bool = true;
    const CANCELLATIVE: bool = true;
    const NAME: &'static str = "Tropical";

    fn zero() -> Self {
        Tropical(f64::INFINITY)
    }

    fn one() -> Self {
        Tropical(0.0)
    }

    fn add(&self, other: &Self) -> Self {
        Tropical(self.0.min(other.0))
    }

    fn multiply(&self, other: &Self) -> Self {
        if other.is_one() {
            return *self;
        }
        if self.is_one() {
            return *other;
        }
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        Tropical(self.0 + other.0)
    }

    /// Scores are non-negative in the monoid of interest, so the closure is
    /// always `one`.
    fn star(&self) -> Result<Self, WeightError> {
        Ok(Self::one())
    }

    fn invert(&self) -> Result<Self, WeightError> {
        if self.is_zero() {
            return Err(WeightError::DivisionByZero {
                semiring: Self::NAME,
            });
        }
        Ok(Tropical(-self.0))
    }

    fn divide(&self, other: &Self) -> Result<Self, WeightError> {
        if other.is_zero() {
            return Err(WeightError::DivisionByZero {
                semiring: Self::NAME,
            });
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }
        Ok(Tropical(self.0 - other.0))
    }

    fn is_zero(&self) -> bool {
        self.0 == f64::INFINITY
    }

    fn is_one(&self) -> bool {
        self.0 == 0.0
    }
}

impl PartialEq for Tropical {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Tropical {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl fmt::Display for Tropical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<f64> for Tropical {
    fn from(score: f64) -> Self {
        Tropical(score)
    }
}

impl From<Tropical> for f64 {
    fn from(w: Tropical) -> Self {
        w.0
    }
}

// ---------------------------------------------------------------------------
// Real
// ---------------------------------------------------------------------------

/// The real semiring `(ℝ, +, ×, 0, 1)`.
///
/// Equality is approximate, see [`REAL_TOLERANCE`].
#[derive(Debug, Clone, Copy)]
pub struct Real(pub f64);

impl Real {
    pub fn new(score: f64) -> Self {
        Real(score)
    }

    pub fn score(&self) -> f64 {
        self.0
    }
}

impl Semiring for Real {
    const IDEMPOTENT: bool = false;
    const CANCELLATIVE: bool = true;
    const NAME: &'static str = "Real";

    fn zero() -> Self {
        Real(0.0)
    }

    fn one() -> Self {
        Real(1.0)
    }

    fn add(&self, other: &Self) -> Self {
        Real(self.0 + other.0)
    }

    fn multiply(&self, other: &Self) -> Self {
        if other.0 == 1.0 {
            return *self;
        }
        if self.0 == 1.0 {
            return *other;
        }
        if self.0 == 0.0 || other.0 == 0.0 {
            return Self::zero();
        }
        Real(self.0 * other.0)
    }

    /// `1 / (1 - x)`.
    ///
    /// Only meaningful for `|x| < 1`. No domain check is made: `x == 1`
    /// yields an infinite score and `x > 1` a negative one.
    fn star(&self) -> Result<Self, WeightError> {
        Ok(Real(1.0 / (1.0 - self.0)))
    }

    fn invert(&self) -> Result<Self, WeightError> {
        if self.0 == 0.0 {
            return Err(WeightError::DivisionByZero {
                semiring: Self::NAME,
            });
        }
        Ok(Real(1.0 / self.0))
    }

    fn divide(&self, other: &Self) -> Result<Self, WeightError> {
        if other.0 == 0.0 {
            return Err(WeightError::DivisionByZero {
                semiring: Self::NAME,
            });
        }
        Ok(Real(self.0 / other.0))
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 || (self.0 - other.0).abs() <= REAL_TOLERANCE
    }
}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        self.0.partial_cmp(&other.0)
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<f64> for Real {
    fn from(score: f64) -> Self {
        Real(score)
    }
}

impl From<Real> for f64 {
    fn from(w: Real) -> Self {
        w.0
    }
}

impl StrictOrder for Boolean {
    fn strictly_greater(&self, other: &Self) -> bool {
        self.0 && !other.0
    }
}

impl StrictOrder for Tropical {
    fn strictly_greater(&self, other: &Self) -> bool {
        self.0 > other.0
    }
}

impl StrictOrder for Real {
    fn strictly_greater(&self, other: &Self) -> bool {
        self.0 > other.0
    }
}

// ---------------------------------------------------------------------------
// String
// ---------------------------------------------------------------------------

/// The string semiring: `add` is the longest common prefix, `multiply` is
/// concatenation, `one` is the empty string and `zero` is a distinguished
/// infinite string `∞`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StringWeight {
    Infinity,
    Word(String),
}

impl StringWeight {
    pub fn new(word: impl Into<String>) -> Self {
        StringWeight::Word(word.into())
    }

    /// The word, or `None` for the `∞` zero.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StringWeight::Infinity => None,
            StringWeight::Word(w) => Some(w),
        }
    }
}

/// Longest common prefix of two strings, on character boundaries.
pub fn lcp<'a>(x: &'a str, y: &str) -> &'a str {
    let end = x
        .char_indices()
        .zip(y.chars())
        .take_while(|((_, a), b)| a == b)
        .last()
        .map_or(0, |((i, a), _)| i + a.len_utf8());
    &x[..end]
}

impl Semiring for StringWeight {
    const IDEMPOTENT: bool = false;
    const CANCELLATIVE: bool = false;
    const NAME: &'static str = "String";

    fn zero() -> Self {
        StringWeight::Infinity
    }

    fn one() -> Self {
        StringWeight::Word(String::new())
    }

    fn add(&self, other: &Self) -> Self {
        match (self, other) {
            (StringWeight::Infinity, _) => other.clone(),
            (_, StringWeight::Infinity) => self.clone(),
            (StringWeight::Word(x), StringWeight::Word(y)) => {
                StringWeight::Word(lcp(x, y).to_string())
            }
        }
    }

    fn multiply(&self, other: &Self) -> Self {
        match (self, other) {
            (StringWeight::Infinity, _) | (_, StringWeight::Infinity) => StringWeight::Infinity,
            (StringWeight::Word(x), _) if x.is_empty() => other.clone(),
            (_, StringWeight::Word(y)) if y.is_empty() => self.clone(),
            (StringWeight::Word(x), StringWeight::Word(y)) => {
                let mut s = String::with_capacity(x.len() + y.len());
                s.push_str(x);
                s.push_str(y);
                StringWeight::Word(s)
            }
        }
    }

    fn star(&self) -> Result<Self, WeightError> {
        Ok(Self::one())
    }

    /// Strips the longest common prefix of both operands from `self`.
    fn divide(&self, other: &Self) -> Result<Self, WeightError> {
        match (self, other) {
            (_, StringWeight::Infinity) => Err(WeightError::DivisionByZero {
                semiring: Self::NAME,
            }),
            (StringWeight::Infinity, _) => Ok(StringWeight::Infinity),
            (StringWeight::Word(x), StringWeight::Word(y)) => {
                let prefix = lcp(x, y);
                Ok(StringWeight::Word(x[prefix.len()..].to_string()))
            }
        }
    }

    fn is_zero(&self) -> bool {
        matches!(self, StringWeight::Infinity)
    }

    fn is_one(&self) -> bool {
        matches!(self, StringWeight::Word(w) if w.is_empty())
    }
}

impl fmt::Display for StringWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringWeight::Infinity => f.write_str("∞"),
            StringWeight::Word(w) => f.write_str(w),
        }
    }
}

impl From<&str> for StringWeight {
    fn from(word: &str) -> Self {
        StringWeight::new(word)
    }
}

impl From<String> for StringWeight {
    fn from(word: String) -> Self {
        StringWeight::Word(word)
    }
}

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

/// Two semirings paired coordinate-wise.
///
/// The usual instance is `Product<StringWeight, Real>` (or `Tropical`), which
/// tracks a transduction's output string and its weight at the same time.
#[derive(Debug, Clone, PartialEq)]
pub struct Product<A, B>(pub A, pub B);

impl<A, B> Product<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Product(a, b)
    }
}

impl<A: Semiring, B: Semiring> Semiring for Product<A, B> {
    const IDEMPOTENT: bool = A::IDEMPOTENT && B::IDEMPOTENT;
    const CANCELLATIVE: bool = A::CANCELLATIVE && B::CANCELLATIVE;
    const NAME: &'static str = "Product";

    fn zero() -> Self {
        Product(A::zero(), B::zero())
    }

    fn one() -> Self {
        Product(A::one(), B::one())
    }

    fn add(&self, other: &Self) -> Self {
        Product(self.0.add(&other.0), self.1.add(&other.1))
    }

    fn multiply(&self, other: &Self) -> Self {
        Product(self.0.multiply(&other.0), self.1.multiply(&other.1))
    }

    fn star(&self) -> Result<Self, WeightError> {
        Err(WeightError::Undefined {
            operation: "star",
            semiring: Self::NAME,
        })
    }

    fn invert(&self) -> Result<Self, WeightError> {
        Ok(Product(self.0.invert()?, self.1.invert()?))
    }

    fn divide(&self, other: &Self) -> Result<Self, WeightError> {
        Ok(Product(self.0.divide(&other.0)?, self.1.divide(&other.1)?))
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero() && self.1.is_zero()
    }

    fn is_one(&self) -> bool {
        self.0.is_one() && self.1.is_one()
    }
}

impl<A: fmt::Display, B: fmt::Display> fmt::Display for Product<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "〈{}, {}〉", self.0, self.1)
    }
}

impl<A, B> From<(A, B)> for Product<A, B> {
    fn from((a, b): (A, B)) -> Self {
        Product(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Tropical ------------------------------------------------------------

    #[test]
    fn tropical_examples() {
        assert_eq!(Tropical(3.0).add(&Tropical(5.0)), Tropical(3.0));
        assert_eq!(Tropical(3.0).multiply(&Tropical(5.0)), Tropical(8.0));
        assert_eq!(Tropical::zero(), Tropical(f64::INFINITY));
        assert_eq!(Tropical::one(), Tropical(0.0));
    }

    #[test]
    fn tropical_zero_absorbs_negative_infinity() {
        // inf + -inf would be NaN without the short-circuit
        let w = Tropical::zero().multiply(&Tropical(f64::NEG_INFINITY));
        assert!(w.is_zero());
    }

    #[test]
    fn tropical_division() {
        assert_eq!(Tropical(8.0).divide(&Tropical(5.0)).unwrap(), Tropical(3.0));
        assert_eq!(Tropical(4.0).invert().unwrap(), Tropical(-4.0));
        assert!(matches!(
            Tropical(1.0).divide(&Tropical::zero()),
            Err(WeightError::DivisionByZero { .. })
        ));
        assert!(Tropical::zero().divide(&Tropical(2.0)).unwrap().is_zero());
    }

    #[test]
    fn tropical_star_is_one() {
        assert_eq!(Tropical(7.0).star().unwrap(), Tropical::one());
    }

    #[test]
    fn tropical_ordering() {
        assert!(Tropical(1.0) < Tropical(2.0));
        assert!(Tropical(2.0) < Tropical::zero());
    }

    // -- Real ----------------------------------------------------------------

    #[test]
    fn real_invert() {
        assert_eq!(Real(0.5).invert().unwrap(), Real(2.0));
    }

    #[test]
    fn real_tolerant_equality() {
        assert_eq!(Real(0.30000001), Real(0.3));
        assert_eq!(Real(0.3009), Real(0.3));
        assert_ne!(Real(0.302), Real(0.3));
        assert_eq!(Real(f64::INFINITY), Real(f64::INFINITY));
    }

    #[test]
    fn real_division_by_zero() {
        assert_eq!(
            Real(1.0).divide(&Real(0.0)),
            Err(WeightError::DivisionByZero { semiring: "Real" })
        );
        assert!(Real(0.0).invert().is_err());
        assert_eq!(Real(3.0).divide(&Real(2.0)).unwrap(), Real(1.5));
    }

    #[test]
    fn real_star_inside_domain() {
        assert_eq!(Real(0.5).star().unwrap(), Real(2.0));
        assert_eq!(Real(0.0).star().unwrap(), Real::one());
        assert_eq!(Real(-1.0).star().unwrap(), Real(0.5));
    }

    #[test]
    fn real_star_outside_domain_is_unchecked() {
        // |x| >= 1 is the caller's responsibility: no error, meaningless value
        let at_one = Real(1.0).star().unwrap();
        assert!(at_one.score().is_infinite());
        let above = Real(2.0).star().unwrap();
        assert_eq!(above, Real(-1.0));
        assert!(above.score() < 0.0);
    }

    #[test]
    fn real_ordering() {
        assert!(Real(0.1) < Real(0.2));
        assert_eq!(
            Real(0.1).partial_cmp(&Real(0.1005)),
            Some(Ordering::Equal)
        );
    }

    // -- String --------------------------------------------------------------

    #[test]
    fn string_examples() {
        assert_eq!(
            StringWeight::from("abc").add(&StringWeight::from("abd")),
            StringWeight::from("ab")
        );
        assert_eq!(
            StringWeight::from("ab").multiply(&StringWeight::from("c")),
            StringWeight::from("abc")
        );
        assert_eq!(
            StringWeight::zero().add(&StringWeight::from("x")),
            StringWeight::from("x")
        );
    }

    #[test]
    fn string_zero_is_not_a_word() {
        // "∞" as a word is an ordinary string, not the zero
        let w = StringWeight::from("∞");
        assert!(!w.is_zero());
        assert_eq!(StringWeight::zero().to_string(), "∞");
        assert_eq!(StringWeight::zero().as_str(), None);
    }

    #[test]
    fn string_divide_strips_common_prefix() {
        let x = StringWeight::from("abcd");
        assert_eq!(
            x.divide(&StringWeight::from("abx")).unwrap(),
            StringWeight::from("cd")
        );
        assert_eq!(
            x.divide(&StringWeight::from("zz")).unwrap(),
            StringWeight::from("abcd")
        );
        assert!(x.divide(&StringWeight::zero()).is_err());
    }

    #[test]
    fn string_is_not_cancellative() {
        assert!(!StringWeight::CANCELLATIVE);
        assert_eq!(
            StringWeight::from("a").invert(),
            Err(WeightError::NotCancellative { semiring: "String" })
        );
    }

    #[test]
    fn lcp_multibyte() {
        assert_eq!(lcp("äbc", "äbd"), "äb");
        assert_eq!(lcp("ä", "äö"), "ä");
        assert_eq!(lcp("äö", "ä"), "ä");
        assert_eq!(lcp("", "x"), "");
        assert_eq!(lcp("ö", "ä"), "");
    }

    // -- Boolean -------------------------------------------------------------

    #[test]
    fn boolean_basics() {
        assert_eq!(Boolean(true).add(&Boolean(false)), Boolean(true));
        assert_eq!(Boolean(true).multiply(&Boolean(false)), Boolean(false));
        assert_eq!(Boolean(false).star().unwrap(), Boolean::one());
        assert_eq!(Boolean(false).divide(&Boolean(true)).unwrap(), Boolean(false));
        assert!(Boolean(true).divide(&Boolean(false)).is_err());
    }

    // -- Product -------------------------------------------------------------

    #[test]
    fn product_componentwise() {
        let x = Product(StringWeight::from("ab"), Real(0.5));
        let y = Product(StringWeight::from("ac"), Real(0.25));
        assert_eq!(x.add(&y), Product(StringWeight::from("a"), Real(0.75)));
        assert_eq!(
            x.multiply(&y),
            Product(StringWeight::from("abac"), Real(0.125))
        );
    }

    #[test]
    fn product_flags() {
        assert!(Product::<Tropical, Boolean>::IDEMPOTENT);
        assert!(!Product::<Tropical, Real>::IDEMPOTENT);
        assert!(Product::<Tropical, Real>::CANCELLATIVE);
        assert!(!Product::<StringWeight, Real>::CANCELLATIVE);
    }

    #[test]
    fn product_invert_and_divide() {
        let x = Product(Tropical(3.0), Real(4.0));
        assert_eq!(x.invert().unwrap(), Product(Tropical(-3.0), Real(0.25)));
        let y = Product(Tropical(1.0), Real(2.0));
        assert_eq!(x.divide(&y).unwrap(), Product(Tropical(2.0), Real(2.0)));
        // the error of a component propagates
        let s = Product(StringWeight::from("a"), Real(1.0));
        assert!(s.invert().is_err());
    }

    #[test]
    fn product_star_is_undefined() {
        let x = Product(Tropical(1.0), Real(0.5));
        assert_eq!(
            x.star(),
            Err(WeightError::Undefined {
                operation: "star",
                semiring: "Product"
            })
        );
    }

    #[test]
    fn product_display() {
        let x = Product(StringWeight::from("ab"), Tropical(2.0));
        assert_eq!(x.to_string(), "〈ab, 2〉");
    }

    // -- Strict order --------------------------------------------------------

    #[test]
    fn strict_order_ignores_real_tolerance() {
        let tiny = Real(0.0005);
        assert_eq!(tiny.partial_cmp(&Real::zero()), Some(Ordering::Equal));
        assert!(tiny.strictly_greater(&Real::zero()));
        assert!(!Real::zero().strictly_greater(&Real::zero()));
        assert!(Boolean(true).strictly_greater(&Boolean(false)));
        assert!(!Boolean(true).strictly_greater(&Boolean(true)));
        assert!(!Tropical(3.0).strictly_greater(&Tropical::zero()));
    }

    // -- Helpers -------------------------------------------------------------

    #[test]
    fn sum_and_product() {
        let ws = [Real(0.5), Real(0.25), Real(0.25)];
        assert_eq!(Real::sum(&ws), Real(1.0));
        assert_eq!(Real::product(&ws), Real(0.03125));
        assert_eq!(Tropical::sum(std::iter::empty()), Tropical::zero());
        assert_eq!(Tropical::product(std::iter::empty()), Tropical::one());
    }
}
