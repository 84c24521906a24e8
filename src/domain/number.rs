use std::fmt::Display;

/// A single coordinate component. Remembers whether it was an integer or a float so the plain form
/// round-trips without turning `1` into `1.0`.
#[derive(Clone, Copy, Debug)]
pub enum Number {
    PositiveInt(u64),
    NegativeInt(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::PositiveInt(n) => n as f64,
            Number::NegativeInt(n) => n as f64,
            Number::Float(n) => n,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }
}

impl From<&serde_json::Number> for Number {
    fn from(value: &serde_json::Number) -> Self {
        if let Some(n) = value.as_u64() {
            Number::PositiveInt(n)
        } else if let Some(n) = value.as_i64() {
            Number::NegativeInt(n)
        } else {
            // Without arbitrary_precision every serde_json number is one of u64, i64 or f64
            Number::Float(value.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Number::PositiveInt(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        if value < 0 { Number::NegativeInt(value) } else { Number::PositiveInt(value as u64) }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::from(value as i64)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::PositiveInt(a), Number::PositiveInt(b)) => a == b,
            (Number::NegativeInt(a), Number::NegativeInt(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b,
            (Number::PositiveInt(a), Number::NegativeInt(b)) | (Number::NegativeInt(b), Number::PositiveInt(a)) => *b >= 0 && *a == *b as u64,
            // Integers above 2^53 round when widened to f64, so int/float equality is not transitive there
            (Number::Float(a), Number::PositiveInt(b)) => *a == *b as f64,
            (Number::Float(a), Number::NegativeInt(b)) => *a == *b as f64,
            (Number::PositiveInt(a), Number::Float(b)) => *a as f64 == *b,
            (Number::NegativeInt(a), Number::Float(b)) => *a as f64 == *b,
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::PositiveInt(n) => write!(f, "{}", n),
            Number::NegativeInt(n) => write!(f, "{}", n),
            // Debug keeps the trailing ".0" so floats stay distinguishable from integers
            Number::Float(n) => write!(f, "{:?}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Number::PositiveInt(42), Number::PositiveInt(42))]
    #[case(Number::PositiveInt(42), Number::Float(42.0))]
    #[case(Number::NegativeInt(-42), Number::NegativeInt(-42))]
    #[case(Number::NegativeInt(-42), Number::Float(-42.0))]
    #[case(Number::Float(42.0), Number::PositiveInt(42))]
    #[case(Number::Float(-42.0), Number::NegativeInt(-42))]
    #[case(Number::Float(42.7), Number::Float(42.7))]
    fn compare_equals(#[case] a: Number, #[case] b: Number) {
        assert_eq!(a, b);
    }

    #[rstest]
    #[case(Number::PositiveInt(42), Number::PositiveInt(7))]
    #[case(Number::PositiveInt(42), Number::NegativeInt(-42))]
    #[case(Number::PositiveInt(42), Number::Float(41.999))]
    #[case(Number::NegativeInt(-42), Number::Float(-41.999))]
    #[case(Number::Float(f64::NAN), Number::Float(f64::NAN))]
    fn compare_not_equals(#[case] a: Number, #[case] b: Number) {
        assert_ne!(a, b);
    }

    #[test]
    fn large_integers_compare_equal_to_their_rounded_float() {
        let rounded = Number::Float(9_007_199_254_740_992.0);

        assert_eq!(Number::PositiveInt(9_007_199_254_740_993), rounded);
        assert_eq!(Number::PositiveInt(9_007_199_254_740_992), rounded);
        assert_ne!(Number::PositiveInt(9_007_199_254_740_993), Number::PositiveInt(9_007_199_254_740_992));
    }

    #[rstest]
    #[case(serde_json::json!(42), Number::PositiveInt(42))]
    #[case(serde_json::json!(-42), Number::NegativeInt(-42))]
    #[case(serde_json::json!(4.5), Number::Float(4.5))]
    #[case(serde_json::json!(1.0), Number::Float(1.0))]
    fn converts_from_json_numbers(#[case] json: serde_json::Value, #[case] expected: Number) {
        let serde_json::Value::Number(n) = json else {
            panic!("expected a json number fixture");
        };

        let number = Number::from(&n);
        assert_eq!(number, expected);
        assert_eq!(number.is_float(), expected.is_float());
    }

    #[rstest]
    #[case(Number::PositiveInt(3), "3")]
    #[case(Number::NegativeInt(-3), "-3")]
    #[case(Number::Float(3.0), "3.0")]
    #[case(Number::Float(-0.25), "-0.25")]
    fn displays_integers_and_floats_distinctly(#[case] number: Number, #[case] expected: &str) {
        assert_eq!(number.to_string(), expected);
    }

    #[test]
    fn converts_negative_and_positive_i64() {
        assert!(matches!(Number::from(-1i64), Number::NegativeInt(-1)));
        assert!(matches!(Number::from(1i64), Number::PositiveInt(1)));
        assert_eq!(Number::from(7i32).as_f64(), 7.0);
    }
}
