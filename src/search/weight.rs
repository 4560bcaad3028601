use std::{cmp::Ordering, fmt::Debug, marker::PhantomData, ops::Add};

use crate::graphs::AttributeBag;

/// Numeric edge cost.
///
/// `total_cmp` must be a total order; for floats it is the IEEE 754 total
/// order, so NaN never stalls the frontier.
pub trait Cost: Copy + Add<Output = Self> + PartialOrd + Debug + Send + Sync + 'static {
    fn zero() -> Self;

    /// Weight used when an edge carries no explicit weight.
    fn one() -> Self;

    fn total_cmp(&self, other: &Self) -> Ordering;

    fn is_negative(&self) -> bool {
        self.total_cmp(&Self::zero()) == Ordering::Less
    }
}

macro_rules! impl_integer_cost {
    ($($t:ty),*) => {
        $(
            impl Cost for $t {
                fn zero() -> Self {
                    0
                }

                fn one() -> Self {
                    1
                }

                fn total_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

macro_rules! impl_float_cost {
    ($($t:ty),*) => {
        $(
            impl Cost for $t {
                fn zero() -> Self {
                    0.0
                }

                fn one() -> Self {
                    1.0
                }

                fn total_cmp(&self, other: &Self) -> Ordering {
                    <$t>::total_cmp(self, other)
                }
            }
        )*
    };
}

impl_integer_cost!(i32, i64, u32, u64);
impl_float_cost!(f32, f64);

/// Maps an edge to its cost.
///
/// Returning `None` means the edge does not participate in the search; it is
/// skipped, never treated as a zero-cost edge.
pub trait WeightResolver<N, P, W> {
    fn weight(&self, tail: &N, head: &N, payload: &P) -> Option<W>;
}

/// Reads the weight from an edge attribute, falling back to `default` if the
/// attribute is absent.
#[derive(Clone, Debug)]
pub struct AttributeWeight<W> {
    pub key: String,
    pub default: W,
}

impl<W: Cost> AttributeWeight<W> {
    /// Looks up `key` and defaults to one.
    pub fn new(key: &str) -> Self {
        AttributeWeight {
            key: key.to_string(),
            default: W::one(),
        }
    }

    pub fn with_default(key: &str, default: W) -> Self {
        AttributeWeight {
            key: key.to_string(),
            default,
        }
    }
}

impl<W: Cost> Default for AttributeWeight<W> {
    fn default() -> Self {
        AttributeWeight::new("weight")
    }
}

impl<N, P, W> WeightResolver<N, P, W> for AttributeWeight<W>
where
    P: AttributeBag<W>,
    W: Cost,
{
    fn weight(&self, _tail: &N, _head: &N, payload: &P) -> Option<W> {
        Some(payload.attribute(&self.key).unwrap_or(self.default))
    }
}

/// Caller supplied weight function of `(tail, head, payload)`.
pub struct WeightFn<F, W> {
    function: F,
    _weight: PhantomData<fn() -> W>,
}

impl<F, W> WeightFn<F, W> {
    pub fn new(function: F) -> Self {
        WeightFn {
            function,
            _weight: PhantomData,
        }
    }
}

impl<N, P, W, F> WeightResolver<N, P, W> for WeightFn<F, W>
where
    F: Fn(&N, &N, &P) -> Option<W>,
{
    fn weight(&self, tail: &N, head: &N, payload: &P) -> Option<W> {
        (self.function)(tail, head, payload)
    }
}

#[cfg(test)]
mod tests {
    use ahash::{HashMap, HashMapExt};

    use super::{AttributeWeight, Cost, WeightFn, WeightResolver};
    use crate::graphs::Attributes;

    #[test]
    fn attribute_weight_defaults_to_one() {
        let mut attributes: Attributes<i64> = HashMap::new();
        let resolver = AttributeWeight::<i64>::new("weight");
        assert_eq!(resolver.weight(&0, &1, &attributes), Some(1));

        attributes.insert("weight".to_string(), -3);
        assert_eq!(resolver.weight(&0, &1, &attributes), Some(-3));
    }

    #[test]
    fn weight_function_can_mask_edges() {
        let resolver = WeightFn::new(|tail: &u32, _head: &u32, _payload: &()| {
            (*tail != 2).then_some(5.0_f64)
        });
        assert_eq!(resolver.weight(&1, &2, &()), Some(5.0));
        assert_eq!(resolver.weight(&2, &3, &()), None);
    }

    #[test]
    fn float_costs_are_totally_ordered() {
        assert!((-0.5_f64).is_negative());
        assert!(!0.0_f64.is_negative());
        assert_eq!(Cost::total_cmp(&1.0_f64, &2.0), std::cmp::Ordering::Less);
    }
}
