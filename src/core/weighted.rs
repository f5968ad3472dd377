use crate::utils::error::{Result, TalkError};
use rand::Rng;

/// Numeric types usable as selection weights.
pub trait Weight {
    fn as_weight(self) -> f64;
}

macro_rules! impl_weight {
    ($($t:ty),*) => {
        $(impl Weight for $t {
            fn as_weight(self) -> f64 {
                self as f64
            }
        })*
    };
}

impl_weight!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

/// Picks one item with probability `weight / total_weight`.
///
/// Weights can be any integer or float type. A uniform value is
/// drawn in `(0, total]` and weights are accumulated in input order until the
/// running sum reaches it, so zero-weight items are never returned.
///
/// # Errors
/// - `EmptyInput` when `pairs` is empty
/// - `InvalidWeight` for a negative, NaN or infinite weight, or weights whose sum overflows
/// - `ZeroTotalWeight` when every weight is zero
pub fn weighted_choice<W, T, R>(pairs: impl IntoIterator<Item = (W, T)>, rng: &mut R) -> Result<T>
where
    W: Weight,
    R: Rng,
{
    let mut candidates = Vec::new();
    for (weight, item) in pairs {
        let weight = weight.as_weight();
        if !weight.is_finite() || weight < 0.0 {
            return Err(TalkError::InvalidWeight { weight });
        }
        candidates.push((weight, item));
    }

    if candidates.is_empty() {
        return Err(TalkError::EmptyInput);
    }

    let total: f64 = candidates.iter().map(|(weight, _)| weight).sum();
    if !total.is_finite() {
        return Err(TalkError::InvalidWeight { weight: total });
    }
    if total <= 0.0 {
        return Err(TalkError::ZeroTotalWeight);
    }

    // random_range is half-open on the right; flip it to get (0, total]
    let draw = total - rng.random_range(0.0..total);

    let mut running = 0.0;
    let mut fallback = None;
    for (weight, item) in candidates {
        if weight <= 0.0 {
            continue;
        }
        running += weight;
        if running >= draw {
            return Ok(item);
        }
        fallback = Some(item);
    }

    // Float summation can leave the running sum a hair below `draw`.
    fallback.ok_or(TalkError::ZeroTotalWeight)
}
