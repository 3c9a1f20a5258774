//! The truth-value collaborator contract (§6) and a bundled implementation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque belief object supporting a `merge` operation and a null sentinel.
///
/// The core never inspects the contents of a truth value: it only calls
/// [`TruthValue::is_null`] to decide whether [`AtomTable::add`]'s merge step
/// has anything to do, and [`TruthValue::merge`] to actually combine two
/// values (§4.10).
///
/// [`AtomTable::add`]: crate::table::AtomTable::add
pub trait TruthValue: Clone + fmt::Debug + Send + Sync + 'static {
    /// The sentinel "no belief recorded" value, used for brand-new atoms
    /// that have not yet been given a truth value.
    fn null() -> Self;

    /// `true` iff this value is the null sentinel.
    fn is_null(&self) -> bool;

    /// Combines `self` with `other`, returning the merged value. Never
    /// called by the core when `other.is_null()`.
    #[must_use]
    fn merge(&self, other: &Self) -> Self;
}

/// A strength/confidence pair, the same shape as the original AtomTable's
/// `SimpleTruthValue`.
///
/// Both fields use [`rust_decimal::Decimal`] rather than `f64`: repeated
/// `add()`/merge cycles on a long-lived atom perform many chained merges,
/// and binary floating point accumulates rounding error across that many
/// operations in a way fixed-point decimal does not.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimpleTruthValue {
    /// Estimated strength (probability) of the belief, in `[0, 1]`.
    pub strength: Decimal,
    /// Confidence in `strength`, in `[0, 1]`.
    pub confidence: Decimal,
}

impl SimpleTruthValue {
    /// Creates a new truth value from a strength/confidence pair.
    #[must_use]
    pub fn new(strength: Decimal, confidence: Decimal) -> Self {
        Self {
            strength,
            confidence,
        }
    }
}

impl TruthValue for SimpleTruthValue {
    fn null() -> Self {
        Self {
            strength: Decimal::ZERO,
            confidence: Decimal::ZERO,
        }
    }

    fn is_null(&self) -> bool {
        self.confidence == Decimal::ZERO
    }

    fn merge(&self, other: &Self) -> Self {
        // Confidence-weighted average of the two strengths; the merged
        // confidence is the maximum of the two, matching the original's
        // "the more confident assertion wins the confidence, but both
        // opinions still inform the strength" merge policy.
        if self.is_null() {
            return *other;
        }
        let total = self.confidence + other.confidence;
        let strength = if total == Decimal::ZERO {
            self.strength
        } else {
            (self.strength * self.confidence + other.strength * other.confidence) / total
        };
        Self {
            strength,
            confidence: self.confidence.max(other.confidence),
        }
    }
}
