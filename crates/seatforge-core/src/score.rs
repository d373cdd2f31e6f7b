//! PlanScore - quality score of a completed seating plan

use std::fmt;
use std::ops::Add;

/// Non-negative quality score of a seating plan. Higher is better.
///
/// # Examples
///
/// ```
/// use seatforge_core::PlanScore;
///
/// let low = PlanScore::of(30);
/// let high = PlanScore::of(130);
///
/// assert!(high > low);
/// assert_eq!(PlanScore::of(-50), PlanScore::ZERO); // clamped at zero
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlanScore {
    score: i64,
}

impl PlanScore {
    /// The zero score.
    pub const ZERO: PlanScore = PlanScore { score: 0 };

    /// Creates a score, clamping negative values to zero.
    #[inline]
    pub const fn of(score: i64) -> Self {
        if score < 0 {
            PlanScore::ZERO
        } else {
            PlanScore { score }
        }
    }

    #[inline]
    pub const fn value(&self) -> i64 {
        self.score
    }
}

impl Add for PlanScore {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        PlanScore::of(self.score.saturating_add(other.score))
    }
}

impl fmt::Debug for PlanScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlanScore({})", self.score)
    }
}

impl fmt::Display for PlanScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_at_zero() {
        assert_eq!(PlanScore::of(-1).value(), 0);
        assert_eq!(PlanScore::of(42).value(), 42);
    }

    #[test]
    fn test_ordering() {
        let mut scores = vec![PlanScore::of(10), PlanScore::of(300), PlanScore::of(120)];
        scores.sort_by(|a, b| b.cmp(a));
        assert_eq!(scores[0], PlanScore::of(300));
        assert_eq!(scores[2], PlanScore::of(10));
    }
}
