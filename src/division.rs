// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Two-point payout division.
//!
//! Only the two break points are resolved here. How the node splits funds for
//! values strictly between them is the node's own interpolation rule.

use crate::error::{KernelError, KernelResult};
use crate::types::Side;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Division {
    /// Attested value from which the drafting side receives everything.
    pub value_fully_ours: i64,
    /// Attested value from which the counterparty receives everything.
    pub value_fully_theirs: i64,
}

impl Division {
    pub fn new(value_fully_ours: i64, value_fully_theirs: i64) -> KernelResult<Self> {
        if value_fully_ours == value_fully_theirs {
            return Err(KernelError::DegenerateDivision);
        }
        Ok(Self {
            value_fully_ours,
            value_fully_theirs,
        })
    }

    /// Closed range spanned by the two thresholds, low end first.
    pub fn bounds(&self) -> (i64, i64) {
        if self.value_fully_ours < self.value_fully_theirs {
            (self.value_fully_ours, self.value_fully_theirs)
        } else {
            (self.value_fully_theirs, self.value_fully_ours)
        }
    }

    pub fn covers(&self, value: i64) -> bool {
        let (lo, hi) = self.bounds();
        value >= lo && value <= hi
    }

    /// Which side takes the whole pot for `value`, if the break points decide it.
    ///
    /// Works for either orientation: a value at or past the fully-ours threshold
    /// (in the direction away from the other threshold) goes to us, and likewise
    /// for the counterparty. Values strictly between return `None`.
    pub fn settles_fully_to(&self, value: i64) -> Option<Side> {
        if self.value_fully_ours > self.value_fully_theirs {
            if value >= self.value_fully_ours {
                Some(Side::Ours)
            } else if value <= self.value_fully_theirs {
                Some(Side::Theirs)
            } else {
                None
            }
        } else if value <= self.value_fully_ours {
            Some(Side::Ours)
        } else if value >= self.value_fully_theirs {
            Some(Side::Theirs)
        } else {
            None
        }
    }
}
