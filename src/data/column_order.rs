use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{FreezeError, Result};

/// Bijection between a column's physical index (stable identity) and its
/// visual position (left-to-right display rank).
///
/// Both directions are stored so lookups are O(1). The two vectors are always
/// inverse permutations of `0..column_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOrderMap {
    /// visual position -> physical index
    visual_to_physical: Vec<usize>,

    /// physical index -> visual position
    physical_to_visual: Vec<usize>,
}

impl ColumnOrderMap {
    /// Create the identity order for `column_count` columns
    pub fn new(column_count: usize) -> Self {
        Self {
            visual_to_physical: (0..column_count).collect(),
            physical_to_visual: (0..column_count).collect(),
        }
    }

    /// Build a map from an explicit visual order (physical index per position).
    /// Fails unless `order` is a permutation of `0..order.len()`.
    pub fn from_order(order: Vec<usize>) -> Result<Self> {
        let column_count = order.len();
        let mut physical_to_visual = vec![usize::MAX; column_count];

        for (visual, &physical) in order.iter().enumerate() {
            if physical >= column_count {
                return Err(FreezeError::InvalidOrder(format!(
                    "physical index {} at position {} exceeds column count {}",
                    physical, visual, column_count
                )));
            }
            if physical_to_visual[physical] != usize::MAX {
                return Err(FreezeError::InvalidOrder(format!(
                    "physical index {} appears more than once",
                    physical
                )));
            }
            physical_to_visual[physical] = visual;
        }

        Ok(Self {
            visual_to_physical: order,
            physical_to_visual,
        })
    }

    /// Number of columns in the map
    pub fn column_count(&self) -> usize {
        self.visual_to_physical.len()
    }

    /// Physical index shown at a visual position
    pub fn to_physical(&self, visual: usize) -> Option<usize> {
        self.visual_to_physical.get(visual).copied()
    }

    /// Visual position of a physical column
    pub fn to_visual(&self, physical: usize) -> Option<usize> {
        self.physical_to_visual.get(physical).copied()
    }

    /// Physical indices in left-to-right display order
    pub fn visual_order(&self) -> &[usize] {
        &self.visual_to_physical
    }

    /// Check that `column` is a valid visual position
    pub fn check_position(&self, column: usize) -> Result<()> {
        if column >= self.column_count() {
            return Err(FreezeError::InvalidColumn {
                column,
                column_count: self.column_count(),
            });
        }
        Ok(())
    }

    /// Move the column at visual position `from` to visual position `to`.
    ///
    /// Columns strictly between the two positions shift one slot towards
    /// `from` to close the gap; everything outside `[min, max]` is untouched.
    /// Cost is proportional to the distance moved.
    pub fn move_column(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_position(from)?;
        self.check_position(to)?;

        if from == to {
            trace!(target: "column_order", "move_column: {} -> {} is a no-op", from, to);
            return Ok(());
        }

        let physical = self.visual_to_physical[from];
        let (lo, hi) = if from < to { (from, to) } else { (to, from) };

        if from < to {
            self.visual_to_physical[lo..=hi].rotate_left(1);
        } else {
            self.visual_to_physical[lo..=hi].rotate_right(1);
        }

        // Only positions inside the rotated range changed owner
        for visual in lo..=hi {
            let p = self.visual_to_physical[visual];
            self.physical_to_visual[p] = visual;
        }

        debug!(target: "column_order",
               "Moved physical column {} from visual {} to {} (range {}..={} reindexed)",
               physical, from, to, lo, hi);

        Ok(())
    }

    /// True if both directions agree and cover every column exactly once
    pub fn is_consistent(&self) -> bool {
        let n = self.column_count();
        if self.physical_to_visual.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for (visual, &physical) in self.visual_to_physical.iter().enumerate() {
            if physical >= n || seen[physical] || self.physical_to_visual[physical] != visual {
                return false;
            }
            seen[physical] = true;
        }
        true
    }
}
