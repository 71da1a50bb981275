use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::data::column_order::ColumnOrderMap;
use crate::data::events::{FreezeEvent, FreezeSubscriber};
use crate::error::{FreezeError, Result};

/// Maximum number of freeze events kept for debugging
const MAX_EVENT_HISTORY: usize = 100;

/// Where an unfrozen column lands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnfreezePlacement {
    /// Leftmost unfrozen slot, directly right of the frozen block
    #[default]
    Boundary,
    /// The visual position the column was frozen from, when known.
    /// Columns frozen by configuration have no origin and use the boundary.
    Origin,
}

/// What a freeze/unfreeze call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreezeOutcome {
    /// A column crossed the boundary
    Moved {
        physical: usize,
        from: usize,
        to: usize,
        fixed_columns_left: usize,
    },
    /// Already in the requested state
    Unchanged,
}

impl FreezeOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, FreezeOutcome::Moved { .. })
    }
}

/// Serializable copy of the freeze state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeSnapshot {
    /// Physical indices in display order
    pub order: Vec<usize>,
    pub fixed_columns_left: usize,
}

/// Owns the column order map and the frozen-column count and moves single
/// columns across the boundary between them.
///
/// A column is frozen iff its visual position is `< fixed_columns_left`.
/// Both mutators validate before touching state; each performs exactly one
/// rotation of the order map plus one boundary update.
pub struct FreezeStateManager {
    order: ColumnOrderMap,
    fixed_columns_left: usize,
    placement: UnfreezePlacement,

    /// Visual position each column was frozen from, indexed by physical index
    origins: Vec<Option<usize>>,

    subscribers: Vec<Box<dyn FreezeSubscriber>>,
    event_history: VecDeque<FreezeEvent>,
}

impl FreezeStateManager {
    /// Create a manager over `column_count` columns in identity order with the
    /// first `fixed_columns_left` of them frozen
    pub fn new(column_count: usize, fixed_columns_left: usize) -> Result<Self> {
        Self::with_order(ColumnOrderMap::new(column_count), fixed_columns_left)
    }

    /// Create a manager over an existing order map
    pub fn with_order(order: ColumnOrderMap, fixed_columns_left: usize) -> Result<Self> {
        let column_count = order.column_count();
        if fixed_columns_left > column_count {
            return Err(FreezeError::InvalidBoundary {
                fixed: fixed_columns_left,
                column_count,
            });
        }

        info!(target: "freeze_state",
              "Freeze state created: {} columns, {} frozen", column_count, fixed_columns_left);

        Ok(Self {
            order,
            fixed_columns_left,
            placement: UnfreezePlacement::default(),
            origins: vec![None; column_count],
            subscribers: Vec::new(),
            event_history: VecDeque::new(),
        })
    }

    /// Restore a manager from a snapshot
    pub fn from_snapshot(snapshot: &FreezeSnapshot) -> Result<Self> {
        let order = ColumnOrderMap::from_order(snapshot.order.clone())?;
        Self::with_order(order, snapshot.fixed_columns_left)
    }

    pub fn with_placement(mut self, placement: UnfreezePlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn placement(&self) -> UnfreezePlacement {
        self.placement
    }

    /// Freeze the column at visual position `column`.
    ///
    /// The column becomes the rightmost frozen column; columns between the old
    /// boundary and `column` shift one slot right. Already-frozen columns
    /// (including every column of a fully frozen grid) are left alone.
    pub fn freeze_column(&mut self, column: usize) -> Result<FreezeOutcome> {
        if let Err(e) = self.order.check_position(column) {
            warn!(target: "freeze_state", "freeze_column rejected: {}", e);
            return Err(e);
        }

        if column < self.fixed_columns_left {
            trace!(target: "freeze_state",
                   "freeze_column({}): already frozen (fixed_columns_left={})",
                   column, self.fixed_columns_left);
            return Ok(FreezeOutcome::Unchanged);
        }

        let physical = self.order.visual_order()[column];
        let to = self.fixed_columns_left;

        self.order.move_column(column, to)?;
        self.fixed_columns_left += 1;
        self.origins[physical] = Some(column);

        debug!(target: "freeze_state",
               "Froze physical column {} (visual {} -> {}), fixed_columns_left={}",
               physical, column, to, self.fixed_columns_left);

        self.emit(FreezeEvent::ColumnFrozen {
            physical,
            from: column,
            to,
            fixed_columns_left: self.fixed_columns_left,
        });

        Ok(FreezeOutcome::Moved {
            physical,
            from: column,
            to,
            fixed_columns_left: self.fixed_columns_left,
        })
    }

    /// Unfreeze the column at visual position `column`.
    ///
    /// The boundary shrinks by one and the column becomes the first scrollable
    /// column (or returns to its origin under [`UnfreezePlacement::Origin`]).
    /// Unfrozen columns and a zero boundary are no-ops.
    pub fn unfreeze_column(&mut self, column: usize) -> Result<FreezeOutcome> {
        if let Err(e) = self.order.check_position(column) {
            warn!(target: "freeze_state", "unfreeze_column rejected: {}", e);
            return Err(e);
        }

        if column >= self.fixed_columns_left {
            trace!(target: "freeze_state",
                   "unfreeze_column({}): not frozen (fixed_columns_left={})",
                   column, self.fixed_columns_left);
            return Ok(FreezeOutcome::Unchanged);
        }

        let physical = self.order.visual_order()[column];
        let boundary = self.fixed_columns_left - 1;
        let origin = self.origins[physical].take();
        let to = match (self.placement, origin) {
            (UnfreezePlacement::Origin, Some(origin)) => {
                origin.clamp(boundary, self.order.column_count() - 1)
            }
            _ => boundary,
        };

        self.order.move_column(column, to)?;
        self.fixed_columns_left = boundary;

        debug!(target: "freeze_state",
               "Unfroze physical column {} (visual {} -> {}), fixed_columns_left={}",
               physical, column, to, self.fixed_columns_left);

        self.emit(FreezeEvent::ColumnUnfrozen {
            physical,
            from: column,
            to,
            fixed_columns_left: self.fixed_columns_left,
        });

        Ok(FreezeOutcome::Moved {
            physical,
            from: column,
            to,
            fixed_columns_left: self.fixed_columns_left,
        })
    }

    /// Count of frozen columns; also the visual position of the first unfrozen one
    pub fn fixed_columns_left(&self) -> usize {
        self.fixed_columns_left
    }

    pub fn column_count(&self) -> usize {
        self.order.column_count()
    }

    pub fn column_order(&self) -> &ColumnOrderMap {
        &self.order
    }

    /// Whether the column at visual position `column` is frozen
    pub fn is_frozen(&self, column: usize) -> bool {
        column < self.fixed_columns_left
    }

    /// Physical indices of the frozen columns, left to right
    pub fn frozen_physical_columns(&self) -> &[usize] {
        &self.order.visual_order()[..self.fixed_columns_left]
    }

    pub fn to_visual(&self, physical: usize) -> Option<usize> {
        self.order.to_visual(physical)
    }

    pub fn to_physical(&self, visual: usize) -> Option<usize> {
        self.order.to_physical(visual)
    }

    pub fn snapshot(&self) -> FreezeSnapshot {
        FreezeSnapshot {
            order: self.order.visual_order().to_vec(),
            fixed_columns_left: self.fixed_columns_left,
        }
    }

    /// Add a subscriber
    pub fn subscribe(&mut self, subscriber: Box<dyn FreezeSubscriber>) {
        info!(target: "freeze_state", "Adding freeze subscriber: {}", subscriber.name());
        self.subscribers.push(subscriber);
    }

    /// Recent events, oldest first
    pub fn event_history(&self) -> impl Iterator<Item = &FreezeEvent> {
        self.event_history.iter()
    }

    fn emit(&mut self, event: FreezeEvent) {
        self.event_history.push_back(event.clone());
        if self.event_history.len() > MAX_EVENT_HISTORY {
            self.event_history.pop_front();
        }

        for subscriber in &mut self.subscribers {
            trace!(target: "freeze_state", "Notifying {} of {:?}", subscriber.name(), event);
            subscriber.on_freeze_event(&event);
        }
    }
}

impl fmt::Debug for FreezeStateManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreezeStateManager")
            .field("order", &self.order.visual_order())
            .field("fixed_columns_left", &self.fixed_columns_left)
            .field("placement", &self.placement)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
