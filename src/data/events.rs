//! Freeze events and subscribers

use serde::Serialize;

/// Events emitted by the freeze state manager after a column crossed the
/// frozen/unfrozen boundary. No-op calls emit nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FreezeEvent {
    /// Column moved into the frozen block
    ColumnFrozen {
        physical: usize,
        from: usize,
        to: usize,
        fixed_columns_left: usize,
    },

    /// Column moved out of the frozen block
    ColumnUnfrozen {
        physical: usize,
        from: usize,
        to: usize,
        fixed_columns_left: usize,
    },
}

impl FreezeEvent {
    /// Physical index of the column that moved
    pub fn physical(&self) -> usize {
        match self {
            FreezeEvent::ColumnFrozen { physical, .. }
            | FreezeEvent::ColumnUnfrozen { physical, .. } => *physical,
        }
    }
}

/// Trait for components that want to hear about freeze changes
///
/// Subscribers are notified synchronously from inside `freeze_column` /
/// `unfreeze_column`, while the manager is still mutably borrowed. A subscriber
/// must not reach back into the manager (through a shared `Rc<RefCell<_>>`
/// handle or a `Grid`); doing so panics on the `RefCell` borrow. Everything a
/// subscriber needs about the change, including the new boundary, is carried
/// on the event itself.
pub trait FreezeSubscriber {
    /// Handle a freeze event
    fn on_freeze_event(&mut self, event: &FreezeEvent);

    /// Get subscriber name for debugging
    fn name(&self) -> &str;
}
