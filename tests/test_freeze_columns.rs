// Test freeze/unfreeze behaviour of FreezeStateManager

use column_freeze::data::freeze_state::{FreezeStateManager, UnfreezePlacement};
use column_freeze::FreezeError;

const NAMES: [&str; 5] = ["A", "B", "C", "D", "E"];

fn names(manager: &FreezeStateManager) -> Vec<&'static str> {
    manager
        .column_order()
        .visual_order()
        .iter()
        .map(|&physical| NAMES[physical])
        .collect()
}

/// Checks every invariant of the freeze state
fn assert_invariants(manager: &FreezeStateManager) {
    let order = manager.column_order();
    assert!(order.is_consistent(), "order map is not a bijection");

    let mut sorted = order.visual_order().to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..manager.column_count()).collect::<Vec<_>>());

    assert!(manager.fixed_columns_left() <= manager.column_count());
    for visual in 0..manager.column_count() {
        assert_eq!(
            manager.is_frozen(visual),
            visual < manager.fixed_columns_left()
        );
    }
}

/// Small deterministic generator so failures reproduce
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound
    }
}

#[test]
fn test_unfreeze_first_frozen_column() {
    let mut manager = FreezeStateManager::new(5, 2).unwrap();

    manager.unfreeze_column(0).unwrap();

    assert_eq!(manager.fixed_columns_left(), 1);
    assert_eq!(names(&manager), vec!["B", "A", "C", "D", "E"]);
    assert_eq!(manager.to_visual(0), Some(1));
    assert_invariants(&manager);
}

#[test]
fn test_freeze_unfrozen_column() {
    let mut manager = FreezeStateManager::new(5, 2).unwrap();

    manager.freeze_column(3).unwrap();

    assert_eq!(manager.fixed_columns_left(), 3);
    assert_eq!(names(&manager), vec!["A", "B", "D", "C", "E"]);
    assert_invariants(&manager);
}

#[test]
fn test_unfreeze_last_frozen_column_keeps_position() {
    let mut manager = FreezeStateManager::new(5, 3).unwrap();

    let outcome = manager.unfreeze_column(2).unwrap();

    assert!(outcome.is_changed());
    assert_eq!(manager.fixed_columns_left(), 2);
    assert_eq!(names(&manager), vec!["A", "B", "C", "D", "E"]);
}

#[test]
fn test_unfreeze_middle_column_closes_gap() {
    let mut manager = FreezeStateManager::new(5, 4).unwrap();

    manager.unfreeze_column(1).unwrap();

    // C and D slide left, B lands right after the frozen block
    assert_eq!(manager.fixed_columns_left(), 3);
    assert_eq!(names(&manager), vec!["A", "C", "D", "B", "E"]);
    assert_eq!(manager.frozen_physical_columns(), &[0, 2, 3]);
}

#[test]
fn test_round_trip_at_boundary() {
    let mut manager = FreezeStateManager::new(5, 2).unwrap();
    let before = manager.snapshot();

    // Column 2 is the first unfrozen column; freezing leaves it in place
    manager.freeze_column(2).unwrap();
    manager.unfreeze_column(2).unwrap();

    assert_eq!(manager.snapshot(), before);
}

#[test]
fn test_round_trip_with_origin_placement() {
    for start_fixed in 0..5 {
        for column in start_fixed..5 {
            let mut manager = FreezeStateManager::new(5, start_fixed)
                .unwrap()
                .with_placement(UnfreezePlacement::Origin);
            let before = manager.snapshot();

            manager.freeze_column(column).unwrap();
            let new_position = manager.fixed_columns_left() - 1;
            manager.unfreeze_column(new_position).unwrap();

            assert_eq!(
                manager.snapshot(),
                before,
                "round trip failed for fixed={} column={}",
                start_fixed,
                column
            );
        }
    }
}

#[test]
fn test_idempotent_noops() {
    let mut manager = FreezeStateManager::new(5, 2).unwrap();
    let before = manager.snapshot();

    assert!(!manager.freeze_column(0).unwrap().is_changed());
    assert!(!manager.freeze_column(1).unwrap().is_changed());
    assert!(!manager.unfreeze_column(2).unwrap().is_changed());
    assert!(!manager.unfreeze_column(4).unwrap().is_changed());

    assert_eq!(manager.snapshot(), before);
}

#[test]
fn test_full_capacity_and_empty_boundary() {
    let mut full = FreezeStateManager::new(3, 3).unwrap();
    assert!(!full.freeze_column(2).unwrap().is_changed());
    assert_eq!(full.fixed_columns_left(), 3);

    let mut empty = FreezeStateManager::new(3, 0).unwrap();
    assert!(!empty.unfreeze_column(0).unwrap().is_changed());
    assert_eq!(empty.fixed_columns_left(), 0);
}

#[test]
fn test_single_column_grid() {
    let mut manager = FreezeStateManager::new(1, 0).unwrap();

    manager.freeze_column(0).unwrap();
    assert_eq!(manager.fixed_columns_left(), 1);

    manager.unfreeze_column(0).unwrap();
    assert_eq!(manager.fixed_columns_left(), 0);
    assert_eq!(manager.column_order().visual_order(), &[0]);
}

#[test]
fn test_invalid_column_reports_and_keeps_state() {
    let mut manager = FreezeStateManager::new(5, 2).unwrap();
    let before = manager.snapshot();

    let err = manager.unfreeze_column(5).unwrap_err();
    assert_eq!(
        err,
        FreezeError::InvalidColumn {
            column: 5,
            column_count: 5
        }
    );
    assert!(err.to_string().contains("out of bounds"));

    assert!(manager.freeze_column(usize::MAX).is_err());
    assert_eq!(manager.snapshot(), before);
}

/// Random freeze/unfreeze runs: after every call the invariants hold and all
/// columns other than the one moved keep their relative order
fn check_random_sequences(placement: UnfreezePlacement, seed: u64) {
    let mut rng = Lcg(seed);

    for _ in 0..50 {
        let count = 1 + rng.next(12);
        let mut manager = FreezeStateManager::new(count, rng.next(count + 1))
            .unwrap()
            .with_placement(placement);

        for _ in 0..40 {
            let column = rng.next(count);
            let before = manager.column_order().visual_order().to_vec();
            let moved = before[column];

            if rng.next(2) == 0 {
                manager.freeze_column(column).unwrap();
            } else {
                manager.unfreeze_column(column).unwrap();
            }
            assert_invariants(&manager);

            let others_before: Vec<usize> =
                before.iter().copied().filter(|&p| p != moved).collect();
            let others_after: Vec<usize> = manager
                .column_order()
                .visual_order()
                .iter()
                .copied()
                .filter(|&p| p != moved)
                .collect();
            assert_eq!(others_before, others_after, "{:?} seed={:#x}", placement, seed);
        }
    }
}

#[test]
fn test_unaffected_columns_keep_relative_order() {
    check_random_sequences(UnfreezePlacement::Boundary, 0x5eed);
}

#[test]
fn test_unaffected_columns_keep_relative_order_with_origin_placement() {
    check_random_sequences(UnfreezePlacement::Origin, 0x5eed);
    check_random_sequences(UnfreezePlacement::Origin, 0xc0ffee);
}

#[test]
fn test_origin_placement_with_shifted_origins() {
    let mut manager = FreezeStateManager::new(5, 2)
        .unwrap()
        .with_placement(UnfreezePlacement::Origin);

    manager.freeze_column(3).unwrap(); // D, remembered at 3
    assert_eq!(names(&manager), vec!["A", "B", "D", "C", "E"]);

    manager.freeze_column(4).unwrap(); // E, remembered at 4
    assert_eq!(names(&manager), vec!["A", "B", "D", "E", "C"]);
    assert_eq!(manager.fixed_columns_left(), 4);
    assert_invariants(&manager);

    // D was frozen first, so its origin no longer matches the original layout
    manager.unfreeze_column(2).unwrap();
    assert_eq!(names(&manager), vec!["A", "B", "E", "D", "C"]);
    assert_eq!(manager.fixed_columns_left(), 3);
    assert_invariants(&manager);

    manager.unfreeze_column(2).unwrap();
    assert_eq!(names(&manager), vec!["A", "B", "D", "C", "E"]);
    assert_eq!(manager.fixed_columns_left(), 2);
    assert_invariants(&manager);

    // Both origins were consumed; a second unfreeze pass has nothing to do
    assert!(!manager.unfreeze_column(2).unwrap().is_changed());
}

#[test]
fn test_freeze_sequence_builds_frozen_block_in_click_order() {
    let mut manager = FreezeStateManager::new(5, 0).unwrap();

    manager.freeze_column(4).unwrap(); // E
    assert_eq!(names(&manager), vec!["E", "A", "B", "C", "D"]);

    manager.freeze_column(2).unwrap(); // B
    assert_eq!(names(&manager), vec!["E", "B", "A", "C", "D"]);
    assert_eq!(manager.frozen_physical_columns(), &[4, 1]);
    assert_invariants(&manager);
}
