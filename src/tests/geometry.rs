use super::{ContainerStyle, Reconciler};
use proptest::prelude::*;

#[test]
fn test_taller_panel_pins_then_growth_clears() {
    let mut reconciler = Reconciler::new();

    assert_eq!(
        reconciler.reconcile(500, 300),
        Some(ContainerStyle::Pinned(500))
    );
    assert_eq!(reconciler.pinned(), Some(500));

    assert_eq!(reconciler.reconcile(500, 600), Some(ContainerStyle::Natural));
    assert_eq!(reconciler.pinned(), None);
}

#[test]
fn test_equal_heights_leave_natural_flow() {
    let mut reconciler = Reconciler::new();

    assert_eq!(reconciler.reconcile(400, 400), None);
    assert_eq!(reconciler.pinned(), None);
}

#[test]
fn test_panel_change_repins() {
    let mut reconciler = Reconciler::new();
    reconciler.reconcile(500, 300);

    assert_eq!(
        reconciler.reconcile(450, 300),
        Some(ContainerStyle::Pinned(450))
    );
}

proptest! {
    #[test]
    fn second_reconcile_mutates_nothing(panel in 0u32..5_000, content in 0u32..5_000) {
        let mut reconciler = Reconciler::new();
        reconciler.reconcile(panel, content);
        prop_assert_eq!(reconciler.reconcile(panel, content), None);
    }
}
