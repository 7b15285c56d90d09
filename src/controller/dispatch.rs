use crate::controller::Unit;
use crate::shared::UnitSnapshot;

/// First unit in fixed index order that is idle or stopped, as a read-only
/// snapshot. Used for status queries; assignment goes through
/// `claim_eligible_unit` instead. No load balancing, first match wins.
pub fn find_eligible_unit(units: &[Unit]) -> Option<UnitSnapshot> {
    units.iter().find_map(Unit::idle_snapshot)
}

/// Same fixed-order scan, but the winning unit is reserved under its own
/// write lock before the scan returns, so two concurrent dispatchers can
/// never pick the same unit.
pub fn claim_eligible_unit(units: &[Unit]) -> Option<&Unit> {
    units.iter().find(|unit| unit.try_claim())
}
