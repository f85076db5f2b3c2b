//! Action catalog oracle.

use crate::action::ActionDef;

/// Oracle providing the action catalog.
///
/// The decision engine walks the catalog in the order returned here; that
/// order is part of the tie-breaking contract.
pub trait ActionOracle: Send + Sync {
    fn actions(&self) -> &[ActionDef];

    fn action(&self, name: &str) -> Option<&ActionDef> {
        self.actions().iter().find(|a| a.name.eq_ignore_ascii_case(name))
    }
}

impl ActionOracle for Vec<ActionDef> {
    fn actions(&self) -> &[ActionDef] {
        self
    }
}

impl ActionOracle for [ActionDef] {
    fn actions(&self) -> &[ActionDef] {
        self
    }
}
