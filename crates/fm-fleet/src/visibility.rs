//! How much of a fleet an observer may see.

use fm_core::EmpireId;
use fm_galaxy::Knowledge;

use crate::Fleet;

/// Name shown for fleets the observer does not own.
pub const FOREIGN_FLEET_NAME: &str = "Foreign fleet";

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    None,
    Partial,
    Full,
}

/// Visibility of `fleet` to `observer`.
///
/// Owners and the omniscient observer see everything.  Anyone else sees the
/// fleet partially when its current, next, or previous system is visible to
/// them.
pub fn fleet_visibility(
    fleet:     &Fleet,
    observer:  Option<EmpireId>,
    knowledge: &Knowledge,
) -> Visibility {
    let Some(empire) = observer else {
        return Visibility::Full;
    };
    if fleet.is_owned_by(empire) {
        return Visibility::Full;
    }
    let seen = [fleet.system, fleet.next_system, fleet.prev_system]
        .into_iter()
        .flatten()
        .any(|s| knowledge.is_visible(s, observer));
    if seen { Visibility::Partial } else { Visibility::None }
}
