use super::backend::Backend;
use crate::models::employee::Location;

/// Picks the store that is authoritative for reads.
///
/// The ephemeral store wins whenever it exists, since a degraded write may have
/// left newer data there than in the persistent one.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadPolicy;

impl ReadPolicy {
    pub fn locate(&self, persistent: &dyn Backend, ephemeral: &dyn Backend) -> Option<Location> {
        if ephemeral.exists() {
            Some(Location::Ephemeral)
        } else if persistent.exists() {
            Some(Location::Persistent)
        } else {
            None
        }
    }
}
