use std::collections::HashMap;

use indexmap::IndexMap;
use model::vehicle::VehicleUpdate;
use serde::{Deserialize, Serialize};

use crate::signature::Signature;

/// The remembered signature of every vehicle seen in the latest batch,
/// keyed by vehicle id. Replaced wholesale on every reconciliation cycle;
/// vehicles absent from a batch simply drop out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    signatures: HashMap<String, Signature>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, vehicle_id: &str) -> Option<&Signature> {
        self.signatures.get(vehicle_id)
    }

    pub fn insert(&mut self, vehicle_id: String, signature: Signature) {
        self.signatures.insert(vehicle_id, signature);
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Signature)> {
        self.signatures.iter()
    }
}

/// Result of one reconciliation cycle. The caller replaces its stored
/// snapshot with `next` whether or not anything changed.
#[derive(Debug)]
pub struct Reconciliation {
    pub changed: bool,
    pub next: Snapshot,
}

/// Compares the latest batch of updates against the previous snapshot.
///
/// Updates without a signature contribute nothing and can not trigger a
/// change. When a vehicle id appears more than once, the later update wins
/// and the change is judged against the winning signature only. `changed`
/// is set when a vehicle is new or moved; a vehicle disappearing from the
/// feed does not count as a change on its own.
pub fn reconcile(updates: &[VehicleUpdate], previous: &Snapshot) -> Reconciliation {
    let mut latest: IndexMap<&str, (Signature, &VehicleUpdate)> = IndexMap::new();
    for update in updates {
        if let Some(signature) = Signature::of(update) {
            latest.insert(update.vehicle_id(), (signature, update));
        }
    }

    let mut changed = false;
    let mut next = Snapshot::new();
    for (vehicle_id, (signature, update)) in latest {
        if previous.get(vehicle_id) != Some(&signature) {
            changed = true;
            log::debug!(
                "vehicle {} moved to {}",
                update.trip_id().unwrap_or(vehicle_id),
                signature
            );
        }
        next.insert(vehicle_id.to_owned(), signature);
    }

    Reconciliation { changed, next }
}
