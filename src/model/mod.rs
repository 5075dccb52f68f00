//! In-memory data model for merged statistics.
//!
//! - [`Measure`]: one indicator as an ordered year → value series
//! - [`Area`]: an authority code with localized names and its measures
//! - [`AreaStore`]: every ingested area, keyed by lowercase authority code
//!
//! All three share the same merge policy: whole-field overwrite for identity/labels and a
//! per-key upsert (last writer wins) for keyed collections. Repeated ingestion of overlapping
//! data therefore never drops keys that only the existing value has.

pub mod area;
pub mod measure;
pub mod store;

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

pub use area::Area;
pub use measure::Measure;
pub use store::AreaStore;

/// Insert `value` under `key`, or fold it into the existing entry with `combine`.
pub(crate) fn upsert_by_key<K, V, F>(map: &mut BTreeMap<K, V>, key: K, value: V, combine: F)
where
    K: Ord,
    F: FnOnce(&mut V, V),
{
    match map.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(value);
        }
        Entry::Occupied(mut slot) => combine(slot.get_mut(), value),
    }
}
