//! Aggregate like-count resolver.
//!
//! A menu page shows counts for every item at once. Instead of one count
//! query per item, [`LikeTotals`] reads the entire `likes` collection in a
//! single scan and tallies per item client-side, trading a larger read for
//! fewer round trips.
//!
//! This is a snapshot, not a subscription: counts reflect the collection at
//! refresh time and are recomputed fully on each menu load. The scan is
//! O(total likes) per refresh, which is a known ceiling; a store-side
//! aggregation could replace it without changing this interface.

use crate::models::{MenuItem, LIKES};
use std::collections::HashMap;
use tavola_store::DocumentStore;

/// Derived per-item like counts for a menu view.
///
/// Every item id passed to the latest successful [`refresh`](Self::refresh)
/// is present in the map; items with no likes map to 0.
#[derive(Debug, Default)]
pub struct LikeTotals {
    counts: HashMap<u32, u64>,
}

impl LikeTotals {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute counts for `item_ids` from one unfiltered scan of the
    /// `likes` collection.
    ///
    /// Best-effort enrichment: on a read failure the previously resolved
    /// counts are left untouched and the condition is only logged. The
    /// menu renders without counts rather than failing.
    pub async fn refresh<S: DocumentStore>(&mut self, store: &S, item_ids: &[u32]) {
        let docs = match store.query(LIKES, None).await {
            Ok(docs) => docs,
            Err(e) => {
                tracing::warn!(error = %e, "aggregate like scan failed, keeping prior counts");
                return;
            }
        };

        let mut counts: HashMap<u32, u64> = item_ids.iter().map(|id| (*id, 0)).collect();
        for doc in &docs {
            if let Some(item_id) = doc.u64_field("item_id") {
                if let Some(count) = counts.get_mut(&(item_id as u32)) {
                    *count += 1;
                }
            }
        }
        self.counts = counts;
    }

    /// The count for one item; 0 when unknown.
    pub fn count(&self, item_id: u32) -> u64 {
        self.counts.get(&item_id).copied().unwrap_or(0)
    }

    /// The full count map.
    pub fn as_map(&self) -> &HashMap<u32, u64> {
        &self.counts
    }

    /// Annotate menu items with their resolved counts.
    pub fn apply_to(&self, items: &mut [MenuItem]) {
        for item in items {
            item.like_count = self.count(item.id);
        }
    }
}
