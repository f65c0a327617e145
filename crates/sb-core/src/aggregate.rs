//! Merging of entries that book the same work.

use std::collections::HashMap;

use crate::entry::Entry;

/// Merges entries sharing `(package, comment)` by summing their durations.
///
/// The first occurrence of each key survives and output follows first-seen
/// order. Merged entries no longer map to one source line, so `raw` is
/// cleared on every returned entry.
pub fn aggregate(entries: Vec<Entry>) -> Vec<Entry> {
    let mut merged: Vec<Entry> = Vec::with_capacity(entries.len());
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for entry in entries {
        let key = (entry.package.clone(), entry.comment.clone());
        if let Some(&slot) = index.get(&key) {
            merged[slot].duration += entry.duration;
            continue;
        }

        index.insert(key, merged.len());
        merged.push(Entry { raw: None, ..entry });
    }

    merged
}
