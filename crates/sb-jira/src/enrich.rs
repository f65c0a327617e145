//! Attaching ticket summaries to parsed days.

use std::collections::{BTreeSet, HashMap};

use futures::future::join_all;
use sb_core::Day;

use crate::Client;

/// Looks up ticket summaries for every entry of `days`.
///
/// Each distinct ticket is fetched once and all lookups run concurrently.
/// Returns once every lookup has finished. Entries whose ticket could not be
/// fetched keep `ticket_summary = None`.
pub async fn enrich_days(client: &Client, days: &mut [Day]) {
    let keys: BTreeSet<String> = days
        .iter()
        .flat_map(|day| &day.entries)
        .filter_map(|entry| client.ticket_key(&entry.comment))
        .collect();
    if keys.is_empty() {
        return;
    }

    tracing::debug!(tickets = keys.len(), "enriching entries with ticket summaries");
    let lookups = keys.iter().map(|key| async move {
        let summary = client.summary_for_key(key).await;
        (key.as_str(), summary)
    });
    let summaries: HashMap<&str, Option<String>> = join_all(lookups).await.into_iter().collect();

    for entry in days.iter_mut().flat_map(|day| &mut day.entries) {
        entry.ticket_summary = client
            .ticket_key(&entry.comment)
            .and_then(|key| summaries.get(key.as_str()).cloned().flatten());
    }
}
