use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset};
use farelight_core::{FlightQuery, FlightRecord, SortKey, SortOrder};
use serde::{Deserialize, Serialize};

use crate::render;

/// Limits applied on top of caller-supplied queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Result count when the query leaves `limit` unset.
    pub default_limit: usize,
    /// Server-side ceiling on `limit`. Requests above it are clamped.
    pub max_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 50,
        }
    }
}

/// Evaluates structured queries against an immutable flight collection.
///
/// The engine owns no data: the record slice is an explicit input on every
/// call, so the same instance serves any snapshot and tests run on synthetic
/// fixtures. Evaluation is a pure function of its arguments.
#[derive(Debug, Clone)]
pub struct FlightQueryEngine {
    config: EngineConfig,
}

impl FlightQueryEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Full tool contract: filter, rank, cap, and render the summary text.
    pub fn search(&self, records: &[FlightRecord], query: &FlightQuery) -> String {
        let matches = self.evaluate(records, query);
        render::render_results(&matches)
    }

    /// Filter, rank, and cap, returning references in final order.
    pub fn evaluate<'a>(
        &self,
        records: &'a [FlightRecord],
        query: &FlightQuery,
    ) -> Vec<&'a FlightRecord> {
        let mut matches: Vec<&FlightRecord> =
            records.iter().filter(|r| matches_query(r, query)).collect();

        // Stable sort: tied keys keep the order the filter produced.
        matches.sort_by(|a, b| {
            let ordering = compare_by_key(query.sort_by, a, b);
            match query.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        matches.truncate(self.effective_limit(query.limit));
        matches
    }

    fn effective_limit(&self, requested: Option<usize>) -> usize {
        let limit = requested.unwrap_or(self.config.default_limit).max(1);
        if limit > self.config.max_limit {
            tracing::debug!(
                requested = limit,
                max = self.config.max_limit,
                "clamping result limit"
            );
            return self.config.max_limit;
        }
        limit
    }
}

/// Conjunction of all supplied predicates; absent criteria impose nothing.
fn matches_query(record: &FlightRecord, query: &FlightQuery) -> bool {
    if let Some(max_price) = query.max_price {
        if record.price.total > max_price {
            return false;
        }
    }
    if let Some(min_price) = query.min_price {
        if record.price.total < min_price {
            return false;
        }
    }
    if let Some(airline) = &query.airline {
        if !contains_ci(&record.airline, airline) {
            return false;
        }
    }
    if let Some(max_stops) = query.max_stops {
        if record.stops > max_stops {
            return false;
        }
    }
    if let Some(max_duration) = query.max_duration {
        if record.duration > max_duration {
            return false;
        }
    }
    if let Some(needle) = &query.departure_city {
        if !contains_ci(&record.departure.city, needle)
            && !contains_ci(&record.departure.airport_code, needle)
        {
            return false;
        }
    }
    if let Some(needle) = &query.arrival_city {
        if !contains_ci(&record.arrival.city, needle)
            && !contains_ci(&record.arrival.airport_code, needle)
        {
            return false;
        }
    }
    true
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// One typed accessor per sort key keeps the comparator exhaustive over the
/// enum: a new key without an arm is a compile error.
fn compare_by_key(key: SortKey, a: &FlightRecord, b: &FlightRecord) -> Ordering {
    match key {
        SortKey::Price => a
            .price
            .total
            .partial_cmp(&b.price.total)
            .unwrap_or(Ordering::Equal),
        SortKey::Duration => a.duration.cmp(&b.duration),
        SortKey::DepartureTime => compare_instants(a.departure_instant(), b.departure_instant()),
        SortKey::ArrivalTime => compare_instants(a.arrival_instant(), b.arrival_instant()),
    }
}

/// Unparseable stamps order after every parseable one; one malformed record
/// must not deny results for the rest.
fn compare_instants(a: Option<DateTime<FixedOffset>>, b: Option<DateTime<FixedOffset>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
