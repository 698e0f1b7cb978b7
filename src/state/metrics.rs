//! Summary metrics over the filtered route set.
//!
//! Every function here is pure: it reads only its arguments.

use std::collections::{HashMap, HashSet};

use crate::data::{Dataset, HaulBucket, HaulCategory, RankedEntity, Route};

/// Default number of signature routes.
pub const SIGNATURE_ROUTE_COUNT: usize = 4;
/// Default number of ranked entities shown.
pub const TOP_ENTITY_COUNT: usize = 10;

/// Share of the long-haul bucket in the haul breakdown, as a percentage.
///
/// The first bucket whose label contains "long" (any case) is used. A zero
/// total is treated as 1 so the result stays finite.
pub fn long_haul_share(haul: &[HaulBucket]) -> f64 {
    let long = haul
        .iter()
        .find(|bucket| bucket.category() == HaulCategory::Long)
        .map_or(0, |bucket| bucket.count);
    let total: u64 = haul.iter().map(|bucket| bucket.count).sum();
    let total = if total == 0 { 1 } else { total };
    long as f64 / total as f64 * 100.0
}

/// Mean route distance in km; 0 for an empty set.
pub fn average_distance(routes: &[Route]) -> f64 {
    if routes.is_empty() {
        return 0.0;
    }
    routes.iter().map(|r| r.distance_km).sum::<f64>() / routes.len() as f64
}

/// The `n` longest routes. Equal distances keep their input order.
pub fn signature_routes(routes: &[Route], n: usize) -> Vec<Route> {
    let mut sorted: Vec<&Route> = routes.iter().collect();
    // sort_by is stable
    sorted.sort_by(|a, b| b.distance_km.total_cmp(&a.distance_km));
    sorted.into_iter().take(n).cloned().collect()
}

/// First `n` entries of an already ranked list.
pub fn top_entities(data: &[RankedEntity], n: usize) -> Vec<RankedEntity> {
    data.iter().take(n).cloned().collect()
}

/// Airport with the most route endpoints. Ties go to the airport seen first.
pub fn top_hub(routes: &[Route]) -> Option<RankedEntity> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for route in routes {
        for id in [route.origin.as_str(), route.destination.as_str()] {
            let count = counts.entry(id).or_insert_with(|| {
                order.push(id);
                0
            });
            *count += 1;
        }
    }

    let mut best: Option<(&str, u64)> = None;
    for id in order {
        let count = counts[id];
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((id, count));
        }
    }
    best.map(|(id, count)| RankedEntity {
        key: id.to_string(),
        count,
    })
}

/// Distinct destinations per distinct origin; 0 for an empty set.
pub fn average_destinations_per_airport(routes: &[Route]) -> f64 {
    let pairs: HashSet<(&str, &str)> = routes
        .iter()
        .map(|r| (r.origin.as_str(), r.destination.as_str()))
        .collect();
    let origins: HashSet<&str> = routes.iter().map(|r| r.origin.as_str()).collect();
    if origins.is_empty() {
        return 0.0;
    }
    pairs.len() as f64 / origins.len() as f64
}

/// Percentage of routes whose endpoints are both known and in the same
/// country; routes with an unknown endpoint are left out of the total.
pub fn domestic_share(routes: &[Route], dataset: &Dataset) -> f64 {
    let mut known = 0usize;
    let mut domestic = 0usize;
    for route in routes {
        if let (Some(a), Some(b)) = (dataset.airport(&route.origin), dataset.airport(&route.destination)) {
            known += 1;
            if !a.country.is_empty() && a.country == b.country {
                domestic += 1;
            }
        }
    }
    if known == 0 {
        0.0
    } else {
        domestic as f64 / known as f64 * 100.0
    }
}

/// Derived, read-only summary of a filtered route set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub route_count: usize,
    pub airport_count: usize,
    pub airline_count: usize,
    pub country_count: usize,
    pub long_haul_share: f64,
    pub average_distance_km: f64,
    pub average_destinations_per_airport: f64,
    pub domestic_share: f64,
    pub signature_routes: Vec<Route>,
    pub top_entities: Vec<RankedEntity>,
    pub top_hub: Option<RankedEntity>,
}

impl MetricsSnapshot {
    /// Computes every metric for `routes`, a filtered subset of `dataset`.
    pub fn compute(
        routes: &[Route],
        dataset: &Dataset,
        signature_count: usize,
        top_count: usize,
    ) -> Self {
        let airports = super::filter::filter_airports(routes);
        let airlines: HashSet<&str> = routes
            .iter()
            .map(|r| r.airline.as_str())
            .filter(|a| !a.is_empty())
            .collect();
        let countries: HashSet<&str> = airports
            .iter()
            .filter_map(|id| dataset.airport(id))
            .map(|a| a.country.as_str())
            .filter(|c| !c.is_empty())
            .collect();

        Self {
            route_count: routes.len(),
            airport_count: airports.len(),
            airline_count: airlines.len(),
            country_count: countries.len(),
            long_haul_share: long_haul_share(&dataset.haul_distribution),
            average_distance_km: average_distance(routes),
            average_destinations_per_airport: average_destinations_per_airport(routes),
            domestic_share: domestic_share(routes, dataset),
            signature_routes: signature_routes(routes, signature_count),
            top_entities: top_entities(&dataset.top_entities, top_count),
            top_hub: top_hub(routes),
        }
    }

    /// Longest route in the set, if any.
    pub fn longest_route(&self) -> Option<&Route> {
        self.signature_routes.first()
    }
}
