//! Route filtering by continent and airline.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::data::{Airport, Dataset, Route};

/// A filter dimension: either unrestricted or pinned to one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selector {
    #[default]
    Any,
    Only(String),
}

impl Selector {
    /// Exact, case-sensitive match. `Any` matches everything.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selector::Any => true,
            Selector::Only(expected) => expected == value,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Selector::Any)
    }

    pub fn label(&self) -> &str {
        match self {
            Selector::Any => "All",
            Selector::Only(value) => value,
        }
    }
}

/// Active filter criteria. The default (both `Any`) keeps every route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterCriteria {
    pub continent: Selector,
    pub airline: Selector,
}

impl FilterCriteria {
    pub fn is_identity(&self) -> bool {
        self.continent.is_any() && self.airline.is_any()
    }
}

/// Continent of an endpoint. Unknown airports never match a pinned continent.
fn endpoint_continent<'a>(airports: &'a BTreeMap<String, Airport>, id: &str) -> Option<&'a str> {
    airports.get(id).and_then(|a| a.continent.as_deref())
}

/// Returns true if `route` passes `criteria`.
pub fn route_matches(
    route: &Route,
    airports: &BTreeMap<String, Airport>,
    criteria: &FilterCriteria,
) -> bool {
    let continent_ok = match &criteria.continent {
        Selector::Any => true,
        Selector::Only(continent) => [&route.origin, &route.destination]
            .into_iter()
            .any(|id| endpoint_continent(airports, id) == Some(continent.as_str())),
    };

    continent_ok && criteria.airline.matches(&route.airline)
}

/// Routes passing `criteria`, in input order.
pub fn filter_routes(
    routes: &[Route],
    airports: &BTreeMap<String, Airport>,
    criteria: &FilterCriteria,
) -> Vec<Route> {
    routes
        .iter()
        .filter(|route| route_matches(route, airports, criteria))
        .cloned()
        .collect()
}

/// Identifiers appearing as an endpoint of at least one route, in order of
/// first appearance.
pub fn filter_airports(routes: &[Route]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for route in routes {
        for id in [&route.origin, &route.destination] {
            if seen.insert(id.as_str()) {
                ids.push(id.clone());
            }
        }
    }
    ids
}

/// Distinct airport continent tags, sorted. Route-level tags are left out
/// because the filter only looks at endpoint airports.
pub fn available_continents(dataset: &Dataset) -> Vec<String> {
    dataset
        .airports
        .values()
        .filter_map(|a| a.continent.clone())
        .filter(|c| !c.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct airline codes, sorted.
pub fn available_airlines(dataset: &Dataset) -> Vec<String> {
    dataset
        .routes
        .iter()
        .map(|r| r.airline.clone())
        .filter(|a| !a.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Routes and endpoint airports left after filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredSet {
    pub routes: Vec<Route>,
    pub airports: Vec<String>,
}

impl FilteredSet {
    pub fn compute(dataset: &Dataset, criteria: &FilterCriteria) -> Self {
        let routes = filter_routes(&dataset.routes, &dataset.airports, criteria);
        let airports = filter_airports(&routes);
        log::debug!(
            "Filter {:?}/{:?}: {} of {} routes, {} airports",
            criteria.continent,
            criteria.airline,
            routes.len(),
            dataset.routes.len(),
            airports.len()
        );
        Self { routes, airports }
    }

    pub fn contains_airport(&self, id: &str) -> bool {
        self.airports.iter().any(|a| a == id)
    }
}
