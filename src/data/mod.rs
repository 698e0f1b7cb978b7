//! Route network dataset.
//!
//! ## Document shape
//! ```text
//! {
//!   "routes":            [ { origin, destination, distance_km, airline, continent? } ],
//!   "airports":          { "<IATA>": { name, city, country, continent?, longitude, latitude } },
//!   "haul_distribution": [ { label, count } ],
//!   "top_entities":      [ { key, count } ]   (already ranked)
//! }
//! ```
//!
//! The original dashboard export names (`routes_sample`, `iata_lookup`,
//! `top_airlines`, `src_iata`, `lon`, ...) are accepted as aliases. Every
//! collection defaults to empty when missing or `null`.

mod dataset;

pub use dataset::{
    Airport, Dataset, DatasetMeta, HaulBucket, HaulCategory, NamedValue, RankedEntity, Route,
};
