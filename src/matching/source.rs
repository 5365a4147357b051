use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{Duration as ChronoDuration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::matching::criteria::SearchCriteria;
use crate::matching::entity::{CarrierMatch, ContactInfo, LoadMatch, Matchable};

/// Where match candidates come from. The shipped implementations fabricate
/// results; a real backend integration implements this trait behind the
/// same session contract.
pub trait ResultSource {
    type Entity: Matchable;

    fn find_matches(&self, criteria: &SearchCriteria) -> Vec<Self::Entity>;
}

const CARRIER_NAMES: &[&str] = &[
    "Midwest Express Logistics",
    "Blue Ridge Freight",
    "Prairie Line Transport",
    "Ironwood Carriers",
    "Lakeshore Hauling Co",
    "Summit Peak Trucking",
    "Redline Interstate",
    "Harbor Gate Freight",
];

const BROKER_NAMES: &[&str] = &[
    "Apex Freight Partners",
    "Corridor Logistics Group",
    "Northstar Brokerage",
    "Keystone Load Services",
    "Meridian Shipping Co",
    "Gulfline Freight",
];

const COMMODITIES: &[&str] = &[
    "General Freight",
    "Paper Products",
    "Packaged Foods",
    "Auto Parts",
    "Building Materials",
    "Consumer Electronics",
];

/// Seed derived from the search lane and equipment, so identical criteria
/// always fabricate the identical match set.
fn seed_for(criteria: &SearchCriteria) -> u64 {
    let mut hasher = DefaultHasher::new();
    criteria.origin.hash(&mut hasher);
    criteria.destination.hash(&mut hasher);
    criteria.equipment_type.hash(&mut hasher);
    hasher.finish()
}

fn phone(rng: &mut StdRng) -> String {
    format!(
        "({}) 555-{:04}",
        rng.random_range(201..990),
        rng.random_range(0..10_000)
    )
}

fn score(rng: &mut StdRng) -> u8 {
    rng.random_range(62..=97)
}

/// Fabricates carrier candidates for a broker-side search.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockCarrierSource;

impl ResultSource for MockCarrierSource {
    type Entity = CarrierMatch;

    fn find_matches(&self, criteria: &SearchCriteria) -> Vec<CarrierMatch> {
        let mut rng = StdRng::seed_from_u64(seed_for(criteria));
        let count = rng.random_range(3..=6);
        let lane = criteria.lane();

        (0..count)
            .map(|i| {
                let name = CARRIER_NAMES[rng.random_range(0..CARRIER_NAMES.len())];
                CarrierMatch {
                    id: format!("CAR-{:05}", rng.random_range(0..100_000u32)),
                    name: format!("{name} #{}", i + 1),
                    lane: lane.clone(),
                    equipment: criteria.equipment_type.clone(),
                    rate_per_mile: rng.random_range(210..345) as f64 / 100.0,
                    on_time_pct: rng.random_range(85..=99),
                    fleet_size: rng.random_range(5..400),
                    match_score: score(&mut rng),
                    contact: ContactInfo {
                        phone: phone(&mut rng),
                        email: format!("dispatch{}@{}.example.com", i + 1, name_slug(name)),
                    },
                }
            })
            .collect()
    }
}

/// Fabricates load candidates for a carrier-side search.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockLoadSource;

impl ResultSource for MockLoadSource {
    type Entity = LoadMatch;

    fn find_matches(&self, criteria: &SearchCriteria) -> Vec<LoadMatch> {
        let mut rng = StdRng::seed_from_u64(seed_for(criteria));
        let count = rng.random_range(3..=6);
        let lane = criteria.lane();
        let base_rate = criteria.min_rate.unwrap_or(2_000);
        let pickup = criteria
            .pickup_date
            .unwrap_or_else(|| (Utc::now() + ChronoDuration::days(2)).date_naive());

        (0..count)
            .map(|_| {
                let broker = BROKER_NAMES[rng.random_range(0..BROKER_NAMES.len())];
                LoadMatch {
                    id: format!("LD-{:06}", rng.random_range(0..1_000_000u32)),
                    lane: lane.clone(),
                    equipment: criteria.equipment_type.clone(),
                    rate: base_rate + rng.random_range(0..800),
                    weight_lbs: criteria
                        .weight_lbs
                        .unwrap_or_else(|| rng.random_range(10_000..45_000)),
                    commodity: criteria
                        .commodity
                        .clone()
                        .unwrap_or_else(|| COMMODITIES[rng.random_range(0..COMMODITIES.len())].to_string()),
                    pickup_date: pickup,
                    broker: broker.to_string(),
                    match_score: score(&mut rng),
                    contact: ContactInfo {
                        phone: phone(&mut rng),
                        email: format!("loads@{}.example.com", name_slug(broker)),
                    },
                }
            })
            .collect()
    }
}

fn name_slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}
