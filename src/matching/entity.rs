use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
}

/// Shared capability set of a match row, whichever role produced it.
/// Both subsystems (carrier search for brokers, load search for carriers)
/// work against this trait; entities are immutable after creation.
pub trait Matchable {
    fn id(&self) -> &str;
    fn lane(&self) -> &str;
    fn contact(&self) -> &ContactInfo;
    /// 0-100 heuristic fit between the criteria and this candidate.
    fn match_score(&self) -> u8;
    /// One-line display form for list rows and logs.
    fn summary(&self) -> String;
}

/// A carrier candidate returned by a broker-side search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierMatch {
    pub id: String,
    pub name: String,
    pub lane: String,
    pub equipment: String,
    pub rate_per_mile: f64,
    pub on_time_pct: u8,
    pub fleet_size: u32,
    pub match_score: u8,
    pub contact: ContactInfo,
}

impl Matchable for CarrierMatch {
    fn id(&self) -> &str {
        &self.id
    }

    fn lane(&self) -> &str {
        &self.lane
    }

    fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    fn match_score(&self) -> u8 {
        self.match_score
    }

    fn summary(&self) -> String {
        format!(
            "{} | {} | {} | ${:.2}/mi | {}% on-time | score {}",
            self.name, self.lane, self.equipment, self.rate_per_mile, self.on_time_pct, self.match_score
        )
    }
}

/// A load candidate returned by a carrier-side search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadMatch {
    pub id: String,
    pub lane: String,
    pub equipment: String,
    pub rate: u32,
    pub weight_lbs: u32,
    pub commodity: String,
    pub pickup_date: NaiveDate,
    pub broker: String,
    pub match_score: u8,
    pub contact: ContactInfo,
}

impl Matchable for LoadMatch {
    fn id(&self) -> &str {
        &self.id
    }

    fn lane(&self) -> &str {
        &self.lane
    }

    fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    fn match_score(&self) -> u8 {
        self.match_score
    }

    fn summary(&self) -> String {
        format!(
            "{} | {} | {} | ${} | {} lbs | {} | score {}",
            self.id, self.lane, self.equipment, self.rate, self.weight_lbs, self.commodity, self.match_score
        )
    }
}
