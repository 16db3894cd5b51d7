use serde::{Deserialize, Serialize};

use super::model::RatingError;

/// Cosmetic competitive bands, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Nova,
    Comet,
    Pulsar,
    Quasar,
    Celestia,
}

impl Tier {
    pub fn as_str(&self) -> &str {
        match self {
            Tier::Nova => "nova",
            Tier::Comet => "comet",
            Tier::Pulsar => "pulsar",
            Tier::Quasar => "quasar",
            Tier::Celestia => "celestia",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "nova" => Some(Tier::Nova),
            "comet" => Some(Tier::Comet),
            "pulsar" => Some(Tier::Pulsar),
            "quasar" => Some(Tier::Quasar),
            "celestia" => Some(Tier::Celestia),
            _ => None,
        }
    }
}

/// Ordered (lower bound, tier) bands partitioning the rating axis. Any
/// rating below the lowest bound classifies as the lowest tier.
#[derive(Debug, Clone)]
pub struct TierTable {
    bands: Vec<(i32, Tier)>,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            bands: vec![
                (0, Tier::Nova),
                (1000, Tier::Comet),
                (1200, Tier::Pulsar),
                (1500, Tier::Quasar),
                (1800, Tier::Celestia),
            ],
        }
    }
}

impl TierTable {
    pub fn new(bands: Vec<(i32, Tier)>) -> Result<Self, RatingError> {
        if bands.is_empty() {
            return Err(RatingError::InvalidTierTable("no bands defined".to_string()));
        }
        for window in bands.windows(2) {
            if window[0].0 >= window[1].0 {
                return Err(RatingError::InvalidTierTable(format!(
                    "bounds not strictly ascending at {}",
                    window[1].0
                )));
            }
        }
        Ok(Self { bands })
    }

    /// Total over all integers: the highest band whose lower bound does not
    /// exceed the rating wins.
    pub fn classify(&self, rating: i32) -> Tier {
        self.bands
            .iter()
            .rev()
            .find(|(bound, _)| *bound <= rating)
            .map(|(_, tier)| *tier)
            .unwrap_or(self.bands[0].1)
    }

    pub fn bands(&self) -> &[(i32, Tier)] {
        &self.bands
    }
}
