//! Fixed-category firepower values and their aggregation

use serde::{Deserialize, Serialize};

/// Firepower by category. The category set is closed; missing fields
/// in serialized input default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Firepower {
    #[serde(default)]
    pub infantry: f64,
    #[serde(default)]
    pub armor: f64,
    #[serde(default)]
    pub artillery: f64,
    #[serde(default)]
    pub air: f64,
}

impl Firepower {
    pub fn new(infantry: f64, armor: f64, artillery: f64, air: f64) -> Self {
        Self {
            infantry,
            armor,
            artillery,
            air,
        }
    }

    pub fn total(&self) -> f64 {
        self.infantry + self.armor + self.artillery + self.air
    }

    /// Sum the firepower of a set of members. Recomputed in full on
    /// every membership change rather than updated incrementally, so
    /// the aggregate can never drift from its inputs.
    pub fn aggregate<'a, I>(members: I) -> Firepower
    where
        I: IntoIterator<Item = &'a Firepower>,
    {
        members.into_iter().fold(Firepower::default(), |acc, fp| {
            Firepower {
                infantry: acc.infantry + fp.infantry,
                armor: acc.armor + fp.armor,
                artillery: acc.artillery + fp.artillery,
                air: acc.air + fp.air,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_empty_is_zero() {
        let joint = Firepower::aggregate([]);
        assert_eq!(joint, Firepower::default());
        assert_eq!(joint.total(), 0.0);
    }

    #[test]
    fn aggregate_sums_categories() {
        let a = Firepower::new(10.0, 20.0, 0.0, 5.0);
        let b = Firepower::new(1.0, 2.0, 3.0, 4.0);
        let joint = Firepower::aggregate([&a, &b]);
        assert_eq!(joint.infantry, 11.0);
        assert_eq!(joint.armor, 22.0);
        assert_eq!(joint.artillery, 3.0);
        assert_eq!(joint.air, 9.0);
        assert_eq!(joint.total(), 45.0);
    }

    #[test]
    fn missing_fields_deserialize_to_zero() {
        let fp: Firepower = serde_json::from_str(r#"{"armor": 12.5}"#).unwrap();
        assert_eq!(fp.armor, 12.5);
        assert_eq!(fp.infantry, 0.0);
        assert_eq!(fp.total(), 12.5);
    }
}
