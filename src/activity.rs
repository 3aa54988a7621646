use serde::{Deserialize, Serialize};

use crate::serde::sanitize;
use crate::{Category, Scope};

/// A single measurable activity of a company with its own emission factor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Electricity,
    Gas,
    Heating,
    Fleet,
    PublicTransport,
    BusinessTravel,
    GeneralWaste,
    Recycling,
    Water,
    Paper,
    Plastic,
    Metal,
}

impl ActivityType {
    pub const ALL: [ActivityType; 12] = [
        ActivityType::Electricity,
        ActivityType::Gas,
        ActivityType::Heating,
        ActivityType::Fleet,
        ActivityType::PublicTransport,
        ActivityType::BusinessTravel,
        ActivityType::GeneralWaste,
        ActivityType::Recycling,
        ActivityType::Water,
        ActivityType::Paper,
        ActivityType::Plastic,
        ActivityType::Metal,
    ];

    pub fn category(&self) -> Category {
        match self {
            Self::Electricity | Self::Gas | Self::Heating => Category::Energy,
            Self::Fleet | Self::PublicTransport | Self::BusinessTravel => Category::Transport,
            Self::GeneralWaste | Self::Recycling => Category::Waste,
            Self::Water => Category::Water,
            Self::Paper | Self::Plastic | Self::Metal => Category::Materials,
        }
    }

    /// The GHG-protocol scope the activity is reported under
    pub fn scope(&self) -> Scope {
        match self {
            Self::Gas | Self::Fleet => Scope::Scope1,
            Self::Electricity | Self::Heating => Scope::Scope2,
            _ => Scope::Scope3,
        }
    }

    /// The unit in which the activity is measured
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Electricity | Self::Heating => "kWh",
            Self::Gas | Self::Water => "m3",
            Self::Fleet | Self::PublicTransport | Self::BusinessTravel => "km",
            Self::GeneralWaste | Self::Recycling | Self::Paper | Self::Plastic | Self::Metal => {
                "kg"
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EnergyInput {
    #[serde(deserialize_with = "crate::serde::quantity")]
    pub electricity_kwh: f64,
    #[serde(deserialize_with = "crate::serde::quantity")]
    pub gas_m3: f64,
    /// District heating
    #[serde(deserialize_with = "crate::serde::quantity")]
    pub heating_kwh: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TransportInput {
    /// Kilometers driven by company vehicles
    #[serde(deserialize_with = "crate::serde::quantity")]
    pub fleet_km: f64,
    #[serde(deserialize_with = "crate::serde::quantity")]
    pub public_transport_km: f64,
    /// Kilometers flown for business
    #[serde(deserialize_with = "crate::serde::quantity")]
    pub business_travel_km: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct WasteInput {
    #[serde(deserialize_with = "crate::serde::quantity")]
    pub general_kg: f64,
    #[serde(deserialize_with = "crate::serde::quantity")]
    pub recycling_kg: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MaterialsInput {
    #[serde(deserialize_with = "crate::serde::quantity")]
    pub paper_kg: f64,
    #[serde(deserialize_with = "crate::serde::quantity")]
    pub plastic_kg: f64,
    #[serde(deserialize_with = "crate::serde::quantity")]
    pub metal_kg: f64,
}

/// Yearly activity of a company, grouped as entered in the form.
/// Every quantity is optional and defaults to zero.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ActivityInput {
    #[serde(deserialize_with = "crate::serde::group")]
    pub energy: EnergyInput,
    #[serde(deserialize_with = "crate::serde::group")]
    pub transport: TransportInput,
    #[serde(deserialize_with = "crate::serde::group")]
    pub waste: WasteInput,
    #[serde(deserialize_with = "crate::serde::quantity")]
    pub water_m3: f64,
    #[serde(deserialize_with = "crate::serde::group")]
    pub materials: MaterialsInput,
}

impl ActivityInput {
    /// The quantity of `activity`, in [`ActivityType::unit`]. Negative or non-finite
    /// quantities are read as zero.
    pub fn quantity(&self, activity: ActivityType) -> f64 {
        sanitize(match activity {
            ActivityType::Electricity => self.energy.electricity_kwh,
            ActivityType::Gas => self.energy.gas_m3,
            ActivityType::Heating => self.energy.heating_kwh,
            ActivityType::Fleet => self.transport.fleet_km,
            ActivityType::PublicTransport => self.transport.public_transport_km,
            ActivityType::BusinessTravel => self.transport.business_travel_km,
            ActivityType::GeneralWaste => self.waste.general_kg,
            ActivityType::Recycling => self.waste.recycling_kg,
            ActivityType::Water => self.water_m3,
            ActivityType::Paper => self.materials.paper_kg,
            ActivityType::Plastic => self.materials.plastic_kg,
            ActivityType::Metal => self.materials.metal_kg,
        })
    }

    /// Whether no activity was entered at all
    pub fn is_empty(&self) -> bool {
        ActivityType::ALL
            .iter()
            .all(|activity| self.quantity(*activity) == 0.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn partial_input() {
        let input: ActivityInput = serde_json::from_str(
            r#"{"energy": {"electricity_kwh": "25000"}, "waste": {"recycling_kg": 300}}"#,
        )
        .unwrap();
        assert_eq!(input.quantity(ActivityType::Electricity), 25000.0);
        assert_eq!(input.quantity(ActivityType::Recycling), 300.0);
        assert_eq!(input.quantity(ActivityType::Gas), 0.0);
        assert!(!input.is_empty());
    }

    #[test]
    fn null_groups() {
        let input: ActivityInput = serde_json::from_str(
            r#"{"energy": null, "transport": null, "waste": null, "materials": null, "water_m3": 12}"#,
        )
        .unwrap();
        assert_eq!(input.energy, EnergyInput::default());
        assert_eq!(input.quantity(ActivityType::Water), 12.0);
    }

    #[test]
    fn invalid_programmatic_quantities() {
        let mut input = ActivityInput::default();
        input.energy.gas_m3 = -10.0;
        input.water_m3 = f64::NAN;
        assert_eq!(input.quantity(ActivityType::Gas), 0.0);
        assert_eq!(input.quantity(ActivityType::Water), 0.0);
        assert!(input.is_empty());
    }

    #[test]
    fn every_activity_has_a_unit() {
        assert!(ActivityType::ALL.iter().all(|a| !a.unit().is_empty()));
    }
}
