use std::{collections::BTreeMap, error::Error};

use serde::{Deserialize, Serialize};

use crate::ActivityType;

/// Recycled waste emits 80% less than general waste.
pub const RECYCLING_MULTIPLIER: f64 = 0.2;

/// The in-memory representation of an emission factor
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EmissionFactor {
    pub activity: ActivityType,
    /// the unit the factor applies to (e.g. `kWh`)
    pub unit: String,
    /// kg of CO2e emitted per unit
    pub kg_co2e_per_unit: f64,
    /// the source of the factor
    pub source: String,
    /// the date of when the source was retrieved
    pub date: String,
}

static CO2_EMISSIEFACTOREN: &str = "CO2emissiefactoren.nl, lijst emissiefactoren";
static FACTORS_DATE: &str = "2024-01-15";

/// Dutch emission factors. Recycling has no own factor, see [`RECYCLING_MULTIPLIER`].
const DUTCH_FACTORS: [(ActivityType, f64, &str); 11] = [
    (ActivityType::Electricity, 0.328, "grijze stroom, onbekende herkomst"),
    (ActivityType::Gas, 1.884, "aardgas, verbranding"),
    (ActivityType::Heating, 0.130, "stadswarmte, gemiddeld"),
    (ActivityType::Fleet, 0.193, "personenauto, gemiddelde brandstof"),
    (ActivityType::PublicTransport, 0.035, "openbaar vervoer, gemiddeld trein en bus"),
    (ActivityType::BusinessTravel, 0.172, "vliegtuig, gemiddelde afstand"),
    (ActivityType::GeneralWaste, 0.500, "restafval, verbranding"),
    (ActivityType::Water, 0.298, "drinkwater, levering en zuivering"),
    (ActivityType::Paper, 0.919, "papier, productie"),
    (ActivityType::Plastic, 2.300, "kunststof, productie"),
    (ActivityType::Metal, 1.850, "staal, productie"),
];

/// An immutable table of emission factors, one per [`ActivityType`] except recycling.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionFactors(BTreeMap<ActivityType, EmissionFactor>);

impl Default for EmissionFactors {
    /// The Dutch emission factors shipped with this crate
    fn default() -> Self {
        Self(
            DUTCH_FACTORS
                .iter()
                .map(|(activity, kg_co2e_per_unit, description)| {
                    let factor = EmissionFactor {
                        activity: *activity,
                        unit: activity.unit().to_string(),
                        kg_co2e_per_unit: *kg_co2e_per_unit,
                        source: format!("{CO2_EMISSIEFACTOREN} ({description})"),
                        date: FACTORS_DATE.to_string(),
                    };
                    (*activity, factor)
                })
                .collect(),
        )
    }
}

impl EmissionFactors {
    /// Returns a table from `factors`.
    /// # Error
    /// Errors if a factor other than recycling is missing or repeated, is not in the unit of
    /// its activity, or is not a finite, non-negative number
    pub fn try_new(
        factors: impl IntoIterator<Item = EmissionFactor>,
    ) -> Result<Self, Box<dyn Error>> {
        let mut table = BTreeMap::new();
        for factor in factors
            .into_iter()
            .filter(|f| f.activity != ActivityType::Recycling)
        {
            if !factor.kg_co2e_per_unit.is_finite() || factor.kg_co2e_per_unit < 0.0 {
                return Err(format!(
                    "Emission factor of {:?} must be a non-negative number",
                    factor.activity
                )
                .into());
            }
            if factor.unit != factor.activity.unit() {
                return Err(format!(
                    "Emission factor of {:?} must be per {}, not per {}",
                    factor.activity,
                    factor.activity.unit(),
                    factor.unit
                )
                .into());
            }
            if let Some(previous) = table.insert(factor.activity, factor) {
                return Err(
                    format!("Emission factor of {:?} is repeated", previous.activity).into(),
                );
            }
        }
        let factors = table;
        if let Some(missing) = ActivityType::ALL
            .iter()
            .filter(|a| **a != ActivityType::Recycling)
            .find(|a| !factors.contains_key(a))
        {
            return Err(format!("Emission factor of {missing:?} is missing").into());
        }
        Ok(Self(factors))
    }

    /// The factor entry of `activity`; `None` for recycling, which derives from general waste.
    pub fn get(&self, activity: ActivityType) -> Option<&EmissionFactor> {
        self.0.get(&activity)
    }

    /// kg of CO2e per unit of `activity`
    pub fn kg_per_unit(&self, activity: ActivityType) -> f64 {
        match activity {
            ActivityType::Recycling => {
                self.kg_per_unit(ActivityType::GeneralWaste) * RECYCLING_MULTIPLIER
            }
            _ => self.get(activity).map(|f| f.kg_co2e_per_unit).unwrap_or(0.0),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmissionFactor> {
        self.0.values()
    }
}

/// Loads emission factors from a CSV file with the columns of [`EmissionFactor`].
/// # Error
/// Errors if the file cannot be read or does not contain a valid table
pub fn load_emission_factors(path: &str) -> Result<EmissionFactors, Box<dyn Error>> {
    let factors = super::csv::load(path, |f: EmissionFactor| (f.activity, f))?;
    log::info!("Loaded {} emission factors from {path}", factors.len());
    EmissionFactors::try_new(factors.into_values())
}
