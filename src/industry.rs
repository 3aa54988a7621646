use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Fact;

/// Sectors of the Dutch economy for which an emissions benchmark exists.
/// Labels are the Dutch sector names used in forms; any unknown label maps to [`Industry::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Industry {
    BusinessServices,
    Ict,
    Retail,
    Wholesale,
    Hospitality,
    Construction,
    Manufacturing,
    TransportLogistics,
    Healthcare,
    Education,
    Agriculture,
    #[default]
    Other,
}

static BENCHMARK_SOURCE: &str = "Average annual emissions (scope 1, 2 and 3) per employee of Dutch SMEs, derived from CBS StatLine air emissions by sector and number of employed persons per sector";
static BENCHMARK_DATE: &str = "2024-01-15";

impl Industry {
    pub const ALL: [Industry; 12] = [
        Industry::BusinessServices,
        Industry::Ict,
        Industry::Retail,
        Industry::Wholesale,
        Industry::Hospitality,
        Industry::Construction,
        Industry::Manufacturing,
        Industry::TransportLogistics,
        Industry::Healthcare,
        Industry::Education,
        Industry::Agriculture,
        Industry::Other,
    ];

    /// The Dutch label of the sector
    pub fn label(&self) -> &'static str {
        match self {
            Industry::BusinessServices => "Zakelijke dienstverlening",
            Industry::Ict => "ICT",
            Industry::Retail => "Detailhandel",
            Industry::Wholesale => "Groothandel",
            Industry::Hospitality => "Horeca",
            Industry::Construction => "Bouw",
            Industry::Manufacturing => "Industrie",
            Industry::TransportLogistics => "Transport en logistiek",
            Industry::Healthcare => "Zorg",
            Industry::Education => "Onderwijs",
            Industry::Agriculture => "Landbouw",
            Industry::Other => "Anders",
        }
    }

    /// Returns the sector with label `label` (case and surrounding whitespace ignored),
    /// falling back to [`Industry::Other`].
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|industry| industry.label().eq_ignore_ascii_case(label))
            .unwrap_or_default()
    }

    /// Average emissions per employee per year, in tons of CO2e
    pub fn average_per_employee_tons(&self) -> f64 {
        match self {
            Industry::BusinessServices => 4.5,
            Industry::Ict => 3.8,
            Industry::Retail => 6.2,
            Industry::Wholesale => 8.0,
            Industry::Hospitality => 7.5,
            Industry::Construction => 12.0,
            Industry::Manufacturing => 25.0,
            Industry::TransportLogistics => 30.0,
            Industry::Healthcare => 5.5,
            Industry::Education => 3.2,
            Industry::Agriculture => 20.0,
            Industry::Other => 8.0,
        }
    }

    /// [`Industry::average_per_employee_tons`] with its source
    pub fn average_per_employee(&self) -> Fact<f64> {
        Fact {
            claim: self.average_per_employee_tons(),
            source: format!("{BENCHMARK_SOURCE} ({}).", self.label()),
            date: BENCHMARK_DATE.to_string(),
        }
    }
}

impl From<&str> for Industry {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl std::fmt::Display for Industry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Industry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Industry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = crate::serde::label(deserializer)?;
        Ok(label.as_deref().map(Self::from_label).unwrap_or_default())
    }
}
