use serde::{Deserialize, Serialize};

use crate::Industry;

/// A claim together with where it comes from and when it was retrieved.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Fact<R> {
    pub claim: R,
    pub source: String,
    pub date: String,
}

/// The company a calculation is made for
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CompanyProfile {
    pub name: String,
    #[serde(default)]
    pub industry: Industry,
    /// Number of employees (FTE). Missing or invalid values count as zero.
    #[serde(default, deserialize_with = "crate::serde::count")]
    pub employees: u32,
    /// Annual revenue in EUR
    #[serde(default, deserialize_with = "crate::serde::optional_quantity")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
}

impl CompanyProfile {
    pub fn new(name: impl Into<String>, industry: Industry, employees: u32) -> Self {
        Self {
            name: name.into(),
            industry,
            employees,
            revenue: None,
        }
    }

    /// Whether the company is large enough to fall under the CSRD reporting obligation:
    /// at least 250 employees or at least EUR 50M revenue.
    pub fn csrd_applicable(&self) -> bool {
        self.employees >= 250 || self.revenue.unwrap_or(0.0) >= 50_000_000.0
    }
}
