use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ActivityInput, ActivityType, EmissionFactors};

/// The categories emissions are reported in
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Energy,
    Transport,
    Waste,
    Water,
    Materials,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Energy,
        Category::Transport,
        Category::Waste,
        Category::Water,
        Category::Materials,
    ];

    /// The Dutch label of the category
    pub fn label(&self) -> &'static str {
        match self {
            Category::Energy => "Energie",
            Category::Transport => "Transport",
            Category::Waste => "Afval",
            Category::Water => "Water",
            Category::Materials => "Materialen",
        }
    }
}

/// [GHG protocol](https://ghgprotocol.org) scopes
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Direct emissions
    Scope1,
    /// Indirect emissions from purchased energy
    Scope2,
    /// Other indirect emissions in the value chain
    Scope3,
}

impl Scope {
    pub const ALL: [Scope; 3] = [Scope::Scope1, Scope::Scope2, Scope::Scope3];

    pub fn label(&self) -> &'static str {
        match self {
            Scope::Scope1 => "Scope 1",
            Scope::Scope2 => "Scope 2",
            Scope::Scope3 => "Scope 3",
        }
    }
}

/// Emissions in kg of CO2e of every [`ActivityType`]
#[derive(Debug, Clone, PartialEq)]
pub struct Emissions(BTreeMap<ActivityType, f64>);

impl Emissions {
    /// kg of CO2e of `activity`
    pub fn kg(&self, activity: ActivityType) -> f64 {
        self.0.get(&activity).copied().unwrap_or(0.0)
    }

    pub fn category_kg(&self, category: Category) -> f64 {
        self.sum(|activity| activity.category() == category)
    }

    pub fn scope_kg(&self, scope: Scope) -> f64 {
        self.sum(|activity| activity.scope() == scope)
    }

    pub fn total_kg(&self) -> f64 {
        Category::ALL.iter().map(|c| self.category_kg(*c)).sum()
    }

    /// Share of `category` in the total, between 0 and 1. Zero when there are no emissions.
    pub fn share(&self, category: Category) -> f64 {
        let total = self.total_kg();
        if total > 0.0 {
            self.category_kg(category) / total
        } else {
            0.0
        }
    }

    /// The category with most emissions; `None` when there are no emissions.
    /// Ties resolve to the category listed first in [`Category::ALL`].
    pub fn largest_category(&self) -> Option<Category> {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.category_kg(c)))
            .filter(|(_, kg)| *kg > 0.0)
            .fold(None, |acc: Option<(Category, f64)>, (c, kg)| match acc {
                Some((_, max)) if max >= kg => acc,
                _ => Some((c, kg)),
            })
            .map(|(c, _)| c)
    }

    fn sum(&self, predicate: impl Fn(ActivityType) -> bool) -> f64 {
        self.0
            .iter()
            .filter(|(activity, _)| predicate(**activity))
            .map(|(_, kg)| kg)
            .sum()
    }
}

/// Returns the emissions of every activity in `input`, as quantity times factor.
pub fn emissions(input: &ActivityInput, factors: &EmissionFactors) -> Emissions {
    Emissions(
        ActivityType::ALL
            .into_iter()
            .map(|activity| {
                let kg = input.quantity(activity) * factors.kg_per_unit(activity);
                (activity, kg)
            })
            .collect(),
    )
}

/// Emissions of a category in the result of a calculation
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub category: Category,
    pub tons: f64,
    /// Share of the total, between 0 and 100
    pub percentage: f64,
}

/// Emissions of a scope in the result of a calculation
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScopeBreakdown {
    pub scope: Scope,
    pub tons: f64,
}

impl Emissions {
    pub fn breakdown(&self) -> Vec<CategoryBreakdown> {
        Category::ALL
            .into_iter()
            .map(|category| CategoryBreakdown {
                category,
                tons: self.category_kg(category) / 1000.0,
                percentage: self.share(category) * 100.0,
            })
            .collect()
    }

    pub fn scopes(&self) -> Vec<ScopeBreakdown> {
        Scope::ALL
            .into_iter()
            .map(|scope| ScopeBreakdown {
                scope,
                tons: self.scope_kg(scope) / 1000.0,
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn input() -> ActivityInput {
        let mut input = ActivityInput::default();
        input.energy.electricity_kwh = 10_000.0;
        input.energy.gas_m3 = 1_000.0;
        input.transport.fleet_km = 20_000.0;
        input.waste.general_kg = 500.0;
        input.waste.recycling_kg = 500.0;
        input
    }

    #[test]
    fn weighted_sum() {
        let factors = EmissionFactors::default();
        let e = emissions(&input(), &factors);
        assert!((e.kg(ActivityType::Electricity) - 3280.0).abs() < 1e-9);
        assert!((e.kg(ActivityType::Gas) - 1884.0).abs() < 1e-9);
        assert!((e.category_kg(Category::Waste) - (250.0 + 50.0)).abs() < 1e-9);
        assert_eq!(e.category_kg(Category::Water), 0.0);
    }

    #[test]
    fn scopes_and_categories_agree() {
        let e = emissions(&input(), &EmissionFactors::default());
        let scopes = Scope::ALL.iter().map(|s| e.scope_kg(*s)).sum::<f64>();
        assert!((scopes - e.total_kg()).abs() < 1e-9);
        // gas and fleet
        assert!((e.scope_kg(Scope::Scope1) - (1884.0 + 3860.0)).abs() < 1e-9);
    }

    #[test]
    fn largest() {
        let e = emissions(&input(), &EmissionFactors::default());
        assert_eq!(e.largest_category(), Some(Category::Energy));
        let e = emissions(&ActivityInput::default(), &EmissionFactors::default());
        assert_eq!(e.largest_category(), None);
        assert_eq!(e.share(Category::Energy), 0.0);
    }

    #[test]
    fn percentages() {
        let e = emissions(&input(), &EmissionFactors::default());
        let total = e.breakdown().iter().map(|b| b.percentage).sum::<f64>();
        assert!((total - 100.0).abs() < 1e-9);
    }
}
