use serde::{Deserialize, Serialize};

use crate::{ActivityInput, ActivityType, Category, EmissionFactors, Emissions};

/// At most this many recommendations are returned
pub const MAX_RECOMMENDATIONS: usize = 5;

// prices paid by Dutch SMEs, excluding VAT
const ELECTRICITY_EUR_PER_KWH: f64 = 0.30;
const GAS_EUR_PER_M3: f64 = 1.40;
const HEATING_EUR_PER_KWH: f64 = 0.12;
const WASTE_EUR_PER_KG: f64 = 0.20;
const MATERIALS_EUR_PER_KG: f64 = 1.50;
const WATER_EUR_PER_M3: f64 = 1.60;
// running costs saved per km when driving electric instead of fossil
const FLEET_EV_EUR_PER_KM: f64 = 0.07;
const BUSINESS_TRAVEL_EUR_PER_KM: f64 = 0.15;
const COMMUTE_EUR_PER_KM: f64 = 0.10;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "Hoog",
            Priority::Medium => "Middel",
            Priority::Low => "Laag",
        }
    }
}

/// A measure a company can take to reduce its emissions
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// stable identifier of the rule (e.g. `green-electricity`)
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    /// Estimated reduction in tons of CO2e per year
    pub co2_reduction_tons: f64,
    /// Estimated savings in EUR per year
    pub cost_savings_eur: f64,
}

struct Context<'a> {
    input: &'a ActivityInput,
    emissions: &'a Emissions,
    factors: &'a EmissionFactors,
}

impl Context<'_> {
    fn q(&self, activity: ActivityType) -> f64 {
        self.input.quantity(activity)
    }

    fn kg(&self, activity: ActivityType) -> f64 {
        self.emissions.kg(activity)
    }

    fn share(&self, category: Category) -> f64 {
        self.emissions.share(category)
    }

    fn activity_share(&self, activity: ActivityType) -> f64 {
        let total = self.emissions.total_kg();
        if total > 0.0 {
            self.kg(activity) / total
        } else {
            0.0
        }
    }
}

struct Rule {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    category: Category,
    priority: Priority,
    applies: fn(&Context) -> bool,
    reduction_kg: fn(&Context) -> f64,
    savings_eur: fn(&Context) -> f64,
}

/// Rules in order of priority
static RULES: [Rule; 9] = [
    Rule {
        id: "green-electricity",
        title: "Overstappen op groene stroom",
        description: "Kies voor stroom uit Nederlandse wind of zon met garanties van oorsprong, of leg zonnepanelen op het dak.",
        category: Category::Energy,
        priority: Priority::High,
        applies: |c| c.share(Category::Energy) > 0.30 && c.q(ActivityType::Electricity) > 0.0,
        reduction_kg: |c| c.kg(ActivityType::Electricity) * 0.9,
        savings_eur: |_| 0.0,
    },
    Rule {
        id: "heat-pump",
        title: "Warmtepomp en isolatie",
        description: "Vervang de cv-ketel door een (hybride) warmtepomp en verbeter de isolatie van het pand.",
        category: Category::Energy,
        priority: Priority::High,
        applies: |c| c.activity_share(ActivityType::Gas) > 0.20,
        reduction_kg: |c| c.kg(ActivityType::Gas) * 0.7,
        savings_eur: |c| c.q(ActivityType::Gas) * 0.5 * GAS_EUR_PER_M3,
    },
    Rule {
        id: "fleet-electrification",
        title: "Elektrificeren van het wagenpark",
        description: "Vervang auto's en bestelbussen op fossiele brandstof door elektrische voertuigen zodra de lease afloopt.",
        category: Category::Transport,
        priority: Priority::High,
        applies: |c| c.activity_share(ActivityType::Fleet) > 0.25,
        reduction_kg: |c| c.kg(ActivityType::Fleet) * 0.6,
        savings_eur: |c| c.q(ActivityType::Fleet) * FLEET_EV_EUR_PER_KM,
    },
    Rule {
        id: "business-travel",
        title: "Duurzaam zakelijk reizen",
        description: "Neem de trein naar Europese bestemmingen en vervang afspraken in het buitenland door videogesprekken.",
        category: Category::Transport,
        priority: Priority::Medium,
        applies: |c| c.activity_share(ActivityType::BusinessTravel) > 0.10,
        reduction_kg: |c| c.kg(ActivityType::BusinessTravel) * 0.5,
        savings_eur: |c| c.q(ActivityType::BusinessTravel) * 0.5 * BUSINESS_TRAVEL_EUR_PER_KM,
    },
    Rule {
        id: "waste-separation",
        title: "Afval beter scheiden",
        description: "Scheid papier, plastic en gft zodat de helft van het restafval gerecycled wordt.",
        category: Category::Waste,
        priority: Priority::Medium,
        applies: |c| {
            c.q(ActivityType::GeneralWaste) > c.q(ActivityType::Recycling)
                && c.emissions.category_kg(Category::Waste) > 0.0
        },
        reduction_kg: |c| {
            let moved = c.q(ActivityType::GeneralWaste) * 0.5;
            moved
                * (c.factors.kg_per_unit(ActivityType::GeneralWaste)
                    - c.factors.kg_per_unit(ActivityType::Recycling))
        },
        savings_eur: |c| c.q(ActivityType::GeneralWaste) * 0.5 * WASTE_EUR_PER_KG,
    },
    Rule {
        id: "energy-efficiency",
        title: "Energiebesparing",
        description: "Gebruik ledverlichting en slimme thermostaten en zet apparatuur buiten kantooruren uit.",
        category: Category::Energy,
        priority: Priority::Medium,
        applies: |c| c.share(Category::Energy) > 0.15,
        reduction_kg: |c| c.emissions.category_kg(Category::Energy) * 0.15,
        savings_eur: |c| {
            (c.q(ActivityType::Electricity) * ELECTRICITY_EUR_PER_KWH
                + c.q(ActivityType::Gas) * GAS_EUR_PER_M3
                + c.q(ActivityType::Heating) * HEATING_EUR_PER_KWH)
                * 0.15
        },
    },
    Rule {
        id: "material-reduction",
        title: "Minder materiaalgebruik",
        description: "Werk waar mogelijk papierloos en kies voor gerecyclede of herbruikbare verpakkingen.",
        category: Category::Materials,
        priority: Priority::Low,
        applies: |c| c.share(Category::Materials) > 0.10,
        reduction_kg: |c| c.emissions.category_kg(Category::Materials) * 0.3,
        savings_eur: |c| {
            (c.q(ActivityType::Paper) + c.q(ActivityType::Plastic) + c.q(ActivityType::Metal))
                * 0.3
                * MATERIALS_EUR_PER_KG
        },
    },
    Rule {
        id: "water-saving",
        title: "Water besparen",
        description: "Plaats waterbesparende kranen en toiletten en hergebruik regenwater.",
        category: Category::Water,
        priority: Priority::Low,
        applies: |c| c.share(Category::Water) > 0.05,
        reduction_kg: |c| c.kg(ActivityType::Water) * 0.25,
        savings_eur: |c| c.q(ActivityType::Water) * 0.25 * WATER_EUR_PER_M3,
    },
    Rule {
        id: "commute-public-transport",
        title: "Woon-werkverkeer met OV en fiets",
        description: "Bied medewerkers een ov-abonnement of een (elektrische) fiets aan in plaats van een autovergoeding.",
        category: Category::Transport,
        priority: Priority::Low,
        applies: |c| {
            c.q(ActivityType::Fleet) > 0.0
                && c.q(ActivityType::PublicTransport) < c.q(ActivityType::Fleet)
        },
        reduction_kg: |c| {
            let shifted = c.q(ActivityType::Fleet) * 0.2;
            shifted
                * (c.factors.kg_per_unit(ActivityType::Fleet)
                    - c.factors.kg_per_unit(ActivityType::PublicTransport))
        },
        savings_eur: |c| c.q(ActivityType::Fleet) * 0.2 * COMMUTE_EUR_PER_KM,
    },
];

/// Returns up to [`MAX_RECOMMENDATIONS`] recommendations, in order of priority,
/// for a company with `input` and the resulting `emissions`.
pub fn recommendations(
    input: &ActivityInput,
    emissions: &Emissions,
    factors: &EmissionFactors,
) -> Vec<Recommendation> {
    let context = Context {
        input,
        emissions,
        factors,
    };
    let recommendations = RULES
        .iter()
        .filter(|rule| (rule.applies)(&context))
        .take(MAX_RECOMMENDATIONS)
        .map(|rule| Recommendation {
            id: rule.id.to_string(),
            title: rule.title.to_string(),
            description: rule.description.to_string(),
            category: rule.category,
            priority: rule.priority,
            co2_reduction_tons: (rule.reduction_kg)(&context).max(0.0) / 1000.0,
            cost_savings_eur: (rule.savings_eur)(&context).max(0.0),
        })
        .collect::<Vec<_>>();
    log::debug!(
        "{} recommendations: {:?}",
        recommendations.len(),
        recommendations.iter().map(|r| &r.id).collect::<Vec<_>>()
    );
    recommendations
}
