// src/rules.rs
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Storm,
    Hurricane,
    Wildfire,
    Rain,
    Clear,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Storm => "storm",
            RiskCategory::Hurricane => "hurricane",
            RiskCategory::Wildfire => "wildfire",
            RiskCategory::Rain => "rain",
            RiskCategory::Clear => "clear",
        }
    }
}

/// Local risk hint derived from a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskDescriptor {
    pub condition: &'static str,
    pub risk: &'static str,
    pub advice: &'static str,
    pub category: RiskCategory,
}

pub struct RiskRule {
    pub keywords: &'static [&'static str],
    pub descriptor: RiskDescriptor,
}

impl RiskRule {
    fn matches(&self, location_lower: &str) -> bool {
        self.keywords.iter().any(|k| location_lower.contains(k))
    }
}

// Evaluated top to bottom, first match wins. Order breaks ties between keywords.
pub static RISK_RULES: &[RiskRule] = &[
    RiskRule {
        keywords: &["oklahoma", "dallas", "kansas"],
        descriptor: RiskDescriptor {
            condition: "Severe Storms",
            risk: "Hail Damage",
            advice: "High hail probability. Review auto comprehensive coverage.",
            category: RiskCategory::Storm,
        },
    },
    RiskRule {
        keywords: &["miami", "tampa", "orleans"],
        descriptor: RiskDescriptor {
            condition: "Hurricane Season",
            risk: "Flood/Wind",
            advice: "Flood zone alert. Flood insurance is likely mandatory.",
            category: RiskCategory::Hurricane,
        },
    },
    RiskRule {
        keywords: &["california", "los angeles", "francisco"],
        descriptor: RiskDescriptor {
            condition: "Dry/Arid",
            risk: "Wildfire",
            advice: "High fire risk area. Check homeowner policy for fire exclusions.",
            category: RiskCategory::Wildfire,
        },
    },
    RiskRule {
        keywords: &["seattle", "london"],
        descriptor: RiskDescriptor {
            condition: "Constant Rain",
            risk: "Slippery Roads",
            advice: "Increased accident risk. Ensure collision deductibles are manageable.",
            category: RiskCategory::Rain,
        },
    },
];

pub const DEFAULT_RISK: RiskDescriptor = RiskDescriptor {
    condition: "Clear",
    risk: "Low",
    advice: "Conditions are stable. Standard coverage reviews recommended.",
    category: RiskCategory::Clear,
};

pub fn lookup(location: &str) -> RiskDescriptor {
    let location_lower = location.to_lowercase();

    RISK_RULES
        .iter()
        .find(|rule| rule.matches(&location_lower))
        .map(|rule| rule.descriptor)
        .unwrap_or(DEFAULT_RISK)
}

/// Absent input behaves like the empty string.
pub fn lookup_opt(location: Option<&str>) -> RiskDescriptor {
    lookup(location.unwrap_or_default())
}
