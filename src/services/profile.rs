// src/services/profile.rs
use serde::{Deserialize, Serialize};

use crate::rules::{self, RiskDescriptor};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub location: String,
    pub age: u32,
    pub has_car: bool,
    pub has_home: bool,
    pub policy_type: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Alex Johnson".to_string(),
            location: "Oklahoma City, OK".to_string(),
            age: 34,
            has_car: true,
            has_home: true,
            policy_type: "Comprehensive".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    Name,
    Location,
    Age,
    PolicyType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Asset {
    Car,
    Home,
}

impl UserProfile {
    /// Returns the edited copy. An age that doesn't parse keeps the old one.
    pub fn with_field(&self, field: ProfileField, value: &str) -> Self {
        let mut next = self.clone();
        match field {
            ProfileField::Name => next.name = value.to_string(),
            ProfileField::Location => next.location = value.to_string(),
            ProfileField::Age => {
                if let Ok(age) = value.trim().parse() {
                    next.age = age;
                }
            }
            ProfileField::PolicyType => next.policy_type = value.to_string(),
        }
        next
    }

    pub fn with_asset_toggled(&self, asset: Asset) -> Self {
        let mut next = self.clone();
        match asset {
            Asset::Car => next.has_car = !next.has_car,
            Asset::Home => next.has_home = !next.has_home,
        }
        next
    }

    pub fn risk(&self) -> RiskDescriptor {
        rules::lookup(&self.location)
    }

    /// Context string for a chat turn, with the risk looked up from this profile's location.
    pub fn context(&self) -> String {
        build_context(self, &self.risk())
    }
}

pub fn build_context(profile: &UserProfile, risk: &RiskDescriptor) -> String {
    let car = if profile.has_car { "Car" } else { "No Car" };
    let home = if profile.has_home { "Homeowner" } else { "Renter" };

    format!(
        "You are an expert Insurance Consultant AI.\n\
         \n\
         User Profile Context:\n\
         - Name: {name}\n\
         - Age: {age}\n\
         - Location: {location}\n\
         - Assets: {car}, {home}\n\
         \n\
         Current Local Risk Data for {location}:\n\
         - Condition: {condition}\n\
         - Specific Risk: {risk_label}\n\
         - Automated Advice: {advice}\n\
         \n\
         INSTRUCTIONS:\n\
         1. Use the User Profile to personalize advice.\n\
         2. CRITICAL: You MUST reference the \"Current Local Risk Data\" above.\n\
         3. Simplify any complex insurance terms you use.\n\
         4. Keep the tone professional, empathetic, and trustworthy.",
        name = profile.name,
        age = profile.age,
        location = profile.location,
        condition = risk.condition,
        risk_label = risk.risk,
        advice = risk.advice,
    )
}
