use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sales channel of a subscription. The backend uses numeric wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(try_from = "u8", into = "u8")]
pub enum SubscriptionType {
    Web,
    MobileApp,
    Branch,
}

impl From<SubscriptionType> for u8 {
    fn from(value: SubscriptionType) -> Self {
        match value {
            SubscriptionType::Web => 0,
            SubscriptionType::MobileApp => 1,
            SubscriptionType::Branch => 2,
        }
    }
}

impl TryFrom<u8> for SubscriptionType {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(SubscriptionType::Web),
            1 => Ok(SubscriptionType::MobileApp),
            2 => Ok(SubscriptionType::Branch),
            other => Err(format!("unknown subscription type {other}")),
        }
    }
}

/// One scheduled meal as returned by the plan-generation endpoint.
///
/// Aliases absorb the older field spellings still emitted by some backend
/// versions, so the rest of the workspace only sees this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledMeal {
    #[serde(alias = "id")]
    pub meal_id: i64,
    #[serde(alias = "name")]
    pub meal_name: String,
    #[serde(alias = "mealType")]
    pub meal_type_name: String,
    pub delivery_date: NaiveDate,
    #[serde(default)]
    pub day_name: String,
    #[serde(alias = "dayNumber", default)]
    pub day_ordinal: u32,
}

/// Result of the last successful plan-generation call, kept opaque in the
/// draft and only interpreted by the preview pivot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    #[serde(default)]
    pub meals: Vec<ScheduledMeal>,
}

/// Invoice attachment captured in the billing step. Content is held in
/// memory and carried as base64 in the persisted draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub file_name: String,
    #[serde(with = "base64_bytes")]
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn encoded(&self) -> String {
        STANDARD.encode(&self.content)
    }
}

mod base64_bytes {
    use super::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
