use serde::{Deserialize, Deserializer, Serialize};

/// One entry of the `list_surveys` result.
///
/// Dates and the active flag are passed through as the server sends them.
/// Additional members in each record are ignored; missing or null string
/// members decode as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySummary {
    #[serde(default, deserialize_with = "nullable_string")]
    pub active: String,
    #[serde(rename = "sid")]
    pub survey_id: i64,
    #[serde(rename = "surveyls_title", default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(rename = "startdate", default, deserialize_with = "nullable_string")]
    pub start_date: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub expires: String,
}

impl SurveySummary {
    /// LimeSurvey marks active surveys with `"Y"`
    pub fn is_active(&self) -> bool {
        self.active == "Y"
    }
}

// LimeSurvey sends null for unset dates
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
