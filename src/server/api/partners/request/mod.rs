use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::db::models::partner::{NewPartner, PartnerChanges};

/// Body of `POST /api/admin/partners`.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartner {
    /// Partner name.
    #[serde(default)]
    pub name: Option<String>,
    /// Logo URL, required.
    pub logo: String,
    /// Name shown under the logo.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Alt text for the logo.
    #[serde(default)]
    pub alt_text: Option<String>,
    /// Outbound link.
    #[serde(default)]
    pub url: Option<String>,
    /// Requested position. Appends when absent.
    #[serde(default, deserialize_with = "lenient_order")]
    pub order: Option<i64>,
}

/// Body of `PUT /api/admin/partners/{id}`. Every field is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePartner {
    /// Partner name.
    #[serde(default)]
    pub name: Option<String>,
    /// Logo URL.
    #[serde(default)]
    pub logo: Option<String>,
    /// Name shown under the logo.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Alt text for the logo.
    #[serde(default)]
    pub alt_text: Option<String>,
    /// Outbound link.
    #[serde(default)]
    pub url: Option<String>,
    /// New position.
    #[serde(default, deserialize_with = "lenient_order")]
    pub order: Option<i64>,
}

impl From<&CreatePartner> for NewPartner {
    fn from(value: &CreatePartner) -> Self {
        Self {
            name: value.name.clone().unwrap_or_default(),
            logo: value.logo.clone(),
            display_name: value.display_name.clone().unwrap_or_default(),
            alt_text: value.alt_text.clone().unwrap_or_default(),
            url: value.url.clone().unwrap_or_default(),
        }
    }
}

impl From<UpdatePartner> for PartnerChanges {
    fn from(value: UpdatePartner) -> Self {
        Self {
            name: value.name,
            logo: value.logo,
            display_name: value.display_name,
            alt_text: value.alt_text,
            url: value.url,
            order: value.order,
        }
    }
}

/// Accept an order as a JSON integer or a numeric string, as HTML forms send it.
/// `null` and the empty string mean "not given".
fn lenient_order<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_order(&value).map_err(serde::de::Error::custom)
}

/// Interpret a JSON value as an optional order.
fn parse_order(value: &Value) -> Result<Option<i64>, String> {
    match *value {
        Value::Null => Ok(None),
        Value::Number(ref number) => number
            .as_i64()
            .map(Some)
            .ok_or_else(|| format!("order must be an integer, got {number}")),
        Value::String(ref text) if text.trim().is_empty() => Ok(None),
        Value::String(ref text) => text
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| format!("order must be an integer, got \"{text}\"")),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
            Err(format!("order must be an integer, got {value}"))
        }
    }
}
