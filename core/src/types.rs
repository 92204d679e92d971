//! Wire DTOs for the Zorya REST API.
//!
//! # Design
//! Field names follow the provider's camelCase JSON. Optional template parts
//! are omitted from the serialized payload when absent or empty so the
//! provider sees exactly the components the caller filled in. Response types
//! tolerate missing and `null` fields because the provider omits them on
//! some error paths.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Decode `null` as the type's default instead of failing.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub user_password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub errors: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub detailed_errors: Vec<Value>,
    /// The JWT issued on success.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: String,
}

/// Request payload for `POST /api/v1/WhatsApp/messages`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppMessageRequest {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub tracking_message: bool,
    pub content: WhatsAppContent,
}

impl WhatsAppMessageRequest {
    /// A template message with only the required parts filled in.
    pub fn template(
        from: impl Into<String>,
        to: impl Into<String>,
        template_name: impl Into<String>,
        language_code: impl Into<String>,
        body: TemplateBody,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            tracking_message: false,
            content: WhatsAppContent {
                content_type: "template".to_string(),
                template_name: template_name.into(),
                language_code: language_code.into(),
                template_data: TemplateData {
                    body,
                    ..TemplateData::default()
                },
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub template_name: String,
    pub language_code: String,
    pub template_data: TemplateData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<TemplateHeader>,
    pub body: TemplateBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<TemplateFooter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<TemplateButton>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carousel: Option<TemplateCarousel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limited_time_offer: Option<TemplateLimitedTimeOffer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateHeader {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub header_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Body placeholders, either positional or named.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateBody {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placeholders: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub named_placeholders: BTreeMap<String, String>,
}

impl TemplateBody {
    pub fn positional<I, S>(placeholders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            placeholders: placeholders.into_iter().map(Into::into).collect(),
            named_placeholders: BTreeMap::new(),
        }
    }

    pub fn named<I, K, V>(placeholders: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            placeholders: Vec::new(),
            named_placeholders: placeholders
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateFooter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateButton {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub button_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placeholders: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateCarousel {
    pub cards: Vec<CarouselCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CarouselCard {
    pub header: CarouselHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<CarouselBody>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<TemplateButton>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CarouselHeader {
    #[serde(rename = "type")]
    pub header_type: String,
    pub media_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CarouselBody {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placeholders: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateLimitedTimeOffer {
    /// Provider-formatted timestamp, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<String>,
}

/// Response from `POST /api/v1/WhatsApp/messages`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppMessageResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub errors: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub detailed_errors: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: WhatsAppMessageResData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppMessageResData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub transaction_id: String,
}
