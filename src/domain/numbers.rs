//! Phone number inventory: search, purchase, configure, cancel.

use serde::{Deserialize, Serialize};

use crate::domain::validation::{FieldPath, Validate, Violations};
use crate::domain::value::open_enum;

open_enum! {
    /// Traffic a number can carry.
    pub enum NumberCapability {
        Sms => "SMS",
        Voice => "VOICE",
        Mms => "MMS",
        WhatsApp => "WHATSAPP",
    }
}

open_enum! {
    pub enum NumberType {
        Virtual => "VIRTUAL_LONG_NUMBER",
        ShortCode => "SHORT_CODE",
        TollFree => "TOLL_FREE",
        Local => "LOCAL",
        Mobile => "MOBILE",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Query of `GET /numbers/1/numbers/available`.
pub struct AvailableNumbersParams {
    pub capabilities: Option<NumberCapability>,
    /// ISO 3166-1 alpha-2 country code.
    pub country: Option<String>,
    pub state: Option<String>,
    pub npa: Option<u32>,
    pub nxx: Option<u32>,
    pub limit: Option<u32>,
    pub number: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Query of `GET /numbers/1/numbers`.
pub struct PurchasedNumbersParams {
    pub limit: Option<u32>,
    pub page: Option<u32>,
    pub number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_count: Option<u32>,
    #[serde(default)]
    pub numbers: Vec<Number>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A number offered for purchase or owned by the account.
pub struct Number {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<NumberType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<NumberCapability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<NumberPrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberPrice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_month: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_month_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /numbers/1/numbers`. Identify the number by key or by value.
pub struct PurchaseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

impl PurchaseRequest {
    pub fn by_key(number_key: impl Into<String>) -> Self {
        Self {
            number_key: Some(number_key.into()),
            number: None,
        }
    }
}

impl Validate for PurchaseRequest {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        match (&self.number_key, &self.number) {
            (None, None) => violations.push(path, "required", "numberKey or number must be provided"),
            (Some(key), _) => violations.not_blank(&path.field("numberKey"), key),
            (None, Some(number)) => violations.digits(&path.field("number"), number),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Body of `PUT /numbers/1/numbers/{numberKey}`.
pub struct UpdateNumberRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Validate for UpdateNumberRequest {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        violations.optional_length(&path.field("applicationId"), self.application_id.as_deref(), 1, 255);
        violations.optional_length(&path.field("entityId"), self.entity_id.as_deref(), 1, 255);
        violations.optional_length(&path.field("note"), self.note.as_deref(), 0, 4096);
    }
}
