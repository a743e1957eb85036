//! Two-factor authentication: applications, message templates, PIN delivery and
//! verification.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::validation::{FieldPath, Validate, Violations};
use crate::domain::value::open_enum;

open_enum! {
    /// Alphabet PINs are generated from.
    pub enum PinType {
        Numeric => "NUMERIC",
        Alpha => "ALPHA",
        Hex => "HEX",
        Alphanumeric => "ALPHANUMERIC",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Rate limits and attempt policy of an application. Durations use the platform's
/// compact form (`15m`, `1d`); limits are `count/duration` (`3/1d`).
pub struct TfaConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_multiple_pin_verifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_time_to_live: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_pin_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_pin_per_application_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_pin_per_phone_number_limit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A 2FA application. `application_id` is assigned by the platform.
pub struct TfaApplication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<TfaConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Response of `GET /2fa/2/applications`.
pub type TfaApplications = Vec<TfaApplication>;

fn duration_like(value: &str) -> bool {
    let Some(unit) = value.chars().last() else {
        return false;
    };
    let amount = &value[..value.len() - unit.len_utf8()];
    matches!(unit, 'd' | 'h' | 'm' | 's')
        && !amount.is_empty()
        && amount.bytes().all(|b| b.is_ascii_digit())
}

fn limit_like(value: &str) -> bool {
    match value.split_once('/') {
        Some((count, duration)) => {
            !count.is_empty() && count.bytes().all(|b| b.is_ascii_digit()) && duration_like(duration)
        }
        None => false,
    }
}

impl Validate for TfaApplication {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        violations.not_blank(&path.field("name"), &self.name);
        let Some(config) = &self.configuration else {
            return;
        };
        let config_path = path.field("configuration");
        if let Some(attempts) = config.pin_attempts {
            violations.range(&config_path.field("pinAttempts"), attempts, 1, u32::MAX);
        }
        if config.pin_time_to_live.as_deref().is_some_and(|ttl| !duration_like(ttl)) {
            violations.push(&config_path.field("pinTimeToLive"), "pattern", "must look like 15m");
        }
        for (name, value) in [
            ("verifyPinLimit", &config.verify_pin_limit),
            ("sendPinPerApplicationLimit", &config.send_pin_per_application_limit),
            ("sendPinPerPhoneNumberLimit", &config.send_pin_per_phone_number_limit),
        ] {
            if value.as_deref().is_some_and(|value| !limit_like(value)) {
                violations.push(&config_path.field(name), "pattern", "must look like 3/1d");
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Message template used to deliver PINs. `message_id` is assigned by the platform.
pub struct TfaMessageTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    pub pin_type: PinType,
    /// Text containing the `{{pin}}` placeholder.
    pub message_text: String,
    pub pin_length: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    #[serde(rename = "repeatDTMF", skip_serializing_if = "Option::is_none")]
    pub repeat_dtmf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_rate: Option<f64>,
}

impl Default for PinType {
    fn default() -> Self {
        Self::Numeric
    }
}

/// Response of `GET /2fa/2/applications/{appId}/messages`.
pub type TfaMessageTemplates = Vec<TfaMessageTemplate>;

impl Validate for TfaMessageTemplate {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        violations.one_of(&path.field("pinType"), self.pin_type.as_str(), PinType::KNOWN);
        violations.not_blank(&path.field("messageText"), &self.message_text);
        let placeholder = self.pin_placeholder.as_deref().unwrap_or("{{pin}}");
        if !self.message_text.contains(placeholder) {
            violations.push(
                &path.field("messageText"),
                "placeholder",
                format!("must contain {placeholder}"),
            );
        }
        violations.range(&path.field("pinLength"), self.pin_length, 1, 20);
        if let Some(rate) = self.speech_rate {
            violations.range(&path.field("speechRate"), rate, 0.5, 2.0);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Body of the send-PIN endpoints (SMS and voice).
pub struct SendPinRequest {
    pub application_id: String,
    pub message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    pub to: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub placeholders: BTreeMap<String, String>,
}

impl Validate for SendPinRequest {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        violations.not_blank(&path.field("applicationId"), &self.application_id);
        violations.not_blank(&path.field("messageId"), &self.message_id);
        violations.not_blank(&path.field("to"), &self.to);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Query of `POST /2fa/2/pin`.
pub struct SendPinParams {
    /// Run a Number Lookup before sending.
    pub nc_needed: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Body of the resend endpoints.
pub struct ResendPinRequest {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub placeholders: BTreeMap<String, String>,
}

impl Validate for ResendPinRequest {
    fn validate_at(&self, _path: &FieldPath, _violations: &mut Violations) {}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinSent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nc_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Body of `POST /2fa/2/pin/{pinId}/verify`.
pub struct VerifyPinRequest {
    pub pin: String,
}

impl Validate for VerifyPinRequest {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        violations.not_blank(&path.field("pin"), &self.pin);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinVerification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msisdn: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts_remaining: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Query of `GET /2fa/2/applications/{appId}/verifications`.
pub struct VerificationStatusParams {
    pub msisdn: String,
    pub verified: Option<bool>,
    pub sent: Option<bool>,
}

impl VerificationStatusParams {
    pub fn new(msisdn: impl Into<String>) -> Self {
        Self {
            msisdn: msisdn.into(),
            verified: None,
            sent: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verifications {
    #[serde(default)]
    pub verifications: Vec<Verification>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msisdn: Option<String>,
    #[serde(default)]
    pub verified: bool,
    /// Milliseconds since the Unix epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<i64>,
    /// Milliseconds since the Unix epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_type_keeps_exact_case() {
        let template = TfaMessageTemplate {
            pin_type: PinType::Numeric,
            message_text: "Your pin is {{pin}}".to_owned(),
            pin_length: 4,
            ..Default::default()
        };
        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["pinType"], "NUMERIC");
        assert!(json.get("repeatDTMF").is_none());
        assert!(template.validate().is_ok());
    }

    #[test]
    fn template_requires_pin_placeholder_and_known_type() {
        let template = TfaMessageTemplate {
            pin_type: PinType::from("HEX2"),
            message_text: "Your code".to_owned(),
            pin_length: 0,
            ..Default::default()
        };
        let err = template.validate().unwrap_err();
        assert!(err.has_field("pinType"));
        assert!(err.has_field("messageText"));
        assert!(err.has_field("pinLength"));
    }

    #[test]
    fn configuration_limits_are_checked() {
        let mut app = TfaApplication {
            name: "2fa app".to_owned(),
            configuration: Some(TfaConfiguration {
                pin_attempts: Some(10),
                pin_time_to_live: Some("15m".to_owned()),
                verify_pin_limit: Some("1/3s".to_owned()),
                send_pin_per_application_limit: Some("10000/1d".to_owned()),
                send_pin_per_phone_number_limit: Some("3/1d".to_owned()),
                ..Default::default()
            }),
            enabled: Some(true),
            ..Default::default()
        };
        assert!(app.validate().is_ok());

        if let Some(config) = app.configuration.as_mut() {
            config.pin_time_to_live = Some("15 minutes".to_owned());
            config.verify_pin_limit = Some("often".to_owned());
        }
        let err = app.validate().unwrap_err();
        assert!(err.has_field("configuration.pinTimeToLive"));
        assert!(err.has_field("configuration.verifyPinLimit"));
    }

    #[test]
    fn send_pin_serializes_placeholders() {
        let request = SendPinRequest {
            application_id: "HJ675435E3A6EA43432G5F37A635KJ8B".to_owned(),
            message_id: "0130269F44AFD07AEBC2FEFEB30398A0".to_owned(),
            to: "41793026727".to_owned(),
            placeholders: BTreeMap::from([("firstName".to_owned(), "John".to_owned())]),
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["placeholders"]["firstName"], "John");
        assert!(json.get("from").is_none());
    }

    #[test]
    fn verification_decodes() {
        let json = r#"{"pinId":"9C817C6F8AF3D48F9FE553282AFA2B67","msisdn":"41793026727","verified":true,"attemptsRemaining":0}"#;
        let result: PinVerification = serde_json::from_str(json).unwrap();
        assert!(result.verified);
        assert_eq!(result.attempts_remaining, Some(0));
    }

    #[test]
    fn payloads_round_trip() {
        use crate::domain::tests::assert_round_trip;

        assert_round_trip(&TfaApplication {
            application_id: Some("HJ675435E3A6EA43432G5F37A635KJ8B".to_owned()),
            name: "2fa test application".to_owned(),
            configuration: Some(TfaConfiguration {
                pin_attempts: Some(10),
                allow_multiple_pin_verifications: Some(true),
                pin_time_to_live: Some("15m".to_owned()),
                verify_pin_limit: Some("1/3s".to_owned()),
                send_pin_per_application_limit: Some("100/1d".to_owned()),
                send_pin_per_phone_number_limit: Some("10/1d".to_owned()),
            }),
            enabled: Some(true),
        });
        for pin_type in [PinType::Hex, PinType::Other("EMOJI".to_owned())] {
            assert_round_trip(&TfaMessageTemplate {
                message_id: Some("9C817C6F8AF3D48F9FE553282AFA2B67".to_owned()),
                application_id: Some("HJ675435E3A6EA43432G5F37A635KJ8B".to_owned()),
                pin_type,
                message_text: "Your pin is {{pin}}".to_owned(),
                pin_length: 4,
                pin_placeholder: Some("{{pin}}".to_owned()),
                language: Some("en".to_owned()),
                sender_id: Some("Infobip 2FA".to_owned()),
                repeat_dtmf: Some("1#".to_owned()),
                speech_rate: Some(1.5),
            });
        }

        let placeholders = BTreeMap::from([("firstName".to_owned(), "John".to_owned())]);
        assert_round_trip(&SendPinRequest {
            application_id: "app".to_owned(),
            message_id: "msg".to_owned(),
            from: Some("Infobip 2FA".to_owned()),
            to: "41793026727".to_owned(),
            placeholders: placeholders.clone(),
        });
        assert_round_trip(&ResendPinRequest { placeholders });
        assert_round_trip(&PinSent {
            pin_id: Some("9C817C6F8AF3D48F9FE553282AFA2B68".to_owned()),
            to: Some("41793026727".to_owned()),
            nc_status: Some("NC_DESTINATION_REACHABLE".to_owned()),
            sms_status: Some("MESSAGE_SENT".to_owned()),
            call_status: None,
        });
        assert_round_trip(&VerifyPinRequest { pin: "1598".to_owned() });
        assert_round_trip(&PinVerification {
            pin_id: Some("9C817C6F8AF3D48F9FE553282AFA2B68".to_owned()),
            msisdn: Some("41793026727".to_owned()),
            verified: false,
            attempts_remaining: Some(2),
            pin_error: Some("WRONG_PIN".to_owned()),
        });
        assert_round_trip(&Verifications {
            verifications: vec![
                Verification {
                    msisdn: Some("41793026727".to_owned()),
                    verified: true,
                    verified_at: Some(1_418_364_366),
                    sent_at: Some(1_418_364_246),
                },
                Verification {
                    msisdn: Some("41793026727".to_owned()),
                    ..Default::default()
                },
            ],
        });
    }
}
