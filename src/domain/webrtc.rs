//! WebRTC tokens and applications.

use serde::{Deserialize, Serialize};

use crate::domain::validation::{FieldPath, Validate, Violations};
use crate::domain::value::open_enum;

/// Longest token lifetime accepted, in seconds.
pub const MAX_TOKEN_TTL_SECONDS: u32 = 86_400;

open_enum! {
    /// Call recording policy granted with a token.
    pub enum RecordingMode {
        Always => "ALWAYS",
        OnDemand => "ON_DEMAND",
        Disabled => "DISABLED",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording: Option<RecordingMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /webrtc/1/token`.
pub struct TokenRequest {
    /// Caller identity: 3 to 64 characters from letters, digits, and `-_.=@+`.
    pub identity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<TokenCapabilities>,
    /// Seconds, at most [`MAX_TOKEN_TTL_SECONDS`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_live: Option<u32>,
}

impl TokenRequest {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            ..Default::default()
        }
    }
}

impl Validate for TokenRequest {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        let identity = path.field("identity");
        violations.length(&identity, &self.identity, 3, 64);
        if !self
            .identity
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_.=@+".contains(c))
        {
            violations.push(&identity, "pattern", "must contain letters, digits, and -_.=@+ only");
        }
        violations.optional_length(&path.field("displayName"), self.display_name.as_deref(), 5, 50);
        if let Some(ttl) = self.time_to_live {
            violations.range(&path.field("timeToLive"), ttl, 1, MAX_TOKEN_TTL_SECONDS);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<String>,
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IosConfig {
    pub apns_certificate_file_name: String,
    /// Base64 encoded certificate.
    pub apns_certificate_file_content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apns_certificate_password: Option<String>,
}

impl std::fmt::Debug for IosConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IosConfig")
            .field("apns_certificate_file_name", &self.apns_certificate_file_name)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidConfig {
    pub fcm_server_key: String,
}

impl std::fmt::Debug for AndroidConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AndroidConfig { .. }")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A WebRTC application. `id` is assigned by the platform.
pub struct WebRtcApplication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ios: Option<IosConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_to_app: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_to_conversations: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_to_phone: Option<bool>,
}

impl Validate for WebRtcApplication {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        violations.not_blank(&path.field("name"), &self.name);
        violations.length(&path.field("name"), &self.name, 1, 255);
        violations.optional_length(&path.field("description"), self.description.as_deref(), 0, 160);
        if let Some(ios) = &self.ios {
            let ios_path = path.field("ios");
            violations.not_blank(&ios_path.field("apnsCertificateFileName"), &ios.apns_certificate_file_name);
            violations.not_blank(&ios_path.field("apnsCertificateFileContent"), &ios.apns_certificate_file_content);
        }
        if let Some(android) = &self.android {
            violations.not_blank(&path.field("android").field("fcmServerKey"), &android.fcm_server_key);
        }
    }
}

/// Response of `GET /webrtc/1/applications`.
pub type WebRtcApplications = Vec<WebRtcApplication>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_request_bounds() {
        assert!(TokenRequest::new("alice").validate().is_ok());

        let err = TokenRequest {
            identity: "al".to_owned(),
            time_to_live: Some(MAX_TOKEN_TTL_SECONDS + 1),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(err.has_field("identity"));
        assert!(err.has_field("timeToLive"));

        let err = TokenRequest::new("alice smith").validate().unwrap_err();
        assert_eq!(err.violations()[0].rule, "pattern");
    }

    #[test]
    fn token_request_wire_shape() {
        let request = TokenRequest {
            identity: "alice".to_owned(),
            capabilities: Some(TokenCapabilities {
                recording: Some(RecordingMode::OnDemand),
            }),
            time_to_live: Some(43200),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "identity": "alice",
                "capabilities": {"recording": "ON_DEMAND"},
                "timeToLive": 43200
            })
        );
    }

    #[test]
    fn application_secrets_stay_out_of_debug() {
        let app = WebRtcApplication {
            name: "demo".to_owned(),
            android: Some(AndroidConfig {
                fcm_server_key: "AAAA-server-key".to_owned(),
            }),
            ios: Some(IosConfig {
                apns_certificate_file_name: "cert.p12".to_owned(),
                apns_certificate_file_content: "MIIK".to_owned(),
                apns_certificate_password: Some("pw".to_owned()),
            }),
            ..Default::default()
        };
        let debug = format!("{app:?}");
        assert!(!debug.contains("AAAA-server-key"));
        assert!(!debug.contains("MIIK"));
        assert!(debug.contains("cert.p12"));
        assert!(app.validate().is_ok());
    }

    #[test]
    fn applications_list_is_an_array() {
        let json = r#"[{"id":"894c822b","name":"Application Name","appToApp":true}]"#;
        let apps: WebRtcApplications = serde_json::from_str(json).unwrap();
        assert_eq!(apps[0].id.as_deref(), Some("894c822b"));
        assert_eq!(apps[0].app_to_app, Some(true));
    }

    #[test]
    fn payloads_round_trip() {
        use crate::domain::tests::assert_round_trip;

        for recording in [RecordingMode::OnDemand, RecordingMode::Other("SELECTIVE".to_owned())] {
            assert_round_trip(&TokenRequest {
                identity: "alice".to_owned(),
                application_id: Some("app-1".to_owned()),
                display_name: Some("Alice".to_owned()),
                capabilities: Some(TokenCapabilities {
                    recording: Some(recording),
                }),
                time_to_live: Some(3600),
            });
        }
        assert_round_trip(&TokenResponse {
            token: "eyJhbGciOi".to_owned(),
            expiration_time: Some("2024-01-31T13:00:00.000+0000".to_owned()),
        });
        assert_round_trip(&WebRtcApplication {
            id: Some("app-1".to_owned()),
            name: "Calls".to_owned(),
            description: Some("In-app calling".to_owned()),
            ios: Some(IosConfig {
                apns_certificate_file_name: "apns.p12".to_owned(),
                apns_certificate_file_content: "MIIKPAIBAzCC".to_owned(),
                apns_certificate_password: Some("hunter2".to_owned()),
            }),
            android: Some(AndroidConfig {
                fcm_server_key: "AAAA1234".to_owned(),
            }),
            app_to_app: Some(true),
            app_to_conversations: Some(false),
            app_to_phone: Some(true),
        });
    }
}
