//! MMS payloads. Sends are `multipart/form-data`; reports are JSON.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::client::{MultipartBody, Part};
use crate::domain::sms::DeliveryTimeWindow;
use crate::domain::validation::{FieldPath, Validate, Violations};
use crate::domain::value::{MessageError, MessagePrice, MessageStatus, SentMessage, Timestamp};

/// Longest MMS validity period accepted, in minutes.
pub const MAX_VALIDITY_PERIOD_MINUTES: u32 = 2880;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Envelope fields of an MMS, sent as the JSON `head` part.
pub struct MmsHead {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_period_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediate_report: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_time_window: Option<DeliveryTimeWindow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Binary attachment uploaded with the message.
pub struct MmsMedia {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Media fetched by the platform from a public URL.
pub struct ExternalMedia {
    pub content_type: String,
    pub content_id: String,
    pub content_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Body of `POST /mms/1/single`.
pub struct MmsRequest {
    pub head: MmsHead,
    pub text: Option<String>,
    pub media: Option<MmsMedia>,
    pub externally_hosted_media: Vec<ExternalMedia>,
}

impl MultipartBody for MmsRequest {
    fn to_parts(&self) -> Result<Vec<Part>, serde_json::Error> {
        let mut parts = vec![Part::json("head", &self.head)?];
        if let Some(text) = &self.text {
            parts.push(Part::text("text", text.as_str()));
        }
        if let Some(media) = &self.media {
            parts.push(Part::file(
                "media",
                media.file_name.as_str(),
                media.content_type.clone(),
                media.data.clone(),
            ));
        }
        if !self.externally_hosted_media.is_empty() {
            parts.push(Part::json("externallyHostedMedia", &self.externally_hosted_media)?);
        }
        Ok(parts)
    }
}

impl Validate for MmsRequest {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        let head = path.field("head");
        violations.not_blank(&head.field("from"), &self.head.from);
        violations.not_blank(&head.field("to"), &self.head.to);
        violations.optional_length(&head.field("callbackData"), self.head.callback_data.as_deref(), 0, 200);
        violations.optional_url(&head.field("notifyUrl"), self.head.notify_url.as_deref());
        if let Some(minutes) = self.head.validity_period_minutes {
            violations.range(&head.field("validityPeriodMinutes"), minutes, 1, MAX_VALIDITY_PERIOD_MINUTES);
        }
        if let Some(media) = &self.media {
            violations.not_blank(&path.field("media").field("fileName"), &media.file_name);
            violations.optional_media_type(&path.field("media").field("contentType"), media.content_type.as_deref());
        }
        for (idx, media) in self.externally_hosted_media.iter().enumerate() {
            let item = path.field("externallyHostedMedia").index(idx);
            violations.media_type(&item.field("contentType"), &media.content_type);
            violations.not_blank(&item.field("contentId"), &media.content_id);
            violations.url(&item.field("contentUrl"), &media.content_url);
        }
        if self.text.is_none() && self.media.is_none() && self.externally_hosted_media.is_empty() {
            violations.push(path, "required", "text or media must be provided");
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MmsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_id: Option<String>,
    #[serde(default)]
    pub messages: Vec<SentMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Query of `GET /mms/1/reports`.
pub struct MmsReportsParams {
    pub bulk_id: Option<String>,
    pub message_id: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MmsReports {
    #[serde(default)]
    pub results: Vec<MmsReport>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MmsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mms_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcc_mnc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<MessagePrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<MessageError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MmsInbound {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_message_count: Option<u32>,
    #[serde(default)]
    pub results: Vec<InboundMms>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundMms {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mms_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<MessagePrice>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::PartValue;

    fn request() -> MmsRequest {
        MmsRequest {
            head: MmsHead {
                from: "InfoMMS".to_owned(),
                to: "41793026727".to_owned(),
                subject: Some("Hi".to_owned()),
                ..Default::default()
            },
            text: Some("Look at this".to_owned()),
            media: Some(MmsMedia {
                file_name: "cat.png".to_owned(),
                content_type: Some("image/png".to_owned()),
                data: Bytes::from_static(b"\x89PNG"),
            }),
            externally_hosted_media: Vec::new(),
        }
    }

    #[test]
    fn parts_follow_form_layout() {
        let parts = request().to_parts().unwrap();
        let names: Vec<_> = parts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["head", "text", "media"]);

        match &parts[0].value {
            PartValue::Binary { data, content_type, .. } => {
                assert_eq!(content_type.as_deref(), Some("application/json"));
                assert_eq!(
                    &data[..],
                    br#"{"from":"InfoMMS","to":"41793026727","subject":"Hi"}"#
                );
            }
            other => panic!("unexpected head part: {other:?}"),
        }
        match &parts[2].value {
            PartValue::Binary { file_name, .. } => assert_eq!(file_name.as_deref(), Some("cat.png")),
            other => panic!("unexpected media part: {other:?}"),
        }
    }

    #[test]
    fn external_media_is_one_json_part() {
        let request = MmsRequest {
            media: None,
            externally_hosted_media: vec![ExternalMedia {
                content_type: "image/jpeg".to_owned(),
                content_id: "img1".to_owned(),
                content_url: "https://cdn.example.com/a.jpg".to_owned(),
            }],
            ..request()
        };
        let parts = request.to_parts().unwrap();
        assert_eq!(parts.last().map(|p| p.name.as_str()), Some("externallyHostedMedia"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn validation_checks_head_and_content() {
        let request = MmsRequest {
            head: MmsHead {
                to: " ".to_owned(),
                validity_period_minutes: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = request.validate().unwrap_err();
        assert!(err.has_field("head.from"));
        assert!(err.has_field("head.to"));
        assert!(err.has_field("head.validityPeriodMinutes"));
        assert!(err.has_field(""));
    }

    #[test]
    fn media_content_types_must_parse() {
        let mut request = request();
        if let Some(media) = request.media.as_mut() {
            media.content_type = Some("image png".to_owned());
        }
        request.externally_hosted_media.push(ExternalMedia {
            content_type: "video".to_owned(),
            content_id: "clip".to_owned(),
            content_url: "https://example.com/clip.mp4".to_owned(),
        });
        let err = request.validate().unwrap_err();
        assert!(err.has_field("media.contentType"));
        assert!(err.has_field("externallyHostedMedia[0].contentType"));
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn payloads_round_trip() {
        use crate::domain::sms::TimeOfDay;
        use crate::domain::tests::assert_round_trip;

        let at = Timestamp::parse("2024-01-31T12:00:00.000+0100").expect("timestamp");
        assert_round_trip(&MmsHead {
            from: "InfoMMS".to_owned(),
            to: "41793026727".to_owned(),
            id: Some("mms-1".to_owned()),
            subject: Some("Hi".to_owned()),
            validity_period_minutes: Some(MAX_VALIDITY_PERIOD_MINUTES),
            callback_data: Some("cb".to_owned()),
            notify_url: Some("https://example.com/dlr".to_owned()),
            send_at: Some(at),
            intermediate_report: Some(true),
            delivery_time_window: Some(DeliveryTimeWindow {
                days: vec!["SATURDAY".to_owned()],
                from: Some(TimeOfDay { hour: 9, minute: 0 }),
                to: None,
            }),
        });
        assert_round_trip(&ExternalMedia {
            content_type: "image/jpeg".to_owned(),
            content_id: "photo".to_owned(),
            content_url: "https://example.com/photo.jpg".to_owned(),
        });
        assert_round_trip(&MmsResponse {
            bulk_id: Some("bulk-1".to_owned()),
            messages: vec![SentMessage {
                to: Some("41793026727".to_owned()),
                message_id: Some("mms-1".to_owned()),
                ..Default::default()
            }],
            error_message: Some("partially accepted".to_owned()),
        });

        let price = MessagePrice {
            price_per_message: Some(0.25),
            currency: Some("EUR".to_owned()),
        };
        assert_round_trip(&MmsReports {
            results: vec![MmsReport {
                bulk_id: Some("bulk-1".to_owned()),
                message_id: Some("mms-1".to_owned()),
                to: Some("41793026727".to_owned()),
                from: Some("InfoMMS".to_owned()),
                sent_at: Some(at),
                done_at: Some(at),
                mms_count: Some(1),
                mcc_mnc: Some("22801".to_owned()),
                callback_data: None,
                price: Some(price.clone()),
                status: Some(MessageStatus {
                    group_id: Some(3),
                    name: Some("DELIVERED_TO_HANDSET".to_owned()),
                    ..Default::default()
                }),
                error: Some(MessageError {
                    id: Some(0),
                    permanent: Some(false),
                    ..Default::default()
                }),
            }],
        });
        assert_round_trip(&MmsInbound {
            message_count: Some(1),
            pending_message_count: Some(2),
            results: vec![InboundMms {
                message_id: Some("in-1".to_owned()),
                from: Some("41793026727".to_owned()),
                to: Some("41793026700".to_owned()),
                message: Some("{\"text\":\"hello\"}".to_owned()),
                received_at: Some(at),
                mms_count: Some(1),
                callback_data: Some("cb".to_owned()),
                price: Some(price),
            }],
        });
    }
}
