//! RCS payloads. A single send answers with one object, a bulk send with a top-level
//! array.

use serde::{Deserialize, Serialize};

use crate::domain::sms::TimeUnit;
use crate::domain::validation::{FieldPath, Validate, Violations};
use crate::domain::value::{SentMessage, open_enum};

const MAX_TEXT: usize = 1000;
const MAX_SUGGESTION_TEXT: usize = 25;
const MAX_POSTBACK: usize = 2048;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /ott/rcs/1/message`, and one element of a bulk send.
pub struct RcsMessage {
    pub from: String,
    pub to: String,
    pub content: RcsContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_period_time_unit: Option<TimeUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_failover: Option<SmsFailover>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
}

impl RcsMessage {
    pub fn new(from: impl Into<String>, to: impl Into<String>, content: RcsContent) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            content,
            message_id: None,
            validity_period: None,
            validity_period_time_unit: None,
            sms_failover: None,
            notify_url: None,
            callback_data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum RcsContent {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        suggestions: Vec<Suggestion>,
    },
    File {
        file: Resource,
        #[serde(skip_serializing_if = "Option::is_none")]
        thumbnail: Option<Resource>,
    },
    Card {
        #[serde(skip_serializing_if = "Option::is_none")]
        orientation: Option<CardOrientation>,
        #[serde(skip_serializing_if = "Option::is_none")]
        alignment: Option<CardAlignment>,
        content: CardContent,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        suggestions: Vec<Suggestion>,
    },
    Carousel {
        card_width: CardWidth,
        contents: Vec<CardContent>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        suggestions: Vec<Suggestion>,
    },
}

impl RcsContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            suggestions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<CardMedia>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMedia {
    pub file: Resource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Resource>,
    pub height: MediaHeight,
}

open_enum! {
    pub enum CardOrientation {
        Horizontal => "HORIZONTAL",
        Vertical => "VERTICAL",
    }
}

open_enum! {
    pub enum CardAlignment {
        Left => "LEFT",
        Right => "RIGHT",
    }
}

open_enum! {
    pub enum CardWidth {
        Small => "SMALL",
        Medium => "MEDIUM",
    }
}

open_enum! {
    pub enum MediaHeight {
        Short => "SHORT",
        Medium => "MEDIUM",
        Tall => "TALL",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
/// Suggested reply or action shown under a message.
pub enum Suggestion {
    Reply {
        text: String,
        postback_data: String,
    },
    OpenUrl {
        text: String,
        postback_data: String,
        url: String,
    },
    DialPhone {
        text: String,
        postback_data: String,
        phone_number: String,
    },
    ShowLocation {
        text: String,
        postback_data: String,
        latitude: f64,
        longitude: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    RequestLocation {
        text: String,
        postback_data: String,
    },
}

impl Suggestion {
    fn text(&self) -> &str {
        match self {
            Self::Reply { text, .. }
            | Self::OpenUrl { text, .. }
            | Self::DialPhone { text, .. }
            | Self::ShowLocation { text, .. }
            | Self::RequestLocation { text, .. } => text,
        }
    }

    fn postback_data(&self) -> &str {
        match self {
            Self::Reply { postback_data, .. }
            | Self::OpenUrl { postback_data, .. }
            | Self::DialPhone { postback_data, .. }
            | Self::ShowLocation { postback_data, .. }
            | Self::RequestLocation { postback_data, .. } => postback_data,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// SMS sent instead when the recipient cannot receive RCS.
pub struct SmsFailover {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_period_time_unit: Option<TimeUnit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Body of `POST /ott/rcs/1/message/bulk`.
pub struct RcsBulkRequest {
    pub messages: Vec<RcsMessage>,
}

/// Response of a single send.
pub type RcsResponse = SentMessage;

/// Response of a bulk send: one entry per message, in request order.
pub type RcsBulkResponse = Vec<SentMessage>;

fn validate_suggestions(suggestions: &[Suggestion], max: usize, path: &FieldPath, violations: &mut Violations) {
    violations.max_items(path, suggestions, max);
    for (idx, suggestion) in suggestions.iter().enumerate() {
        let item = path.index(idx);
        violations.not_blank(&item.field("text"), suggestion.text());
        violations.length(&item.field("text"), suggestion.text(), 1, MAX_SUGGESTION_TEXT);
        violations.not_blank(&item.field("postbackData"), suggestion.postback_data());
        violations.length(&item.field("postbackData"), suggestion.postback_data(), 1, MAX_POSTBACK);
        match suggestion {
            Suggestion::OpenUrl { url, .. } => violations.url(&item.field("url"), url),
            Suggestion::DialPhone { phone_number, .. } => {
                violations.not_blank(&item.field("phoneNumber"), phone_number);
            }
            Suggestion::ShowLocation {
                latitude, longitude, ..
            } => {
                violations.range(&item.field("latitude"), *latitude, -90.0, 90.0);
                violations.range(&item.field("longitude"), *longitude, -180.0, 180.0);
            }
            Suggestion::Reply { .. } | Suggestion::RequestLocation { .. } => {}
        }
    }
}

fn validate_card(card: &CardContent, path: &FieldPath, violations: &mut Violations) {
    violations.optional_length(&path.field("title"), card.title.as_deref(), 1, 200);
    violations.optional_length(&path.field("description"), card.description.as_deref(), 1, 2000);
    if let Some(media) = &card.media {
        violations.url(&path.field("media").field("file").field("url"), &media.file.url);
        if let Some(thumbnail) = &media.thumbnail {
            violations.url(&path.field("media").field("thumbnail").field("url"), &thumbnail.url);
        }
    }
    validate_suggestions(&card.suggestions, 4, &path.field("suggestions"), violations);
}

impl Validate for RcsContent {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        match self {
            Self::Text { text, suggestions } => {
                violations.not_blank(&path.field("text"), text);
                violations.length(&path.field("text"), text, 1, MAX_TEXT);
                validate_suggestions(suggestions, 11, &path.field("suggestions"), violations);
            }
            Self::File { file, thumbnail } => {
                violations.url(&path.field("file").field("url"), &file.url);
                if let Some(thumbnail) = thumbnail {
                    violations.url(&path.field("thumbnail").field("url"), &thumbnail.url);
                }
            }
            Self::Card {
                content, suggestions, ..
            } => {
                validate_card(content, &path.field("content"), violations);
                validate_suggestions(suggestions, 11, &path.field("suggestions"), violations);
            }
            Self::Carousel {
                contents,
                suggestions,
                ..
            } => {
                let path_contents = path.field("contents");
                if contents.len() < 2 || contents.len() > 10 {
                    violations.push(&path_contents, "length", "size must be between 2 and 10");
                }
                for (idx, card) in contents.iter().enumerate() {
                    validate_card(card, &path_contents.index(idx), violations);
                }
                validate_suggestions(suggestions, 11, &path.field("suggestions"), violations);
            }
        }
    }
}

impl Validate for RcsMessage {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        violations.not_blank(&path.field("from"), &self.from);
        violations.not_blank(&path.field("to"), &self.to);
        self.content.validate_at(&path.field("content"), violations);
        violations.optional_url(&path.field("notifyUrl"), self.notify_url.as_deref());
        violations.optional_length(&path.field("callbackData"), self.callback_data.as_deref(), 0, 4000);
        if let Some(failover) = &self.sms_failover {
            violations.not_blank(&path.field("smsFailover").field("text"), &failover.text);
        }
    }
}

impl Validate for RcsBulkRequest {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        violations.not_empty(&path.field("messages"), &self.messages);
        self.messages.validate_at(&path.field("messages"), violations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_is_tagged_by_type() {
        let message = RcsMessage::new(
            "myRcsSender",
            "385977666618",
            RcsContent::Text {
                text: "Pick one".to_owned(),
                suggestions: vec![Suggestion::OpenUrl {
                    text: "Docs".to_owned(),
                    postback_data: "docs".to_owned(),
                    url: "https://www.infobip.com".to_owned(),
                }],
            },
        );
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "from": "myRcsSender",
                "to": "385977666618",
                "content": {
                    "type": "TEXT",
                    "text": "Pick one",
                    "suggestions": [{
                        "type": "OPEN_URL",
                        "text": "Docs",
                        "postbackData": "docs",
                        "url": "https://www.infobip.com"
                    }]
                }
            })
        );
        assert!(message.validate().is_ok());
    }

    #[test]
    fn carousel_uses_camel_case_fields() {
        let content = RcsContent::Carousel {
            card_width: CardWidth::Medium,
            contents: vec![CardContent::default(), CardContent::default()],
            suggestions: Vec::new(),
        };
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["type"], "CAROUSEL");
        assert_eq!(json["cardWidth"], "MEDIUM");
        assert_eq!(json["contents"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn validation_walks_content_and_suggestions() {
        let message = RcsMessage::new(
            "sender",
            "",
            RcsContent::Text {
                text: String::new(),
                suggestions: vec![Suggestion::Reply {
                    text: "this suggestion text is far too long".to_owned(),
                    postback_data: "x".to_owned(),
                }],
            },
        );
        let err = message.validate().unwrap_err();
        assert!(err.has_field("to"));
        assert!(err.has_field("content.text"));
        assert!(err.has_field("content.suggestions[0].text"));
    }

    #[test]
    fn carousel_needs_two_cards() {
        let content = RcsContent::Carousel {
            card_width: CardWidth::Small,
            contents: vec![CardContent::default()],
            suggestions: Vec::new(),
        };
        let err = content.validate().unwrap_err();
        assert!(err.has_field("contents"));
    }

    #[test]
    fn bulk_response_is_a_top_level_array() {
        let json = r#"[{"to":"385977666618","messageCount":1,"messageId":"m1","status":{"groupId":1,"groupName":"PENDING"}},{"to":"385977666619","messageId":"m2"}]"#;
        let response: RcsBulkResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.len(), 2);
        assert_eq!(response[1].message_id.as_deref(), Some("m2"));

        let single: RcsResponse = serde_json::from_str(r#"{"to":"385977666618","messageId":"m1"}"#).unwrap();
        assert_eq!(single.message_id.as_deref(), Some("m1"));
    }

    #[test]
    fn payloads_round_trip() {
        use crate::domain::tests::assert_round_trip;

        let card = CardContent {
            title: Some("Coffee".to_owned()),
            description: Some("Freshly roasted".to_owned()),
            media: Some(CardMedia {
                file: Resource {
                    url: "https://example.com/coffee.png".to_owned(),
                },
                thumbnail: Some(Resource {
                    url: "https://example.com/coffee-thumb.png".to_owned(),
                }),
                height: MediaHeight::Tall,
            }),
            suggestions: vec![Suggestion::Reply {
                text: "Order".to_owned(),
                postback_data: "order".to_owned(),
            }],
        };
        let suggestions = vec![
            Suggestion::OpenUrl {
                text: "Menu".to_owned(),
                postback_data: "menu".to_owned(),
                url: "https://example.com/menu".to_owned(),
            },
            Suggestion::DialPhone {
                text: "Call".to_owned(),
                postback_data: "call".to_owned(),
                phone_number: "385977666618".to_owned(),
            },
            Suggestion::ShowLocation {
                text: "Shop".to_owned(),
                postback_data: "shop".to_owned(),
                latitude: 45.5,
                longitude: 15.75,
                label: Some("Main square".to_owned()),
            },
            Suggestion::RequestLocation {
                text: "Share".to_owned(),
                postback_data: "share".to_owned(),
            },
        ];

        let contents = [
            RcsContent::Text {
                text: "Hello".to_owned(),
                suggestions: suggestions.clone(),
            },
            RcsContent::File {
                file: Resource {
                    url: "https://example.com/a.pdf".to_owned(),
                },
                thumbnail: None,
            },
            RcsContent::Card {
                orientation: Some(CardOrientation::Horizontal),
                alignment: Some(CardAlignment::Other("CENTER".to_owned())),
                content: card.clone(),
                suggestions: Vec::new(),
            },
            RcsContent::Carousel {
                card_width: CardWidth::Medium,
                contents: vec![card.clone(), card],
                suggestions,
            },
        ];
        for content in &contents {
            assert_round_trip(content);
        }

        let message = RcsMessage {
            message_id: Some("m-1".to_owned()),
            validity_period: Some(15),
            validity_period_time_unit: Some(TimeUnit::Minute),
            sms_failover: Some(SmsFailover {
                from: Some("InfoSMS".to_owned()),
                text: "Hello over SMS".to_owned(),
                validity_period: Some(2),
                validity_period_time_unit: Some(TimeUnit::Hour),
            }),
            notify_url: Some("https://example.com/dlr".to_owned()),
            callback_data: Some("cb".to_owned()),
            ..RcsMessage::new("myRcsSender", "385977666618", contents[0].clone())
        };
        assert_round_trip(&RcsBulkRequest {
            messages: vec![message, RcsMessage::new("myRcsSender", "385977666619", contents[3].clone())],
        });
    }
}
