//! Email payloads. The fully featured send is a multipart form with repeated
//! recipient fields and file attachments.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::client::{MultipartBody, Part};
use crate::domain::validation::{FieldPath, Validate, Violations};
use crate::domain::value::{MessageError, MessagePrice, MessageStatus, SentMessage, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq)]
/// File sent as an `attachment` or `inlineImage` part.
pub struct EmailFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Body of `POST /email/3/send`.
pub struct EmailRequest {
    /// Sender, either `jane@example.com` or `Jane Doe <jane@example.com>`.
    pub from: String,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: Option<String>,
    pub text: Option<String>,
    pub html: Option<String>,
    pub amp_html: Option<String>,
    pub template_id: Option<i64>,
    pub attachments: Vec<EmailFile>,
    pub inline_images: Vec<EmailFile>,
    pub intermediate_report: Option<bool>,
    pub notify_url: Option<String>,
    pub notify_content_type: Option<String>,
    pub callback_data: Option<String>,
    pub track: Option<bool>,
    pub track_clicks: Option<bool>,
    pub track_opens: Option<bool>,
    pub tracking_url: Option<String>,
    pub bulk_id: Option<String>,
    pub message_id: Option<String>,
    pub reply_to: Option<String>,
    pub default_placeholders: Option<String>,
    pub preserve_recipients: Option<bool>,
    pub send_at: Option<Timestamp>,
    pub landing_page_placeholders: Option<String>,
    pub landing_page_id: Option<String>,
}

fn push_text(parts: &mut Vec<Part>, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        parts.push(Part::text(name, value));
    }
}

fn push_flag(parts: &mut Vec<Part>, name: &str, value: Option<bool>) {
    if let Some(value) = value {
        parts.push(Part::text(name, value.to_string()));
    }
}

impl MultipartBody for EmailRequest {
    fn to_parts(&self) -> Result<Vec<Part>, serde_json::Error> {
        let mut parts = vec![Part::text("from", self.from.as_str())];
        for (name, recipients) in [("to", &self.to), ("cc", &self.cc), ("bcc", &self.bcc)] {
            parts.extend(recipients.iter().map(|address| Part::text(name, address.as_str())));
        }
        push_text(&mut parts, "subject", self.subject.as_deref());
        push_text(&mut parts, "text", self.text.as_deref());
        push_text(&mut parts, "html", self.html.as_deref());
        push_text(&mut parts, "ampHtml", self.amp_html.as_deref());
        if let Some(template_id) = self.template_id {
            parts.push(Part::text("templateId", template_id.to_string()));
        }
        for (name, files) in [("attachment", &self.attachments), ("inlineImage", &self.inline_images)] {
            parts.extend(files.iter().map(|file| {
                Part::file(
                    name,
                    file.file_name.as_str(),
                    file.content_type.clone(),
                    file.data.clone(),
                )
            }));
        }
        push_flag(&mut parts, "intermediateReport", self.intermediate_report);
        push_text(&mut parts, "notifyUrl", self.notify_url.as_deref());
        push_text(&mut parts, "notifyContentType", self.notify_content_type.as_deref());
        push_text(&mut parts, "callbackData", self.callback_data.as_deref());
        push_flag(&mut parts, "track", self.track);
        push_flag(&mut parts, "trackClicks", self.track_clicks);
        push_flag(&mut parts, "trackOpens", self.track_opens);
        push_text(&mut parts, "trackingUrl", self.tracking_url.as_deref());
        push_text(&mut parts, "bulkId", self.bulk_id.as_deref());
        push_text(&mut parts, "messageId", self.message_id.as_deref());
        push_text(&mut parts, "replyTo", self.reply_to.as_deref());
        push_text(&mut parts, "defaultPlaceholders", self.default_placeholders.as_deref());
        push_flag(&mut parts, "preserveRecipients", self.preserve_recipients);
        if let Some(send_at) = self.send_at {
            parts.push(Part::text("sendAt", send_at.to_string()));
        }
        push_text(&mut parts, "landingPagePlaceholders", self.landing_page_placeholders.as_deref());
        push_text(&mut parts, "landingPageId", self.landing_page_id.as_deref());
        Ok(parts)
    }
}

impl Validate for EmailRequest {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        violations.not_blank(&path.field("from"), &self.from);
        violations.not_empty(&path.field("to"), &self.to);
        for (name, recipients) in [("to", &self.to), ("cc", &self.cc), ("bcc", &self.bcc)] {
            for (idx, address) in recipients.iter().enumerate() {
                violations.not_blank(&path.field(name).index(idx), address);
            }
        }
        if self.template_id.is_none() {
            violations.required_text(&path.field("subject"), self.subject.as_deref());
            if self.text.is_none() && self.html.is_none() {
                violations.push(&path.field("text"), "required", "text or html must be provided");
            }
        }
        for (name, files) in [("attachment", &self.attachments), ("inlineImage", &self.inline_images)] {
            for (idx, file) in files.iter().enumerate() {
                let item = path.field(name).index(idx);
                violations.not_blank(&item.field("fileName"), &file.file_name);
                violations.optional_media_type(&item.field("contentType"), file.content_type.as_deref());
            }
        }
        violations.optional_url(&path.field("notifyUrl"), self.notify_url.as_deref());
        violations.optional_url(&path.field("trackingUrl"), self.tracking_url.as_deref());
        violations.optional_length(&path.field("callbackData"), self.callback_data.as_deref(), 0, 4000);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_id: Option<String>,
    #[serde(default)]
    pub messages: Vec<SentMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Query of `GET /email/1/reports`.
pub struct EmailReportsParams {
    pub bulk_id: Option<String>,
    pub message_id: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailReports {
    #[serde(default)]
    pub results: Vec<EmailReport>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<MessagePrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<MessageError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Query of `GET /email/1/logs`.
pub struct EmailLogsParams {
    pub message_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub bulk_id: Option<String>,
    pub general_status: Option<String>,
    pub sent_since: Option<Timestamp>,
    pub sent_until: Option<Timestamp>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailLogs {
    #[serde(default)]
    pub results: Vec<EmailLog>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailLog {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<MessagePrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Body of `POST /email/2/validation`.
pub struct AddressValidationRequest {
    pub to: String,
}

impl Validate for AddressValidationRequest {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        violations.not_blank(&path.field("to"), &self.to);
        if !self.to.contains('@') {
            violations.push(&path.field("to"), "email", "must be a well-formed email address");
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressValidation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_mailbox: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_syntax: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catch_all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub did_you_mean: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disposable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_based: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
