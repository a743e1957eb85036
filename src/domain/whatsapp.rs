//! WhatsApp payloads: one request shape per message kind, template messages, and
//! template management.

use serde::{Deserialize, Serialize};

use crate::domain::validation::{FieldPath, Validate, Violations};
use crate::domain::value::{SentMessage, open_enum};

const MAX_MEDIA_URL: usize = 2048;
const MAX_CAPTION: usize = 3000;
const MAX_BODY: usize = 1024;
const MAX_FOOTER: usize = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Addressing and callback fields shared by every session message, around the
/// kind-specific `content`.
pub struct WhatsAppRequest<C> {
    pub from: String,
    pub to: String,
    pub content: C,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
}

impl<C> WhatsAppRequest<C> {
    pub fn new(from: impl Into<String>, to: impl Into<String>, content: C) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            content,
            message_id: None,
            callback_data: None,
            notify_url: None,
        }
    }
}

impl<C: Validate> Validate for WhatsAppRequest<C> {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        violations.not_blank(&path.field("from"), &self.from);
        violations.length(&path.field("from"), &self.from, 1, 24);
        violations.not_blank(&path.field("to"), &self.to);
        violations.length(&path.field("to"), &self.to, 1, 24);
        violations.optional_length(&path.field("messageId"), self.message_id.as_deref(), 0, 50);
        violations.optional_length(&path.field("callbackData"), self.callback_data.as_deref(), 0, 4000);
        violations.optional_url(&path.field("notifyUrl"), self.notify_url.as_deref());
        self.content.validate_at(&path.field("content"), violations);
    }
}

/// Acknowledgement of a single session message.
pub type WhatsAppResponse = SentMessage;

fn media_url(path: &FieldPath, value: &str, violations: &mut Violations) {
    violations.url(path, value);
    violations.length(path, value, 1, MAX_MEDIA_URL);
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<bool>,
}

impl Validate for TextContent {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        violations.not_blank(&path.field("text"), &self.text);
        violations.length(&path.field("text"), &self.text, 1, 4096);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentContent {
    pub media_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl Validate for DocumentContent {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        media_url(&path.field("mediaUrl"), &self.media_url, violations);
        violations.optional_length(&path.field("caption"), self.caption.as_deref(), 0, MAX_CAPTION);
        violations.optional_length(&path.field("filename"), self.filename.as_deref(), 0, 240);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Image or video with an optional caption.
pub struct CaptionedMedia {
    pub media_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Validate for CaptionedMedia {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        media_url(&path.field("mediaUrl"), &self.media_url, violations);
        violations.optional_length(&path.field("caption"), self.caption.as_deref(), 0, MAX_CAPTION);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Audio or sticker, addressed by URL only.
pub struct MediaContent {
    pub media_url: String,
}

impl Validate for MediaContent {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        media_url(&path.field("mediaUrl"), &self.media_url, violations);
    }
}

pub type ImageContent = CaptionedMedia;
pub type VideoContent = CaptionedMedia;
pub type AudioContent = MediaContent;
pub type StickerContent = MediaContent;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationContent {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Validate for LocationContent {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        violations.range(&path.field("latitude"), self.latitude, -90.0, 90.0);
        violations.range(&path.field("longitude"), self.longitude, -180.0, 180.0);
        violations.optional_length(&path.field("name"), self.name.as_deref(), 0, 1000);
        violations.optional_length(&path.field("address"), self.address.as_deref(), 0, 1000);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactContent {
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: ContactName,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<ContactAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<ContactEmail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<ContactOrg>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phones: Vec<ContactPhone>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<ContactUrl>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// `first_name` and `formatted_name` are required by the platform.
pub struct ContactName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<ContactKind>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEmail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<ContactKind>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactOrg {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPhone {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<PhoneKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wa_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactUrl {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<ContactKind>,
}

open_enum! {
    pub enum ContactKind {
        Home => "HOME",
        Work => "WORK",
    }
}

open_enum! {
    pub enum PhoneKind {
        Cell => "CELL",
        Main => "MAIN",
        Iphone => "IPHONE",
        Home => "HOME",
        Work => "WORK",
    }
}

impl Validate for ContactContent {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        let contacts = path.field("contacts");
        violations.not_empty(&contacts, &self.contacts);
        for (idx, contact) in self.contacts.iter().enumerate() {
            let item = contacts.index(idx);
            let name = item.field("name");
            violations.required_text(&name.field("firstName"), contact.name.first_name.as_deref());
            violations.required_text(&name.field("formattedName"), contact.name.formatted_name.as_deref());
            for (idx, url) in contact.urls.iter().enumerate() {
                violations.optional_url(&item.field("urls").index(idx).field("url"), url.url.as_deref());
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractiveBody {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractiveFooter {
    pub text: String,
}

fn validate_body(body: &InteractiveBody, path: &FieldPath, violations: &mut Violations) {
    violations.not_blank(&path.field("text"), &body.text);
    violations.length(&path.field("text"), &body.text, 1, MAX_BODY);
}

fn validate_footer(footer: Option<&InteractiveFooter>, path: &FieldPath, violations: &mut Violations) {
    if let Some(footer) = footer {
        violations.length(&path.field("text"), &footer.text, 1, MAX_FOOTER);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum InteractiveHeader {
    Text {
        text: String,
    },
    Video {
        media_url: String,
    },
    Image {
        media_url: String,
    },
    Document {
        media_url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        filename: Option<String>,
    },
}

impl Validate for InteractiveHeader {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        match self {
            Self::Text { text } => {
                violations.not_blank(&path.field("text"), text);
                violations.length(&path.field("text"), text, 1, 60);
            }
            Self::Video { media_url: url } | Self::Image { media_url: url } => {
                media_url(&path.field("mediaUrl"), url, violations);
            }
            Self::Document {
                media_url: url,
                filename,
            } => {
                media_url(&path.field("mediaUrl"), url, violations);
                violations.optional_length(&path.field("filename"), filename.as_deref(), 0, 240);
            }
        }
    }
}

fn text_header_only(header: Option<&InteractiveHeader>, path: &FieldPath, violations: &mut Violations) {
    if let Some(header) = header {
        if !matches!(header, InteractiveHeader::Text { .. }) {
            violations.push(path, "one_of", "must be a TEXT header");
        }
        header.validate_at(path, violations);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReplyButton {
    Reply { id: String, title: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonsAction {
    pub buttons: Vec<ReplyButton>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractiveButtonsContent {
    pub body: InteractiveBody,
    pub action: ButtonsAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<InteractiveHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<InteractiveFooter>,
}

impl Validate for InteractiveButtonsContent {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        validate_body(&self.body, &path.field("body"), violations);
        let buttons = path.field("action").field("buttons");
        if self.action.buttons.is_empty() || self.action.buttons.len() > 3 {
            violations.push(&buttons, "length", "size must be between 1 and 3");
        }
        for (idx, ReplyButton::Reply { id, title }) in self.action.buttons.iter().enumerate() {
            let item = buttons.index(idx);
            violations.not_blank(&item.field("id"), id);
            violations.length(&item.field("id"), id, 1, 256);
            violations.not_blank(&item.field("title"), title);
            violations.length(&item.field("title"), title, 1, 20);
        }
        self.header.validate_at(&path.field("header"), violations);
        validate_footer(self.footer.as_ref(), &path.field("footer"), violations);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRow {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub rows: Vec<ListRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAction {
    pub title: String,
    pub sections: Vec<ListSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractiveListContent {
    pub body: InteractiveBody,
    pub action: ListAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<InteractiveHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<InteractiveFooter>,
}

impl Validate for InteractiveListContent {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        validate_body(&self.body, &path.field("body"), violations);
        let action = path.field("action");
        violations.not_blank(&action.field("title"), &self.action.title);
        violations.length(&action.field("title"), &self.action.title, 1, 20);
        let sections = action.field("sections");
        if self.action.sections.is_empty() || self.action.sections.len() > 10 {
            violations.push(&sections, "length", "size must be between 1 and 10");
        }
        for (idx, section) in self.action.sections.iter().enumerate() {
            let item = sections.index(idx);
            violations.optional_length(&item.field("title"), section.title.as_deref(), 0, 24);
            violations.not_empty(&item.field("rows"), &section.rows);
            for (idx, row) in section.rows.iter().enumerate() {
                let row_path = item.field("rows").index(idx);
                violations.not_blank(&row_path.field("id"), &row.id);
                violations.length(&row_path.field("id"), &row.id, 1, 200);
                violations.not_blank(&row_path.field("title"), &row.title);
                violations.length(&row_path.field("title"), &row.title, 1, 24);
                violations.optional_length(&row_path.field("description"), row.description.as_deref(), 0, 72);
            }
        }
        text_header_only(self.header.as_ref(), &path.field("header"), violations);
        validate_footer(self.footer.as_ref(), &path.field("footer"), violations);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAction {
    pub catalog_id: String,
    pub product_retailer_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractiveProductContent {
    pub action: ProductAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<InteractiveBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<InteractiveFooter>,
}

impl Validate for InteractiveProductContent {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        let action = path.field("action");
        violations.not_blank(&action.field("catalogId"), &self.action.catalog_id);
        violations.not_blank(&action.field("productRetailerId"), &self.action.product_retailer_id);
        if let Some(body) = &self.body {
            validate_body(body, &path.field("body"), violations);
        }
        validate_footer(self.footer.as_ref(), &path.field("footer"), violations);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub product_retailer_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiProductAction {
    pub catalog_id: String,
    pub sections: Vec<ProductSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractiveMultiProductContent {
    pub header: InteractiveHeader,
    pub body: InteractiveBody,
    pub action: MultiProductAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<InteractiveFooter>,
}

impl Validate for InteractiveMultiProductContent {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        text_header_only(Some(&self.header), &path.field("header"), violations);
        validate_body(&self.body, &path.field("body"), violations);
        let action = path.field("action");
        violations.not_blank(&action.field("catalogId"), &self.action.catalog_id);
        let sections = action.field("sections");
        if self.action.sections.is_empty() || self.action.sections.len() > 10 {
            violations.push(&sections, "length", "size must be between 1 and 10");
        }
        let multiple = self.action.sections.len() > 1;
        for (idx, section) in self.action.sections.iter().enumerate() {
            let item = sections.index(idx);
            if multiple {
                violations.required_text(&item.field("title"), section.title.as_deref());
            }
            violations.optional_length(&item.field("title"), section.title.as_deref(), 0, 24);
            violations.not_empty(&item.field("productRetailerIds"), &section.product_retailer_ids);
        }
        validate_footer(self.footer.as_ref(), &path.field("footer"), violations);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
/// Every session message kind, each posted to its own endpoint.
pub enum WhatsAppMessage {
    Text(WhatsAppRequest<TextContent>),
    Document(WhatsAppRequest<DocumentContent>),
    Image(WhatsAppRequest<ImageContent>),
    Audio(WhatsAppRequest<AudioContent>),
    Video(WhatsAppRequest<VideoContent>),
    Sticker(WhatsAppRequest<StickerContent>),
    Location(WhatsAppRequest<LocationContent>),
    Contact(WhatsAppRequest<ContactContent>),
    InteractiveButtons(WhatsAppRequest<InteractiveButtonsContent>),
    InteractiveList(WhatsAppRequest<InteractiveListContent>),
    InteractiveProduct(WhatsAppRequest<InteractiveProductContent>),
    InteractiveMultiProduct(WhatsAppRequest<InteractiveMultiProductContent>),
}

impl WhatsAppMessage {
    /// Kind name as used in the endpoint path.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Document(_) => "document",
            Self::Image(_) => "image",
            Self::Audio(_) => "audio",
            Self::Video(_) => "video",
            Self::Sticker(_) => "sticker",
            Self::Location(_) => "location",
            Self::Contact(_) => "contact",
            Self::InteractiveButtons(_) => "interactive/buttons",
            Self::InteractiveList(_) => "interactive/list",
            Self::InteractiveProduct(_) => "interactive/product",
            Self::InteractiveMultiProduct(_) => "interactive/multi-product",
        }
    }

    /// Endpoint path template for this kind.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Text(_) => "whatsapp/1/message/text",
            Self::Document(_) => "whatsapp/1/message/document",
            Self::Image(_) => "whatsapp/1/message/image",
            Self::Audio(_) => "whatsapp/1/message/audio",
            Self::Video(_) => "whatsapp/1/message/video",
            Self::Sticker(_) => "whatsapp/1/message/sticker",
            Self::Location(_) => "whatsapp/1/message/location",
            Self::Contact(_) => "whatsapp/1/message/contact",
            Self::InteractiveButtons(_) => "whatsapp/1/message/interactive/buttons",
            Self::InteractiveList(_) => "whatsapp/1/message/interactive/list",
            Self::InteractiveProduct(_) => "whatsapp/1/message/interactive/product",
            Self::InteractiveMultiProduct(_) => "whatsapp/1/message/interactive/multi-product",
        }
    }
}

impl Validate for WhatsAppMessage {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        match self {
            Self::Text(request) => request.validate_at(path, violations),
            Self::Document(request) => request.validate_at(path, violations),
            Self::Image(request) => request.validate_at(path, violations),
            Self::Audio(request) => request.validate_at(path, violations),
            Self::Video(request) => request.validate_at(path, violations),
            Self::Sticker(request) => request.validate_at(path, violations),
            Self::Location(request) => request.validate_at(path, violations),
            Self::Contact(request) => request.validate_at(path, violations),
            Self::InteractiveButtons(request) => request.validate_at(path, violations),
            Self::InteractiveList(request) => request.validate_at(path, violations),
            Self::InteractiveProduct(request) => request.validate_at(path, violations),
            Self::InteractiveMultiProduct(request) => request.validate_at(path, violations),
        }
    }
}

macro_rules! message_from {
    ($($variant:ident($content:ty),)+) => {
        $(
            impl From<WhatsAppRequest<$content>> for WhatsAppMessage {
                fn from(request: WhatsAppRequest<$content>) -> Self {
                    Self::$variant(request)
                }
            }
        )+
    };
}

// Image/Video and Audio/Sticker share content types, so only the first of each pair
// gets a `From` impl.
message_from! {
    Text(TextContent),
    Document(DocumentContent),
    Image(CaptionedMedia),
    Audio(MediaContent),
    Location(LocationContent),
    Contact(ContactContent),
    InteractiveButtons(InteractiveButtonsContent),
    InteractiveList(InteractiveListContent),
    InteractiveProduct(InteractiveProductContent),
    InteractiveMultiProduct(InteractiveMultiProductContent),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /whatsapp/1/message/template`.
pub struct TemplateMessages {
    pub messages: Vec<TemplateMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMessage {
    pub from: String,
    pub to: String,
    pub content: TemplateContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_failover: Option<TemplateSmsFailover>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateContent {
    pub template_name: String,
    pub template_data: TemplateData,
    pub language: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateData {
    pub body: TemplateBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<TemplateHeader>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<TemplateButton>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateBody {
    pub placeholders: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum TemplateHeader {
    Text {
        placeholder: String,
    },
    Document {
        media_url: String,
        filename: String,
    },
    Image {
        media_url: String,
    },
    Video {
        media_url: String,
    },
    Location {
        latitude: f64,
        longitude: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateButton {
    QuickReply { parameter: String },
    Url { parameter: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSmsFailover {
    pub from: String,
    pub text: String,
}

impl Validate for TemplateMessages {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        violations.not_empty(&path.field("messages"), &self.messages);
        self.messages.validate_at(&path.field("messages"), violations);
    }
}

impl Validate for TemplateMessage {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        violations.not_blank(&path.field("from"), &self.from);
        violations.not_blank(&path.field("to"), &self.to);
        violations.optional_url(&path.field("notifyUrl"), self.notify_url.as_deref());
        let content = path.field("content");
        violations.not_blank(&content.field("templateName"), &self.content.template_name);
        violations.length(&content.field("templateName"), &self.content.template_name, 1, 512);
        violations.not_blank(&content.field("language"), &self.content.language);
        let data = content.field("templateData");
        for (idx, placeholder) in self.content.template_data.body.placeholders.iter().enumerate() {
            violations.not_blank(&data.field("body").field("placeholders").index(idx), placeholder);
        }
        match &self.content.template_data.header {
            Some(TemplateHeader::Document { media_url: url, filename }) => {
                media_url(&data.field("header").field("mediaUrl"), url, violations);
                violations.length(&data.field("header").field("filename"), filename, 1, 240);
            }
            Some(TemplateHeader::Image { media_url: url } | TemplateHeader::Video { media_url: url }) => {
                media_url(&data.field("header").field("mediaUrl"), url, violations);
            }
            Some(TemplateHeader::Location { latitude, longitude }) => {
                violations.range(&data.field("header").field("latitude"), *latitude, -90.0, 90.0);
                violations.range(&data.field("header").field("longitude"), *longitude, -180.0, 180.0);
            }
            Some(TemplateHeader::Text { .. }) | None => {}
        }
        if let Some(failover) = &self.sms_failover {
            violations.not_blank(&path.field("smsFailover").field("from"), &failover.from);
            violations.not_blank(&path.field("smsFailover").field("text"), &failover.text);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMessagesResponse {
    #[serde(default)]
    pub messages: Vec<SentMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_id: Option<String>,
}

open_enum! {
    /// Category a template is approved for.
    pub enum TemplateCategory {
        Marketing => "MARKETING",
        Utility => "UTILITY",
        Authentication => "AUTHENTICATION",
    }
}

open_enum! {
    /// Review state of a template.
    pub enum TemplateStatus {
        Approved => "APPROVED",
        InAppeal => "IN_APPEAL",
        Pending => "PENDING",
        Rejected => "REJECTED",
        PendingDeletion => "PENDING_DELETION",
        Deleted => "DELETED",
        Disabled => "DISABLED",
        Paused => "PAUSED",
        LimitExceeded => "LIMIT_EXCEEDED",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Response of `GET /whatsapp/2/senders/{sender}/templates`.
pub struct Templates {
    #[serde(default)]
    pub templates: Vec<Template>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_account_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TemplateStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<TemplateCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<TemplateStructure>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateStructure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderStructure>,
    pub body: BodyStructure,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<FooterStructure>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<ButtonStructure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeaderStructure {
    Text {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        example: Option<String>,
    },
    Image {
        #[serde(skip_serializing_if = "Option::is_none")]
        example: Option<String>,
    },
    Document {
        #[serde(skip_serializing_if = "Option::is_none")]
        example: Option<String>,
    },
    Video {
        #[serde(skip_serializing_if = "Option::is_none")]
        example: Option<String>,
    },
    Location,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyStructure {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterStructure {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum ButtonStructure {
    QuickReply {
        text: String,
    },
    PhoneNumber {
        text: String,
        phone_number: String,
    },
    Url {
        text: String,
        url: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        examples: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /whatsapp/2/senders/{sender}/templates`.
pub struct CreateTemplateRequest {
    pub name: String,
    pub language: String,
    pub category: TemplateCategory,
    pub structure: TemplateStructure,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_category_change: Option<bool>,
}

impl Validate for CreateTemplateRequest {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        let name = path.field("name");
        violations.length(&name, &self.name, 1, 512);
        if !self
            .name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
        {
            violations.push(&name, "pattern", "must contain lowercase letters, digits, and underscores only");
        }
        violations.not_blank(&path.field("language"), &self.language);
        let structure = path.field("structure");
        violations.not_blank(&structure.field("body").field("text"), &self.structure.body.text);
        violations.length(&structure.field("body").field("text"), &self.structure.body.text, 1, MAX_BODY);
        if let Some(HeaderStructure::Text { text, .. }) = &self.structure.header {
            violations.length(&structure.field("header").field("text"), text, 1, 60);
        }
        if let Some(footer) = &self.structure.footer {
            violations.length(&structure.field("footer").field("text"), &footer.text, 1, MAX_FOOTER);
        }
        violations.max_items(&structure.field("buttons"), &self.structure.buttons, 10);
        for (idx, button) in self.structure.buttons.iter().enumerate() {
            if let ButtonStructure::Url { url, .. } = button {
                violations.url(&structure.field("buttons").index(idx).field("url"), url);
            }
        }
    }
}
