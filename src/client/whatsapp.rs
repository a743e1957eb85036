use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::client::{ApiResult, Endpoint, Handler};
use crate::domain::whatsapp::{
    AudioContent, ContactContent, CreateTemplateRequest, DocumentContent, ImageContent,
    InteractiveButtonsContent, InteractiveListContent, InteractiveMultiProductContent,
    InteractiveProductContent, LocationContent, StickerContent, Template, TemplateMessages,
    TemplateMessagesResponse, Templates, TextContent, VideoContent, WhatsAppMessage, WhatsAppRequest,
    WhatsAppResponse,
};
use crate::domain::{Empty, Validate};

#[derive(Debug, Clone, Copy)]
/// WhatsApp operations.
pub struct WhatsApp<'a> {
    handler: &'a Handler,
}

impl<'a> WhatsApp<'a> {
    pub(crate) fn new(handler: &'a Handler) -> Self {
        Self { handler }
    }

    /// Send template messages, which may open a conversation.
    pub async fn send_template(
        &self,
        cancel: &CancellationToken,
        request: &TemplateMessages,
    ) -> ApiResult<TemplateMessagesResponse> {
        self.handler
            .post(cancel, Endpoint::new("whatsapp/1/message/template"), request)
            .await
    }

    /// Send a session message of any kind to its endpoint.
    pub async fn send(&self, cancel: &CancellationToken, message: &WhatsAppMessage) -> ApiResult<WhatsAppResponse> {
        self.handler
            .post(cancel, Endpoint::new(message.path()), message)
            .await
    }

    async fn send_kind<C>(
        &self,
        cancel: &CancellationToken,
        path: &'static str,
        request: &WhatsAppRequest<C>,
    ) -> ApiResult<WhatsAppResponse>
    where
        C: Serialize + Validate + Sync,
    {
        self.handler.post(cancel, Endpoint::new(path), request).await
    }

    pub async fn send_text(
        &self,
        cancel: &CancellationToken,
        request: &WhatsAppRequest<TextContent>,
    ) -> ApiResult<WhatsAppResponse> {
        self.send_kind(cancel, "whatsapp/1/message/text", request).await
    }

    pub async fn send_document(
        &self,
        cancel: &CancellationToken,
        request: &WhatsAppRequest<DocumentContent>,
    ) -> ApiResult<WhatsAppResponse> {
        self.send_kind(cancel, "whatsapp/1/message/document", request).await
    }

    pub async fn send_image(
        &self,
        cancel: &CancellationToken,
        request: &WhatsAppRequest<ImageContent>,
    ) -> ApiResult<WhatsAppResponse> {
        self.send_kind(cancel, "whatsapp/1/message/image", request).await
    }

    pub async fn send_audio(
        &self,
        cancel: &CancellationToken,
        request: &WhatsAppRequest<AudioContent>,
    ) -> ApiResult<WhatsAppResponse> {
        self.send_kind(cancel, "whatsapp/1/message/audio", request).await
    }

    pub async fn send_video(
        &self,
        cancel: &CancellationToken,
        request: &WhatsAppRequest<VideoContent>,
    ) -> ApiResult<WhatsAppResponse> {
        self.send_kind(cancel, "whatsapp/1/message/video", request).await
    }

    pub async fn send_sticker(
        &self,
        cancel: &CancellationToken,
        request: &WhatsAppRequest<StickerContent>,
    ) -> ApiResult<WhatsAppResponse> {
        self.send_kind(cancel, "whatsapp/1/message/sticker", request).await
    }

    pub async fn send_location(
        &self,
        cancel: &CancellationToken,
        request: &WhatsAppRequest<LocationContent>,
    ) -> ApiResult<WhatsAppResponse> {
        self.send_kind(cancel, "whatsapp/1/message/location", request).await
    }

    pub async fn send_contact(
        &self,
        cancel: &CancellationToken,
        request: &WhatsAppRequest<ContactContent>,
    ) -> ApiResult<WhatsAppResponse> {
        self.send_kind(cancel, "whatsapp/1/message/contact", request).await
    }

    pub async fn send_interactive_buttons(
        &self,
        cancel: &CancellationToken,
        request: &WhatsAppRequest<InteractiveButtonsContent>,
    ) -> ApiResult<WhatsAppResponse> {
        self.send_kind(cancel, "whatsapp/1/message/interactive/buttons", request)
            .await
    }

    pub async fn send_interactive_list(
        &self,
        cancel: &CancellationToken,
        request: &WhatsAppRequest<InteractiveListContent>,
    ) -> ApiResult<WhatsAppResponse> {
        self.send_kind(cancel, "whatsapp/1/message/interactive/list", request)
            .await
    }

    pub async fn send_interactive_product(
        &self,
        cancel: &CancellationToken,
        request: &WhatsAppRequest<InteractiveProductContent>,
    ) -> ApiResult<WhatsAppResponse> {
        self.send_kind(cancel, "whatsapp/1/message/interactive/product", request)
            .await
    }

    pub async fn send_interactive_multiproduct(
        &self,
        cancel: &CancellationToken,
        request: &WhatsAppRequest<InteractiveMultiProductContent>,
    ) -> ApiResult<WhatsAppResponse> {
        self.send_kind(cancel, "whatsapp/1/message/interactive/multi-product", request)
            .await
    }

    /// List the templates registered for `sender`.
    pub async fn get_templates(&self, cancel: &CancellationToken, sender: &str) -> ApiResult<Templates> {
        self.handler
            .get(
                cancel,
                Endpoint::new("whatsapp/2/senders/{sender}/templates").path_param("sender", sender),
            )
            .await
    }

    /// Submit a template for review.
    pub async fn create_template(
        &self,
        cancel: &CancellationToken,
        sender: &str,
        request: &CreateTemplateRequest,
    ) -> ApiResult<Template> {
        self.handler
            .post(
                cancel,
                Endpoint::new("whatsapp/2/senders/{sender}/templates").path_param("sender", sender),
                request,
            )
            .await
    }

    /// Delete a template in every language.
    pub async fn delete_template(
        &self,
        cancel: &CancellationToken,
        sender: &str,
        template_name: &str,
    ) -> ApiResult<Empty> {
        self.handler
            .delete(
                cancel,
                Endpoint::new("whatsapp/2/senders/{sender}/templates/{templateName}")
                    .path_param("sender", sender)
                    .path_param("templateName", template_name),
            )
            .await
    }

    /// Mark an inbound message as read.
    pub async fn mark_as_read(
        &self,
        cancel: &CancellationToken,
        sender: &str,
        message_id: &str,
    ) -> ApiResult<Empty> {
        self.handler
            .post_empty(
                cancel,
                Endpoint::new("whatsapp/1/senders/{sender}/message/{messageId}/read")
                    .path_param("sender", sender)
                    .path_param("messageId", message_id),
            )
            .await
    }
}
