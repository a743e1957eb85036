use tokio_util::sync::CancellationToken;

use crate::client::{ApiResult, Endpoint, Handler};
use crate::domain::rcs::{RcsBulkRequest, RcsBulkResponse, RcsMessage, RcsResponse};

#[derive(Debug, Clone, Copy)]
/// RCS operations.
pub struct Rcs<'a> {
    handler: &'a Handler,
}

impl<'a> Rcs<'a> {
    pub(crate) fn new(handler: &'a Handler) -> Self {
        Self { handler }
    }

    pub async fn send(&self, cancel: &CancellationToken, message: &RcsMessage) -> ApiResult<RcsResponse> {
        self.handler
            .post(cancel, Endpoint::new("ott/rcs/1/message"), message)
            .await
    }

    /// Send several messages at once. The response lists one entry per message.
    pub async fn send_bulk(
        &self,
        cancel: &CancellationToken,
        request: &RcsBulkRequest,
    ) -> ApiResult<RcsBulkResponse> {
        self.handler
            .post(cancel, Endpoint::new("ott/rcs/1/message/bulk"), request)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{FakeTransport, json_body, make_client};
    use crate::domain::rcs::RcsContent;

    fn message(to: &str) -> RcsMessage {
        RcsMessage::new("myRcsSender", to, RcsContent::text("Hello"))
    }

    #[tokio::test]
    async fn single_send_decodes_object() {
        let transport = FakeTransport::new(
            200,
            r#"{"to":"385977666618","messageCount":1,"messageId":"m1","status":{"groupId":1,"groupName":"PENDING"}}"#,
        );
        let client = make_client(transport.clone());
        let response = client
            .rcs()
            .send(&CancellationToken::new(), &message("385977666618"))
            .await
            .unwrap();
        assert_eq!(response.payload.unwrap().message_count, Some(1));

        let sent = transport.last_request();
        assert_eq!(sent.url.as_str(), "https://api.test/ott/rcs/1/message");
        assert_eq!(json_body(&sent)["content"]["type"], "TEXT");
    }

    #[tokio::test]
    async fn bulk_send_decodes_array() {
        let transport = FakeTransport::new(
            200,
            r#"[{"to":"385977666618","messageId":"m1"},{"to":"385977666619","messageId":"m2"}]"#,
        );
        let client = make_client(transport.clone());
        let request = RcsBulkRequest {
            messages: vec![message("385977666618"), message("385977666619")],
        };
        let response = client
            .rcs()
            .send_bulk(&CancellationToken::new(), &request)
            .await
            .unwrap();
        let payload = response.payload.unwrap();
        assert_eq!(payload.len(), 2);
        assert_eq!(payload[1].to.as_deref(), Some("385977666619"));

        let sent = transport.last_request();
        assert_eq!(sent.url.as_str(), "https://api.test/ott/rcs/1/message/bulk");
        assert_eq!(json_body(&sent)["messages"][1]["to"], "385977666619");
    }
}
