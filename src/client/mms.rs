use tokio_util::sync::CancellationToken;

use crate::client::{ApiResult, Endpoint, Handler};
use crate::domain::mms::{MmsInbound, MmsReports, MmsReportsParams, MmsRequest, MmsResponse};
use crate::domain::sms::InboundParams;

#[derive(Debug, Clone, Copy)]
/// MMS operations.
pub struct Mms<'a> {
    handler: &'a Handler,
}

impl<'a> Mms<'a> {
    pub(crate) fn new(handler: &'a Handler) -> Self {
        Self { handler }
    }

    /// Send one MMS as a multipart form.
    pub async fn send(&self, cancel: &CancellationToken, request: &MmsRequest) -> ApiResult<MmsResponse> {
        self.handler
            .post_multipart(cancel, Endpoint::new("mms/1/single"), request)
            .await
    }

    pub async fn get_delivery_reports(
        &self,
        cancel: &CancellationToken,
        params: &MmsReportsParams,
    ) -> ApiResult<MmsReports> {
        self.handler
            .get(cancel, Endpoint::new("mms/1/reports").query(params))
            .await
    }

    pub async fn get_inbound_messages(
        &self,
        cancel: &CancellationToken,
        params: &InboundParams,
    ) -> ApiResult<MmsInbound> {
        self.handler
            .get(cancel, Endpoint::new("mms/1/inbox/reports").query(params))
            .await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use reqwest::header::CONTENT_TYPE;

    use super::*;
    use crate::client::RequestBody;
    use crate::client::tests::{FakeTransport, make_client};
    use crate::domain::mms::MmsHead;

    #[tokio::test]
    async fn send_uses_multipart_without_json_content_type() {
        let transport = FakeTransport::new(
            200,
            r#"{"bulkId":"b","messages":[{"to":"41793026727","messageId":"m1","status":{"groupName":"PENDING"}}]}"#,
        );
        let client = make_client(transport.clone());
        let request = MmsRequest {
            head: MmsHead {
                from: "InfoMMS".to_owned(),
                to: "41793026727".to_owned(),
                ..Default::default()
            },
            text: Some("Hi".to_owned()),
            ..Default::default()
        };

        let response = client.mms().send(&CancellationToken::new(), &request).await.unwrap();
        assert_eq!(response.payload.unwrap().messages[0].message_id.as_deref(), Some("m1"));

        let sent = transport.last_request();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.url.as_str(), "https://api.test/mms/1/single");
        assert!(sent.headers.get(CONTENT_TYPE).is_none());
        match &sent.body {
            Some(RequestBody::Multipart(parts)) => {
                let names: Vec<_> = parts.iter().map(|p| p.name.as_str()).collect();
                assert_eq!(names, ["head", "text"]);
            }
            other => panic!("expected multipart body, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reports_and_inbound_use_get() {
        let transport = FakeTransport::new(200, r#"{"results":[]}"#);
        let client = make_client(transport.clone());
        let cancel = CancellationToken::new();

        client
            .mms()
            .get_delivery_reports(
                &cancel,
                &MmsReportsParams {
                    message_id: Some("m1".to_owned()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(
            transport.last_request().url.as_str(),
            "https://api.test/mms/1/reports?messageId=m1"
        );

        client
            .mms()
            .get_inbound_messages(&cancel, &InboundParams { limit: Some(1) })
            .await
            .unwrap();
        let sent = transport.last_request();
        assert_eq!(sent.method, Method::GET);
        assert_eq!(sent.url.as_str(), "https://api.test/mms/1/inbox/reports?limit=1");
    }
}
