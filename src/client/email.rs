use tokio_util::sync::CancellationToken;

use crate::client::{ApiResult, Endpoint, Handler};
use crate::domain::email::{
    AddressValidation, AddressValidationRequest, EmailLogs, EmailLogsParams, EmailReports,
    EmailReportsParams, EmailRequest, EmailResponse,
};

#[derive(Debug, Clone, Copy)]
/// Email operations.
pub struct Email<'a> {
    handler: &'a Handler,
}

impl<'a> Email<'a> {
    pub(crate) fn new(handler: &'a Handler) -> Self {
        Self { handler }
    }

    /// Send an email with attachments, tracking, and scheduling options.
    pub async fn send_fully_featured(
        &self,
        cancel: &CancellationToken,
        request: &EmailRequest,
    ) -> ApiResult<EmailResponse> {
        self.handler
            .post_multipart(cancel, Endpoint::new("email/3/send"), request)
            .await
    }

    pub async fn get_delivery_reports(
        &self,
        cancel: &CancellationToken,
        params: &EmailReportsParams,
    ) -> ApiResult<EmailReports> {
        self.handler
            .get(cancel, Endpoint::new("email/1/reports").query(params))
            .await
    }

    pub async fn get_logs(&self, cancel: &CancellationToken, params: &EmailLogsParams) -> ApiResult<EmailLogs> {
        self.handler
            .get(cancel, Endpoint::new("email/1/logs").query(params))
            .await
    }

    /// Check whether an address is deliverable.
    pub async fn validate_address(
        &self,
        cancel: &CancellationToken,
        request: &AddressValidationRequest,
    ) -> ApiResult<AddressValidation> {
        self.handler
            .post(cancel, Endpoint::new("email/2/validation"), request)
            .await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;

    use super::*;
    use crate::client::{ErrorKind, RequestBody};
    use crate::domain::email::EmailFile;
    use crate::client::tests::{FakeTransport, json_body, make_client};

    #[tokio::test]
    async fn send_posts_multipart_form() {
        let transport = FakeTransport::new(
            200,
            r#"{"bulkId":"snxemd8u52v7v84iiu69","messages":[{"to":"john@example.com","messageCount":1,"messageId":"m1","status":{"groupId":1,"groupName":"PENDING"}}]}"#,
        );
        let client = make_client(transport.clone());
        let request = EmailRequest {
            from: "Jane <jane@example.com>".to_owned(),
            to: vec!["john@example.com".to_owned()],
            subject: Some("Hi".to_owned()),
            html: Some("<p>Hi</p>".to_owned()),
            ..Default::default()
        };

        let response = client
            .email()
            .send_fully_featured(&CancellationToken::new(), &request)
            .await
            .unwrap();
        assert_eq!(
            response.payload.unwrap().bulk_id.as_deref(),
            Some("snxemd8u52v7v84iiu69")
        );

        let sent = transport.last_request();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.url.as_str(), "https://api.test/email/3/send");
        assert!(matches!(sent.body, Some(RequestBody::Multipart(ref parts)) if parts.len() == 4));
    }

    #[tokio::test]
    async fn reports_and_logs_use_query() {
        let transport = FakeTransport::new(200, r#"{"results":[]}"#);
        let client = make_client(transport.clone());
        let cancel = CancellationToken::new();

        client
            .email()
            .get_delivery_reports(
                &cancel,
                &EmailReportsParams {
                    limit: Some(10),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(
            transport.last_request().url.as_str(),
            "https://api.test/email/1/reports?limit=10"
        );

        client
            .email()
            .get_logs(
                &cancel,
                &EmailLogsParams {
                    from: Some("jane@example.com".to_owned()),
                    general_status: Some("DELIVERED".to_owned()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(
            transport.last_request().url.query(),
            Some("from=jane%40example.com&generalStatus=DELIVERED")
        );
    }

    #[tokio::test]
    async fn validate_address_posts_json() {
        let transport = FakeTransport::new(
            200,
            r#"{"to":"john@example.com","validMailbox":"true","validSyntax":true}"#,
        );
        let client = make_client(transport.clone());
        let response = client
            .email()
            .validate_address(
                &CancellationToken::new(),
                &AddressValidationRequest {
                    to: "john@example.com".to_owned(),
                },
            )
            .await
            .unwrap();
        assert_eq!(response.payload.unwrap().valid_syntax, Some(true));
        let sent = transport.last_request();
        assert_eq!(sent.url.path(), "/email/2/validation");
        assert_eq!(json_body(&sent), serde_json::json!({"to": "john@example.com"}));
    }

    #[tokio::test]
    async fn attachment_with_bad_content_type_is_a_validation_error() {
        let transport = FakeTransport::new(200, "{}");
        let client = make_client(transport.clone());
        let request = EmailRequest {
            from: "jane@example.com".to_owned(),
            to: vec!["john@example.com".to_owned()],
            subject: Some("Report".to_owned()),
            text: Some("Attached".to_owned()),
            attachments: vec![EmailFile {
                file_name: "report.pdf".to_owned(),
                content_type: Some("not a mime".to_owned()),
                data: bytes::Bytes::from_static(b"%PDF"),
            }],
            ..Default::default()
        };

        let err = client
            .email()
            .send_fully_featured(&CancellationToken::new(), &request)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        match err {
            crate::client::Error::Validation(violations) => {
                assert!(violations.has_field("attachment[0].contentType"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(transport.requests().is_empty());
    }
}
