use tokio_util::sync::CancellationToken;

use crate::client::{ApiResult, Endpoint, Handler};
use crate::domain::tfa::{
    PinSent, PinVerification, ResendPinRequest, SendPinParams, SendPinRequest, TfaApplication,
    TfaApplications, TfaMessageTemplate, TfaMessageTemplates, VerificationStatusParams,
    Verifications, VerifyPinRequest,
};

const APPLICATIONS: &str = "2fa/2/applications";
const APPLICATION: &str = "2fa/2/applications/{appId}";
const TEMPLATES: &str = "2fa/2/applications/{appId}/messages";
const TEMPLATE: &str = "2fa/2/applications/{appId}/messages/{msgId}";

#[derive(Debug, Clone, Copy)]
/// Two-factor authentication: applications, message templates, PIN delivery
/// and verification.
pub struct Tfa<'a> {
    handler: &'a Handler,
}

impl<'a> Tfa<'a> {
    pub(crate) fn new(handler: &'a Handler) -> Self {
        Self { handler }
    }

    pub async fn list_applications(&self, cancel: &CancellationToken) -> ApiResult<TfaApplications> {
        self.handler.get(cancel, Endpoint::new(APPLICATIONS)).await
    }

    pub async fn create_application(
        &self,
        cancel: &CancellationToken,
        application: &TfaApplication,
    ) -> ApiResult<TfaApplication> {
        self.handler
            .post(cancel, Endpoint::new(APPLICATIONS), application)
            .await
    }

    pub async fn get_application(&self, cancel: &CancellationToken, app_id: &str) -> ApiResult<TfaApplication> {
        self.handler
            .get(cancel, Endpoint::new(APPLICATION).path_param("appId", app_id))
            .await
    }

    pub async fn update_application(
        &self,
        cancel: &CancellationToken,
        app_id: &str,
        application: &TfaApplication,
    ) -> ApiResult<TfaApplication> {
        self.handler
            .put(
                cancel,
                Endpoint::new(APPLICATION).path_param("appId", app_id),
                application,
            )
            .await
    }

    pub async fn list_message_templates(
        &self,
        cancel: &CancellationToken,
        app_id: &str,
    ) -> ApiResult<TfaMessageTemplates> {
        self.handler
            .get(cancel, Endpoint::new(TEMPLATES).path_param("appId", app_id))
            .await
    }

    pub async fn create_message_template(
        &self,
        cancel: &CancellationToken,
        app_id: &str,
        template: &TfaMessageTemplate,
    ) -> ApiResult<TfaMessageTemplate> {
        self.handler
            .post(
                cancel,
                Endpoint::new(TEMPLATES).path_param("appId", app_id),
                template,
            )
            .await
    }

    pub async fn get_message_template(
        &self,
        cancel: &CancellationToken,
        app_id: &str,
        msg_id: &str,
    ) -> ApiResult<TfaMessageTemplate> {
        self.handler
            .get(
                cancel,
                Endpoint::new(TEMPLATE)
                    .path_param("appId", app_id)
                    .path_param("msgId", msg_id),
            )
            .await
    }

    pub async fn update_message_template(
        &self,
        cancel: &CancellationToken,
        app_id: &str,
        msg_id: &str,
        template: &TfaMessageTemplate,
    ) -> ApiResult<TfaMessageTemplate> {
        self.handler
            .put(
                cancel,
                Endpoint::new(TEMPLATE)
                    .path_param("appId", app_id)
                    .path_param("msgId", msg_id),
                template,
            )
            .await
    }

    /// Send a PIN over SMS. `params.nc_needed` asks for a number lookup first.
    pub async fn send_pin_over_sms(
        &self,
        cancel: &CancellationToken,
        params: &SendPinParams,
        request: &SendPinRequest,
    ) -> ApiResult<PinSent> {
        self.handler
            .post(cancel, Endpoint::new("2fa/2/pin").query(params), request)
            .await
    }

    pub async fn resend_pin_over_sms(
        &self,
        cancel: &CancellationToken,
        pin_id: &str,
        request: &ResendPinRequest,
    ) -> ApiResult<PinSent> {
        self.handler
            .post(
                cancel,
                Endpoint::new("2fa/2/pin/{pinId}/resend").path_param("pinId", pin_id),
                request,
            )
            .await
    }

    pub async fn send_pin_over_voice(
        &self,
        cancel: &CancellationToken,
        request: &SendPinRequest,
    ) -> ApiResult<PinSent> {
        self.handler
            .post(cancel, Endpoint::new("2fa/2/pin/voice"), request)
            .await
    }

    pub async fn resend_pin_over_voice(
        &self,
        cancel: &CancellationToken,
        pin_id: &str,
        request: &ResendPinRequest,
    ) -> ApiResult<PinSent> {
        self.handler
            .post(
                cancel,
                Endpoint::new("2fa/2/pin/{pinId}/resend/voice").path_param("pinId", pin_id),
                request,
            )
            .await
    }

    /// Check a PIN the end user typed in. A wrong PIN is still a 200 with
    /// `verified: false` and a `pin_error`.
    pub async fn verify_pin(
        &self,
        cancel: &CancellationToken,
        pin_id: &str,
        request: &VerifyPinRequest,
    ) -> ApiResult<PinVerification> {
        self.handler
            .post(
                cancel,
                Endpoint::new("2fa/2/pin/{pinId}/verify").path_param("pinId", pin_id),
                request,
            )
            .await
    }

    pub async fn get_verification_status(
        &self,
        cancel: &CancellationToken,
        app_id: &str,
        params: &VerificationStatusParams,
    ) -> ApiResult<Verifications> {
        self.handler
            .get(
                cancel,
                Endpoint::new("2fa/2/applications/{appId}/verifications")
                    .path_param("appId", app_id)
                    .query(params),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;

    use super::*;
    use crate::client::ErrorKind;
    use crate::client::tests::{FakeTransport, json_body, make_client};
    use crate::domain::tfa::PinType;

    const PIN_SENT: &str = r#"{"pinId":"9C817C74","to":"41793026727","ncStatus":"NC_DESTINATION_REACHABLE","smsStatus":"MESSAGE_SENT"}"#;

    fn send_request() -> SendPinRequest {
        SendPinRequest {
            application_id: "HJ675435E3A6EA43432G5F37A635KJ8B".to_owned(),
            message_id: "0130269F44AFD07AEBC2FEFEB30398A0".to_owned(),
            to: "41793026727".to_owned(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn send_pin_over_sms_with_number_lookup() {
        let transport = FakeTransport::new(200, PIN_SENT);
        let client = make_client(transport.clone());
        let response = client
            .tfa()
            .send_pin_over_sms(
                &CancellationToken::new(),
                &SendPinParams { nc_needed: Some(true) },
                &send_request(),
            )
            .await
            .unwrap();
        let sent_pin = response.payload.unwrap();
        assert_eq!(sent_pin.pin_id.as_deref(), Some("9C817C74"));
        assert_eq!(sent_pin.sms_status.as_deref(), Some("MESSAGE_SENT"));

        let sent = transport.last_request();
        assert_eq!(sent.url.as_str(), "https://api.test/2fa/2/pin?ncNeeded=true");
        assert_eq!(json_body(&sent)["to"], "41793026727");
    }

    #[tokio::test]
    async fn pin_routes() {
        let transport = FakeTransport::new(200, PIN_SENT);
        let client = make_client(transport.clone());
        let cancel = CancellationToken::new();
        let tfa = client.tfa();

        tfa.send_pin_over_voice(&cancel, &send_request()).await.unwrap();
        assert_eq!(transport.last_request().url.path(), "/2fa/2/pin/voice");

        tfa.resend_pin_over_sms(&cancel, "9C817C74", &ResendPinRequest::default())
            .await
            .unwrap();
        let sent = transport.last_request();
        assert_eq!(sent.url.path(), "/2fa/2/pin/9C817C74/resend");
        assert_eq!(json_body(&sent), serde_json::json!({}));

        tfa.resend_pin_over_voice(&cancel, "9C817C74", &ResendPinRequest::default())
            .await
            .unwrap();
        assert_eq!(transport.last_request().url.path(), "/2fa/2/pin/9C817C74/resend/voice");
    }

    #[tokio::test]
    async fn wrong_pin_is_a_successful_response() {
        let transport = FakeTransport::new(
            200,
            r#"{"pinId":"9C817C74","msisdn":"41793026727","verified":false,"attemptsRemaining":2,"pinError":"WRONG_PIN"}"#,
        );
        let client = make_client(transport.clone());
        let response = client
            .tfa()
            .verify_pin(
                &CancellationToken::new(),
                "9C817C74",
                &VerifyPinRequest { pin: "1598".to_owned() },
            )
            .await
            .unwrap();
        let verification = response.payload.unwrap();
        assert!(!verification.verified);
        assert_eq!(verification.pin_error.as_deref(), Some("WRONG_PIN"));
        assert_eq!(transport.last_request().url.path(), "/2fa/2/pin/9C817C74/verify");
    }

    #[tokio::test]
    async fn verification_status_query() {
        let transport = FakeTransport::new(
            200,
            r#"{"verifications":[{"msisdn":"41793026727","verified":true,"verifiedAt":1418364366,"sentAt":1418364246}]}"#,
        );
        let client = make_client(transport.clone());
        let params = VerificationStatusParams {
            verified: Some(true),
            ..VerificationStatusParams::new("41793026727")
        };
        let response = client
            .tfa()
            .get_verification_status(&CancellationToken::new(), "APP1", &params)
            .await
            .unwrap();
        assert!(response.payload.unwrap().verifications[0].verified);
        let sent = transport.last_request();
        assert_eq!(sent.method, Method::GET);
        assert_eq!(
            sent.url.as_str(),
            "https://api.test/2fa/2/applications/APP1/verifications?msisdn=41793026727&verified=true"
        );
    }

    #[tokio::test]
    async fn application_and_template_management() {
        let transport = FakeTransport::new(
            200,
            r#"{"applicationId":"APP1","name":"2fa demo","enabled":true}"#,
        );
        let client = make_client(transport.clone());
        let cancel = CancellationToken::new();
        let tfa = client.tfa();

        let app = TfaApplication {
            name: "2fa demo".to_owned(),
            ..Default::default()
        };
        let created = tfa.create_application(&cancel, &app).await.unwrap();
        assert_eq!(created.payload.unwrap().application_id.as_deref(), Some("APP1"));
        assert_eq!(transport.last_request().url.path(), "/2fa/2/applications");

        tfa.update_application(&cancel, "APP1", &app).await.unwrap();
        let sent = transport.last_request();
        assert_eq!((sent.method.clone(), sent.url.path()), (Method::PUT, "/2fa/2/applications/APP1"));

        tfa.list_applications(&cancel).await.ok();
        assert_eq!(transport.last_request().method, Method::GET);
        tfa.get_application(&cancel, "APP1").await.unwrap();
        assert_eq!(transport.last_request().url.path(), "/2fa/2/applications/APP1");
        tfa.list_message_templates(&cancel, "APP1").await.ok();
        assert_eq!(transport.last_request().url.path(), "/2fa/2/applications/APP1/messages");
        tfa.get_message_template(&cancel, "APP1", "MSG1").await.ok();
        assert_eq!(
            transport.last_request().url.path(),
            "/2fa/2/applications/APP1/messages/MSG1"
        );

        let template = TfaMessageTemplate {
            pin_type: PinType::Numeric,
            message_text: "Your pin is {{pin}}".to_owned(),
            pin_length: 4,
            ..Default::default()
        };
        tfa.create_message_template(&cancel, "APP1", &template).await.ok();
        assert_eq!(transport.last_request().url.path(), "/2fa/2/applications/APP1/messages");

        tfa.update_message_template(&cancel, "APP1", "MSG1", &template).await.ok();
        assert_eq!(
            transport.last_request().url.path(),
            "/2fa/2/applications/APP1/messages/MSG1"
        );

        let bad = TfaMessageTemplate {
            message_text: "no placeholder".to_owned(),
            ..template
        };
        let err = tfa
            .create_message_template(&cancel, "APP1", &bad)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(transport.requests().len(), 8);
    }
}
