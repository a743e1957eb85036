use tokio_util::sync::CancellationToken;

use crate::client::{ApiResult, Endpoint, Handler};
use crate::domain::Empty;
use crate::domain::webrtc::{TokenRequest, TokenResponse, WebRtcApplication, WebRtcApplications};

const APPLICATIONS: &str = "webrtc/1/applications";
const APPLICATION: &str = "webrtc/1/applications/{id}";

#[derive(Debug, Clone, Copy)]
/// WebRTC operations.
pub struct WebRtc<'a> {
    handler: &'a Handler,
}

impl<'a> WebRtc<'a> {
    pub(crate) fn new(handler: &'a Handler) -> Self {
        Self { handler }
    }

    /// Issue a token a browser or mobile SDK uses to connect.
    pub async fn generate_token(
        &self,
        cancel: &CancellationToken,
        request: &TokenRequest,
    ) -> ApiResult<TokenResponse> {
        self.handler
            .post(cancel, Endpoint::new("webrtc/1/token"), request)
            .await
    }

    pub async fn list_applications(&self, cancel: &CancellationToken) -> ApiResult<WebRtcApplications> {
        self.handler.get(cancel, Endpoint::new(APPLICATIONS)).await
    }

    pub async fn create_application(
        &self,
        cancel: &CancellationToken,
        application: &WebRtcApplication,
    ) -> ApiResult<WebRtcApplication> {
        self.handler
            .post(cancel, Endpoint::new(APPLICATIONS), application)
            .await
    }

    pub async fn get_application(&self, cancel: &CancellationToken, id: &str) -> ApiResult<WebRtcApplication> {
        self.handler
            .get(cancel, Endpoint::new(APPLICATION).path_param("id", id))
            .await
    }

    pub async fn update_application(
        &self,
        cancel: &CancellationToken,
        id: &str,
        application: &WebRtcApplication,
    ) -> ApiResult<WebRtcApplication> {
        self.handler
            .put(cancel, Endpoint::new(APPLICATION).path_param("id", id), application)
            .await
    }

    pub async fn delete_application(&self, cancel: &CancellationToken, id: &str) -> ApiResult<Empty> {
        self.handler
            .delete(cancel, Endpoint::new(APPLICATION).path_param("id", id))
            .await
    }
}
