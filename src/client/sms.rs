use tokio_util::sync::CancellationToken;

use crate::client::{ApiResult, Endpoint, Handler};
use crate::domain::sms::{
    BinarySmsRequest, BulkInfo, BulkParams, BulkStatusInfo, DeliveryReportsParams, InboundParams,
    LogsParams, PreviewRequest, PreviewResponse, RescheduleRequest, SmsDeliveryReports, SmsInbound,
    SmsLogs, SmsRequest, SmsResponse, UpdateBulkStatusRequest,
};

#[derive(Debug, Clone, Copy)]
/// SMS operations.
pub struct Sms<'a> {
    handler: &'a Handler,
}

impl<'a> Sms<'a> {
    pub(crate) fn new(handler: &'a Handler) -> Self {
        Self { handler }
    }

    /// Send one or more text messages.
    pub async fn send(&self, cancel: &CancellationToken, request: &SmsRequest) -> ApiResult<SmsResponse> {
        self.handler
            .post(cancel, Endpoint::new("sms/2/text/advanced"), request)
            .await
    }

    /// Send one or more binary messages.
    pub async fn send_binary(
        &self,
        cancel: &CancellationToken,
        request: &BinarySmsRequest,
    ) -> ApiResult<SmsResponse> {
        self.handler
            .post(cancel, Endpoint::new("sms/2/binary/advanced"), request)
            .await
    }

    /// Fetch delivery reports not yet pulled. Each report is returned once.
    pub async fn get_delivery_reports(
        &self,
        cancel: &CancellationToken,
        params: &DeliveryReportsParams,
    ) -> ApiResult<SmsDeliveryReports> {
        self.handler
            .get(cancel, Endpoint::new("sms/1/reports").query(params))
            .await
    }

    pub async fn get_logs(&self, cancel: &CancellationToken, params: &LogsParams) -> ApiResult<SmsLogs> {
        self.handler
            .get(cancel, Endpoint::new("sms/1/logs").query(params))
            .await
    }

    pub async fn get_inbound_messages(
        &self,
        cancel: &CancellationToken,
        params: &InboundParams,
    ) -> ApiResult<SmsInbound> {
        self.handler
            .get(cancel, Endpoint::new("sms/1/inbox/reports").query(params))
            .await
    }

    /// Show how a text would be split and encoded without sending it.
    pub async fn preview(
        &self,
        cancel: &CancellationToken,
        request: &PreviewRequest,
    ) -> ApiResult<PreviewResponse> {
        self.handler
            .post(cancel, Endpoint::new("sms/1/preview"), request)
            .await
    }

    pub async fn get_scheduled(&self, cancel: &CancellationToken, params: &BulkParams) -> ApiResult<BulkInfo> {
        self.handler
            .get(cancel, Endpoint::new("sms/1/bulks").query(params))
            .await
    }

    /// Move a scheduled bulk to a new send time.
    pub async fn reschedule(
        &self,
        cancel: &CancellationToken,
        params: &BulkParams,
        request: &RescheduleRequest,
    ) -> ApiResult<BulkInfo> {
        self.handler
            .put(cancel, Endpoint::new("sms/1/bulks").query(params), request)
            .await
    }

    pub async fn get_scheduled_status(
        &self,
        cancel: &CancellationToken,
        params: &BulkParams,
    ) -> ApiResult<BulkStatusInfo> {
        self.handler
            .get(cancel, Endpoint::new("sms/1/bulks/status").query(params))
            .await
    }

    /// Pause, resume, or cancel a scheduled bulk.
    pub async fn update_scheduled_status(
        &self,
        cancel: &CancellationToken,
        params: &BulkParams,
        request: &UpdateBulkStatusRequest,
    ) -> ApiResult<BulkStatusInfo> {
        self.handler
            .put(cancel, Endpoint::new("sms/1/bulks/status").query(params), request)
            .await
    }
}
