use tokio_util::sync::CancellationToken;

use crate::client::{ApiResult, Endpoint, Handler};
use crate::domain::numbers::{
    AvailableNumbersParams, Number, NumberList, PurchaseRequest, PurchasedNumbersParams,
    UpdateNumberRequest,
};

const NUMBER: &str = "numbers/1/numbers/{numberKey}";

#[derive(Debug, Clone, Copy)]
/// Number inventory operations.
pub struct Numbers<'a> {
    handler: &'a Handler,
}

impl<'a> Numbers<'a> {
    pub(crate) fn new(handler: &'a Handler) -> Self {
        Self { handler }
    }

    /// Search numbers available for purchase.
    pub async fn get_available(
        &self,
        cancel: &CancellationToken,
        params: &AvailableNumbersParams,
    ) -> ApiResult<NumberList> {
        self.handler
            .get(cancel, Endpoint::new("numbers/1/numbers/available").query(params))
            .await
    }

    pub async fn purchase(&self, cancel: &CancellationToken, request: &PurchaseRequest) -> ApiResult<Number> {
        self.handler
            .post(cancel, Endpoint::new("numbers/1/numbers"), request)
            .await
    }

    /// List numbers owned by the account.
    pub async fn list_purchased(
        &self,
        cancel: &CancellationToken,
        params: &PurchasedNumbersParams,
    ) -> ApiResult<NumberList> {
        self.handler
            .get(cancel, Endpoint::new("numbers/1/numbers").query(params))
            .await
    }

    pub async fn get(&self, cancel: &CancellationToken, number_key: &str) -> ApiResult<Number> {
        self.handler
            .get(cancel, Endpoint::new(NUMBER).path_param("numberKey", number_key))
            .await
    }

    pub async fn update(
        &self,
        cancel: &CancellationToken,
        number_key: &str,
        request: &UpdateNumberRequest,
    ) -> ApiResult<Number> {
        self.handler
            .put(cancel, Endpoint::new(NUMBER).path_param("numberKey", number_key), request)
            .await
    }

    /// Release a purchased number.
    pub async fn cancel(&self, cancel: &CancellationToken, number_key: &str) -> ApiResult<Number> {
        self.handler
            .delete(cancel, Endpoint::new(NUMBER).path_param("numberKey", number_key))
            .await
    }
}
