use async_trait::async_trait;
use web_push::{
    ContentEncoding, IsahcWebPushClient, SubscriptionInfo, VapidSignatureBuilder, WebPushClient,
    WebPushMessageBuilder,
};

use crate::{
    config::PushConfig,
    error::{AppError, Result},
};

/// A single device endpoint with its encryption keys.
#[derive(Clone, Debug)]
pub struct EndpointKeys {
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
}

/// Port to the push provider. One call is one endpoint; errors are
/// per-endpoint, never batched.
#[async_trait]
pub trait PushDelivery: Send + Sync {
    async fn deliver(&self, keys: &EndpointKeys, payload: &[u8]) -> Result<()>;
}

/// Production delivery over the Web Push protocol with VAPID signing.
pub struct WebPushDelivery {
    client: IsahcWebPushClient,
    vapid_private_key: String,
}

impl WebPushDelivery {
    pub fn new(config: &PushConfig) -> Result<Self> {
        let vapid_private_key = config.vapid_private_key.clone().ok_or_else(|| {
            AppError::InvalidParams("VAPID_PRIVATE_KEY is required for push delivery".into())
        })?;

        let client =
            IsahcWebPushClient::new().map_err(|error| AppError::PushDelivery(error.to_string()))?;

        Ok(Self {
            client,
            vapid_private_key,
        })
    }
}

#[async_trait]
impl PushDelivery for WebPushDelivery {
    async fn deliver(&self, keys: &EndpointKeys, payload: &[u8]) -> Result<()> {
        let subscription = SubscriptionInfo::new(&keys.endpoint, &keys.p256dh, &keys.auth);

        let signature = VapidSignatureBuilder::from_base64_no_sub(&self.vapid_private_key)
            .map_err(|error| AppError::PushDelivery(error.to_string()))?
            .add_sub_info(&subscription)
            .build()
            .map_err(|error| AppError::PushDelivery(error.to_string()))?;

        let mut builder = WebPushMessageBuilder::new(&subscription);
        builder.set_vapid_signature(signature);
        builder.set_payload(ContentEncoding::Aes128Gcm, payload);

        let message = builder
            .build()
            .map_err(|error| AppError::PushDelivery(error.to_string()))?;

        self.client
            .send(message)
            .await
            .map_err(|error| AppError::PushDelivery(error.to_string()))
    }
}

/// Stand-in used when sending is switched off by configuration.
pub struct NoopDelivery;

#[async_trait]
impl PushDelivery for NoopDelivery {
    async fn deliver(&self, _keys: &EndpointKeys, _payload: &[u8]) -> Result<()> {
        Ok(())
    }
}
