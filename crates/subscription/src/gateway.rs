use async_trait::async_trait;
use mealsub_shared::Result;
use serde::Deserialize;

use crate::SubscriptionRequest;

/// Identifier assigned to a created subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SubscriptionId(pub i64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The external subscription-creation endpoint.
#[async_trait]
pub trait SubscriptionGateway: Send + Sync {
    async fn create(&self, request: &SubscriptionRequest) -> Result<SubscriptionId>;
}
