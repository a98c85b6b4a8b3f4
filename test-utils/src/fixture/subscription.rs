//! Subscription fixtures for creating in-memory test data.

use entity::subscription;

/// Default test channel ID.
pub const DEFAULT_CHANNEL_ID: i64 = 123456789;

/// Default test community name.
pub const DEFAULT_COMMUNITY_NAME: &str = "clc";

/// Creates a subscription entity model with default values.
///
/// # Default Values
/// - id: `1`
/// - channel_id: `123456789`
/// - community_name: `"clc"`
/// - role_id: `None`
pub fn entity() -> subscription::Model {
    subscription::Model {
        id: 1,
        channel_id: DEFAULT_CHANNEL_ID,
        community_name: DEFAULT_COMMUNITY_NAME.to_string(),
        role_id: None,
    }
}

/// Creates a builder for a subscription entity model with custom values.
pub fn entity_builder() -> SubscriptionEntityBuilder {
    SubscriptionEntityBuilder { model: entity() }
}

/// Builder for subscription entity models.
pub struct SubscriptionEntityBuilder {
    model: subscription::Model,
}

impl SubscriptionEntityBuilder {
    pub fn id(mut self, id: i32) -> Self {
        self.model.id = id;
        self
    }

    pub fn channel_id(mut self, channel_id: i64) -> Self {
        self.model.channel_id = channel_id;
        self
    }

    pub fn community_name(mut self, community_name: impl Into<String>) -> Self {
        self.model.community_name = community_name.into();
        self
    }

    pub fn role_id(mut self, role_id: Option<i64>) -> Self {
        self.model.role_id = role_id;
        self
    }

    pub fn build(self) -> subscription::Model {
        self.model
    }
}
