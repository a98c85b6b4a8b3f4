pub use super::subscription::Entity as Subscription;
