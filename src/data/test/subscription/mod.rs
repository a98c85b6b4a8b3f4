use crate::data::subscription::SubscriptionRepository;
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod fetch_all;
mod insert;
mod recreate;
mod update_role;
