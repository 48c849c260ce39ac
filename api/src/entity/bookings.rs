//! `bookings` table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub order_id: String,
    pub order_date: Option<DateTimeWithTimeZone>,
    pub dispatch_date: Option<chrono::NaiveTime>,
    pub shipping_method: String,
    pub selected_items: Json,
    pub order_status: String,
    pub payment_status: String,
    pub total_price: i64,
    pub is_gift: bool,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
