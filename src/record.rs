//! View records and their sort field tables
//!
//! These are the read-only projections the listing endpoints return. The sort
//! core only reads them through the accessors registered below.

use crate::config::EntityKind;
use crate::field::{FieldRegistry, FieldTag, SortKey, ViewRecord};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Lifecycle state of an order, ordered as declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Customer,
}

impl UserRole {
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    #[serde(default)]
    pub category_name: Option<String>,
}

impl ProductView {
    pub fn new(id: i64, name: &str, price: f64, quantity: i32) -> Self {
        Self {
            id,
            name: name.to_string(),
            price,
            quantity,
            category_name: None,
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category_name = Some(category.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub total_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub total_amount: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItemView>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl OrderView {
    pub fn new(id: i64, user_name: &str, total_amount: f64, status: OrderStatus) -> Self {
        Self {
            id,
            user_id: 0,
            user_name: user_name.to_string(),
            total_amount,
            status,
            items: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn placed_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryView {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Id,
    Name,
    Price,
    Quantity,
    Category,
}

impl FieldTag for ProductField {
    fn name(self) -> &'static str {
        match self {
            ProductField::Id => "ID",
            ProductField::Name => "NAME",
            ProductField::Price => "PRICE",
            ProductField::Quantity => "QUANTITY",
            ProductField::Category => "CATEGORY",
        }
    }
}

impl ViewRecord for ProductView {
    type Field = ProductField;

    const KIND: EntityKind = EntityKind::Products;

    fn registry() -> &'static FieldRegistry<Self> {
        static REGISTRY: OnceLock<FieldRegistry<ProductView>> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            FieldRegistry::<Self>::builder()
                .field(ProductField::Id, |p| SortKey::Integer(p.id))
                .field(ProductField::Name, |p| SortKey::text(&p.name))
                .field(ProductField::Price, |p| SortKey::Decimal(p.price))
                .field(ProductField::Quantity, |p| SortKey::Integer(p.quantity.into()))
                .field(ProductField::Category, |p| {
                    SortKey::optional_text(p.category_name.as_deref())
                })
                .build()
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Id,
    Date,
    TotalAmount,
    Status,
    UserName,
}

impl FieldTag for OrderField {
    fn name(self) -> &'static str {
        match self {
            OrderField::Id => "ID",
            OrderField::Date => "DATE",
            OrderField::TotalAmount => "TOTAL_AMOUNT",
            OrderField::Status => "STATUS",
            OrderField::UserName => "USER_NAME",
        }
    }
}

impl ViewRecord for OrderView {
    type Field = OrderField;

    const KIND: EntityKind = EntityKind::Orders;

    fn registry() -> &'static FieldRegistry<Self> {
        static REGISTRY: OnceLock<FieldRegistry<OrderView>> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            FieldRegistry::<Self>::builder()
                .field(OrderField::Id, |o| SortKey::Integer(o.id))
                .field(OrderField::Date, |o| SortKey::optional_timestamp(o.created_at))
                .field(OrderField::TotalAmount, |o| SortKey::Decimal(o.total_amount))
                .field(OrderField::Status, |o| SortKey::Ordinal(o.status.ordinal()))
                .field(OrderField::UserName, |o| SortKey::text(&o.user_name))
                .build()
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

impl FieldTag for CategoryField {
    fn name(self) -> &'static str {
        match self {
            CategoryField::Id => "ID",
            CategoryField::Name => "NAME",
            CategoryField::CreatedAt => "CREATED_AT",
            CategoryField::UpdatedAt => "UPDATED_AT",
        }
    }
}

impl ViewRecord for CategoryView {
    type Field = CategoryField;

    const KIND: EntityKind = EntityKind::Categories;

    fn registry() -> &'static FieldRegistry<Self> {
        static REGISTRY: OnceLock<FieldRegistry<CategoryView>> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            FieldRegistry::<Self>::builder()
                .field(CategoryField::Id, |c| SortKey::Integer(c.id))
                .field(CategoryField::Name, |c| SortKey::text(&c.name))
                .field(CategoryField::CreatedAt, |c| {
                    SortKey::optional_timestamp(c.created_at)
                })
                .field(CategoryField::UpdatedAt, |c| {
                    SortKey::optional_timestamp(c.updated_at)
                })
                .build()
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryField {
    Id,
    ProductName,
    Quantity,
    Location,
}

impl FieldTag for InventoryField {
    fn name(self) -> &'static str {
        match self {
            InventoryField::Id => "ID",
            InventoryField::ProductName => "PRODUCT_NAME",
            InventoryField::Quantity => "QUANTITY",
            InventoryField::Location => "LOCATION",
        }
    }
}

impl ViewRecord for InventoryView {
    type Field = InventoryField;

    const KIND: EntityKind = EntityKind::Inventory;

    fn registry() -> &'static FieldRegistry<Self> {
        static REGISTRY: OnceLock<FieldRegistry<InventoryView>> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            FieldRegistry::<Self>::builder()
                .field(InventoryField::Id, |i| SortKey::Integer(i.id))
                .field(InventoryField::ProductName, |i| SortKey::text(&i.product_name))
                .field(InventoryField::Quantity, |i| SortKey::Integer(i.quantity.into()))
                .field(InventoryField::Location, |i| {
                    SortKey::optional_text(i.location.as_deref())
                })
                .build()
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Id,
    Name,
    Email,
    Role,
}

impl FieldTag for UserField {
    fn name(self) -> &'static str {
        match self {
            UserField::Id => "ID",
            UserField::Name => "NAME",
            UserField::Email => "EMAIL",
            UserField::Role => "ROLE",
        }
    }
}

impl ViewRecord for UserSummaryView {
    type Field = UserField;

    const KIND: EntityKind = EntityKind::Users;

    fn registry() -> &'static FieldRegistry<Self> {
        static REGISTRY: OnceLock<FieldRegistry<UserSummaryView>> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            FieldRegistry::<Self>::builder()
                .field(UserField::Id, |u| SortKey::Integer(u.id))
                .field(UserField::Name, |u| SortKey::text(&u.name))
                .field(UserField::Email, |u| SortKey::text(&u.email))
                .field(UserField::Role, |u| SortKey::Ordinal(u.role.ordinal()))
                .build()
        })
    }
}
