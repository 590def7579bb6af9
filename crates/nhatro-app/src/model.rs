// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};

use crate::ids::*;

/// Payment state of a tenant's latest bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillStatus {
    Paid,
    Unpaid,
    Overdue,
}

impl BillStatus {
    pub const ALL: [Self; 3] = [Self::Paid, Self::Unpaid, Self::Overdue];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Unpaid => "unpaid",
            Self::Overdue => "overdue",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "paid" => Some(Self::Paid),
            "unpaid" => Some(Self::Unpaid),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Overdue,
}

impl InvoiceStatus {
    pub const ALL: [Self; 3] = [Self::Paid, Self::Pending, Self::Overdue];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Overdue => "overdue",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "paid" => Some(Self::Paid),
            "pending" => Some(Self::Pending),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    BillGenerated,
    BillPaid,
    BillPastDue,
    ContractExpired,
    ContractSigned,
}

impl ActivityKind {
    pub const ALL: [Self; 5] = [
        Self::BillGenerated,
        Self::BillPaid,
        Self::BillPastDue,
        Self::ContractExpired,
        Self::ContractSigned,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BillGenerated => "bill_generated",
            Self::BillPaid => "bill_paid",
            Self::BillPastDue => "bill_past_due",
            Self::ContractExpired => "tenant_contract_expired",
            Self::ContractSigned => "tenant_contract_signed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bill_generated" => Some(Self::BillGenerated),
            "bill_paid" => Some(Self::BillPaid),
            "bill_past_due" => Some(Self::BillPastDue),
            "tenant_contract_expired" => Some(Self::ContractExpired),
            "tenant_contract_signed" => Some(Self::ContractSigned),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabKind {
    Buildings,
    Tenants,
    Invoices,
    Activities,
}

impl TabKind {
    pub const ALL: [Self; 4] = [
        Self::Buildings,
        Self::Tenants,
        Self::Invoices,
        Self::Activities,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Buildings => "Tòa nhà",
            Self::Tenants => "Khách thuê",
            Self::Invoices => "Hóa đơn",
            Self::Activities => "Hoạt động",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormKind {
    Tenant,
    Building,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppMode {
    Nav,
    Search,
    Form(FormKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomType {
    pub id: RoomTypeId,
    pub building_id: BuildingId,
    pub name: String,
    pub room_count: i32,
    pub price_dong: i64,
    pub service_fee_dong: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub name: String,
    pub address: String,
    pub occupied_rooms: i32,
    pub total_rooms: i32,
    pub room_types: Vec<RoomType>,
}

impl Building {
    /// Whole-percent occupancy, rounded; 0 when the building has no rooms.
    pub fn occupancy_percent(&self) -> i32 {
        if self.total_rooms <= 0 {
            return 0;
        }
        let ratio = f64::from(self.occupied_rooms) / f64::from(self.total_rooms);
        (ratio * 100.0).round() as i32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    pub phone: String,
    pub zalo: String,
    pub social_id: String,
    pub building: String,
    pub bill_status: BillStatus,
    pub contract_end: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub bill_code: String,
    pub tenant_name: String,
    pub amount_dong: i64,
    pub status: InvoiceStatus,
    pub updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub kind: ActivityKind,
    pub building: String,
    pub details: String,
    pub tenant_name: String,
    pub amount_dong: Option<i64>,
    pub occurred_at: PrimitiveDateTime,
}
