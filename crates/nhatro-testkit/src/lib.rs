// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Shared fixtures: the canonical sample rows as model values, plus small
//! builders for list-view tests. The vectors here mirror the store's seed
//! data row for row, so tests can assert against them directly.

use nhatro_app::{
    Activity, ActivityId, ActivityKind, BillStatus, Building, BuildingId, Invoice, InvoiceId,
    InvoiceStatus, Tenant, TenantId,
};
use time::macros::{date, datetime};
use time::{Date, PrimitiveDateTime};

pub fn tenant(
    id: i64,
    name: &str,
    phone: &str,
    social_id: &str,
    building: &str,
    bill_status: BillStatus,
    contract_end: Date,
) -> Tenant {
    Tenant {
        id: TenantId::new(id),
        name: name.to_owned(),
        phone: phone.to_owned(),
        zalo: phone.to_owned(),
        social_id: social_id.to_owned(),
        building: building.to_owned(),
        bill_status,
        contract_end,
    }
}

pub fn invoice(
    id: i64,
    bill_code: &str,
    tenant_name: &str,
    amount_dong: i64,
    status: InvoiceStatus,
    updated_at: PrimitiveDateTime,
) -> Invoice {
    Invoice {
        id: InvoiceId::new(id),
        bill_code: bill_code.to_owned(),
        tenant_name: tenant_name.to_owned(),
        amount_dong,
        status,
        updated_at,
    }
}

pub fn activity(
    id: i64,
    kind: ActivityKind,
    building: &str,
    details: &str,
    tenant_name: &str,
    amount_dong: Option<i64>,
    occurred_at: PrimitiveDateTime,
) -> Activity {
    Activity {
        id: ActivityId::new(id),
        kind,
        building: building.to_owned(),
        details: details.to_owned(),
        tenant_name: tenant_name.to_owned(),
        amount_dong,
        occurred_at,
    }
}

pub fn building(id: i64, name: &str, address: &str, occupied: i32, total: i32) -> Building {
    Building {
        id: BuildingId::new(id),
        name: name.to_owned(),
        address: address.to_owned(),
        occupied_rooms: occupied,
        total_rooms: total,
        room_types: Vec::new(),
    }
}

pub fn sample_buildings() -> Vec<Building> {
    vec![
        building(
            1,
            "Tòa nhà Sunshine",
            "123 Nguyễn Văn Linh, Quận 7, TP.HCM",
            12,
            21,
        ),
        building(
            2,
            "Chung cư Green Park",
            "456 Lê Văn Việt, Quận 9, TP.HCM",
            8,
            15,
        ),
        building(
            3,
            "Tòa nhà Central Plaza",
            "789 Võ Văn Tần, Quận 3, TP.HCM",
            25,
            30,
        ),
        building(
            4,
            "Căn hộ Riverside",
            "321 Nguyễn Hữu Cảnh, Bình Thạnh, TP.HCM",
            6,
            12,
        ),
    ]
}

pub fn sample_tenants() -> Vec<Tenant> {
    vec![
        tenant(
            1,
            "Trần Thị Bình",
            "0901234567",
            "123456789012",
            "Tòa nhà B",
            BillStatus::Unpaid,
            date!(2024 - 11 - 15),
        ),
        tenant(
            2,
            "Hoàng Văn Em",
            "0912345678",
            "234567890123",
            "Tòa nhà B",
            BillStatus::Unpaid,
            date!(2025 - 01 - 10),
        ),
        tenant(
            3,
            "Phạm Thị Dung",
            "0923456789",
            "345678901234",
            "Tòa nhà A",
            BillStatus::Overdue,
            date!(2024 - 10 - 05),
        ),
        tenant(
            4,
            "Nguyễn Văn An",
            "0934567890",
            "456789012345",
            "Tòa nhà A",
            BillStatus::Paid,
            date!(2024 - 12 - 31),
        ),
        tenant(
            5,
            "Lê Văn Cường",
            "0945678901",
            "567890123456",
            "Chung cư Sunshine",
            BillStatus::Paid,
            date!(2025 - 03 - 20),
        ),
    ]
}

pub fn sample_invoices() -> Vec<Invoice> {
    vec![
        invoice(
            1,
            "HD001",
            "Nguyễn Văn An",
            3_500_000,
            InvoiceStatus::Paid,
            datetime!(2024-01-15 14:30:00),
        ),
        invoice(
            2,
            "HD002",
            "Trần Thị Bình",
            4_200_000,
            InvoiceStatus::Pending,
            datetime!(2024-01-14 09:15:00),
        ),
        invoice(
            3,
            "HD004",
            "Phạm Thị Dung",
            3_200_000,
            InvoiceStatus::Paid,
            datetime!(2024-01-13 11:20:00),
        ),
        invoice(
            4,
            "HD005",
            "Hoàng Văn Em",
            4_500_000,
            InvoiceStatus::Pending,
            datetime!(2024-01-12 08:30:00),
        ),
        invoice(
            5,
            "HD003",
            "Lê Văn Cường",
            3_800_000,
            InvoiceStatus::Overdue,
            datetime!(2024-01-10 16:45:00),
        ),
        invoice(
            6,
            "HD006",
            "Võ Thị Lan",
            3_900_000,
            InvoiceStatus::Overdue,
            datetime!(2024-01-08 13:15:00),
        ),
    ]
}

pub fn sample_activities() -> Vec<Activity> {
    vec![
        activity(
            1,
            ActivityKind::BillPaid,
            "Tòa nhà A",
            "Nguyễn Văn An đã thanh toán hóa đơn HD001 - 3.500.000₫",
            "Nguyễn Văn An",
            Some(3_500_000),
            datetime!(2025-07-17 16:30:00),
        ),
        activity(
            2,
            ActivityKind::BillGenerated,
            "Tòa nhà B",
            "Tạo hóa đơn HD007 cho Trần Thị Bình - 4.200.000₫",
            "Trần Thị Bình",
            Some(4_200_000),
            datetime!(2025-07-17 15:45:00),
        ),
        activity(
            3,
            ActivityKind::ContractSigned,
            "Chung cư Sunshine",
            "Lê Văn Cường đã ký hợp đồng thuê phòng 301 - Thời hạn: 12 tháng",
            "Lê Văn Cường",
            None,
            datetime!(2025-07-17 14:20:00),
        ),
        activity(
            4,
            ActivityKind::BillPastDue,
            "Tòa nhà A",
            "Hóa đơn HD003 của Phạm Thị Dung đã quá hạn thanh toán - 3.200.000₫",
            "Phạm Thị Dung",
            Some(3_200_000),
            datetime!(2025-07-17 13:10:00),
        ),
        activity(
            5,
            ActivityKind::BillGenerated,
            "Tòa nhà B",
            "Tạo hóa đơn HD008 cho Hoàng Văn Em - 4.500.000₫",
            "Hoàng Văn Em",
            Some(4_500_000),
            datetime!(2025-07-17 12:30:00),
        ),
        activity(
            6,
            ActivityKind::ContractExpired,
            "Chung cư Sunshine",
            "Hợp đồng của Võ Thị Lan đã hết hạn - Phòng 205",
            "Võ Thị Lan",
            None,
            datetime!(2025-07-17 11:15:00),
        ),
        activity(
            7,
            ActivityKind::BillPaid,
            "Tòa nhà A",
            "Phạm Thị Dung đã thanh toán hóa đơn HD004 - 3.200.000₫",
            "Phạm Thị Dung",
            Some(3_200_000),
            datetime!(2025-07-17 10:45:00),
        ),
        activity(
            8,
            ActivityKind::BillPastDue,
            "Tòa nhà B",
            "Hóa đơn HD006 của Trần Thị Bình đã quá hạn thanh toán - 4.200.000₫",
            "Trần Thị Bình",
            Some(4_200_000),
            datetime!(2025-07-17 09:30:00),
        ),
        activity(
            9,
            ActivityKind::ContractSigned,
            "Tòa nhà A",
            "Nguyễn Thị Mai đã ký hợp đồng thuê phòng 102 - Thời hạn: 6 tháng",
            "Nguyễn Thị Mai",
            None,
            datetime!(2025-07-17 08:20:00),
        ),
        activity(
            10,
            ActivityKind::BillGenerated,
            "Chung cư Sunshine",
            "Tạo hóa đơn HD009 cho Lê Văn Cường - 3.800.000₫",
            "Lê Văn Cường",
            Some(3_800_000),
            datetime!(2025-07-17 07:15:00),
        ),
    ]
}

pub fn building_options() -> Vec<String> {
    vec![
        "Tòa nhà A".to_owned(),
        "Tòa nhà B".to_owned(),
        "Chung cư Sunshine".to_owned(),
    ]
}
