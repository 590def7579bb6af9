// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! In-memory record store for the console. Every connection lives in
//! process memory and is gone on exit; there is deliberately no file-backed
//! variant.

use anyhow::{Context, Result, bail};
use nhatro_app::{
    Activity, ActivityId, ActivityKind, BillStatus, Building, BuildingFormInput, BuildingId,
    Invoice, InvoiceId, InvoiceStatus, RoomType, RoomTypeId, Tenant, TenantFormInput, TenantId,
};
use rusqlite::{Connection, params};

pub mod validation;

pub use validation::{
    DATE_LAYOUT, DATETIME_LAYOUT, ParseError, ParseResult, format_date, format_datetime,
    parse_date, parse_datetime,
};

pub const APP_NAME: &str = "nhatro";

/// Fixed building enumeration backing the tenant and activity filters.
pub const BUILDING_OPTIONS: [&str; 3] = ["Tòa nhà A", "Tòa nhà B", "Chung cư Sunshine"];

/// Building assigned to tenants created from the intake form.
pub const UNASSIGNED_BUILDING: &str = "Chưa phân bổ";

/// Contract end date stamped on newly registered tenants.
pub const NEW_TENANT_CONTRACT_END: &str = "2025-12-31";

const SAMPLE_BUILDINGS: [(&str, &str, i32, i32); 4] = [
    (
        "Tòa nhà Sunshine",
        "123 Nguyễn Văn Linh, Quận 7, TP.HCM",
        12,
        21,
    ),
    (
        "Chung cư Green Park",
        "456 Lê Văn Việt, Quận 9, TP.HCM",
        8,
        15,
    ),
    (
        "Tòa nhà Central Plaza",
        "789 Võ Văn Tần, Quận 3, TP.HCM",
        25,
        30,
    ),
    (
        "Căn hộ Riverside",
        "321 Nguyễn Hữu Cảnh, Bình Thạnh, TP.HCM",
        6,
        12,
    ),
];

const SAMPLE_TENANTS: [(&str, &str, &str, &str, &str, &str); 5] = [
    (
        "Trần Thị Bình",
        "0901234567",
        "123456789012",
        "Tòa nhà B",
        "unpaid",
        "2024-11-15",
    ),
    (
        "Hoàng Văn Em",
        "0912345678",
        "234567890123",
        "Tòa nhà B",
        "unpaid",
        "2025-01-10",
    ),
    (
        "Phạm Thị Dung",
        "0923456789",
        "345678901234",
        "Tòa nhà A",
        "overdue",
        "2024-10-05",
    ),
    (
        "Nguyễn Văn An",
        "0934567890",
        "456789012345",
        "Tòa nhà A",
        "paid",
        "2024-12-31",
    ),
    (
        "Lê Văn Cường",
        "0945678901",
        "567890123456",
        "Chung cư Sunshine",
        "paid",
        "2025-03-20",
    ),
];

const SAMPLE_INVOICES: [(&str, &str, i64, &str, &str); 6] = [
    (
        "HD001",
        "Nguyễn Văn An",
        3_500_000,
        "paid",
        "2024-01-15 14:30:00",
    ),
    (
        "HD002",
        "Trần Thị Bình",
        4_200_000,
        "pending",
        "2024-01-14 09:15:00",
    ),
    (
        "HD004",
        "Phạm Thị Dung",
        3_200_000,
        "paid",
        "2024-01-13 11:20:00",
    ),
    (
        "HD005",
        "Hoàng Văn Em",
        4_500_000,
        "pending",
        "2024-01-12 08:30:00",
    ),
    (
        "HD003",
        "Lê Văn Cường",
        3_800_000,
        "overdue",
        "2024-01-10 16:45:00",
    ),
    (
        "HD006",
        "Võ Thị Lan",
        3_900_000,
        "overdue",
        "2024-01-08 13:15:00",
    ),
];

type SampleActivity = (&'static str, &'static str, &'static str, &'static str, Option<i64>, &'static str);

const SAMPLE_ACTIVITIES: [SampleActivity; 10] = [
    (
        "bill_paid",
        "Tòa nhà A",
        "Nguyễn Văn An đã thanh toán hóa đơn HD001 - 3.500.000₫",
        "Nguyễn Văn An",
        Some(3_500_000),
        "2025-07-17 16:30:00",
    ),
    (
        "bill_generated",
        "Tòa nhà B",
        "Tạo hóa đơn HD007 cho Trần Thị Bình - 4.200.000₫",
        "Trần Thị Bình",
        Some(4_200_000),
        "2025-07-17 15:45:00",
    ),
    (
        "tenant_contract_signed",
        "Chung cư Sunshine",
        "Lê Văn Cường đã ký hợp đồng thuê phòng 301 - Thời hạn: 12 tháng",
        "Lê Văn Cường",
        None,
        "2025-07-17 14:20:00",
    ),
    (
        "bill_past_due",
        "Tòa nhà A",
        "Hóa đơn HD003 của Phạm Thị Dung đã quá hạn thanh toán - 3.200.000₫",
        "Phạm Thị Dung",
        Some(3_200_000),
        "2025-07-17 13:10:00",
    ),
    (
        "bill_generated",
        "Tòa nhà B",
        "Tạo hóa đơn HD008 cho Hoàng Văn Em - 4.500.000₫",
        "Hoàng Văn Em",
        Some(4_500_000),
        "2025-07-17 12:30:00",
    ),
    (
        "tenant_contract_expired",
        "Chung cư Sunshine",
        "Hợp đồng của Võ Thị Lan đã hết hạn - Phòng 205",
        "Võ Thị Lan",
        None,
        "2025-07-17 11:15:00",
    ),
    (
        "bill_paid",
        "Tòa nhà A",
        "Phạm Thị Dung đã thanh toán hóa đơn HD004 - 3.200.000₫",
        "Phạm Thị Dung",
        Some(3_200_000),
        "2025-07-17 10:45:00",
    ),
    (
        "bill_past_due",
        "Tòa nhà B",
        "Hóa đơn HD006 của Trần Thị Bình đã quá hạn thanh toán - 4.200.000₫",
        "Trần Thị Bình",
        Some(4_200_000),
        "2025-07-17 09:30:00",
    ),
    (
        "tenant_contract_signed",
        "Tòa nhà A",
        "Nguyễn Thị Mai đã ký hợp đồng thuê phòng 102 - Thời hạn: 6 tháng",
        "Nguyễn Thị Mai",
        None,
        "2025-07-17 08:20:00",
    ),
    (
        "bill_generated",
        "Chung cư Sunshine",
        "Tạo hóa đơn HD009 cho Lê Văn Cường - 3.800.000₫",
        "Lê Văn Cường",
        Some(3_800_000),
        "2025-07-17 07:15:00",
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTenant {
    pub name: String,
    pub phone: String,
    pub zalo: String,
    pub social_id: String,
}

impl From<&TenantFormInput> for NewTenant {
    fn from(input: &TenantFormInput) -> Self {
        Self {
            name: input.name.clone(),
            phone: input.phone.clone(),
            zalo: input.zalo.clone(),
            social_id: input.social_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoomType {
    pub name: String,
    pub room_count: i32,
    pub price_dong: i64,
    pub service_fee_dong: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBuilding {
    pub name: String,
    pub address: String,
    pub room_types: Vec<NewRoomType>,
}

impl From<&BuildingFormInput> for NewBuilding {
    fn from(input: &BuildingFormInput) -> Self {
        Self {
            name: input.name.clone(),
            address: input.address.clone(),
            room_types: input
                .room_types
                .iter()
                .map(|room_type| NewRoomType {
                    name: room_type.name.clone(),
                    room_count: room_type.room_count,
                    price_dong: room_type.price_dong,
                    service_fee_dong: room_type.service_fee_dong,
                })
                .collect(),
        }
    }
}

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory database")?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .context("configure sqlite pragmas")?;
        Ok(Self { conn })
    }

    pub fn raw_connection(&self) -> &Connection {
        &self.conn
    }

    pub fn bootstrap(&self) -> Result<()> {
        self.conn
            .execute_batch(include_str!("sql/schema.sql"))
            .context("create schema")
    }

    /// Insert the canonical sample rows. Intended to run once, right after
    /// [`Store::bootstrap`].
    pub fn seed_sample_data(&self) -> Result<()> {
        for (name, address, occupied, total) in SAMPLE_BUILDINGS {
            self.conn
                .execute(
                    "
                    INSERT INTO buildings (name, address, occupied_rooms, total_rooms)
                    VALUES (?, ?, ?, ?)
                    ",
                    params![name, address, occupied, total],
                )
                .with_context(|| format!("seed building {name}"))?;
        }

        for (name, phone, social_id, building, bill_status, contract_end) in SAMPLE_TENANTS {
            self.conn
                .execute(
                    "
                    INSERT INTO tenants (name, phone, zalo, social_id, building, bill_status, contract_end)
                    VALUES (?, ?, ?, ?, ?, ?, ?)
                    ",
                    params![name, phone, phone, social_id, building, bill_status, contract_end],
                )
                .with_context(|| format!("seed tenant {name}"))?;
        }

        for (bill_code, tenant_name, amount, status, updated_at) in SAMPLE_INVOICES {
            self.conn
                .execute(
                    "
                    INSERT INTO invoices (bill_code, tenant_name, amount_dong, status, updated_at)
                    VALUES (?, ?, ?, ?, ?)
                    ",
                    params![bill_code, tenant_name, amount, status, updated_at],
                )
                .with_context(|| format!("seed invoice {bill_code}"))?;
        }

        for (kind, building, details, tenant_name, amount, occurred_at) in SAMPLE_ACTIVITIES {
            self.conn
                .execute(
                    "
                    INSERT INTO activities (kind, building, details, tenant_name, amount_dong, occurred_at)
                    VALUES (?, ?, ?, ?, ?, ?)
                    ",
                    params![kind, building, details, tenant_name, amount, occurred_at],
                )
                .with_context(|| format!("seed activity for {tenant_name}"))?;
        }

        Ok(())
    }

    pub fn building_options(&self) -> Vec<String> {
        BUILDING_OPTIONS.iter().map(|name| (*name).to_owned()).collect()
    }

    pub fn list_buildings(&self) -> Result<Vec<Building>> {
        let mut stmt = self
            .conn
            .prepare(
                "
                SELECT id, name, address, occupied_rooms, total_rooms
                FROM buildings
                ORDER BY id
                ",
            )
            .context("prepare buildings query")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Building {
                    id: BuildingId::new(row.get(0)?),
                    name: row.get(1)?,
                    address: row.get(2)?,
                    occupied_rooms: row.get(3)?,
                    total_rooms: row.get(4)?,
                    room_types: Vec::new(),
                })
            })
            .context("query buildings")?;

        let mut buildings = rows
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("collect buildings")?;
        for building in &mut buildings {
            building.room_types = self.room_types_for(building.id)?;
        }
        Ok(buildings)
    }

    fn room_types_for(&self, building_id: BuildingId) -> Result<Vec<RoomType>> {
        let mut stmt = self
            .conn
            .prepare(
                "
                SELECT id, building_id, name, room_count, price_dong, service_fee_dong
                FROM room_types
                WHERE building_id = ?
                ORDER BY id
                ",
            )
            .context("prepare room types query")?;
        let rows = stmt
            .query_map(params![building_id.get()], |row| {
                Ok(RoomType {
                    id: RoomTypeId::new(row.get(0)?),
                    building_id: BuildingId::new(row.get(1)?),
                    name: row.get(2)?,
                    room_count: row.get(3)?,
                    price_dong: row.get(4)?,
                    service_fee_dong: row.get(5)?,
                })
            })
            .context("query room types")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect room types")
    }

    pub fn list_tenants(&self) -> Result<Vec<Tenant>> {
        let mut stmt = self
            .conn
            .prepare(
                "
                SELECT id, name, phone, zalo, social_id, building, bill_status, contract_end
                FROM tenants
                ORDER BY id
                ",
            )
            .context("prepare tenants query")?;
        let rows = stmt
            .query_map([], |row| {
                let status_raw: String = row.get(6)?;
                let bill_status = BillStatus::parse(&status_raw)
                    .ok_or_else(|| bad_code_error(6, format!("unknown bill status {status_raw}")))?;
                let contract_end_raw: String = row.get(7)?;
                let contract_end = parse_date(&contract_end_raw)
                    .map_err(|error| bad_code_error(7, error.to_string()))?;

                Ok(Tenant {
                    id: TenantId::new(row.get(0)?),
                    name: row.get(1)?,
                    phone: row.get(2)?,
                    zalo: row.get(3)?,
                    social_id: row.get(4)?,
                    building: row.get(5)?,
                    bill_status,
                    contract_end,
                })
            })
            .context("query tenants")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect tenants")
    }

    pub fn list_invoices(&self) -> Result<Vec<Invoice>> {
        let mut stmt = self
            .conn
            .prepare(
                "
                SELECT id, bill_code, tenant_name, amount_dong, status, updated_at
                FROM invoices
                ORDER BY id
                ",
            )
            .context("prepare invoices query")?;
        let rows = stmt
            .query_map([], |row| {
                let status_raw: String = row.get(4)?;
                let status = InvoiceStatus::parse(&status_raw).ok_or_else(|| {
                    bad_code_error(4, format!("unknown invoice status {status_raw}"))
                })?;
                let updated_at_raw: String = row.get(5)?;
                let updated_at = parse_datetime(&updated_at_raw)
                    .map_err(|error| bad_code_error(5, error.to_string()))?;

                Ok(Invoice {
                    id: InvoiceId::new(row.get(0)?),
                    bill_code: row.get(1)?,
                    tenant_name: row.get(2)?,
                    amount_dong: row.get(3)?,
                    status,
                    updated_at,
                })
            })
            .context("query invoices")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect invoices")
    }

    pub fn list_activities(&self) -> Result<Vec<Activity>> {
        let mut stmt = self
            .conn
            .prepare(
                "
                SELECT id, kind, building, details, tenant_name, amount_dong, occurred_at
                FROM activities
                ORDER BY id
                ",
            )
            .context("prepare activities query")?;
        let rows = stmt
            .query_map([], |row| {
                let kind_raw: String = row.get(1)?;
                let kind = ActivityKind::parse(&kind_raw)
                    .ok_or_else(|| bad_code_error(1, format!("unknown activity kind {kind_raw}")))?;
                let occurred_at_raw: String = row.get(6)?;
                let occurred_at = parse_datetime(&occurred_at_raw)
                    .map_err(|error| bad_code_error(6, error.to_string()))?;

                Ok(Activity {
                    id: ActivityId::new(row.get(0)?),
                    kind,
                    building: row.get(2)?,
                    details: row.get(3)?,
                    tenant_name: row.get(4)?,
                    amount_dong: row.get(5)?,
                    occurred_at,
                })
            })
            .context("query activities")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect activities")
    }

    /// Register a tenant from the intake form. An empty Zalo number falls
    /// back to the phone number; building and bill status start at their
    /// intake defaults.
    pub fn create_tenant(&self, new_tenant: &NewTenant) -> Result<TenantId> {
        let zalo = if new_tenant.zalo.trim().is_empty() {
            new_tenant.phone.as_str()
        } else {
            new_tenant.zalo.as_str()
        };
        self.conn
            .execute(
                "
                INSERT INTO tenants (name, phone, zalo, social_id, building, bill_status, contract_end)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ",
                params![
                    new_tenant.name,
                    new_tenant.phone,
                    zalo,
                    new_tenant.social_id,
                    UNASSIGNED_BUILDING,
                    BillStatus::Unpaid.as_str(),
                    NEW_TENANT_CONTRACT_END,
                ],
            )
            .context("insert tenant")?;

        Ok(TenantId::new(self.conn.last_insert_rowid()))
    }

    pub fn create_building(&self, new_building: &NewBuilding) -> Result<BuildingId> {
        let total_rooms: i32 = new_building
            .room_types
            .iter()
            .map(|room_type| room_type.room_count)
            .sum();
        self.conn
            .execute(
                "
                INSERT INTO buildings (name, address, occupied_rooms, total_rooms)
                VALUES (?, ?, 0, ?)
                ",
                params![new_building.name, new_building.address, total_rooms],
            )
            .context("insert building")?;
        let building_id = BuildingId::new(self.conn.last_insert_rowid());

        for room_type in &new_building.room_types {
            self.conn
                .execute(
                    "
                    INSERT INTO room_types (building_id, name, room_count, price_dong, service_fee_dong)
                    VALUES (?, ?, ?, ?, ?)
                    ",
                    params![
                        building_id.get(),
                        room_type.name,
                        room_type.room_count,
                        room_type.price_dong,
                        room_type.service_fee_dong,
                    ],
                )
                .with_context(|| format!("insert room type {}", room_type.name))?;
        }

        Ok(building_id)
    }

    pub fn delete_tenant(&self, tenant_id: TenantId) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM tenants WHERE id = ?", params![tenant_id.get()])
            .context("delete tenant")?;
        if rows_affected == 0 {
            bail!("tenant {} not found", tenant_id.get());
        }
        Ok(())
    }

    pub fn delete_building(&self, building_id: BuildingId) -> Result<()> {
        let rows_affected = self
            .conn
            .execute(
                "DELETE FROM buildings WHERE id = ?",
                params![building_id.get()],
            )
            .context("delete building")?;
        if rows_affected == 0 {
            bail!("building {} not found", building_id.get());
        }
        Ok(())
    }
}

fn bad_code_error(column: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        rusqlite::types::Type::Text,
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            message,
        )),
    )
}
