// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use nhatro_app::{BillStatus, InvoiceStatus, TenantFormInput};
use nhatro_store::{
    BUILDING_OPTIONS, NEW_TENANT_CONTRACT_END, NewBuilding, NewRoomType, NewTenant, Store,
    UNASSIGNED_BUILDING, format_date,
};

fn seeded_store() -> Result<Store> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    store.seed_sample_data()?;
    Ok(store)
}

#[test]
fn seed_inserts_the_sample_rows() -> Result<()> {
    let store = seeded_store()?;

    assert_eq!(store.list_buildings()?.len(), 4);
    assert_eq!(store.list_tenants()?.len(), 5);
    assert_eq!(store.list_invoices()?.len(), 6);
    assert_eq!(store.list_activities()?.len(), 10);
    Ok(())
}

#[test]
fn seeded_rows_keep_insertion_order_and_codes() -> Result<()> {
    let store = seeded_store()?;

    let invoices = store.list_invoices()?;
    let codes: Vec<&str> = invoices
        .iter()
        .map(|invoice| invoice.bill_code.as_str())
        .collect();
    assert_eq!(codes, ["HD001", "HD002", "HD004", "HD005", "HD003", "HD006"]);
    assert_eq!(invoices[0].status, InvoiceStatus::Paid);
    assert_eq!(invoices[0].amount_dong, 3_500_000);

    let tenants = store.list_tenants()?;
    assert_eq!(tenants[0].name, "Trần Thị Bình");
    assert_eq!(tenants[0].bill_status, BillStatus::Unpaid);
    assert_eq!(format_date(tenants[0].contract_end), "2024-11-15");
    Ok(())
}

#[test]
fn seeded_rows_match_the_canonical_fixtures() -> Result<()> {
    let store = seeded_store()?;

    assert_eq!(store.list_buildings()?, nhatro_testkit::sample_buildings());
    assert_eq!(store.list_tenants()?, nhatro_testkit::sample_tenants());
    assert_eq!(store.list_invoices()?, nhatro_testkit::sample_invoices());
    assert_eq!(store.list_activities()?, nhatro_testkit::sample_activities());
    Ok(())
}

#[test]
fn building_options_are_the_fixed_filter_values() -> Result<()> {
    let store = seeded_store()?;
    assert_eq!(store.building_options(), BUILDING_OPTIONS);
    Ok(())
}

#[test]
fn create_tenant_applies_intake_defaults() -> Result<()> {
    let store = seeded_store()?;

    let tenant_id = store.create_tenant(&NewTenant {
        name: "Đỗ Văn Phúc".to_owned(),
        phone: "0987654321".to_owned(),
        zalo: String::new(),
        social_id: "678901234567".to_owned(),
    })?;

    let tenants = store.list_tenants()?;
    let created = tenants
        .iter()
        .find(|tenant| tenant.id == tenant_id)
        .expect("created tenant should be listed");
    assert_eq!(created.zalo, "0987654321");
    assert_eq!(created.building, UNASSIGNED_BUILDING);
    assert_eq!(created.bill_status, BillStatus::Unpaid);
    assert_eq!(format_date(created.contract_end), NEW_TENANT_CONTRACT_END);
    Ok(())
}

#[test]
fn create_tenant_keeps_an_explicit_zalo_number() -> Result<()> {
    let store = seeded_store()?;

    let tenant_id = store.create_tenant(&NewTenant::from(&TenantFormInput {
        name: "Vũ Thị Hoa".to_owned(),
        phone: "0978123456".to_owned(),
        zalo: "0911222333".to_owned(),
        social_id: "789012345678".to_owned(),
    }))?;

    let tenants = store.list_tenants()?;
    let created = tenants
        .iter()
        .find(|tenant| tenant.id == tenant_id)
        .expect("created tenant should be listed");
    assert_eq!(created.zalo, "0911222333");
    Ok(())
}

#[test]
fn create_building_sums_room_counts() -> Result<()> {
    let store = seeded_store()?;

    let building_id = store.create_building(&NewBuilding {
        name: "Tòa nhà mới".to_owned(),
        address: "12 Trần Hưng Đạo, Quận 1, TP.HCM".to_owned(),
        room_types: vec![
            NewRoomType {
                name: "Phòng 1 người".to_owned(),
                room_count: 8,
                price_dong: 3_000_000,
                service_fee_dong: 500_000,
            },
            NewRoomType {
                name: "Phòng 2 người".to_owned(),
                room_count: 4,
                price_dong: 4_500_000,
                service_fee_dong: 500_000,
            },
        ],
    })?;

    let buildings = store.list_buildings()?;
    let created = buildings
        .iter()
        .find(|building| building.id == building_id)
        .expect("created building should be listed");
    assert_eq!(created.total_rooms, 12);
    assert_eq!(created.occupied_rooms, 0);
    assert_eq!(created.room_types.len(), 2);
    assert_eq!(created.room_types[1].price_dong, 4_500_000);
    Ok(())
}

#[test]
fn delete_tenant_removes_the_row_and_rejects_unknown_ids() -> Result<()> {
    let store = seeded_store()?;

    let first = store.list_tenants()?[0].clone();
    store.delete_tenant(first.id)?;
    assert_eq!(store.list_tenants()?.len(), 4);

    let error = store
        .delete_tenant(first.id)
        .expect_err("second delete should fail");
    assert!(error.to_string().contains("not found"));
    Ok(())
}

#[test]
fn delete_building_cascades_to_room_types() -> Result<()> {
    let store = seeded_store()?;

    let building_id = store.create_building(&NewBuilding {
        name: "Tòa nhà tạm".to_owned(),
        address: "99 Lý Thường Kiệt, Quận 10, TP.HCM".to_owned(),
        room_types: vec![NewRoomType {
            name: "Phòng 1 người".to_owned(),
            room_count: 6,
            price_dong: 2_800_000,
            service_fee_dong: 400_000,
        }],
    })?;

    store.delete_building(building_id)?;

    let remaining: i64 = store.raw_connection().query_row(
        "SELECT COUNT(*) FROM room_types WHERE building_id = ?",
        [building_id.get()],
        |row| row.get(0),
    )?;
    assert_eq!(remaining, 0);
    Ok(())
}

#[test]
fn unknown_status_codes_fail_loudly() -> Result<()> {
    let store = seeded_store()?;
    store
        .raw_connection()
        .execute("UPDATE invoices SET status = 'settled' WHERE bill_code = 'HD001'", [])?;

    let error = store
        .list_invoices()
        .expect_err("bad status code should fail");
    assert!(format!("{error:#}").contains("unknown invoice status"));
    Ok(())
}
