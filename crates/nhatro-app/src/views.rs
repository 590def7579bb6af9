// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Per-domain list-view configuration: which fields are searchable,
//! filterable, and sortable on each screen.

use nhatro_view::{FieldValue, FilterDimension, ListRecord};

use crate::{Activity, Invoice, Tenant};

pub const TENANTS_PAGE_SIZE: usize = 5;
pub const INVOICES_PAGE_SIZE: usize = 10;
pub const ACTIVITIES_PAGE_SIZE: usize = 10;

pub const BUILDING_DIMENSION: &str = "building";
pub const STATUS_DIMENSION: &str = "status";
pub const KIND_DIMENSION: &str = "kind";

impl ListRecord for Tenant {
    const SORT_FIELDS: &'static [&'static str] =
        &["name", "building", "bill_status", "contract_end_date"];

    fn search_text(&self) -> Vec<&str> {
        vec![&self.name]
    }

    fn dimension_value(&self, dimension: &str) -> Option<&str> {
        (dimension == BUILDING_DIMENSION).then_some(self.building.as_str())
    }

    fn sort_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(FieldValue::Text(self.name.clone())),
            "building" => Some(FieldValue::Text(self.building.clone())),
            "bill_status" => Some(FieldValue::Text(self.bill_status.as_str().to_owned())),
            "contract_end_date" => Some(FieldValue::Date(self.contract_end)),
            _ => None,
        }
    }
}

impl ListRecord for Invoice {
    const SORT_FIELDS: &'static [&'static str] =
        &["bill_code", "tenant_name", "amount", "updated_at"];

    fn search_text(&self) -> Vec<&str> {
        vec![&self.bill_code, &self.tenant_name]
    }

    fn dimension_value(&self, dimension: &str) -> Option<&str> {
        (dimension == STATUS_DIMENSION).then_some(self.status.as_str())
    }

    fn sort_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "bill_code" => Some(FieldValue::Text(self.bill_code.clone())),
            "tenant_name" => Some(FieldValue::Text(self.tenant_name.clone())),
            "amount" => Some(FieldValue::Money(self.amount_dong)),
            "updated_at" => Some(FieldValue::DateTime(self.updated_at)),
            _ => None,
        }
    }
}

impl ListRecord for Activity {
    const SORT_FIELDS: &'static [&'static str] = &["occurred_at"];

    fn search_text(&self) -> Vec<&str> {
        Vec::new()
    }

    fn dimension_value(&self, dimension: &str) -> Option<&str> {
        match dimension {
            BUILDING_DIMENSION => Some(&self.building),
            KIND_DIMENSION => Some(self.kind.as_str()),
            _ => None,
        }
    }

    fn sort_value(&self, field: &str) -> Option<FieldValue> {
        (field == "occurred_at").then(|| FieldValue::DateTime(self.occurred_at))
    }
}

pub fn tenant_dimensions(buildings: &[String]) -> Vec<FilterDimension> {
    vec![FilterDimension {
        name: BUILDING_DIMENSION,
        label: "Tòa nhà",
        values: buildings.to_vec(),
        shortcut: false,
    }]
}

pub fn invoice_dimensions() -> Vec<FilterDimension> {
    vec![FilterDimension {
        name: STATUS_DIMENSION,
        label: "Trạng thái",
        values: crate::InvoiceStatus::ALL
            .iter()
            .map(|status| status.as_str().to_owned())
            .collect(),
        shortcut: true,
    }]
}

pub fn activity_dimensions(buildings: &[String]) -> Vec<FilterDimension> {
    vec![
        FilterDimension {
            name: BUILDING_DIMENSION,
            label: "Tòa nhà",
            values: buildings.to_vec(),
            shortcut: false,
        },
        FilterDimension {
            name: KIND_DIMENSION,
            label: "Loại hoạt động",
            values: crate::ActivityKind::ALL
                .iter()
                .map(|kind| kind.as_str().to_owned())
                .collect(),
            shortcut: false,
        },
    ]
}
