// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use nhatro_app::{BuildingId, FormPayload, TabKind, TenantId};
use nhatro_store::{NewBuilding, NewTenant, Store};
use nhatro_tui::ScreenSnapshot;

pub struct StoreRuntime<'a> {
    store: &'a Store,
}

impl<'a> StoreRuntime<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }
}

impl nhatro_tui::AppRuntime for StoreRuntime<'_> {
    fn load_screen(&mut self, tab: TabKind) -> Result<ScreenSnapshot> {
        let snapshot = match tab {
            TabKind::Buildings => ScreenSnapshot::Buildings(self.store.list_buildings()?),
            TabKind::Tenants => ScreenSnapshot::Tenants(self.store.list_tenants()?),
            TabKind::Invoices => ScreenSnapshot::Invoices(self.store.list_invoices()?),
            TabKind::Activities => ScreenSnapshot::Activities(self.store.list_activities()?),
        };
        Ok(snapshot)
    }

    fn submit_form(&mut self, payload: &FormPayload) -> Result<()> {
        // Nothing reaches the store without passing the form rules.
        payload.validate()?;

        match payload {
            FormPayload::Tenant(form) => {
                self.store.create_tenant(&NewTenant::from(form))?;
            }
            FormPayload::Building(form) => {
                self.store.create_building(&NewBuilding::from(form))?;
            }
        }
        Ok(())
    }

    fn delete_row(&mut self, tab: TabKind, row_id: i64) -> Result<()> {
        match tab {
            TabKind::Buildings => self.store.delete_building(BuildingId::new(row_id)),
            TabKind::Tenants => self.store.delete_tenant(TenantId::new(row_id)),
            TabKind::Invoices | TabKind::Activities => {
                bail!("rows on the {} screen cannot be deleted", tab.label())
            }
        }
    }

    fn building_options(&mut self) -> Result<Vec<String>> {
        Ok(self.store.building_options())
    }
}
