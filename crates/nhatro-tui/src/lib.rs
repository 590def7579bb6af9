// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use nhatro_app::{
    ACTIVITIES_PAGE_SIZE, Activity, ActivityKind, AppCommand, AppMode, AppState, BillStatus,
    Building, BuildingFormInput, FormKind, FormPayload, INVOICES_PAGE_SIZE, Invoice,
    InvoiceStatus, ListCommand, ListUiState, RoomTypeFormInput, TENANTS_PAGE_SIZE, TabKind,
    Tenant, TenantFormInput, activity_dimensions, invoice_dimensions, tenant_dimensions,
};
use nhatro_view::{
    ALL_VALUES, FilterDimension, ListRecord, SortDirection, SortState, ViewError, ViewResult,
    ViewState, compute_view,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

const SORT_MARK_ASC: &str = " ↑";
const SORT_MARK_DESC: &str = " ↓";
const FIELD_CURSOR: &str = "▌";

/// Snapshot of one screen's records, loaded through the runtime when the
/// screen becomes active or after a local create/delete.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenSnapshot {
    Buildings(Vec<Building>),
    Tenants(Vec<Tenant>),
    Invoices(Vec<Invoice>),
    Activities(Vec<Activity>),
}

impl ScreenSnapshot {
    pub const fn tab_kind(&self) -> TabKind {
        match self {
            Self::Buildings(_) => TabKind::Buildings,
            Self::Tenants(_) => TabKind::Tenants,
            Self::Invoices(_) => TabKind::Invoices,
            Self::Activities(_) => TabKind::Activities,
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            Self::Buildings(rows) => rows.len(),
            Self::Tenants(rows) => rows.len(),
            Self::Invoices(rows) => rows.len(),
            Self::Activities(rows) => rows.len(),
        }
    }
}

pub trait AppRuntime {
    fn load_screen(&mut self, tab: TabKind) -> Result<ScreenSnapshot>;
    fn submit_form(&mut self, payload: &FormPayload) -> Result<()>;
    fn delete_row(&mut self, tab: TabKind, row_id: i64) -> Result<()>;
    fn building_options(&mut self) -> Result<Vec<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    pub tenants_page_size: usize,
    pub invoices_page_size: usize,
    pub activities_page_size: usize,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            tenants_page_size: TENANTS_PAGE_SIZE,
            invoices_page_size: INVOICES_PAGE_SIZE,
            activities_page_size: ACTIVITIES_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FormMessage {
    kind: MessageKind,
    text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FormField {
    label: &'static str,
    value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FormUiState {
    kind: FormKind,
    fields: Vec<FormField>,
    cursor: usize,
    message: Option<FormMessage>,
}

const TENANT_FIELD_LABELS: [&str; 4] = [
    "Họ và tên *",
    "Số điện thoại *",
    "Số Zalo",
    "Số CCCD/CMND *",
];

const BUILDING_FIELD_LABELS: [&str; 2] = ["Tên tòa nhà *", "Địa chỉ *"];

const ROOM_TYPE_FIELD_LABELS: [&str; 4] = [
    "Tên loại phòng *",
    "Số lượng phòng *",
    "Giá thuê (VNĐ/tháng) *",
    "Phí dịch vụ (VNĐ/tháng)",
];

impl FormUiState {
    fn blank(kind: FormKind) -> Self {
        let fields = match kind {
            FormKind::Tenant => TENANT_FIELD_LABELS
                .into_iter()
                .map(|label| FormField {
                    label,
                    value: String::new(),
                })
                .collect(),
            FormKind::Building => {
                let mut fields: Vec<FormField> = BUILDING_FIELD_LABELS
                    .into_iter()
                    .map(|label| FormField {
                        label,
                        value: String::new(),
                    })
                    .collect();
                fields.extend(blank_room_type_fields());
                fields
            }
        };
        Self {
            kind,
            fields,
            cursor: 0,
            message: None,
        }
    }

    fn room_type_blocks(&self) -> usize {
        match self.kind {
            FormKind::Tenant => 0,
            FormKind::Building => {
                (self.fields.len() - BUILDING_FIELD_LABELS.len()) / ROOM_TYPE_FIELD_LABELS.len()
            }
        }
    }

    fn add_room_type_block(&mut self) {
        if self.kind == FormKind::Building {
            self.fields.extend(blank_room_type_fields());
        }
    }

    fn remove_room_type_block(&mut self) {
        if self.kind == FormKind::Building && self.room_type_blocks() > 1 {
            let new_len = self.fields.len() - ROOM_TYPE_FIELD_LABELS.len();
            self.fields.truncate(new_len);
            self.cursor = self.cursor.min(self.fields.len() - 1);
        }
    }
}

fn blank_room_type_fields() -> Vec<FormField> {
    ROOM_TYPE_FIELD_LABELS
        .into_iter()
        .map(|label| FormField {
            label,
            value: if label == "Phí dịch vụ (VNĐ/tháng)" {
                "500000".to_owned()
            } else {
                String::new()
            },
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
struct ViewData {
    snapshot: Option<ScreenSnapshot>,
    building_options: Vec<String>,
    tenants: ListUiState,
    invoices: ListUiState,
    activities: ListUiState,
    selected_row: usize,
    selected_col: usize,
    search_input: String,
    form: Option<FormUiState>,
    help_visible: bool,
    status_token: u64,
}

impl ViewData {
    fn new(options: UiOptions) -> Self {
        let mut activities = ListUiState::new(options.activities_page_size);
        // The activity feed always reads newest first.
        activities.view.sort = SortState::By {
            field: "occurred_at",
            direction: SortDirection::Desc,
        };
        Self {
            snapshot: None,
            building_options: Vec::new(),
            tenants: ListUiState::new(options.tenants_page_size),
            invoices: ListUiState::new(options.invoices_page_size),
            activities,
            selected_row: 0,
            selected_col: 0,
            search_input: String::new(),
            form: None,
            help_visible: false,
            status_token: 0,
        }
    }

    fn list_for(&self, tab: TabKind) -> Option<&ListUiState> {
        match tab {
            TabKind::Buildings => None,
            TabKind::Tenants => Some(&self.tenants),
            TabKind::Invoices => Some(&self.invoices),
            TabKind::Activities => Some(&self.activities),
        }
    }

    fn list_for_mut(&mut self, tab: TabKind) -> Option<&mut ListUiState> {
        match tab {
            TabKind::Buildings => None,
            TabKind::Tenants => Some(&mut self.tenants),
            TabKind::Invoices => Some(&mut self.invoices),
            TabKind::Activities => Some(&mut self.activities),
        }
    }

    fn dimensions_for(&self, tab: TabKind) -> Vec<FilterDimension> {
        match tab {
            TabKind::Buildings => Vec::new(),
            TabKind::Tenants => tenant_dimensions(&self.building_options),
            TabKind::Invoices => invoice_dimensions(),
            TabKind::Activities => activity_dimensions(&self.building_options),
        }
    }
}

pub fn run_app<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    options: UiOptions,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::new(options);
    let (internal_tx, internal_rx) = mpsc::channel();

    match runtime.building_options() {
        Ok(buildings) => view_data.building_options = buildings,
        Err(error) => {
            state.dispatch(AppCommand::SetStatus(format!("load failed: {error}")));
        }
    }
    if let Err(error) = refresh_snapshot(state, runtime, &mut view_data) {
        state.dispatch(AppCommand::SetStatus(format!("load failed: {error}")));
    }

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(state: &mut AppState, view_data: &mut ViewData, rx: &Receiver<InternalEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn refresh_snapshot<R: AppRuntime>(
    state: &AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
) -> Result<()> {
    let snapshot = runtime.load_screen(state.active_tab)?;
    view_data.snapshot = Some(snapshot);
    clamp_selection(state, view_data);
    Ok(())
}

fn clamp_selection(state: &AppState, view_data: &mut ViewData) {
    let visible = visible_row_count(state, view_data);
    view_data.selected_row = view_data.selected_row.min(visible.saturating_sub(1));
    let columns = columns_for(state.active_tab).len();
    view_data.selected_col = view_data.selected_col.min(columns.saturating_sub(1));
}

/// One table column: display header plus the engine sort key it toggles,
/// if the column is sortable on its screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnSpec {
    label: &'static str,
    sort_field: Option<&'static str>,
}

fn columns_for(tab: TabKind) -> &'static [ColumnSpec] {
    match tab {
        TabKind::Buildings => &[
            ColumnSpec {
                label: "Tên tòa nhà",
                sort_field: None,
            },
            ColumnSpec {
                label: "Địa chỉ",
                sort_field: None,
            },
            ColumnSpec {
                label: "Phòng",
                sort_field: None,
            },
            ColumnSpec {
                label: "% đã thuê",
                sort_field: None,
            },
        ],
        TabKind::Tenants => &[
            ColumnSpec {
                label: "Tên khách thuê",
                sort_field: Some("name"),
            },
            ColumnSpec {
                label: "Tòa nhà",
                sort_field: Some("building"),
            },
            ColumnSpec {
                label: "Trạng thái hóa đơn",
                sort_field: Some("bill_status"),
            },
            ColumnSpec {
                label: "Ngày hết hạn HĐ",
                sort_field: Some("contract_end_date"),
            },
        ],
        TabKind::Invoices => &[
            ColumnSpec {
                label: "Mã hóa đơn",
                sort_field: Some("bill_code"),
            },
            ColumnSpec {
                label: "Tên khách thuê",
                sort_field: Some("tenant_name"),
            },
            ColumnSpec {
                label: "Số tiền",
                sort_field: Some("amount"),
            },
            ColumnSpec {
                label: "Trạng thái",
                sort_field: None,
            },
            ColumnSpec {
                label: "Cập nhật lần cuối",
                sort_field: Some("updated_at"),
            },
        ],
        TabKind::Activities => &[
            ColumnSpec {
                label: "Loại hoạt động",
                sort_field: None,
            },
            ColumnSpec {
                label: "Tòa nhà",
                sort_field: None,
            },
            ColumnSpec {
                label: "Chi tiết",
                sort_field: None,
            },
            ColumnSpec {
                label: "Thời gian",
                sort_field: None,
            },
        ],
    }
}

/// Statistic tiles on the invoice screen, in key order 1-4.
const INVOICE_TILES: [(&str, &str); 4] = [
    (ALL_VALUES, "Hóa đơn đã tạo"),
    ("paid", "Đã thanh toán"),
    ("pending", "Đang chờ"),
    ("overdue", "Quá hạn"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavAction {
    Quit,
    NextTab,
    PrevTab,
    EnterSearch,
    MoveRow(isize),
    MoveColumn(isize),
    SortSelected,
    CycleFilter(usize),
    NextPage,
    PrevPage,
    SelectStatistic(usize),
    OpenCreateForm,
    DeleteSelected,
    ToggleHelp,
}

fn nav_action_for_key(key: KeyEvent) -> Option<NavAction> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Some(NavAction::Quit),
        (KeyCode::Tab, _) => Some(NavAction::NextTab),
        (KeyCode::BackTab, _) => Some(NavAction::PrevTab),
        (KeyCode::Char('/'), _) => Some(NavAction::EnterSearch),
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => {
            Some(NavAction::MoveRow(1))
        }
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => {
            Some(NavAction::MoveRow(-1))
        }
        (KeyCode::Right, _) | (KeyCode::Char('l'), KeyModifiers::NONE) => {
            Some(NavAction::MoveColumn(1))
        }
        (KeyCode::Left, _) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
            Some(NavAction::MoveColumn(-1))
        }
        (KeyCode::Char('s'), KeyModifiers::NONE) => Some(NavAction::SortSelected),
        (KeyCode::Char('f'), KeyModifiers::NONE) => Some(NavAction::CycleFilter(0)),
        (KeyCode::Char('g'), KeyModifiers::NONE) => Some(NavAction::CycleFilter(1)),
        (KeyCode::Char('n'), KeyModifiers::NONE) => Some(NavAction::NextPage),
        (KeyCode::Char('p'), KeyModifiers::NONE) => Some(NavAction::PrevPage),
        (KeyCode::Char('c'), KeyModifiers::NONE) => Some(NavAction::OpenCreateForm),
        (KeyCode::Char('d'), KeyModifiers::NONE) => Some(NavAction::DeleteSelected),
        (KeyCode::Char('?'), _) => Some(NavAction::ToggleHelp),
        (KeyCode::Char(digit @ '1'..='4'), KeyModifiers::NONE) => {
            let index = digit as usize - '1' as usize;
            Some(NavAction::SelectStatistic(index))
        }
        _ => None,
    }
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if view_data.help_visible {
        view_data.help_visible = false;
        return false;
    }

    match state.mode {
        AppMode::Nav => handle_nav_key(state, runtime, view_data, internal_tx, key),
        AppMode::Search => {
            handle_search_key(state, view_data, key);
            false
        }
        AppMode::Form(_) => {
            handle_form_key(state, runtime, view_data, internal_tx, key);
            false
        }
    }
}

fn handle_nav_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    let Some(action) = nav_action_for_key(key) else {
        return false;
    };

    match action {
        NavAction::Quit => return true,
        NavAction::NextTab | NavAction::PrevTab => {
            let command = if action == NavAction::NextTab {
                AppCommand::NextTab
            } else {
                AppCommand::PrevTab
            };
            state.dispatch(command);
            view_data.selected_row = 0;
            view_data.selected_col = 0;
            if let Err(error) = refresh_snapshot(state, runtime, view_data) {
                emit_status(state, view_data, internal_tx, format!("load failed: {error}"));
            }
        }
        NavAction::EnterSearch => {
            if has_search(state.active_tab) {
                view_data.search_input = view_data
                    .list_for(state.active_tab)
                    .map(|list| list.view.search.clone())
                    .unwrap_or_default();
                state.dispatch(AppCommand::EnterSearch);
            } else {
                emit_status(state, view_data, internal_tx, "search unavailable");
            }
        }
        NavAction::MoveRow(delta) => {
            let visible = visible_row_count(state, view_data);
            view_data.selected_row = move_index(view_data.selected_row, delta, visible);
        }
        NavAction::MoveColumn(delta) => {
            let columns = columns_for(state.active_tab).len();
            view_data.selected_col = move_index(view_data.selected_col, delta, columns);
        }
        NavAction::SortSelected => {
            let column = columns_for(state.active_tab)[view_data.selected_col];
            match column.sort_field {
                Some(field) if state.active_tab != TabKind::Activities => {
                    if let Some(list) = view_data.list_for_mut(state.active_tab) {
                        list.dispatch(ListCommand::ClickHeader(field));
                        let direction = match list.view.sort.direction_for(field) {
                            Some(SortDirection::Desc) => "desc",
                            _ => "asc",
                        };
                        emit_status(
                            state,
                            view_data,
                            internal_tx,
                            format!("sort {} {direction}", column.label),
                        );
                    }
                }
                _ => emit_status(state, view_data, internal_tx, "sort unavailable"),
            }
        }
        NavAction::CycleFilter(slot) => {
            let dimensions = view_data.dimensions_for(state.active_tab);
            let Some(dimension) = dimensions.into_iter().nth(slot) else {
                emit_status(state, view_data, internal_tx, "filter unavailable");
                return false;
            };
            if let Some(list) = view_data.list_for_mut(state.active_tab) {
                let current = list.view.filter_value(dimension.name).to_owned();
                let next = next_filter_value(&dimension.values, &current);
                list.dispatch(ListCommand::SelectFilter {
                    dimension: dimension.name,
                    value: next.clone(),
                });
                view_data.selected_row = 0;
                emit_status(
                    state,
                    view_data,
                    internal_tx,
                    format!("{}: {}", dimension.label, filter_display(&next)),
                );
            } else {
                emit_status(state, view_data, internal_tx, "filter unavailable");
            }
        }
        NavAction::NextPage | NavAction::PrevPage => {
            let command = if action == NavAction::NextPage {
                ListCommand::NextPage
            } else {
                ListCommand::PrevPage
            };
            if let Some(list) = view_data.list_for_mut(state.active_tab) {
                list.dispatch(command);
                view_data.selected_row = 0;
            } else {
                emit_status(state, view_data, internal_tx, "pagination unavailable");
            }
        }
        NavAction::SelectStatistic(index) => {
            if state.active_tab == TabKind::Invoices {
                let (value, label) = INVOICE_TILES[index];
                view_data.invoices.dispatch(ListCommand::SelectFilter {
                    dimension: nhatro_app::STATUS_DIMENSION,
                    value: value.to_owned(),
                });
                view_data.selected_row = 0;
                emit_status(state, view_data, internal_tx, label.to_owned());
            }
        }
        NavAction::OpenCreateForm => match form_kind_for(state.active_tab) {
            Some(kind) => {
                view_data.form = Some(FormUiState::blank(kind));
                state.dispatch(AppCommand::OpenForm(kind));
            }
            None => emit_status(state, view_data, internal_tx, "no form on this screen"),
        },
        NavAction::DeleteSelected => {
            delete_selected_row(state, runtime, view_data, internal_tx);
        }
        NavAction::ToggleHelp => {
            view_data.help_visible = true;
        }
    }

    false
}

fn handle_search_key(state: &mut AppState, view_data: &mut ViewData, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            state.dispatch(AppCommand::ExitToNav);
        }
        KeyCode::Backspace => {
            view_data.search_input.pop();
            apply_search(state, view_data);
        }
        KeyCode::Char(ch) => {
            view_data.search_input.push(ch);
            apply_search(state, view_data);
        }
        _ => {}
    }
}

fn apply_search(state: &AppState, view_data: &mut ViewData) {
    let term = view_data.search_input.clone();
    if let Some(list) = view_data.list_for_mut(state.active_tab) {
        list.dispatch(ListCommand::SetSearch(term));
    }
    view_data.selected_row = 0;
}

fn handle_form_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => {
            view_data.form = None;
            state.dispatch(AppCommand::ExitToNav);
        }
        (KeyCode::Enter, _) => submit_active_form(state, runtime, view_data, internal_tx),
        (KeyCode::Down | KeyCode::Tab, _) => {
            if let Some(form) = view_data.form.as_mut() {
                form.cursor = (form.cursor + 1) % form.fields.len();
            }
        }
        (KeyCode::Up | KeyCode::BackTab, _) => {
            if let Some(form) = view_data.form.as_mut() {
                form.cursor = (form.cursor + form.fields.len() - 1) % form.fields.len();
            }
        }
        (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
            if let Some(form) = view_data.form.as_mut() {
                form.add_room_type_block();
            }
        }
        (KeyCode::Char('x'), KeyModifiers::CONTROL) => {
            if let Some(form) = view_data.form.as_mut() {
                form.remove_room_type_block();
            }
        }
        (KeyCode::Backspace, _) => {
            if let Some(form) = view_data.form.as_mut() {
                let cursor = form.cursor;
                form.fields[cursor].value.pop();
            }
        }
        (KeyCode::Char(ch), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            if let Some(form) = view_data.form.as_mut() {
                let cursor = form.cursor;
                form.fields[cursor].value.push(ch);
            }
        }
        _ => {}
    }
}

fn submit_active_form<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(form) = view_data.form.clone() else {
        return;
    };
    let payload = payload_from_form(&form);

    if let Err(error) = payload.validate() {
        if let Some(form) = view_data.form.as_mut() {
            form.message = Some(FormMessage {
                kind: MessageKind::Error,
                text: error.to_string(),
            });
        }
        return;
    }

    match runtime.submit_form(&payload) {
        Err(error) => {
            if let Some(form) = view_data.form.as_mut() {
                form.message = Some(FormMessage {
                    kind: MessageKind::Error,
                    text: format!("{error:#}"),
                });
            }
        }
        Ok(()) => {
            let success = match payload.kind() {
                FormKind::Tenant => "Ghi nhận khách thuê mới thành công!",
                FormKind::Building => "Tạo tòa nhà mới thành công!",
            };
            // A successful create starts the screen over: default search,
            // filters, sort, and page.
            if let Some(list) = view_data.list_for_mut(state.active_tab) {
                list.dispatch(ListCommand::Reset);
            }
            view_data.form = None;
            view_data.selected_row = 0;
            state.dispatch(AppCommand::ExitToNav);
            if let Err(error) = refresh_snapshot(state, runtime, view_data) {
                emit_status(state, view_data, internal_tx, format!("load failed: {error}"));
            } else {
                emit_status(state, view_data, internal_tx, success);
            }
        }
    }
}

fn payload_from_form(form: &FormUiState) -> FormPayload {
    match form.kind {
        FormKind::Tenant => FormPayload::Tenant(TenantFormInput {
            name: form.fields[0].value.clone(),
            phone: form.fields[1].value.clone(),
            zalo: form.fields[2].value.clone(),
            social_id: form.fields[3].value.clone(),
        }),
        FormKind::Building => {
            let room_types = form.fields[BUILDING_FIELD_LABELS.len()..]
                .chunks(ROOM_TYPE_FIELD_LABELS.len())
                .map(|chunk| RoomTypeFormInput {
                    name: chunk[0].value.clone(),
                    room_count: parse_count(&chunk[1].value),
                    price_dong: parse_amount(&chunk[2].value),
                    service_fee_dong: parse_amount(&chunk[3].value),
                })
                .collect();
            FormPayload::Building(BuildingFormInput {
                name: form.fields[0].value.clone(),
                address: form.fields[1].value.clone(),
                room_types,
            })
        }
    }
}

// Unparseable numeric input degrades to zero and is caught by the
// payload's own validation.
fn parse_count(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}

fn parse_amount(raw: &str) -> i64 {
    raw.trim().replace(['.', ','], "").parse().unwrap_or(0)
}

fn delete_selected_row<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(row_id) = selected_row_id(state, view_data) else {
        emit_status(state, view_data, internal_tx, "delete unavailable");
        return;
    };
    match runtime.delete_row(state.active_tab, row_id) {
        Ok(()) => {
            if let Err(error) = refresh_snapshot(state, runtime, view_data) {
                emit_status(state, view_data, internal_tx, format!("load failed: {error}"));
            } else {
                emit_status(state, view_data, internal_tx, "Đã xóa");
            }
        }
        Err(error) => {
            emit_status(state, view_data, internal_tx, format!("delete failed: {error}"));
        }
    }
}

fn selected_row_id(state: &AppState, view_data: &ViewData) -> Option<i64> {
    match (&view_data.snapshot, state.active_tab) {
        (Some(ScreenSnapshot::Buildings(rows)), TabKind::Buildings) => {
            rows.get(view_data.selected_row).map(|row| row.id.get())
        }
        (Some(ScreenSnapshot::Tenants(rows)), TabKind::Tenants) => {
            let view = tenants_view(rows, view_data);
            view.result
                .rows
                .get(view_data.selected_row)
                .map(|row| row.id.get())
        }
        _ => None,
    }
}

fn form_kind_for(tab: TabKind) -> Option<FormKind> {
    match tab {
        TabKind::Buildings => Some(FormKind::Building),
        TabKind::Tenants => Some(FormKind::Tenant),
        TabKind::Invoices | TabKind::Activities => None,
    }
}

const fn has_search(tab: TabKind) -> bool {
    matches!(tab, TabKind::Tenants | TabKind::Invoices)
}

fn move_index(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let last = (len - 1) as isize;
    (current as isize + delta).clamp(0, last) as usize
}

fn next_filter_value(values: &[String], current: &str) -> String {
    if values.is_empty() {
        return ALL_VALUES.to_owned();
    }
    match values.iter().position(|value| value == current) {
        None => values[0].clone(),
        Some(index) if index + 1 < values.len() => values[index + 1].clone(),
        Some(_) => ALL_VALUES.to_owned(),
    }
}

fn filter_display(value: &str) -> &str {
    if value == ALL_VALUES { "Tất cả" } else { value }
}

/// Engine output plus the configuration error it recovered from, if any.
struct ScreenView<R> {
    result: ViewResult<R>,
    fallback: Option<ViewError>,
}

fn compute_view_or_fallback<R>(
    records: &[R],
    dimensions: &[FilterDimension],
    state: &ViewState,
) -> ScreenView<R>
where
    R: ListRecord + Clone,
{
    match compute_view(records, dimensions, state) {
        Ok(result) => ScreenView {
            result,
            fallback: None,
        },
        Err(error) => {
            let mut corrected = state.clone();
            corrected.sort = SortState::Unsorted;
            corrected.page_size = corrected.page_size.max(1);
            let result = compute_view(records, dimensions, &corrected)
                .unwrap_or_else(|_| ViewResult {
                    rows: Vec::new(),
                    total_filtered: 0,
                    total_pages: 0,
                    page: 1,
                    counts: Default::default(),
                });
            ScreenView {
                result,
                fallback: Some(error),
            }
        }
    }
}

fn tenants_view(rows: &[Tenant], view_data: &ViewData) -> ScreenView<Tenant> {
    compute_view_or_fallback(
        rows,
        &tenant_dimensions(&view_data.building_options),
        &view_data.tenants.view,
    )
}

fn invoices_view(rows: &[Invoice], view_data: &ViewData) -> ScreenView<Invoice> {
    compute_view_or_fallback(rows, &invoice_dimensions(), &view_data.invoices.view)
}

fn activities_view(rows: &[Activity], view_data: &ViewData) -> ScreenView<Activity> {
    compute_view_or_fallback(
        rows,
        &activity_dimensions(&view_data.building_options),
        &view_data.activities.view,
    )
}

// --- presentation -------------------------------------------------------

pub fn format_dong(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();
    let offset = digits.len() % 3;
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && index % 3 == offset % 3 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped} ₫")
}

pub fn format_contract_date(value: Date) -> String {
    value
        .format(&format_description!("[year]-[month]-[day]"))
        .expect("date format is valid")
}

/// Invoice timestamps render in storage order, largest unit first.
pub fn format_timestamp(value: PrimitiveDateTime) -> String {
    value
        .format(&format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .expect("datetime format is valid")
}

/// Activity timestamps render time-first, the way the activity feed shows
/// them to Vietnamese users.
pub fn format_activity_time(value: PrimitiveDateTime) -> String {
    value
        .format(&format_description!(
            "[hour]:[minute]:[second] [day]/[month]/[year]"
        ))
        .expect("datetime format is valid")
}

pub const fn bill_status_label(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Paid => "Đã thanh toán",
        BillStatus::Unpaid => "Chưa thanh toán",
        BillStatus::Overdue => "Quá hạn",
    }
}

pub const fn invoice_status_label(status: InvoiceStatus) -> &'static str {
    match status {
        InvoiceStatus::Paid => "Đã thanh toán",
        InvoiceStatus::Pending => "Đang chờ",
        InvoiceStatus::Overdue => "Quá hạn",
    }
}

pub const fn activity_kind_label(kind: ActivityKind) -> &'static str {
    match kind {
        ActivityKind::BillGenerated => "Tạo hóa đơn",
        ActivityKind::BillPaid => "Thanh toán hóa đơn",
        ActivityKind::BillPastDue => "Hóa đơn quá hạn",
        ActivityKind::ContractExpired => "Hợp đồng hết hạn",
        ActivityKind::ContractSigned => "Ký hợp đồng mới",
    }
}

const fn bill_status_color(status: BillStatus) -> Color {
    match status {
        BillStatus::Paid => Color::Green,
        BillStatus::Unpaid => Color::Yellow,
        BillStatus::Overdue => Color::Red,
    }
}

const fn invoice_status_color(status: InvoiceStatus) -> Color {
    match status {
        InvoiceStatus::Paid => Color::Green,
        InvoiceStatus::Pending => Color::Yellow,
        InvoiceStatus::Overdue => Color::Red,
    }
}

fn pagination_text<R>(result: &ViewResult<R>, page_size: usize, noun: &str) -> String {
    if result.total_filtered == 0 {
        return format!("Hiển thị 0 của 0 {noun}    1 / 1");
    }
    let start = (result.page - 1) * page_size + 1;
    let end = (start + result.rows.len()).saturating_sub(1);
    format!(
        "Hiển thị {start}-{end} của {} {noun}    {} / {}",
        result.total_filtered,
        result.page,
        result.total_pages.max(1),
    )
}

fn header_label(column: ColumnSpec, sort: SortState, selected: bool) -> String {
    let mut label = column.label.to_owned();
    if let Some(field) = column.sort_field
        && let Some(direction) = sort.direction_for(field)
    {
        label.push_str(match direction {
            SortDirection::Asc => SORT_MARK_ASC,
            SortDirection::Desc => SORT_MARK_DESC,
        });
    }
    if selected {
        label.insert(0, '[');
        label.push(']');
    }
    label
}

// --- rendering ----------------------------------------------------------

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let selected = TabKind::ALL
        .iter()
        .position(|tab| *tab == state.active_tab)
        .unwrap_or(0);
    let tab_titles = TabKind::ALL
        .iter()
        .map(|tab| tab.label().to_owned())
        .collect::<Vec<String>>();
    let tabs = Tabs::new(tab_titles)
        .block(Block::default().title("nhatro").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    match state.active_tab {
        TabKind::Buildings => render_buildings(frame, layout[1], view_data),
        TabKind::Tenants => render_tenants(frame, layout[1], state, view_data),
        TabKind::Invoices => render_invoices(frame, layout[1], state, view_data),
        TabKind::Activities => render_activities(frame, layout[1], view_data),
    }

    let status = status_text(state);
    let status_widget = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    if let Some(form) = &view_data.form {
        render_form_overlay(frame, form);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 70, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("trợ giúp").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_buildings(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let Some(ScreenSnapshot::Buildings(rows)) = &view_data.snapshot else {
        render_empty(frame, area, "Quản lý Tòa nhà");
        return;
    };

    let body_rows = rows.iter().enumerate().map(|(index, building)| {
        let cells = vec![
            Cell::from(building.name.clone()),
            Cell::from(building.address.clone()),
            Cell::from(format!(
                "{}/{}",
                building.occupied_rooms, building.total_rooms
            )),
            Cell::from(format!("{}% đã thuê", building.occupancy_percent())),
        ];
        style_row(Row::new(cells), index == view_data.selected_row)
    });

    let table = build_table(
        body_rows,
        TabKind::Buildings,
        view_data,
        format!("Quản lý Tòa nhà ({})", rows.len()),
    );
    frame.render_widget(table, area);
}

fn render_tenants(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let Some(ScreenSnapshot::Tenants(rows)) = &view_data.snapshot else {
        render_empty(frame, area, "Quản lý Khách thuê");
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    let view = tenants_view(rows, view_data);
    render_search_and_filter(frame, layout[0], state, view_data, TabKind::Tenants);

    let body_rows = view.result.rows.iter().enumerate().map(|(index, tenant)| {
        let cells = vec![
            Cell::from(tenant.name.clone()),
            Cell::from(tenant.building.clone()),
            Cell::from(bill_status_label(tenant.bill_status))
                .style(Style::default().fg(bill_status_color(tenant.bill_status))),
            Cell::from(format_contract_date(tenant.contract_end)),
        ];
        style_row(Row::new(cells), index == view_data.selected_row)
    });
    let table = build_table(
        body_rows,
        TabKind::Tenants,
        view_data,
        table_title("Quản lý Khách thuê", view.fallback),
    );
    frame.render_widget(table, layout[1]);

    let footer = Paragraph::new(pagination_text(
        &view.result,
        view_data.tenants.view.page_size,
        "khách thuê",
    ));
    frame.render_widget(footer, layout[2]);
}

fn render_invoices(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let Some(ScreenSnapshot::Invoices(rows)) = &view_data.snapshot else {
        render_empty(frame, area, "Quản lý Hóa đơn");
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    let view = invoices_view(rows, view_data);
    render_invoice_tiles(frame, layout[0], view_data, &view);
    render_search_and_filter(frame, layout[1], state, view_data, TabKind::Invoices);

    let body_rows = view.result.rows.iter().enumerate().map(|(index, invoice)| {
        let cells = vec![
            Cell::from(invoice.bill_code.clone()),
            Cell::from(invoice.tenant_name.clone()),
            Cell::from(format_dong(invoice.amount_dong)),
            Cell::from(invoice_status_label(invoice.status))
                .style(Style::default().fg(invoice_status_color(invoice.status))),
            Cell::from(format_timestamp(invoice.updated_at)),
        ];
        style_row(Row::new(cells), index == view_data.selected_row)
    });
    let table = build_table(
        body_rows,
        TabKind::Invoices,
        view_data,
        table_title("Quản lý Hóa đơn", view.fallback),
    );
    frame.render_widget(table, layout[2]);

    let footer = Paragraph::new(pagination_text(
        &view.result,
        view_data.invoices.view.page_size,
        "hóa đơn",
    ));
    frame.render_widget(footer, layout[3]);
}

fn render_invoice_tiles(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    view_data: &ViewData,
    view: &ScreenView<Invoice>,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let active = view_data
        .invoices
        .view
        .filter_value(nhatro_app::STATUS_DIMENSION)
        .to_owned();
    for (index, (value, label)) in INVOICE_TILES.iter().enumerate() {
        let count = view.result.count_for(nhatro_app::STATUS_DIMENSION, value);
        let style = if active == *value {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let tile = Paragraph::new(format!("{count}\n{label}"))
            .style(style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("[{}]", index + 1)),
            );
        frame.render_widget(tile, layout[index]);
    }
}

fn render_activities(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let Some(ScreenSnapshot::Activities(rows)) = &view_data.snapshot else {
        render_empty(frame, area, "Lịch sử Hoạt động");
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(area);

    let view = activities_view(rows, view_data);
    let summary = Paragraph::new(activity_summary_text(view_data, &view)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Bộ lọc  [f] tòa nhà  [g] loại hoạt động"),
    );
    frame.render_widget(summary, layout[0]);

    if view.result.total_filtered == 0 {
        let empty = Paragraph::new(activity_empty_text(view_data)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Lịch sử Hoạt động"),
        );
        frame.render_widget(empty, layout[1]);
    } else {
        let body_rows = view
            .result
            .rows
            .iter()
            .enumerate()
            .map(|(index, activity)| {
                let cells = vec![
                    Cell::from(activity_kind_label(activity.kind)),
                    Cell::from(activity.building.clone()),
                    Cell::from(activity.details.clone()),
                    Cell::from(format_activity_time(activity.occurred_at)),
                ];
                style_row(Row::new(cells), index == view_data.selected_row)
            });
        let table = build_table(
            body_rows,
            TabKind::Activities,
            view_data,
            table_title("Lịch sử Hoạt động", view.fallback),
        );
        frame.render_widget(table, layout[1]);
    }

    let tiles = ActivityKind::ALL
        .iter()
        .map(|kind| {
            format!(
                "{}: {}",
                activity_kind_label(*kind),
                view.result
                    .count_for(nhatro_app::KIND_DIMENSION, kind.as_str())
            )
        })
        .collect::<Vec<String>>()
        .join("   ");
    let footer = Paragraph::new(tiles).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, layout[2]);
}

fn activity_summary_text(view_data: &ViewData, view: &ScreenView<Activity>) -> String {
    let mut text = format!("Hiển thị {} hoạt động", view.result.total_filtered);
    let building = view_data
        .activities
        .view
        .filter_value(nhatro_app::BUILDING_DIMENSION);
    if building != ALL_VALUES {
        text.push_str(&format!(" tại {building}"));
    }
    let kind = view_data
        .activities
        .view
        .filter_value(nhatro_app::KIND_DIMENSION);
    if kind != ALL_VALUES
        && let Some(kind) = ActivityKind::parse(kind)
    {
        text.push_str(&format!(" loại {}", activity_kind_label(kind)));
    }
    text
}

fn activity_empty_text(view_data: &ViewData) -> String {
    let filtered = view_data
        .activities
        .view
        .filter_value(nhatro_app::BUILDING_DIMENSION)
        != ALL_VALUES
        || view_data
            .activities
            .view
            .filter_value(nhatro_app::KIND_DIMENSION)
            != ALL_VALUES;
    let reason = if filtered {
        "Không tìm thấy hoạt động phù hợp với bộ lọc đã chọn"
    } else {
        "Chưa có hoạt động nào được ghi nhận trong hệ thống"
    };
    format!("Không có hoạt động nào\n{reason}")
}

fn render_search_and_filter(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
    tab: TabKind,
) {
    let Some(list) = view_data.list_for(tab) else {
        return;
    };
    let editing = state.mode == AppMode::Search;
    let search = if editing {
        format!("{}{FIELD_CURSOR}", view_data.search_input)
    } else {
        list.view.search.clone()
    };
    let placeholder = match tab {
        TabKind::Tenants => "Tìm kiếm theo tên",
        _ => "Tìm kiếm hóa đơn",
    };
    let mut line = format!("[/] {placeholder}: {search}");
    for dimension in view_data.dimensions_for(tab) {
        let value = list.view.filter_value(dimension.name).to_owned();
        line.push_str(&format!(
            "    [f] {}: {}",
            dimension.label,
            filter_display(&value)
        ));
    }
    let widget = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn build_table<'a, I>(
    rows: I,
    tab: TabKind,
    view_data: &ViewData,
    title: String,
) -> Table<'a>
where
    I: IntoIterator<Item = Row<'a>>,
{
    let columns = columns_for(tab);
    let sort = view_data
        .list_for(tab)
        .map(|list| list.view.sort)
        .unwrap_or_default();
    let header_cells = columns.iter().enumerate().map(|(index, column)| {
        Cell::from(header_label(*column, sort, index == view_data.selected_col)).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells);
    let widths = vec![Constraint::Min(10); columns.len()];

    Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(Block::default().title(title).borders(Borders::ALL))
}

fn style_row(row: Row<'_>, selected: bool) -> Row<'_> {
    if selected {
        row.style(Style::default().bg(Color::DarkGray))
    } else {
        row
    }
}

fn table_title(base: &str, fallback: Option<ViewError>) -> String {
    match fallback {
        None => base.to_owned(),
        Some(error) => format!("{base} ({error})"),
    }
}

fn render_empty(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str) {
    let empty = Paragraph::new(String::new())
        .block(Block::default().borders(Borders::ALL).title(title.to_owned()));
    frame.render_widget(empty, area);
}

fn render_form_overlay(frame: &mut ratatui::Frame<'_>, form: &FormUiState) {
    let area = centered_rect(64, 72, frame.area());
    frame.render_widget(Clear, area);

    let title = match form.kind {
        FormKind::Tenant => "Ghi nhận khách thuê mới",
        FormKind::Building => "Tạo tòa nhà mới",
    };
    let mut lines = Vec::new();
    for (index, field) in form.fields.iter().enumerate() {
        let marker = if index == form.cursor { FIELD_CURSOR } else { " " };
        lines.push(format!("{marker} {}: {}", field.label, field.value));
        if form.kind == FormKind::Building
            && index + 1 >= BUILDING_FIELD_LABELS.len()
            && (index + 1 - BUILDING_FIELD_LABELS.len()) % ROOM_TYPE_FIELD_LABELS.len() == 0
        {
            lines.push(String::new());
        }
    }
    lines.push(String::new());
    if let Some(message) = &form.message {
        let prefix = match message.kind {
            MessageKind::Success => "✓",
            MessageKind::Error => "✗",
        };
        lines.push(format!("{prefix} {}", message.text));
        lines.push(String::new());
    }
    lines.push(match form.kind {
        FormKind::Tenant => "[Enter] Gửi   [Esc] Đóng".to_owned(),
        FormKind::Building => {
            "[Enter] Gửi   [Esc] Đóng   [Ctrl+T] Thêm loại phòng   [Ctrl+X] Xóa loại phòng"
                .to_owned()
        }
    });

    let widget = Paragraph::new(lines.join("\n"))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn visible_row_count(state: &AppState, view_data: &ViewData) -> usize {
    match (&view_data.snapshot, state.active_tab) {
        (Some(ScreenSnapshot::Buildings(rows)), TabKind::Buildings) => rows.len(),
        (Some(ScreenSnapshot::Tenants(rows)), TabKind::Tenants) => {
            tenants_view(rows, view_data).result.rows.len()
        }
        (Some(ScreenSnapshot::Invoices(rows)), TabKind::Invoices) => {
            invoices_view(rows, view_data).result.rows.len()
        }
        (Some(ScreenSnapshot::Activities(rows)), TabKind::Activities) => {
            activities_view(rows, view_data).result.rows.len()
        }
        _ => 0,
    }
}

fn status_text(state: &AppState) -> String {
    if let Some(status) = &state.status_line {
        return status.clone();
    }
    match state.mode {
        AppMode::Search => "tìm kiếm: gõ để lọc, Enter/Esc để đóng".to_owned(),
        AppMode::Form(_) => "nhập liệu: Enter gửi, Esc đóng".to_owned(),
        AppMode::Nav => {
            let mut hints = vec!["[Tab] chuyển trang", "[↑↓] chọn dòng"];
            if matches!(state.active_tab, TabKind::Tenants | TabKind::Invoices) {
                hints.push("[←→][s] sắp xếp");
                hints.push("[n/p] trang");
            }
            if has_search(state.active_tab) {
                hints.push("[/] tìm kiếm");
            }
            if state.active_tab == TabKind::Invoices {
                hints.push("[1-4] thống kê");
            }
            if form_kind_for(state.active_tab).is_some() {
                hints.push("[c] tạo mới");
                hints.push("[d] xóa");
            }
            hints.push("[?] trợ giúp");
            hints.push("[q] thoát");
            hints.join("  ")
        }
    }
}

fn help_overlay_text() -> String {
    [
        "Tab / Shift+Tab  chuyển giữa các trang",
        "↑ ↓ / j k        chọn dòng",
        "← → / h l        chọn cột",
        "s                sắp xếp theo cột đang chọn (bấm lại để đảo chiều)",
        "/                tìm kiếm (Khách thuê, Hóa đơn)",
        "f, g             đổi bộ lọc của trang",
        "1-4              chọn ô thống kê (Hóa đơn)",
        "n / p            trang sau / trang trước",
        "c                mở biểu mẫu tạo mới (Tòa nhà, Khách thuê)",
        "d                xóa dòng đang chọn (Tòa nhà, Khách thuê)",
        "q                thoát",
    ]
    .join("\n")
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::{
        FormUiState, INVOICE_TILES, NavAction, ScreenView, UiOptions, ViewData,
        activity_kind_label, bill_status_label, compute_view_or_fallback, format_activity_time,
        format_dong, format_timestamp, header_label, invoice_status_label, move_index,
        nav_action_for_key, next_filter_value, pagination_text, payload_from_form,
    };
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use nhatro_app::{
        ActivityKind, BillStatus, FormKind, FormPayload, InvoiceStatus, ListCommand,
        invoice_dimensions,
    };
    use nhatro_view::{SortDirection, SortState, ViewError, ViewState};
    use time::macros::datetime;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn dong_formatting_groups_by_thousands() {
        assert_eq!(format_dong(3_500_000), "3.500.000 ₫");
        assert_eq!(format_dong(500), "500 ₫");
        assert_eq!(format_dong(1_000), "1.000 ₫");
        assert_eq!(format_dong(-42_000), "-42.000 ₫");
    }

    #[test]
    fn timestamps_format_per_screen() {
        let stamp = datetime!(2024-01-15 14:30:00);
        assert_eq!(format_timestamp(stamp), "2024-01-15 14:30:00");
        assert_eq!(format_activity_time(stamp), "14:30:00 15/01/2024");
    }

    #[test]
    fn labels_match_the_product_copy() {
        assert_eq!(bill_status_label(BillStatus::Unpaid), "Chưa thanh toán");
        assert_eq!(invoice_status_label(InvoiceStatus::Pending), "Đang chờ");
        assert_eq!(
            activity_kind_label(ActivityKind::ContractSigned),
            "Ký hợp đồng mới"
        );
    }

    #[test]
    fn filter_cycling_walks_values_then_returns_to_all() {
        let values = vec!["Tòa nhà A".to_owned(), "Tòa nhà B".to_owned()];
        assert_eq!(next_filter_value(&values, "all"), "Tòa nhà A");
        assert_eq!(next_filter_value(&values, "Tòa nhà A"), "Tòa nhà B");
        assert_eq!(next_filter_value(&values, "Tòa nhà B"), "all");
        assert_eq!(next_filter_value(&[], "all"), "all");
    }

    #[test]
    fn nav_keys_map_to_actions() {
        assert_eq!(nav_action_for_key(key(KeyCode::Char('q'))), Some(NavAction::Quit));
        assert_eq!(nav_action_for_key(key(KeyCode::Tab)), Some(NavAction::NextTab));
        assert_eq!(
            nav_action_for_key(key(KeyCode::Char('s'))),
            Some(NavAction::SortSelected)
        );
        assert_eq!(
            nav_action_for_key(key(KeyCode::Char('3'))),
            Some(NavAction::SelectStatistic(2))
        );
        assert_eq!(nav_action_for_key(key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn statistic_tiles_cover_all_then_each_status() {
        assert_eq!(INVOICE_TILES[0].0, "all");
        assert_eq!(INVOICE_TILES[1].0, InvoiceStatus::Paid.as_str());
        assert_eq!(INVOICE_TILES[2].0, InvoiceStatus::Pending.as_str());
        assert_eq!(INVOICE_TILES[3].0, InvoiceStatus::Overdue.as_str());
    }

    #[test]
    fn move_index_clamps_to_bounds() {
        assert_eq!(move_index(0, -1, 5), 0);
        assert_eq!(move_index(4, 1, 5), 4);
        assert_eq!(move_index(2, 1, 5), 3);
        assert_eq!(move_index(0, 1, 0), 0);
    }

    #[test]
    fn fallback_recovers_from_an_unknown_sort_field() {
        let invoices = nhatro_testkit::sample_invoices();
        let mut state = ViewState::new(10);
        state.sort = SortState::By {
            field: "color",
            direction: SortDirection::Asc,
        };
        let ScreenView { result, fallback } =
            compute_view_or_fallback(&invoices, &invoice_dimensions(), &state);
        assert_eq!(fallback, Some(ViewError::UnknownSortField("color")));
        // Unsorted fallback keeps the store order.
        assert_eq!(result.rows[0].bill_code, "HD001");
        assert_eq!(result.total_filtered, 6);
    }

    #[test]
    fn fallback_recovers_from_a_zero_page_size() {
        let invoices = nhatro_testkit::sample_invoices();
        let state = ViewState::new(0);
        let ScreenView { result, fallback } =
            compute_view_or_fallback(&invoices, &invoice_dimensions(), &state);
        assert_eq!(
            fallback,
            Some(ViewError::InvalidConfiguration { page_size: 0 })
        );
        assert_eq!(result.rows.len(), 1);
    }

    #[test]
    fn invoice_pipeline_sorts_by_bill_code() {
        let invoices = nhatro_testkit::sample_invoices();
        let mut view_data = ViewData::new(UiOptions::default());
        view_data.building_options = nhatro_testkit::building_options();
        view_data
            .invoices
            .dispatch(ListCommand::ClickHeader("bill_code"));

        let view = super::invoices_view(&invoices, &view_data);
        let codes: Vec<&str> = view
            .result
            .rows
            .iter()
            .map(|invoice| invoice.bill_code.as_str())
            .collect();
        assert_eq!(codes, ["HD001", "HD002", "HD003", "HD004", "HD005", "HD006"]);
    }

    #[test]
    fn tenant_pipeline_searches_by_name() {
        let tenants = nhatro_testkit::sample_tenants();
        let mut view_data = ViewData::new(UiOptions::default());
        view_data.building_options = nhatro_testkit::building_options();
        view_data
            .tenants
            .dispatch(ListCommand::SetSearch("an".to_owned()));

        let view = super::tenants_view(&tenants, &view_data);
        assert_eq!(view.result.total_filtered, 1);
        assert_eq!(view.result.rows[0].name, "Nguyễn Văn An");
    }

    #[test]
    fn activities_default_to_newest_first() {
        let activities = nhatro_testkit::sample_activities();
        let view_data = {
            let mut view_data = ViewData::new(UiOptions::default());
            view_data.building_options = nhatro_testkit::building_options();
            view_data
        };
        let view = super::activities_view(&activities, &view_data);
        assert_eq!(view.result.rows[0].id.get(), 1);
        let times: Vec<_> = view
            .result
            .rows
            .iter()
            .map(|activity| activity.occurred_at)
            .collect();
        let mut sorted = times.clone();
        sorted.sort_by(|left, right| right.cmp(left));
        assert_eq!(times, sorted);
    }

    #[test]
    fn statistic_selection_and_dropdown_share_one_state() {
        let invoices = nhatro_testkit::sample_invoices();
        let mut view_data = ViewData::new(UiOptions::default());
        view_data.building_options = nhatro_testkit::building_options();

        view_data.invoices.dispatch(ListCommand::SelectFilter {
            dimension: nhatro_app::STATUS_DIMENSION,
            value: "overdue".to_owned(),
        });
        let view = super::invoices_view(&invoices, &view_data);
        assert_eq!(view.result.total_filtered, 2);
        assert_eq!(
            view_data
                .invoices
                .view
                .filter_value(nhatro_app::STATUS_DIMENSION),
            "overdue"
        );
        // Counts are taken over the filtered set, so the active tile and
        // the "all" tile agree while the others drop to zero.
        assert_eq!(view.result.count_for("status", "overdue"), 2);
        assert_eq!(view.result.count_for("status", "paid"), 0);
        assert_eq!(view.result.count_for("status", "all"), 2);
    }

    #[test]
    fn pagination_text_covers_empty_and_clamped_pages() {
        let invoices = nhatro_testkit::sample_invoices();
        let mut view_data = ViewData::new(UiOptions {
            invoices_page_size: 5,
            ..UiOptions::default()
        });
        view_data.building_options = nhatro_testkit::building_options();

        let view = super::invoices_view(&invoices, &view_data);
        assert_eq!(
            pagination_text(&view.result, 5, "hóa đơn"),
            "Hiển thị 1-5 của 6 hóa đơn    1 / 2"
        );

        view_data.invoices.dispatch(ListCommand::NextPage);
        let view = super::invoices_view(&invoices, &view_data);
        assert_eq!(
            pagination_text(&view.result, 5, "hóa đơn"),
            "Hiển thị 6-6 của 6 hóa đơn    2 / 2"
        );

        view_data
            .invoices
            .dispatch(ListCommand::SetSearch("không có".to_owned()));
        let view = super::invoices_view(&invoices, &view_data);
        assert_eq!(
            pagination_text(&view.result, 5, "hóa đơn"),
            "Hiển thị 0 của 0 hóa đơn    1 / 1"
        );
    }

    #[test]
    fn header_labels_show_sort_direction_and_selection() {
        let columns = super::columns_for(nhatro_app::TabKind::Invoices);
        let sort = SortState::Unsorted.click("amount");
        assert_eq!(header_label(columns[2], sort, false), "Số tiền ↑");
        assert_eq!(header_label(columns[2], sort.click("amount"), false), "Số tiền ↓");
        assert_eq!(header_label(columns[0], sort, true), "[Mã hóa đơn]");
    }

    #[test]
    fn tenant_form_payload_collects_field_values() {
        let mut form = FormUiState::blank(FormKind::Tenant);
        form.fields[0].value = "Đỗ Văn Phúc".to_owned();
        form.fields[1].value = "0987654321".to_owned();
        form.fields[3].value = "678901234567".to_owned();

        let FormPayload::Tenant(input) = payload_from_form(&form) else {
            panic!("tenant form should produce a tenant payload");
        };
        assert_eq!(input.name, "Đỗ Văn Phúc");
        assert_eq!(input.zalo, "");
        assert_eq!(input.validate(), Ok(()));
    }

    #[test]
    fn building_form_payload_parses_room_type_blocks() {
        let mut form = FormUiState::blank(FormKind::Building);
        form.fields[0].value = "Tòa nhà mới".to_owned();
        form.fields[1].value = "12 Trần Hưng Đạo, Quận 1".to_owned();
        form.fields[2].value = "Phòng 1 người".to_owned();
        form.fields[3].value = "8".to_owned();
        form.fields[4].value = "3.000.000".to_owned();

        form.add_room_type_block();
        assert_eq!(form.room_type_blocks(), 2);
        form.fields[6].value = "Phòng 2 người".to_owned();
        form.fields[7].value = "4".to_owned();
        form.fields[8].value = "4500000".to_owned();

        let FormPayload::Building(input) = payload_from_form(&form) else {
            panic!("building form should produce a building payload");
        };
        assert_eq!(input.room_types.len(), 2);
        assert_eq!(input.room_types[0].price_dong, 3_000_000);
        assert_eq!(input.room_types[0].service_fee_dong, 500_000);
        assert_eq!(input.room_types[1].room_count, 4);
        assert_eq!(input.validate(), Ok(()));
    }

    #[test]
    fn building_form_keeps_at_least_one_room_type_block() {
        let mut form = FormUiState::blank(FormKind::Building);
        assert_eq!(form.room_type_blocks(), 1);
        form.remove_room_type_block();
        assert_eq!(form.room_type_blocks(), 1);

        form.add_room_type_block();
        form.remove_room_type_block();
        assert_eq!(form.room_type_blocks(), 1);
    }

    #[test]
    fn unparseable_numeric_input_falls_back_to_zero_and_fails_validation() {
        let mut form = FormUiState::blank(FormKind::Building);
        form.fields[0].value = "Tòa nhà mới".to_owned();
        form.fields[1].value = "12 Trần Hưng Đạo".to_owned();
        form.fields[2].value = "Phòng 1 người".to_owned();
        form.fields[3].value = "tám".to_owned();
        form.fields[4].value = "3000000".to_owned();

        let payload = payload_from_form(&form);
        assert!(payload.validate().is_err());
    }
}
