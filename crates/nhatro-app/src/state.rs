// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use nhatro_view::{SortState, ViewState};

use crate::{AppMode, FormKind, TabKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub active_tab: TabKind,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Nav,
            active_tab: TabKind::Buildings,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextTab,
    PrevTab,
    EnterSearch,
    ExitToNav,
    OpenForm(FormKind),
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    TabChanged(TabKind),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextTab => self.rotate_tab(1),
            AppCommand::PrevTab => self.rotate_tab(-1),
            AppCommand::EnterSearch => {
                self.mode = AppMode::Search;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ExitToNav => {
                self.mode = AppMode::Nav;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::OpenForm(kind) => {
                self.mode = AppMode::Form(kind);
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::SetStatus(message) => {
                self.status_line = Some(message.clone());
                vec![AppEvent::StatusUpdated(message)]
            }
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_tab(&mut self, delta: isize) -> Vec<AppEvent> {
        let tabs = TabKind::ALL;
        let current = tabs
            .iter()
            .position(|tab| *tab == self.active_tab)
            .unwrap_or(0) as isize;
        let len = tabs.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active_tab = tabs[next];
        vec![AppEvent::TabChanged(self.active_tab)]
    }
}

/// One list screen's view state plus the transitions the screen's controls
/// are allowed to make on it. Statistic tiles and the filter dropdown both
/// go through [`ListCommand::SelectFilter`], so they cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListUiState {
    pub view: ViewState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListCommand {
    SetSearch(String),
    SelectFilter {
        dimension: &'static str,
        value: String,
    },
    ClickHeader(&'static str),
    NextPage,
    PrevPage,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    SearchChanged(String),
    FilterChanged {
        dimension: &'static str,
        value: String,
    },
    SortChanged(SortState),
    PageChanged(usize),
    ViewReset,
}

impl ListUiState {
    pub fn new(page_size: usize) -> Self {
        Self {
            view: ViewState::new(page_size),
        }
    }

    pub fn dispatch(&mut self, command: ListCommand) -> Vec<ListEvent> {
        match command {
            ListCommand::SetSearch(term) => {
                self.view.search = term.clone();
                let mut events = vec![ListEvent::SearchChanged(term)];
                events.extend(self.reset_page());
                events
            }
            ListCommand::SelectFilter { dimension, value } => {
                self.view.filters.insert(dimension, value.clone());
                // Re-selecting the active value changes nothing visible but
                // still snaps back to the first page.
                self.view.page = 1;
                vec![
                    ListEvent::FilterChanged { dimension, value },
                    ListEvent::PageChanged(1),
                ]
            }
            ListCommand::ClickHeader(field) => {
                self.view.sort = self.view.sort.click(field);
                vec![ListEvent::SortChanged(self.view.sort)]
            }
            ListCommand::NextPage => {
                self.view.page = self.view.page.saturating_add(1);
                vec![ListEvent::PageChanged(self.view.page)]
            }
            ListCommand::PrevPage => {
                if self.view.page > 1 {
                    self.view.page -= 1;
                    vec![ListEvent::PageChanged(self.view.page)]
                } else {
                    Vec::new()
                }
            }
            ListCommand::Reset => {
                self.view = ViewState::new(self.view.page_size);
                vec![ListEvent::ViewReset]
            }
        }
    }

    fn reset_page(&mut self) -> Vec<ListEvent> {
        if self.view.page == 1 {
            Vec::new()
        } else {
            self.view.page = 1;
            vec![ListEvent::PageChanged(1)]
        }
    }
}
