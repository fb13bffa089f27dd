use crate::commands::AppCommand;
use crate::irrigation::IrrigationDecision;
use crate::storage::InventoryListing;
use crate::telemetry::TelemetrySample;
use crate::vision::LabeledDetection;
use crossterm::event::KeyCode;
use ratatui::widgets::ListState;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::sync::mpsc;

pub const MENU_ITEMS: [&str; 5] = ["Home", "Planting", "Inventory", "Monitoring", "Vision"];

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum ViewMode {
    Home,
    Planting,
    Inventory,
    Monitoring,
    Vision,
}

impl ViewMode {
    fn from_menu_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(ViewMode::Home),
            1 => Some(ViewMode::Planting),
            2 => Some(ViewMode::Inventory),
            3 => Some(ViewMode::Monitoring),
            4 => Some(ViewMode::Vision),
            _ => None,
        }
    }

    fn menu_index(self) -> usize {
        match self {
            ViewMode::Home => 0,
            ViewMode::Planting => 1,
            ViewMode::Inventory => 2,
            ViewMode::Monitoring => 3,
            ViewMode::Vision => 4,
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub enum InputMode {
    Normal,
    Command,
}

#[derive(PartialEq, Debug, Clone)]
pub enum FocusArea {
    Menu,
    MainView,
}

/// Result of a `plan` command, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanView {
    pub shape: String,
    pub dimensions: Vec<f64>,
    pub area: f64,
    pub crop: Option<String>,
    pub input_name: String,
    pub rate_per_m2: f64,
    pub total_input: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanView {
    pub path: PathBuf,
    pub summary: String,
    pub detections: Vec<LabeledDetection>,
    pub simulated: bool,
    pub image_bytes: usize,
}

#[derive(Debug)]
pub enum AppEvent {
    Log(String),
    Message(String),
    Error(String),
    Telemetry {
        sample: TelemetrySample,
        decision: IrrigationDecision,
    },
    Inventory(InventoryListing),
    Plan(PlanView),
    Scan(ScanView),
}

pub struct App {
    pub view_mode: ViewMode,
    pub input_mode: InputMode,
    pub focus_area: FocusArea,
    pub menu_selected_index: usize,
    pub plan: Option<PlanView>,
    pub inventory: Option<InventoryListing>,
    pub inventory_selected: usize,
    pub inventory_state: ListState,
    pub sample: Option<TelemetrySample>,
    pub decision: IrrigationDecision,
    pub scan: Option<ScanView>,
    pub command_input: String,
    pub command_cursor: usize,
    pub command_history: Vec<String>,
    pub command_history_index: Option<usize>,
    pub log_messages: Vec<String>,
    pub cmd_tx: mpsc::UnboundedSender<AppCommand>,
    pub evt_rx: Option<mpsc::UnboundedReceiver<AppEvent>>,
}

impl App {
    pub fn new(
        startup_info: Vec<String>,
        cmd_tx: mpsc::UnboundedSender<AppCommand>,
        evt_rx: mpsc::UnboundedReceiver<AppEvent>,
    ) -> App {
        let mut log_messages = vec!["Dashboard started".to_string()];
        log_messages.extend(startup_info);

        App {
            view_mode: ViewMode::Home,
            input_mode: InputMode::Normal,
            focus_area: FocusArea::Menu,
            menu_selected_index: 0,
            plan: None,
            inventory: None,
            inventory_selected: 0,
            inventory_state: {
                let mut s = ListState::default();
                s.select(Some(0));
                s
            },
            sample: None,
            decision: IrrigationDecision::waiting(),
            scan: None,
            command_input: String::new(),
            command_cursor: 0,
            command_history: Vec::new(),
            command_history_index: None,
            log_messages,
            cmd_tx,
            evt_rx: Some(evt_rx),
        }
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Log(msg) | AppEvent::Message(msg) => self.add_log(msg),
            AppEvent::Error(msg) => self.add_log(format!("✗ {}", msg)),
            AppEvent::Telemetry { sample, decision } => {
                self.sample = Some(sample);
                self.decision = decision;
            }
            AppEvent::Inventory(listing) => {
                self.inventory = Some(listing);
                self.clamp_selection();
            }
            AppEvent::Plan(plan) => {
                self.plan = Some(plan);
                self.show(ViewMode::Planting);
            }
            AppEvent::Scan(scan) => {
                self.scan = Some(scan);
                self.show(ViewMode::Vision);
            }
        }
    }

    fn show(&mut self, view: ViewMode) {
        self.view_mode = view;
        self.menu_selected_index = view.menu_index();
    }

    fn inventory_len(&self) -> usize {
        self.inventory.as_ref().map(|l| l.records.len()).unwrap_or(0)
    }

    pub fn clamp_selection(&mut self) {
        let len = self.inventory_len();
        if self.inventory_selected >= len {
            self.inventory_selected = len.saturating_sub(1);
        }
        self.inventory_state.select(Some(self.inventory_selected));
    }

    /// Asks the background worker for fresh data for the current view.
    pub fn request_refresh(&mut self) {
        let cmd = match self.view_mode {
            ViewMode::Inventory => AppCommand::Inventory,
            ViewMode::Monitoring => AppCommand::Poll,
            _ => return,
        };
        let _ = self.cmd_tx.send(cmd);
    }

    /// Suffix that would complete the command being typed.
    pub fn get_completion_hint(&self) -> Option<String> {
        let commands = [
            "plan",
            "crops",
            "inventory",
            "add",
            "poll",
            "scan",
            "help",
            "quit",
        ];
        let input = self.command_input.trim();

        if input.is_empty() {
            return None;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.len() == 1 {
            if parts[0] == "plan" && !self.command_input.ends_with(' ') {
                return Some(" rectangle".to_string());
            }
            for cmd in commands {
                if cmd.starts_with(parts[0]) && cmd != parts[0] {
                    return Some(cmd[parts[0].len()..].to_string());
                }
            }
            return None;
        }

        if parts[0] == "plan" && parts.len() == 2 {
            let subs = ["rectangle", "square", "circle"];
            let cur = parts[1];
            for s in subs {
                if s.starts_with(cur) && s != cur {
                    return Some(s[cur.len()..].to_string());
                }
            }
        }
        None
    }

    fn submit_command(&mut self) {
        let cmd_owned = self.command_input.trim().to_string();
        self.command_input.clear();
        self.command_cursor = 0;
        self.input_mode = InputMode::Normal;
        if cmd_owned.is_empty() {
            return;
        }

        let app_cmd = AppCommand::from_str(&cmd_owned)
            .unwrap_or_else(|_| AppCommand::Unknown(cmd_owned.clone()));
        let _ = self.cmd_tx.send(app_cmd);

        self.command_history.push(cmd_owned);
        self.command_history_index = None;
    }

    /// Returns true when the app should exit.
    pub fn handle_key_event(&mut self, key: KeyCode) -> bool {
        if self.input_mode == InputMode::Command {
            match key {
                KeyCode::Enter => {
                    let quitting = matches!(self.command_input.trim(), "quit" | "exit");
                    self.submit_command();
                    return quitting;
                }
                KeyCode::Esc => {
                    self.command_input.clear();
                    self.command_cursor = 0;
                    self.input_mode = InputMode::Normal;
                }
                KeyCode::Tab => {
                    if let Some(hint) = self.get_completion_hint() {
                        let insert = format!("{} ", hint.trim_start());
                        if !self.command_input.ends_with(' ') && hint.starts_with(' ') {
                            self.command_input.push(' ');
                            self.command_cursor = self.command_input.len();
                        }
                        self.command_input.insert_str(self.command_cursor, &insert);
                        self.command_cursor += insert.len();
                    }
                }
                KeyCode::Up => {
                    if self.command_history.is_empty() {
                        return false;
                    }
                    let next = match self.command_history_index {
                        None => self.command_history.len().saturating_sub(1),
                        Some(i) => i.saturating_sub(1),
                    };
                    self.command_history_index = Some(next);
                    if let Some(cmd) = self.command_history.get(next) {
                        self.command_input = cmd.clone();
                        self.command_cursor = self.command_input.len();
                    }
                }
                KeyCode::Down => {
                    let Some(i) = self.command_history_index else {
                        return false;
                    };
                    let n = i + 1;
                    if n >= self.command_history.len() {
                        self.command_history_index = None;
                        self.command_input.clear();
                        self.command_cursor = 0;
                        return false;
                    }
                    self.command_history_index = Some(n);
                    if let Some(cmd) = self.command_history.get(n) {
                        self.command_input = cmd.clone();
                        self.command_cursor = self.command_input.len();
                    }
                }
                KeyCode::Backspace => {
                    if self.command_cursor > 0 {
                        let idx = self.prev_char_boundary();
                        self.command_input.remove(idx);
                        self.command_cursor = idx;
                    }
                }
                KeyCode::Delete => {
                    if self.command_cursor < self.command_input.len() {
                        self.command_input.remove(self.command_cursor);
                    }
                }
                KeyCode::Left => {
                    if self.command_cursor > 0 {
                        self.command_cursor = self.prev_char_boundary();
                    }
                }
                KeyCode::Right => {
                    if let Some(c) = self.command_input[self.command_cursor..].chars().next() {
                        self.command_cursor += c.len_utf8();
                    }
                }
                KeyCode::Home => self.command_cursor = 0,
                KeyCode::End => self.command_cursor = self.command_input.len(),
                KeyCode::Char(c) => {
                    self.command_input.insert(self.command_cursor, c);
                    self.command_cursor += c.len_utf8();
                }
                _ => {}
            }
            return false;
        }

        match key {
            KeyCode::Char('/') | KeyCode::Char(':') => {
                self.input_mode = InputMode::Command;
                self.command_input.clear();
                self.command_cursor = 0;
                false
            }
            KeyCode::Char('q') => true,
            KeyCode::Left => {
                self.focus_area = FocusArea::Menu;
                false
            }
            KeyCode::Right => {
                self.focus_area = FocusArea::MainView;
                false
            }
            KeyCode::Up => {
                if self.focus_area == FocusArea::Menu {
                    self.menu_selected_index = self.menu_selected_index.saturating_sub(1);
                } else if self.view_mode == ViewMode::Inventory && self.inventory_selected > 0 {
                    self.inventory_selected -= 1;
                    self.inventory_state.select(Some(self.inventory_selected));
                }
                false
            }
            KeyCode::Down => {
                if self.focus_area == FocusArea::Menu {
                    if self.menu_selected_index < MENU_ITEMS.len() - 1 {
                        self.menu_selected_index += 1;
                    }
                } else if self.view_mode == ViewMode::Inventory
                    && self.inventory_selected < self.inventory_len().saturating_sub(1)
                {
                    self.inventory_selected += 1;
                    self.inventory_state.select(Some(self.inventory_selected));
                }
                false
            }
            KeyCode::Enter => {
                if self.focus_area == FocusArea::Menu {
                    if let Some(view) = ViewMode::from_menu_index(self.menu_selected_index) {
                        self.view_mode = view;
                        self.request_refresh();
                    }
                    self.focus_area = FocusArea::MainView;
                }
                false
            }
            KeyCode::Char('r') => {
                self.request_refresh();
                false
            }
            _ => false,
        }
    }

    fn prev_char_boundary(&self) -> usize {
        self.command_input[..self.command_cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}
