mod alert;
mod app_service;
mod app_state;
mod commands;
mod config;
mod http_client;
mod irrigation;
mod planting;
mod storage;
mod telemetry;
mod ui;
mod vision;

use anyhow::Context;
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tokio::sync::mpsc;

use crate::alert::AnyNotifier;
use crate::app_service::{
    add_inventory, crop_lines, plan_view, poll_sensors, refresh_inventory, scan_image,
};
use crate::app_state::{App, AppEvent};
use crate::commands::app_command::HELP_TEXT;
use crate::commands::AppCommand;
use crate::config::AppConfig;
use crate::storage::{AnyStore, InventoryRecord};
use crate::telemetry::{AnySource, SensorSource};
use crate::ui::draw;
use crate::vision::VisionService;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let ts = Local::now().format("%Y%m%d-%H%M%S").to_string();
    let log_dir = std::path::PathBuf::from("logs");
    std::fs::create_dir_all(&log_dir).context("creating logs directory")?;
    let log_path = log_dir.join(format!("farmtech-{}.log", ts));
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("creating log file {}", log_path.display()))?;
    // the terminal belongs to the TUI, so logs go to a file
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter_level(log::LevelFilter::Warn)
        .filter_module("farmtech", log::LevelFilter::Info)
        .filter_module("sqlx", log::LevelFilter::Error)
        .filter_module("sea_orm", log::LevelFilter::Error)
        .init();

    let mut startup_info = Vec::new();
    match dotenv::dotenv() {
        Ok(path) => startup_info.push(format!("✓ loaded {}", path.display())),
        Err(_) => startup_info.push("⚠ no .env file, reading the process environment".to_string()),
    }

    let config = AppConfig::from_env();

    let sensors = AnySource::select(config.sensor_dataset.as_deref());
    startup_info.push(format!("✓ sensor source: {}", sensors.label()));

    let store = AnyStore::from_config(&config.store);
    match &store {
        AnyStore::Remote(_) => startup_info.push(format!(
            "✓ inventory: remote database (timeout {}s, local fallback {})",
            config.store.timeout.as_secs(),
            config.store.local_path.display()
        )),
        AnyStore::Local(file) => startup_info.push(format!(
            "⚠ DATABASE_URL not set, inventory is local only ({})",
            file.path().display()
        )),
    }

    let notifier = AnyNotifier::from_config(&config.alert, config.http_proxy.as_deref());
    match &notifier {
        AnyNotifier::Webhook(_) => startup_info.push("✓ alerts: webhook".to_string()),
        AnyNotifier::Simulated(_) => {
            startup_info.push("⚠ ALERT_WEBHOOK_URL not set, alerts are simulated".to_string())
        }
    }

    let vision = VisionService::from_config(&config.vision, config.http_proxy.as_deref());
    if vision.has_detector() {
        startup_info.push("✓ vision: detector endpoint configured".to_string());
    } else {
        startup_info.push("⚠ DETECTOR_URL not set, field scans run in simulation mode".to_string());
    }
    info!("startup complete, logging to {}", log_path.display());

    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<AppCommand>();
    let (evt_tx, evt_rx) = mpsc::unbounded_channel::<AppEvent>();

    // one actor, one command at a time
    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                AppCommand::Plan {
                    shape,
                    dim1,
                    dim2,
                    rate,
                } => {
                    let view = plan_view(&shape, dim1, dim2, &rate);
                    if view.area == 0.0 {
                        let _ = evt_tx.send(AppEvent::Message(format!(
                            "⚠ area is zero for shape '{}'",
                            shape
                        )));
                    }
                    let _ = evt_tx.send(AppEvent::Plan(view));
                }
                AppCommand::Crops => {
                    for line in crop_lines() {
                        let _ = evt_tx.send(AppEvent::Message(line));
                    }
                }
                AppCommand::Inventory => refresh_inventory(&store, &evt_tx).await,
                AppCommand::Add {
                    name,
                    category,
                    quantity,
                    expiration_date,
                } => {
                    let record = InventoryRecord::new(&name, category, quantity, expiration_date);
                    add_inventory(&store, record, &evt_tx).await;
                }
                AppCommand::Poll => poll_sensors(&sensors, &notifier, &evt_tx).await,
                AppCommand::Scan { path } => scan_image(&vision, &path, &evt_tx).await,
                AppCommand::Help => {
                    let _ = evt_tx.send(AppEvent::Message(HELP_TEXT.to_string()));
                }
                AppCommand::Quit => {
                    let _ = evt_tx.send(AppEvent::Message("quit received".to_string()));
                }
                AppCommand::Unknown(msg) => {
                    let _ = evt_tx.send(AppEvent::Error(msg));
                }
            }
        }
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(startup_info, cmd_tx, evt_rx);
    let res = match app.evt_rx.take() {
        Some(rx) => run_app_loop(&mut terminal, &mut app, rx).await,
        None => Ok(()),
    };

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res.context("dashboard loop failed")
}

async fn run_app_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut evt_rx: mpsc::UnboundedReceiver<AppEvent>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        while let Ok(event) = evt_rx.try_recv() {
            app.apply_event(event);
        }

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key_event(key.code) {
                    return Ok(());
                }
            }
        }
    }
}
