use crate::app_state::{App, FocusArea, InputMode, ViewMode, MENU_ITEMS};
use crate::irrigation::IrrigationAction;
use crate::storage::StoreStatus;
use crate::telemetry::NutrientStatus;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Min(8),
        ])
        .split(f.size());

    render_top_bar(f, chunks[0]);

    let middle_chunks = Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(0)])
        .split(chunks[1]);

    render_left_menu(f, middle_chunks[0], app);
    render_main_view(f, middle_chunks[1], app);
    render_bottom_bar(f, chunks[2], app);
}

fn panel_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    }
}

fn heading(text: &str) -> Line<'_> {
    Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )])
}

fn field(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{:<22}", label)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

fn render_top_bar(f: &mut Frame, area: Rect) {
    let title = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));

    let title_text = Line::from(vec![
        Span::styled(
            " FarmTech ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" - Farm Management Dashboard"),
    ]);

    let paragraph = Paragraph::new(title_text)
        .block(title)
        .alignment(ratatui::layout::Alignment::Center);

    f.render_widget(paragraph, area);
}

fn render_left_menu(f: &mut Frame, area: Rect, app: &App) {
    let menu_items: Vec<ListItem> = MENU_ITEMS
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let is_selected = i == app.menu_selected_index;
            let is_active = matches!(
                (i, app.view_mode),
                (0, ViewMode::Home)
                    | (1, ViewMode::Planting)
                    | (2, ViewMode::Inventory)
                    | (3, ViewMode::Monitoring)
                    | (4, ViewMode::Vision)
            );

            let style = if is_selected {
                if app.focus_area == FocusArea::Menu {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                }
            } else if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };

            let prefix = if is_active { "● " } else { "○ " };
            ListItem::new(format!("{}{}", prefix, text)).style(style)
        })
        .collect();

    let title = if app.focus_area == FocusArea::Menu {
        "Menu (Enter)"
    } else {
        "Menu (← focus)"
    };

    let menu = List::new(menu_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(panel_style(app.focus_area == FocusArea::Menu)),
    );

    f.render_widget(menu, area);
}

fn render_main_view(f: &mut Frame, area: Rect, app: &mut App) {
    let focused = app.focus_area == FocusArea::MainView;
    match app.view_mode {
        ViewMode::Home => render_home(f, area, focused),
        ViewMode::Planting => render_planting(f, area, app, focused),
        ViewMode::Inventory => render_inventory(f, area, app, focused),
        ViewMode::Monitoring => render_monitoring(f, area, app, focused),
        ViewMode::Vision => render_vision(f, area, app, focused),
    }
}

fn render_home(f: &mut Frame, area: Rect, focused: bool) {
    let lines = vec![
        heading("Welcome"),
        Line::from(""),
        Line::from("Planting    area and input calculator (plan, crops)"),
        Line::from("Inventory   stock of grain, fertilizer, pesticide and machinery (inventory, add)"),
        Line::from("Monitoring  pump and soil telemetry with irrigation advice (poll, r)"),
        Line::from("Vision      field scan for people, machinery and animals (scan)"),
        Line::from(""),
        Line::from("Press / to type a command, `help` lists them all."),
    ];
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Home")
            .style(panel_style(focused)),
    );
    f.render_widget(paragraph, area);
}

fn render_planting(f: &mut Frame, area: Rect, app: &App, focused: bool) {
    let mut lines = vec![heading("Planting calculator"), Line::from("")];
    match &app.plan {
        Some(plan) => {
            let dims = plan
                .dimensions
                .iter()
                .map(|d| format!("{:.2} m", d))
                .collect::<Vec<_>>()
                .join(" x ");
            lines.push(field("Shape", plan.shape.clone(), Color::White));
            lines.push(field("Dimensions", dims, Color::White));
            if let Some(crop) = &plan.crop {
                lines.push(field("Crop", crop.clone(), Color::Yellow));
            }
            lines.push(field("Input", plan.input_name.clone(), Color::Yellow));
            lines.push(field(
                "Rate",
                format!("{:.2} kg/m²", plan.rate_per_m2),
                Color::White,
            ));
            let area_color = if plan.area > 0.0 {
                Color::Green
            } else {
                Color::Red
            };
            lines.push(field("Area", format!("{:.2} m²", plan.area), area_color));
            lines.push(field(
                "Total input",
                format!("{:.2} kg", plan.total_input),
                Color::Green,
            ));
        }
        None => {
            lines.push(Line::from("No plan yet. Try `plan rectangle 100 50 corn`."));
        }
    }
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Planting")
            .style(panel_style(focused)),
    );
    f.render_widget(paragraph, area);
}

fn render_inventory(f: &mut Frame, area: Rect, app: &mut App, focused: bool) {
    let chunks = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let (indicator, color, detail) = match &app.inventory {
        Some(listing) => {
            let (text, color) = match listing.status {
                StoreStatus::RemoteConnected => ("● ONLINE", Color::Green),
                StoreStatus::LocalFallback => ("● OFFLINE", Color::Yellow),
                StoreStatus::SimulatedEmpty => ("● OFFLINE", Color::Red),
            };
            (text, color, listing.detail.clone())
        }
        None => ("○ not loaded", Color::Gray, "press r to load".to_string()),
    };
    let status = Paragraph::new(Line::from(vec![
        Span::styled(
            indicator,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(detail),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Store"));
    f.render_widget(status, chunks[0]);

    let items: Vec<ListItem> = app
        .inventory
        .as_ref()
        .map(|l| l.records.as_slice())
        .unwrap_or(&[])
        .iter()
        .map(|r| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<24}", r.name), Style::default().fg(Color::White)),
                Span::styled(
                    format!("{:<12}", r.category),
                    Style::default().fg(Color::Magenta),
                ),
                Span::styled(format!("{:>8}", r.quantity), Style::default().fg(Color::Green)),
                Span::raw("  "),
                Span::styled(r.expiration_iso(), Style::default().fg(Color::Yellow)),
            ]))
        })
        .collect();

    let count = items.len();
    let title = if focused {
        format!("Inventory ({} items, r refresh, ↑↓ select)", count)
    } else {
        format!("Inventory ({} items)", count)
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .style(panel_style(focused)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");
    app.inventory_state.select(Some(app.inventory_selected));
    f.render_stateful_widget(list, chunks[1], &mut app.inventory_state);
}

fn action_color(action: IrrigationAction, critical: bool) -> Color {
    if critical {
        return Color::Red;
    }
    match action {
        IrrigationAction::TurnOnPump => Color::Yellow,
        IrrigationAction::TurnOffPump => Color::Blue,
        IrrigationAction::Monitor => Color::Green,
        _ => Color::Gray,
    }
}

fn render_monitoring(f: &mut Frame, area: Rect, app: &App, focused: bool) {
    let mut lines = vec![heading("Pump and soil telemetry"), Line::from("")];
    match &app.sample {
        Some(s) => {
            lines.push(field("Source", s.source_label.clone(), Color::Magenta));
            lines.push(Line::from(""));
            lines.push(field(
                "Machine temperature",
                format!("{:.1} °C ({})", s.machine_temperature, s.temperature_alarm),
                Color::White,
            ));
            lines.push(field(
                "Machine vibration",
                format!("{:.2} ({})", s.machine_vibration, s.vibration_alarm),
                Color::White,
            ));
            lines.push(field(
                "Machine distance",
                format!("{:.1} cm", s.machine_distance),
                Color::White,
            ));
            lines.push(field(
                "Soil humidity",
                format!("{:.1} %", s.soil_humidity),
                Color::White,
            ));
            let nutrient_color = match s.soil_nutrient_status {
                NutrientStatus::Ideal => Color::Green,
                NutrientStatus::LowRequiresCorrection => Color::Yellow,
            };
            lines.push(field(
                "Soil pH",
                format!("{:.1} ({})", s.soil_ph, s.soil_nutrient_status),
                nutrient_color,
            ));
        }
        None => lines.push(Line::from("No reading yet. Press r or run `poll`.")),
    }

    lines.push(Line::from(""));
    let color = action_color(app.decision.action, app.decision.is_critical);
    lines.push(Line::from(vec![
        Span::raw(format!("{:<22}", "Irrigation")),
        Span::styled(
            app.decision.action.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        app.decision.message.clone(),
        Style::default().fg(color),
    )));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(if focused {
                "Monitoring (r new reading)"
            } else {
                "Monitoring"
            })
            .style(panel_style(focused)),
    );
    f.render_widget(paragraph, area);
}

fn render_vision(f: &mut Frame, area: Rect, app: &App, focused: bool) {
    let mut lines = vec![heading("Field scan"), Line::from("")];
    match &app.scan {
        Some(scan) => {
            lines.push(field("Image", scan.path.display().to_string(), Color::White));
            lines.push(field(
                "Image size",
                format!("{} bytes", scan.image_bytes),
                Color::White,
            ));
            let summary_color = if scan.simulated {
                Color::Yellow
            } else if scan.detections.is_empty() {
                Color::Green
            } else {
                Color::Magenta
            };
            lines.push(Line::from(Span::styled(
                scan.summary.clone(),
                Style::default()
                    .fg(summary_color)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            for d in &scan.detections {
                lines.push(Line::from(vec![
                    Span::styled(format!("{:<24}", d.label), Style::default().fg(Color::White)),
                    Span::styled(
                        format!("{:.0}%", d.confidence * 100.0),
                        Style::default().fg(Color::Cyan),
                    ),
                ]));
            }
        }
        None => lines.push(Line::from("No scan yet. Run `scan <image path>`.")),
    }
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Vision")
            .style(panel_style(focused)),
    );
    f.render_widget(paragraph, area);
}

fn render_bottom_bar(f: &mut Frame, area: Rect, app: &App) {
    let bottom_chunks = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let command_prompt = if app.input_mode == InputMode::Command {
        let mut spans = vec![Span::styled(
            "Command: ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )];
        let cur = app.command_cursor.min(app.command_input.len());
        let (left, right) = app.command_input.split_at(cur);
        spans.push(Span::raw(left));
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(right));

        if let Some(hint) = app.get_completion_hint() {
            spans.push(Span::styled(hint, Style::default().fg(Color::DarkGray)));
        }

        vec![
            Line::from(spans),
            Line::from("Enter run  Esc cancel  Tab complete  ←→ cursor  ↑↓ history"),
        ]
    } else {
        vec![
            Line::from(vec![
                Span::styled("Command: ", Style::default().fg(Color::Yellow)),
                Span::raw("(press / for command mode)"),
            ]),
            Line::from("/ command  ←→ focus  ↑↓ navigate  Enter select  r refresh  q quit"),
        ]
    };
    let command_paragraph = Paragraph::new(command_prompt).block(
        Block::default()
            .borders(Borders::ALL)
            .title(if app.input_mode == InputMode::Command {
                "Command mode"
            } else {
                "Command"
            })
            .style(if app.input_mode == InputMode::Command {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            }),
    );
    f.render_widget(command_paragraph, bottom_chunks[0]);

    let log_items: Vec<ListItem> = app
        .log_messages
        .iter()
        .rev()
        .take(20)
        .map(|msg| {
            let style = if msg.starts_with('✓') {
                Style::default().fg(Color::Green)
            } else if msg.starts_with('✗') {
                Style::default().fg(Color::Red)
            } else if msg.starts_with('⚠') {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(msg.as_str()).style(style)
        })
        .collect();

    let log = List::new(log_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Log ({} entries)", app.log_messages.len()))
            .style(Style::default().fg(Color::White)),
    );
    f.render_widget(log, bottom_chunks[1]);
}
