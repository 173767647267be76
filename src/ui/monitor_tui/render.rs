use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Sparkline, Table},
};

use super::app::MonitorApp;
use super::widgets::{colored_gauge, format_watts};
use crate::core::monitor::TickReport;
use crate::ui::formatters::format_uptime;

/// Main render function
pub fn render_ui(frame: &mut Frame, app: &MonitorApp) {
    let area = frame.area();

    let Some(report) = &app.report else {
        render_warmup(frame, area, app);
        return;
    };

    let anomaly = report.anomaly == Some(true);
    let has_banner = anomaly || app.last_failure.is_some();

    let constraints = if has_banner {
        vec![
            Constraint::Length(3), // Header
            Constraint::Length(3), // Spike / failure banner
            Constraint::Length(3), // Utilization gauges
            Constraint::Min(8),    // Power + emissions
            Constraint::Length(6), // Facility-watts trend
            Constraint::Length(1), // Footer
        ]
    } else {
        vec![
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(6),
            Constraint::Length(1),
        ]
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    if has_banner {
        render_header(frame, chunks[0], report);
        render_banner(frame, chunks[1], app, anomaly);
        render_gauges(frame, chunks[2], report);
        render_power_emissions(frame, chunks[3], report);
        render_trend(frame, chunks[4], app);
        render_footer(frame, chunks[5]);
    } else {
        render_header(frame, chunks[0], report);
        render_gauges(frame, chunks[1], report);
        render_power_emissions(frame, chunks[2], report);
        render_trend(frame, chunks[3], app);
        render_footer(frame, chunks[4]);
    }

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_warmup(frame: &mut Frame, area: Rect, app: &MonitorApp) {
    let message = match &app.last_failure {
        Some(error) => format!("Metric collection failed: {} (retrying)", error),
        None => "Collecting first sample...".to_string(),
    };

    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(" ecotop "));
    frame.render_widget(paragraph, area);
}

fn render_header(frame: &mut Frame, area: Rect, report: &TickReport) {
    let freq = match report.snapshot.cpu_frequency_mhz {
        Some(mhz) => format!("{:.1} GHz", mhz as f64 / 1000.0),
        None => "freq n/a".to_string(),
    };

    let host = report.snapshot.hostname.as_deref().unwrap_or("unknown");
    let uptime = format_uptime(report.snapshot.uptime_seconds);

    let line = Line::from(vec![
        Span::styled(
            " ecotop ",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("| {} up {} ", host, uptime)),
        Span::raw(format!("| CPU {} ", freq)),
        Span::raw(format!(
            "| Facility {} (PUE {}) ",
            format_watts(report.power.facility_watts),
            report.power.pue
        )),
        Span::styled(
            format!("| CO2 {:.1} g/h ", report.emissions.hourly_g),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_banner(frame: &mut Frame, area: Rect, app: &MonitorApp, anomaly: bool) {
    let (message, color) = if let Some(error) = &app.last_failure {
        (
            format!("Collection failed: {} (showing last good tick)", error),
            Color::Yellow,
        )
    } else if anomaly {
        (
            "POWER SPIKE: facility draw is above the rolling-mean threshold".to_string(),
            Color::Red,
        )
    } else {
        return;
    };

    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(" attention "));
    frame.render_widget(paragraph, area);
}

fn render_gauges(frame: &mut Frame, area: Rect, report: &TickReport) {
    let snapshot = &report.snapshot;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let cpu_label = format!("CPU {:.1}%", snapshot.cpu_usage_percent);
    let cpu = colored_gauge(snapshot.cpu_usage_percent, &cpu_label)
        .block(Block::default().borders(Borders::ALL).title(" cpu "));
    frame.render_widget(cpu, chunks[0]);

    let memory_label = format!(
        "{:.1}/{:.1} GB",
        snapshot.memory_used_gb, snapshot.memory_total_gb
    );
    let memory = colored_gauge(snapshot.memory_percent, &memory_label)
        .block(Block::default().borders(Borders::ALL).title(" memory "));
    frame.render_widget(memory, chunks[1]);

    let disk_label = format!(
        "{:.0}/{:.0} GB",
        snapshot.disk_used_gb, snapshot.disk_total_gb
    );
    let disk = colored_gauge(snapshot.disk_percent, &disk_label)
        .block(Block::default().borders(Borders::ALL).title(" disk "));
    frame.render_widget(disk, chunks[2]);
}

fn render_power_emissions(frame: &mut Frame, area: Rect, report: &TickReport) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    // Component-wise power table
    let power = &report.power;
    let rows = vec![
        Row::new(vec![
            Cell::from("CPU"),
            Cell::from(format_watts(power.cpu_watts)),
        ]),
        Row::new(vec![
            Cell::from("Memory"),
            Cell::from(format_watts(power.memory_watts)),
        ]),
        Row::new(vec![
            Cell::from("Disk"),
            Cell::from(format_watts(power.disk_watts)),
        ]),
        Row::new(vec![
            Cell::from(Span::styled("IT total", Style::default().add_modifier(Modifier::BOLD))),
            Cell::from(Span::styled(
                format_watts(power.it_total_watts),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ]),
        Row::new(vec![
            Cell::from(Span::styled(
                format!("Facility (PUE {})", power.pue),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Cell::from(Span::styled(
                format_watts(power.facility_watts),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
        ]),
    ];

    let table = Table::new(rows, [Constraint::Length(20), Constraint::Length(12)])
        .block(Block::default().borders(Borders::ALL).title(" power draw "));
    frame.render_widget(table, chunks[0]);

    // Emissions panel (plus GPU readings when present)
    let emissions = &report.emissions;
    let mut lines = vec![
        Line::from(format!("Hourly:  {:.1} g CO2", emissions.hourly_g)),
        Line::from(format!("Daily:   {:.2} kg CO2", emissions.daily_kg)),
        Line::from(format!("Annual:  {:.3} t CO2", emissions.annual_tonnes)),
        Line::from(""),
        Line::from(match report.anomaly {
            Some(true) => Span::styled("draw: SPIKE", Style::default().fg(Color::Red)),
            Some(false) => Span::styled("draw: normal", Style::default().fg(Color::Green)),
            None => Span::styled("draw: baseline warming up", Style::default().fg(Color::DarkGray)),
        }),
    ];

    for gpu in &report.snapshot.gpus {
        lines.push(Line::from(format!(
            "{}: {:.0}% load, {:.0}% mem",
            gpu.name, gpu.load_percent, gpu.memory_percent
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" emissions "));
    frame.render_widget(paragraph, chunks[1]);
}

fn render_trend(frame: &mut Frame, area: Rect, app: &MonitorApp) {
    let history = app.monitor.history();
    let data = history.facility_series();

    let title = format!(
        " facility watts ({}/{} samples) ",
        history.len(),
        history.capacity()
    );

    let sparkline = Sparkline::default()
        .data(&data)
        .style(Style::default().fg(Color::Green))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(sparkline, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(" q: quit | ?: help ")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = 46.min(area.width);
    let height = 9.min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let text = vec![
        Line::from(""),
        Line::from("  q / Esc   quit"),
        Line::from("  ? / h     toggle this help"),
        Line::from(""),
        Line::from("  Power and CO2 figures are model"),
        Line::from("  estimates, not measurements."),
    ];

    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" help "));
    frame.render_widget(paragraph, popup);
}
