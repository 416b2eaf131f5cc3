//! Console - Dashboard Rendering
//!
//! Draws the whole screen from the app state with ratatui widgets. The binary
//! runs it on a crossterm backend; tests draw into a `TestBackend` and read
//! the buffer back.
//!
//! ```text
//! ┌ header ─────────────────────────────────────┐
//! │ navigation tabs                             │
//! │ active panel (tree + table, status, ...)    │
//! │ log tail                                    │
//! │ command line                                │
//! └─────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Tabs},
};

use crate::app::actions::usage;
use crate::app::entities::AppEntities;
use crate::app::input::CommandLine;
use crate::app::navigation::Section;
use crate::constants::{NAME_COLUMN_WIDTH, VALUE_COLUMN_WIDTH};
use crate::domain::config::AppConfig;
use crate::domain::projection::TableView;
use crate::domain::variable::VariableTree;
use crate::state::connection_state::ConnectionState;
use crate::state::log_state::LogState;
use crate::state::project_state::ProjectState;
use crate::theme::colors::{ConsoleStyles, QualityStyle, link_color};
use crate::utils::format::{format_period, format_time, format_timestamp, format_value, truncate};

/// Shown instead of an empty variables table
pub const NO_SELECTION: &str = "No variables selected";

const LOG_PANEL_HEIGHT: u16 = 7;

fn panel(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(ConsoleStyles::border())
        .title(Span::styled(title.into(), ConsoleStyles::title()))
}

/// Draw the full dashboard
pub fn draw(f: &mut Frame<'_>, app: &AppEntities, command: &CommandLine) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(LOG_PANEL_HEIGHT),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, chunks[0]);
    render_navigation(f, app.navigation.active(), chunks[1]);

    let section = app.navigation.active();
    if !section.has_panel() {
        render_under_construction(f, section, chunks[2]);
    } else {
        match section {
            Section::Variables => render_variables(
                f,
                &app.store.snapshot(),
                app.config.simulation.tick_interval(),
                chunks[2],
            ),
            Section::Projects => render_projects(f, &app.projects, chunks[2]),
            Section::Settings => render_settings(f, &app.config, chunks[2]),
            _ => render_connections(f, &app.connection, chunks[2]),
        }
    }

    render_log(f, &app.logs, chunks[3]);
    render_command_line(f, command, chunks[4]);
}

fn render_header(f: &mut Frame<'_>, app: &AppEntities, area: Rect) {
    let project = app
        .projects
        .selected()
        .map(|p| p.name.as_str())
        .unwrap_or("no project");
    let header = Line::from(vec![
        Span::styled("SCADA Console", ConsoleStyles::title()),
        Span::raw("  "),
        Span::raw(format!("[{project}]")),
        Span::styled(format!("  rev {}", app.store.revision()), ConsoleStyles::muted()),
    ]);
    f.render_widget(Paragraph::new(header), area);
}

fn render_navigation(f: &mut Frame<'_>, active: Section, area: Rect) {
    let titles = Section::all()
        .iter()
        .map(|s| format!("{} {}", s.icon(), s.label()));
    let tabs = Tabs::new(titles)
        .select(active.index())
        .highlight_style(ConsoleStyles::highlight())
        .divider("|");
    f.render_widget(tabs, area);
}

/// Group tree on the left, table of visible points on the right
fn render_variables(f: &mut Frame<'_>, tree: &VariableTree, period: Duration, area: Rect) {
    let block = panel(format!("Process variables  Update: {}", format_period(period)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(inner);

    let mut items = Vec::new();
    for group in tree.groups() {
        let marker = if group.expanded { "▾" } else { "▸" };
        items.push(ListItem::new(Line::from(vec![
            Span::styled(marker, ConsoleStyles::title()),
            Span::raw(format!(" {} ({})", group.name, group.children.len())),
            Span::styled(format!(" [{}]", group.id), ConsoleStyles::muted()),
        ])));
        if group.expanded {
            for point in &group.children {
                let check = if point.visible { "[x]" } else { "[ ]" };
                items.push(ListItem::new(Line::from(vec![
                    Span::raw(format!("    {} {}", check, point.name)),
                    Span::styled(format!(" [{}]", point.id), ConsoleStyles::muted()),
                ])));
            }
        }
    }
    f.render_widget(List::new(items), columns[0]);

    let table_block = Block::default()
        .borders(Borders::LEFT)
        .border_style(ConsoleStyles::border());

    match TableView::from_tree(tree) {
        TableView::NoSelection => {
            let placeholder = Paragraph::new(NO_SELECTION)
                .style(ConsoleStyles::muted())
                .alignment(Alignment::Center)
                .block(table_block);
            f.render_widget(placeholder, columns[1]);
        }
        TableView::Rows(points) => {
            let header = Row::new(vec![
                Cell::from("Variable"),
                Cell::from(Line::from("Value").alignment(Alignment::Right)),
                Cell::from("Quality"),
                Cell::from("Time"),
            ])
            .style(ConsoleStyles::table_header());

            let rows = points.into_iter().map(|point| {
                let quality = QualityStyle::for_quality(Some(point.quality));
                Row::new(vec![
                    Cell::from(truncate(&point.name, NAME_COLUMN_WIDTH)),
                    Cell::from(
                        Line::from(format_value(point.value, &point.unit))
                            .alignment(Alignment::Right),
                    ),
                    Cell::from(Span::styled(quality.glyph.to_string(), quality.style())),
                    Cell::from(format_timestamp(point.timestamp.as_ref())),
                ])
            });

            let widths = [
                Constraint::Length(NAME_COLUMN_WIDTH as u16),
                Constraint::Length(VALUE_COLUMN_WIDTH as u16),
                Constraint::Length(7),
                Constraint::Length(8),
            ];
            let table = Table::new(rows, widths).header(header).block(table_block);
            f.render_widget(table, columns[1]);
        }
    }
}

fn render_connections(f: &mut Frame<'_>, state: &ConnectionState, area: Rect) {
    let title = format!(
        "Protocol status  {}/{} online",
        state.online_count(),
        state.all_statuses().len()
    );

    let rows = state.all_statuses().iter().map(|status| {
        let color = Style::default().fg(link_color(status.status));
        Row::new(vec![
            Cell::from(Span::styled("●", color)),
            Cell::from(status.icon.as_str()),
            Cell::from(status.label.as_str()),
            Cell::from(status.summary.as_str()),
            Cell::from(Span::styled(status.status.label(), color)),
        ])
    });
    let widths = [
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(12),
        Constraint::Length(16),
        Constraint::Length(8),
    ];
    f.render_widget(Table::new(rows, widths).block(panel(title)), area);
}

fn render_projects(f: &mut Frame<'_>, state: &ProjectState, area: Rect) {
    let selected = state.selected().map(|p| p.id.as_str());
    let items: Vec<ListItem> = state
        .projects()
        .iter()
        .map(|project| {
            let is_selected = Some(project.id.as_str()) == selected;
            let marker = if is_selected { ">" } else { " " };
            let status = if project.is_active() { "active" } else { "inactive" };
            let name_style = if is_selected {
                ConsoleStyles::highlight()
            } else {
                Style::default()
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(format!("{marker} ")),
                    Span::styled(project.name.clone(), name_style),
                    Span::raw(format!(
                        "  {}  {} connections  {}",
                        status, project.connections_count, project.last_modified
                    )),
                    Span::styled(format!("  [{}]", project.id), ConsoleStyles::muted()),
                ]),
                Line::from(Span::styled(
                    format!("    {}", project.description),
                    ConsoleStyles::muted(),
                )),
            ])
        })
        .collect();
    f.render_widget(List::new(items).block(panel("Projects")), area);
}

fn render_settings(f: &mut Frame<'_>, config: &AppConfig, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled("Network", ConsoleStyles::title())),
        Line::from(format!("  Modbus TCP port   {}", config.network.modbus_port)),
        Line::from(format!("  OPC UA endpoint   {}", config.network.opcua_endpoint)),
        Line::from(format!("  MQTT broker       {}", config.network.mqtt_broker)),
        Line::from(Span::styled("Monitoring", ConsoleStyles::title())),
        Line::from(format!("  Scan rate (ms)    {}", config.monitoring.scan_rate_ms)),
        Line::from(format!("  Log level         {}", config.monitoring.log_level.label())),
        Line::from(format!("  Auto reconnect    {}", config.monitoring.auto_reconnect)),
        Line::from(Span::styled("Simulation", ConsoleStyles::title())),
        Line::from(format!(
            "  Period            {}",
            format_period(config.simulation.tick_interval())
        )),
        Line::from(format!("  Noise             {}", config.simulation.noise.describe())),
    ];
    if let Some(clamp) = &config.simulation.clamp {
        lines.push(Line::from(format!("  Clamp             [{}, {}]", clamp.min, clamp.max)));
    }
    f.render_widget(Paragraph::new(lines).block(panel("Settings")), area);
}

fn render_under_construction(f: &mut Frame<'_>, section: Section, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("Section under construction", ConsoleStyles::title())),
        Line::from(format!("Module \"{}\" is still in development", section.id())),
    ];
    let text = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(panel(section.label()));
    f.render_widget(text, area);
}

fn render_log(f: &mut Frame<'_>, logs: &LogState, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = logs
        .tail(visible)
        .into_iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<5}", entry.level.label()),
                    Style::default().fg(entry.level.color()),
                ),
                Span::styled(
                    format!(" {} ", format_time(&entry.timestamp)),
                    ConsoleStyles::muted(),
                ),
                Span::raw(entry.message.clone()),
            ]))
        })
        .collect();
    f.render_widget(List::new(items).block(panel("Log")), area);
}

fn render_command_line(f: &mut Frame<'_>, command: &CommandLine, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(ConsoleStyles::border())
        .title(Span::styled(usage(), ConsoleStyles::muted()));
    let inner = block.inner(area);
    f.render_widget(Paragraph::new(format!("> {}", command.buffer())).block(block), area);

    let x = inner.x + 2 + command.cursor() as u16;
    if x < inner.right() {
        f.set_cursor(x, inner.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::variable::{Group, Point, Quality};
    use crate::services::ManualClock;
    use chrono::Local;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use std::sync::Arc;

    fn entities_with(tree: Option<VariableTree>) -> AppEntities {
        let clock = Arc::new(ManualClock::new(Local::now()));
        let mut app = match tree {
            Some(tree) => AppEntities::with_tree(AppConfig::default(), tree, clock),
            None => AppEntities::init(AppConfig::default(), clock),
        };
        app.navigation.set_active(Section::Variables);
        app
    }

    fn render(app: &AppEntities) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("terminal");
        terminal
            .draw(|f| draw(f, app, &CommandLine::default()))
            .expect("draw");
        terminal.backend().buffer().clone()
    }

    fn lines(buffer: &Buffer) -> Vec<String> {
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer.get(x, y).symbol())
                    .collect()
            })
            .collect()
    }

    /// Column of `needle` in `line`, counted in cells
    fn column_of(line: &str, needle: &str) -> Option<u16> {
        line.find(needle).map(|byte| line[..byte].chars().count() as u16)
    }

    #[test]
    fn empty_projection_renders_placeholder() {
        let tree = VariableTree::new(vec![Group::new(
            "g",
            "G",
            vec![Point::new("p", "P", 1.0, "", Quality::Good).with_visible(false)],
        )])
        .expect("tree");

        let text = lines(&render(&entities_with(Some(tree)))).join("\n");
        assert!(text.contains(NO_SELECTION));
        assert!(!text.contains("Quality"));
    }

    #[test]
    fn table_lists_visible_points_only() {
        let text = lines(&render(&entities_with(None))).join("\n");

        assert!(text.contains("Update: 2s"));
        assert!(text.contains("23.5 °C"));
        assert!(text.contains("--:--:--"));
        // Hidden point shows in the tree but not in the table
        assert_eq!(text.matches("Temperature_2").count(), 1);
    }

    #[test]
    fn collapsed_group_hides_children_in_tree() {
        let text = lines(&render(&entities_with(None))).join("\n");
        assert!(text.contains("▸ Tank Farm (2)"));
        assert!(!text.contains("Tank_Volume"));
    }

    #[test]
    fn quality_glyphs_line_up_under_header_in_color() {
        let app = entities_with(None);
        let buffer = render(&app);
        let text = lines(&buffer);

        let header_y = text
            .iter()
            .position(|l| l.contains("Variable") && l.contains("Quality"))
            .expect("table header");
        let quality_x = column_of(&text[header_y], "Quality").expect("quality column");

        let points = app.store.visible_points();
        assert!(!points.is_empty());
        for (i, point) in points.iter().enumerate() {
            let y = header_y as u16 + 1 + i as u16;
            let style = QualityStyle::for_quality(Some(point.quality));
            let cell = buffer.get(quality_x, y);

            assert!(text[y as usize].contains(&point.name));
            assert_eq!(cell.symbol(), style.glyph.to_string());
            assert_eq!(cell.fg, style.color);
        }
    }

    #[test]
    fn placeholder_for_sections_without_panel() {
        let mut app = entities_with(None);
        app.navigation.set_active(Section::Signals);

        let text = lines(&render(&app)).join("\n");
        assert!(text.contains("Module \"signals\""));
    }

    #[test]
    fn navigation_bar_shows_icons() {
        let text = lines(&render(&entities_with(None)));
        assert!(text[1].contains("≡ Variables"));
        assert!(text[1].contains("⚙ Settings"));
    }

    #[test]
    fn connections_panel_counts_online_links() {
        let mut app = entities_with(None);
        app.navigation.set_active(Section::Connections);

        let text = lines(&render(&app)).join("\n");
        assert!(text.contains("2/4 online"));
        assert!(text.contains("Profinet"));
        assert!(text.contains("↯"));
    }
}
