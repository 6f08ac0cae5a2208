//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table,
};

use super::runtime::App;
use super::style;
use crate::plan::climate::HORIZON_YEARS;
use crate::plan::types::{KWH_PER_MILLION, Projection};

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // header
            Constraint::Min(10),    // chart
            Constraint::Length(13), // tables
            Constraint::Length(1),  // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    match &app.projection {
        Ok(projection) => {
            render_chart(frame, projection, chunks[1]);
            let tables = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(28), Constraint::Min(30)])
                .split(chunks[2]);
            render_consumption(frame, projection, tables[0]);
            render_plan(frame, projection, tables[1]);
        }
        Err(e) => {
            let error = Paragraph::new(Line::from(Span::styled(
                format!("  {e}"),
                Style::default().fg(style::ERROR_FG),
            )))
            .block(Block::default().title(" Error ").borders(Borders::ALL));
            frame.render_widget(error, chunks[1]);
        }
    }
    render_footer(frame, chunks[3]);
}

/// Header bar: climate and budget.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            " CITY ENERGY PLAN ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(app.climate(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(" │ budget={:.0}/year ", app.budget)),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Projected consumption against the base, in millions of kWh.
fn render_chart(frame: &mut Frame, projection: &Projection, area: Rect) {
    let consumption: Vec<(f64, f64)> = projection
        .years
        .iter()
        .map(|y| (f64::from(y.year), y.consumption_mkwh()))
        .collect();
    let base_mkwh = projection.base_yearly_kwh / KWH_PER_MILLION;
    let base = [(1.0, base_mkwh), (f64::from(HORIZON_YEARS), base_mkwh)];

    let y_bounds = style::auto_bounds_y(&[consumption.as_slice(), &base[..]]);
    let x_bounds = [1.0, f64::from(HORIZON_YEARS)];

    let datasets = vec![
        Dataset::default()
            .name("Consumption")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::CONSUMPTION_COLOR))
            .data(&consumption),
        Dataset::default()
            .name("Base")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::BASE_COLOR))
            .data(&base),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Projected Electricity Consumption, 10 Years ")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("year")
                .bounds(x_bounds)
                .labels(vec!["1".to_string(), HORIZON_YEARS.to_string()]),
        )
        .y_axis(
            Axis::default()
                .title("M kWh")
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.1}", y_bounds[0]),
                    format!("{:.1}", y_bounds[1]),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Year / consumption table.
fn render_consumption(frame: &mut Frame, projection: &Projection, area: Rect) {
    let rows = projection.years.iter().map(|y| {
        Row::new(vec![
            Cell::from(y.year.to_string()),
            Cell::from(format!("{:>10.2}", y.consumption_mkwh())),
        ])
    });
    let table = Table::new(rows, [Constraint::Length(5), Constraint::Min(10)])
        .header(
            Row::new(vec!["Year", "    M kWh"]).style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().title(" Consumption ").borders(Borders::ALL));
    frame.render_widget(table, area);
}

/// Per-year measure badges on the measure colours.
fn render_plan(frame: &mut Frame, projection: &Projection, area: Rect) {
    let lines: Vec<Line> = projection
        .years
        .iter()
        .map(|y| {
            let mut spans = vec![Span::raw(format!(" {:>2}  ", y.year))];
            if y.measures.is_empty() {
                spans.push(Span::styled("(none)", Style::default().fg(style::FOOTER_FG)));
            }
            for m in &y.measures {
                spans.push(Span::styled(
                    format!(" {m} "),
                    Style::default()
                        .fg(Color::White)
                        .bg(style::measure_color(m.color)),
                ));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        })
        .collect();

    let block = Block::default().title(" Measure Plan ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  ←/→:Climate  +/-:Budget  r:Reset",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
