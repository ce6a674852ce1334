//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Row, Table};

use super::runtime::App;
use super::style;
use crate::sim::types::THRESHOLD_KWH;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // header
            Constraint::Length(3),  // metrics
            Constraint::Min(10),    // chart
            Constraint::Length(12), // tables
            Constraint::Length(1),  // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_metrics(frame, app, chunks[1]);
    render_chart(frame, app, chunks[2]);
    render_tables(frame, app, chunks[3]);
    render_footer(frame, app, chunks[4]);
}

/// Header bar: inputs and seed.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            " WASTE-SIM ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " days={} │ reduction={} │ seed={} │ cached={}/{} ",
            app.days,
            app.reduction,
            app.seed,
            app.cached_series(),
            app.cache_capacity(),
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// The four headline metrics side by side.
fn render_metrics(frame: &mut Frame, app: &App, area: Rect) {
    let w = &app.output.waste;
    let metrics = [
        (" Total waste ", format!("{:.2} kWh", w.total_excess_kwh)),
        (" Reduced ", format!("{:.2} kWh", w.reduced_kwh)),
        (" Savings ", format!("{:.2}", w.savings_currency)),
        (" CO2 avoided ", format!("{:.2} kg", w.co2_avoided_kg)),
    ];

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((title, value), cell) in metrics.into_iter().zip(cells.iter()) {
        let widget = Paragraph::new(Line::from(Span::styled(
            value,
            Style::default()
                .fg(style::METRIC_FG)
                .add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(widget, *cell);
    }
}

/// Original vs adjusted consumption with the threshold line.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let series = app.output.series();
    let original: Vec<(f64, f64)> = series
        .iter()
        .map(|r| (r.time.index() as f64, r.total_kwh))
        .collect();
    let adjusted: Vec<(f64, f64)> = series
        .iter()
        .map(|r| (r.time.index() as f64, r.adjusted_kwh))
        .collect();

    let x_hi = original.last().map_or(1.0, |p| p.0).max(1.0);
    let threshold = [(0.0, THRESHOLD_KWH), (x_hi, THRESHOLD_KWH)];
    let y_bounds = style::auto_bounds_y(&[&original, &adjusted], THRESHOLD_KWH);

    let datasets = vec![
        Dataset::default()
            .name("Original")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::ORIGINAL_COLOR))
            .data(&original),
        Dataset::default()
            .name("Adjusted")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::ADJUSTED_COLOR))
            .data(&adjusted),
        Dataset::default()
            .name("Threshold")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::THRESHOLD_COLOR))
            .data(&threshold),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Hourly Consumption ")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("hour")
                .bounds([0.0, x_hi])
                .labels(vec!["0".to_string(), format!("{}", x_hi as usize)]),
        )
        .y_axis(
            Axis::default()
                .title("kWh")
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.1}", y_bounds[0]),
                    format!("{THRESHOLD_KWH:.1}"),
                    format!("{:.1}", y_bounds[1]),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Waste hours, device ranking, and peak hours.
fn render_tables(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(35),
            Constraint::Percentage(25),
        ])
        .split(area);

    let header_style = Style::default().add_modifier(Modifier::BOLD);
    let waste_style = Style::default().fg(style::WASTE_FG);

    let waste_rows: Vec<Row> = app
        .output
        .waste
        .waste_hours()
        .map(|r| {
            Row::new(vec![
                r.time.to_string(),
                format!("{:.2}", r.total_kwh),
                format!("{:.2}", r.adjusted_kwh),
            ])
            .style(waste_style)
        })
        .collect();
    let waste_table = Table::new(
        waste_rows,
        [
            Constraint::Length(19),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(Row::new(vec!["Time", "Total", "Adjusted"]).style(header_style))
    .block(
        Block::default()
            .title(format!(" Waste Hours ({}) ", app.output.waste.waste_hour_count()))
            .borders(Borders::ALL),
    );
    frame.render_widget(waste_table, chunks[0]);

    let device_rows: Vec<Row> = app
        .output
        .attribution
        .by_device
        .iter()
        .map(|e| Row::new(vec![e.device.to_string(), format!("{:.2}", e.excess_kwh)]))
        .collect();
    let device_table = Table::new(device_rows, [Constraint::Min(12), Constraint::Length(9)])
        .header(Row::new(vec!["Device", "kWh"]).style(header_style))
        .block(
            Block::default()
                .title(" Waste by Device ")
                .borders(Borders::ALL),
        );
    frame.render_widget(device_table, chunks[1]);

    let hour_rows: Vec<Row> = app
        .output
        .attribution
        .by_hour
        .iter()
        .map(|e| {
            Row::new(vec![
                format!("{:02}:00", e.hour_of_day),
                format!("{:.2}", e.excess_kwh),
            ])
        })
        .collect();
    let hour_table = Table::new(hour_rows, [Constraint::Length(6), Constraint::Length(9)])
        .header(Row::new(vec!["Hour", "kWh"]).style(header_style))
        .block(Block::default().title(" Peak Hours ").borders(Borders::ALL));
    frame.render_widget(hour_table, chunks[2]);
}

/// Footer with keybinding hints and the last status message.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(
            " q:Quit  ↑/↓:Days  ←/→:Reduction  r:Reseed  c:Clear cache  e:Export ",
            Style::default().fg(style::FOOTER_FG),
        ),
        Span::styled(&app.status, Style::default().fg(style::STATUS_FG)),
    ]));
    frame.render_widget(footer, area);
}
