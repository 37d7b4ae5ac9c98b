use cellar_core::{ActiveSeries, BlobStore, DashboardView, DisplayMode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use crate::table::format_money;
use crate::tui::app::App;

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    money: Color,
}

const THEME: Theme = Theme {
    primary: Color::Rgb(0x7c, 0x3a, 0xed), // Group purple, also the annual bars
    muted: Color::DarkGray,
    text: Color::White,
    money: Color::Green,
};

pub fn draw<S: BlobStore>(frame: &mut Frame, app: &App<S>) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header / mode tabs
            Constraint::Min(10),   // Chart + cards
            Constraint::Length(1), // Footer / help
        ])
        .split(frame.area());

    draw_header(frame, app, main_layout[0]);

    match (&app.view, &app.error) {
        (Some(view), _) => {
            let content = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(70), // Chart
                    Constraint::Length(1),      // Gutter
                    Constraint::Percentage(30), // Cards
                ])
                .split(main_layout[1]);
            draw_chart(frame, view, content[0]);
            draw_cards(frame, view, content[2]);
        }
        (None, Some(err)) => {
            let msg = Paragraph::new(format!("Could not build the dashboard: {}", err))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center);
            frame.render_widget(msg, main_layout[1]);
        }
        (None, None) => {
            frame.render_widget(
                Paragraph::new("No data available").alignment(Alignment::Center),
                main_layout[1],
            );
        }
    }

    let help = Line::from(vec![
        Span::styled("MODE: ", Style::default().fg(THEME.muted)),
        Span::styled("m/a/Tab ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("YEAR: ", Style::default().fg(THEME.muted)),
        Span::styled("←/→ ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), main_layout[2]);
}

fn draw_header<S: BlobStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24), // App title
            Constraint::Min(1),     // Spacer
            Constraint::Length(30), // Mode tabs
        ])
        .split(area);

    let title = Paragraph::new(Span::styled(
        "GESTÃO 360° GRUPO BAH",
        Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(title, chunks[0]);

    let tab = |label: String, active: bool| {
        if active {
            Span::styled(
                format!(" {} ", label),
                Style::default().fg(THEME.text).bg(THEME.primary).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {} ", label), Style::default().fg(THEME.muted))
        }
    };
    let tabs = Line::from(vec![
        tab("MENSAL".to_string(), app.mode == DisplayMode::Monthly),
        Span::raw(" "),
        tab(format!("ANUAL {}", app.year), app.mode == DisplayMode::Annual),
    ]);
    let tabs = Paragraph::new(tabs)
        .alignment(Alignment::Right)
        .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(tabs, chunks[2]);

    frame.render_widget(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(THEME.muted)),
        area,
    );
}

/// Bar label above each bar, e.g. `8.5k`; empty for zero months.
fn short_amount(value: f64) -> String {
    if value > 0.0 {
        format!("{:.1}k", value / 1000.0)
    } else {
        String::new()
    }
}

fn draw_chart(frame: &mut Frame, view: &DashboardView, area: Rect) {
    let bar_data: Vec<(String, f64, Color)> = match &view.series {
        ActiveSeries::Annual(points) => points
            .iter()
            .map(|p| (p.name.clone(), p.sales, THEME.primary))
            .collect(),
        ActiveSeries::Unit(points) => points
            .iter()
            .map(|p| {
                let (r, g, b) = p.unit.rgb();
                (p.unit.name().to_string(), p.sales, Color::Rgb(r, g, b))
            })
            .collect(),
    };

    let bar_items: Vec<Bar> = bar_data
        .iter()
        .map(|(label, value, color)| {
            Bar::default()
                .label(label.as_str())
                .value(value.max(0.0).round() as u64)
                .style(Style::default().fg(*color))
                .text_value(short_amount(*value))
        })
        .collect();

    let heading = match view.mode {
        DisplayMode::Annual => " Faturamento Consolidado do Grupo ",
        DisplayMode::Monthly => " Faturamento por Unidade ",
    };
    let chart_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
        .title(heading);

    let (bar_width, bar_gap) = match view.mode {
        DisplayMode::Annual => (4, 1),
        DisplayMode::Monthly => (9, 2),
    };
    let chart = BarChart::default()
        .block(chart_block)
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .data(BarGroup::default().bars(&bar_items));

    frame.render_widget(chart, area);
}

fn draw_cards(frame: &mut Frame, view: &DashboardView, area: Rect) {
    let summary = &view.summary;
    let label = |s: &'static str| Span::styled(s, Style::default().fg(THEME.muted));

    let mut lines = vec![
        Line::from(Span::styled(
            view.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            label("Faturamento: "),
            Span::styled(
                format_money(view.total),
                Style::default().fg(THEME.money).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("Mês {}", view.current.month),
            Style::default().fg(THEME.text),
        )),
        Line::from(vec![label("Garrafas:    "), Span::raw(summary.bottles_sold.to_string())]),
        Line::from(vec![label("Taças:       "), Span::raw(summary.glasses_sold.to_string())]),
        Line::from(vec![label("Estoque:     "), Span::raw(summary.bottle_stock.to_string())]),
        Line::from(vec![label("Unidades:    "), Span::raw(summary.units_reporting.to_string())]),
    ];
    if let Some(notes) = &view.current.notes {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(notes.clone(), Style::default().fg(THEME.muted))));
    }

    let cards = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.muted))
            .title(" Performance consolidada "),
    );
    frame.render_widget(cards, area);
}
