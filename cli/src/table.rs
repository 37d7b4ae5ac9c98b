use anyhow::Result;
use cellar_core::{
    BlobStore, DashboardUseCase, DisplayMode, ReportCollection, ReportStore,
};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "")]
    label: String,
    #[tabled(rename = "Faturamento")]
    sales: String,
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Mês")]
    month: String,
    #[tabled(rename = "Unidades")]
    units: usize,
    #[tabled(rename = "Faturamento")]
    sales: String,
    #[tabled(rename = "Notas")]
    notes: String,
}

/// Formats an amount the way the dashboard cards do, e.g. `R$ 20.900,50`.
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let (whole, frac) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    if frac == 0 {
        format!("{}R$ {}", sign, grouped)
    } else {
        format!("{}R$ {},{:02}", sign, grouped, frac)
    }
}

pub fn show_dashboard<S: BlobStore>(store: &ReportStore<S>, mode: DisplayMode, year: i32) -> Result<()> {
    let view = DashboardUseCase::new(store).view(mode, year)?;

    println!("\n\x1b[1;35m{}\x1b[0m", view.title);
    match mode {
        DisplayMode::Monthly => println!("Faturamento por unidade"),
        DisplayMode::Annual => println!("Faturamento consolidado do grupo"),
    }

    if view.series.is_empty() {
        println!("No unit reported sales for {}.", view.current.month);
    } else {
        let mut rows: Vec<SeriesRow> = view
            .series
            .bars()
            .into_iter()
            .map(|(label, value)| SeriesRow {
                label,
                sales: format_money(value),
            })
            .collect();
        rows.push(SeriesRow {
            label: "TOTAL".to_string(),
            sales: format_money(view.total),
        });

        let mut table = Table::new(rows);
        table
            .with(Style::modern())
            .with(Modify::new(Rows::first()).with(Color::FG_CYAN))
            .with(Modify::new(Rows::last()).with(Color::BOLD));
        println!("{}", table);
    }

    let summary = &view.summary;
    println!(
        "{}: {} units reporting, {} bottles, {} glasses, {} bottles in stock",
        view.current.month, summary.units_reporting, summary.bottles_sold, summary.glasses_sold, summary.bottle_stock
    );
    if let Some(notes) = &view.current.notes {
        println!("Notes: {}", notes);
    }
    Ok(())
}

pub fn show_reports(collection: &ReportCollection) {
    let rows: Vec<ReportRow> = collection
        .reports()
        .iter()
        .map(|r| ReportRow {
            month: r.month.to_string(),
            units: r.restaurants.len(),
            sales: format_money(r.total_sales()),
            notes: r.notes.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}
