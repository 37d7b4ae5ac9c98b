use serde::{Deserialize, Serialize};

use crate::model::unit::Unit;

/// A chart bar: something with a label and a numeric value.
pub trait SeriesPoint {
    fn label(&self) -> &str;
    fn value(&self) -> f64;
}

/// One month of the group's annual evolution.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnnualPoint {
    pub name: String,
    pub sales: f64,
}

/// One unit's sales for the selected month.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UnitPoint {
    pub unit: Unit,
    pub sales: f64,
    pub color: String,
}

impl SeriesPoint for AnnualPoint {
    fn label(&self) -> &str {
        &self.name
    }

    fn value(&self) -> f64 {
        self.sales
    }
}

impl SeriesPoint for UnitPoint {
    fn label(&self) -> &str {
        self.unit.name()
    }

    fn value(&self) -> f64 {
        self.sales
    }
}

/// Figures for the month on display, beside the chart.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ReportSummary {
    pub sales: f64,
    pub bottles_sold: u64,
    pub glasses_sold: u64,
    pub bottle_stock: u64,
    pub units_reporting: usize,
}
