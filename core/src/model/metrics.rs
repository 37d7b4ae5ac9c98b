use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One unit's figures for one month. Every field is an independent
/// measurement; missing or non-numeric values read as zero.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantMetrics {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub sales: f64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub bottles_sold: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub glasses_sold: u64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub avg_price: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub cmv: f64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub wine_glass_stock: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub sparkling_glass_stock: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub bottle_stock: u64,
}

/// Field names accepted by `RestaurantMetrics::set`, in CLI spelling.
pub const METRIC_KEYS: [&str; 8] = [
    "sales",
    "bottles",
    "glasses",
    "price",
    "cmv",
    "wine-stock",
    "sparkling-stock",
    "bottle-stock",
];

impl RestaurantMetrics {
    pub fn with_sales(sales: f64) -> Self {
        Self {
            sales,
            ..Self::default()
        }
    }

    /// Folds a second entry for the same unit into this one. Amounts and
    /// counts add up; price and cost ratio keep the first nonzero value.
    pub fn absorb(&mut self, other: &RestaurantMetrics) {
        self.sales += other.sales;
        self.bottles_sold += other.bottles_sold;
        self.glasses_sold += other.glasses_sold;
        self.wine_glass_stock += other.wine_glass_stock;
        self.sparkling_glass_stock += other.sparkling_glass_stock;
        self.bottle_stock += other.bottle_stock;
        if self.avg_price == 0.0 {
            self.avg_price = other.avg_price;
        }
        if self.cmv == 0.0 {
            self.cmv = other.cmv;
        }
    }

    /// Sets the field named by one of `METRIC_KEYS` from free text, using the
    /// same coercion as stored data. Returns false for an unknown key.
    pub fn set(&mut self, key: &str, raw: &str) -> bool {
        let value = Value::String(raw.to_string());
        match key {
            "sales" => self.sales = coerce_amount(&value),
            "bottles" => self.bottles_sold = coerce_count(&value),
            "glasses" => self.glasses_sold = coerce_count(&value),
            "price" => self.avg_price = coerce_amount(&value),
            "cmv" => self.cmv = coerce_amount(&value),
            "wine-stock" => self.wine_glass_stock = coerce_count(&value),
            "sparkling-stock" => self.sparkling_glass_stock = coerce_count(&value),
            "bottle-stock" => self.bottle_stock = coerce_count(&value),
            _ => return false,
        }
        true
    }
}

pub(crate) fn coerce_amount(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

pub(crate) fn coerce_count(value: &Value) -> u64 {
    if let Value::Number(n) = value {
        if let Some(count) = n.as_u64() {
            return count;
        }
    }
    let amount = coerce_amount(value);
    if amount > 0.0 {
        amount.trunc() as u64
    } else {
        0
    }
}

fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Value::deserialize(deserializer).map(|v| coerce_amount(&v))
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Value::deserialize(deserializer).map(|v| coerce_count(&v))
}
