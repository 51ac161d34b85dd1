// src/models.rs
use crate::error::{PortfolioError, PortfolioResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Price table keys use this layout; lookups format the requested date the same way.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const HOURS_PER_YEAR: f64 = 24.0 * 365.25;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Stock {
    pub name: String,
    pub quantity: i64,
    pub prices: HashMap<String, f64>,
}

impl Stock {
    pub fn new(name: &str, quantity: i64, prices: HashMap<String, f64>) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            prices,
        }
    }

    /// Exact-date lookup. There is no interpolation or fallback to a nearby date.
    pub fn price(&self, date: NaiveDate) -> PortfolioResult<f64> {
        let key = date.format(DATE_FORMAT).to_string();
        self.prices
            .get(&key)
            .copied()
            .ok_or_else(|| PortfolioError::MissingPrice {
                stock: self.name.clone(),
                date,
            })
    }

    pub fn value(&self, date: NaiveDate) -> PortfolioResult<f64> {
        Ok(self.price(date)? * self.quantity as f64)
    }
}

/// Holdings indexed by stock name. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    stocks: BTreeMap<String, Stock>,
}

impl Portfolio {
    /// Indexes stocks by name. A later stock with an already seen name replaces the earlier one.
    pub fn new<I>(stocks: I) -> Self
    where
        I: IntoIterator<Item = Stock>,
    {
        let stocks = stocks
            .into_iter()
            .map(|stock| (stock.name.clone(), stock))
            .collect();
        Self { stocks }
    }

    pub fn get(&self, name: &str) -> Option<&Stock> {
        self.stocks.get(name)
    }

    pub fn stocks(&self) -> impl Iterator<Item = &Stock> {
        self.stocks.values()
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    /// Sum of `price * quantity` on `date`, in ascending name order.
    pub fn total_value(&self, date: NaiveDate) -> PortfolioResult<f64> {
        let mut total = 0.0;
        for stock in self.stocks.values() {
            total += stock.value(date)?;
        }
        Ok(total)
    }

    pub fn profit(&self, start: NaiveDate, end: NaiveDate) -> PortfolioResult<f64> {
        let total_start = self.total_value(start)?;
        let total_end = self.total_value(end)?;
        Ok(total_end - total_start)
    }

    /// Compounded yearly rate implied by the profit over `start..end`, as a fraction.
    ///
    /// Years are elapsed hours over a 365.25-day year. Fails with
    /// `ZeroBaseValue` when the starting value is exactly zero, and with
    /// `InvalidDateRange` unless `end` is strictly after `start`.
    ///
    /// A net short portfolio has a negative starting value, so a loss shows
    /// up as a positive rate. The sign is not corrected.
    pub fn annualized_return(&self, start: NaiveDate, end: NaiveDate) -> PortfolioResult<f64> {
        let total_start = self.total_value(start)?;
        let total_end = self.total_value(end)?;

        if total_start == 0.0 {
            return Err(PortfolioError::ZeroBaseValue);
        }
        if end <= start {
            return Err(PortfolioError::InvalidDateRange { start, end });
        }

        let profit = total_end - total_start;
        let years = end.signed_duration_since(start).num_hours() as f64 / HOURS_PER_YEAR;
        Ok((1.0 + profit / total_start).powf(1.0 / years) - 1.0)
    }
}
