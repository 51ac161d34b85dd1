// src/loader.rs
use crate::error::PortfolioResult;
use crate::models::{Portfolio, Stock};
use log::info;
use std::fs;
use std::path::Path;

/// Decodes a JSON array of `{ "name", "quantity", "prices" }` records, keeping their order.
pub fn parse_stocks(data: &str) -> PortfolioResult<Vec<Stock>> {
    let stocks: Vec<Stock> = serde_json::from_str(data)?;
    Ok(stocks)
}

pub fn load_stocks(path: impl AsRef<Path>) -> PortfolioResult<Vec<Stock>> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;
    let stocks = parse_stocks(&data)?;
    info!("Loaded {} stock records from {}", stocks.len(), path.display());
    Ok(stocks)
}

pub fn load_portfolio(path: impl AsRef<Path>) -> PortfolioResult<Portfolio> {
    Ok(Portfolio::new(load_stocks(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PortfolioError;

    #[test]
    fn test_parse_stocks() {
        let data = r#"[
            {"name": "StockA", "quantity": 50, "prices": {"2024-01-01": 100.0, "2024-12-31": 120}},
            {"name": "StockB", "quantity": -3, "prices": {}}
        ]"#;
        let stocks = parse_stocks(data).unwrap();
        assert_eq!(stocks.len(), 2);
        assert_eq!(stocks[0].name, "StockA");
        assert_eq!(stocks[0].quantity, 50);
        assert_eq!(stocks[0].prices["2024-12-31"], 120.0);
        assert_eq!(stocks[1].quantity, -3);
        assert!(stocks[1].prices.is_empty());
    }

    #[test]
    fn test_parse_stocks_missing_field() {
        let data = r#"[{"name": "StockA", "prices": {"2024-01-01": 100.0}}]"#;
        let err = parse_stocks(data).unwrap_err();
        assert!(matches!(err, PortfolioError::Decode(_)));
        assert!(err.to_string().contains("quantity"));
    }

    #[test]
    fn test_parse_stocks_wrong_type() {
        let data = r#"[{"name": "StockA", "quantity": 1.5, "prices": {}}]"#;
        assert!(matches!(
            parse_stocks(data).unwrap_err(),
            PortfolioError::Decode(_)
        ));

        let data = r#"[{"name": "StockA", "quantity": 1, "prices": {"2024-01-01": "100"}}]"#;
        assert!(matches!(
            parse_stocks(data).unwrap_err(),
            PortfolioError::Decode(_)
        ));
    }

    #[test]
    fn test_parse_stocks_unknown_field() {
        let data = r#"[{"name": "StockA", "quantity": 1, "prices": {}, "currency": "USD"}]"#;
        assert!(matches!(
            parse_stocks(data).unwrap_err(),
            PortfolioError::Decode(_)
        ));
    }

    #[test]
    fn test_load_stocks_missing_file() {
        let err = load_stocks("does/not/exist.json").unwrap_err();
        assert!(matches!(err, PortfolioError::Io(_)));
    }
}
