// src/error.rs
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;
use warp::http::StatusCode;
use warp::reject::Reject;

pub type PortfolioResult<T> = Result<T, PortfolioError>;

#[derive(Error, Debug)]
pub enum PortfolioError {
    /// No exact entry for the date in the stock's price table.
    #[error("price not available for {stock} on {date}")]
    MissingPrice { stock: String, date: NaiveDate },

    #[error("initial value of the portfolio is zero")]
    ZeroBaseValue,

    /// Annualizing needs a strictly positive elapsed period.
    #[error("invalid date range: end date {end} must be after start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("failed to read stock data: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode stock data: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Rejection carried out of the HTTP handlers, recovered into a JSON error body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl From<PortfolioError> for ApiError {
    fn from(err: PortfolioError) -> Self {
        let status = match err {
            PortfolioError::MissingPrice { .. } => StatusCode::NOT_FOUND,
            PortfolioError::ZeroBaseValue | PortfolioError::InvalidDateRange { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            PortfolioError::Io(_) | PortfolioError::Decode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl Reject for ApiError {}
