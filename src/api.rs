// src/api.rs
use crate::error::ApiError;
use crate::models::{Portfolio, Stock};
use chrono::NaiveDate;
use log::{error, info};
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

pub fn routes(
    portfolio: Arc<Portfolio>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    let list = warp::path!("portfolio")
        .and(warp::get())
        .and(with_portfolio(portfolio.clone()))
        .and_then(portfolio_handler);

    let profit = warp::path!("profit" / NaiveDate / NaiveDate)
        .and(warp::get())
        .and(with_portfolio(portfolio.clone()))
        .and_then(profit_handler);

    let annualized = warp::path!("annualized-return" / NaiveDate / NaiveDate)
        .and(warp::get())
        .and(with_portfolio(portfolio))
        .and_then(annualized_return_handler);

    list.or(profit).or(annualized).recover(handle_rejection)
}

fn with_portfolio(
    portfolio: Arc<Portfolio>,
) -> impl Filter<Extract = (Arc<Portfolio>,), Error = Infallible> + Clone {
    warp::any().map(move || portfolio.clone())
}

async fn portfolio_handler(portfolio: Arc<Portfolio>) -> Result<impl Reply, Rejection> {
    let stocks: Vec<&Stock> = portfolio.stocks().collect();
    info!("Listing {} stocks.", stocks.len());
    Ok(warp::reply::json(&stocks))
}

async fn profit_handler(
    start: NaiveDate,
    end: NaiveDate,
    portfolio: Arc<Portfolio>,
) -> Result<impl Reply, Rejection> {
    match portfolio.profit(start, end) {
        Ok(profit) => {
            info!("Profit from {} to {}: {:.2}", start, end, profit);
            Ok(warp::reply::json(&json!({
                "start": start,
                "end": end,
                "profit": profit,
            })))
        }
        Err(e) => {
            error!("Failed to calculate profit: {}", e);
            Err(warp::reject::custom(ApiError::from(e)))
        }
    }
}

async fn annualized_return_handler(
    start: NaiveDate,
    end: NaiveDate,
    portfolio: Arc<Portfolio>,
) -> Result<impl Reply, Rejection> {
    match portfolio.annualized_return(start, end) {
        Ok(rate) => {
            info!(
                "Annualized return from {} to {}: {:.2}%",
                start,
                end,
                rate * 100.0
            );
            Ok(warp::reply::json(&json!({
                "start": start,
                "end": end,
                "annualized_return": rate,
            })))
        }
        Err(e) => {
            error!("Failed to calculate annualized return: {}", e);
            Err(warp::reject::custom(ApiError::from(e)))
        }
    }
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if let Some(e) = err.find::<ApiError>() {
        (e.status, e.message.clone())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "not found".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "method not allowed".to_string(),
        )
    } else {
        error!("Unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal server error".to_string(),
        )
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&json!({ "error": message })),
        status,
    ))
}
