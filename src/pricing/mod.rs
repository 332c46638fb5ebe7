// Pricing module - Alpha Vantage API client

pub mod alphavantage;

pub use alphavantage::{
    fetch_daily_fx, fetch_daily_stock, parse_fx_payload, parse_stock_payload,
};
