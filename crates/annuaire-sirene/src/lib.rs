//! Registry client for the INSEE SIRENE API, with optional phone enrichment
//! from PagesJaunes.

pub mod client;
pub mod demo;
pub mod error;
pub mod parse;
pub mod phone;
mod retry;
pub mod types;

pub use client::{build_sector_query, ClientOptions, SireneClient};
pub use error::SireneError;
pub use parse::{headcount_label, status_label};
pub use phone::{extract_phone, PhoneDirectory, WithPhones};
