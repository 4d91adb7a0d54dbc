//! Core types and utilities for the ponto loyalty platform.
//!
//! This crate provides the foundational types used throughout ponto:
//!
//! - **Identifiers**: `CompanyId`, `UserId`, `CustomerId`, `TerminalRecordId`,
//!   `AttemptId`
//! - **Input canonicalization**: client-code derivation, amount
//!   normalization, provider timestamps
//! - **Provider vocabulary**: `ActionType`, `Product`, result-code taxonomy
//! - **Entities**: `Configuration`, `Terminal`, `Customer`,
//!   `TransactionAttempt`
//!
//! # Minor units
//!
//! Every amount that crosses the provider boundary is an integer string in
//! minor units (cents): a sale of R$ 15,50 travels as `"1550"`. Conversion
//! from operator input happens exactly once, in [`amount::to_minor_units`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod action;
pub mod amount;
pub mod attempt;
pub mod client_code;
pub mod config;
pub mod customer;
pub mod error;
pub mod ids;
pub mod result_codes;
pub mod terminal;
pub mod timestamps;

pub use action::{ActionType, Product};
pub use attempt::{AttemptRecord, TransactionAttempt};
pub use client_code::{derive_client_code, normalize_phone, CustomerIdentifier};
pub use config::{Configuration, StoredConfiguration};
pub use customer::Customer;
pub use error::{CoreError, Result};
pub use ids::{AttemptId, CompanyId, CustomerId, IdError, TerminalRecordId, UserId};
pub use terminal::Terminal;
