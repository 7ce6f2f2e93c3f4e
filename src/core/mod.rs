//! Input model, currency formatting, and the error type.
//!
//! Records are loosely typed JSON maps; nothing here validates business
//! values. Missing fields fall back to placeholders or zero amounts.

pub mod currency;
mod error;
mod kind;
mod record;

pub use currency::{format_currency, format_decimal};
pub use error::*;
pub use kind::*;
pub use record::*;
