//! Expiry scanning over date-bearing columns.

mod dates;
mod scanner;

pub use dates::{DateParseMode, parse_timestamp};
pub use scanner::{ExpiredEntry, ExpiryCheck, ExpiryKind, ExpiryResult, ExpiryScanner};
