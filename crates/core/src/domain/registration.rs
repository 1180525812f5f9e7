// Registration Number Domain Model
//
// Farmers carry a human-readable `REG-NNNNNN` identifier. The counter that
// hands them out is derived from the identifiers already present in the store
// and lives only for the duration of a single backfill run.

use crate::domain::error::{DomainError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Prefix shared by every registration number
pub const REGISTRATION_PREFIX: &str = "REG-";

/// Minimum number of digits after the prefix (zero-padded)
pub const REGISTRATION_DIGITS: usize = 6;

/// Counter value used when no existing identifier carries a numeric suffix
pub const FIRST_REGISTRATION: u64 = 1;

fn trailing_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)$").expect("static regex is valid"))
}

/// Extract the numeric value of the longest trailing run of digits.
///
/// Returns `None` when the identifier does not end in a digit or the run does
/// not fit in a `u64`.
pub fn trailing_number(identifier: &str) -> Option<u64> {
    trailing_digits()
        .captures(identifier)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

/// A freshly minted registration number (`REG-000042`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistrationNo(String);

impl RegistrationNo {
    /// Format a counter value as a registration number
    pub fn from_counter(value: u64) -> Self {
        Self(format!(
            "{}{:0width$}",
            REGISTRATION_PREFIX,
            value,
            width = REGISTRATION_DIGITS
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for RegistrationNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sequential registration counter
///
/// Owned by a single run and passed along by value; there is no shared
/// counter state between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationCounter {
    next: u64,
}

impl RegistrationCounter {
    /// Start from an explicit value
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// Seed from the identifiers already assigned in the store.
    ///
    /// The next value is `max(trailing number) + 1`. Identifiers without a
    /// trailing number are ignored; if none qualify the counter starts at 1.
    pub fn seed<'a, I>(existing: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let max = existing.into_iter().filter_map(trailing_number).max();

        match max {
            Some(max) => max
                .checked_add(1)
                .map(Self::starting_at)
                .ok_or(DomainError::CounterOverflow(max)),
            None => Ok(Self::starting_at(FIRST_REGISTRATION)),
        }
    }

    /// Value the next call to [`RegistrationCounter::issue`] will format
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Hand out the next registration number and advance the counter
    pub fn issue(&mut self) -> Result<RegistrationNo> {
        let current = self.next;
        self.next = current
            .checked_add(1)
            .ok_or(DomainError::CounterOverflow(current))?;
        Ok(RegistrationNo::from_counter(current))
    }
}
