//! Shared test harness modules for the Soundmap CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]
#![expect(clippy::expect_used, reason = "tests require concise failures")]

use super::*;

mod helpers;
mod unit;
