//! Shared test harness modules for the greenroute CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod helpers;
mod optimize_unit;
mod plan_unit;
