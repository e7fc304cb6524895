//! End-of-run summary output.
//!
//! The summary is rendered as one string so tests can assert on the exact
//! lines: a success count, `STORE_<i>_TOKEN=<token>` lines ready for an
//! .env file, a store-to-account table, and next steps for the operator.

use std::fmt::Write;

use crate::provision::ProvisioningResult;

/// Render the run summary.
pub fn render(results: &[ProvisioningResult], requested: u32) -> String {
    let banner = "=".repeat(60);
    let rule = "-".repeat(60);
    let mut out = String::new();

    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out, "RESULTS");
    let _ = writeln!(out, "{banner}");
    let _ = writeln!(
        out,
        "\nSuccessfully generated tokens for {} of {} stores\n",
        results.len(),
        requested
    );

    let _ = writeln!(out, "Add these to your .env file:");
    let _ = writeln!(out, "{rule}");
    for result in results {
        let _ = writeln!(
            out,
            "STORE_{}_TOKEN={}",
            result.store_index, result.issued_token
        );
    }
    let _ = writeln!(out, "{rule}");

    let _ = writeln!(out, "\n\nSummary:");
    let _ = writeln!(out, "{rule}");
    for result in results {
        let _ = writeln!(out, "Store {}: {}", result.store_index, result.account_name);
    }
    let _ = writeln!(out, "{rule}");

    let _ = writeln!(out, "\nDone! Copy the tokens above to your .env file");
    let _ = writeln!(out, "\nNext steps:");
    let _ = writeln!(out, "1. Create databases in MotherDuck for each store:");
    let _ = writeln!(
        out,
        "   CREATE DATABASE store_1; CREATE DATABASE store_2; etc."
    );
    let _ = writeln!(out, "2. Grant access to each service account");
    let _ = writeln!(out, "3. Load sample data using data/schema.sql and data/seed-*.sql");

    out
}

/// Print the run summary to stdout.
pub fn print(results: &[ProvisioningResult], requested: u32) {
    print!("{}", render(results, requested));
}
