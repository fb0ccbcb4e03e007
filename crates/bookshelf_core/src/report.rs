//! Borrowed-books report rendering and export.
//!
//! # Responsibility
//! - Render the plain-text loan report in its fixed wire format.
//! - Write the rendered report to a caller-chosen destination.
//!
//! # Invariants
//! - The file starts with the fixed header line followed by a blank line.
//! - Each active loan contributes exactly one `<username> is borrowing
//!   '<title>'` line, in the order given.

use crate::model::records::ActiveLoan;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default report file name in the working directory.
pub const DEFAULT_REPORT_FILE: &str = "library_report.txt";

/// First line of every exported report.
pub const REPORT_HEADER: &str = "Library Borrowed Books Report";

/// Renders the report body, header included.
pub fn render_report(loans: &[ActiveLoan]) -> String {
    let mut out = String::new();
    out.push_str(REPORT_HEADER);
    out.push_str("\n\n");
    for loan in loans {
        // write! into a String cannot fail.
        let _ = writeln!(out, "{} is borrowing '{}'", loan.username, loan.title);
    }
    out
}

/// Writes the rendered report to `destination` and returns the path written.
pub fn write_report(destination: impl AsRef<Path>, loans: &[ActiveLoan]) -> io::Result<PathBuf> {
    let path = destination.as_ref().to_path_buf();
    fs::write(&path, render_report(loans))?;
    Ok(path)
}
