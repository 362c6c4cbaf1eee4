//! Bulk universe import/export in CSV form.

mod csv_format;
mod csv_import;

pub use csv_format::*;
pub use csv_import::*;

#[cfg(test)]
mod csv_import_tests;
