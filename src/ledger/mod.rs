// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure ledger pipeline: CSV in, CSV out, and the reports derived from a
//! snapshot of transactions. Nothing here touches the filesystem or the
//! database.

pub mod breakdown;
pub mod csv_export;
pub mod csv_import;
pub mod monthly;
pub mod summary;

pub use breakdown::{profit_by_project, spend_by_category, CategorySpend, ProjectProfit};
pub use csv_export::{export_csv, write_csv, TEMPLATE_CSV};
pub use csv_import::{CsvImporter, Dialect, ImportMode, ImportOutcome, ImportWarning};
pub use monthly::{monthly_buckets, MonthlyBucket};
pub use summary::{summarize, RunwayBasis, Summary};
