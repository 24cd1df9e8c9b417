// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors surfaced by the ledger pipeline.
///
/// Per-row defects (bad amounts, missing columns) are not errors; they are
/// absorbed by the importer and reported as `ImportWarning`s.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("CSV must have a header and at least one row")]
    EmptyOrHeaderOnlyInput,

    #[error("Strict import rejected {count} defaulted field(s); first: {first}")]
    StrictRejected { count: usize, first: String },

    #[error("Unknown {kind} '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
