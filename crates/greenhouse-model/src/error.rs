// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for catalog loading and validation
//!
//! Geometry estimators never produce these: insufficient input is signalled
//! by returning `None`, not by an error. The variants below cover the only
//! operations that can genuinely fail - validating material rows supplied by
//! the persistence collaborator.

use thiserror::Error;

/// Catalog result type
pub type Result<T> = std::result::Result<T, Error>;

/// Catalog loading and validation errors
#[derive(Error, Debug)]
pub enum Error {
    /// Generic catalog error
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A material row failed validation
    #[error("Invalid material row {index}: {message}")]
    InvalidRow { index: usize, message: String },
}

impl Error {
    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Error::Catalog(msg.into())
    }

    /// Create an invalid row error
    pub fn invalid_row(index: usize, msg: impl Into<String>) -> Self {
        Error::InvalidRow {
            index,
            message: msg.into(),
        }
    }
}
