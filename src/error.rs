//! Error types for the fastz impedance toolkit.
//!
//! This module provides a unified error type [`FastzError`] that covers
//! all error conditions that can occur while building impedance trees,
//! evaluating them, querying them, and parsing impedance expressions.

use thiserror::Error;

/// Result type alias using [`FastzError`].
pub type Result<T> = std::result::Result<T, FastzError>;

/// Unified error type for all fastz operations.
#[derive(Error, Debug)]
pub enum FastzError {
    // ============ Construction Errors ============
    /// Composite built with fewer than two children
    #[error("Two or more child impedances are required to construct a {connection} impedance, {given} given")]
    TooFewChildren { connection: String, given: usize },

    // ============ Evaluation Errors ============
    /// Leaf reached with neither a bound value nor an override
    #[error("Value not found for element '{label}'")]
    ValueNotFound { label: String },

    /// Override keys that match no element of the tree
    #[error("Parameter(s) {} do not match any lumped element in '{within}'", .labels.join(", "))]
    ParameterMismatch { labels: Vec<String>, within: String },

    // ============ Query Errors ============
    /// No node carries the requested label
    #[error("Could not locate impedance with the label '{label}' within '{within}'")]
    LabelNotFound { label: String, within: String },

    /// Invalid break-frequency request
    #[error("Break frequency error for '{labels}': {message}")]
    Domain { labels: String, message: String },

    // ============ Expression Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    Lexer {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    // ============ Bode Errors ============
    /// Malformed `label:position` line specification
    #[error("Invalid line specification '{spec}': {message}")]
    InvalidLineSpec { spec: String, message: String },

    // ============ Sweep Errors ============
    /// Invalid frequency sweep parameters
    #[error("Invalid frequency sweep: {message}")]
    InvalidSweep { message: String },

    // ============ I/O Errors ============
    /// Error reading an expression file
    #[error("Failed to read expression file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing results
    #[error("Output error: {source}")]
    Output {
        #[from]
        source: std::io::Error,
    },
}

impl FastzError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Lexer {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a break-frequency domain error
    pub fn domain(labels: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Domain {
            labels: labels.into(),
            message: message.into(),
        }
    }

    /// Create a label lookup error
    pub fn label_not_found(label: impl Into<String>, within: impl ToString) -> Self {
        Self::LabelNotFound {
            label: label.into(),
            within: within.to_string(),
        }
    }

    /// Create an invalid sweep error
    pub fn invalid_sweep(message: impl Into<String>) -> Self {
        Self::InvalidSweep {
            message: message.into(),
        }
    }
}
