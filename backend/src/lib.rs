//! # Matrixops - integer matrix operations on uploaded files
//!
//! Matrixops takes a delimited-text file holding a square matrix of 32-bit
//! integers and echoes, transposes, flattens, sums or multiplies it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Upload     │────▶│   Parser    │────▶│  Validator  │────▶│  Operation  │
//! │ (bytes+name)│     │ (by ext.)   │     │  (square)   │     │  (text out) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use matrixops::{MatrixService, Operation};
//!
//! let service = MatrixService::default();
//! let result = service.run(b"1,2\n3,4", Some("matrix.csv"), Operation::Transpose).unwrap();
//! assert_eq!(result, "1,3\n2,4");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (Matrix, Operation)
//! - [`parser`] - Format parsers and the parser registry
//! - [`validation`] - Squareness check
//! - [`transform`] - Operations and the orchestrating service
//! - [`config`] - Server configuration
//! - [`api`] - HTTP API server and log streaming

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Validation
pub mod validation;

// Computation
pub mod transform;

// Configuration
pub mod config;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ErrorKind, MatrixError, MatrixResult, ParseError, ParseResult, ServerError, ServerResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Matrix, Operation};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    decode_content, detect_encoding, CsvMatrixParser, MatrixParser, ParserRegistry,
    TsvMatrixParser,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::validate_square;

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::{apply, format_identifier, MatrixService};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::ServerConfig;

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{EndpointInfo, HealthResponse};

// Server
pub mod server {
    pub use crate::api::server::{build_router, serve, start_server};
}
