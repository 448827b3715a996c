//! # AgreementHub Smoke Harness
//!
//! End-to-end smoke tests for a live AgreementHub deployment. The harness
//! drives the JSON REST API of the contract-management backend and verifies
//! CRUD behavior, the approval lifecycle and the aggregate stats endpoint.
//!
//! ## Core Principle
//!
//! **Assertions never abort the run**: every check records a pass or a
//! failure into the result ledger and execution continues. The only fatal
//! path is the final exit code (0 iff every assertion passed).
//!
//! ## Flow
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │                SmokeRunner                 │
//! │  blueprint CRUD → contract CRUD →          │
//! │  lifecycle → protection → deletion → stats │
//! └────────────────────────────────────────────┘
//!        │ typed requests            │ outcomes
//!        ▼                           ▼
//!   ┌───────────┐             ┌────────────┐
//!   │ ApiClient │──reqwest──▶ │ TestReport │──▶ summary + exit code
//!   └───────────┘             └────────────┘
//! ```

pub mod client;
pub mod config;
pub mod errors;
pub mod lifecycle;
pub mod model;
pub mod report;
pub mod runner;

pub use client::{ApiClient, ApiResponse};
pub use config::HarnessConfig;
pub use errors::{Result, SmokeError};
pub use lifecycle::{ContractStatus, StatusCategory};
pub use model::{
    Blueprint, BlueprintUpdate, Contract, ContractFilter, ContractUpdate, Field, FieldSpec,
    FieldType, NewBlueprint, NewContract, Position, Stats, TransitionRequest,
};
pub use report::{Category, TestReport};
pub use runner::SmokeRunner;

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "BASE_URL";

/// Base URL used when `BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";
