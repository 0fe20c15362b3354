//! Lead Intake API Library
//!
//! Authenticates callers with per-account API keys, validates submitted lead
//! records, enriches them with account metadata and persists them.
//!
//! # Modules
//!
//! - `api`: HTTP-facing components (handlers, guard, routes).
//! - `core`: Domain logic (validators, account directory, intake pipeline).
//! - `data`: Storage seams and their Postgres / in-memory implementations.
//! - `config`: Configuration management.
//! - `db`: Database connection pool and migrations.
//! - `db_storage`: Postgres storage for accounts and leads.
//! - `directory`: Account lookup, key verification and provisioning.
//! - `errors`: Error handling types.
//! - `guard`: Authorization guard and admin credential check.
//! - `handlers`: HTTP request handlers.
//! - `intake`: Lead intake pipeline.
//! - `memory_store`: In-memory storage for tests and local runs.
//! - `models`: Account and lead data models.
//! - `routes`: Router assembly.
//! - `store`: Storage traits.
//! - `validators`: Field format checks.

pub mod api;
pub mod core;
pub mod data;

pub mod config;
pub mod db;
pub mod db_storage;
pub mod directory;
pub mod errors;
pub mod guard;
pub mod handlers;
pub mod intake;
pub mod memory_store;
pub mod models;
pub mod routes;
pub mod store;
pub mod validators;
