//! # CampusHub Shared Library
//!
//! Types, storage access, and business logic used by the CampusHub API server.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool and migrations
//! - `models`: Database models and their SQL operations
//! - `auth`: Password hashing, JWT tokens, request auth context
//! - `signup`: Transactional user registration with dependent rows
//! - `uploads`: Staging of uploaded files to durable storage

pub mod auth;
pub mod db;
pub mod models;
pub mod signup;
pub mod uploads;

