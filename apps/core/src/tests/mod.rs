//! Test Module
//!
//! Cross-module suites for the MindWise backend. Unit tests live next to
//! the code they cover.
//!
//! ## Test Categories
//! - `account_tests`: sign-up ordering guarantees and session handling
//! - `storage_tests`: SQLite persistence, journal on a real database
//! - `server_tests`: HTTP routes driven through the router

mod server_tests;
