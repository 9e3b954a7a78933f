//! # SMS CLI
//!
//! Database seeding utilities for development.
//!
//! This library crate provides the seeding functionality used by the `sms`
//! binary.
//!
//! ## Usage
//!
//! ```ignore
//! use sms_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(8, 40);
//! seed_all(&pool, &config).await?;
//! ```

pub mod seeder;
