//! EC2 uptime and spot-interruption reporting.
//!
//! Fetches instance metadata from the EC2 API, aggregates uptimes and
//! fault-injection interruption counts by instance type, and prints four
//! report sections to stdout.

pub mod config;
pub mod ec2;
pub mod logging;
pub mod output;
pub mod report;
