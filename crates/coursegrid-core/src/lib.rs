//! Coursegrid Core Types
//!
//! This crate provides the domain types shared by the Coursegrid schedule
//! grid. It includes:
//!
//! - **Identifiers**: String-interned entity identifiers ([`identifier::Id`])
//! - **Model**: Sections, meetings and the entities they reference ([`model`])
//! - **Catalog**: Lookup maps and the in-memory store snapshot ([`catalog`])
//! - **Time**: Weekdays and minute-of-day formatting ([`time`])

pub mod catalog;
pub mod identifier;
pub mod model;
pub mod time;
