//! Multimodal reachability server.
//!
//! Answers: "starting from this cell at this hour, which cells can I reach
//! within my time, money and CO2 budgets, and how soon?" over a static
//! public-transport timetable keyed by hexagonal cells.

pub mod cache;
pub mod cost;
pub mod dataset;
pub mod domain;
pub mod geo;
pub mod planner;
pub mod schedule;
pub mod web;
