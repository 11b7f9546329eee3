//! Journey dispatch.
//!
//! Combines individual point-to-point bookings into one multi-stop journey
//! and submits it to an upstream dispatch system. The planner orders the
//! stops so every passenger is picked up before being dropped off, then
//! builds the submission payload.

pub mod config;
pub mod dispatch;
pub mod domain;
pub mod planner;
pub mod web;
