//! Signup API for Mergington High School's extracurricular activities.
//!
//! [`database::ActivityRegistry`] owns every activity and enforces the roster
//! rules; [`web::build_router`] exposes it over HTTP as JSON.

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod services;
pub mod web;
