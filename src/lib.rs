//! Krishi Sahayak: a farming-assistant backend for Karnataka farmers.
//!
//! Accounts, a keyword chat responder, a placeholder soil classifier,
//! weather lookups and feedback, served as JSON over HTTP by [`routes::router`].

pub mod classifier;
pub mod config;
pub mod db;
pub mod dispatcher;
pub mod doc;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
pub mod store;
pub mod validation;
