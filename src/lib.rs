pub mod client;
pub mod config;
pub mod domain;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod navigation;
pub mod queries;
pub mod query;
pub mod response;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
