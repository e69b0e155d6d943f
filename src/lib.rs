// HTTP server modules
pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod sse;

// Message store
pub mod store;

// Completion gateway
pub mod gateway;

// Conversation orchestration
pub mod service;
