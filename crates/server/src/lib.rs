pub mod config;
pub mod db;
pub mod error_convert;
pub mod health;
pub mod middleware;
pub mod openapi;
pub mod repo;
pub mod rest;
pub mod telemetry;
pub mod uniqueness;
