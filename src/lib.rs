pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod entries;
pub mod error;
pub mod pages;
pub mod state;
