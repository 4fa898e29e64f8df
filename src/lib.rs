// src/lib.rs

pub mod common;
pub mod config;
pub mod forms;
pub mod models;
pub mod pages;
pub mod routes;
pub mod services;
pub mod session;
pub mod storage;
