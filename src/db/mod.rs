pub mod account_repository;
pub mod application_repository;
pub mod connection;
pub mod job_repository;
pub mod migrations;
pub mod models;
