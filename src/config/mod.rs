pub mod app;
pub mod db;
pub mod env;
pub mod jwt;
pub mod web;
