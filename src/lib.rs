//! Przelewy24 payment gateway integration
//!
//! Registers signed transactions with the Przelewy24 REST API and turns the
//! gateway's notifications into verified, at-most-once payment updates on
//! the shop's orders.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
