//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution,
//! filesystem access, host probing, activation configuration, port
//! allocation, and lock handling.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod activation;
pub mod command_runner;
pub mod config;
pub mod connection_store;
pub mod fs;
pub mod lock;
pub mod port_allocator;
pub mod prober;
pub mod systemd;
pub mod xinetd;
