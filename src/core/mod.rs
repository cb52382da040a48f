//! Core library components.
//!
//! This module contains the reusable logic for locating, retrieving,
//! decrypting and comparing secrets, plus the Ansible pass-through.

pub mod config;
pub mod constants;
pub mod diff;
pub mod layout;
pub mod playbook;
pub mod secrets;
pub mod source;
pub mod types;
pub mod vault;
