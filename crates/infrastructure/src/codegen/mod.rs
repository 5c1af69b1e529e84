//! Code generation infrastructure.
//!
//! This module renders request descriptors for curl, HTTP notebooks,
//! Python, JavaScript, PowerShell and Ansible.

mod generator;

pub use generator::{CodeGenerator, generate_code, render};
