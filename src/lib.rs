//! Minimal UKI assembler library.
//!
//! This library provides the core components for the `mkuki` tool, which
//! builds a Unified Kernel Image (UKI) by appending sections to an EFI
//! boot stub.
//! It is organized into several modules:
//! - `config`: CLI configuration.
//! - `arch`: Architecture-string normalization.
//! - `stub`: EFI boot stub autodetection.
//! - `inspect`: PE section-header inspection.
//! - `layout`: Section address planning.
//! - `editor`: External PE section appending.
//! - `builder`: The main build orchestration.

pub mod arch;
pub mod builder;
pub mod config;
pub mod editor;
pub mod inspect;
pub mod layout;
pub mod stub;
pub mod utils;
