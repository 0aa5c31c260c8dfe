//! CLI library components for the AgroNexus importer.

#![allow(missing_docs)]

pub mod logging;
pub mod pipeline;
