// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export the places store

pub mod place_store;

#[cfg(test)]
pub mod test_support;

pub use place_store::*;
