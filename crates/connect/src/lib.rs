//! Uniscope Connect - HTTP implementation of the snapshot provider trait.

pub mod client;

pub use client::*;
