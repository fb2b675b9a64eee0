//! Compatibility service implementations

pub mod npmpeer;

pub use npmpeer::NpmPeerSource;
