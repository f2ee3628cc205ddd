//! Thermofan controller library.
//!
//! Exposes the pure-logic modules and host-buildable adapters for
//! integration testing.  Raspberry Pi pin bindings are gated behind the
//! `rpi` feature inside [`drivers`].

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod pins;
pub mod shutdown;

pub mod adapters;
pub mod drivers;
pub mod sensors;
