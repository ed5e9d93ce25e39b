extern crate self as ftmint_core;

pub mod log;
