#![cfg_attr(not(test), no_std)]
pub mod brightness_curve;
pub mod bsp;
pub mod config;
pub mod current_curve;
pub mod curve;
pub mod dimmer;
pub mod voltage;
