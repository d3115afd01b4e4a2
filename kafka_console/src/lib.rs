#![allow(clippy::too_many_arguments)]

pub mod admin;
pub mod commands;
pub mod connection_settings;
pub mod console_info;
pub mod error;
pub mod gateway;
pub mod hooks;
pub mod queries;
pub mod sharding;
pub mod subsystems;
