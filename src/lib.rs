//! A horizontally scrolling day / month / year timeline with snap-to-day
//! scrolling, plus the egui desktop host around it.

pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod layout;
pub mod logging;
pub mod model;
pub mod ui;
