//! Desktop-facing collaborators of the rotation: configuration, screen
//! geometry, compositing and background setting.

pub mod candidates;
pub mod canvas;
pub mod cli;
pub mod commands;
pub mod config;
pub mod desktop;
pub mod gnome;
pub mod kwin;
pub mod screen;
