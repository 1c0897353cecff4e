// lib.rs - Library root for the scribe editor

pub mod buffer;
pub mod cli;
pub mod command;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod key;
pub mod mode;
pub mod row;
pub mod search;
pub mod syntax;
pub mod terminal;
pub mod ui;
pub mod viewport;
