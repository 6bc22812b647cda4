//! Main module for the Julia analysis engine

pub mod classifying;
pub mod config;
pub mod defun;
pub mod document;
pub mod error;
pub mod indentation;
pub mod lines;
pub mod scanning;
pub mod testing;
pub mod tracking;
