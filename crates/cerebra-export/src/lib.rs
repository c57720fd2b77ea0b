//! cerebra-export
//!
//! Report synthesis from the built-in template, plus PDF and DOCX export
//! staged through scoped temp files.

pub mod docx;
pub mod error;
pub mod pdf;
pub mod render;
pub mod stage;
pub mod styles;
