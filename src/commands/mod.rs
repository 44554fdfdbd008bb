//! Command implementations for the footdata CLI

pub mod extract;
pub mod init_db;
pub mod mappers;
