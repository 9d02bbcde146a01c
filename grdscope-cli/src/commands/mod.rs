pub mod common;
pub mod dump;
pub mod info;
pub mod list;
pub mod trace;
