//! Windows installer backends.

pub mod nsis;
