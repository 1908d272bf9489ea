// src/core.rs
pub mod calculator;
pub mod codec;
pub mod color;
pub mod hash;
pub mod json;
pub mod password;
pub mod qr;
pub mod scanner;
pub mod text;
pub mod units;
