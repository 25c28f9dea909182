// src/lib.rs

//! newsrelay: polls news listing pages and relays new articles to a
//! Telegram chat, each exactly once per process lifetime.

pub mod error;
#[cfg(feature = "health")]
pub mod health;
pub mod models;
pub mod notify;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod testing;
