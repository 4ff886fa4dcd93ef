pub mod bot;
pub mod config;
pub mod content;
pub mod error;
pub mod listener;
pub mod mastodon;
pub mod selector;
pub mod types;

pub use bot::run;
