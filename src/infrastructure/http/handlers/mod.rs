//! HTTP Handlers

mod auth;
mod chat;
mod history;
mod ping;
mod speech;
mod voice;

pub use auth::*;
pub use chat::*;
pub use history::*;
pub use ping::*;
pub use speech::*;
pub use voice::*;
