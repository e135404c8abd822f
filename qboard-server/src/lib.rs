//! qboard-server: audience Q&A board over HTTP
//!
//! Attendees submit questions and vote on them; moderators hide, unhide,
//! or delete entries through a token-gated admin surface. State lives in
//! a single SQLite file; a projector page polls the list endpoint.

pub mod db;
pub mod http;
pub mod models;
