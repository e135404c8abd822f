//! Repository layer over the questions table

mod questions;

pub use questions::{DbError, QuestionRepo};
