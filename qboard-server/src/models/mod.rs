//! Domain models and input validation

mod question;
mod validation;

pub use question::{ListOrder, Question, QuestionText, MAX_QUESTION_LEN};
pub use validation::ValidationError;
