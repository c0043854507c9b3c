//! Contact form submissions and their local log.

mod model;
mod repository;
mod validation;

pub use model::{ContactForm, DEFAULT_SUBJECT, NewSubmission, SubmissionRecord};
pub use repository::{SUBMISSIONS_TABLE, SubmissionLog};
pub use validation::{ValidationError, validate};
