//! Host-supplied collaborators: validation and submit logic

mod closure;
mod traits;

pub use closure::ClosureEngine;
pub use traits::{SubmitHandler, ValidationEngine};

#[cfg(test)]
pub use traits::{MockSubmitHandler, MockValidationEngine};
