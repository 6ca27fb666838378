pub mod amortization;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod explain;
pub mod offers;
pub mod predictor;
pub mod profile;
pub mod risk;
pub mod types;

pub use error::LoanMatchError;
pub use types::*;

/// Standard result type for all loanmatch operations
pub type LoanMatchResult<T> = Result<T, LoanMatchError>;
