pub mod session;

pub use session::{GenerateOutcome, Session, SessionSnapshot, GENERIC_FAILURE_MESSAGE};
