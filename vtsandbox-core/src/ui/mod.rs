//! Terminal interaction helpers

pub mod user_confirmation;

pub use user_confirmation::DialoguerConfirmer;
