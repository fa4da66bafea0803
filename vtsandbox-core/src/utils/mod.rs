//! # Utility Functions and Helpers
//!
//! ### Ignore Patterns (`toolignore`)
//! - **Pattern Loading**: `.toolignore` parsing with comment and blank-line handling
//! - **Prefix Matching**: ignoring a directory hides everything below it

pub mod toolignore;

pub use toolignore::ToolIgnore;
