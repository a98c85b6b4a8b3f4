pub mod backoff;
pub mod parse;
