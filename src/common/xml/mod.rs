//! XML text helpers shared by the part readers and writers.
mod escape;

pub use escape::{escape_text, escape_xml};
