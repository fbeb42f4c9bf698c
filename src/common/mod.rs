//! Utilities shared across the document model.
pub mod xml;
