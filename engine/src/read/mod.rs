//! Read entities definitions.

pub mod warranty;
