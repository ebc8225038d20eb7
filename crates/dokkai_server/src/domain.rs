//! Functions and types dealing with data specific to DOKKAI's problem domain.

pub mod articles;
