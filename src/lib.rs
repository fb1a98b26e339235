//! mailtui library exports for testing

pub mod core;
pub mod mail;
pub mod tui;

#[cfg(test)]
pub mod test_support;
