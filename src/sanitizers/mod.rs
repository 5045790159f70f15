//! Rule compilation for the blob scrub engine.
//!
//! This module is responsible for compiling scrub rules into efficient
//! byte-oriented regular expressions ready for application to blob contents.
//! Patterns are compiled in listed order because application order is part of
//! the rule-set contract.

pub mod compiler;
