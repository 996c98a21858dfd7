//! Domains module containing business logic organized by bounded contexts.
//!
//! The server has a single domain: the tools it exposes, split into
//! subprocess-backed task tools and in-process profile tools.

pub mod tools;
