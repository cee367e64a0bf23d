//! Shared fixtures and lookups for integration tests.

#![allow(dead_code)]
