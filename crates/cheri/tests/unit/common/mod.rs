//! # Common Type Tests
