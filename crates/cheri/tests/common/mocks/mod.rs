//! # Mocks
