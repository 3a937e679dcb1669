//! Shared test utilities for flow-store unit tests.
