//! End-to-end tests for the Tavola social subsystem. See `tests/`.
