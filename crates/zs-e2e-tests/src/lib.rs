//! End-to-end tests for zapstream live under `tests/`.
