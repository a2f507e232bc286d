//! Test modules for the queue system
//!
//! Unit tests live next to each component; the suites here exercise the
//! public queue surface by functional area.

mod ordering;
