//! Tests for the token policy module
