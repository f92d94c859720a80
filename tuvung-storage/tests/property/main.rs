//! Property test suite.

mod storage_properties;
