//! Integration test target.

mod mock_api;
