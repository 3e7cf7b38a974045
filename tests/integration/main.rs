//! Integration tests for the storage backends and the HTTP API

mod storage_tests;
