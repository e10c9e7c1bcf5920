//! Integration tests for the book form client

mod http_repository;
mod page_flow;
