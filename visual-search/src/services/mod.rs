//! HTTP clients for the remote collaborators.

pub mod search_service;
