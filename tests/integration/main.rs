//! End-to-end integration tests against the full router.
//!
//! Each module exercises one slice of the API through
//! `tower::ServiceExt::oneshot`; `helpers` owns the shared test
//! application setup.

mod helpers;

mod admin_test;
mod auth_test;
mod catalog_test;
mod circulation_test;
