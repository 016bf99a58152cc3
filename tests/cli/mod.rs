/// End-to-end tests that run the `tidemark` binary with assert_cmd.
///
/// Tests that need a database go through `with_cli_helper` and are skipped
/// when `DATABASE_URL` is not set.
pub mod error_handling;
pub mod migrate_new;
