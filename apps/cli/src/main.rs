//! # agri Entry Point
//!
//! The actual setup is in lib.rs for testability.

fn main() -> anyhow::Result<()> {
    agri_cli::run()
}
