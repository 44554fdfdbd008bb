//! Database bootstrap command

use crate::config::Config;
use crate::error::Result;
use crate::storage::Database;

/// Create the contract tables if they do not exist.
pub fn handle_init_db(config: &Config, verbose: bool) -> Result<()> {
    let db = Database::open(&config.db_path)?;
    db.ensure_schema()?;

    println!("✓ Database schema ready");
    if verbose {
        println!("Database at: {}", db.path().display());
    }
    Ok(())
}
