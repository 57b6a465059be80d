//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Garden;

/// Remove the generated output
pub fn run(garden: &Garden) -> Result<()> {
    if garden.public_dir.exists() {
        fs::remove_dir_all(&garden.public_dir)?;
        tracing::info!("Deleted: {:?}", garden.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean() {
        let dir = tempfile::tempdir().unwrap();
        let garden = Garden::new(dir.path()).unwrap();
        fs::create_dir_all(garden.public_dir.join("alpha")).unwrap();

        run(&garden).unwrap();
        assert!(!garden.public_dir.exists());

        // Nothing to clean is fine
        run(&garden).unwrap();
    }
}
