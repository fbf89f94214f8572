//! Reload command implementation

use std::path::PathBuf;

use crate::config::Settings;
use crate::error::Result;
use crate::progress::ProgressDisplay;
use crate::store::FlatStore;

/// Run reload command
pub fn run(config: Option<PathBuf>) -> Result<()> {
    let settings = Settings::load(config.as_deref())?;
    let store = super::context::open_store(&settings)?;

    let count = reload(&store)?;
    if count == 0 {
        println!("No packages installed.");
    } else {
        println!("Reloaded {} package{}.", count, if count == 1 { "" } else { "s" });
    }
    Ok(())
}

fn reload(store: &FlatStore) -> Result<usize> {
    let total = store.packages(None).count() as u64;
    let mut progress = ProgressDisplay::new(total);

    match store.reload_all_with(|identity| progress.start_package(&identity.to_string())) {
        Ok(count) => {
            progress.finish();
            Ok(count)
        }
        Err(e) => {
            progress.abandon();
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::PackageIdentity;
    use crate::store::Store;
    use crate::test_fixtures::{ArtifactBuilder, create_store};

    #[test]
    fn test_reload_restores_cleared_cache() {
        let (_temp, store) = create_store();
        let identity = PackageIdentity::new("s3", "v1.0.0", "linux", "amd64").unwrap();
        let bytes = ArtifactBuilder::package("s3").to_bytes();
        store.stage(&identity, &mut bytes.as_slice()).unwrap();

        store.clear_cache(None).unwrap();
        assert!(!store.extraction_path(&identity).exists());

        assert_eq!(reload(&store).unwrap(), 1);
        assert!(store.extraction_path(&identity).is_dir());
    }

    #[test]
    fn test_reload_empty_store() {
        let (_temp, store) = create_store();
        assert_eq!(reload(&store).unwrap(), 0);
    }
}
