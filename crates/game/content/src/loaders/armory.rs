//! Armory loader.

use std::path::Path;

use crate::catalog::Armory;
use crate::loaders::{LoadResult, read_file};

/// Loader for equipment from RON files.
pub struct ArmoryLoader;

impl ArmoryLoader {
    /// Load an armory from a RON file and layer it over the standard one.
    pub fn load(path: &Path) -> LoadResult<Armory> {
        let content = read_file(path)?;
        let extra: Armory = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse armory RON: {}", e))?;

        let mut armory = Armory::standard();
        armory.extend(extra);
        Ok(armory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_to_the_standard_armory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("armory.ron");
        std::fs::write(
            &path,
            r#"(
                weapons: [(
                    name: "Halberd",
                    damage: "1d10",
                    attribute: Strength,
                    reach: Melee,
                    range: 1,
                    bonus: 0,
                )],
                shields: [(name: "Tower Shield", bonus: 3)],
            )"#,
        )
        .unwrap();

        let armory = ArmoryLoader::load(&path).unwrap();
        assert_eq!(armory.weapon("halberd").map(|w| w.range), Some(1));
        assert_eq!(armory.shield("tower shield").map(|s| s.bonus), Some(3));
        assert!(armory.armor("Plate").is_some());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ArmoryLoader::load(&dir.path().join("nope.ron")).is_err());
    }
}
