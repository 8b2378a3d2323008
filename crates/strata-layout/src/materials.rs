//! Material names and their resolution against the external catalog.

use strata_core::{ConfigError, MaterialCatalog, MaterialHandle};

/// Catalog names of the four materials a detector needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialNames {
    /// Fill of the world, layer, and sandwich containers.
    pub default: String,
    /// Passive absorber plates.
    pub absorber: String,
    /// Active gap volumes of calorimeter layers.
    pub gap: String,
    /// Active volumes of tracker layers.
    pub tracker: String,
}

impl Default for MaterialNames {
    fn default() -> Self {
        Self {
            default: "Galactic".to_string(),
            absorber: "G4_Fe".to_string(),
            gap: "G4_PbWO4".to_string(),
            tracker: "G4_Si".to_string(),
        }
    }
}

/// Catalog handles for every material in [`MaterialNames`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaterialSet {
    /// Container fill.
    pub default: MaterialHandle,
    /// Absorber plates.
    pub absorber: MaterialHandle,
    /// Calorimeter active volumes.
    pub gap: MaterialHandle,
    /// Tracker active volumes.
    pub tracker: MaterialHandle,
}

impl MaterialSet {
    /// Look every material up, failing on the first one the catalog lacks.
    pub fn resolve(
        catalog: &dyn MaterialCatalog,
        names: &MaterialNames,
    ) -> Result<Self, ConfigError> {
        let lookup = |role: &'static str, name: &str| {
            catalog
                .lookup_material(name)
                .ok_or_else(|| ConfigError::MissingMaterial {
                    role,
                    name: name.to_string(),
                })
        };
        Ok(Self {
            default: lookup("default", &names.default)?,
            absorber: lookup("absorber", &names.absorber)?,
            gap: lookup("gap", &names.gap)?,
            tracker: lookup("tracker", &names.tracker)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_test_utils::MockMaterialCatalog;

    #[test]
    fn resolves_defaults() {
        let catalog = MockMaterialCatalog::with_defaults();
        let set = MaterialSet::resolve(&catalog, &MaterialNames::default()).unwrap();
        assert_ne!(set.absorber, set.gap);
        assert_ne!(set.gap, set.tracker);
    }

    #[test]
    fn missing_material_names_role() {
        let catalog = MockMaterialCatalog::with_defaults().without("G4_PbWO4");
        match MaterialSet::resolve(&catalog, &MaterialNames::default()) {
            Err(ConfigError::MissingMaterial { role, name }) => {
                assert_eq!(role, "gap");
                assert_eq!(name, "G4_PbWO4");
            }
            other => panic!("expected MissingMaterial, got {other:?}"),
        }
    }
}
