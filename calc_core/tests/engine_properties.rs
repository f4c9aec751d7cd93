//! Property tests for the blast-effect engine

use calc_core::calculations::{BlastEngine, SAFETY_FACTOR};
use calc_core::catalog::BlastCatalog;
use calc_core::dimensions::PackageDimensions;
use proptest::prelude::*;

fn rel_close(actual: f64, expected: f64) -> bool {
    let scale = expected.abs().max(f64::MIN_POSITIVE);
    (actual - expected).abs() / scale <= 1e-9
}

fn dimension() -> impl Strategy<Value = f64> {
    0.01f64..5_000.0
}

proptest! {
    #[test]
    fn mass_is_volume_times_density(l in dimension(), w in dimension(), h in dimension()) {
        let engine = BlastEngine::default();
        let dims = PackageDimensions::new(l, w, h).unwrap();
        let results = engine.calculate_dimensions(dims);
        let volume = (l / 100.0) * (w / 100.0) * (h / 100.0);

        for (result, material) in results.iter().zip(engine.catalog().materials()) {
            prop_assert!(rel_close(result.estimated_mass_kg, volume * material.density_kg_m3));
            prop_assert!(rel_close(
                result.tnt_equivalent_mass_kg,
                result.estimated_mass_kg * material.relative_effectiveness
            ));
        }
    }

    #[test]
    fn distances_scale_with_cube_root(l in dimension(), w in dimension(), h in dimension()) {
        let dims = PackageDimensions::new(l, w, h).unwrap();
        for r in BlastEngine::default().calculate_dimensions(dims) {
            let root = r.tnt_equivalent_mass_kg.cbrt();
            prop_assert!(rel_close(r.base_fragmentation_distance_m, 100.0 * root));
            prop_assert!(rel_close(r.safety_perimeter_m, r.base_fragmentation_distance_m * SAFETY_FACTOR));
            prop_assert!(rel_close(r.concrete_shielding_thickness_m, 0.615 * root));
        }
    }

    #[test]
    fn damage_radii_strictly_decrease(l in dimension(), w in dimension(), h in dimension()) {
        let dims = PackageDimensions::new(l, w, h).unwrap();
        for r in BlastEngine::default().calculate_dimensions(dims) {
            prop_assert_eq!(r.damage_radii.len(), 4);
            for pair in r.damage_radii.windows(2) {
                prop_assert!(pair[0].distance_m > pair[1].distance_m);
            }
        }
    }

    #[test]
    fn output_shape_matches_catalog(l in dimension(), w in dimension(), h in dimension()) {
        let catalog = BlastCatalog::default();
        let engine = BlastEngine::new(catalog.clone());
        let results = engine.calculate(&l.to_string(), &w.to_string(), &h.to_string()).unwrap();

        prop_assert_eq!(results.len(), catalog.materials().len());
        for (result, material) in results.iter().zip(catalog.materials()) {
            prop_assert_eq!(&result.material_name, &material.name);
            prop_assert_eq!(result.damage_radii.len(), catalog.damage_levels().len());
        }
    }

    #[test]
    fn recalculation_is_deterministic(l in dimension(), w in dimension(), h in dimension()) {
        let engine = BlastEngine::default();
        let dims = PackageDimensions::new(l, w, h).unwrap();
        prop_assert_eq!(engine.calculate_dimensions(dims), engine.calculate_dimensions(dims));
    }

    #[test]
    fn non_numeric_text_is_rejected(garbage in "[a-zA-Z ]{0,8}") {
        // Letters and spaces alone never form a usable positive number
        let result = BlastEngine::default().calculate("50", &garbage, "30");
        prop_assert!(result.is_err());
        prop_assert_eq!(result.unwrap_err().error_code(), "MISSING_OR_INVALID_DIMENSION");
    }
}
