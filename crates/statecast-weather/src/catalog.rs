//! Fixed set of regions the app reports on.

use crate::types::Region;

const REGIONS: &[(&str, f64, f64)] = &[
    ("Andhra Pradesh", 15.9129, 79.7400),
    ("Arunachal Pradesh", 27.0919, 93.6050),
    ("Assam", 26.2006, 92.9376),
    ("Bihar", 25.0961, 85.3131),
    ("Chhattisgarh", 21.2787, 81.8661),
    ("Goa", 15.2993, 74.1240),
    ("Gujarat", 22.2587, 71.1924),
    ("Haryana", 29.0588, 76.0856),
    ("Himachal Pradesh", 31.1048, 77.1734),
    ("Jharkhand", 23.6102, 85.2799),
    ("Karnataka", 15.3173, 75.7139),
    ("Kerala", 10.8505, 76.2711),
    ("Madhya Pradesh", 23.4737, 77.9470),
    ("Maharashtra", 19.6633, 75.3281),
    ("Manipur", 24.6637, 93.9063),
    ("Meghalaya", 25.4670, 91.3662),
    ("Mizoram", 23.1645, 92.9376),
    ("Nagaland", 26.1584, 94.5624),
    ("Odisha", 20.9517, 85.0985),
    ("Punjab", 30.9009, 75.7570),
    ("Rajasthan", 27.0238, 74.2176),
    ("Sikkim", 27.5330, 88.5122),
    ("Tamil Nadu", 11.1271, 78.6569),
    ("Telangana", 17.9784, 79.1547),
    ("Tripura", 23.8364, 91.2769),
    ("Uttar Pradesh", 26.8467, 80.9462),
    ("Uttarakhand", 30.0668, 79.0193),
    ("West Bengal", 22.9868, 87.8550),
    ("Delhi", 28.6139, 77.2090),
    ("Pudhuchery", 11.9416, 79.8083),
];

/// All regions, in display order.
pub fn regions() -> Vec<Region> {
    REGIONS
        .iter()
        .map(|&(name, latitude, longitude)| Region::new(name, latitude, longitude))
        .collect()
}

/// Region names, in display order.
pub fn names() -> Vec<&'static str> {
    REGIONS.iter().map(|&(name, _, _)| name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_size_and_order() {
        let all = regions();
        assert_eq!(all.len(), 30);
        assert_eq!(all[0].name, "Andhra Pradesh");
        assert_eq!(all[29].name, "Pudhuchery");
    }

    #[test]
    fn test_names_are_unique() {
        let all = regions();
        let names: HashSet<_> = all.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn test_coordinates_in_range() {
        for region in regions() {
            assert!((-90.0..=90.0).contains(&region.latitude), "{}", region.name);
            assert!((-180.0..=180.0).contains(&region.longitude), "{}", region.name);
        }
    }

    #[test]
    fn test_names_include_default_region() {
        let names = names();
        assert_eq!(names.len(), 30);
        assert!(names.contains(&crate::filter::DEFAULT_REGION));
        assert!(!names.contains(&"tamil nadu"));

        let tn = &regions()[names.iter().position(|n| *n == "Tamil Nadu").unwrap()];
        assert_eq!(tn.latitude, 11.1271);
        assert_eq!(tn.longitude, 78.6569);
    }
}
