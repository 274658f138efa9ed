//! Coffee-region city tables used by the table-driven travel estimator.
//! Deliberately a lookup table, not geography; the estimator trait is the
//! seam for swapping in a real routing backend.

/// Region buckets the trading desk schedules around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Santos port area; offices are within walking distance.
    Santos,
    /// Sul de Minas growing region around Varginha.
    SulDeMinas,
    /// Cerrado Mineiro growing region.
    Cerrado,
}

const SANTOS_AREA: &[&str] = &["santos", "guaruja", "sao vicente", "cubatao", "praia grande"];

const SUL_DE_MINAS_AREA: &[&str] = &[
    "varginha",
    "tres pontas",
    "tres coracoes",
    "eloi mendes",
    "boa esperanca",
    "carmo da cachoeira",
    "guaxupe",
];

const CERRADO_AREA: &[&str] = &[
    "patrocinio",
    "monte carmelo",
    "araguari",
    "carmo do paranaiba",
];

fn normalize(city: &str) -> String {
    city.trim().to_ascii_lowercase()
}

/// Region of a city, if it appears in any table.
pub fn region_of(city: &str) -> Option<Region> {
    let city = normalize(city);
    if SANTOS_AREA.contains(&city.as_str()) {
        Some(Region::Santos)
    } else if SUL_DE_MINAS_AREA.contains(&city.as_str()) {
        Some(Region::SulDeMinas)
    } else if CERRADO_AREA.contains(&city.as_str()) {
        Some(Region::Cerrado)
    } else {
        None
    }
}

/// Same-city check by normalized name.
pub fn same_city(a: &str, b: &str) -> bool {
    !normalize(a).is_empty() && normalize(a) == normalize(b)
}

/// Extract the city from a location string. Common patterns are
/// "Company Name, City" and "Address, City, State"; a bare value is treated
/// as the city itself.
pub fn extract_city(location: Option<&str>) -> String {
    match location {
        Some(value) if !value.trim().is_empty() => {
            let parts: Vec<&str> = value.split(',').collect();
            if parts.len() >= 2 {
                parts[1].trim().to_string()
            } else {
                value.trim().to_string()
            }
        }
        _ => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Santos", Some(Region::Santos))]
    #[test_case("  VARGINHA ", Some(Region::SulDeMinas))]
    #[test_case("Patrocinio", Some(Region::Cerrado))]
    #[test_case("Oslo", None)]
    fn test_region_of(city: &str, expected: Option<Region>) {
        assert_eq!(region_of(city), expected);
    }

    #[test]
    fn test_same_city_normalizes() {
        assert!(same_city("Santos", " santos "));
        assert!(!same_city("Santos", "Varginha"));
        assert!(!same_city("", ""));
    }

    #[test_case(Some("Cooxupe, Guaxupe"), "Guaxupe")]
    #[test_case(Some("Rua X, Varginha, MG"), "Varginha")]
    #[test_case(Some("Santos"), "Santos")]
    #[test_case(None, "Unknown")]
    #[test_case(Some("   "), "Unknown")]
    fn test_extract_city(location: Option<&str>, expected: &str) {
        assert_eq!(extract_city(location), expected);
    }
}
