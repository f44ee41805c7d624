/// Resolves an atom-name token to an element symbol and atomic number.
///
/// The lookup keys on the first one or two characters of the name, which is
/// how the supported force-field atom names encode their element ("CA" is a
/// carbon, "CL1" a chlorine, "HW2" a hydrogen). Names with no mapping resolve
/// to `None`; callers decide whether that drop is worth a warning.
pub fn resolve(atom_name: &str) -> Option<(&'static str, f64)> {
    let mut chars = atom_name.chars();
    let first = chars.next()?;
    let second = chars.next();

    match first {
        'C' if second == Some('L') => Some(("Cl", 17.0)),
        'C' => Some(("C", 6.0)),
        'H' => Some(("H", 1.0)),
        'O' => Some(("O", 8.0)),
        'N' => Some(("N", 7.0)),
        'S' => Some(("S", 16.0)),
        'F' => Some(("F", 9.0)),
        'B' if second == Some('R') => Some(("Br", 35.0)),
        'M' if second == Some('G') => Some(("Mg", 12.0)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carbon_prefix_resolves_unless_followed_by_l() {
        assert_eq!(resolve("C"), Some(("C", 6.0)));
        assert_eq!(resolve("CA"), Some(("C", 6.0)));
        assert_eq!(resolve("CB2"), Some(("C", 6.0)));
        assert_eq!(resolve("CL"), Some(("Cl", 17.0)));
        assert_eq!(resolve("CL1"), Some(("Cl", 17.0)));
    }

    #[test]
    fn single_letter_prefixes_resolve() {
        assert_eq!(resolve("HW1"), Some(("H", 1.0)));
        assert_eq!(resolve("OW"), Some(("O", 8.0)));
        assert_eq!(resolve("NZ"), Some(("N", 7.0)));
        assert_eq!(resolve("SD"), Some(("S", 16.0)));
        assert_eq!(resolve("F1"), Some(("F", 9.0)));
    }

    #[test]
    fn two_letter_elements_require_the_second_character() {
        assert_eq!(resolve("BR"), Some(("Br", 35.0)));
        assert_eq!(resolve("MG"), Some(("Mg", 12.0)));
        assert_eq!(resolve("B"), None);
        assert_eq!(resolve("M"), None);
    }

    #[test]
    fn unmapped_prefixes_resolve_to_none() {
        assert_eq!(resolve("ZN"), None);
        assert_eq!(resolve("X"), None);
        assert_eq!(resolve(""), None);
    }
}
