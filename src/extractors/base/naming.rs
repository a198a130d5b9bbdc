// Qualified name registry
//
// Names are claimed in extraction order. The first claimant of a name keeps it,
// later claimants get `name#2`, `name#3`, ... so every node of a file's graph
// has a distinct key.

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct QualifiedNameRegistry {
    claims: HashMap<String, usize>,
    disambiguate: bool,
}

impl QualifiedNameRegistry {
    pub fn new(disambiguate: bool) -> Self {
        Self {
            claims: HashMap::new(),
            disambiguate,
        }
    }

    /// Claim `name`, returning the key to use for it
    pub fn claim(&mut self, name: &str) -> String {
        let count = self.claims.entry(name.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 || !self.disambiguate {
            name.to_string()
        } else {
            format!("{}#{}", name, count)
        }
    }
}

impl Default for QualifiedNameRegistry {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_get_numbered() {
        let mut registry = QualifiedNameRegistry::default();
        assert_eq!(registry.claim("src.a.f"), "src.a.f");
        assert_eq!(registry.claim("src.a.g"), "src.a.g");
        assert_eq!(registry.claim("src.a.f"), "src.a.f#2");
        assert_eq!(registry.claim("src.a.f"), "src.a.f#3");
        assert_eq!(registry.claim("src.a.g"), "src.a.g#2");
    }

    #[test]
    fn test_disabled_registry_keeps_names() {
        let mut registry = QualifiedNameRegistry::new(false);
        assert_eq!(registry.claim("src.a.f"), "src.a.f");
        assert_eq!(registry.claim("src.a.f"), "src.a.f");
    }
}
