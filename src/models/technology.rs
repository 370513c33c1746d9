use serde::{Deserialize, Serialize};

/// Names of the technologies seeded by the migrations.
pub const TECHNOLOGIES: &[&str] = &[
    "JavaScript",
    "Python",
    "React",
    "Express.js",
    "HTML",
    "CSS",
    "Django",
    "PostgreSQL",
    "MongoDB",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technology {
    pub id: i32,
    pub name: String,
}

/// Case-insensitive lookup of a value in a fixed option list, returning the
/// canonical spelling.
pub fn canonical_choice(options: &'static [&'static str], value: &str) -> Option<&'static str> {
    options
        .iter()
        .copied()
        .find(|option| option.eq_ignore_ascii_case(value.trim()))
}

pub fn canonical_technology(name: &str) -> Option<&'static str> {
    canonical_choice(TECHNOLOGIES, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_technology_ignores_case() {
        assert_eq!(canonical_technology("python"), Some("Python"));
        assert_eq!(canonical_technology("EXPRESS.JS"), Some("Express.js"));
        assert_eq!(canonical_technology("postgresql"), Some("PostgreSQL"));
    }

    #[test]
    fn test_canonical_technology_rejects_unknown() {
        assert_eq!(canonical_technology("Rust"), None);
        assert_eq!(canonical_technology("Express"), None);
        assert_eq!(canonical_technology(""), None);
    }

    #[test]
    fn test_canonical_choice_for_os() {
        use crate::models::PreferredOs;

        assert_eq!(canonical_choice(PreferredOs::OPTIONS, "macos"), Some("MacOS"));
        assert_eq!(canonical_choice(PreferredOs::OPTIONS, " Linux "), Some("Linux"));
        assert_eq!(canonical_choice(PreferredOs::OPTIONS, "BeOS"), None);
    }
}
