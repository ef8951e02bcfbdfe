use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// `[*...][pkg.]Name[type args]`; pointer markers and type arguments are
/// accepted and dropped, anything else is not a nameable type
static TYPE_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\**\s*(?:([\p{L}_][\p{L}\p{N}_]*)\.)?([\p{L}_][\p{L}\p{N}_]*)\s*(?:\[.*\])?$")
        .expect("type reference pattern is valid")
});

/// A normalized type name: optional package alias plus the bare name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub package: Option<String>,
    pub name: String,
}

impl TypeRef {
    pub fn parse(text: &str) -> Option<Self> {
        let captures = TYPE_REF.captures(text.trim())?;
        Some(Self {
            package: captures.get(1).map(|m| m.as_str().to_string()),
            name: captures.get(2)?.as_str().to_string(),
        })
    }

    pub fn local(name: impl Into<String>) -> Self {
        Self {
            package: None,
            name: name.into(),
        }
    }

    pub fn is_local(&self) -> bool {
        self.package.is_none()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.package {
            Some(package) => write!(f, "{}.{}", package, self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local() {
        assert_eq!(TypeRef::parse("Rocket"), Some(TypeRef::local("Rocket")));
    }

    #[test]
    fn test_parse_strips_pointer_markers() {
        assert_eq!(TypeRef::parse("*Rocket"), Some(TypeRef::local("Rocket")));
        assert_eq!(TypeRef::parse("**Rocket"), Some(TypeRef::local("Rocket")));
        let qualified = TypeRef::parse(" *bytes.Buffer ").unwrap();
        assert_eq!(qualified.package.as_deref(), Some("bytes"));
        assert_eq!(qualified.name, "Buffer");
    }

    #[test]
    fn test_parse_drops_type_arguments() {
        let generic = TypeRef::parse("list.List[int]").unwrap();
        assert_eq!(generic.to_string(), "list.List");
    }

    #[test]
    fn test_parse_rejects_composites() {
        assert_eq!(TypeRef::parse("[]int"), None);
        assert_eq!(TypeRef::parse("map[string]Rocket"), None);
        assert_eq!(TypeRef::parse("a.b.C"), None);
        assert_eq!(TypeRef::parse(""), None);
    }

    #[test]
    fn test_unicode_identifiers() {
        assert_eq!(TypeRef::parse("Ракета"), Some(TypeRef::local("Ракета")));
    }
}
