//! Validated type IR definitions.
//!
//! A validated type is a struct with at least one field carrying the validator
//! marker. Each such field becomes a [`FieldRule`]: the semantic kind of the
//! field, the request key it is read from, and the directives checked against
//! the value.

/// Width of a primitive integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
}

impl IntWidth {
    /// All supported widths.
    pub const ALL: [IntWidth; 10] = [
        IntWidth::I8,
        IntWidth::I16,
        IntWidth::I32,
        IntWidth::I64,
        IntWidth::Isize,
        IntWidth::U8,
        IntWidth::U16,
        IntWidth::U32,
        IntWidth::U64,
        IntWidth::Usize,
    ];

    /// Resolve a primitive type name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.as_str() == name)
    }

    /// Primitive type name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
        }
    }

    /// Smallest representable value.
    ///
    /// `isize`/`usize` are treated as 64 bits wide.
    pub fn min_value(self) -> i128 {
        match self {
            Self::I8 => i8::MIN.into(),
            Self::I16 => i16::MIN.into(),
            Self::I32 => i32::MIN.into(),
            Self::I64 | Self::Isize => i64::MIN.into(),
            Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::Usize => 0,
        }
    }

    /// Largest representable value.
    pub fn max_value(self) -> i128 {
        match self {
            Self::I8 => i8::MAX.into(),
            Self::I16 => i16::MAX.into(),
            Self::I32 => i32::MAX.into(),
            Self::I64 | Self::Isize => i64::MAX.into(),
            Self::U8 => u8::MAX.into(),
            Self::U16 => u16::MAX.into(),
            Self::U32 => u32::MAX.into(),
            Self::U64 | Self::Usize => u64::MAX.into(),
        }
    }

    /// Returns true if `value` fits this width.
    pub fn contains(self, value: i128) -> bool {
        (self.min_value()..=self.max_value()).contains(&value)
    }
}

/// Semantic kind of a validated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `String`
    Text,
    /// A primitive integer
    Integer(IntWidth),
}

impl FieldKind {
    /// Returns true for text fields.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }
}

/// A literal carried by `enum=` and `default=` directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveValue {
    Text(String),
    Integer(i128),
}

impl DirectiveValue {
    /// Literal as it appears in error messages.
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Integer(n) => n.to_string(),
        }
    }
}

/// A decoded validator clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatorDirective {
    /// Non-empty text / non-zero integer after all other directives ran
    Required,
    /// Read the value under another request key
    ParamName(String),
    /// Value must be one of the alternatives
    Enum(Vec<DirectiveValue>),
    /// Fill an empty value
    Default(DirectiveValue),
    /// Text length / integer value lower bound
    Min(i64),
    /// Text length / integer value upper bound
    Max(i64),
}

/// One validated field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    /// Field identifier as declared.
    pub name: String,
    pub kind: FieldKind,
    /// Effective request key.
    pub key: String,
    /// Directives in declaration order.
    pub directives: Vec<ValidatorDirective>,
}

impl FieldRule {
    /// Create a rule. The request key is the lower-cased field name unless a
    /// `paramname` directive overrides it (the last one wins).
    pub fn new(name: impl Into<String>, kind: FieldKind, directives: Vec<ValidatorDirective>) -> Self {
        let name = name.into();
        let key = directives
            .iter()
            .rev()
            .find_map(|d| match d {
                ValidatorDirective::ParamName(key) => Some(key.clone()),
                _ => None,
            })
            .unwrap_or_else(|| name.trim_start_matches("r#").to_lowercase());

        Self {
            name,
            kind,
            key,
            directives,
        }
    }

    /// Returns true if the rule carries `required`.
    pub fn is_required(&self) -> bool {
        self.directives.contains(&ValidatorDirective::Required)
    }

    /// `enum` alternative lists, in order.
    pub fn enums(&self) -> impl Iterator<Item = &[DirectiveValue]> {
        self.directives.iter().filter_map(|d| match d {
            ValidatorDirective::Enum(values) => Some(values.as_slice()),
            _ => None,
        })
    }

    /// The `default` value; the first one declared is the one that applies.
    pub fn default_value(&self) -> Option<&DirectiveValue> {
        self.directives.iter().find_map(|d| match d {
            ValidatorDirective::Default(value) => Some(value),
            _ => None,
        })
    }

    /// `min`/`max` directives, in order.
    pub fn bounds(&self) -> impl Iterator<Item = &ValidatorDirective> {
        self.directives
            .iter()
            .filter(|d| matches!(d, ValidatorDirective::Min(_) | ValidatorDirective::Max(_)))
    }
}

/// A struct whose annotated fields are filled from the request and validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedType {
    pub name: String,
    /// Annotated fields in declaration order.
    pub fields: Vec<FieldRule>,
}

impl ValidatedType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Look up a field rule by field name.
    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_width_ranges() {
        assert!(IntWidth::U8.contains(255));
        assert!(!IntWidth::U8.contains(256));
        assert!(!IntWidth::U8.contains(-1));
        assert!(IntWidth::I8.contains(-128));
        assert!(IntWidth::U64.contains(u64::MAX as i128));
        assert_eq!(IntWidth::from_name("usize"), Some(IntWidth::Usize));
        assert_eq!(IntWidth::from_name("f64"), None);
    }

    #[test]
    fn test_key_defaults_to_lowercase_name() {
        let rule = FieldRule::new("Login", FieldKind::Text, vec![ValidatorDirective::Required]);
        assert_eq!(rule.key, "login");
        assert!(rule.is_required());
    }

    #[test]
    fn test_paramname_overrides_key() {
        let rule = FieldRule::new(
            "name",
            FieldKind::Text,
            vec![ValidatorDirective::ParamName("full_name".into())],
        );
        assert_eq!(rule.key, "full_name");
    }

    #[test]
    fn test_accessors() {
        let rule = FieldRule::new(
            "status",
            FieldKind::Text,
            vec![
                ValidatorDirective::Enum(vec![
                    DirectiveValue::Text("user".into()),
                    DirectiveValue::Text("admin".into()),
                ]),
                ValidatorDirective::Default(DirectiveValue::Text("user".into())),
                ValidatorDirective::Max(10),
            ],
        );
        assert_eq!(rule.enums().count(), 1);
        assert_eq!(
            rule.default_value(),
            Some(&DirectiveValue::Text("user".into()))
        );
        assert_eq!(rule.bounds().count(), 1);
        assert!(!rule.is_required());
    }
}
