use std::fmt;

/// One `#NAME: value` line from the dump header.
///
/// `name` is one or more ASCII uppercase letters. `value` has its leading
/// spaces and tabs removed; everything after that, including further
/// separators, is kept verbatim.
///
/// Meta fields are produced in file order by header scanning and never
/// change afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MetaField {
    pub name: String,
    pub value: String,
}

impl MetaField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Renders as `#NAME: value`. The original separator is not remembered,
/// so `#NAME value` in the input renders with a colon.
impl fmt::Display for MetaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}: {}", self.name, self.value)
    }
}
