use std::fmt;

/// A single decoded link record.
///
/// ```text
/// ┌────────────┬───────────────────────────────────────────────────────┐
/// │ Field      │ Meaning                                               │
/// ├────────────┼───────────────────────────────────────────────────────┤
/// │ source     │ Source identifier (a shortcode in URLTeam dumps)       │
/// │ target     │ Target identifier; may contain embedded line breaks   │
/// │            │ in fixed-width URLTeam dumps                          │
/// │ annotation │ Middle field of a three-field RFC line, else empty    │
/// └────────────┴───────────────────────────────────────────────────────┘
/// ```
///
/// Every `Link` is freshly allocated and owned by the caller; the decoder
/// keeps no reference to it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Link {
    pub source: String,
    pub target: String,
    pub annotation: String,
}

impl Link {
    /// A link without annotation.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            annotation: String::new(),
        }
    }

    /// A link with an annotation, as carried by three-field RFC lines.
    pub fn annotated(
        source: impl Into<String>,
        annotation: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            annotation: annotation.into(),
        }
    }

    #[must_use]
    pub fn has_annotation(&self) -> bool {
        !self.annotation.is_empty()
    }

    /// Whether the target spans more than one physical line.
    #[must_use]
    pub fn is_multiline(&self) -> bool {
        self.target.contains('\n')
    }
}

/// Renders as `source|annotation|target` when an annotation is present,
/// otherwise `source|target`.
///
/// This is for diagnostics. A one-field RFC line `a` renders as `a|`, and
/// multi-line targets render their embedded line breaks as-is, so output
/// does not always reproduce the input byte for byte.
impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_annotation() {
            write!(f, "{}|{}|{}", self.source, self.annotation, self.target)
        } else {
            write!(f, "{}|{}", self.source, self.target)
        }
    }
}
