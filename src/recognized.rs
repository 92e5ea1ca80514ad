use std::fmt;

/// A tag that was either matched to a known variant `T`, or left as the raw
/// `Raw` value it came from.
///
/// Lookups over closed tag sets return this instead of failing outright, so the
/// caller decides whether an unknown tag is tolerable or a schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Recognized<T, Raw = String> {
    Known(T),
    Unknown(Raw),
}

impl<T: Copy, Raw: Copy> Copy for Recognized<T, Raw> {}

impl<T, Raw> Recognized<T, Raw> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Recognized::Known(t) => Some(t),
            Recognized::Unknown(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Recognized::Known(_))
    }

    /// Converts into a `Result`, building the error from the raw value.
    pub fn ok_or_else<E, F: FnOnce(Raw) -> E>(self, f: F) -> Result<T, E> {
        match self {
            Recognized::Known(t) => Ok(t),
            Recognized::Unknown(raw) => Err(f(raw)),
        }
    }
}

impl<T, Raw> From<T> for Recognized<T, Raw> {
    fn from(value: T) -> Self {
        Recognized::Known(value)
    }
}

impl<T: fmt::Display, Raw: fmt::Display> fmt::Display for Recognized<T, Raw> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recognized::Known(t) => t.fmt(f),
            Recognized::Unknown(raw) => raw.fmt(f),
        }
    }
}
