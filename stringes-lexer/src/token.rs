use std::fmt;
use std::hash::Hash;
use std::ops::Deref;
use stringes::Stringe;

/// Identifier attached to tokens.
///
/// Any small copyable tag works; a fieldless `enum` deriving
/// `Debug, Clone, Copy, PartialEq, Eq, Hash` is the usual choice.
pub trait TokenId: Copy + Eq + Hash + fmt::Debug {}

impl<T> TokenId for T where T: Copy + Eq + Hash + fmt::Debug {}

/// A stringe tagged with the identifier of the rule that produced it.
///
/// Dereferences to [`Stringe`], so every position and slicing operation is
/// available on the token directly.
#[derive(Clone, PartialEq, Eq)]
pub struct Token<T> {
    id: T,
    stringe: Stringe,
}

impl<T: TokenId> Token<T> {
    /// Tags `stringe` with `id`.
    pub fn new(id: T, stringe: Stringe) -> Self {
        Self { id, stringe }
    }

    /// The identifier of the rule that produced the token.
    pub fn id(&self) -> T {
        self.id
    }

    /// The text of the token.
    pub fn stringe(&self) -> &Stringe {
        &self.stringe
    }

    /// Unwraps the token into its stringe.
    pub fn into_stringe(self) -> Stringe {
        self.stringe
    }
}

impl<T> Deref for Token<T> {
    type Target = Stringe;

    fn deref(&self) -> &Self::Target {
        &self.stringe
    }
}

impl<T> AsRef<str> for Token<T> {
    fn as_ref(&self) -> &str {
        self.stringe.as_str()
    }
}

impl<T> PartialEq<&str> for Token<T> {
    fn eq(&self, other: &&str) -> bool {
        self.stringe.as_str() == *other
    }
}

impl<T: fmt::Debug> fmt::Display for Token<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:?}: '{}'>", self.id, self.stringe)
    }
}

impl<T: fmt::Debug> fmt::Debug for Token<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("id", &self.id)
            .field("value", &self.stringe.as_str())
            .field("line", &self.stringe.line())
            .field("column", &self.stringe.column())
            .finish()
    }
}
