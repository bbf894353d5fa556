use crate::Literal;

/// Explicit constructor argument of a class definition.
#[derive(Clone, Debug, PartialEq)]
pub enum Argument {
    Literal(Literal),
    /// Another definition, by id.
    Reference(String),
    /// A list mixing literals, references and tags.
    List(Vec<Argument>),
    /// Every definition carrying the tag, as a list of references.
    Tagged(String),
}

impl Argument {
    pub fn reference(id: impl Into<String>) -> Self {
        Argument::Reference(id.into())
    }

    pub fn tagged(tag: impl Into<String>) -> Self {
        Argument::Tagged(tag.into())
    }

    /// Read a literal using the string prefix convention.
    ///
    /// `"@id"` references a definition and `"*tag"` expands a tag. Doubling
    /// the prefix escapes it: `"@@x"` is the literal `"@x"` and `"**x"` the
    /// literal `"*x"`. A lone `"@"` or `"*"` stays literal. Lists are read
    /// element by element and stay a plain literal when no element refers
    /// to anything.
    pub fn from_literal(literal: Literal) -> Self {
        match literal {
            Literal::Str(text) => Self::from_prefixed(text),
            Literal::List(items) => {
                let items: Vec<Argument> = items.into_iter().map(Self::from_literal).collect();

                if items.iter().all(|item| matches!(item, Argument::Literal(_))) {
                    let literals = items
                        .into_iter()
                        .filter_map(|item| match item {
                            Argument::Literal(literal) => Some(literal),
                            _ => None,
                        })
                        .collect();
                    Argument::Literal(Literal::List(literals))
                } else {
                    Argument::List(items)
                }
            }
            other => Argument::Literal(other),
        }
    }

    fn from_prefixed(text: String) -> Self {
        let mut chars = text.chars();
        let (Some(prefix @ ('@' | '*')), Some(next)) = (chars.next(), chars.next()) else {
            return Argument::Literal(Literal::Str(text));
        };

        let rest = text[1..].to_owned();
        match (prefix, next == prefix) {
            (_, true) => Argument::Literal(Literal::Str(rest)),
            ('@', false) => Argument::Reference(rest),
            _ => Argument::Tagged(rest),
        }
    }
}

impl From<Literal> for Argument {
    fn from(literal: Literal) -> Self {
        Argument::Literal(literal)
    }
}

/// Plain string literal. Use [`Argument::from_literal`] for prefixed strings.
impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::Literal(Literal::from(value))
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Argument::Literal(Literal::Str(value))
    }
}

impl From<bool> for Argument {
    fn from(value: bool) -> Self {
        Argument::Literal(Literal::Bool(value))
    }
}

impl From<i64> for Argument {
    fn from(value: i64) -> Self {
        Argument::Literal(Literal::Int(value))
    }
}

impl From<f64> for Argument {
    fn from(value: f64) -> Self {
        Argument::Literal(Literal::Float(value))
    }
}

/// Where an explicit argument goes: a parameter name or a position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArgumentKey {
    Name(String),
    Index(usize),
}

impl From<&str> for ArgumentKey {
    fn from(name: &str) -> Self {
        ArgumentKey::Name(name.to_owned())
    }
}

impl From<String> for ArgumentKey {
    fn from(name: String) -> Self {
        ArgumentKey::Name(name)
    }
}

impl From<usize> for ArgumentKey {
    fn from(index: usize) -> Self {
        ArgumentKey::Index(index)
    }
}

/// Argument after resolution: tags are expanded, nothing is left to infer.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedArgument {
    Literal(Literal),
    Reference(String),
    List(Vec<ResolvedArgument>),
}

/// A tag attached to a definition. Higher priorities sort first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub priority: i32,
}

impl Tag {
    pub fn new(name: impl Into<String>, priority: i32) -> Self {
        Tag {
            name: name.into(),
            priority,
        }
    }
}
