/// Resolves to whatever another id resolves to. Always shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasDefinition {
    target: String,
}

impl AliasDefinition {
    pub fn new(target: impl Into<String>) -> Self {
        AliasDefinition {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}
