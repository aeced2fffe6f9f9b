use crate::{emitter::EmitterConfig, tree::BuilderConfig};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentConfig {
    pub builder: BuilderConfig,
    pub emitter: EmitterConfig,
}

impl DocumentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(builder: BuilderConfig, emitter: EmitterConfig) -> Self {
        Self { builder, emitter }
    }
}
