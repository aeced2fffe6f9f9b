/// Knobs for [`SqlEmitter`](crate::emitter::SqlEmitter) output.
///
/// The default reproduces the builder's established output byte for byte,
/// trailing `as ` on unaliased columns included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterConfig {
    /// Write `<var> as ` even when a column has no alias.
    pub keep_empty_alias: bool,
    /// Text emitted for each join; join SQL is not generated yet. Every join
    /// is written after the table text with a single space in front of it,
    /// e.g. `"table_#t" TODO JOINS TODO JOINS`.
    pub join_placeholder: String,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            keep_empty_alias: true,
            join_placeholder: "TODO JOINS".to_string(),
        }
    }
}

impl EmitterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the dangling ` as ` on columns without an alias.
    pub fn clean() -> Self {
        Self { keep_empty_alias: false, ..Self::default() }
    }
}
