use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinType {
    #[default]
    Left,
    Right,
    Inner,
}

impl JoinType {
    /// Every join kind, in picker order.
    pub const ALL: [JoinType; 3] = [JoinType::Left, JoinType::Right, JoinType::Inner];
}

impl Display for JoinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinType::Left => f.write_str("left"),
            JoinType::Right => f.write_str("right"),
            JoinType::Inner => f.write_str("inner"),
        }
    }
}
