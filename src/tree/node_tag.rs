use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The closed set of node kinds a query document is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeTag {
    Base,
    List,
    Var,
    Query,
    Select,
    Ctes,
    Cte,
    Columns,
    Column,
    From,
    Where,
    Table,
    Alias,
    Join,
    JoinOn,
    SourceTable,
}

impl NodeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeTag::Base => "base",
            NodeTag::List => "list",
            NodeTag::Var => "var",
            NodeTag::Query => "query",
            NodeTag::Select => "select",
            NodeTag::Ctes => "ctes",
            NodeTag::Cte => "cte",
            NodeTag::Columns => "columns",
            NodeTag::Column => "column",
            NodeTag::From => "from",
            NodeTag::Where => "where",
            NodeTag::Table => "table",
            NodeTag::Alias => "alias",
            NodeTag::Join => "join",
            NodeTag::JoinOn => "joinOn",
            NodeTag::SourceTable => "sourceTable",
        }
    }
}

impl Display for NodeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
