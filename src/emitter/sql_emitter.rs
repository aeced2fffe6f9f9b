use crate::{
    emitter::{EmitError, EmitterConfig},
    tree::{Key, Node, NodeTag},
};

/// Placeholder for a picked column; real names are not substituted yet.
pub fn column_reference(key: &Key) -> String {
    format!("\"column_#{key}\"")
}

/// Placeholder for a picked table.
pub fn table_reference(key: &Key) -> String {
    format!("\"table_#{key}\"")
}

/// Compiles a query tree into SQL text, one case per tag.
///
/// Missing children degrade to empty text so that every intermediate editing
/// state still produces output. WHERE is not emitted.
#[derive(Debug, Default, Clone)]
pub struct SqlEmitter {
    config: EmitterConfig,
}

impl SqlEmitter {
    pub fn new(config: EmitterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// SQL for a whole document. The root must be a `Query`.
    pub fn to_sql(&self, root: &Node) -> Result<String, EmitError> {
        match root.tag {
            NodeTag::Query => Ok(self.query(root)),
            _ => Err(Self::unsupported(root)),
        }
    }

    /// SQL fragment for any node that has a textual form.
    pub fn emit(&self, node: &Node) -> Result<String, EmitError> {
        match node.tag {
            NodeTag::Query => Ok(self.query(node)),
            NodeTag::Ctes => Ok(self.ctes(node)),
            NodeTag::Cte => Ok(self.cte(node)),
            NodeTag::Select => Ok(self.select(node)),
            NodeTag::Columns => Ok(self.columns(node)),
            NodeTag::Column => Ok(self.column(node)),
            NodeTag::Var => Ok(self.var(node)),
            NodeTag::From => Ok(self.from(node)),
            NodeTag::Table => Ok(self.table(node)),
            NodeTag::Join => Ok(self.join(node)),
            NodeTag::Alias => Ok(self.alias(node)),
            NodeTag::Where => Ok(String::new()),
            NodeTag::JoinOn | NodeTag::List | NodeTag::SourceTable | NodeTag::Base => {
                Err(Self::unsupported(node))
            }
        }
    }

    fn unsupported(node: &Node) -> EmitError {
        EmitError::UnsupportedNodeKind { tag: node.tag, key: node.key.clone() }
    }

    fn child_sql(&self, node: &Node, tag: NodeTag, f: impl Fn(&Self, &Node) -> String) -> String {
        node.child_of_tag(tag).map(|c| f(self, &**c)).unwrap_or_default()
    }

    fn query(&self, node: &Node) -> String {
        let ctes = self.child_sql(node, NodeTag::Ctes, Self::ctes);
        let select = self.child_sql(node, NodeTag::Select, Self::select);
        ctes + &select
    }

    fn ctes(&self, node: &Node) -> String {
        let ctes = node.children_of_tag(NodeTag::Cte);
        if ctes.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = ctes.into_iter().map(|c| self.cte(c)).collect();
        format!("WITH {}", parts.join(","))
    }

    fn cte(&self, node: &Node) -> String {
        let alias = self.child_sql(node, NodeTag::Alias, Self::alias);
        let select = self.child_sql(node, NodeTag::Select, Self::select);
        format!("{alias}({select})")
    }

    fn select(&self, node: &Node) -> String {
        let columns = node.child_of_tag(NodeTag::Columns)
            .map(|c| self.columns(c))
            .unwrap_or_else(|| "*".to_string());
        let from = self.child_sql(node, NodeTag::From, Self::from);
        format!("SELECT {columns} FROM {from}")
    }

    fn columns(&self, node: &Node) -> String {
        let columns = node.children_of_tag(NodeTag::Column);
        if columns.is_empty() {
            return "*".to_string();
        }
        columns.into_iter()
            .map(|c| self.column(c))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn column(&self, node: &Node) -> String {
        let var = self.child_sql(node, NodeTag::Var, Self::var);
        let alias = self.child_sql(node, NodeTag::Alias, Self::alias);
        if alias.is_empty() && !self.config.keep_empty_alias {
            return var;
        }
        format!("{var} as {alias}")
    }

    fn var(&self, node: &Node) -> String {
        if node.data.is_raw {
            return node.data.raw_sql.clone().unwrap_or_default();
        }
        node.data.selected().map(column_reference).unwrap_or_default()
    }

    fn from(&self, node: &Node) -> String {
        let mut sql = self.child_sql(node, NodeTag::Table, Self::table);
        for join in node.children_of_tag(NodeTag::Join) {
            sql.push(' ');
            sql.push_str(&self.join(join));
        }
        sql
    }

    fn join(&self, _node: &Node) -> String {
        self.config.join_placeholder.clone()
    }

    fn table(&self, node: &Node) -> String {
        let table = node.data.selected().map(table_reference).unwrap_or_default();
        match node.alias_text() {
            "" => table,
            alias => format!("{table} as {alias}"),
        }
    }

    fn alias(&self, node: &Node) -> String {
        node.data.alias.clone().unwrap_or_default()
    }
}
