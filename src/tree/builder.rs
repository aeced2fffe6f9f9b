use crate::{
    schema::Schema,
    tree::{JoinType, KeyGenerator, KeyKind, Node, NodeData, NodeTag},
};

/// Configuration used when building fresh subtrees.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Strategy for allocating node keys
    pub key_kind: KeyKind,
}

impl BuilderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uuid() -> Self {
        Self { key_kind: KeyKind::Uuid }
    }

    pub fn sequential() -> Self {
        Self { key_kind: KeyKind::Sequential }
    }
}

/// Produces canonical default subtrees. Every call allocates fresh keys for
/// every node it creates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeBuilder {
    keys: KeyGenerator,
}

impl NodeBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self { keys: KeyGenerator::new(config.key_kind) }
    }

    pub fn leaf(&self, tag: NodeTag) -> Node {
        Node::new(self.keys.next_key(), tag)
    }

    fn branch(&self, tag: NodeTag, children: Vec<Node>) -> Node {
        self.leaf(tag).with_children(children)
    }

    /// `Query { CTEs: [], Select }`
    pub fn query(&self) -> Node {
        self.branch(NodeTag::Query, vec![
            self.branch(NodeTag::Ctes, vec![]),
            self.select(),
        ])
    }

    /// `Select { Columns: [], From { Table }, Where }`
    pub fn select(&self) -> Node {
        self.branch(NodeTag::Select, vec![
            self.branch(NodeTag::Columns, vec![]),
            self.branch(NodeTag::From, vec![self.leaf(NodeTag::Table)]),
            self.leaf(NodeTag::Where),
        ])
    }

    /// `Column { Var }`
    pub fn column(&self) -> Node {
        self.branch(NodeTag::Column, vec![self.leaf(NodeTag::Var)])
    }

    /// `Join(left) { Table, JoinOn { Var, Var } }`
    pub fn join(&self) -> Node {
        self.branch(NodeTag::Join, vec![
            self.leaf(NodeTag::Table),
            self.branch(NodeTag::JoinOn, vec![
                self.leaf(NodeTag::Var),
                self.leaf(NodeTag::Var),
            ]),
        ])
        .with_data(NodeData::default().with_join_type(JoinType::Left))
    }

    /// `CTE { Alias, Select }`
    pub fn cte(&self) -> Node {
        self.branch(NodeTag::Cte, vec![self.alias(), self.select()])
    }

    pub fn alias(&self) -> Node {
        self.leaf(NodeTag::Alias)
    }

    /// A `List` of `SourceTable` nodes, one per table of `schema`, for
    /// browsing what can be queried.
    pub fn source_list(&self, schema: &Schema) -> Node {
        let tables = schema.from.iter()
            .map(|t| {
                let data = NodeData {
                    alias: Some(t.name.clone()),
                    columns: Some(t.columns.iter().map(|c| c.name.clone()).collect()),
                    ..NodeData::default()
                };
                self.leaf(NodeTag::SourceTable).with_data(data)
            })
            .collect();
        self.branch(NodeTag::List, tables)
    }
}

pub fn new_query() -> Node {
    NodeBuilder::default().query()
}

pub fn new_select() -> Node {
    NodeBuilder::default().select()
}

pub fn new_column() -> Node {
    NodeBuilder::default().column()
}

pub fn new_join() -> Node {
    NodeBuilder::default().join()
}

pub fn new_cte() -> Node {
    NodeBuilder::default().cte()
}
