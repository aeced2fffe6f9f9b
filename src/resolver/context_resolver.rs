use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::{
    resolver::{NodeContext, ResolvedContexts, UnresolvedReference},
    schema::{AvailableColumns, ColumnInfo, Schema, TableInfo},
    tree::{Key, Node, NodeTag},
};

/// Computes, top-down, which tables and columns are name-resolvable at each
/// node. Everything is recomputed from the root; nothing is cached.
pub struct ContextResolver;

impl ContextResolver {
    /// Columns a select exposes to whoever selects from it. Only aliased
    /// columns have a name, so unaliased ones are left out.
    pub fn columns_from_select(select: &Node) -> Vec<ColumnInfo> {
        let Some(columns) = select.child_of_tag(NodeTag::Columns) else {
            return vec![];
        };
        columns.children_of_tag(NodeTag::Column)
            .into_iter()
            .filter_map(|column| {
                let name = column.alias_text();
                (!name.is_empty()).then(|| ColumnInfo::new(column.key.clone(), name))
            })
            .collect()
    }

    /// The virtual table a CTE defines, if it has both an alias and a select.
    pub fn cte_table(cte: &Node) -> Option<TableInfo> {
        let alias = cte.child_of_tag(NodeTag::Alias)?.data.alias()?;
        let select = cte.child_of_tag(NodeTag::Select)?;
        Some(TableInfo {
            key: cte.key.clone(),
            name: alias.to_string(),
            columns: Self::columns_from_select(select)
                .into_iter()
                .map(|c| c.with_from(alias))
                .collect(),
        })
    }

    /// Every complete CTE of `query`, in document order.
    pub fn local_schema(query: &Node) -> Schema {
        let from = query.child_of_tag(NodeTag::Ctes)
            .map(|ctes| {
                ctes.children_of_tag(NodeTag::Cte)
                    .into_iter()
                    .filter_map(|cte| Self::cte_table(cte))
                    .collect()
            })
            .unwrap_or_default();
        Schema { from }
    }

    /// Named columns of the table picked under `holder` (a From or a Join),
    /// qualified by the table's alias when it has one.
    fn source_columns(holder: &Node, ctx: &NodeContext) -> Vec<ColumnInfo> {
        let Some(table) = holder.child_of_tag(NodeTag::Table) else {
            return vec![];
        };
        let Some(key) = table.data.selected() else {
            return vec![];
        };
        let Some(info) = ctx.find_table(key) else {
            debug!(table = %key, node = %table.key, "table not in scope");
            return vec![];
        };

        let alias = table.alias_text();
        info.columns.iter()
            .filter(|c| !c.name.is_empty())
            .map(|c| match alias {
                "" => c.clone(),
                alias => c.clone().with_from(alias),
            })
            .collect()
    }

    /// Columns of the FROM table followed by the columns of every join, in
    /// join order. Duplicates are kept.
    pub fn available_columns(select: &Node, ctx: &NodeContext) -> AvailableColumns {
        let Some(from) = select.child_of_tag(NodeTag::From) else {
            return AvailableColumns::default();
        };
        let mut columns = Self::source_columns(from, ctx);
        for join in from.children_of_tag(NodeTag::Join) {
            columns.extend(Self::source_columns(join, ctx));
        }
        AvailableColumns { columns }
    }

    /// Context of each direct child of `node`, given the context of `node`.
    pub fn child_contexts<'a>(node: &'a Node, ctx: &NodeContext) -> Vec<(&'a Arc<Node>, NodeContext)> {
        match node.tag {
            NodeTag::Query => {
                let scoped = ctx.with_local_schema(Self::local_schema(node));
                node.children().iter()
                    .map(|child| match child.tag {
                        NodeTag::Select => (child, scoped.clone()),
                        _ => (child, ctx.clone()),
                    })
                    .collect()
            }
            NodeTag::Ctes => {
                // a CTE sees the CTEs defined before it, never the ones after
                let mut visible = Schema::default();
                let mut out = Vec::with_capacity(node.children().len());
                for child in node.children() {
                    out.push((child, ctx.with_local_schema(visible.clone())));
                    if child.tag == NodeTag::Cte {
                        visible.from.extend(Self::cte_table(child));
                    }
                }
                out
            }
            NodeTag::Select => {
                let scoped = ctx.with_available_columns(Self::available_columns(node, ctx));
                node.children().iter()
                    .map(|child| match child.tag {
                        NodeTag::Columns | NodeTag::From | NodeTag::Where => (child, scoped.clone()),
                        _ => (child, ctx.clone()),
                    })
                    .collect()
            }
            NodeTag::Base
            | NodeTag::List
            | NodeTag::Var
            | NodeTag::Cte
            | NodeTag::Columns
            | NodeTag::Column
            | NodeTag::From
            | NodeTag::Where
            | NodeTag::Table
            | NodeTag::Alias
            | NodeTag::Join
            | NodeTag::JoinOn
            | NodeTag::SourceTable => node.children().iter().map(|child| (child, ctx.clone())).collect(),
        }
    }

    /// Context of every node under `root`.
    pub fn resolve_all(root: &Node, base: &NodeContext) -> ResolvedContexts {
        let mut contexts = IndexMap::new();
        Self::resolve_into(root, base.clone(), &mut contexts);
        debug!(root = %root.key, nodes = contexts.len(), "context pass finished");
        ResolvedContexts { contexts }
    }

    fn resolve_into(node: &Node, ctx: NodeContext, out: &mut IndexMap<Key, NodeContext>) {
        let children = Self::child_contexts(node, &ctx);
        out.insert(node.key.clone(), ctx);
        for (child, child_ctx) in children {
            Self::resolve_into(child, child_ctx, out);
        }
    }

    /// Context of the node at `path`, specializing only along that path.
    pub fn context_at(root: &Node, path: &[Key], base: &NodeContext) -> Option<NodeContext> {
        let (first, rest) = path.split_first()?;
        if first != &root.key {
            return None;
        }
        let mut node = root;
        let mut ctx = base.clone();
        for key in rest {
            let (child, child_ctx) = Self::child_contexts(node, &ctx)
                .into_iter()
                .find(|(child, _)| &child.key == key)?;
            node = child.as_ref();
            ctx = child_ctx;
        }
        Some(ctx)
    }

    /// Every table or column pick under `root` that its context cannot resolve.
    pub fn unresolved_references(root: &Node, base: &NodeContext) -> Vec<UnresolvedReference> {
        let contexts = Self::resolve_all(root, base);
        let mut unresolved = Vec::new();
        root.visit(&mut |node| {
            let (Some(key), Some(ctx)) = (node.data.selected(), contexts.get(&node.key)) else {
                return;
            };
            match node.tag {
                NodeTag::Table if ctx.find_table(key).is_none() => {
                    unresolved.push(UnresolvedReference::Table { node: node.key.clone(), key: key.clone() });
                }
                NodeTag::Var if !node.data.is_raw && ctx.find_column(key).is_none() => {
                    unresolved.push(UnresolvedReference::Column { node: node.key.clone(), key: key.clone() });
                }
                _ => {}
            }
        });
        unresolved
    }
}
