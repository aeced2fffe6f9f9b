use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    document::DocumentConfig,
    emitter::{EmitError, SqlEmitter},
    mutation::{MutationError, MutationRequest},
    resolver::{ContextResolver, NodeContext, ResolvedContexts, UnresolvedReference},
    schema::SchemaProvider,
    tree::{validate, Key, Node, NodeBuilder},
};

/// The query being edited, plus what is needed to resolve and render it.
///
/// The root is the only mutable cell: each dispatched request produces a new
/// tree that replaces the old one whole, so readers holding a previous root
/// keep a complete, unchanged tree.
#[derive(Debug, Clone)]
pub struct QueryDocument {
    root: Arc<Node>,
    base: NodeContext,
    builder: NodeBuilder,
    emitter: SqlEmitter,
}

impl QueryDocument {
    pub fn new(provider: &dyn SchemaProvider) -> Self {
        Self::with_config(provider, DocumentConfig::default())
    }

    pub fn with_config(provider: &dyn SchemaProvider, config: DocumentConfig) -> Self {
        let builder = NodeBuilder::new(config.builder);
        Self::from_root(builder.query(), provider, config)
    }

    /// Wrap an existing tree, e.g. one deserialized from JSON.
    pub fn from_root(root: Node, provider: &dyn SchemaProvider, config: DocumentConfig) -> Self {
        Self {
            root: Arc::new(root),
            base: NodeContext::new(provider.schema()),
            builder: NodeBuilder::new(config.builder),
            emitter: SqlEmitter::new(config.emitter),
        }
    }

    pub fn root(&self) -> &Arc<Node> {
        &self.root
    }

    pub fn builder(&self) -> &NodeBuilder {
        &self.builder
    }

    /// Context handed to the root: the catalog tables and nothing else.
    pub fn base_context(&self) -> &NodeContext {
        &self.base
    }

    /// Swap in a new catalog for the next render cycle.
    pub fn set_schema(&mut self, provider: &dyn SchemaProvider) {
        self.base = NodeContext::new(provider.schema());
    }

    /// Apply one request. On error the current tree is left untouched.
    pub fn dispatch(&mut self, request: MutationRequest) -> Result<&Arc<Node>, MutationError> {
        debug!(
            op = ?request.operation,
            target = ?request.path.last(),
            depth = request.path.len(),
            "dispatching mutation"
        );
        let next = request.apply(&self.root)?;

        let violations = validate(&next);
        if !violations.is_empty() {
            warn!(count = violations.len(), first = %violations[0], "mutation broke document shape");
        }

        self.root = next;
        Ok(&self.root)
    }

    pub fn node_at(&self, path: &[Key]) -> Option<&Node> {
        self.root.node_at(path)
    }

    pub fn path_to(&self, key: &Key) -> Option<Vec<Key>> {
        self.root.path_to(key)
    }

    pub fn context_at(&self, path: &[Key]) -> Option<NodeContext> {
        ContextResolver::context_at(&self.root, path, &self.base)
    }

    pub fn contexts(&self) -> ResolvedContexts {
        ContextResolver::resolve_all(&self.root, &self.base)
    }

    pub fn unresolved_references(&self) -> Vec<UnresolvedReference> {
        ContextResolver::unresolved_references(&self.root, &self.base)
    }

    pub fn sql(&self) -> Result<String, EmitError> {
        self.emitter.to_sql(&self.root)
    }

    /// SQL text, or the error marker in its place.
    pub fn render_sql(&self) -> String {
        match self.sql() {
            Ok(sql) => sql,
            Err(err) => {
                warn!(%err, "rendering error marker instead of sql");
                err.to_string()
            }
        }
    }

    /// A `List` of `SourceTable` nodes describing the catalog.
    pub fn source_list(&self) -> Node {
        self.builder.source_list(&self.base.schema)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        _tests::fixtures::shop_catalog,
        emitter::EmitterConfig,
        mutation::MutationRequest,
        schema::{Schema, SchemaCatalog},
        tree::{BuilderConfig, JoinType, NodeTag},
    };

    fn shop() -> QueryDocument {
        QueryDocument::new(&shop_catalog())
    }

    /// Key path to the first child of each tag, starting at the root.
    fn path_of(doc: &QueryDocument, tags: &[NodeTag]) -> Vec<Key> {
        let mut path = vec![doc.root().key.clone()];
        let mut current: &Node = doc.root();
        for tag in tags {
            current = current.child_of_tag(*tag).expect("tag on path").as_ref();
            path.push(current.key.clone());
        }
        path
    }

    fn edit(doc: &mut QueryDocument, path: &[Key], f: impl FnOnce(&Node, Vec<Key>) -> MutationRequest) {
        let target = doc.node_at(path).expect("path exists").clone();
        doc.dispatch(f(&target, path.to_vec())).expect("dispatch succeeds");
    }

    #[test]
    fn test_new_document_renders_empty_select() {
        let doc = shop();
        assert_eq!(doc.sql().unwrap(), "SELECT * FROM ");
        assert!(doc.unresolved_references().is_empty());
    }

    #[test]
    fn test_editing_session() {
        let mut doc = shop();
        let builder = *doc.builder();

        // pick the customers table and alias it
        let table = path_of(&doc, &[NodeTag::Select, NodeTag::From, NodeTag::Table]);
        edit(&mut doc, &table, |n, p| MutationRequest::select_value(n, p, Some(Key::from("t_customers"))));
        edit(&mut doc, &table, |n, p| MutationRequest::toggle_alias(n, p, &builder));
        let alias_key = doc.node_at(&table).unwrap().child_of_tag(NodeTag::Alias).unwrap().key.clone();
        let alias = [table.clone(), vec![alias_key]].concat();
        edit(&mut doc, &alias, |n, p| MutationRequest::set_alias(n, p, "c"));

        // add a column and pick customers.name through the picker context
        let columns = path_of(&doc, &[NodeTag::Select, NodeTag::Columns]);
        edit(&mut doc, &columns, |n, p| MutationRequest::add_child(n, p, builder.column(), false));
        let column = doc.node_at(&columns).unwrap().children()[0].clone();
        let var = [columns.clone(), vec![column.key.clone(), column.children()[0].key.clone()]].concat();

        let ctx = doc.context_at(&var).expect("var has a context");
        let labels: Vec<String> = ctx.available_columns.columns.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["c.customer_id", "c.name", "c.username"]);
        let name = ctx.available_columns.columns[1].key.clone();
        edit(&mut doc, &var, |n, p| MutationRequest::select_value(n, p, Some(name)));

        assert_eq!(
            doc.sql().unwrap(),
            "SELECT \"column_#t_customers.name\" as  FROM \"table_#t_customers\" as c"
        );

        // add a join and switch it to inner
        let from = path_of(&doc, &[NodeTag::Select, NodeTag::From]);
        edit(&mut doc, &from, |n, p| MutationRequest::add_child(n, p, builder.join(), false));
        let join = doc.node_at(&from).unwrap().children_of_tag(NodeTag::Join)[0].key.clone();
        let join = [from.clone(), vec![join]].concat();
        edit(&mut doc, &join, |n, p| MutationRequest::set_join_type(n, p, JoinType::Inner));
        assert_eq!(doc.node_at(&join).unwrap().data.join_type, Some(JoinType::Inner));
        assert!(doc.sql().unwrap().ends_with("as c TODO JOINS"));

        // swapping the table strands the picked column
        edit(&mut doc, &table, |n, p| MutationRequest::select_value(n, p, Some(Key::from("t_order"))));
        assert_eq!(
            doc.unresolved_references(),
            vec![UnresolvedReference::Column { node: var.last().unwrap().clone(), key: Key::from("t_customers.name") }]
        );
        assert!(validate(doc.root()).is_empty());
    }

    #[test]
    fn test_failed_dispatch_keeps_tree() {
        let mut doc = shop();
        let before = doc.root().clone();

        let request = MutationRequest::replace(
            vec![doc.root().key.clone(), Key::from("missing")],
            Node::new(Key::from("x"), NodeTag::Where),
        );
        let err = doc.dispatch(request).unwrap_err();
        assert!(matches!(err, MutationError::PathNotFound { .. }));
        assert!(Arc::ptr_eq(doc.root(), &before));
    }

    #[test]
    fn test_old_root_survives_dispatch() {
        let mut doc = shop();
        let before = doc.root().clone();
        let ctes = path_of(&doc, &[NodeTag::Ctes]);
        let builder = *doc.builder();

        edit(&mut doc, &ctes, |n, p| MutationRequest::add_child(n, p, builder.cte(), false));

        assert!(before.child_of_tag(NodeTag::Ctes).unwrap().children().is_empty());
        assert_eq!(doc.root().child_of_tag(NodeTag::Ctes).unwrap().children().len(), 1);
        assert!(Arc::ptr_eq(
            before.child_of_tag(NodeTag::Select).unwrap(),
            doc.root().child_of_tag(NodeTag::Select).unwrap()
        ));
        assert_eq!(doc.sql().unwrap(), "WITH (SELECT * FROM )SELECT * FROM ");
    }

    #[test]
    fn test_render_sql_reports_unsupported_root() {
        let builder = NodeBuilder::default();
        let select = builder.select();
        let key = select.key.clone();
        let doc = QueryDocument::from_root(select, &Schema::default(), DocumentConfig::default());

        assert_eq!(doc.render_sql(), format!("Can't get SQL for node type: select key: {key}"));
    }

    #[test]
    fn test_config_flows_to_builder_and_emitter() {
        let config = DocumentConfig::from(BuilderConfig::sequential(), EmitterConfig::clean());
        let mut doc = QueryDocument::with_config(&shop_catalog(), config);
        assert!(doc.root().key.as_str().starts_with('n'));

        let builder = *doc.builder();
        let columns = path_of(&doc, &[NodeTag::Select, NodeTag::Columns]);
        edit(&mut doc, &columns, |n, p| MutationRequest::add_child(n, p, builder.column(), false));
        assert_eq!(doc.sql().unwrap(), "SELECT  FROM ");
    }

    #[test]
    fn test_source_list_and_schema_swap() {
        let mut doc = shop();
        let list = doc.source_list();
        assert_eq!(list.children().len(), 4);
        assert_eq!(list.children()[0].data.alias(), Some("customers"));

        doc.set_schema(&SchemaCatalog::new("empty", vec![]));
        assert!(doc.source_list().children().is_empty());
        assert_eq!(doc.base_context().visible_tables().count(), 0);
    }

    #[test]
    fn test_loaded_document_with_empty_selections() {
        let text = r#"{
            "key": "q", "type": "query", "data": {},
            "children": [
                {"key": "ctes", "type": "ctes", "data": {}, "children": []},
                {"key": "s", "type": "select", "data": {}, "children": [
                    {"key": "cols", "type": "columns", "data": {}, "children": [
                        {"key": "c", "type": "column", "data": {}, "children": [
                            {"key": "v", "type": "var", "data": {"selectedValue": ""}},
                            {"key": "a", "type": "alias", "data": {"alias": "x"}}
                        ]}
                    ]},
                    {"key": "f", "type": "from", "data": {}, "children": [
                        {"key": "t", "type": "table", "data": {"selectedValue": ""}, "children": [
                            {"key": "ta", "type": "alias", "data": {"alias": ""}}
                        ]}
                    ]},
                    {"key": "w", "type": "where", "data": {}}
                ]}
            ]
        }"#;
        let root: Node = serde_json::from_str(text).unwrap();
        let doc = QueryDocument::from_root(root, &shop_catalog(), DocumentConfig::default());

        assert_eq!(doc.sql().unwrap(), "SELECT  as x FROM ");
        assert!(doc.unresolved_references().is_empty());
        assert!(validate(doc.root()).is_empty());
    }

    #[test]
    fn test_json_dump_round_trips() {
        let doc = shop();
        let text = doc.root().to_json_pretty().unwrap();
        let back: Node = serde_json::from_str(&text).unwrap();
        assert_eq!(&back, doc.root().as_ref());

        let restored = QueryDocument::from_root(back, &shop_catalog(), DocumentConfig::default());
        assert_eq!(restored.sql().unwrap(), doc.sql().unwrap());
    }

    /// Editing gestures a user can make, addressed by position so they apply
    /// to whatever tree the previous steps produced.
    #[derive(Debug, Clone)]
    enum Gesture {
        AddColumn(bool),
        RemoveColumn(usize),
        ToggleColumnAlias(usize),
        AddJoin,
        RemoveJoin(usize),
        AddCte,
        RemoveCte(usize),
        PickTable(usize),
    }

    fn gesture() -> impl Strategy<Value = Gesture> {
        prop_oneof![
            any::<bool>().prop_map(Gesture::AddColumn),
            (0..4usize).prop_map(Gesture::RemoveColumn),
            (0..4usize).prop_map(Gesture::ToggleColumnAlias),
            Just(Gesture::AddJoin),
            (0..4usize).prop_map(Gesture::RemoveJoin),
            Just(Gesture::AddCte),
            (0..4usize).prop_map(Gesture::RemoveCte),
            (0..5usize).prop_map(Gesture::PickTable),
        ]
    }

    fn nth(doc: &QueryDocument, path: &[Key], tag: NodeTag, i: usize) -> Option<Key> {
        doc.node_at(path)?.children_of_tag(tag).get(i).map(|n| n.key.clone())
    }

    fn perform(doc: &mut QueryDocument, gesture: &Gesture) {
        let builder = *doc.builder();
        let columns = path_of(doc, &[NodeTag::Select, NodeTag::Columns]);
        let from = path_of(doc, &[NodeTag::Select, NodeTag::From]);
        let ctes = path_of(doc, &[NodeTag::Ctes]);

        match gesture {
            Gesture::AddColumn(front) => {
                edit(doc, &columns, |n, p| MutationRequest::add_child(n, p, builder.column(), *front));
            }
            Gesture::RemoveColumn(i) => {
                if let Some(key) = nth(doc, &columns, NodeTag::Column, *i) {
                    edit(doc, &columns, |n, p| MutationRequest::remove_child(n, p, &key));
                }
            }
            Gesture::ToggleColumnAlias(i) => {
                if let Some(key) = nth(doc, &columns, NodeTag::Column, *i) {
                    let path = [columns.clone(), vec![key]].concat();
                    edit(doc, &path, |n, p| MutationRequest::toggle_alias(n, p, &builder));
                }
            }
            Gesture::AddJoin => {
                edit(doc, &from, |n, p| MutationRequest::add_child(n, p, builder.join(), false));
            }
            Gesture::RemoveJoin(i) => {
                if let Some(key) = nth(doc, &from, NodeTag::Join, *i) {
                    edit(doc, &from, |n, p| MutationRequest::remove_child(n, p, &key));
                }
            }
            Gesture::AddCte => {
                edit(doc, &ctes, |n, p| MutationRequest::add_child(n, p, builder.cte(), false));
            }
            Gesture::RemoveCte(i) => {
                if let Some(key) = nth(doc, &ctes, NodeTag::Cte, *i) {
                    edit(doc, &ctes, |n, p| MutationRequest::remove_child(n, p, &key));
                }
            }
            Gesture::PickTable(i) => {
                let picked = doc.base_context().schema.from.get(*i).map(|t| t.key.clone());
                let table = path_of(doc, &[NodeTag::Select, NodeTag::From, NodeTag::Table]);
                edit(doc, &table, |n, p| MutationRequest::select_value(n, p, picked));
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: any edit sequence keeps keys unique and the shape valid
        #[test]
        fn test_edit_sequences_preserve_invariants(gestures in proptest::collection::vec(gesture(), 1..30)) {
            let mut doc = shop();
            for g in &gestures {
                perform(&mut doc, g);
                prop_assert!(validate(doc.root()).is_empty(), "after {:?}: {:?}", g, validate(doc.root()));
            }
            prop_assert!(doc.sql().unwrap().contains("SELECT "));
            prop_assert_eq!(doc.contexts().len(), {
                let mut n = 0;
                doc.root().visit(&mut |_| n += 1);
                n
            });
        }
    }
}
