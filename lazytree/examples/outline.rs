use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use env_logger::Env;
use lazytree::{
    Command, IdAllocator, Locator, Node, NodeId, RevealFlags, TreeDataChange,
    TreeDataProvider, TreeModel, TreeOptions, flatten_tree, reveal_path,
};

/// Minimal text renderer: keeps expansion state and reprints on change.
struct Outline {
    expanded: HashSet<NodeId>,
}

impl Outline {
    fn apply(&self, model: &TreeModel, change: &TreeDataChange) {
        match change {
            TreeDataChange::All => log::info!("re-query roots"),
            TreeDataChange::Node(node) => {
                let children = model.children(Some(node));
                log::info!(
                    "re-query node {} ({} children)",
                    node.id(),
                    children.len()
                );
            },
        }
    }

    fn reveal(&mut self, model: &TreeModel, node: &Node) {
        for ancestor in reveal_path(model, node) {
            self.expanded.insert(ancestor.id());
        }
    }

    fn print(&self, model: &TreeModel) {
        let rows =
            flatten_tree(model, |node| self.expanded.contains(&node.id()));
        for row in rows {
            let marker = if row.item.collapsible_state.is_expandable() {
                if self.expanded.contains(&row.node.id()) { "v" } else { ">" }
            } else {
                " "
            };
            let icon = row
                .item
                .icon
                .as_ref()
                .map(|icon| format!("[{}] ", icon.id))
                .unwrap_or_default();
            println!(
                "{}{marker} {icon}{} (id {})",
                "  ".repeat(row.depth),
                row.item.label,
                row.item.id
            );
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .init();

    let options = TreeOptions::from_json_str(r#"{ "reveal": "EXPAND" }"#)?;
    let ids = IdAllocator::new();
    let mut model = TreeModel::with_options(options)?;
    let events = model.subscribe();

    // The renderer only learns about reveal targets through the view handle,
    // so queue them and apply after draining notifications.
    let pending = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&pending);
    model.bind_view(move |node: &Node, flags: RevealFlags| {
        log::info!("reveal requested for {} with {flags:?}", node.id());
        sink.borrow_mut().push(node.clone());
    });

    let logs = Node::new(&ids, "trace.dlt", None, Some("file"));
    let filters = Node::new(&ids, "Filters", None, Some("filter"));
    model.push_root(logs.clone());
    model.push_root(filters.clone());
    model.update_node(None, false, false);

    for (index, label) in ["ECU1", "ECU2", ""].into_iter().enumerate() {
        let ecu = Node::new(&ids, label, Some(&logs), Some("chip"));
        {
            let mut data = ecu.borrow_mut();
            data.locator =
                Some(Locator::new(format!("dlt-log://trace#{index}")));
            data.command = Some(
                Command::new("outline.open", "Open")
                    .with_argument(serde_json::json!({ "index": index })),
            );
        }
        logs.borrow_mut().children.push(ecu);
    }
    model.update_node(Some(&logs), false, false);

    let warn = Node::new(&ids, "level >= warn", None, None);
    filters.append_child(&warn);
    model.update_node(Some(&warn), true, true);

    let mut outline = Outline {
        expanded: HashSet::new(),
    };
    for change in events.drain() {
        outline.apply(&model, &change);
    }
    for node in pending.borrow_mut().drain(..) {
        outline.reveal(&model, &node);
    }
    outline.print(&model);

    model.dispose();
    Ok(())
}
