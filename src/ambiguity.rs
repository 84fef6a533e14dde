//! Advisory ambiguity detection: flags sibling nodes whose accepted inputs
//! overlap. Never consulted by parsing itself.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::tree::CommandNode;

/// Notified once per ambiguous sibling pair found by [`find_ambiguities`].
pub trait AmbiguityConsumer<S> {
    fn on_ambiguity(
        &mut self,
        parent: &Arc<RwLock<CommandNode<S>>>,
        child: &Arc<RwLock<CommandNode<S>>>,
        sibling: &Arc<RwLock<CommandNode<S>>>,
        matches: &[String],
    );
}

/// Walks every node reachable from `node`, reporting sibling pairs where one
/// child's examples are also accepted by another. Recurses unconditionally —
/// ambiguity at one level says nothing about ambiguity deeper in the tree.
pub fn find_ambiguities<S>(node: &Arc<RwLock<CommandNode<S>>>, consumer: &mut dyn AmbiguityConsumer<S>) {
    let children: Vec<_> = node.read().children().cloned().collect();

    for i in 0..children.len() {
        for j in 0..children.len() {
            if i == j {
                continue;
            }
            let child = &children[i];
            let sibling = &children[j];
            let examples = child.read().examples();
            let matches: Vec<String> = examples
                .into_iter()
                .filter(|example| sibling.read().is_valid_input(example))
                .collect();
            if !matches.is_empty() {
                consumer.on_ambiguity(node, child, sibling, &matches);
            }
        }
    }

    for child in &children {
        find_ambiguities(child, consumer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::integer;
    use crate::builder::{argument, literal};

    struct Recorder {
        hits: Vec<(String, String)>,
    }

    impl AmbiguityConsumer<()> for Recorder {
        fn on_ambiguity(
            &mut self,
            _parent: &Arc<RwLock<CommandNode<()>>>,
            child: &Arc<RwLock<CommandNode<()>>>,
            sibling: &Arc<RwLock<CommandNode<()>>>,
            _matches: &[String],
        ) {
            self.hits.push((child.read().name().to_string(), sibling.read().name().to_string()));
        }
    }

    #[test]
    fn flags_overlap_between_literal_and_numeric_argument() {
        let mut root = CommandNode::<()>::root();
        root.add_child(&Arc::new(RwLock::new(literal::<()>("0").build()))).unwrap();
        root.add_child(&Arc::new(RwLock::new(argument::<(), _>("amount", integer()).build())))
            .unwrap();
        let root = Arc::new(RwLock::new(root));

        let mut recorder = Recorder { hits: Vec::new() };
        find_ambiguities(&root, &mut recorder);

        assert!(recorder.hits.contains(&("0".to_string(), "amount".to_string())));
    }

    #[test]
    fn distinct_literals_are_not_ambiguous() {
        let mut root = CommandNode::<()>::root();
        root.add_child(&Arc::new(RwLock::new(literal::<()>("foo").build()))).unwrap();
        root.add_child(&Arc::new(RwLock::new(literal::<()>("bar").build()))).unwrap();
        let root = Arc::new(RwLock::new(root));

        let mut recorder = Recorder { hits: Vec::new() };
        find_ambiguities(&root, &mut recorder);

        assert!(recorder.hits.is_empty());
    }
}
