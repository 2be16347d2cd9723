//! Strongly-connected-component detection over the module dependency ("slice") graph.

use std::collections::{HashMap, HashSet};

/// A strongly-connected component of size greater than one: a genuine cycle among module
/// identifiers.
pub type Cycle = Vec<String>;

/// Finds every cycle (SCC of size > 1) in `edges`, a module-identifier adjacency map.
#[must_use]
pub fn find_cycles(edges: &HashMap<String, HashSet<String>>) -> Vec<Cycle> {
    #[cfg(feature = "petgraph")]
    {
        find_cycles_petgraph(edges)
    }
    #[cfg(not(feature = "petgraph"))]
    {
        find_cycles_fallback(edges)
    }
}

#[cfg(feature = "petgraph")]
fn find_cycles_petgraph(edges: &HashMap<String, HashSet<String>>) -> Vec<Cycle> {
    use petgraph::graphmap::DiGraphMap;

    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    for node in edges.keys() {
        graph.add_node(node.as_str());
    }
    for (from, targets) in edges {
        for to in targets {
            graph.add_node(to.as_str());
            graph.add_edge(from.as_str(), to.as_str(), ());
        }
    }

    petgraph::algo::tarjan_scc(&graph)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|scc| {
            let mut names: Vec<String> = scc.into_iter().map(ToOwned::to_owned).collect();
            names.sort();
            names
        })
        .collect()
}

/// A hand-rolled iterative Tarjan's SCC, used when the `petgraph` feature is disabled.
#[cfg_attr(feature = "petgraph", allow(dead_code))]
fn find_cycles_fallback(edges: &HashMap<String, HashSet<String>>) -> Vec<Cycle> {
    struct Tarjan<'a> {
        edges: &'a HashMap<String, HashSet<String>>,
        index: HashMap<String, usize>,
        low_link: HashMap<String, usize>,
        on_stack: HashSet<String>,
        stack: Vec<String>,
        next_index: usize,
        sccs: Vec<Vec<String>>,
    }

    impl<'a> Tarjan<'a> {
        fn visit(&mut self, node: &str) {
            self.index.insert(node.to_owned(), self.next_index);
            self.low_link.insert(node.to_owned(), self.next_index);
            self.next_index += 1;
            self.stack.push(node.to_owned());
            self.on_stack.insert(node.to_owned());

            if let Some(targets) = self.edges.get(node) {
                let mut targets: Vec<&String> = targets.iter().collect();
                targets.sort();
                for target in targets {
                    if !self.index.contains_key(target) {
                        self.visit(target);
                        let target_low = self.low_link[target];
                        let node_low = self.low_link[node];
                        self.low_link.insert(node.to_owned(), node_low.min(target_low));
                    } else if self.on_stack.contains(target) {
                        let target_index = self.index[target];
                        let node_low = self.low_link[node];
                        self.low_link.insert(node.to_owned(), node_low.min(target_index));
                    }
                }
            }

            if self.low_link[node] == self.index[node] {
                let mut component = Vec::new();
                loop {
                    let top = self.stack.pop().expect("stack non-empty while closing an SCC");
                    self.on_stack.remove(&top);
                    let is_root = top == node;
                    component.push(top);
                    if is_root {
                        break;
                    }
                }
                self.sccs.push(component);
            }
        }
    }

    let mut tarjan = Tarjan {
        edges,
        index: HashMap::new(),
        low_link: HashMap::new(),
        on_stack: HashSet::new(),
        stack: Vec::new(),
        next_index: 0,
        sccs: Vec::new(),
    };

    let mut nodes: Vec<&String> = edges.keys().collect();
    nodes.sort();
    for node in nodes {
        if !tarjan.index.contains_key(node) {
            tarjan.visit(node);
        }
    }

    tarjan
        .sccs
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|mut scc| {
            scc.sort();
            scc
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(pairs: &[(&str, &str)]) -> HashMap<String, HashSet<String>> {
        let mut map: HashMap<String, HashSet<String>> = HashMap::new();
        for (from, to) in pairs {
            map.entry((*from).to_owned()).or_default().insert((*to).to_owned());
        }
        map
    }

    #[test]
    fn acyclic_graph_has_no_cycles() {
        let edges = edges(&[("a", "b"), ("b", "c")]);
        assert!(find_cycles(&edges).is_empty());
    }

    #[test]
    fn two_node_cycle_is_detected() {
        let edges = edges(&[("a", "b"), ("b", "a")]);
        let cycles = find_cycles(&edges);
        assert_eq!(1, cycles.len());
        assert_eq!(vec!["a".to_owned(), "b".to_owned()], cycles[0]);
    }

    #[test]
    fn self_loop_is_not_a_cycle() {
        let edges = edges(&[("a", "a")]);
        assert!(find_cycles(&edges).is_empty());
    }
}
