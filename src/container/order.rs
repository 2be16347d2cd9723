//! Topological ordering of modules by direct-dependency edges.

use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Grey,
    Black,
}

/// Computes a deterministic module order from a direct-dependency adjacency map.
///
/// On success, returns identifiers ordered so that for any edge `a -> b`, `b` precedes `a`
/// (dependencies before dependents), grouped into levels (`0` = no outbound dependencies) and,
/// within a level, sorted by identifier. If a cycle is encountered, falls back to a plain
/// identifier-sorted order over every known module.
#[must_use]
pub fn topological_order(edges: &HashMap<String, HashSet<String>>) -> Vec<String> {
    let mut all_nodes: HashSet<&str> = edges.keys().map(String::as_str).collect();
    for targets in edges.values() {
        all_nodes.extend(targets.iter().map(String::as_str));
    }
    let mut sorted_nodes: Vec<&str> = all_nodes.iter().copied().collect();
    sorted_nodes.sort_unstable();

    let mut colors: HashMap<&str, Color> = sorted_nodes.iter().map(|n| (*n, Color::White)).collect();
    let mut cycle_found = false;

    for node in &sorted_nodes {
        if colors[node] == Color::White {
            visit(node, edges, &mut colors, &mut cycle_found);
        }
    }

    if cycle_found {
        let mut fallback: Vec<String> = sorted_nodes.iter().map(|n| (*n).to_owned()).collect();
        fallback.sort();
        return fallback;
    }

    let levels = compute_levels(&sorted_nodes, edges);
    let mut ordered: Vec<&str> = sorted_nodes;
    ordered.sort_by(|a, b| levels[a].cmp(&levels[b]).then_with(|| a.cmp(b)));
    ordered.into_iter().map(ToOwned::to_owned).collect()
}

fn visit<'a>(
    node: &'a str,
    edges: &'a HashMap<String, HashSet<String>>,
    colors: &mut HashMap<&'a str, Color>,
    cycle_found: &mut bool,
) {
    colors.insert(node, Color::Grey);
    if let Some(targets) = edges.get(node) {
        let mut targets: Vec<&str> = targets.iter().map(String::as_str).collect();
        targets.sort_unstable();
        for target in targets {
            match colors.get(target).copied() {
                Some(Color::Grey) => *cycle_found = true,
                Some(Color::White) | None => {
                    colors.entry(target).or_insert(Color::White);
                    if colors[target] == Color::White {
                        visit(target, edges, colors, cycle_found);
                    }
                }
                Some(Color::Black) => {}
            }
        }
    }
    colors.insert(node, Color::Black);
}

fn compute_levels<'a>(nodes: &[&'a str], edges: &'a HashMap<String, HashSet<String>>) -> HashMap<&'a str, usize> {
    let mut levels: HashMap<&str, usize> = HashMap::new();
    fn level_of<'a>(
        node: &'a str,
        edges: &'a HashMap<String, HashSet<String>>,
        levels: &mut HashMap<&'a str, usize>,
        visiting: &mut HashSet<&'a str>,
    ) -> usize {
        if let Some(&level) = levels.get(node) {
            return level;
        }
        if !visiting.insert(node) {
            return 0;
        }
        let level = edges
            .get(node)
            .into_iter()
            .flatten()
            .map(|target| 1 + level_of(target.as_str(), edges, levels, visiting))
            .max()
            .unwrap_or(0);
        visiting.remove(node);
        levels.insert(node, level);
        level
    }

    let mut visiting = HashSet::new();
    for node in nodes {
        level_of(node, edges, &mut levels, &mut visiting);
    }
    levels
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
    fn dependencies_precede_dependents() {
        let edges = edges(&[("a", "b"), ("b", "c")]);
        let order = topological_order(&edges);
        let index = |n: &str| order.iter().position(|x| x == n).unwrap();
        assert!(index("a") > index("b"));
        assert!(index("b") > index("c"));
    }

    #[test]
    fn independent_modules_are_identifier_sorted_within_a_level() {
        let edges = edges(&[("a", "shared"), ("b", "shared")]);
        let order = topological_order(&edges);
        let index = |n: &str| order.iter().position(|x| x == n).unwrap();
        assert!(index("a") < index("b"));
    }

    #[test]
    fn cycle_falls_back_to_identifier_order() {
        let edges = edges(&[("a", "b"), ("b", "a")]);
        let order = topological_order(&edges);
        assert_eq!(vec!["a".to_owned(), "b".to_owned()], order);
    }
}
