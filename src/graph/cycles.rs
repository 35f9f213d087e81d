//! Cycle detection over the blocking-dependency graph.

use std::collections::HashMap;

use crate::models::ArtifactMap;

/// A cycle in the `blocked_by` graph.
///
/// `cycle` runs from the first repeated artifact back to itself inclusive,
/// e.g. `["A.1", "A.2", "A.3", "A.1"]`. A self-loop is a valid one-node
/// cycle (`["A.1", "A.1"]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircularDependency {
    pub cycle: Vec<String>,
    pub message: String,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    Unvisited,
    InStack,
    Done,
}

/// Find every cycle in the directed graph drawn from each artifact to its
/// `blocked_by` prerequisites.
///
/// Depth-first search with three-color marking, on an explicit stack so
/// graph size bounds memory rather than call depth. Dependencies naming
/// ids absent from the map are ignored here; the consistency check owns
/// dangling references. Fully explored components are not re-walked, so
/// each disjoint cycle is reported exactly once.
pub fn detect_circular_dependencies(artifacts: &ArtifactMap) -> Vec<CircularDependency> {
    let mut colors: HashMap<&str, Color> = HashMap::with_capacity(artifacts.len());
    let mut issues = Vec::new();

    for start in artifacts.keys() {
        if color_of(&colors, start) != Color::Unvisited {
            continue;
        }

        // (node, index of the next neighbor to visit); path mirrors the stack.
        let mut stack: Vec<(&str, usize)> = vec![(start.as_str(), 0)];
        let mut path: Vec<&str> = vec![start.as_str()];
        colors.insert(start.as_str(), Color::InStack);

        while let Some((node, next_index)) = stack.last_mut() {
            let node = *node;
            let deps = neighbors(artifacts, node);

            if *next_index >= deps.len() {
                colors.insert(node, Color::Done);
                stack.pop();
                path.pop();
                continue;
            }

            let dep = deps[*next_index].as_str();
            *next_index += 1;

            if !artifacts.contains_key(dep) {
                continue;
            }

            match color_of(&colors, dep) {
                Color::InStack => {
                    let first = path
                        .iter()
                        .position(|n| *n == dep)
                        .expect("in-stack node is on the current path");
                    let mut cycle: Vec<String> =
                        path[first..].iter().map(|n| n.to_string()).collect();
                    cycle.push(dep.to_string());
                    let message =
                        format!("Circular dependency detected: {}", cycle.join(" -> "));
                    issues.push(CircularDependency { cycle, message });
                }
                Color::Unvisited => {
                    colors.insert(dep, Color::InStack);
                    stack.push((dep, 0));
                    path.push(dep);
                }
                Color::Done => {}
            }
        }
    }

    issues
}

fn neighbors<'a>(artifacts: &'a ArtifactMap, id: &str) -> &'a [String] {
    artifacts
        .get(id)
        .map(|a| a.metadata.relationships.blocked_by.as_slice())
        .unwrap_or(&[])
}

fn color_of(colors: &HashMap<&str, Color>, id: &str) -> Color {
    colors.get(id).copied().unwrap_or(Color::Unvisited)
}
