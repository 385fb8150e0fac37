//! Dependency graph over scenarios and their execution order

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use super::ScenarioDef;
use crate::error::{SuiteError, SuiteResult};

/// Scenarios plus the `depends_on` edges between them.
#[derive(Debug, Clone)]
pub struct ScenarioGraph {
    /// Scenarios in declaration order
    defs: Vec<ScenarioDef>,
    /// Map from scenario id to its declaration index
    index: HashMap<&'static str, usize>,
    /// Adjacency list: scenario index -> indexes of scenarios that depend on it
    dependents: Vec<Vec<usize>>,
}

impl ScenarioGraph {
    /// Build a graph, rejecting duplicate ids, unknown dependencies and cycles.
    pub fn build(defs: &[ScenarioDef]) -> SuiteResult<Self> {
        let mut index = HashMap::new();
        for (i, def) in defs.iter().enumerate() {
            if index.insert(def.id, i).is_some() {
                return Err(SuiteError::graph(format!(
                    "Duplicate scenario id: {}",
                    def.id
                )));
            }
        }

        let mut dependents = vec![Vec::new(); defs.len()];
        for (i, def) in defs.iter().enumerate() {
            for dep in def.depends_on {
                let &dep_idx = index.get(dep).ok_or_else(|| {
                    SuiteError::graph(format!(
                        "Scenario '{}' depends on unknown scenario '{dep}'",
                        def.id
                    ))
                })?;
                dependents[dep_idx].push(i);
            }
        }

        let graph = Self {
            defs: defs.to_vec(),
            index,
            dependents,
        };
        graph.detect_cycles()?;
        Ok(graph)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ScenarioDef> {
        self.index.get(id).map(|&i| &self.defs[i])
    }

    /// Topological order; among ready scenarios the earliest declared runs first.
    pub fn execution_order(&self) -> Vec<&ScenarioDef> {
        let all: HashSet<usize> = (0..self.defs.len()).collect();
        self.order_subset(&all)
    }

    /// The requested scenarios plus everything they transitively depend on,
    /// in execution order.
    pub fn closure(&self, ids: &[impl AsRef<str>]) -> SuiteResult<Vec<&ScenarioDef>> {
        let mut selected = HashSet::new();
        let mut stack = Vec::new();

        for id in ids {
            let id = id.as_ref();
            let &i = self
                .index
                .get(id)
                .ok_or_else(|| SuiteError::graph(format!("Unknown scenario: {id}")))?;
            stack.push(i);
        }

        while let Some(i) = stack.pop() {
            if !selected.insert(i) {
                continue;
            }
            for dep in self.defs[i].depends_on {
                stack.push(self.index[dep]);
            }
        }

        Ok(self.order_subset(&selected))
    }

    fn order_subset(&self, subset: &HashSet<usize>) -> Vec<&ScenarioDef> {
        let mut in_degree: HashMap<usize, usize> = subset
            .iter()
            .map(|&i| {
                let degree = self.defs[i]
                    .depends_on
                    .iter()
                    .filter(|dep| subset.contains(&self.index[*dep]))
                    .count();
                (i, degree)
            })
            .collect();

        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .filter(|(_, &degree)| degree == 0)
            .map(|(&i, _)| Reverse(i))
            .collect();

        let mut result = Vec::with_capacity(subset.len());
        while let Some(Reverse(i)) = ready.pop() {
            result.push(&self.defs[i]);
            for &next in &self.dependents[i] {
                if let Some(degree) = in_degree.get_mut(&next) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push(Reverse(next));
                    }
                }
            }
        }

        result
    }

    /// Detect circular dependencies using DFS
    fn detect_cycles(&self) -> SuiteResult<()> {
        let mut visited = HashSet::new();
        let mut rec_stack = HashSet::new();
        let mut path = Vec::new();

        for i in 0..self.defs.len() {
            if !visited.contains(&i) {
                if let Some(cycle) = self.dfs_detect_cycle(i, &mut visited, &mut rec_stack, &mut path)
                {
                    return Err(SuiteError::graph(format!(
                        "Circular dependency detected: {}",
                        cycle.join(" -> ")
                    )));
                }
            }
        }

        Ok(())
    }

    fn dfs_detect_cycle(
        &self,
        i: usize,
        visited: &mut HashSet<usize>,
        rec_stack: &mut HashSet<usize>,
        path: &mut Vec<usize>,
    ) -> Option<Vec<&'static str>> {
        visited.insert(i);
        rec_stack.insert(i);
        path.push(i);

        for dep in self.defs[i].depends_on {
            let d = self.index[dep];
            if !visited.contains(&d) {
                if let Some(cycle) = self.dfs_detect_cycle(d, visited, rec_stack, path) {
                    return Some(cycle);
                }
            } else if rec_stack.contains(&d) {
                let mut cycle = vec![self.defs[d].id];
                for &p in path.iter().rev() {
                    cycle.push(self.defs[p].id);
                    if p == d {
                        break;
                    }
                }
                cycle.reverse();
                return Some(cycle);
            }
        }

        path.pop();
        rec_stack.remove(&i);
        None
    }
}
