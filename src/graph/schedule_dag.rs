use crate::schedule::SchedulerError;
use crate::task::ScheduleTask;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Precedence DAG over task ids, used for topological ordering and the
/// fail-fast cycle check that runs before either pass.
pub struct ScheduleDag {
    graph: DiGraph<i32, ()>,
}

impl ScheduleDag {
    pub fn build(task_map: &HashMap<i32, ScheduleTask>) -> Self {
        let mut graph: DiGraph<i32, ()> = DiGraph::new();
        let mut id_to_index: HashMap<i32, NodeIndex> = HashMap::new();

        // Insert nodes in ascending id order so the topological order is
        // stable across runs.
        let mut ids: Vec<i32> = task_map.keys().copied().collect();
        ids.sort_unstable();
        for id in ids {
            let node_ix = graph.add_node(id);
            id_to_index.insert(id, node_ix);
        }

        // Edges run predecessor -> successor.
        for task in task_map.values() {
            for link in &task.predecessors {
                if let (Some(&u), Some(&v)) =
                    (id_to_index.get(&link.task_id), id_to_index.get(&task.id))
                {
                    graph.add_edge(u, v, ());
                }
            }
        }

        Self { graph }
    }

    /// Topological order of task ids; every predecessor appears before its
    /// successors. Errors on a dependency cycle.
    pub fn topo_order(&self) -> Result<Vec<i32>, SchedulerError> {
        let order =
            toposort(&self.graph, None).map_err(|_| SchedulerError::CyclicDependency)?;
        Ok(order.into_iter().map(|ix| self.graph[ix]).collect())
    }
}
