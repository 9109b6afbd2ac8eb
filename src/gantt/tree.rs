//! Task hierarchy built from a flat task list.
//!
//! Nodes live in an arena indexed by their position in the input slice;
//! parent and child links are indices, never owning pointers.

use std::collections::HashMap;

use crate::model::Task;

/// A task annotated with its place in the hierarchy.
///
/// `row` is the pre-order position; `parent` and `children` refer to rows of
/// the same flattened list.
#[derive(Debug, Clone, PartialEq)]
pub struct GanttNode<'a> {
    pub task: &'a Task,
    pub level: usize,
    pub row: usize,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

#[derive(Debug, Clone)]
struct ArenaNode {
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Arena of task nodes keyed by input index.
#[derive(Debug, Clone)]
pub struct TaskTree<'a> {
    tasks: &'a [Task],
    nodes: Vec<ArenaNode>,
    roots: Vec<usize>,
}

impl<'a> TaskTree<'a> {
    pub fn build(tasks: &'a [Task]) -> Self {
        let mut index_by_id: HashMap<&str, usize> = HashMap::with_capacity(tasks.len());
        for (i, task) in tasks.iter().enumerate() {
            index_by_id.entry(task.id.as_str()).or_insert(i);
        }

        let mut parents: Vec<Option<usize>> = tasks
            .iter()
            .map(|task| {
                let parent_id = task.parent_task_id.as_deref()?;
                let parent = index_by_id.get(parent_id).copied();
                if parent.is_none() {
                    tracing::debug!(
                        task = %task.id,
                        parent = parent_id,
                        "parent not found, treating as root"
                    );
                }
                parent
            })
            .collect();

        break_cycles(tasks, &mut parents);

        let mut nodes: Vec<ArenaNode> = parents
            .iter()
            .map(|&parent| ArenaNode {
                parent,
                children: Vec::new(),
            })
            .collect();
        let mut roots = Vec::new();
        for (i, parent) in parents.iter().enumerate() {
            match parent {
                Some(p) => nodes[*p].children.push(i),
                None => roots.push(i),
            }
        }

        Self {
            tasks,
            nodes,
            roots,
        }
    }

    /// Pre-order depth-first walk; each visited node takes the next row.
    pub fn flatten(&self) -> Vec<GanttNode<'a>> {
        let mut out: Vec<GanttNode<'a>> = Vec::with_capacity(self.nodes.len());
        // (input index, level, parent row)
        let mut stack: Vec<(usize, usize, Option<usize>)> =
            self.roots.iter().rev().map(|&r| (r, 0, None)).collect();

        while let Some((index, level, parent_row)) = stack.pop() {
            let row = out.len();
            if let Some(p) = parent_row {
                out[p].children.push(row);
            }
            out.push(GanttNode {
                task: &self.tasks[index],
                level,
                row,
                parent: parent_row,
                children: Vec::new(),
            });
            for &child in self.nodes[index].children.iter().rev() {
                stack.push((child, level + 1, Some(row)));
            }
        }

        out
    }
}

/// Build the hierarchy and return it flattened in pre-order.
pub fn build_tree(tasks: &[Task]) -> Vec<GanttNode<'_>> {
    TaskTree::build(tasks).flatten()
}

/// Cut every parent cycle so each chain ends at a root. Within a cycle the
/// member that comes first in the input becomes the root.
fn break_cycles(tasks: &[Task], parents: &mut [Option<usize>]) {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        InProgress,
        Done,
    }

    let mut marks = vec![Mark::Unvisited; parents.len()];
    for start in 0..parents.len() {
        let mut path: Vec<usize> = Vec::new();
        let mut current = Some(start);
        while let Some(i) = current {
            match marks[i] {
                Mark::Done => break,
                Mark::InProgress => {
                    let cycle_start = path.iter().position(|&p| p == i).unwrap_or(0);
                    let cycle = &path[cycle_start..];
                    if let Some(&head) = cycle.iter().min() {
                        tracing::warn!(
                            task = %tasks[head].id,
                            len = cycle.len(),
                            "cyclic parent chain, promoting task to root"
                        );
                        parents[head] = None;
                    }
                    break;
                }
                Mark::Unvisited => {
                    marks[i] = Mark::InProgress;
                    path.push(i);
                    current = parents[i];
                }
            }
        }
        for i in path {
            marks[i] = Mark::Done;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(id: &str, parent: Option<&str>) -> Task {
        let mut t = Task::with_id(id, id.to_uppercase());
        t.parent_task_id = parent.map(str::to_string);
        t
    }

    fn summary(nodes: &[GanttNode<'_>]) -> Vec<(String, usize)> {
        nodes.iter().map(|n| (n.task.id.clone(), n.level)).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(build_tree(&[]).is_empty());
    }

    #[test]
    fn test_flat_list_keeps_input_order() {
        let tasks = vec![task("c", None), task("a", None), task("b", None)];
        let nodes = build_tree(&tasks);
        assert_eq!(
            summary(&nodes),
            vec![("c".into(), 0), ("a".into(), 0), ("b".into(), 0)]
        );
        assert!(nodes.iter().enumerate().all(|(i, n)| n.row == i));
    }

    #[test]
    fn test_children_follow_parent_in_pre_order() {
        let tasks = vec![
            task("site", None),
            task("frame", None),
            task("clear", Some("site")),
            task("walls", Some("frame")),
            task("grade", Some("site")),
            task("survey", Some("clear")),
        ];
        let nodes = build_tree(&tasks);
        assert_eq!(
            summary(&nodes),
            vec![
                ("site".into(), 0),
                ("clear".into(), 1),
                ("survey".into(), 2),
                ("grade".into(), 1),
                ("frame".into(), 0),
                ("walls".into(), 1),
            ]
        );
        assert_eq!(nodes[0].children, vec![1, 3]);
        assert_eq!(nodes[2].parent, Some(1));
        assert_eq!(nodes[5].parent, Some(4));
    }

    #[test]
    fn test_child_listed_before_parent() {
        let tasks = vec![task("b", Some("a")), task("a", None)];
        let nodes = build_tree(&tasks);
        assert_eq!(summary(&nodes), vec![("a".into(), 0), ("b".into(), 1)]);
    }

    #[test]
    fn test_dangling_parent_becomes_root() {
        let tasks = vec![task("a", None), task("b", Some("missing"))];
        let nodes = build_tree(&tasks);
        assert_eq!(summary(&nodes), vec![("a".into(), 0), ("b".into(), 0)]);
        assert!(nodes.iter().all(|n| n.parent.is_none()));
    }

    #[test]
    fn test_self_reference_does_not_loop() {
        let tasks = vec![task("a", Some("a")), task("b", Some("a"))];
        let nodes = build_tree(&tasks);
        assert_eq!(summary(&nodes), vec![("a".into(), 0), ("b".into(), 1)]);
    }

    #[test]
    fn test_two_task_cycle_keeps_both_tasks() {
        let tasks = vec![task("a", Some("b")), task("b", Some("a"))];
        let nodes = build_tree(&tasks);
        assert_eq!(summary(&nodes), vec![("a".into(), 0), ("b".into(), 1)]);
        assert_eq!(nodes[1].parent, Some(0));
    }

    #[test]
    fn test_cycle_is_broken_at_first_member() {
        let tasks = vec![
            task("x", None),
            task("b", Some("c")),
            task("c", Some("d")),
            task("d", Some("b")),
            task("e", Some("d")),
        ];
        let nodes = build_tree(&tasks);
        assert_eq!(nodes.len(), tasks.len());
        assert_eq!(
            summary(&nodes),
            vec![
                ("x".into(), 0),
                ("b".into(), 0),
                ("d".into(), 1),
                ("c".into(), 2),
                ("e".into(), 2),
            ]
        );
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first() {
        let tasks = vec![task("a", None), task("a", None), task("c", Some("a"))];
        let nodes = build_tree(&tasks);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[1].task.id, "c");
        assert_eq!(nodes[1].level, 1);
    }
}
