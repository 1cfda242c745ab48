use crate::task::{Task, TaskId};

fn normalize_text(value: &str) -> String {
    value.to_lowercase()
}

fn title_matches(title: &str, needle: &str) -> bool {
    normalize_text(title).contains(needle)
}

/// Tasks whose title contains `term`, compared case-insensitively.
///
/// An empty term yields the whole collection in its original order.
pub fn filter_tasks(tasks: &[Task], term: &str) -> Vec<Task> {
    if term.is_empty() {
        return tasks.to_vec();
    }
    let needle = normalize_text(term);
    tasks
        .iter()
        .filter(|task| title_matches(&task.title, &needle))
        .cloned()
        .collect()
}

/// Same selection as [`filter_tasks`], as positions into `tasks`.
pub fn filter_task_indices(tasks: &[Task], term: &str) -> Vec<usize> {
    if term.is_empty() {
        return (0..tasks.len()).collect();
    }
    let needle = normalize_text(term);
    tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| title_matches(&task.title, &needle))
        .map(|(idx, _)| idx)
        .collect()
}

/// Keep the selection on `previous_id` if it is still visible, otherwise fall
/// back to the first visible row.
pub fn select_by_id(
    tasks: &[Task],
    filtered: &[usize],
    previous_id: Option<TaskId>,
) -> Option<usize> {
    if filtered.is_empty() {
        return None;
    }
    if let Some(previous_id) = previous_id {
        if let Some(idx) = filtered
            .iter()
            .copied()
            .find(|idx| tasks.get(*idx).map(|task| task.id) == Some(previous_id))
        {
            return Some(idx);
        }
    }
    filtered.first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: TaskId, title: &str) -> Task {
        Task {
            id,
            title: title.to_string(),
            completed: false,
            owner_id: 1,
        }
    }

    #[test]
    fn filter_matches_title_case_insensitive() {
        let tasks = vec![task(1, "Buy MILK"), task(2, "Walk dog"), task(3, "milkshake")];
        let visible = filter_tasks(&tasks, "Milk");
        let ids: Vec<TaskId> = visible.iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(filter_task_indices(&tasks, "DOG"), vec![1]);
    }

    #[test]
    fn empty_term_returns_everything_in_order() {
        let tasks = vec![task(2, "b"), task(1, "a")];
        assert_eq!(filter_tasks(&tasks, ""), tasks);
        assert_eq!(filter_task_indices(&tasks, ""), vec![0, 1]);
    }

    #[test]
    fn whitespace_term_is_matched_literally() {
        let tasks = vec![task(1, "Buy milk"), task(2, "walk")];
        assert_eq!(filter_task_indices(&tasks, " "), vec![0]);
    }

    #[test]
    fn selection_persists_by_id_or_falls_back() {
        let tasks = vec![task(1, "a"), task(2, "b"), task(3, "c")];
        assert_eq!(select_by_id(&tasks, &[0, 2], Some(3)), Some(2));
        assert_eq!(select_by_id(&tasks, &[0, 2], Some(2)), Some(0));
        assert_eq!(select_by_id(&tasks, &[], Some(1)), None);
    }
}
