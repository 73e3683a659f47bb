#[cfg(test)]
mod tests {
    use todopad::db::db::Db;
    use todopad::db::tasks::Tasks;
    use todopad::libs::task::Task;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TasksTestContext {
        _temp_dir: TempDir,
        tasks: Tasks,
    }

    impl TestContext for TasksTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("tasks.db")).unwrap();
            TasksTestContext {
                _temp_dir: temp_dir,
                tasks: Tasks::from_db(db),
            }
        }
    }

    fn stored(id: i64, text: &str, is_done: bool, timestamp: Option<i64>) -> Task {
        Task {
            id: Some(id),
            text: text.to_string(),
            is_done,
            completed_or_reopened_timestamp: timestamp,
        }
    }

    fn ids(tasks: &Tasks) -> Vec<i64> {
        tasks.fetch_ordered().unwrap().iter().filter_map(|t| t.id).collect()
    }

    #[test_context(TasksTestContext)]
    #[test]
    fn test_incomplete_first_then_recently_completed(ctx: &mut TasksTestContext) {
        ctx.tasks.insert(&stored(1, "one", false, Some(100))).unwrap();
        ctx.tasks.insert(&stored(2, "two", true, Some(50))).unwrap();
        ctx.tasks.insert(&stored(3, "three", false, Some(90))).unwrap();
        ctx.tasks.insert(&stored(4, "four", true, Some(200))).unwrap();

        assert_eq!(ids(&ctx.tasks), vec![3, 1, 4, 2]);
    }

    #[test_context(TasksTestContext)]
    #[test]
    fn test_equal_timestamps_ordered_by_id(ctx: &mut TasksTestContext) {
        ctx.tasks.insert(&stored(7, "b", false, Some(10))).unwrap();
        ctx.tasks.insert(&stored(5, "a", false, Some(10))).unwrap();
        ctx.tasks.insert(&stored(9, "d", true, Some(10))).unwrap();
        ctx.tasks.insert(&stored(8, "c", true, Some(10))).unwrap();

        assert_eq!(ids(&ctx.tasks), vec![5, 7, 8, 9]);
    }

    #[test_context(TasksTestContext)]
    #[test]
    fn test_missing_timestamp_sorts_first_among_incomplete(ctx: &mut TasksTestContext) {
        ctx.tasks.insert(&stored(1, "stamped", false, Some(1))).unwrap();
        ctx.tasks.insert(&stored(2, "legacy", false, None)).unwrap();

        assert_eq!(ids(&ctx.tasks), vec![2, 1]);
    }

    #[test_context(TasksTestContext)]
    #[test]
    fn test_insert_assigns_ids(ctx: &mut TasksTestContext) {
        let first = ctx.tasks.insert(&Task::new("first", 1)).unwrap().unwrap();
        let second = ctx.tasks.insert(&Task::new("second", 2)).unwrap().unwrap();

        assert!(second > first);
        let task = ctx.tasks.get_by_id(first).unwrap().unwrap();
        assert_eq!(task.text, "first");
        assert!(!task.is_done);
        assert_eq!(task.completed_or_reopened_timestamp, Some(1));
    }

    #[test_context(TasksTestContext)]
    #[test]
    fn test_insert_with_taken_id_is_ignored(ctx: &mut TasksTestContext) {
        assert_eq!(ctx.tasks.insert(&stored(3, "original", false, Some(1))).unwrap(), Some(3));
        assert_eq!(ctx.tasks.insert(&stored(3, "duplicate", true, Some(2))).unwrap(), None);

        let task = ctx.tasks.get_by_id(3).unwrap().unwrap();
        assert_eq!(task.text, "original");
        assert_eq!(ctx.tasks.count().unwrap(), 1);
    }

    #[test_context(TasksTestContext)]
    #[test]
    fn test_update_replaces_all_fields(ctx: &mut TasksTestContext) {
        let id = ctx.tasks.insert(&Task::new("draft", 1)).unwrap().unwrap();

        let changed = ctx.tasks.update(id, &stored(id, "final", true, Some(5))).unwrap();
        assert_eq!(changed, 1);

        assert_eq!(ctx.tasks.get_by_id(id).unwrap().unwrap(), stored(id, "final", true, Some(5)));
    }

    #[test_context(TasksTestContext)]
    #[test]
    fn test_update_and_delete_of_missing_task_change_nothing(ctx: &mut TasksTestContext) {
        ctx.tasks.insert(&stored(1, "keep", false, Some(1))).unwrap();

        assert_eq!(ctx.tasks.update(42, &stored(42, "ghost", false, Some(1))).unwrap(), 0);
        assert_eq!(ctx.tasks.delete_by_id(42).unwrap(), 0);
        assert_eq!(ctx.tasks.set_done_and_timestamp(42, true, 9).unwrap(), 0);
        assert!(ctx.tasks.get_by_id(42).unwrap().is_none());
        assert_eq!(ctx.tasks.count().unwrap(), 1);
    }

    #[test_context(TasksTestContext)]
    #[test]
    fn test_set_done_and_timestamp_keeps_text(ctx: &mut TasksTestContext) {
        let id = ctx.tasks.insert(&Task::new("water plants", 10)).unwrap().unwrap();

        ctx.tasks.set_done_and_timestamp(id, true, 20).unwrap();

        let task = ctx.tasks.get_by_id(id).unwrap().unwrap();
        assert_eq!(task.text, "water plants");
        assert!(task.is_done);
        assert_eq!(task.completed_or_reopened_timestamp, Some(20));
    }

    #[test_context(TasksTestContext)]
    #[test]
    fn test_delete(ctx: &mut TasksTestContext) {
        let id = ctx.tasks.insert(&Task::new("temporary", 1)).unwrap().unwrap();

        assert_eq!(ctx.tasks.delete_by_id(id).unwrap(), 1);
        assert!(ctx.tasks.fetch_ordered().unwrap().is_empty());
    }

    #[test]
    fn test_tasks_survive_reopening_the_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("persist.db");

        let mut tasks = Tasks::from_db(Db::open(&path).unwrap());
        let id = tasks.insert(&Task::new("persisted", 1)).unwrap().unwrap();
        drop(tasks);

        let tasks = Tasks::from_db(Db::open(&path).unwrap());
        assert_eq!(tasks.get_by_id(id).unwrap().unwrap().text, "persisted");
    }
}
