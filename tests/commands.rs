#[cfg(test)]
mod tests {
    use rusqlite::{Connection, OpenFlags};
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};
    use todopad::commands::task::{add_task, delete_task, edit_task, set_task_done};
    use todopad::db::db::Db;
    use todopad::db::tasks::Tasks;
    use todopad::libs::controller::TaskListController;
    use todopad::libs::messages::Message;
    use todopad::libs::store::TaskRepository;
    use todopad::libs::task::Task;

    struct CommandTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
        store: Arc<TaskRepository>,
    }

    impl AsyncTestContext for CommandTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("todopad.db");
            let store = Arc::new(TaskRepository::new(Tasks::from_db(Db::open(&db_path).unwrap())).unwrap());

            CommandTestContext {
                _temp_dir: temp_dir,
                db_path,
                store,
            }
        }
    }

    impl CommandTestContext {
        fn controller(&self) -> TaskListController {
            TaskListController::new(self.store.clone())
        }

        /// Controller over the same file opened read-only, so every write fails.
        fn read_only_controller(&self) -> TaskListController {
            let conn = Connection::open_with_flags(&self.db_path, OpenFlags::SQLITE_OPEN_READ_ONLY).unwrap();
            TaskListController::new(Arc::new(TaskRepository::new(Tasks { conn }).unwrap()))
        }

        /// Tasks as stored on disk, bypassing the controller.
        fn stored(&self) -> Vec<Task> {
            let conn = Db::open_without_migrations(&self.db_path).unwrap();
            Tasks { conn }.fetch_ordered().unwrap()
        }
    }

    fn is_message(err: &anyhow::Error, message: Message) -> bool {
        err.to_string().contains(&message.to_string())
    }

    #[test_context(CommandTestContext)]
    #[tokio::test]
    async fn test_add_returns_the_stored_task(ctx: &mut CommandTestContext) {
        let controller = ctx.controller();

        let task = add_task(&controller, "  Buy milk ").await.unwrap().unwrap();

        assert_eq!(task.text, "Buy milk");
        let stored = ctx.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, Some(task.id));
    }

    #[test_context(CommandTestContext)]
    #[tokio::test]
    async fn test_add_blank_text_stores_nothing(ctx: &mut CommandTestContext) {
        let controller = ctx.controller();

        assert!(add_task(&controller, "   ").await.unwrap().is_none());
        assert!(ctx.stored().is_empty());
    }

    #[test_context(CommandTestContext)]
    #[tokio::test]
    async fn test_add_reports_failed_write(ctx: &mut CommandTestContext) {
        let controller = ctx.read_only_controller();

        let err = add_task(&controller, "lost").await.unwrap_err();

        assert!(is_message(&err, Message::TaskNotSaved));
        assert!(ctx.stored().is_empty());
    }

    #[test_context(CommandTestContext)]
    #[tokio::test]
    async fn test_done_and_reopen(ctx: &mut CommandTestContext) {
        let controller = ctx.controller();
        let task = add_task(&controller, "water plants").await.unwrap().unwrap();

        set_task_done(&controller, task.id, true).await.unwrap();
        assert!(ctx.stored()[0].is_done);

        set_task_done(&controller, task.id, false).await.unwrap();
        assert!(!ctx.stored()[0].is_done);
    }

    #[test_context(CommandTestContext)]
    #[tokio::test]
    async fn test_done_reports_missing_and_unsaved(ctx: &mut CommandTestContext) {
        let controller = ctx.controller();
        let task = add_task(&controller, "water plants").await.unwrap().unwrap();

        let err = set_task_done(&controller, task.id + 100, true).await.unwrap_err();
        assert!(is_message(&err, Message::TaskNotFoundWithId(task.id + 100)));

        let read_only = ctx.read_only_controller();
        let err = set_task_done(&read_only, task.id, true).await.unwrap_err();
        assert!(is_message(&err, Message::TaskNotSaved));
        assert!(!ctx.stored()[0].is_done);
    }

    #[test_context(CommandTestContext)]
    #[tokio::test]
    async fn test_edit_updates_text(ctx: &mut CommandTestContext) {
        let controller = ctx.controller();
        let task = add_task(&controller, "helo").await.unwrap().unwrap();

        let edited = edit_task(&controller, task.id, " hello ").await.unwrap().unwrap();

        assert_eq!(edited.text, "hello");
        assert_eq!(ctx.stored()[0].text, "hello");
    }

    #[test_context(CommandTestContext)]
    #[tokio::test]
    async fn test_edit_with_blank_text_deletes(ctx: &mut CommandTestContext) {
        let controller = ctx.controller();
        let task = add_task(&controller, "obsolete").await.unwrap().unwrap();

        assert!(edit_task(&controller, task.id, "  ").await.unwrap().is_none());
        assert!(ctx.stored().is_empty());
    }

    #[test_context(CommandTestContext)]
    #[tokio::test]
    async fn test_edit_reports_missing_and_unsaved(ctx: &mut CommandTestContext) {
        let controller = ctx.controller();
        let task = add_task(&controller, "draft").await.unwrap().unwrap();

        let err = edit_task(&controller, 999, "text").await.unwrap_err();
        assert!(is_message(&err, Message::TaskNotFoundWithId(999)));

        let read_only = ctx.read_only_controller();
        let err = edit_task(&read_only, task.id, "final").await.unwrap_err();
        assert!(is_message(&err, Message::TaskNotSaved));

        let err = edit_task(&read_only, task.id, "").await.unwrap_err();
        assert!(is_message(&err, Message::TaskNotSaved));
        assert_eq!(ctx.stored()[0].text, "draft");
    }

    #[test_context(CommandTestContext)]
    #[tokio::test]
    async fn test_delete(ctx: &mut CommandTestContext) {
        let controller = ctx.controller();
        let task = add_task(&controller, "temporary").await.unwrap().unwrap();

        delete_task(ctx.store.as_ref(), task.id).await.unwrap();
        assert!(ctx.stored().is_empty());

        let err = delete_task(ctx.store.as_ref(), task.id).await.unwrap_err();
        assert!(is_message(&err, Message::TaskNotFoundWithId(task.id)));
    }
}
