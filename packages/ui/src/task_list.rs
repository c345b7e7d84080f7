//! # Task list controller — optimistic synchronisation with the API
//!
//! [`TaskList`] owns the in-memory list of the signed-in user's tasks and keeps
//! it consistent with the server, which is the source of truth.
//!
//! ## Mutation pattern
//!
//! | Operation | Local effect | On success | On failure |
//! |-----------|--------------|------------|------------|
//! | [`load`](TaskList::load) | none until settled | replace list | keep list, notice only if list is empty |
//! | [`create`](TaskList::create) | none until settled | append record, reload unless the response was complete | notice |
//! | [`toggle_completion`](TaskList::toggle_completion) | flip `completed` immediately | keep | restore the captured prior value, notice |
//! | [`save_edit`](TaskList::save_edit) | none until settled | clear pending edit, reload | keep pending edit, notice |
//! | [`delete`](TaskList::delete) | none until settled | remove task and any pending edit of it | notice |
//!
//! Titles are validated locally; an empty title never reaches the network.
//!
//! ## Concurrency
//!
//! Everything runs on one thread; several requests may be in flight at once.
//! Toggle, save and delete claim their task id for the duration of the call,
//! and a second mutation of the same id is dropped with [`SyncError::Busy`].
//! Loads and creates may overlap freely; the last load to settle wins.
//!
//! State lives in a `RefCell` that is never borrowed across an `.await`.
//! After every transition a snapshot is handed to the optional change
//! listener so a view can render optimistic changes immediately.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use api::{ApiClient, ApiError, Transport};
use store::{KeyValueStore, Task};
use thiserror::Error;
use tracing::error;

use crate::notice::{Confirm, Notice, Notifier};

const LOAD_FAILED: &str = "Failed to load tasks. Please check if you are logged in.";
const CREATE_FAILED: &str = "Failed to create task. Please try again.";
const TOGGLE_FAILED: &str = "Failed to update task. Please try again.";
const SAVE_FAILED: &str = "Failed to save changes. Please try again.";
const DELETE_FAILED: &str = "Failed to delete task. Please try again.";

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("title is required")]
    EmptyTitle,
    #[error("task {0} is not in the list")]
    NotFound(i64),
    #[error("task {0} already has a change in flight")]
    Busy(i64),
    #[error("task {0} is not being edited")]
    NoPendingEdit(i64),
    #[error(transparent)]
    Remote(#[from] ApiError),
}

/// An edit the user has started but the server has not confirmed.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingEdit {
    pub task_id: i64,
    pub draft_title: String,
    pub draft_description: String,
}

/// Everything a view needs to render the list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskListState {
    pub tasks: Vec<Task>,
    pub pending_edit: Option<PendingEdit>,
    pub loading: bool,
    pub creating: bool,
    pub saving_edit: bool,
}

impl TaskListState {
    pub fn task(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn is_editing(&self, id: i64) -> bool {
        self.pending_edit.as_ref().is_some_and(|e| e.task_id == id)
    }

    fn upsert(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
    }

    fn set_completed(&mut self, id: i64, completed: bool) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.completed = completed;
        }
    }
}

/// Releases a task id claimed by [`TaskList::claim`].
struct InFlight<'a> {
    ids: &'a RefCell<HashSet<i64>>,
    id: i64,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.ids.borrow_mut().remove(&self.id);
    }
}

type Listener = Box<dyn Fn(&TaskListState)>;

/// Controller for the signed-in user's task list.
pub struct TaskList<T: Transport, S: KeyValueStore, N: Notifier> {
    client: ApiClient<T, S>,
    notifier: N,
    state: RefCell<TaskListState>,
    in_flight: RefCell<HashSet<i64>>,
    loads: Cell<usize>,
    creates: Cell<usize>,
    listener: Option<Listener>,
}

impl<T: Transport, S: KeyValueStore, N: Notifier> TaskList<T, S, N> {
    pub fn new(client: ApiClient<T, S>, notifier: N) -> Self {
        Self {
            client,
            notifier,
            state: RefCell::new(TaskListState::default()),
            in_flight: RefCell::new(HashSet::new()),
            loads: Cell::new(0),
            creates: Cell::new(0),
            listener: None,
        }
    }

    /// Builder method to observe every state transition.
    pub fn on_change(mut self, listener: impl Fn(&TaskListState) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> TaskListState {
        self.state.borrow().clone()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state.borrow().tasks.clone()
    }

    fn update<R>(&self, f: impl FnOnce(&mut TaskListState) -> R) -> R {
        let result = f(&mut self.state.borrow_mut());
        if let Some(listener) = &self.listener {
            let snapshot = self.state();
            listener(&snapshot);
        }
        result
    }

    fn claim(&self, id: i64) -> Result<InFlight<'_>, SyncError> {
        if !self.in_flight.borrow_mut().insert(id) {
            return Err(SyncError::Busy(id));
        }
        Ok(InFlight {
            ids: &self.in_flight,
            id,
        })
    }

    /// Fetch the full list and replace local state with it.
    pub async fn load(&self) -> Result<(), SyncError> {
        self.loads.set(self.loads.get() + 1);
        self.update(|s| s.loading = true);

        let result = self.client.list_tasks().await;

        self.loads.set(self.loads.get() - 1);
        let loading = self.loads.get() > 0;
        match result {
            Ok(tasks) => {
                self.update(|s| {
                    s.tasks = tasks;
                    s.loading = loading;
                });
                Ok(())
            }
            Err(e) => {
                error!("Failed to load tasks: {e}");
                let empty = self.update(|s| {
                    s.loading = loading;
                    s.tasks.is_empty()
                });
                if empty {
                    self.notifier.notify(Notice::error(LOAD_FAILED));
                }
                Err(e.into())
            }
        }
    }

    /// Create a task and append it to the list.
    ///
    /// When the server only acknowledges with an id, the appended record is
    /// provisional and a reload follows. A complete record in the response is
    /// taken as-is.
    pub async fn create(&self, title: &str, description: &str) -> Result<Task, SyncError> {
        let title = title.trim();
        let description = description.trim();
        if title.is_empty() {
            return Err(SyncError::EmptyTitle);
        }

        self.creates.set(self.creates.get() + 1);
        self.update(|s| s.creating = true);

        let result = self.client.create_task(title, description).await;

        self.creates.set(self.creates.get() - 1);
        let creating = self.creates.get() > 0;
        let created = match result {
            Ok(created) => created,
            Err(e) => {
                error!("Failed to create task: {e}");
                self.update(|s| s.creating = creating);
                self.notifier.notify(Notice::error(CREATE_FAILED));
                return Err(e.into());
            }
        };

        let id = created.id;
        match created.into_task() {
            Some(task) => {
                self.update(|s| {
                    s.creating = creating;
                    s.upsert(task.clone());
                });
                Ok(task)
            }
            None => {
                let task = Task::new(id, title, description);
                self.update(|s| {
                    s.creating = creating;
                    s.upsert(task.clone());
                });
                // A failed reload keeps the provisional record.
                let _ = self.load().await;
                Ok(task)
            }
        }
    }

    /// Flip `completed` locally, then persist it. Returns the new value.
    pub async fn toggle_completion(&self, task_id: i64) -> Result<bool, SyncError> {
        let previous = self
            .state
            .borrow()
            .task(task_id)
            .map(|t| t.completed)
            .ok_or(SyncError::NotFound(task_id))?;
        let _claim = self.claim(task_id)?;

        let completed = !previous;
        self.update(|s| s.set_completed(task_id, completed));

        match self.client.update_completion(task_id, completed).await {
            Ok(()) => Ok(completed),
            Err(e) => {
                error!("Failed to update completion state of task {task_id}: {e}");
                self.update(|s| s.set_completed(task_id, previous));
                self.notifier.notify(Notice::error(TOGGLE_FAILED));
                Err(e.into())
            }
        }
    }

    /// Begin editing `task` with its current title and description as draft.
    pub fn start_edit(&self, task: &Task) {
        self.update(|s| {
            s.pending_edit = Some(PendingEdit {
                task_id: task.id,
                draft_title: task.title.clone(),
                draft_description: task.description.clone(),
            });
        });
    }

    pub fn set_draft_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.update(|s| {
            if let Some(edit) = s.pending_edit.as_mut() {
                edit.draft_title = title;
            }
        });
    }

    pub fn set_draft_description(&self, description: impl Into<String>) {
        let description = description.into();
        self.update(|s| {
            if let Some(edit) = s.pending_edit.as_mut() {
                edit.draft_description = description;
            }
        });
    }

    pub fn cancel_edit(&self) {
        self.update(|s| {
            s.pending_edit = None;
            s.saving_edit = false;
        });
    }

    /// Send the pending edit of `task_id`, then reload.
    pub async fn save_edit(&self, task_id: i64) -> Result<(), SyncError> {
        let draft = self
            .state
            .borrow()
            .pending_edit
            .clone()
            .filter(|e| e.task_id == task_id)
            .ok_or(SyncError::NoPendingEdit(task_id))?;

        let title = draft.draft_title.trim();
        if title.is_empty() {
            return Err(SyncError::EmptyTitle);
        }
        let description = draft.draft_description.trim();

        let claim = self.claim(task_id)?;
        self.update(|s| s.saving_edit = true);

        let result = self.client.update_details(task_id, title, description).await;
        drop(claim);

        match result {
            Ok(()) => {
                self.update(|s| {
                    s.saving_edit = false;
                    if s.is_editing(task_id) {
                        s.pending_edit = None;
                    }
                });
                let _ = self.load().await;
                Ok(())
            }
            Err(e) => {
                error!("Failed to update task {task_id}: {e}");
                self.update(|s| s.saving_edit = false);
                self.notifier.notify(Notice::error(SAVE_FAILED));
                Err(e.into())
            }
        }
    }

    /// Delete a task after the user confirms. Returns `Ok(false)` when the
    /// user declines.
    pub async fn delete(&self, task_id: i64, confirm: &impl Confirm) -> Result<bool, SyncError> {
        let title = self
            .state
            .borrow()
            .task(task_id)
            .map(|t| t.title.clone())
            .ok_or(SyncError::NotFound(task_id))?;
        let _claim = self.claim(task_id)?;

        if !confirm.confirm(&format!(
            "Are you sure you want to delete the task \"{title}\"?"
        )) {
            return Ok(false);
        }

        match self.client.delete_task(task_id).await {
            Ok(()) => {
                self.update(|s| {
                    s.tasks.retain(|t| t.id != task_id);
                    if s.is_editing(task_id) {
                        s.pending_edit = None;
                        s.saving_edit = false;
                    }
                });
                Ok(true)
            }
            Err(e) => {
                error!("Failed to delete task {task_id}: {e}");
                self.notifier.notify(Notice::error(DELETE_FAILED));
                Err(e.into())
            }
        }
    }

    /// Drop all local state, e.g. on logout.
    pub fn clear(&self) {
        self.update(|s| *s = TaskListState::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{Method, MockTransport};
    use serde_json::json;
    use std::rc::Rc;
    use store::{ApiConfig, MemoryStore, SessionStore, UserInfo};

    #[derive(Default)]
    struct Recorder(RefCell<Vec<Notice>>);

    impl Notifier for Recorder {
        fn notify(&self, notice: Notice) {
            self.0.borrow_mut().push(notice);
        }
    }

    impl Recorder {
        fn messages(&self) -> Vec<String> {
            self.0.borrow().iter().map(|n| n.message.clone()).collect()
        }
    }

    type List = TaskList<MockTransport, MemoryStore, Rc<Recorder>>;

    fn setup() -> (List, MockTransport, Rc<Recorder>) {
        let transport = MockTransport::new();
        let session = SessionStore::new(MemoryStore::new());
        session.set_session(
            "T1",
            &UserInfo {
                id: 7,
                email: "a@b.com".to_string(),
                username: "alice".to_string(),
            },
        );
        let client = ApiClient::new(transport.clone(), session, &ApiConfig::default());
        let notices = Rc::new(Recorder::default());
        (TaskList::new(client, notices.clone()), transport, notices)
    }

    /// A list already holding the given tasks.
    async fn loaded(tasks: serde_json::Value) -> (List, MockTransport, Rc<Recorder>) {
        let (list, transport, notices) = setup();
        transport.reply_json(Method::GET, "/tasks/", 200, tasks);
        list.load().await.unwrap();
        (list, transport, notices)
    }

    fn milk() -> serde_json::Value {
        json!([{"id": 42, "title": "Buy milk", "description": "2%", "completed": false}])
    }

    fn offline() -> ApiError {
        ApiError::Transport("offline".to_string())
    }

    #[tokio::test]
    async fn test_load_replaces_list() {
        let (list, transport, _) = loaded(milk()).await;
        assert_eq!(list.tasks(), vec![Task::new(42, "Buy milk", "2%")]);
        assert!(!list.state().loading);

        transport.reply_json(Method::GET, "/tasks/", 200, json!([]));
        list.load().await.unwrap();
        assert!(list.tasks().is_empty());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_list_quietly() {
        let (list, transport, notices) = loaded(milk()).await;
        transport.fail(Method::GET, "/tasks/", offline());

        assert!(list.load().await.is_err());

        assert_eq!(list.tasks(), vec![Task::new(42, "Buy milk", "2%")]);
        assert!(notices.messages().is_empty());
        assert!(!list.state().loading);
    }

    #[tokio::test]
    async fn test_failed_load_on_empty_list_notifies() {
        let (list, transport, notices) = setup();
        transport.reply_json(Method::GET, "/tasks/", 401, json!({"msg": "Missing Authorization Header"}));

        assert!(matches!(list.load().await, Err(SyncError::Remote(_))));

        assert!(list.tasks().is_empty());
        assert_eq!(notices.messages(), vec![LOAD_FAILED.to_string()]);
    }

    #[tokio::test]
    async fn test_create_appends_provisional_record_before_reload() {
        let (list, transport, _) = setup();
        transport.reply_json(Method::POST, "/tasks/", 201, json!({"id": 42, "message": "created"}));
        let reload = transport.defer(Method::GET, "/tasks/");

        let observe = async {
            while transport.requests_to(Method::GET, "/tasks/").is_empty() {
                tokio::task::yield_now().await;
            }
            assert_eq!(list.tasks(), vec![Task::new(42, "Buy milk", "2%")]);
            reload.respond_json(
                200,
                json!([
                    {"id": 41, "title": "Older", "description": "", "completed": true},
                    {"id": 42, "title": "Buy milk", "description": "2%", "completed": false}
                ]),
            );
        };
        let (created, ()) = tokio::join!(list.create("  Buy milk ", " 2% "), observe);

        assert_eq!(created.unwrap(), Task::new(42, "Buy milk", "2%"));
        assert_eq!(list.tasks().len(), 2);
        assert_eq!(
            transport.requests_to(Method::POST, "/tasks/")[0].body,
            Some(json!({"title": "Buy milk", "description": "2%"}))
        );
    }

    #[tokio::test]
    async fn test_create_with_full_record_skips_reload() {
        let (list, transport, _) = setup();
        transport.reply_json(
            Method::POST,
            "/tasks/",
            201,
            json!({"id": 5, "title": "Call mom", "description": "", "completed": false}),
        );

        list.create("Call mom", "").await.unwrap();

        assert_eq!(list.tasks(), vec![Task::new(5, "Call mom", "")]);
        assert!(transport.requests_to(Method::GET, "/tasks/").is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title_locally() {
        let (list, transport, notices) = setup();

        assert!(matches!(list.create("   ", "x").await, Err(SyncError::EmptyTitle)));

        assert_eq!(transport.request_count(), 0);
        assert!(notices.messages().is_empty());
    }

    #[tokio::test]
    async fn test_failed_create_leaves_list_unchanged() {
        let (list, transport, notices) = loaded(milk()).await;
        transport.fail(Method::POST, "/tasks/", offline());

        assert!(list.create("Eggs", "").await.is_err());

        assert_eq!(list.tasks().len(), 1);
        assert!(!list.state().creating);
        assert_eq!(notices.messages(), vec![CREATE_FAILED.to_string()]);
    }

    #[tokio::test]
    async fn test_toggle_success() {
        let (list, transport, _) = loaded(milk()).await;
        transport.reply_json(Method::PUT, "/tasks/42", 200, json!({"message": "Task updated"}));

        assert!(list.toggle_completion(42).await.unwrap());

        assert!(list.state().task(42).unwrap().completed);
        assert_eq!(
            transport.requests_to(Method::PUT, "/tasks/42")[0].body,
            Some(json!({"completed": true}))
        );
    }

    #[tokio::test]
    async fn test_failed_toggle_restores_prior_value() {
        let (list, transport, notices) = loaded(milk()).await;
        let reply = transport.defer(Method::PUT, "/tasks/42");

        let observe = async {
            while transport.requests_to(Method::PUT, "/tasks/42").is_empty() {
                tokio::task::yield_now().await;
            }
            // Optimistic flip is visible while the request is in flight
            assert!(list.state().task(42).unwrap().completed);
            reply.fail(offline());
        };
        let (result, ()) = tokio::join!(list.toggle_completion(42), observe);

        assert!(result.is_err());
        assert_eq!(list.tasks(), vec![Task::new(42, "Buy milk", "2%")]);
        assert_eq!(notices.messages(), vec![TOGGLE_FAILED.to_string()]);
    }

    #[tokio::test]
    async fn test_overlapping_toggles_send_one_request() {
        let (list, transport, _) = loaded(milk()).await;
        let reply = transport.defer(Method::PUT, "/tasks/42");

        let second = async {
            while transport.requests_to(Method::PUT, "/tasks/42").is_empty() {
                tokio::task::yield_now().await;
            }
            assert!(matches!(
                list.toggle_completion(42).await,
                Err(SyncError::Busy(42))
            ));
            reply.fail(offline());
        };
        let (first, ()) = tokio::join!(list.toggle_completion(42), second);

        assert!(first.is_err());
        assert!(!list.state().task(42).unwrap().completed);
        assert_eq!(transport.requests_to(Method::PUT, "/tasks/42").len(), 1);

        // The id is released once the first request settles
        transport.reply_json(Method::PUT, "/tasks/42", 200, json!({}));
        assert!(list.toggle_completion(42).await.unwrap());
    }

    #[tokio::test]
    async fn test_toggles_of_different_tasks_overlap() {
        let (list, transport, _) = loaded(json!([
            {"id": 1, "title": "A", "description": "", "completed": false},
            {"id": 2, "title": "B", "description": "", "completed": true}
        ]))
        .await;
        let first = transport.defer(Method::PUT, "/tasks/1");
        transport.fail(Method::PUT, "/tasks/2", offline());

        let settle = async {
            while transport.requests_to(Method::PUT, "/tasks/1").is_empty() {
                tokio::task::yield_now().await;
            }
            let second = list.toggle_completion(2).await;
            assert!(second.is_err());
            first.respond_json(200, json!({"message": "Task updated"}));
        };
        let (result, ()) = tokio::join!(list.toggle_completion(1), settle);

        assert!(result.unwrap());
        let state = list.state();
        assert!(state.task(1).unwrap().completed);
        assert!(state.task(2).unwrap().completed);
    }

    #[tokio::test]
    async fn test_toggle_unknown_task() {
        let (list, transport, _) = setup();
        assert!(matches!(
            list.toggle_completion(9).await,
            Err(SyncError::NotFound(9))
        ));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_edit_drafts_are_local() {
        let (list, transport, _) = loaded(milk()).await;
        let task = list.tasks()[0].clone();

        list.start_edit(&task);
        list.set_draft_title("Buy oat milk");
        assert!(list.state().is_editing(42));
        assert_eq!(
            list.state().pending_edit.unwrap().draft_title,
            "Buy oat milk"
        );

        list.cancel_edit();
        assert!(list.state().pending_edit.is_none());
        assert_eq!(list.tasks()[0].title, "Buy milk");
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_save_edit_rejects_blank_title() {
        let (list, transport, _) = loaded(milk()).await;
        list.start_edit(&list.tasks()[0].clone());
        list.set_draft_title("  ");

        assert!(matches!(list.save_edit(42).await, Err(SyncError::EmptyTitle)));

        assert_eq!(transport.requests_to(Method::PUT, "/tasks/42").len(), 0);
        assert_eq!(list.tasks()[0].title, "Buy milk");
        assert!(list.state().is_editing(42));
    }

    #[tokio::test]
    async fn test_save_edit_success_reloads() {
        let (list, transport, _) = loaded(milk()).await;
        list.start_edit(&list.tasks()[0].clone());
        list.set_draft_title(" Buy oat milk ");
        list.set_draft_description("1L ");
        transport.reply_json(Method::PUT, "/tasks/42", 200, json!({"message": "Task updated"}));
        transport.reply_json(
            Method::GET,
            "/tasks/",
            200,
            json!([{"id": 42, "title": "Buy oat milk", "description": "1L", "completed": false}]),
        );

        list.save_edit(42).await.unwrap();

        let state = list.state();
        assert!(state.pending_edit.is_none());
        assert!(!state.saving_edit);
        assert_eq!(state.tasks, vec![Task::new(42, "Buy oat milk", "1L")]);
        assert_eq!(
            transport.requests_to(Method::PUT, "/tasks/42")[0].body,
            Some(json!({"title": "Buy oat milk", "description": "1L"}))
        );
    }

    #[tokio::test]
    async fn test_failed_save_keeps_pending_edit() {
        let (list, transport, notices) = loaded(milk()).await;
        list.start_edit(&list.tasks()[0].clone());
        list.set_draft_title("Buy oat milk");
        transport.fail(Method::PUT, "/tasks/42", offline());

        assert!(list.save_edit(42).await.is_err());

        let state = list.state();
        assert_eq!(state.pending_edit.unwrap().draft_title, "Buy oat milk");
        assert!(!state.saving_edit);
        assert_eq!(state.tasks[0].title, "Buy milk");
        assert_eq!(notices.messages(), vec![SAVE_FAILED.to_string()]);
    }

    #[tokio::test]
    async fn test_save_without_pending_edit() {
        let (list, _, _) = loaded(milk()).await;
        assert!(matches!(
            list.save_edit(42).await,
            Err(SyncError::NoPendingEdit(42))
        ));
    }

    #[tokio::test]
    async fn test_delete_removes_task_and_pending_edit() {
        let (list, transport, _) = loaded(milk()).await;
        list.start_edit(&list.tasks()[0].clone());
        transport.reply_json(Method::DELETE, "/tasks/42", 200, json!({"message": "Task deleted"}));

        let asked = RefCell::new(String::new());
        let confirm = |message: &str| {
            *asked.borrow_mut() = message.to_string();
            true
        };
        assert!(list.delete(42, &confirm).await.unwrap());

        assert_eq!(
            asked.borrow().as_str(),
            "Are you sure you want to delete the task \"Buy milk\"?"
        );
        let state = list.state();
        assert!(state.task(42).is_none());
        assert!(state.pending_edit.is_none());
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let (list, transport, _) = loaded(milk()).await;

        assert!(!list.delete(42, &|_: &str| false).await.unwrap());

        assert_eq!(list.tasks().len(), 1);
        assert!(transport.requests_to(Method::DELETE, "/tasks/42").is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_task() {
        let (list, transport, notices) = loaded(milk()).await;
        transport.reply_json(Method::DELETE, "/tasks/42", 404, json!({"message": "Task not found"}));

        assert!(list.delete(42, &|_: &str| true).await.is_err());

        assert_eq!(list.tasks().len(), 1);
        assert_eq!(notices.messages(), vec![DELETE_FAILED.to_string()]);
    }

    #[tokio::test]
    async fn test_listener_sees_optimistic_state() {
        let seen = Rc::new(RefCell::new(Vec::<bool>::new()));
        let (list, transport, _) = setup();
        let recorder = seen.clone();
        let list = list.on_change(move |s| {
            if let Some(task) = s.task(42) {
                recorder.borrow_mut().push(task.completed);
            }
        });
        transport.reply_json(Method::GET, "/tasks/", 200, milk());
        list.load().await.unwrap();
        transport.fail(Method::PUT, "/tasks/42", offline());

        let _ = list.toggle_completion(42).await;

        // loaded, flipped, reverted
        assert_eq!(*seen.borrow(), vec![false, true, false]);
    }

    #[tokio::test]
    async fn test_clear_drops_state() {
        let (list, _, _) = loaded(milk()).await;
        list.start_edit(&list.tasks()[0].clone());
        list.clear();
        assert_eq!(list.state(), TaskListState::default());
    }

    fn two_tasks() -> serde_json::Value {
        json!([
            {"id": 1, "title": "A", "description": "", "completed": false},
            {"id": 2, "title": "B", "description": "", "completed": false}
        ])
    }

    #[tokio::test]
    async fn test_save_and_delete_wait_for_in_flight_toggle() {
        let (list, transport, _) = loaded(milk()).await;
        list.start_edit(&list.tasks()[0].clone());
        let reply = transport.defer(Method::PUT, "/tasks/42");

        let contend = async {
            while transport.requests_to(Method::PUT, "/tasks/42").is_empty() {
                tokio::task::yield_now().await;
            }
            assert!(matches!(list.save_edit(42).await, Err(SyncError::Busy(42))));
            assert!(matches!(
                list.delete(42, &|_: &str| true).await,
                Err(SyncError::Busy(42))
            ));
            reply.respond_json(200, json!({"message": "Task updated"}));
        };
        let (toggled, ()) = tokio::join!(list.toggle_completion(42), contend);

        assert!(toggled.unwrap());
        assert_eq!(transport.requests_to(Method::PUT, "/tasks/42").len(), 1);
        assert!(transport.requests_to(Method::DELETE, "/tasks/42").is_empty());
        let state = list.state();
        assert!(state.task(42).is_some());
        assert!(state.is_editing(42));
    }

    #[tokio::test]
    async fn test_delete_keeps_edit_of_other_task() {
        let (list, transport, _) = loaded(two_tasks()).await;
        let second = list.state().task(2).cloned().unwrap();
        list.start_edit(&second);
        list.set_draft_title("B2");
        transport.reply_json(Method::DELETE, "/tasks/1", 200, json!({"message": "Task deleted"}));

        assert!(list.delete(1, &|_: &str| true).await.unwrap());

        let state = list.state();
        assert!(state.task(1).is_none());
        assert!(state.is_editing(2));
        assert_eq!(state.pending_edit.unwrap().draft_title, "B2");
    }

    #[tokio::test]
    async fn test_save_keeps_edit_started_while_in_flight() {
        let (list, transport, _) = loaded(two_tasks()).await;
        list.start_edit(&list.state().task(1).cloned().unwrap());
        list.set_draft_title("A2");
        let reply = transport.defer(Method::PUT, "/tasks/1");
        transport.reply_json(
            Method::GET,
            "/tasks/",
            200,
            json!([
                {"id": 1, "title": "A2", "description": "", "completed": false},
                {"id": 2, "title": "B", "description": "", "completed": false}
            ]),
        );

        let switch = async {
            while transport.requests_to(Method::PUT, "/tasks/1").is_empty() {
                tokio::task::yield_now().await;
            }
            list.start_edit(&list.state().task(2).cloned().unwrap());
            list.set_draft_title("B2");
            reply.respond_json(200, json!({"message": "Task updated"}));
        };
        let (saved, ()) = tokio::join!(list.save_edit(1), switch);

        saved.unwrap();
        let state = list.state();
        assert_eq!(state.task(1).unwrap().title, "A2");
        assert!(!state.saving_edit);
        let edit = state.pending_edit.unwrap();
        assert_eq!(edit.task_id, 2);
        assert_eq!(edit.draft_title, "B2");
    }

    #[tokio::test]
    async fn test_failed_toggle_does_not_restore_removed_task() {
        let (list, transport, notices) = loaded(milk()).await;
        let reply = transport.defer(Method::PUT, "/tasks/42");
        transport.reply_json(Method::GET, "/tasks/", 200, json!([]));

        let reload = async {
            while transport.requests_to(Method::PUT, "/tasks/42").is_empty() {
                tokio::task::yield_now().await;
            }
            list.load().await.unwrap();
            assert!(list.tasks().is_empty());
            reply.fail(offline());
        };
        let (toggled, ()) = tokio::join!(list.toggle_completion(42), reload);

        assert!(toggled.is_err());
        assert!(list.tasks().is_empty());
        assert_eq!(notices.messages(), vec![TOGGLE_FAILED.to_string()]);
    }
}
