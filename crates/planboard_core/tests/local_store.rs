use planboard_core::db::open_db_in_memory;
use planboard_core::storage::{EVENTS_KEY, GOALS_KEY, HABITS_KEY, NOTES_KEY, TASKS_KEY};
use planboard_core::{
    Goal, Habit, KeyValueBackend, LocalStore, MemoryKeyValueBackend, Note, RuntimeEnvironment,
    SqliteKeyValueBackend, Task,
};

fn client_store() -> LocalStore<MemoryKeyValueBackend> {
    LocalStore::new(MemoryKeyValueBackend::new(), RuntimeEnvironment::Client)
}

fn raw<B: KeyValueBackend>(store: &LocalStore<B>, key: &str) -> Option<String> {
    store.backend().read(key).unwrap()
}

#[test]
fn initialize_seeds_goals_tasks_and_habits_only() {
    let mut store = client_store();
    store.initialize().unwrap();

    let goals = store.get_all::<Goal>(GOALS_KEY);
    assert_eq!(goals.len(), 2);
    assert_eq!(goals[0].title, "Complete Project");
    assert_eq!(store.get_all::<Task>(TASKS_KEY)[0].goal_id.as_deref(), Some("1"));
    assert_eq!(store.get_all::<Habit>(HABITS_KEY)[0].frequency, "daily");

    assert_eq!(raw(&store, NOTES_KEY), None);
    assert_eq!(raw(&store, EVENTS_KEY), None);
}

#[test]
fn initialize_twice_leaves_storage_unchanged() {
    let mut store = client_store();
    store.initialize().unwrap();
    let before: Vec<_> = [GOALS_KEY, TASKS_KEY, HABITS_KEY]
        .iter()
        .map(|key| raw(&store, key))
        .collect();

    store.initialize().unwrap();
    let after: Vec<_> = [GOALS_KEY, TASKS_KEY, HABITS_KEY]
        .iter()
        .map(|key| raw(&store, key))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn initialize_never_overwrites_existing_data_even_empty_lists() {
    let mut store = client_store();
    store.set_all::<Goal>(GOALS_KEY, &[]).unwrap();
    store.initialize().unwrap();

    assert!(store.get_all::<Goal>(GOALS_KEY).is_empty());
    assert_eq!(store.get_all::<Task>(TASKS_KEY).len(), 1);
}

#[test]
fn add_appends_one_record_with_fields_preserved() {
    let mut store = client_store();
    store.initialize().unwrap();
    let before = store.get_all::<Goal>(GOALS_KEY).len();

    let mut goal = Goal::new("g-new", "Run a marathon");
    goal.description = "Spring race".to_string();
    goal.progress = 12;
    goal.color = "bg-blue-500".to_string();
    store.add(GOALS_KEY, goal.clone()).unwrap();

    let after = store.get_all::<Goal>(GOALS_KEY);
    assert_eq!(after.len(), before + 1);
    assert_eq!(after.last(), Some(&goal));
}

#[test]
fn update_replaces_matching_record_in_place() {
    let mut store = client_store();
    store.initialize().unwrap();

    let mut habit = store.get_all::<Habit>(HABITS_KEY).remove(0);
    habit.streak = 4;
    assert!(store.update(HABITS_KEY, habit.clone()).unwrap());
    assert_eq!(store.get_all::<Habit>(HABITS_KEY), vec![habit]);
}

#[test]
fn update_with_unknown_id_leaves_bytes_unchanged() {
    let mut store = client_store();
    store.initialize().unwrap();
    let before = raw(&store, GOALS_KEY);

    let replaced = store
        .update(GOALS_KEY, Goal::new("does-not-exist", "ghost"))
        .unwrap();
    assert!(!replaced);
    assert_eq!(raw(&store, GOALS_KEY), before);
}

#[test]
fn remove_filters_out_id_and_ignores_unknown_ids() {
    let mut store = client_store();
    store.initialize().unwrap();

    store.remove::<Goal>(GOALS_KEY, "1").unwrap();
    let remaining = store.get_all::<Goal>(GOALS_KEY);
    assert!(remaining.iter().all(|goal| goal.id != "1"));
    assert_eq!(remaining.len(), 1);

    store.remove::<Goal>(GOALS_KEY, "missing").unwrap();
    assert_eq!(store.get_all::<Goal>(GOALS_KEY), remaining);
}

#[test]
fn get_all_degrades_to_empty_for_absent_or_corrupt_values() {
    let mut backend = MemoryKeyValueBackend::new();
    backend.write(NOTES_KEY, "{not json").unwrap();
    let store = LocalStore::new(backend, RuntimeEnvironment::Client);

    assert!(store.get_all::<Note>(NOTES_KEY).is_empty());
    assert!(store.get_all::<Goal>("never_written").is_empty());
}

#[test]
fn server_environment_short_circuits_every_operation() {
    let mut store = LocalStore::new(MemoryKeyValueBackend::new(), RuntimeEnvironment::Server);
    store.initialize().unwrap();
    store.add(GOALS_KEY, Goal::new("x", "ignored")).unwrap();
    assert!(!store.update(GOALS_KEY, Goal::new("x", "ignored")).unwrap());
    store.remove::<Goal>(GOALS_KEY, "x").unwrap();

    assert!(store.get_all::<Goal>(GOALS_KEY).is_empty());
    assert!(store.into_backend().is_empty());
}

#[test]
fn server_environment_hides_existing_client_data() {
    let mut backend = MemoryKeyValueBackend::new();
    backend.write(GOALS_KEY, r#"[{"id":"1","title":"kept"}]"#).unwrap();
    let store = LocalStore::new(backend, RuntimeEnvironment::Server);

    assert!(store.get_all::<Goal>(GOALS_KEY).is_empty());
}

#[test]
fn collection_handles_round_trip_through_typed_views() {
    let mut store = client_store();
    store.initialize().unwrap();

    let mut tasks = store.tasks();
    assert_eq!(tasks.key(), TASKS_KEY);
    let mut task = tasks.get_all().remove(0);
    task.completed = true;
    assert!(tasks.update(task.clone()).unwrap());
    tasks.remove("1").unwrap();
    assert!(tasks.get_all().is_empty());

    let mut events = store.events();
    assert!(events.get_all().is_empty());
    events
        .add(planboard_core::Event {
            id: "e1".to_string(),
            title: "Standup".to_string(),
            description: String::new(),
            date: planboard_core::parse_timestamp("2025-03-18T09:00:00Z").unwrap(),
        })
        .unwrap();
    assert_eq!(store.events().get_all().len(), 1);
}

#[test]
fn sqlite_backend_persists_between_store_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planboard.db");

    {
        let conn = planboard_core::db::open_db(&path).unwrap();
        let mut store = LocalStore::new(SqliteKeyValueBackend::new(&conn), RuntimeEnvironment::Client);
        store.initialize().unwrap();
        store.goals().add(Goal::new("g3", "Persisted")).unwrap();
    }

    let conn = planboard_core::db::open_db(&path).unwrap();
    let mut store = LocalStore::new(SqliteKeyValueBackend::new(&conn), RuntimeEnvironment::Client);
    store.initialize().unwrap();
    let goals = store.goals().get_all();
    assert_eq!(goals.len(), 3);
    assert_eq!(goals[2].title, "Persisted");
}

#[test]
fn sqlite_backend_overwrites_values_by_key() {
    let conn = open_db_in_memory().unwrap();
    let mut backend = SqliteKeyValueBackend::new(&conn);
    assert_eq!(backend.read("k").unwrap(), None);

    backend.write("k", "[1]").unwrap();
    backend.write("k", "[2]").unwrap();
    assert_eq!(backend.read("k").unwrap().as_deref(), Some("[2]"));
}
