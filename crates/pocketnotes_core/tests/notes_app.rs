use chrono::{DateTime, TimeZone, Utc};
use pocketnotes_core::{
    Clock, GroupColor, GroupStore, JsonGroupStore, KeyValueStorage, ListenerTarget,
    MemoryKeyValueStorage, NotesApp, Point, Rect, StoreError, StoreResult, GROUPS_KEY,
};
use std::cell::Cell;

const WIDE: u32 = 1280;
const NARROW: u32 = 600;

/// Clock that advances one second per reading.
struct StepClock {
    next: Cell<DateTime<Utc>>,
}

impl StepClock {
    fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            next: Cell::new(start),
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let now = self.next.get();
        self.next.set(now + chrono::Duration::seconds(1));
        now
    }
}

/// Clock frozen at one instant.
struct FrozenClock(DateTime<Utc>);

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Storage whose writes always fail.
struct ReadOnlyStorage;

impl KeyValueStorage for ReadOnlyStorage {
    fn get_item(&self, _key: &str) -> StoreResult<Option<String>> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::MissingRequiredTable("kv_store"))
    }
}

type MemoryApp<C> = NotesApp<JsonGroupStore<MemoryKeyValueStorage>, C>;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
}

fn new_app(width: u32) -> MemoryApp<StepClock> {
    let store = JsonGroupStore::new(MemoryKeyValueStorage::new());
    NotesApp::with_clock(store, StepClock::starting_at(start()), width)
}

fn persisted_len<C: Clock>(app: &MemoryApp<C>) -> usize {
    app.store().load().unwrap().len()
}

#[test]
fn create_group_appends_and_persists() {
    let mut app = new_app(WIDE);

    let id = app.create_group("Jane Doe", Some(GroupColor::Pink)).unwrap();
    assert_eq!(id, start().timestamp_millis());

    let group = app.group(id).unwrap();
    assert_eq!(group.name, "Jane Doe");
    assert_eq!(group.initials(), "JD");
    assert!(group.notes.is_empty());
    assert_eq!(persisted_len(&app), 1);

    let solo = app.create_group("Madonna", Some(GroupColor::Cyan)).unwrap();
    assert_eq!(app.group(solo).unwrap().initials(), "M");
}

#[test]
fn create_group_rejects_blank_name_or_missing_color() {
    let mut app = new_app(WIDE);

    assert_eq!(app.create_group("", Some(GroupColor::Blue)), None);
    assert_eq!(app.create_group(" ", Some(GroupColor::Blue)), None);
    assert_eq!(app.create_group("Work", None), None);
    assert!(app.groups().is_empty());
    assert!(app.store().storage().get_item(GROUPS_KEY).unwrap().is_none());
}

#[test]
fn colliding_timestamp_ids_are_bumped() {
    let store = JsonGroupStore::new(MemoryKeyValueStorage::new());
    let mut app = NotesApp::with_clock(store, FrozenClock(start()), WIDE);

    let first = app.create_group("one", Some(GroupColor::Blue)).unwrap();
    let second = app.create_group("two", Some(GroupColor::Blue)).unwrap();
    let third = app.create_group("three", Some(GroupColor::Blue)).unwrap();
    assert_eq!(second, first + 1);
    assert_eq!(third, first + 2);
}

#[test]
fn collision_next_to_max_id_finds_free_id() {
    let raw = format!(
        r##"[{{"id":{},"name":"Now","color":"#0047FF"}},{{"id":{},"name":"Max","color":"#0047FF"}},{{"id":1,"name":"One","color":"#0047FF"}}]"##,
        start().timestamp_millis(),
        i64::MAX
    );
    let store = JsonGroupStore::new(MemoryKeyValueStorage::with_item(GROUPS_KEY, raw));
    let mut app = NotesApp::with_clock(store, FrozenClock(start()), WIDE);
    assert_eq!(app.groups().len(), 3);

    let id = app.create_group("Fresh", Some(GroupColor::Pink)).unwrap();
    assert_eq!(id, 2);
    assert_eq!(persisted_len(&app), 4);
}

#[test]
fn dialog_submit_creates_group_and_resets_drafts() {
    let mut app = new_app(WIDE);
    app.open_create_dialog();
    assert!(app.listeners().is_attached(ListenerTarget::DocumentPointerDown));

    app.set_dialog_name("Reading List");
    assert!(!app.dialog().unwrap().can_create());
    app.pick_dialog_color(GroupColor::Lavender);
    assert!(app.dialog().unwrap().can_create());

    let id = app.submit_create_dialog().unwrap();
    assert_eq!(app.group(id).unwrap().color, GroupColor::Lavender);
    assert!(!app.is_dialog_open());
    assert!(!app.listeners().is_attached(ListenerTarget::DocumentPointerDown));

    app.open_create_dialog();
    let dialog = app.dialog().unwrap();
    assert_eq!(dialog.name(), "");
    assert_eq!(dialog.color(), None);
}

#[test]
fn invalid_dialog_submit_keeps_dialog_open() {
    let mut app = new_app(WIDE);
    app.open_create_dialog();
    app.set_dialog_name("   ");
    app.pick_dialog_color(GroupColor::Peach);

    assert_eq!(app.submit_create_dialog(), None);
    assert!(app.is_dialog_open());
    assert!(app.groups().is_empty());
}

#[test]
fn pointer_down_outside_dialog_dismisses_and_resets() {
    let mut app = new_app(WIDE);
    app.open_create_dialog();
    app.set_dialog_name("Draft");
    app.pick_dialog_color(GroupColor::Blue);

    // Bounds not reported yet: nothing to hit-test against.
    assert!(!app.pointer_down(Point::new(0, 0)));
    assert!(app.is_dialog_open());

    app.set_dialog_bounds(Rect::new(100, 100, 300, 200));
    assert!(!app.pointer_down(Point::new(150, 150)));
    assert!(app.is_dialog_open());

    assert!(app.pointer_down(Point::new(20, 20)));
    assert!(!app.is_dialog_open());
    assert_eq!(
        app.listeners()
            .active_count(ListenerTarget::DocumentPointerDown),
        0
    );
    assert!(app.groups().is_empty());

    app.open_create_dialog();
    assert_eq!(app.dialog().unwrap().name(), "");
}

#[test]
fn pointer_down_without_dialog_is_ignored() {
    let mut app = new_app(WIDE);
    assert!(!app.pointer_down(Point::new(5, 5)));
}

#[test]
fn opening_dialog_twice_keeps_one_listener() {
    let mut app = new_app(WIDE);
    app.open_create_dialog();
    app.set_dialog_name("kept");
    app.open_create_dialog();

    assert_eq!(
        app.listeners()
            .active_count(ListenerTarget::DocumentPointerDown),
        1
    );
    assert_eq!(app.dialog().unwrap().name(), "kept");
}

#[test]
fn add_note_without_selection_changes_nothing() {
    let mut app = new_app(WIDE);
    let id = app.create_group("Work", Some(GroupColor::Blue)).unwrap();

    assert!(!app.add_note(id, "hello"));
    app.set_note_draft("hello");
    assert!(!app.submit_note());
    assert!(app.group(id).unwrap().notes.is_empty());
    assert_eq!(app.note_draft(), "hello");
}

#[test]
fn add_note_requires_target_to_be_selected() {
    let mut app = new_app(WIDE);
    let work = app.create_group("Work", Some(GroupColor::Blue)).unwrap();
    let home = app.create_group("Home", Some(GroupColor::Pink)).unwrap();
    app.select_group(work);

    assert!(!app.add_note(home, "misrouted"));
    assert!(app.group(home).unwrap().notes.is_empty());
}

#[test]
fn add_note_appends_exactly_one_note_and_clears_draft() {
    let mut app = new_app(WIDE);
    let id = app.create_group("Work", Some(GroupColor::Blue)).unwrap();
    app.select_group(id);
    app.set_note_draft("hello");
    assert!(app.can_send());

    let before = app.group(id).unwrap().notes.len();
    assert!(app.submit_note());

    let notes = &app.group(id).unwrap().notes;
    assert_eq!(notes.len(), before + 1);
    assert_eq!(notes.last().unwrap().content, "hello");
    assert!(notes.last().unwrap().timestamp > start());
    assert_eq!(app.note_draft(), "");
    assert!(!app.can_send());

    let persisted = app.store().load().unwrap();
    assert_eq!(persisted[0].notes.len(), 1);
    assert_eq!(persisted[0].notes[0].content, "hello");
}

#[test]
fn blank_note_is_ignored() {
    let mut app = new_app(WIDE);
    let id = app.create_group("Work", Some(GroupColor::Blue)).unwrap();
    app.select_group(id);

    assert!(!app.add_note(id, "  \n\t "));
    assert!(app.group(id).unwrap().notes.is_empty());
}

#[test]
fn notes_keep_insertion_order() {
    let mut app = new_app(WIDE);
    let id = app.create_group("Log", Some(GroupColor::Cyan)).unwrap();
    app.select_group(id);
    for content in ["first", "second", "third"] {
        assert!(app.add_note(id, content));
    }

    let contents: Vec<&str> = app
        .group(id)
        .unwrap()
        .notes
        .iter()
        .map(|note| note.content.as_str())
        .collect();
    assert_eq!(contents, ["first", "second", "third"]);
}

#[test]
fn selecting_on_narrow_viewport_hides_sidebar_until_back() {
    let mut app = new_app(NARROW);
    let id = app.create_group("Work", Some(GroupColor::Blue)).unwrap();

    assert!(app.select_group(id));
    assert!(!app.layout().sidebar_visible());
    assert_eq!(app.selected_id(), Some(id));

    app.back();
    assert!(app.layout().sidebar_visible());
    assert_eq!(app.selected_id(), None);
}

#[test]
fn selecting_unknown_group_is_ignored() {
    let mut app = new_app(NARROW);
    assert!(!app.select_group(42));
    assert!(app.layout().sidebar_visible());
}

#[test]
fn resize_round_trip_restores_sidebar_and_keeps_selection() {
    let mut app = new_app(WIDE);
    let id = app.create_group("Work", Some(GroupColor::Blue)).unwrap();

    app.resize(NARROW);
    assert!(app.layout().is_narrow());
    assert!(app.layout().sidebar_visible());

    app.select_group(id);
    assert!(!app.layout().sidebar_visible());

    app.resize(WIDE);
    assert!(!app.layout().is_narrow());
    assert!(app.layout().sidebar_visible());
    assert_eq!(app.selected_id(), Some(id));
}

#[test]
fn corrupted_storage_starts_empty_and_is_overwritten() {
    let storage = MemoryKeyValueStorage::with_item(GROUPS_KEY, "[{broken");
    let mut app = NotesApp::with_clock(
        JsonGroupStore::new(storage),
        StepClock::starting_at(start()),
        WIDE,
    );
    assert!(app.groups().is_empty());

    app.create_group("Fresh", Some(GroupColor::Blue)).unwrap();
    assert_eq!(persisted_len(&app), 1);
}

#[test]
fn one_bad_group_does_not_wipe_the_stored_list() {
    let raw = r##"[{"id":1,"name":"Work","color":"#0047FF","notes":[]},
        {"id":2,"name":"Odd","color":"#000000","notes":[]}]"##;
    let mut app = NotesApp::with_clock(
        JsonGroupStore::new(MemoryKeyValueStorage::with_item(GROUPS_KEY, raw)),
        StepClock::starting_at(start()),
        WIDE,
    );
    assert_eq!(app.groups().len(), 1);
    assert_eq!(app.groups()[0].name, "Work");

    app.create_group("Fresh", Some(GroupColor::Blue)).unwrap();
    assert_eq!(persisted_len(&app), 2);
}

#[test]
fn state_reloads_from_existing_storage() {
    let mut app = new_app(WIDE);
    let id = app.create_group("Work", Some(GroupColor::Blue)).unwrap();
    app.select_group(id);
    app.add_note(id, "persist me");
    app.open_create_dialog();
    app.set_dialog_name("unsaved draft");

    let store = app.shutdown();
    let reopened = NotesApp::with_clock(store, StepClock::starting_at(start()), WIDE);
    assert_eq!(reopened.groups().len(), 1);
    assert_eq!(reopened.groups()[0].notes[0].content, "persist me");
    assert_eq!(reopened.selected_id(), None);
    assert!(!reopened.is_dialog_open());
}

#[test]
fn failed_writes_are_not_surfaced() {
    let mut app = NotesApp::with_clock(
        JsonGroupStore::new(ReadOnlyStorage),
        StepClock::starting_at(start()),
        WIDE,
    );

    let id = app.create_group("Volatile", Some(GroupColor::Blue)).unwrap();
    app.select_group(id);
    assert!(app.add_note(id, "kept in memory"));
    assert_eq!(app.group(id).unwrap().notes.len(), 1);
}

#[test]
fn resize_listener_lives_as_long_as_the_app() {
    let app = new_app(WIDE);
    let registry = app.listeners().clone();
    assert!(registry.is_attached(ListenerTarget::WindowResize));

    drop(app.shutdown());
    assert!(!registry.is_attached(ListenerTarget::WindowResize));
}
