// Facade lifecycle logging, observed through the test capture layer.
// Kept in its own test binary: the capture installs a global subscriber.

use hbnb_core::logging_facility::init_test_capture;
use hbnb_core::model::{Entity, State};
use hbnb_store::{Storage, StorageConfig};
use tempfile::TempDir;
use tracing::Level;

#[test]
fn test_facade_emits_start_end_and_error_events() {
    let capture = init_test_capture();
    let dir = TempDir::new().unwrap();
    let mut storage = Storage::init(&StorageConfig::file(dir.path().join("file.json")));
    storage.reload().unwrap();

    // Successful operation: start and end, tagged with the backend
    let state: Entity = State::new("Wyoming").into();
    storage.new(state.clone()).unwrap();
    storage.save().unwrap();

    capture.assert_event_exists("new", "start");
    capture.assert_event_exists("save", "start");
    capture.assert_event_exists("save", "end");
    let new_start = capture
        .events_for_op("new")
        .into_iter()
        .find(|e| e.field("entity_key") == Some(state.key().as_str()))
        .expect("new start event carries the entity key");
    assert_eq!(new_start.field("backend"), Some("file"));

    // Failing operation: end_error with the stable code
    let ghost: Entity = State::new("Ghost").into();
    storage.delete(&ghost).unwrap_err();

    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some("delete")
            && e.event.as_deref() == Some("end_error")
            && e.field("err.code") == Some("ERR_NOT_FOUND")
            && e.level == Level::ERROR
    });
    assert_eq!(errors, 1);
}
