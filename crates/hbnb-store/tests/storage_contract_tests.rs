// Integration tests for the storage contract
// Every scenario runs against both backends through the facade, reopening
// the store where a scenario needs to observe durable state.

use hbnb_core::model::{Amenity, City, Entity, Kind, Place, Review, State, User};
use hbnb_core::HbErrorKind;
use hbnb_store::{DbTarget, Storage, StorageConfig};
use tempfile::TempDir;

/// Both backends, each persisting under `dir`
fn configs(dir: &TempDir) -> Vec<StorageConfig> {
    vec![
        StorageConfig::file(dir.path().join("file.json")),
        StorageConfig::db(DbTarget::Path(dir.path().join("hbnb.db"))),
    ]
}

fn open(config: &StorageConfig) -> Storage {
    let mut storage = Storage::init(config);
    storage.reload().unwrap();
    storage
}

/// Close and open again, so reads come from durable state only
fn reopen(storage: &mut Storage, config: &StorageConfig) -> Storage {
    storage.close().unwrap();
    open(config)
}

struct Fixture {
    state: State,
    city: City,
    user: User,
    place: Place,
    review: Review,
    wifi: Amenity,
}

fn fixture() -> Fixture {
    let state = State::new("California");
    let city = City::new(&state.base.id, "San Francisco");
    let user = User::new("host@hbnb.io", "s3cret").with_name("Betty", "Holberton");
    let wifi = Amenity::new("Wifi");
    let mut place = Place::new(&city.base.id, &user.base.id, "Loft");
    place.number_rooms = 2;
    place.latitude = 37.77;
    place.add_amenity(&wifi);
    let review = Review::new(&place.base.id, &user.base.id, "Great view");
    Fixture {
        state,
        city,
        user,
        place,
        review,
        wifi,
    }
}

fn stage_fixture(storage: &mut Storage, f: &Fixture) {
    for entity in [
        Entity::from(f.review.clone()),
        f.place.clone().into(),
        f.city.clone().into(),
        f.state.clone().into(),
        f.user.clone().into(),
        f.wifi.clone().into(),
    ] {
        storage.new(entity).unwrap();
    }
}

#[test]
fn test_saved_entities_survive_reopen_unchanged() {
    let dir = TempDir::new().unwrap();
    for config in configs(&dir) {
        // Given: a full graph saved to the store
        let f = fixture();
        let mut storage = open(&config);
        stage_fixture(&mut storage, &f);
        storage.save().unwrap();

        // When: the store is reopened
        let mut reopened = reopen(&mut storage, &config);

        // Then: every entity decodes equal to what was saved
        assert_eq!(
            reopened.get(Kind::Place, &f.place.base.id).unwrap(),
            Entity::Place(f.place.clone()),
            "{} backend",
            config.backend
        );
        assert_eq!(
            reopened.get(Kind::User, &f.user.base.id).unwrap(),
            Entity::User(f.user.clone())
        );
        assert_eq!(reopened.count(None).unwrap(), 6);
    }
}

#[test]
fn test_identity_stability() {
    let dir = TempDir::new().unwrap();
    let mut targets = configs(&dir);
    targets.push(StorageConfig::db(DbTarget::Memory));
    for config in targets {
        let mut storage = open(&config);
        let state: Entity = State::new("Nevada").into();

        storage.new(state.clone()).unwrap();
        storage.save().unwrap();
        storage.reload().unwrap();

        let all = storage.all(None).unwrap();
        assert_eq!(
            all.get(&state.key()),
            Some(&state),
            "{:?} target of {} backend",
            config.db_target,
            config.backend
        );
    }
}

#[test]
fn test_kind_filter_returns_only_that_kind() {
    let dir = TempDir::new().unwrap();
    for config in configs(&dir) {
        let f = fixture();
        let mut storage = open(&config);
        stage_fixture(&mut storage, &f);
        storage.save().unwrap();

        let cities = storage.all(Some(Kind::City)).unwrap();

        assert_eq!(cities.len(), 1);
        assert!(cities.values().all(|e| e.kind() == Kind::City));
        assert_eq!(storage.count(Some(Kind::Amenity)).unwrap(), 1);
    }
}

#[test]
fn test_state_delete_cascades_through_cities_places_reviews() {
    let dir = TempDir::new().unwrap();
    for config in configs(&dir) {
        // Given: State → City → Place → Review, saved
        let f = fixture();
        let mut storage = open(&config);
        stage_fixture(&mut storage, &f);
        storage.save().unwrap();

        // When: the State is deleted and the deletion saved
        storage.delete(&f.state.clone().into()).unwrap();
        storage.save().unwrap();
        let mut reopened = reopen(&mut storage, &config);

        // Then: dependents are gone, unrelated entities remain
        assert_eq!(reopened.count(Some(Kind::City)).unwrap(), 0, "{} backend", config.backend);
        assert_eq!(reopened.count(Some(Kind::Place)).unwrap(), 0);
        assert_eq!(reopened.count(Some(Kind::Review)).unwrap(), 0);
        assert_eq!(reopened.count(Some(Kind::User)).unwrap(), 1);
        assert_eq!(reopened.count(Some(Kind::Amenity)).unwrap(), 1);
    }
}

#[test]
fn test_user_delete_cascades_places_and_reviews() {
    let dir = TempDir::new().unwrap();
    for config in configs(&dir) {
        let f = fixture();
        let mut storage = open(&config);
        stage_fixture(&mut storage, &f);
        storage.save().unwrap();

        storage.delete(&f.user.clone().into()).unwrap();
        storage.save().unwrap();

        assert_eq!(storage.count(Some(Kind::Place)).unwrap(), 0, "{} backend", config.backend);
        assert_eq!(storage.count(Some(Kind::Review)).unwrap(), 0);
        assert_eq!(storage.count(Some(Kind::City)).unwrap(), 1);
    }
}

#[test]
fn test_deleted_entity_is_not_resurrected() {
    let dir = TempDir::new().unwrap();
    for config in configs(&dir) {
        let mut storage = open(&config);
        let amenity: Entity = Amenity::new("Sauna").into();
        storage.new(amenity.clone()).unwrap();
        storage.save().unwrap();

        storage.delete(&amenity).unwrap();
        storage.save().unwrap();
        let mut reopened = reopen(&mut storage, &config);

        let err = reopened.get(Kind::Amenity, amenity.id()).unwrap_err();
        assert_eq!(err.kind(), HbErrorKind::NotFound, "{} backend", config.backend);
        assert!(!reopened.all(None).unwrap().contains_key(&amenity.key()));
    }
}

#[test]
fn test_missing_required_attribute_rejected_then_rolled_back() {
    let dir = TempDir::new().unwrap();
    for config in configs(&dir) {
        // Given: a committed State
        let mut storage = open(&config);
        let state: Entity = State::new("Oregon").into();
        storage.new(state.clone()).unwrap();
        storage.save().unwrap();

        // When: a City without a name is staged and saved
        let nameless = City::new(state.id(), "");
        storage.new(nameless.into()).unwrap();
        let err = storage.save().unwrap_err();

        // Then: the commit is rejected, and after rollback only the State remains
        assert_eq!(err.kind(), HbErrorKind::ConstraintViolation, "{} backend", config.backend);
        storage.rollback().unwrap();
        assert_eq!(storage.count(None).unwrap(), 1);
        assert_eq!(storage.get(Kind::State, state.id()).unwrap(), state);
    }
}

#[test]
fn test_non_finite_coordinate_rejected_before_anything_is_written() {
    let dir = TempDir::new().unwrap();
    for config in configs(&dir) {
        let f = fixture();
        let mut storage = open(&config);
        stage_fixture(&mut storage, &f);
        storage.save().unwrap();

        let mut place = f.place.clone();
        place.latitude = f64::NAN;
        storage.new(place.into()).unwrap();
        let err = storage.save().unwrap_err();

        assert_eq!(err.kind(), HbErrorKind::ConstraintViolation, "{} backend", config.backend);
        storage.rollback().unwrap();
        let mut reopened = reopen(&mut storage, &config);
        let stored = reopened.get(Kind::Place, &f.place.base.id).unwrap();
        assert_eq!(stored, Entity::from(f.place.clone()), "{} backend", config.backend);
    }
}

#[test]
fn test_amenity_links_survive_reload() {
    let dir = TempDir::new().unwrap();
    for config in configs(&dir) {
        let f = fixture();
        let mut storage = open(&config);
        stage_fixture(&mut storage, &f);
        storage.save().unwrap();

        let mut reopened = reopen(&mut storage, &config);
        let place = match reopened.get(Kind::Place, &f.place.base.id).unwrap() {
            Entity::Place(place) => place,
            other => panic!("expected a Place, got {}", other.kind()),
        };

        let amenities = reopened.amenities_of(&place).unwrap();
        assert_eq!(amenities, vec![f.wifi.clone()], "{} backend", config.backend);
    }
}

#[test]
fn test_amenity_delete_keeps_places() {
    let dir = TempDir::new().unwrap();
    for config in configs(&dir) {
        let f = fixture();
        let mut storage = open(&config);
        stage_fixture(&mut storage, &f);
        storage.save().unwrap();

        storage.delete(&f.wifi.clone().into()).unwrap();
        storage.save().unwrap();
        let mut reopened = reopen(&mut storage, &config);

        let place = reopened.get(Kind::Place, &f.place.base.id).unwrap();
        assert!(
            place.as_place().unwrap().amenity_ids.is_empty(),
            "{} backend",
            config.backend
        );
    }
}

#[test]
fn test_relationship_accessors() {
    let dir = TempDir::new().unwrap();
    for config in configs(&dir) {
        let f = fixture();
        let mut storage = open(&config);
        stage_fixture(&mut storage, &f);
        storage.save().unwrap();

        assert_eq!(storage.cities_of(&f.state.base.id).unwrap(), vec![f.city.clone()]);
        assert_eq!(storage.places_of_city(&f.city.base.id).unwrap(), vec![f.place.clone()]);
        assert_eq!(storage.reviews_of(&f.place.base.id).unwrap(), vec![f.review.clone()]);
        assert!(storage.cities_of("no-such-state").unwrap().is_empty());
    }
}

#[test]
fn test_delete_unknown_entity_is_not_found() {
    let dir = TempDir::new().unwrap();
    for config in configs(&dir) {
        let mut storage = open(&config);

        let err = storage.delete(&State::new("Atlantis").into()).unwrap_err();

        assert_eq!(err.kind(), HbErrorKind::NotFound, "{} backend", config.backend);
        assert_eq!(err.backend(), Some(config.backend.as_str()));
    }
}

#[test]
fn test_update_keeps_single_copy() {
    let dir = TempDir::new().unwrap();
    for config in configs(&dir) {
        let mut storage = open(&config);
        let mut state = State::new("Washington");
        storage.new(state.clone().into()).unwrap();
        storage.save().unwrap();

        state.name = "Columbia".to_string();
        let mut entity: Entity = state.into();
        storage.persist(&mut entity).unwrap();
        let mut reopened = reopen(&mut storage, &config);

        assert_eq!(reopened.count(Some(Kind::State)).unwrap(), 1, "{} backend", config.backend);
        assert_eq!(reopened.get(Kind::State, entity.id()).unwrap(), entity);
    }
}

#[test]
fn test_delete_of_entity_already_removed_by_cascade_is_not_found() {
    let dir = TempDir::new().unwrap();
    for config in configs(&dir) {
        let f = fixture();
        let mut storage = open(&config);
        stage_fixture(&mut storage, &f);
        storage.save().unwrap();

        storage.delete(&f.state.clone().into()).unwrap();
        let err = storage.delete(&f.city.clone().into()).unwrap_err();
        let again = storage.delete(&f.state.clone().into()).unwrap_err();

        assert_eq!(err.kind(), HbErrorKind::NotFound, "{} backend", config.backend);
        assert_eq!(again.kind(), HbErrorKind::NotFound, "{} backend", config.backend);
        storage.save().unwrap();
        assert_eq!(storage.count(Some(Kind::City)).unwrap(), 0);
    }
}
