//! The permission table end to end: role resolution from committed
//! rows, and the gate in front of every entry path.

use cinedb::access::{resolve_roles, Gate, Operation, Role, RoleSet};
use cinedb::api::{Service, ServiceError};
use cinedb::schema::{EntityType, Key};
use cinedb::store::{MemoryBlobStore, MemoryStore, Store};

fn admin() -> RoleSet {
    RoleSet::of(&[Role::User, Role::Moderator, Role::Admin])
}

fn seeded() -> Service<MemoryStore, MemoryBlobStore> {
    let service = Service::new(MemoryStore::new(), MemoryBlobStore::new());
    service
        .bulk_entry_all(
            &admin(),
            &[
                (
                    EntityType::User,
                    "uid\tu_name\temail\n\
                     1\troot\troot@example.com\n\
                     2\tmaud\tmaud@example.com\n\
                     3\tuma\tuma@example.com\n",
                ),
                (
                    EntityType::Admin,
                    "uid\tposition\n1\tadmin\n2\tmoderator\n",
                ),
            ],
        )
        .unwrap();
    service
}

#[test]
fn roles_resolve_from_committed_rows() {
    let service = seeded();
    let store = service.store();

    let anonymous = resolve_roles(store, None).unwrap();
    assert_eq!(anonymous, RoleSet::public());

    let plain = resolve_roles(store, Some(3)).unwrap();
    assert!(plain.contains(Role::User));
    assert!(!plain.contains(Role::Moderator));

    let moderator = resolve_roles(store, Some(2)).unwrap();
    assert!(moderator.contains(Role::Moderator));
    assert!(!moderator.contains(Role::Admin));

    let root = resolve_roles(store, Some(1)).unwrap();
    assert!(root.contains(Role::Admin));
    assert!(root.contains(Role::Moderator));
}

#[test]
fn public_sees_movies_and_nothing_else() {
    let public = RoleSet::public();
    assert!(Gate::authorize(&public, Operation::Browse(EntityType::Movie)).is_ok());
    assert!(Gate::authorize(&public, Operation::ViewMovie).is_ok());
    assert!(Gate::authorize(&public, Operation::Search).is_ok());
    assert!(Gate::authorize(&public, Operation::CreateReview).is_err());
    for entity in EntityType::ALL {
        assert!(Gate::authorize(&public, Operation::BulkEntry(entity)).is_err());
        if entity != EntityType::Movie {
            assert!(Gate::authorize(&public, Operation::Browse(entity)).is_err());
        }
    }
}

#[test]
fn bulk_entry_is_admin_only() {
    let moderator = RoleSet::of(&[Role::User, Role::Moderator]);
    for entity in EntityType::ALL {
        assert!(Gate::authorize(&moderator, Operation::BulkEntry(entity)).is_err());
        assert!(Gate::authorize(&admin(), Operation::BulkEntry(entity)).is_ok());
    }
}

#[test]
fn account_tables_are_admin_only_for_single_entry() {
    let moderator = RoleSet::of(&[Role::User, Role::Moderator]);
    for entity in [EntityType::User, EntityType::Password, EntityType::Admin] {
        assert!(Gate::authorize(&moderator, Operation::SingleEntry(entity)).is_err());
    }
    for entity in [
        EntityType::Director,
        EntityType::Actor,
        EntityType::Movie,
        EntityType::Review,
        EntityType::ActedIn,
        EntityType::Poster,
    ] {
        assert!(Gate::authorize(&moderator, Operation::SingleEntry(entity)).is_ok());
    }
}

#[test]
fn public_movie_entry_denied_moderator_permitted() {
    let service = seeded();
    let fields = [
        ("mid", "5"),
        ("director_uid", "2"),
        ("title", "Night Train"),
        ("release_date", "2001-05-01"),
        ("entered_by", "1"),
    ];

    let err = service
        .single_entry(&RoleSet::public(), EntityType::Movie, &fields)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Access(_)));
    assert!(!service
        .store()
        .exists(EntityType::Movie, &Key::Id(5))
        .unwrap());

    let moderator = RoleSet::of(&[Role::User, Role::Moderator]);
    service
        .single_entry(&moderator, EntityType::Movie, &fields)
        .unwrap();
    assert!(service
        .store()
        .exists(EntityType::Movie, &Key::Id(5))
        .unwrap());
}

#[test]
fn denied_caller_never_reaches_the_store() {
    let service = seeded();
    let err = service
        .bulk_entry(
            &RoleSet::of(&[Role::User]),
            EntityType::User,
            "uid\tu_name\temail\n9\teve\teve@example.com\n",
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::Access(_)));
    assert!(!service
        .store()
        .exists(EntityType::User, &Key::Id(9))
        .unwrap());
}
