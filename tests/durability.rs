//! File-backed durability: committed batches survive reopen, rejected
//! batches leave no trace, and poster blobs land beside the tables.

use cinedb::access::{Role, RoleSet};
use cinedb::api::Service;
use cinedb::schema::{EntityType, Key};
use cinedb::store::{BlobStore, FileStore, LocalBlobStore, Store};
use tempfile::TempDir;

fn admin() -> RoleSet {
    RoleSet::of(&[Role::User, Role::Moderator, Role::Admin])
}

fn open(dir: &TempDir) -> Service<FileStore, LocalBlobStore> {
    let store = FileStore::open(dir.path().join("tables.json")).unwrap();
    let blobs = LocalBlobStore::new(dir.path().join("posters"));
    Service::new(store, blobs)
}

const USERS: &str = "uid\tu_name\temail\n1\talice\talice@example.com\n2\tbob\tbob@example.com\n";

#[test]
fn committed_batch_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let service = open(&dir);
        service
            .bulk_entry(&admin(), EntityType::User, USERS)
            .unwrap();
    }
    let service = open(&dir);
    let row = service
        .store()
        .get(EntityType::User, &Key::Id(2))
        .unwrap()
        .unwrap();
    assert_eq!(row.get_text("u_name"), Some("bob"));
}

#[test]
fn rejected_batch_leaves_no_trace_on_disk() {
    let dir = TempDir::new().unwrap();
    {
        let service = open(&dir);
        service
            .bulk_entry(&admin(), EntityType::User, USERS)
            .unwrap();
        // duplicate key; whole batch rejected
        service
            .bulk_entry(
                &admin(),
                EntityType::User,
                "uid\tu_name\temail\n3\tcarol\tcarol@example.com\n1\tdupe\tdupe@example.com\n",
            )
            .unwrap_err();
    }
    let service = open(&dir);
    assert!(!service
        .store()
        .exists(EntityType::User, &Key::Id(3))
        .unwrap());
    assert!(service
        .store()
        .exists(EntityType::User, &Key::Id(1))
        .unwrap());
}

#[test]
fn poster_blob_lands_in_poster_dir() {
    let dir = TempDir::new().unwrap();
    let service = open(&dir);
    service
        .bulk_entry_all(
            &admin(),
            &[
                (EntityType::User, USERS),
                (EntityType::Admin, "uid\tposition\n1\tadmin\n"),
                (
                    EntityType::Movie,
                    "mid\tdirector_uid\ttitle\trelease_date\tentered_by\n\
                     5\t2\tNight Train\t2001-05-01\t1\n",
                ),
            ],
        )
        .unwrap();
    service
        .add_poster(&admin(), 1, 5, "cover.png", b"image-bytes")
        .unwrap();
    assert!(service.blobs().exists("00000005.png").unwrap());
    assert!(dir.path().join("posters").join("00000005.png").exists());

    // the row survives reopen and points at the blob
    drop(service);
    let service = open(&dir);
    let row = service
        .store()
        .get(EntityType::Poster, &Key::Id(5))
        .unwrap()
        .unwrap();
    assert_eq!(row.get_text("img"), Some("00000005.png"));
}
