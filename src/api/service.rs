//! The service facade.
//!
//! Every call authorizes first, then goes through the ingestion engine
//! or the store. Entry paths hand the engine a `Grant`, so a caller
//! that skipped the gate has nothing to hand over.

use tracing::warn;

use crate::access::{Gate, Grant, Operation, RoleSet};
use crate::ingest::{BatchReceipt, Engine};
use crate::schema::{EntityType, Key, Row};
use crate::store::{allowed_image_name, poster_filename, BlobStore, Store, StoreError};

use super::errors::{ServiceError, ServiceResult};
use super::view::{paginate, CastMember, MovieDetail, Page, PageOf, ReviewView};

/// The operation surface, binding gate, engine, store, and blob store
pub struct Service<S: Store, B: BlobStore> {
    engine: Engine<S>,
    blobs: B,
}

impl<S: Store, B: BlobStore> Service<S, B> {
    pub fn new(store: S, blobs: B) -> Self {
        Self {
            engine: Engine::new(store),
            blobs,
        }
    }

    pub fn engine(&self) -> &Engine<S> {
        &self.engine
    }

    pub fn store(&self) -> &S {
        self.engine.store()
    }

    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    /// Pages through all rows of one table.
    pub fn browse(&self, roles: &RoleSet, entity: EntityType, page: Page) -> ServiceResult<PageOf<Row>> {
        Gate::authorize(roles, Operation::Browse(entity))?;
        let rows = self.store().scan(entity)?;
        Ok(paginate(rows, page))
    }

    /// Case-insensitive title-substring search over the movie table.
    pub fn search(&self, roles: &RoleSet, fragment: &str) -> ServiceResult<Vec<Row>> {
        Gate::authorize(roles, Operation::Search)?;
        let needle = fragment.to_lowercase();
        Ok(self
            .store()
            .scan(EntityType::Movie)?
            .into_iter()
            .filter(|row| {
                row.get_text("title")
                    .is_some_and(|t| t.to_lowercase().contains(&needle))
            })
            .collect())
    }

    /// The joined detail view of one movie: title, director, release
    /// date, poster, cast, and reviews.
    pub fn movie_detail(&self, roles: &RoleSet, mid: i64) -> ServiceResult<MovieDetail> {
        Gate::authorize(roles, Operation::ViewMovie)?;
        let store = self.store();
        let movie = store
            .get(EntityType::Movie, &Key::Id(mid))?
            .ok_or(ServiceError::MovieNotFound(mid))?;

        let director_uid = int_field(&movie, EntityType::Movie, "director_uid")?;
        let director = self.person_name(director_uid)?;

        let poster = store
            .get(EntityType::Poster, &Key::Id(mid))?
            .map(|row| text_field(&row, EntityType::Poster, "img"))
            .transpose()?;

        let mut cast = Vec::new();
        for part in store.scan(EntityType::ActedIn)? {
            if part.get_int("mid") != Some(mid) {
                continue;
            }
            let uid = int_field(&part, EntityType::ActedIn, "uid")?;
            let actor = store
                .get(EntityType::Actor, &Key::Id(uid))?
                .ok_or_else(|| dangling(EntityType::ActedIn, "uid", uid))?;
            cast.push(CastMember {
                uid,
                name: text_field(&actor, EntityType::Actor, "name")?,
                character_role: text_field(&part, EntityType::ActedIn, "character_role")?,
            });
        }

        let mut reviews = Vec::new();
        for review in store.scan(EntityType::Review)? {
            if review.get_int("mid") != Some(mid) {
                continue;
            }
            let uid = int_field(&review, EntityType::Review, "uid")?;
            let user = store
                .get(EntityType::User, &Key::Id(uid))?
                .ok_or_else(|| dangling(EntityType::Review, "uid", uid))?;
            reviews.push(ReviewView {
                uid,
                reviewer: text_field(&user, EntityType::User, "u_name")?,
                text: review.get_text("text").map(str::to_string),
                rating: int_field(&review, EntityType::Review, "rating")?,
            });
        }

        Ok(MovieDetail {
            mid,
            title: text_field(&movie, EntityType::Movie, "title")?,
            director,
            release_date: movie
                .get_date("release_date")
                .ok_or_else(|| corrupt(EntityType::Movie, "release_date"))?,
            poster,
            cast,
            reviews,
        })
    }

    /// Posts a review as a signed-in user.
    pub fn create_review(
        &self,
        roles: &RoleSet,
        uid: i64,
        mid: i64,
        text: &str,
        rating: i64,
    ) -> ServiceResult<Row> {
        let grant = Gate::authorize(roles, Operation::CreateReview)?;
        let mid = mid.to_string();
        let uid = uid.to_string();
        let rating = rating.to_string();
        let fields = [
            ("mid", mid.as_str()),
            ("uid", uid.as_str()),
            ("text", text),
            ("rating", rating.as_str()),
        ];
        Ok(self.engine.enter(&grant, &fields)?)
    }

    /// Registers a user: the USER row and its PASSWORD row commit as
    /// one atomic pair. The hash comes from an external collaborator
    /// and is stored opaquely.
    pub fn register_user(
        &self,
        roles: &RoleSet,
        uid: i64,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> ServiceResult<Vec<Row>> {
        let user_grant = Gate::authorize(roles, Operation::SingleEntry(EntityType::User))?;
        let pass_grant = Gate::authorize(roles, Operation::SingleEntry(EntityType::Password))?;
        let uid = uid.to_string();
        let user_fields = [
            ("uid", uid.as_str()),
            ("u_name", username),
            ("email", email),
        ];
        let pass_fields = [("uid", uid.as_str()), ("hash", password_hash)];
        Ok(self.engine.enter_all(&[
            (&user_grant, user_fields.as_slice()),
            (&pass_grant, pass_fields.as_slice()),
        ])?)
    }

    /// Enters one row of one table.
    pub fn single_entry(
        &self,
        roles: &RoleSet,
        entity: EntityType,
        fields: &[(&str, &str)],
    ) -> ServiceResult<Row> {
        let grant = Gate::authorize(roles, Operation::SingleEntry(entity))?;
        Ok(self.engine.enter(&grant, fields)?)
    }

    /// Bulk-loads one tab-separated batch into one table.
    pub fn bulk_entry(
        &self,
        roles: &RoleSet,
        entity: EntityType,
        input: &str,
    ) -> ServiceResult<BatchReceipt> {
        let grant = Gate::authorize(roles, Operation::BulkEntry(entity))?;
        Ok(self.engine.ingest(&grant, input)?)
    }

    /// Bulk-loads several batches as one atomic request.
    pub fn bulk_entry_all(
        &self,
        roles: &RoleSet,
        batches: &[(EntityType, &str)],
    ) -> ServiceResult<Vec<BatchReceipt>> {
        let grants = batches
            .iter()
            .map(|(entity, _)| Gate::authorize(roles, Operation::BulkEntry(*entity)))
            .collect::<Result<Vec<Grant>, _>>()?;
        let pairs: Vec<(&Grant, &str)> = grants
            .iter()
            .zip(batches)
            .map(|(grant, (_, input))| (grant, *input))
            .collect();
        Ok(self.engine.ingest_all(&pairs)?)
    }

    /// Adds a poster: filetype gate, row validation, blob write, then
    /// the POSTER row commit. A malformed or unresolvable upload never
    /// touches the blob store.
    pub fn add_poster(
        &self,
        roles: &RoleSet,
        entered_by: i64,
        mid: i64,
        upload_name: &str,
        bytes: &[u8],
    ) -> ServiceResult<Row> {
        let grant = Gate::authorize(roles, Operation::SingleEntry(EntityType::Poster))?;
        if !allowed_image_name(upload_name) {
            return Err(ServiceError::UnsupportedImage(upload_name.to_string()));
        }
        let filename = poster_filename(mid);
        let mid = mid.to_string();
        let entered_by = entered_by.to_string();
        let fields = [
            ("mid", mid.as_str()),
            ("img", filename.as_str()),
            ("entered_by", entered_by.as_str()),
        ];
        self.engine.check(&grant, &fields)?;
        self.blobs.store(&filename, bytes)?;
        match self.engine.enter(&grant, &fields) {
            Ok(row) => Ok(row),
            // e.g. a concurrent commit of the same movie between check
            // and enter; take the blob back out so no orphan remains
            Err(err) => {
                if let Err(remove_err) = self.blobs.remove(&filename) {
                    warn!(%filename, error = %remove_err, "orphaned poster blob left behind");
                }
                Err(err.into())
            }
        }
    }

    /// Director display name: the DIRECTOR row's given name when one
    /// exists, else the USER row's username.
    fn person_name(&self, uid: i64) -> ServiceResult<String> {
        let store = self.store();
        if let Some(director) = store.get(EntityType::Director, &Key::Id(uid))? {
            return text_field(&director, EntityType::Director, "given_name").map_err(Into::into);
        }
        let user = store
            .get(EntityType::User, &Key::Id(uid))?
            .ok_or_else(|| dangling(EntityType::Movie, "director_uid", uid))?;
        text_field(&user, EntityType::User, "u_name").map_err(Into::into)
    }
}

fn corrupt(entity: EntityType, field: &str) -> StoreError {
    StoreError::Corrupt(format!("{} row missing '{}'", entity, field))
}

fn dangling(entity: EntityType, field: &str, value: i64) -> StoreError {
    StoreError::Corrupt(format!("{} row references missing {}={}", entity, field, value))
}

fn text_field(row: &Row, entity: EntityType, field: &str) -> Result<String, StoreError> {
    row.get_text(field)
        .map(str::to_string)
        .ok_or_else(|| corrupt(entity, field))
}

fn int_field(row: &Row, entity: EntityType, field: &str) -> Result<i64, StoreError> {
    row.get_int(field).ok_or_else(|| corrupt(entity, field))
}
