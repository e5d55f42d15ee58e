//! The static table catalog.
//!
//! One `TableSchema` per entity type, built at startup. The layouts
//! mirror the catalog's relational schema:
//!
//! - `user(uid, u_name, email)` with `u_name` unique
//! - `password(uid -> user, hash)`
//! - `admin(uid -> user, position)` where position tags moderator/admin
//! - `director(uid -> user, given_name, famous_for -> movie?, dob?)`
//! - `actor(uid -> user, name, dob?)`
//! - `movie(mid, director_uid -> user, title, release_date, entered_by -> admin)`
//! - `review(mid -> movie, uid -> user, text?, rating)` keyed (mid, uid)
//! - `acted_in(mid -> movie, uid -> actor, character_role)` keyed (mid, uid)
//! - `poster(mid -> movie, img, entered_by -> admin)`

use super::types::{EntityType, FieldDef, FieldDomain, ForeignKey, PrimaryKey, TableSchema};

/// Read-only catalog of the nine table schemas
#[derive(Debug, Clone)]
pub struct Catalog {
    // indexed by EntityType::dependency_rank
    tables: Vec<TableSchema>,
}

impl Catalog {
    pub fn new() -> Self {
        let tables = EntityType::ALL.iter().map(|&e| build_table(e)).collect();
        Self { tables }
    }

    /// Returns the schema for an entity type
    pub fn describe(&self, entity: EntityType) -> &TableSchema {
        &self.tables[entity.dependency_rank()]
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

fn build_table(entity: EntityType) -> TableSchema {
    match entity {
        EntityType::User => TableSchema {
            entity,
            fields: vec![
                FieldDef::required("uid", FieldDomain::Id),
                FieldDef::required("u_name", FieldDomain::Username),
                FieldDef::required("email", FieldDomain::Email),
            ],
            primary_key: PrimaryKey::Single("uid"),
            foreign_keys: vec![],
            unique_fields: vec!["u_name"],
        },
        EntityType::Password => TableSchema {
            entity,
            fields: vec![
                FieldDef::required("uid", FieldDomain::Id),
                FieldDef::required("hash", FieldDomain::Opaque),
            ],
            primary_key: PrimaryKey::Single("uid"),
            foreign_keys: vec![ForeignKey {
                field: "uid",
                target: EntityType::User,
            }],
            unique_fields: vec![],
        },
        EntityType::Admin => TableSchema {
            entity,
            fields: vec![
                FieldDef::required("uid", FieldDomain::Id),
                FieldDef::required("position", FieldDomain::Position),
            ],
            primary_key: PrimaryKey::Single("uid"),
            foreign_keys: vec![ForeignKey {
                field: "uid",
                target: EntityType::User,
            }],
            unique_fields: vec![],
        },
        EntityType::Director => TableSchema {
            entity,
            fields: vec![
                FieldDef::required("uid", FieldDomain::Id),
                FieldDef::required("given_name", FieldDomain::PersonalName),
                FieldDef::optional("famous_for", FieldDomain::Id),
                FieldDef::optional("dob", FieldDomain::Date),
            ],
            primary_key: PrimaryKey::Single("uid"),
            foreign_keys: vec![
                ForeignKey {
                    field: "uid",
                    target: EntityType::User,
                },
                ForeignKey {
                    field: "famous_for",
                    target: EntityType::Movie,
                },
            ],
            unique_fields: vec![],
        },
        EntityType::Actor => TableSchema {
            entity,
            fields: vec![
                FieldDef::required("uid", FieldDomain::Id),
                FieldDef::required("name", FieldDomain::PersonalName),
                FieldDef::optional("dob", FieldDomain::Date),
            ],
            primary_key: PrimaryKey::Single("uid"),
            foreign_keys: vec![ForeignKey {
                field: "uid",
                target: EntityType::User,
            }],
            unique_fields: vec![],
        },
        EntityType::Movie => TableSchema {
            entity,
            fields: vec![
                FieldDef::required("mid", FieldDomain::Id),
                FieldDef::required("director_uid", FieldDomain::Id),
                FieldDef::required("title", FieldDomain::Title),
                FieldDef::required("release_date", FieldDomain::Date),
                FieldDef::required("entered_by", FieldDomain::Id),
            ],
            primary_key: PrimaryKey::Single("mid"),
            foreign_keys: vec![
                ForeignKey {
                    field: "director_uid",
                    target: EntityType::User,
                },
                ForeignKey {
                    field: "entered_by",
                    target: EntityType::Admin,
                },
            ],
            unique_fields: vec![],
        },
        EntityType::Review => TableSchema {
            entity,
            fields: vec![
                FieldDef::required("mid", FieldDomain::Id),
                FieldDef::required("uid", FieldDomain::Id),
                FieldDef::optional("text", FieldDomain::ReviewText),
                FieldDef::required("rating", FieldDomain::Rating),
            ],
            primary_key: PrimaryKey::Composite("mid", "uid"),
            foreign_keys: vec![
                ForeignKey {
                    field: "mid",
                    target: EntityType::Movie,
                },
                ForeignKey {
                    field: "uid",
                    target: EntityType::User,
                },
            ],
            unique_fields: vec![],
        },
        EntityType::ActedIn => TableSchema {
            entity,
            fields: vec![
                FieldDef::required("mid", FieldDomain::Id),
                FieldDef::required("uid", FieldDomain::Id),
                FieldDef::required("character_role", FieldDomain::CharacterRole),
            ],
            primary_key: PrimaryKey::Composite("mid", "uid"),
            foreign_keys: vec![
                ForeignKey {
                    field: "mid",
                    target: EntityType::Movie,
                },
                ForeignKey {
                    field: "uid",
                    target: EntityType::Actor,
                },
            ],
            unique_fields: vec![],
        },
        EntityType::Poster => TableSchema {
            entity,
            fields: vec![
                FieldDef::required("mid", FieldDomain::Id),
                FieldDef::required("img", FieldDomain::Filename),
                FieldDef::required("entered_by", FieldDomain::Id),
            ],
            primary_key: PrimaryKey::Single("mid"),
            foreign_keys: vec![
                ForeignKey {
                    field: "mid",
                    target: EntityType::Movie,
                },
                ForeignKey {
                    field: "entered_by",
                    target: EntityType::Admin,
                },
            ],
            unique_fields: vec![],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entity_described() {
        let catalog = Catalog::new();
        for entity in EntityType::ALL {
            assert_eq!(catalog.describe(entity).entity, entity);
        }
    }

    #[test]
    fn test_user_header() {
        let catalog = Catalog::new();
        assert_eq!(catalog.describe(EntityType::User).header(), "uid\tu_name\temail");
    }

    #[test]
    fn test_composite_keys() {
        let catalog = Catalog::new();
        for entity in [EntityType::Review, EntityType::ActedIn] {
            assert!(matches!(
                catalog.describe(entity).primary_key,
                PrimaryKey::Composite("mid", "uid")
            ));
        }
    }

    #[test]
    fn test_fk_targets_precede_referrers() {
        let catalog = Catalog::new();
        for entity in EntityType::ALL {
            let schema = catalog.describe(entity);
            for fk in &schema.foreign_keys {
                assert!(
                    fk.target.dependency_rank() < entity.dependency_rank(),
                    "{} -> {}",
                    entity,
                    fk.target
                );
            }
        }
    }

    #[test]
    fn test_optional_fields() {
        let catalog = Catalog::new();
        let director = catalog.describe(EntityType::Director);
        assert!(!director.field("dob").unwrap().required);
        assert!(!director.field("famous_for").unwrap().required);
        assert!(director.field("given_name").unwrap().required);
    }
}
