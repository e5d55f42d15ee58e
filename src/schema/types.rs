//! Entity and table definitions for the movie catalog.
//!
//! The nine entity types are a closed set; there is no runtime schema
//! registration. Each table declares its fields, primary key, and
//! foreign-key edges, which the validation and ingestion paths read
//! but never modify.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{SchemaError, SchemaResult};

/// The nine entity types of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    User,
    Password,
    Admin,
    Director,
    Actor,
    Movie,
    Review,
    ActedIn,
    Poster,
}

impl EntityType {
    /// All entity types in dependency order: every foreign-key target
    /// precedes its referrers. Used to order multi-batch ingestion.
    pub const ALL: [EntityType; 9] = [
        EntityType::User,
        EntityType::Password,
        EntityType::Admin,
        EntityType::Movie,
        EntityType::Director,
        EntityType::Actor,
        EntityType::Review,
        EntityType::ActedIn,
        EntityType::Poster,
    ];

    /// Returns the entity name used in input and output
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::User => "user",
            EntityType::Password => "password",
            EntityType::Admin => "admin",
            EntityType::Director => "director",
            EntityType::Actor => "actor",
            EntityType::Movie => "movie",
            EntityType::Review => "review",
            EntityType::ActedIn => "acted_in",
            EntityType::Poster => "poster",
        }
    }

    /// Parses an entity name
    pub fn parse(name: &str) -> SchemaResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "user" => Ok(EntityType::User),
            "password" => Ok(EntityType::Password),
            "admin" => Ok(EntityType::Admin),
            "director" => Ok(EntityType::Director),
            "actor" => Ok(EntityType::Actor),
            "movie" => Ok(EntityType::Movie),
            "review" => Ok(EntityType::Review),
            "acted_in" => Ok(EntityType::ActedIn),
            "poster" => Ok(EntityType::Poster),
            _ => Err(SchemaError::UnknownEntityType(name.to_string())),
        }
    }

    /// Position in dependency order; lower ranks never reference higher ones
    pub fn dependency_rank(&self) -> usize {
        match self {
            EntityType::User => 0,
            EntityType::Password => 1,
            EntityType::Admin => 2,
            EntityType::Movie => 3,
            EntityType::Director => 4,
            EntityType::Actor => 5,
            EntityType::Review => 6,
            EntityType::ActedIn => 7,
            EntityType::Poster => 8,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Value domain of a field
///
/// Domains carry both the wire type (integer, text, date) and the
/// lexical rules a value must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDomain {
    /// Non-negative integer identifier
    Id,
    /// Lowercase alphanumeric/underscore, at most 40 characters
    Username,
    /// Email address
    Email,
    /// Letters and spaces, at most 40 characters
    PersonalName,
    /// Letters and underscores, at most 20 characters
    Position,
    /// Free text, 1 to 40 characters
    Title,
    /// Restricted punctuation, may be empty
    ReviewText,
    /// Letters, digits, apostrophes, hyphens, spaces; at most 20 characters
    CharacterRole,
    /// Integer from 0 to 5 inclusive
    Rating,
    /// Calendar date, YYYY-MM-DD
    Date,
    /// Image filename with a png/jpg/jpeg extension
    Filename,
    /// Opaque non-empty text (e.g. a password hash)
    Opaque,
}

impl FieldDomain {
    /// Short label for schema listings
    pub fn label(&self) -> &'static str {
        match self {
            FieldDomain::Id => "id",
            FieldDomain::Username => "username",
            FieldDomain::Email => "email",
            FieldDomain::PersonalName => "personal name",
            FieldDomain::Position => "position",
            FieldDomain::Title => "title",
            FieldDomain::ReviewText => "review text",
            FieldDomain::CharacterRole => "character role",
            FieldDomain::Rating => "rating",
            FieldDomain::Date => "date",
            FieldDomain::Filename => "filename",
            FieldDomain::Opaque => "opaque",
        }
    }
}

/// Field definition: name, domain, and whether a value must be present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub domain: FieldDomain,
    pub required: bool,
}

impl FieldDef {
    /// Create a required field
    pub const fn required(name: &'static str, domain: FieldDomain) -> Self {
        Self {
            name,
            domain,
            required: true,
        }
    }

    /// Create an optional field; absence is distinct from any value
    pub const fn optional(name: &'static str, domain: FieldDomain) -> Self {
        Self {
            name,
            domain,
            required: false,
        }
    }
}

/// A foreign-key edge from one field to the primary key of another table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub field: &'static str,
    pub target: EntityType,
}

/// Primary key shape: a single id field or an (mid, uid) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryKey {
    Single(&'static str),
    Composite(&'static str, &'static str),
}

impl PrimaryKey {
    /// First key field, used in messages when the key cannot be extracted
    pub fn first_field(&self) -> &'static str {
        match self {
            PrimaryKey::Single(f) => f,
            PrimaryKey::Composite(f, _) => f,
        }
    }
}

/// Complete description of one table
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub entity: EntityType,
    pub fields: Vec<FieldDef>,
    pub primary_key: PrimaryKey,
    pub foreign_keys: Vec<ForeignKey>,
    /// Non-key fields whose values must be unique across the table
    pub unique_fields: Vec<&'static str>,
}

impl TableSchema {
    /// Look up a field definition by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// The exact header line a bulk batch for this table must carry
    pub fn header(&self) -> String {
        self.field_names().join("\t")
    }
}
