//! CLI command implementations.
//!
//! Thin wrappers over the service facade: each command resolves a role
//! set from `--role` and goes through the same gate as any other
//! caller. The data directory holds the table file and poster blobs.

use std::fs;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::api::{Page, Service, ServiceError};
use crate::ingest::BatchError;
use crate::schema::{Catalog, EntityType, PrimaryKey};
use crate::store::{FileStore, LocalBlobStore};

use super::args::{Cli, Command, RoleArg};
use super::errors::{CliError, CliResult};

const TABLES_FILE: &str = "tables.json";
const POSTERS_DIR: &str = "posters";

/// Entry point called from `main`
pub fn run() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse_args();
    run_command(cli.command)
}

pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Describe { entity } => describe(&entity),
        Command::Load {
            data,
            entity,
            file,
            role,
        } => load(&data, &entity, &file, role),
        Command::Browse {
            data,
            entity,
            page,
            role,
        } => browse(&data, &entity, page, role),
        Command::Movie { data, mid, role } => movie(&data, mid, role),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn service_at(data: &Path) -> CliResult<Service<FileStore, LocalBlobStore>> {
    let store = FileStore::open(data.join(TABLES_FILE))?;
    let blobs = LocalBlobStore::new(data.join(POSTERS_DIR));
    Ok(Service::new(store, blobs))
}

fn describe(entity: &str) -> CliResult<()> {
    let entity = EntityType::parse(entity)?;
    let catalog = Catalog::new();
    let schema = catalog.describe(entity);
    println!("table {}", schema.entity);
    for field in &schema.fields {
        let mut notes = Vec::new();
        if field.required {
            notes.push("required".to_string());
        }
        let in_key = match schema.primary_key {
            PrimaryKey::Single(f) => f == field.name,
            PrimaryKey::Composite(a, b) => a == field.name || b == field.name,
        };
        if in_key {
            notes.push("primary key".to_string());
        }
        if schema.unique_fields.contains(&field.name) {
            notes.push("unique".to_string());
        }
        if let Some(fk) = schema.foreign_keys.iter().find(|fk| fk.field == field.name) {
            notes.push(format!("references {}", fk.target));
        }
        println!("  {}\t{}\t{}", field.name, field.domain.label(), notes.join(", "));
    }
    Ok(())
}

fn load(data: &Path, entity: &str, file: &Path, role: RoleArg) -> CliResult<()> {
    let entity = EntityType::parse(entity)?;
    let input = fs::read_to_string(file).map_err(|source| CliError::ReadFile {
        path: file.to_path_buf(),
        source,
    })?;
    let service = service_at(data)?;
    match service.bulk_entry(&role.role_set(), entity, &input) {
        Ok(receipt) => {
            println!("{}", receipt);
            Ok(())
        }
        Err(ServiceError::Batch(BatchError::Rejected(issues))) => {
            for issue in &issues {
                eprintln!("{}", issue);
            }
            Err(CliError::Rejected(issues.len()))
        }
        Err(e) => Err(e.into()),
    }
}

fn browse(data: &Path, entity: &str, page: usize, role: RoleArg) -> CliResult<()> {
    let entity = EntityType::parse(entity)?;
    let service = service_at(data)?;
    let result = service.browse(&role.role_set(), entity, Page::new(page))?;
    let schema = service.engine().catalog().describe(entity);
    println!("{}", schema.header());
    for row in &result.items {
        println!("{}", row.to_line(schema));
    }
    println!(
        "page {} of {} ({} row(s))",
        result.number, result.pages, result.total
    );
    Ok(())
}

fn movie(data: &Path, mid: i64, role: RoleArg) -> CliResult<()> {
    let service = service_at(data)?;
    let detail = service.movie_detail(&role.role_set(), mid)?;
    println!("{} ({})", detail.title, detail.release_date);
    println!("directed by {}", detail.director);
    if let Some(poster) = &detail.poster {
        println!("poster: {}", poster);
    }
    if !detail.cast.is_empty() {
        println!("cast:");
        for member in &detail.cast {
            println!("  {} as {}", member.name, member.character_role);
        }
    }
    if !detail.reviews.is_empty() {
        println!("reviews:");
        for review in &detail.reviews {
            let text = review.text.as_deref().unwrap_or("");
            println!("  {} ({}/5): {}", review.reviewer, review.rating, text);
        }
    }
    Ok(())
}
