//! Fixture files: declarative seed data applied at startup.
//!
//! A fixture file describes one group with its endpoints and documents, so a
//! freshly started service answers with known mocks before anyone touches
//! the management API. Application is idempotent: records that already exist
//! are skipped, not overwritten.

use crate::config::error::ConfigError;
use crate::config::parser;
use crate::engine::Engine;
use crate::error::Error;
use crate::types::endpoint::HttpMethod;
use crate::types::group::GroupDraft;
use glob::glob;
use serde::Deserialize;
use serde_json::Value;

/// One fixture file: a group and the endpoints seeded under it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Fixture {
    pub owner: String,
    pub group: GroupFixture,
    #[serde(default)]
    pub endpoints: Vec<EndpointFixture>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GroupFixture {
    pub name: String,
    pub slug: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_active() -> bool {
    true
}

impl GroupFixture {
    fn draft(&self) -> GroupDraft {
        GroupDraft {
            name: self.name.clone(),
            slug: self.slug.clone(),
            active: self.active,
            description: self.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EndpointFixture {
    pub path: String,
    pub method: HttpMethod,
    pub document: Value,
}

/// Totals from one fixture application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Applied {
    pub groups: usize,
    pub endpoints: usize,
    pub skipped: usize,
}

/// Load every `*.yaml`, `*.yml`, and `*.json` fixture in `dir`, in path
/// order.
pub fn load_dir(dir: &str) -> Result<Vec<Fixture>, ConfigError> {
    let base = dir.trim_end_matches('/');
    let mut paths = Vec::new();
    for ext in ["yaml", "yml", "json"] {
        for entry in glob(&format!("{base}/*.{ext}"))? {
            paths.push(entry?);
        }
    }
    paths.sort();

    let mut fixtures = Vec::with_capacity(paths.len());
    for path in paths {
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        fixtures.push(parser::parse_config(&content, &path.to_string_lossy())?);
    }
    Ok(fixtures)
}

/// Register the fixtures through the engine.
///
/// Already-present groups and endpoints are skipped so re-applying the same
/// directory across restarts is harmless. Any other failure aborts the
/// application and is returned as-is.
pub async fn apply(engine: &Engine, fixtures: &[Fixture]) -> Result<Applied, Error> {
    let mut applied = Applied::default();
    for fixture in fixtures {
        match engine.create_group(&fixture.owner, fixture.group.draft()).await {
            Ok(_) => applied.groups += 1,
            Err(Error::Conflict(_)) => {
                tracing::warn!(
                    owner = %fixture.owner,
                    slug = %fixture.group.slug,
                    "fixture group already present; skipping"
                );
                applied.skipped += 1;
            }
            Err(err) => return Err(err),
        }

        for endpoint in &fixture.endpoints {
            match engine
                .register(
                    &fixture.owner,
                    &fixture.group.slug,
                    &endpoint.path,
                    endpoint.method,
                    endpoint.document.clone(),
                )
                .await
            {
                Ok(_) => applied.endpoints += 1,
                Err(Error::Conflict(_)) => {
                    tracing::warn!(
                        owner = %fixture.owner,
                        slug = %fixture.group.slug,
                        path = %endpoint.path,
                        "fixture endpoint already present; skipping"
                    );
                    applied.skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
    tracing::info!(
        groups = applied.groups,
        endpoints = applied.endpoints,
        skipped = applied.skipped,
        "applied fixtures"
    );
    Ok(applied)
}
