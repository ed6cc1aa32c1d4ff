use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use meal_core::source::{
    RecommendationRequest, RecommendationSource, SourceConfig, SourceError, SourceFactory,
};
use meal_core::Recommendation;
use tracing::debug;

use crate::loader::{CatalogError, CatalogLoader, INGREDIENTS_FILE, NUTRITION_FILE, RECIPES_FILE};

/// How many ingredients and recipes a result shows.
pub const TOP_N: usize = 3;

/// Serves recommendations from a catalog directory.
///
/// The files are read on every request, so edits to the catalog show up on
/// the next submission.
#[derive(Debug, Clone)]
pub struct CsvCatalogSource {
    dir: PathBuf,
    limit: usize,
}

impl CsvCatalogSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            limit: TOP_N,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

async fn read_catalog_file(path: PathBuf) -> Result<Vec<u8>, CatalogError> {
    tokio::fs::read(&path)
        .await
        .map_err(|source| CatalogError::Io { path, source })
}

async fn read_optional_catalog_file(path: PathBuf) -> Result<Option<Vec<u8>>, CatalogError> {
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(source) if source.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(CatalogError::Io { path, source }),
    }
}

fn to_source_error(err: CatalogError) -> SourceError {
    match err {
        CatalogError::Io { .. } => SourceError::Unavailable(err.to_string()),
        other => SourceError::InvalidData(other.to_string()),
    }
}

#[async_trait]
impl RecommendationSource for CsvCatalogSource {
    fn name(&self) -> &'static str {
        "csv"
    }

    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, SourceError> {
        debug!(dir = %self.dir.display(), budget = %request.budget, "reading catalog");
        let ingredients = read_catalog_file(self.dir.join(INGREDIENTS_FILE))
            .await
            .map_err(to_source_error)?;
        let recipes = read_catalog_file(self.dir.join(RECIPES_FILE))
            .await
            .map_err(to_source_error)?;

        let nutrition = read_optional_catalog_file(self.dir.join(NUTRITION_FILE))
            .await
            .map_err(to_source_error)?;

        let catalog = CatalogLoader::parse(&ingredients, &recipes, nutrition.as_deref())
            .map_err(to_source_error)?;
        Ok(catalog.top(self.limit))
    }
}

/// Registers [`CsvCatalogSource`] under the `csv` backend name. The config
/// `location` is the catalog directory, so a location alone selects it.
pub struct CsvSourceFactory;

#[async_trait]
impl SourceFactory for CsvSourceFactory {
    fn backend_name(&self) -> &'static str {
        "csv"
    }

    fn reads_location(&self) -> bool {
        true
    }

    async fn create(
        &self,
        config: &SourceConfig,
    ) -> Result<Arc<dyn RecommendationSource>, SourceError> {
        if config.location.trim().is_empty() {
            return Err(SourceError::Configuration(
                "csv backend needs a catalog directory".to_string(),
            ));
        }
        let dir = PathBuf::from(config.location.trim());
        let is_dir = tokio::fs::metadata(&dir)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(SourceError::Configuration(format!(
                "catalog directory '{}' does not exist",
                dir.display()
            )));
        }
        Ok(Arc::new(CsvCatalogSource::new(dir)))
    }
}
