//! Catalogue doubles and fixtures shared by the CLI tests.

use std::cell::RefCell;
use std::sync::Arc;

use camino::Utf8PathBuf;
use chrono::{TimeZone, Utc};
use soundmap_core::test_support::MemoryCatalogue;
use soundmap_core::{
    CatalogueError, GeoPoint, Location, Rating, RatingValue, Sample, SampleCatalogue,
    SampleLocation,
};
use tempfile::TempDir;

use crate::CliError;
use crate::catalogue::CatalogueBuilder;

pub(super) const GULLS: u64 = 10;

/// Hands one shared in-memory catalogue to every command invocation.
pub(super) struct SharedCatalogue(Arc<MemoryCatalogue>);

impl SampleCatalogue for SharedCatalogue {
    fn locations(&self) -> Result<Vec<Location>, CatalogueError> {
        self.0.locations()
    }

    fn samples(&self) -> Result<Vec<Sample>, CatalogueError> {
        self.0.samples()
    }

    fn sample_locations(&self) -> Result<Vec<SampleLocation>, CatalogueError> {
        self.0.sample_locations()
    }

    fn ratings(&self, sample_id: u64) -> Result<Vec<Rating>, CatalogueError> {
        self.0.ratings(sample_id)
    }

    fn submit_rating(&self, rating: &Rating) -> Result<(), CatalogueError> {
        self.0.submit_rating(rating)
    }
}

/// Records the endpoints it was asked for and serves the shared catalogue.
#[derive(Debug)]
pub(super) struct StubCatalogueBuilder {
    pub(super) catalogue: Arc<MemoryCatalogue>,
    pub(super) endpoints: RefCell<Vec<(String, Option<String>)>>,
}

impl StubCatalogueBuilder {
    pub(super) fn new(catalogue: MemoryCatalogue) -> Self {
        Self {
            catalogue: Arc::new(catalogue),
            endpoints: RefCell::new(Vec::new()),
        }
    }
}

impl CatalogueBuilder for StubCatalogueBuilder {
    fn build(
        &self,
        base_url: &str,
        api_key: Option<&str>,
    ) -> Result<Box<dyn SampleCatalogue>, CliError> {
        self.endpoints
            .borrow_mut()
            .push((base_url.to_owned(), api_key.map(str::to_owned)));
        Ok(Box::new(SharedCatalogue(Arc::clone(&self.catalogue))))
    }
}

fn point(latitude: f64, longitude: f64) -> GeoPoint {
    GeoPoint::new(latitude, longitude).expect("valid point")
}

fn sample(id: u64, name: &str, day: u32) -> Sample {
    Sample {
        id,
        name: name.to_owned(),
        created_at: Utc
            .with_ymd_and_hms(2024, 5, day, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
        payload: format!("{}.mp3", name.to_lowercase()),
    }
}

fn rating(sample_id: u64, raw: u8) -> Rating {
    Rating::new(sample_id, RatingValue::new(raw).expect("valid rating"))
}

/// Gulls and Horns at the harbour, Trains at the station; the gulls are
/// rated 4 and 5.
pub(super) fn harbour_catalogue() -> MemoryCatalogue {
    MemoryCatalogue::default()
        .with_location(Location::new(1, "Harbour", point(54.3233, 10.1228)))
        .with_location(Location::new(2, "Station", point(54.3148, 10.1319)))
        .with_sample(sample(GULLS, "Gulls", 1))
        .with_sample(sample(11, "Horns", 2))
        .with_sample(sample(12, "Trains", 3))
        .with_link(SampleLocation {
            sample_id: GULLS,
            location_id: 1,
        })
        .with_link(SampleLocation {
            sample_id: 11,
            location_id: 1,
        })
        .with_link(SampleLocation {
            sample_id: 12,
            location_id: 2,
        })
        .with_rating(rating(GULLS, 4))
        .with_rating(rating(GULLS, 5))
}

/// A temporary directory holding the path of a not-yet-created store.
pub(super) struct StoreDir {
    _dir: TempDir,
    pub(super) path: Utf8PathBuf,
}

impl StoreDir {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        Self {
            _dir: dir,
            path: root.join("soundmap.json"),
        }
    }
}
