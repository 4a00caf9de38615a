//! In-memory doubles for exercising code that needs a [`SampleCatalogue`].

use std::sync::{Mutex, PoisonError};

use crate::{CatalogueError, Location, Rating, Sample, SampleCatalogue, SampleLocation};

/// A [`SampleCatalogue`] backed by vectors.
///
/// Submitted ratings are appended to the rating list, so later reads see
/// them. A catalogue built with [`MemoryCatalogue::failing_with`] returns the
/// configured error from every call.
///
/// # Examples
/// ```
/// use soundmap_core::test_support::MemoryCatalogue;
/// use soundmap_core::{Rating, RatingValue, SampleCatalogue};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let catalogue = MemoryCatalogue::default();
/// catalogue.submit_rating(&Rating::new(3, RatingValue::new(5)?))?;
/// assert_eq!(catalogue.ratings(3)?.len(), 1);
/// assert_eq!(catalogue.submitted().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryCatalogue {
    locations: Vec<Location>,
    samples: Vec<Sample>,
    links: Vec<SampleLocation>,
    ratings: Mutex<Vec<Rating>>,
    submitted: Mutex<Vec<Rating>>,
    failure: Option<CatalogueError>,
    submit_failure: Option<CatalogueError>,
}

impl MemoryCatalogue {
    /// Add a location.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    /// Add a sample.
    #[must_use]
    pub fn with_sample(mut self, sample: Sample) -> Self {
        self.samples.push(sample);
        self
    }

    /// Add a sample-to-location association.
    #[must_use]
    pub fn with_link(mut self, link: SampleLocation) -> Self {
        self.links.push(link);
        self
    }

    /// Add a previously submitted rating.
    #[must_use]
    pub fn with_rating(self, rating: Rating) -> Self {
        lock(&self.ratings).push(rating);
        self
    }

    /// Fail every call with `error`.
    #[must_use]
    pub fn failing_with(mut self, error: CatalogueError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Fail only [`SampleCatalogue::submit_rating`] with `error`.
    #[must_use]
    pub fn failing_submissions_with(mut self, error: CatalogueError) -> Self {
        self.submit_failure = Some(error);
        self
    }

    /// Ratings accepted through [`SampleCatalogue::submit_rating`].
    #[must_use]
    pub fn submitted(&self) -> Vec<Rating> {
        lock(&self.submitted).clone()
    }

    fn check(&self) -> Result<(), CatalogueError> {
        self.failure.clone().map_or(Ok(()), Err)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SampleCatalogue for MemoryCatalogue {
    fn locations(&self) -> Result<Vec<Location>, CatalogueError> {
        self.check()?;
        Ok(self.locations.clone())
    }

    fn samples(&self) -> Result<Vec<Sample>, CatalogueError> {
        self.check()?;
        Ok(self.samples.clone())
    }

    fn sample_locations(&self) -> Result<Vec<SampleLocation>, CatalogueError> {
        self.check()?;
        Ok(self.links.clone())
    }

    fn ratings(&self, sample_id: u64) -> Result<Vec<Rating>, CatalogueError> {
        self.check()?;
        Ok(lock(&self.ratings)
            .iter()
            .filter(|rating| rating.sample_id == sample_id)
            .copied()
            .collect())
    }

    fn submit_rating(&self, rating: &Rating) -> Result<(), CatalogueError> {
        self.check()?;
        if let Some(error) = &self.submit_failure {
            return Err(error.clone());
        }
        lock(&self.ratings).push(*rating);
        lock(&self.submitted).push(*rating);
        Ok(())
    }
}
