//! In-memory catalog caching using moka
//!
//! Courses and tutors change rarely, so lists and single records are cached
//! with a shared TTL. Orders are always read from the API.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::api::{ApiError, SchoolApiClient};
use crate::models::{Course, Tutor};

const LIST_KEY: &str = "all";

/// Application cache holding catalog records
#[derive(Clone)]
pub struct CatalogCache {
    /// Full course list
    pub course_list: Cache<&'static str, Arc<Vec<Course>>>,
    /// Full tutor list
    pub tutor_list: Cache<&'static str, Arc<Vec<Tutor>>>,
    /// Courses by id
    pub courses: Cache<u64, Arc<Course>>,
    /// Tutors by id
    pub tutors: Cache<u64, Arc<Tutor>>,
}

impl CatalogCache {
    /// Create a new cache instance with the given TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            course_list: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
            tutor_list: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
            courses: Cache::builder().max_capacity(1_000).time_to_live(ttl).build(),
            tutors: Cache::builder().max_capacity(1_000).time_to_live(ttl).build(),
        }
    }

    /// Store the full course list and index each course by id
    pub async fn insert_courses(&self, courses: Vec<Course>) -> Arc<Vec<Course>> {
        for course in &courses {
            self.courses.insert(course.id, Arc::new(course.clone())).await;
        }
        let courses = Arc::new(courses);
        self.course_list.insert(LIST_KEY, courses.clone()).await;
        courses
    }

    /// Store the full tutor list and index each tutor by id
    pub async fn insert_tutors(&self, tutors: Vec<Tutor>) -> Arc<Vec<Tutor>> {
        for tutor in &tutors {
            self.tutors.insert(tutor.id, Arc::new(tutor.clone())).await;
        }
        let tutors = Arc::new(tutors);
        self.tutor_list.insert(LIST_KEY, tutors.clone()).await;
        tutors
    }

    /// All courses, loading them from the API on a miss
    pub async fn load_courses(&self, api: &SchoolApiClient) -> Result<Arc<Vec<Course>>, ApiError> {
        if let Some(cached) = self.course_list.get(&LIST_KEY).await {
            debug!("Cache HIT for course list");
            return Ok(cached);
        }
        debug!("Cache MISS for course list");
        let courses = api.get_courses().await?;
        Ok(self.insert_courses(courses).await)
    }

    /// All tutors, loading them from the API on a miss
    pub async fn load_tutors(&self, api: &SchoolApiClient) -> Result<Arc<Vec<Tutor>>, ApiError> {
        if let Some(cached) = self.tutor_list.get(&LIST_KEY).await {
            debug!("Cache HIT for tutor list");
            return Ok(cached);
        }
        debug!("Cache MISS for tutor list");
        let tutors = api.get_tutors().await?;
        Ok(self.insert_tutors(tutors).await)
    }

    /// One course, loading it from the API on a miss
    pub async fn load_course(&self, api: &SchoolApiClient, id: u64) -> Result<Arc<Course>, ApiError> {
        if let Some(cached) = self.courses.get(&id).await {
            debug!("Cache HIT for course {}", id);
            return Ok(cached);
        }
        debug!("Cache MISS for course {}", id);
        let course = Arc::new(api.get_course(id).await?);
        self.courses.insert(id, course.clone()).await;
        Ok(course)
    }

    /// One tutor, loading it from the API on a miss
    pub async fn load_tutor(&self, api: &SchoolApiClient, id: u64) -> Result<Arc<Tutor>, ApiError> {
        if let Some(cached) = self.tutors.get(&id).await {
            debug!("Cache HIT for tutor {}", id);
            return Ok(cached);
        }
        debug!("Cache MISS for tutor {}", id);
        let tutor = Arc::new(api.get_tutor(id).await?);
        self.tutors.insert(id, tutor.clone()).await;
        Ok(tutor)
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            courses_size: self.courses.entry_count(),
            tutors_size: self.tutors.entry_count(),
            course_list_cached: self.course_list.contains_key(&LIST_KEY),
            tutor_list_cached: self.tutor_list.contains_key(&LIST_KEY),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.course_list.invalidate_all();
        self.tutor_list.invalidate_all();
        self.courses.invalidate_all();
        self.tutors.invalidate_all();
        info!("All catalog caches invalidated");
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub courses_size: u64,
    pub tutors_size: u64,
    pub course_list_cached: bool,
    pub tutor_list_cached: bool,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes it every `period`.
pub async fn start_cache_warmer(cache: CatalogCache, api: SchoolApiClient, period: Duration) {
    let mut interval = interval(period.max(Duration::from_secs(1)));
    loop {
        // First tick completes immediately
        interval.tick().await;
        warm_cache(&cache, &api).await;
    }
}

/// Reload both catalog lists from the API
async fn warm_cache(cache: &CatalogCache, api: &SchoolApiClient) {
    info!("Starting catalog cache warm-up...");

    match api.get_courses().await {
        Ok(courses) => {
            cache.insert_courses(courses).await;
        }
        Err(e) => warn!("Failed to warm course cache: {}", e),
    }

    match api.get_tutors().await {
        Ok(tutors) => {
            cache.insert_tutors(tutors).await;
        }
        Err(e) => warn!("Failed to warm tutor cache: {}", e),
    }

    cache.courses.run_pending_tasks().await;
    cache.tutors.run_pending_tasks().await;
    cache.course_list.run_pending_tasks().await;
    cache.tutor_list.run_pending_tasks().await;
    info!("Catalog cache warm-up complete. Stats: {:?}", cache.stats());
}
