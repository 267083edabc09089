//! Course and tutor route handlers

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{level_badge, paginate, CourseFilter, Page, TutorFilter, COURSES_PER_PAGE};
use crate::error::Result;
use crate::models::{Course, Tutor};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/courses", get(list_courses))
        .route("/api/courses/:id", get(course_detail))
        .route("/api/tutors", get(list_tutors))
        .route("/api/tutors/:id", get(tutor_detail))
}

/// Query parameters for the course listing
#[derive(Debug, Deserialize)]
pub struct CourseListQuery {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default = "default_page")]
    pub page: usize,
}

impl CourseListQuery {
    fn filter(&self) -> CourseFilter {
        CourseFilter {
            name: self.name.clone(),
            level: self.level.clone(),
        }
    }
}

fn default_page() -> usize {
    1
}

/// Course with its display badge
#[derive(Debug, Clone, Serialize)]
pub struct CourseView {
    #[serde(flatten)]
    pub course: Course,
    pub level_badge: &'static str,
    pub total_hours: Option<u32>,
}

impl From<&Course> for CourseView {
    fn from(course: &Course) -> Self {
        Self {
            level_badge: level_badge(&course.level),
            total_hours: course.total_hours(),
            course: course.clone(),
        }
    }
}

/// Tutor with its display badge
#[derive(Debug, Clone, Serialize)]
pub struct TutorView {
    #[serde(flatten)]
    pub tutor: Tutor,
    pub level_badge: &'static str,
}

impl From<&Tutor> for TutorView {
    fn from(tutor: &Tutor) -> Self {
        Self {
            level_badge: level_badge(&tutor.language_level),
            tutor: tutor.clone(),
        }
    }
}

/// Course listing, filtered and paginated
pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseListQuery>,
) -> Result<Json<Page<CourseView>>> {
    let courses = state.cache.load_courses(&state.api).await?;
    let views: Vec<CourseView> = query
        .filter()
        .apply(&courses)
        .iter()
        .map(CourseView::from)
        .collect();

    Ok(Json(paginate(&views, query.page, COURSES_PER_PAGE)))
}

/// Course detail
pub async fn course_detail(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<CourseView>> {
    let course = state.cache.load_course(&state.api, id).await?;
    Ok(Json(CourseView::from(course.as_ref())))
}

/// Tutor search results (unpaginated)
pub async fn list_tutors(
    State(state): State<AppState>,
    Query(filter): Query<TutorFilter>,
) -> Result<Json<Vec<TutorView>>> {
    let tutors = state.cache.load_tutors(&state.api).await?;
    Ok(Json(filter.apply(&tutors).iter().map(TutorView::from).collect()))
}

/// Tutor detail
pub async fn tutor_detail(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TutorView>> {
    let tutor = state.cache.load_tutor(&state.api, id).await?;
    Ok(Json(TutorView::from(tutor.as_ref())))
}
