//! Dashboard route: aggregate counts over documents and insights.

use axum::extract::Extension;
use axum::Json;
use serde::Serialize;

use insights::InsightCategory;

use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Default, Serialize)]
pub struct CategoryCounts {
    pub feedback: usize,
    pub suggestion: usize,
    pub market: usize,
    pub partner: usize,
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_documents: usize,
    pub total_insights: usize,
    pub insights_by_category: CategoryCounts,
}

/// Aggregate counts, derived by reduction over the fetched lists.
pub async fn dashboard_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<DashboardStats>, ApiError> {
    let owner = state.deps.owner_id;
    let total_documents = state.deps.store.count_documents(owner).await?;
    let insights = state.deps.store.list_insights(owner).await?;

    let mut by_category = CategoryCounts::default();
    for insight in &insights {
        match insight.category {
            InsightCategory::Feedback => by_category.feedback += 1,
            InsightCategory::Suggestion => by_category.suggestion += 1,
            InsightCategory::Market => by_category.market += 1,
            InsightCategory::Partner => by_category.partner += 1,
        }
    }

    Ok(Json(DashboardStats {
        total_documents,
        total_insights: insights.len(),
        insights_by_category: by_category,
    }))
}
