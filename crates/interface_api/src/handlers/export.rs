//! Backup export

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Extension, Json,
};

use infra_db::BackupService;

use crate::auth::CurrentUser;
use crate::{error::ApiError, AppState};

/// Downloads every row the user owns as one JSON document
pub async fn export_backup(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    let document = BackupService::new(state.pool.clone())
        .export_user(user)
        .await?;

    let disposition = format!(
        "attachment; filename=\"finance-hub-backup-{}.json\"",
        state.today()
    );
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(document)))
}
