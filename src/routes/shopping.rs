use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use famplan_shared::shopping::{ShoppingList, ShoppingListItem};
use famplan_shopping::{
    CreateListInput, GenerateInput, PartialResolutionWarning, ShoppingListProposal,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::routes::AppState;

/// Proposal as returned to clients, with the partial-resolution warning
/// spelled out next to the skip reports.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(flatten)]
    pub proposal: ShoppingListProposal,
    pub warning: Option<PartialResolutionWarning>,
}

impl From<ShoppingListProposal> for GenerateResponse {
    fn from(proposal: ShoppingListProposal) -> Self {
        Self {
            warning: proposal.warning(),
            proposal,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateIntoResponse {
    #[serde(flatten)]
    pub generated: GenerateResponse,
    pub items: Vec<ShoppingListItem>,
}

#[derive(Serialize)]
pub struct ItemsResponse {
    pub items: Vec<ShoppingListItem>,
}

#[derive(Deserialize)]
pub struct CreateListBody {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateIntoBody {
    pub meal_ids: Vec<String>,
}

/// POST /api/shopping-lists/generate
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateInput>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(input) = payload?;
    let proposal = state.command.generate(input).await?;

    Ok(Json(proposal.into()))
}

/// POST /api/families/{family_id}/shopping-lists
pub async fn create_list(
    State(state): State<AppState>,
    Path(family_id): Path<String>,
    payload: Result<Json<CreateListBody>, JsonRejection>,
) -> Result<(StatusCode, Json<ShoppingList>), AppError> {
    let Json(body) = payload?;
    let list = state
        .command
        .create_list(CreateListInput {
            family_id,
            name: body.name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(list)))
}

/// POST /api/families/{family_id}/shopping-lists/{list_id}/generate
pub async fn generate_into(
    State(state): State<AppState>,
    Path((family_id, list_id)): Path<(String, String)>,
    payload: Result<Json<GenerateIntoBody>, JsonRejection>,
) -> Result<Json<GenerateIntoResponse>, AppError> {
    let Json(body) = payload?;
    let (proposal, items) = state
        .command
        .generate_into(&family_id, &list_id, body.meal_ids)
        .await?;

    Ok(Json(GenerateIntoResponse {
        generated: proposal.into(),
        items,
    }))
}

/// GET /api/families/{family_id}/shopping-lists/{list_id}/items
pub async fn items(
    State(state): State<AppState>,
    Path((family_id, list_id)): Path<(String, String)>,
) -> Result<Json<ItemsResponse>, AppError> {
    let items = state.command.items(&family_id, &list_id).await?;

    Ok(Json(ItemsResponse { items }))
}

/// POST /api/families/{family_id}/shopping-lists/{list_id}/items/{item_id}/toggle
pub async fn toggle(
    State(state): State<AppState>,
    Path((family_id, list_id, item_id)): Path<(String, String, String)>,
) -> Result<Json<ShoppingListItem>, AppError> {
    let item = state
        .command
        .toggle(&family_id, &list_id, &item_id)
        .await?;

    Ok(Json(item))
}

/// POST /api/families/{family_id}/shopping-lists/{list_id}/reset
pub async fn reset(
    State(state): State<AppState>,
    Path((family_id, list_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.command.reset(&family_id, &list_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
