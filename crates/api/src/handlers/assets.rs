//! Handlers and endpoint declarations for the `/assets` resource.
//!
//! Each handler receives its input through [`Validated`], so authentication,
//! the permission check and schema validation have already happened by the
//! time the handler body runs.

use std::sync::LazyLock;

use assets_core::asset::{asset_input_schema, asset_schema, Asset, AssetFilter, AssetInput, ASSET_ENTITY};
use assets_core::error::CoreError;
use assets_core::permissions::Permission;
use assets_core::schema::{ObjectSchema, Schema};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::endpoint::{Endpoint, EndpointSpec, HttpMethod, ParamSpec, ResponseSpec};
use crate::error::AppResult;
use crate::middleware::validation::Validated;
use crate::state::AppState;

/// Page size used when `take` is not supplied.
pub const DEFAULT_TAKE: usize = 20;

/// Response header carrying the number of assets matching a list filter.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

const TAG: &str = "Assets";

/// Example id shown in the generated document.
const EXAMPLE_ASSET_ID: &str = "2c1f3b0a-6a5e-4d0b-9c6e-1f2a3b4c5d6e";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query string of `GET /assets`, after validation and coercion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListAssetsQuery {
    pub skip: usize,
    pub take: usize,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "hasSerial")]
    pub has_serial: Option<bool>,
}

impl Default for ListAssetsQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            take: DEFAULT_TAKE,
            name: None,
            has_serial: None,
        }
    }
}

impl ListAssetsQuery {
    pub fn filter(&self) -> AssetFilter {
        AssetFilter {
            name: self.name.clone(),
            has_serial: self.has_serial,
        }
    }
}

// ---------------------------------------------------------------------------
// Endpoint declarations
// ---------------------------------------------------------------------------

/// Path parameter shared by every single-asset route.
fn asset_id_param() -> ParamSpec {
    ParamSpec {
        name: "id",
        schema: Schema::string()
            .uuid()
            .description("The ID of the asset")
            .example(EXAMPLE_ASSET_ID),
        component: Some("AssetId"),
    }
}

fn list_assets_query_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field(
            "skip",
            Schema::integer()
                .coerce()
                .minimum(0)
                .default_value(0)
                .description("Pagination: skip n entries"),
        )
        .field(
            "take",
            Schema::integer()
                .coerce()
                .positive()
                .default_value(DEFAULT_TAKE)
                .description("Pagination: take n entries"),
        )
        .field(
            "name",
            Schema::string()
                .optional()
                .description("Filter assets by name"),
        )
        .field(
            "hasSerial",
            Schema::boolean()
                .coerce()
                .optional()
                .description("Filter assets that have a serial number or not"),
        )
        .strict()
}

/// `POST /assets`
pub struct CreateAsset;

impl Endpoint for CreateAsset {
    type Body = AssetInput;
    type Query = ();

    fn spec() -> &'static EndpointSpec {
        static SPEC: LazyLock<EndpointSpec> = LazyLock::new(|| EndpointSpec {
            method: HttpMethod::Post,
            route: "/assets",
            tag: TAG,
            summary: "Create a new asset",
            description: "Creates a new asset in the database",
            params: Vec::new(),
            query: None,
            body: Some(asset_input_schema()),
            responses: vec![(
                201,
                ResponseSpec::new("Asset was successfully created").schema(asset_schema()),
            )],
            required_permissions: vec![Permission::CreateAsset],
        });
        &SPEC
    }
}

/// `PUT /assets/{id}`
///
/// Updating is guarded by the create permission; there is no separate
/// update permission.
pub struct UpdateAsset;

impl Endpoint for UpdateAsset {
    type Body = AssetInput;
    type Query = ();

    fn spec() -> &'static EndpointSpec {
        static SPEC: LazyLock<EndpointSpec> = LazyLock::new(|| EndpointSpec {
            method: HttpMethod::Put,
            route: "/assets/{id}",
            tag: TAG,
            summary: "Update an existing asset",
            description: "Updates an existing asset in the database",
            params: vec![asset_id_param()],
            query: None,
            body: Some(asset_input_schema()),
            responses: vec![(
                200,
                ResponseSpec::new("Asset was successfully updated").schema(asset_schema()),
            )],
            required_permissions: vec![Permission::CreateAsset],
        });
        &SPEC
    }
}

/// `GET /assets`
pub struct ListAssets;

impl Endpoint for ListAssets {
    type Body = ();
    type Query = ListAssetsQuery;

    fn spec() -> &'static EndpointSpec {
        static SPEC: LazyLock<EndpointSpec> = LazyLock::new(|| EndpointSpec {
            method: HttpMethod::Get,
            route: "/assets",
            tag: TAG,
            summary: "List assets",
            description: "Lists assets with pagination and filter options",
            params: Vec::new(),
            query: Some(list_assets_query_schema()),
            body: None,
            responses: vec![(
                200,
                ResponseSpec::new("An array of assets")
                    .schema(Schema::array(asset_schema()))
                    .header(
                        TOTAL_COUNT_HEADER,
                        "The total number of assets that match the filter",
                        Schema::integer(),
                    ),
            )],
            required_permissions: vec![Permission::ReadAsset],
        });
        &SPEC
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/assets
///
/// Create an asset and return it with 201 Created.
pub async fn create(
    State(state): State<AppState>,
    request: Validated<CreateAsset>,
) -> AppResult<(StatusCode, Json<Asset>)> {
    let asset = state.store.create(request.body).await;

    tracing::info!(
        user = %request.user.username,
        asset_id = %asset.id,
        name = %asset.name,
        "Asset created"
    );

    Ok((StatusCode::CREATED, Json(asset)))
}

/// PUT /api/assets/{id}
///
/// Replace the name and serial of an existing asset. Ids that are not UUIDs
/// cannot exist and are reported as not found.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Validated<UpdateAsset>,
) -> AppResult<Json<Asset>> {
    let asset_id = Uuid::parse_str(&id).map_err(|_| CoreError::NotFound {
        entity: ASSET_ENTITY,
        id: id.clone(),
    })?;

    let asset = state.store.update(asset_id, request.body).await?;

    tracing::info!(
        user = %request.user.username,
        asset_id = %asset.id,
        name = %asset.name,
        "Asset updated"
    );

    Ok(Json(asset))
}

/// GET /api/assets
///
/// List one page of assets matching the filter. The total number of matches
/// is returned in the `x-total-count` header.
pub async fn list(
    State(state): State<AppState>,
    request: Validated<ListAssets>,
) -> AppResult<([(&'static str, String); 1], Json<Vec<Asset>>)> {
    let query = request.query;
    let filter = query.filter();

    let (assets, total) = tokio::join!(
        state.store.list(query.skip, query.take, &filter),
        state.store.count(&filter),
    );

    tracing::debug!(
        user = %request.user.username,
        skip = query.skip,
        take = query.take,
        returned = assets.len(),
        total,
        "Listed assets"
    );

    Ok(([(TOTAL_COUNT_HEADER, total.to_string())], Json(assets)))
}
