//! OpenAPI descriptions of the generic routes.
//!
//! Generic handlers can't carry `#[utoipa::path]` attributes, so each
//! controller describes its operations with utoipa's builders and the
//! startup merges them into one document.

use std::collections::BTreeMap;

use utoipa::openapi::path::{
    Operation, OperationBuilder, ParameterBuilder, ParameterIn, PathItem, PathItemType,
};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityRequirement, SecurityScheme};
use utoipa::openapi::{
    ArrayBuilder, Components, ContactBuilder, ContentBuilder, InfoBuilder, ObjectBuilder,
    OpenApi, OpenApiBuilder, Paths, Ref, RefOr, Required, ResponseBuilder, Schema, SchemaType,
    Tag,
};
use utoipa::ToSchema;

use crate::config::BEARER_SECURITY_SCHEME;
use crate::types::PaginationMeta;

const JSON: &str = "application/json";

/// Operations and schemas contributed by one controller.
///
/// Paths are relative to the controller's mount point (`/` or `/{id}`).
#[derive(Clone, Default)]
pub struct ControllerDocs {
    pub tag: String,
    pub paths: BTreeMap<String, PathItem>,
    pub schemas: BTreeMap<String, RefOr<Schema>>,
}

impl ControllerDocs {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Register `T`'s schema and return its component name.
    pub fn schema<T: ToSchema<'static>>(&mut self) -> String {
        let (name, schema) = T::schema();
        self.schemas.insert(name.to_string(), schema);
        name.to_string()
    }

    /// Add an operation under a relative path.
    pub fn operation(&mut self, path: &str, method: PathItemType, operation: Operation) {
        self.paths
            .entry(path.to_string())
            .or_default()
            .operations
            .insert(method, operation);
    }

    /// `GET /` and `GET /{id}` for view `V`.
    pub fn query_operations<V: ToSchema<'static>>(&mut self) {
        let view = self.schema::<V>();
        let meta = self.schema::<PaginationMeta>();
        let tag = self.tag.clone();

        let page_schema = ObjectBuilder::new()
            .property("data", ArrayBuilder::new().items(Ref::from_schema_name(&view)))
            .required("data")
            .property("meta", Ref::from_schema_name(&meta))
            .required("meta");

        self.operation(
            "/",
            PathItemType::Get,
            OperationBuilder::new()
                .tag(&tag)
                .summary(Some(format!("List {}", tag)))
                .operation_id(Some(format!("list_{}", slug(&tag))))
                .parameter(query_param("page", "1-based page number"))
                .parameter(query_param("per_page", "Page size (max 100)"))
                .response("200", json_response("Page of records", page_schema))
                .build(),
        );

        self.operation(
            "/{id}",
            PathItemType::Get,
            OperationBuilder::new()
                .tag(&tag)
                .summary(Some(format!("Get {} by id", tag)))
                .operation_id(Some(format!("get_{}", slug(&tag))))
                .parameter(id_param())
                .response("200", json_response("Record found", Ref::from_schema_name(&view)))
                .response("404", plain_response("Record not found"))
                .build(),
        );
    }

    /// `POST /`, `PUT /{id}` and `DELETE /{id}`.
    pub fn command_operations<V, C, U>(&mut self)
    where
        V: ToSchema<'static>,
        C: ToSchema<'static>,
        U: ToSchema<'static>,
    {
        let view = self.schema::<V>();
        let create = self.schema::<C>();
        let update = self.schema::<U>();
        let tag = self.tag.clone();

        self.operation(
            "/",
            PathItemType::Post,
            OperationBuilder::new()
                .tag(&tag)
                .summary(Some(format!("Create {}", tag)))
                .operation_id(Some(format!("create_{}", slug(&tag))))
                .request_body(Some(json_body(&create)))
                .response("201", json_response("Record created", Ref::from_schema_name(&view)))
                .response("400", plain_response("Validation error"))
                .response("409", plain_response("Integrity constraint violated"))
                .build(),
        );

        self.operation(
            "/{id}",
            PathItemType::Put,
            OperationBuilder::new()
                .tag(&tag)
                .summary(Some(format!("Update {}", tag)))
                .operation_id(Some(format!("update_{}", slug(&tag))))
                .parameter(id_param())
                .request_body(Some(json_body(&update)))
                .response("200", json_response("Record updated", Ref::from_schema_name(&view)))
                .response("400", plain_response("Validation error"))
                .response("404", plain_response("Record not found"))
                .build(),
        );

        self.operation(
            "/{id}",
            PathItemType::Delete,
            OperationBuilder::new()
                .tag(&tag)
                .summary(Some(format!("Delete {}", tag)))
                .operation_id(Some(format!("delete_{}", slug(&tag))))
                .parameter(id_param())
                .response("204", plain_response("Record deleted"))
                .response("404", plain_response("Record not found"))
                .response("409", plain_response("Record is still referenced"))
                .build(),
        );
    }

    /// Require the bearer scheme on every operation.
    pub(crate) fn secure(&mut self) {
        for item in self.paths.values_mut() {
            for operation in item.operations.values_mut() {
                operation.security = Some(vec![SecurityRequirement::new(
                    BEARER_SECURITY_SCHEME,
                    Vec::<String>::new(),
                )]);
                operation.responses.responses.insert(
                    "401".to_string(),
                    RefOr::T(plain_response("Missing or invalid bearer token")),
                );
            }
        }
    }
}

/// Document-level metadata.
#[derive(Debug, Clone)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
    pub description: String,
    pub contact_name: String,
    pub contact_url: Option<String>,
}

impl Default for ApiInfo {
    fn default() -> Self {
        Self {
            title: "API Kit".to_string(),
            version: "v1".to_string(),
            description: "CRUD REST API built on api-kit".to_string(),
            contact_name: "API Support".to_string(),
            contact_url: None,
        }
    }
}

/// Merge controller docs mounted at their paths into one document.
pub(crate) fn build_document<'a, I>(info: &ApiInfo, controllers: I, secured: bool) -> OpenApi
where
    I: IntoIterator<Item = (&'a str, &'a ControllerDocs)>,
{
    let mut paths = Paths::new();
    let mut components = Components::new();
    let mut tags = Vec::new();

    for (mount, docs) in controllers {
        for (relative, item) in &docs.paths {
            paths.paths.insert(join_path(mount, relative), item.clone());
        }
        for (name, schema) in &docs.schemas {
            components.schemas.insert(name.clone(), schema.clone());
        }
        tags.push(Tag::new(docs.tag.clone()));
    }

    if secured {
        components.add_security_scheme(
            BEARER_SECURITY_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Please enter a JWT issued for this API"))
                    .build(),
            ),
        );
    }

    let contact = ContactBuilder::new()
        .name(Some(info.contact_name.clone()))
        .url(info.contact_url.clone())
        .build();

    OpenApiBuilder::new()
        .info(
            InfoBuilder::new()
                .title(info.title.clone())
                .version(info.version.clone())
                .description(Some(info.description.clone()))
                .terms_of_service(Some("None"))
                .contact(Some(contact))
                .build(),
        )
        .paths(paths)
        .components(Some(components))
        .tags(Some(tags))
        .build()
}

fn join_path(mount: &str, relative: &str) -> String {
    let mount = mount.trim_end_matches('/');
    if relative == "/" {
        if mount.is_empty() {
            "/".to_string()
        } else {
            mount.to_string()
        }
    } else {
        format!("{}{}", mount, relative)
    }
}

fn slug(tag: &str) -> String {
    tag.to_lowercase().replace([' ', '-'], "_")
}

fn id_param() -> utoipa::openapi::path::Parameter {
    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .description(Some("Record identifier"))
        .schema(Some(ObjectBuilder::new().schema_type(SchemaType::String)))
        .build()
}

fn query_param(name: &str, description: &str) -> utoipa::openapi::path::Parameter {
    ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Query)
        .required(Required::False)
        .description(Some(description))
        .schema(Some(ObjectBuilder::new().schema_type(SchemaType::Integer)))
        .build()
}

fn json_body(schema_name: &str) -> utoipa::openapi::request_body::RequestBody {
    RequestBodyBuilder::new()
        .content(
            JSON,
            ContentBuilder::new()
                .schema(Ref::from_schema_name(schema_name))
                .build(),
        )
        .required(Some(Required::True))
        .build()
}

fn json_response<S: Into<RefOr<Schema>>>(
    description: &str,
    schema: S,
) -> utoipa::openapi::Response {
    ResponseBuilder::new()
        .description(description)
        .content(JSON, ContentBuilder::new().schema(schema).build())
        .build()
}

fn plain_response(description: &str) -> utoipa::openapi::Response {
    ResponseBuilder::new().description(description).build()
}
