//! OpenAPI document for the `/api/v1` surface, built from the same resource definitions the
//! router uses.

use crate::model::{Department, Employee, EmployeeReview, Project, Resource, Role};
use utoipa::openapi::info::InfoBuilder;
use utoipa::openapi::path::{HttpMethod, OperationBuilder, ParameterBuilder, ParameterIn, PathItem, PathsBuilder};
use utoipa::openapi::response::ResponseBuilder;
use utoipa::openapi::server::Server;
use utoipa::openapi::{OpenApi, OpenApiBuilder, Required};

struct ResourceDoc {
    path: &'static str,
    tag: &'static str,
    natural_key: &'static [&'static str],
    keyed_mutations: bool,
}

fn resource_doc<R: Resource>(tag: &'static str, keyed_mutations: bool) -> ResourceDoc {
    ResourceDoc {
        path: R::COLLECTION,
        tag,
        natural_key: R::NATURAL_KEY,
        keyed_mutations,
    }
}

fn operation(tag: &str, summary: String, responses: &[(&str, &str)], query: &[&str]) -> OperationBuilder {
    let mut op = OperationBuilder::new().tag(tag).summary(Some(summary));
    for name in query {
        op = op.parameter(
            ParameterBuilder::new()
                .name(*name)
                .parameter_in(ParameterIn::Query)
                .required(Required::False)
                .build(),
        );
    }
    for (code, description) in responses {
        op = op.response(*code, ResponseBuilder::new().description(*description).build());
    }
    op
}

fn id_parameter(op: OperationBuilder) -> OperationBuilder {
    op.parameter(
        ParameterBuilder::new()
            .name("id")
            .parameter_in(ParameterIn::Path)
            .required(Required::True)
            .build(),
    )
}

pub fn openapi() -> OpenApi {
    let resources = [
        resource_doc::<Department>("Departments", true),
        resource_doc::<Employee>("Employees", true),
        resource_doc::<Role>("Roles", true),
        resource_doc::<Project>("Projects", true),
        resource_doc::<EmployeeReview>("Employees Reviews", false),
    ];

    let mut paths = PathsBuilder::new().path(
        "/status",
        PathItem::new(
            HttpMethod::Get,
            operation("App", "Store connection status".into(), &[("200", "OK"), ("500", "store unavailable")], &[])
                .build(),
        ),
    );

    for r in &resources {
        let collection = format!("/{}", r.path);
        let item = format!("/{}/{{id}}", r.path);
        let read_codes: &[(&str, &str)] = &[("200", "OK"), ("404", "Not Found"), ("500", "Internal Server Error")];
        let write_codes: &[(&str, &str)] = &[
            ("200", "OK"),
            ("403", "validation failed"),
            ("404", "Not Found"),
            ("500", "Internal Server Error"),
        ];

        paths = paths
            .path(
                &collection,
                PathItem::new(
                    HttpMethod::Get,
                    operation(r.tag, format!("List {} or find one by natural key", r.path), read_codes, r.natural_key)
                        .build(),
                ),
            )
            .path(
                &collection,
                PathItem::new(
                    HttpMethod::Post,
                    operation(
                        r.tag,
                        format!("Create one of {}", r.path),
                        &[("201", "Created"), ("400", "malformed body"), ("403", "data missing or duplicate")],
                        &[],
                    )
                    .build(),
                ),
            )
            .path(
                &item,
                PathItem::new(
                    HttpMethod::Get,
                    id_parameter(operation(r.tag, format!("Get one of {} by id", r.path), read_codes, &[])).build(),
                ),
            )
            .path(
                &item,
                PathItem::new(
                    HttpMethod::Put,
                    id_parameter(operation(r.tag, format!("Update one of {} by id", r.path), write_codes, &[])).build(),
                ),
            )
            .path(
                &item,
                PathItem::new(
                    HttpMethod::Delete,
                    id_parameter(operation(r.tag, format!("Delete one of {} by id", r.path), read_codes, &[])).build(),
                ),
            );

        if r.keyed_mutations {
            paths = paths
                .path(
                    &collection,
                    PathItem::new(
                        HttpMethod::Put,
                        operation(r.tag, format!("Update one of {} by natural key", r.path), write_codes, r.natural_key)
                            .build(),
                    ),
                )
                .path(
                    &collection,
                    PathItem::new(
                        HttpMethod::Delete,
                        operation(r.tag, format!("Delete one of {} by natural key", r.path), read_codes, r.natural_key)
                            .build(),
                    ),
                );
        }
    }

    paths = paths.path(
        "/employees/{id}/reviews",
        PathItem::new(
            HttpMethod::Get,
            id_parameter(operation(
                "Employees",
                "Reviews of one employee".into(),
                &[("200", "OK"), ("403", "employee id is not valid")],
                &[],
            ))
            .build(),
        ),
    );

    OpenApiBuilder::new()
        .info(
            InfoBuilder::new()
                .title("Employee Management API")
                .version(env!("CARGO_PKG_VERSION"))
                .description(Some("Departments, employees, roles, projects and employee reviews"))
                .build(),
        )
        .servers(Some(vec![Server::new("/api/v1")]))
        .paths(paths.build())
        .build()
}
