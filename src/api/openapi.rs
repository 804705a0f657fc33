//! Static OpenAPI description of the HTTP interface and the interactive
//! documentation page that renders it.

use serde_json::{json, Value};

pub const DOCS_PATH: &str = "/api-docs";
pub const DOCUMENT_PATH: &str = "/api-docs/openapi.json";

const SWAGGER_UI_VERSION: &str = "5";

/// Build the OpenAPI 3.0 document, advertising `server_url` as the base URL
pub fn document(server_url: &str) -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "API de Usuários",
            "version": "1.0.0",
            "description": "Uma API simples para gerenciamento de usuários."
        },
        "servers": [
            { "url": server_url, "description": "Servidor local" }
        ],
        "paths": {
            "/": welcome_path(),
            "/usuario": create_path(),
            "/usuario/{cpf}": lookup_path(),
            "/usuarios": list_path()
        },
        "components": { "schemas": schemas() }
    })
}

fn welcome_path() -> Value {
    json!({
        "get": {
            "summary": "Mensagem de boas-vindas",
            "description": "Retorna uma mensagem de boas-vindas para a API.",
            "responses": {
                "200": {
                    "description": "Mensagem de boas-vindas",
                    "content": {
                        "text/plain": {
                            "schema": { "type": "string", "example": "Bem-vindo à API de Usuários!" }
                        }
                    }
                }
            }
        }
    })
}

fn create_path() -> Value {
    let created = json!({
        "description": "Usuário adicionado com sucesso",
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": {
                        "message": { "type": "string" },
                        "usuario": schema_ref("Usuario")
                    }
                }
            }
        }
    });

    json!({
        "post": {
            "summary": "Adiciona um novo usuário",
            "description": "Adiciona um novo usuário ao banco de dados em memória.",
            "requestBody": {
                "required": true,
                "content": { "application/json": { "schema": schema_ref("NovoUsuario") } }
            },
            "responses": {
                "201": created,
                "400": error_response("Dados inválidos ou incompletos"),
                "409": error_response("Usuário com este CPF já existe")
            }
        }
    })
}

fn lookup_path() -> Value {
    json!({
        "get": {
            "summary": "Retorna os dados de um usuário",
            "description": "Recupera as informações de um usuário com base no CPF.",
            "parameters": [
                { "name": "cpf", "in": "path", "required": true, "schema": { "type": "string" } }
            ],
            "responses": {
                "200": {
                    "description": "Dados do usuário",
                    "content": { "application/json": { "schema": schema_ref("Usuario") } }
                },
                "404": error_response("Usuário não encontrado")
            }
        }
    })
}

fn list_path() -> Value {
    json!({
        "get": {
            "summary": "Lista todos os usuários",
            "description": "Retorna todos os usuários na ordem em que foram adicionados.",
            "responses": {
                "200": {
                    "description": "Lista de usuários",
                    "content": {
                        "application/json": {
                            "schema": { "type": "array", "items": schema_ref("Usuario") }
                        }
                    }
                }
            }
        }
    })
}

fn schemas() -> Value {
    json!({
        "NovoUsuario": {
            "type": "object",
            "required": ["cpf", "nome", "data_nascimento"],
            "properties": {
                "cpf": { "type": "string", "pattern": "^[0-9]{11}$", "example": "12345678901" },
                "nome": { "type": "string", "example": "José dos Santos" },
                "data_nascimento": { "type": "string", "format": "date", "example": "1970-09-06" }
            }
        },
        "Usuario": {
            "type": "object",
            "properties": {
                "nome": { "type": "string" },
                "data_nascimento": { "type": "string", "format": "date" }
            }
        },
        "Erro": {
            "type": "object",
            "properties": { "error": { "type": "string" } }
        }
    })
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": schema_ref("Erro")
            }
        }
    })
}

/// HTML shell that loads Swagger UI and points it at `document_path`
pub fn swagger_ui_page(document_path: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="utf-8" />
  <title>API de Usuários</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {{
      window.ui = SwaggerUIBundle({{ url: "{document_path}", dom_id: "#swagger-ui" }});
    }};
  </script>
</body>
</html>
"##,
        version = SWAGGER_UI_VERSION,
        document_path = document_path,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_describes_every_route() {
        let doc = document("http://localhost:3000");

        assert_eq!(doc["openapi"], "3.0.0");
        assert_eq!(doc["info"]["title"], "API de Usuários");
        assert_eq!(doc["servers"][0]["url"], "http://localhost:3000");

        let paths = doc["paths"].as_object().unwrap();
        for path in ["/", "/usuario", "/usuario/{cpf}", "/usuarios"] {
            assert!(paths.contains_key(path), "missing {path}");
        }
        assert!(doc["paths"]["/usuario"]["post"]["responses"]["409"].is_object());
        assert!(doc["paths"]["/usuario/{cpf}"]["get"]["responses"]["404"].is_object());
    }

    #[test]
    fn test_schema_example_matches_sample_record() {
        let doc = document("http://localhost:3000");
        let props = &doc["components"]["schemas"]["NovoUsuario"]["properties"];

        assert_eq!(props["cpf"]["example"], "12345678901");
        assert_eq!(props["data_nascimento"]["example"], "1970-09-06");
    }

    #[test]
    fn test_ui_page_points_at_document() {
        let page = swagger_ui_page(DOCUMENT_PATH);

        assert!(page.contains(r#"url: "/api-docs/openapi.json""#));
        assert!(page.contains("SwaggerUIBundle"));
    }
}
