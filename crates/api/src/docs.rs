use axum::response::Html;
use axum::Json;
use serde_json::{json, Value};

pub const TITLE: &str = "IDX Thematic Classification API";
const DESCRIPTION: &str = "An agentic API for company thematic classification";
const VERSION: &str = "1.0.0";
const LOGO_URL: &str =
    "https://idxinsights.com/wp-content/uploads/2025/03/IDX_thematic_agent_logo.png";
const SWAGGER_UI_CDN: &str = "https://cdnjs.cloudflare.com/ajax/libs/swagger-ui/4.15.5";
const REDOC_JS: &str = "https://cdn.jsdelivr.net/npm/redoc@next/bundles/redoc.standalone.js";

pub async fn openapi_json() -> Json<Value> {
    Json(openapi())
}

pub async fn swagger_ui() -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{TITLE}</title>
    <link rel="stylesheet" type="text/css" href="{SWAGGER_UI_CDN}/swagger-ui.css">
    <script src="{SWAGGER_UI_CDN}/swagger-ui-bundle.js"></script>
    <script src="{SWAGGER_UI_CDN}/swagger-ui-standalone-preset.js"></script>
    <style>
        .topbar-wrapper img {{
            content: url("{LOGO_URL}");
            width: 180px;
            height: auto;
        }}
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script>
        const ui = SwaggerUIBundle({{
            url: "/openapi.json",
            dom_id: '#swagger-ui',
            presets: [SwaggerUIBundle.presets.apis, SwaggerUIStandalonePreset],
            layout: "BaseLayout",
            deepLinking: true,
            syntaxHighlight: {{ theme: "monokai" }},
            showExtensions: true,
            showCommonExtensions: true
        }});
        window.ui = ui;
    </script>
</body>
</html>
"#
    ))
}

pub async fn redoc_ui() -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{TITLE} Documentation</title>
    <meta charset="utf-8"/>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <link href="https://fonts.googleapis.com/css?family=Montserrat:300,400,700|Roboto:300,400,700" rel="stylesheet">
    <link rel="shortcut icon" href="{LOGO_URL}">
    <style>
        body {{
            margin: 0;
            padding: 0;
        }}
    </style>
</head>
<body>
    <noscript>
        ReDoc requires Javascript to function. Please enable it to browse the documentation.
    </noscript>
    <redoc spec-url="/openapi.json"></redoc>
    <script src="{REDOC_JS}"></script>
</body>
</html>
"#
    ))
}

/// Interface description for `/classify` and `/`. The docs pages are left out.
pub fn openapi() -> Value {
    json!({
        "openapi": "3.1.0",
        "info": {
            "title": TITLE,
            "description": DESCRIPTION,
            "version": VERSION,
            "termsOfService": "https://www.idxinsights.com/terms",
            "contact": {
                "name": "IDX Insights, LLC",
                "url": "https://www.idxinsights.com",
                "email": "support@idxinsights.com",
            },
            "license": {
                "name": "MIT License",
                "url": "https://opensource.org/licenses/MIT",
            },
        },
        "paths": {
            "/classify": {
                "post": {
                    "summary": "Classify 10K",
                    "description": "Classify a 10-K filing into thematic categories. \
                        Callers provide a ticker and filing date and receive the model's classification.",
                    "operationId": "classify_10k_classify_post",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": {"$ref": "#/components/schemas/ClassificationRequest"}
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Successful Response",
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/ClassificationResponse"}
                                }
                            }
                        },
                        "422": {
                            "description": "Validation Error",
                            "content": {
                                "text/plain": {"schema": {"type": "string"}}
                            }
                        }
                    }
                }
            },
            "/": {
                "get": {
                    "summary": "Home",
                    "operationId": "home__get",
                    "responses": {
                        "200": {
                            "description": "Successful Response",
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/Liveness"}
                                }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "ClassificationRequest": {
                    "title": "ClassificationRequest",
                    "type": "object",
                    "required": ["ticker", "filing_date"],
                    "properties": {
                        "ticker": {"title": "Ticker", "type": "string"},
                        "filing_date": {"title": "Filing Date", "type": "string"}
                    }
                },
                "ClassificationResponse": {
                    "title": "ClassificationResponse",
                    "oneOf": [
                        {
                            "type": "object",
                            "required": ["ticker", "filing_date", "classification"],
                            "properties": {
                                "ticker": {"type": "string"},
                                "filing_date": {"type": "string"},
                                "classification": {"type": "string"}
                            }
                        },
                        {
                            "type": "object",
                            "required": ["error"],
                            "properties": {
                                "error": {"type": "string"}
                            }
                        }
                    ]
                },
                "Liveness": {
                    "title": "Liveness",
                    "type": "object",
                    "required": ["message"],
                    "properties": {
                        "message": {"type": "string"}
                    }
                }
            }
        }
    })
}
