#[cfg(not(target_arch = "wasm32"))]
mod native {
    extern crate bloglist;

    use actix_web::{middleware, web, App, HttpServer, HttpRequest, HttpResponse};
    use bloglist::AppContext;
    use bloglist::config::Config;
    use bloglist::core::db::Db;

    mod adapter {
        use actix_web::HttpRequest;
        use spin_sdk::http::{Request, Method};

        pub fn actix_to_spin_request(
            req: &HttpRequest,
            body: actix_web::web::Bytes,
        ) -> anyhow::Result<Request> {
            let method = match req.method().as_str() {
                "GET" => Method::Get,
                "POST" => Method::Post,
                "PUT" => Method::Put,
                "DELETE" => Method::Delete,
                "HEAD" => Method::Head,
                "OPTIONS" => Method::Options,
                "PATCH" => Method::Patch,
                other => anyhow::bail!("unsupported method {}", other),
            };

            let uri = req.uri().to_string();

            let mut builder = Request::builder();
            builder.method(method).uri(&uri);
            for (name, value) in req.headers() {
                if let Ok(val_str) = value.to_str() {
                    builder.header(name.as_str(), val_str);
                }
            }

            Ok(builder.body(body.to_vec()).build())
        }

        pub fn spin_to_actix_response(spin_resp: spin_sdk::http::Response) -> actix_web::HttpResponse {
            let status = *spin_resp.status();

            let mut response = actix_web::HttpResponse::build(
                actix_web::http::StatusCode::from_u16(status)
                    .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR),
            );
            if let Some(ct) = spin_resp.header("content-type").and_then(|v| v.as_str()) {
                response.content_type(ct.to_string());
            }

            response.body(spin_resp.body().to_vec())
        }
    }

    pub async fn run() -> std::io::Result<()> {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

        let config = Config::from_env().map_err(|e| {
            log::error!("invalid configuration: {:#}", e);
            std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
        })?;
        let port = config.port;
        if config.testing {
            log::warn!("testing routes enabled");
        }

        let ctx = web::Data::new(AppContext::new(Db::in_memory(), config));

        log::info!("Server listening on http://0.0.0.0:{}", port);

        HttpServer::new(move || {
            App::new()
                .app_data(ctx.clone())
                .wrap(middleware::Logger::default())
                .default_service(web::route().to(handle_all))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }

    async fn handle_all(
        ctx: web::Data<AppContext>,
        req: HttpRequest,
        body: web::Bytes,
    ) -> HttpResponse {
        let spin_req = match adapter::actix_to_spin_request(&req, body) {
            Ok(r) => r,
            Err(e) => {
                log::debug!("rejected request: {}", e);
                return HttpResponse::BadRequest()
                    .json(serde_json::json!({"error": "Invalid request"}))
            }
        };

        adapter::spin_to_actix_response(bloglist::route(&ctx, &spin_req))
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    native::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {}
