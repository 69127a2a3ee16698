use std::sync::{Arc, Mutex};

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1::Builder as ConnectionBuilder;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use segroute::Router;
use tokio::net::TcpListener;
use tower::service_fn;
use tower::util::BoxCloneService;
use tower::Service as _;

type Body = Full<Bytes>;

// Path parameters captured by the router, stashed in the request extensions
// as owned strings so handlers can read them.
#[derive(Clone)]
struct PathParams(Vec<(String, String)>);

impl PathParams {
    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

// GET /
async fn index(_req: Request<Incoming>) -> hyper::Result<Response<Body>> {
    Ok(Response::new(Full::new(Bytes::from("Hello, world!"))))
}

// GET /hello/:name
async fn hello(req: Request<Incoming>) -> hyper::Result<Response<Body>> {
    let name = req
        .extensions()
        .get::<PathParams>()
        .and_then(|params| params.get("name"))
        .unwrap_or("stranger")
        .to_owned();

    Ok(Response::new(Full::new(Bytes::from(format!(
        "Hello, {name}!"
    )))))
}

// GET /files/*filepath
async fn files(req: Request<Incoming>) -> hyper::Result<Response<Body>> {
    let filepath = req
        .extensions()
        .get::<PathParams>()
        .and_then(|params| params.get("filepath"))
        .unwrap_or("/")
        .to_owned();

    Ok(Response::new(Full::new(Bytes::from(format!(
        "Would serve {filepath}"
    )))))
}

// 404 handler
async fn not_found(_req: Request<Incoming>) -> hyper::Result<Response<Body>> {
    Ok(Response::builder()
        .status(404)
        .body(Full::new(Bytes::new()))
        .unwrap())
}

// We can use `BoxCloneService` to erase the type of each handler service.
//
// We still need a `Mutex` around each service because `BoxCloneService`
// doesn't require the service to implement `Sync`.
type Service = Mutex<BoxCloneService<Request<Incoming>, Response<Body>, hyper::Error>>;

async fn route(
    router: Arc<Router<Method, Service>>,
    mut req: Request<Incoming>,
) -> hyper::Result<Response<Body>> {
    let path = req.uri().path().to_owned();

    match router.at(req.method(), &path) {
        Ok(found) => {
            let params = PathParams(
                found
                    .params
                    .iter()
                    .map(|(key, value)| (key.to_owned(), value.to_owned()))
                    .collect(),
            );

            // lock the service for a very short time, just to clone it
            let mut service = found.value.lock().unwrap().clone();

            req.extensions_mut().insert(params);
            service.call(req).await
        }
        // if there is no matching service, call the 404 handler
        Err(_) => not_found(req).await,
    }
}

#[tokio::main]
async fn main() {
    // Create a router and register our routes.
    let mut router = Router::new();

    router
        .get("/", BoxCloneService::new(service_fn(index)).into())
        .unwrap();
    router
        .get("/hello/:name", BoxCloneService::new(service_fn(hello)).into())
        .unwrap();
    router
        .get("/files/*filepath", BoxCloneService::new(service_fn(files)).into())
        .unwrap();

    let listener = TcpListener::bind(("127.0.0.1", 3000)).await.unwrap();

    // registration is done; share the immutable router with every connection
    let router = Arc::new(router);

    loop {
        let router = router.clone();
        let (tcp, _) = listener.accept().await.unwrap();
        tokio::task::spawn(async move {
            if let Err(err) = ConnectionBuilder::new()
                .serve_connection(
                    TokioIo::new(tcp),
                    hyper::service::service_fn(|request| route(router.clone(), request)),
                )
                .await
            {
                println!("Error serving connection: {:?}", err);
            }
        });
    }
}
