//! Product access façade.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use produto_products::{PageRequest, Product, ProductDraft, ProductId, ProductPage};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::HttpTransport;
use crate::transport::{ApiRequest, Transport};

/// Resource root, relative to the API base URL.
pub const API: &str = "api/products";

/// Pass-through client for the `api/products` resource.
///
/// Holds nothing but the transport handle. Each call builds one request and
/// returns a future that issues it when polled; errors come back exactly as
/// the transport reported them.
#[derive(Clone)]
pub struct ProductService {
    transport: Arc<dyn Transport>,
}

impl ProductService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Service backed by [`HttpTransport`].
    pub fn from_config(config: ClientConfig) -> Self {
        Self::new(Arc::new(HttpTransport::new(config)))
    }

    /// `GET api/products/page?page=..&pageSize=..`
    pub fn list(
        &self,
        page: PageRequest,
    ) -> impl Future<Output = Result<ProductPage, ClientError>> + Send + 'static {
        let request = ApiRequest::get(format!("{API}/page")).with_query(page.query_pairs());
        self.fetch_json(request)
    }

    /// `GET api/products`
    pub fn list_all(&self) -> impl Future<Output = Result<Vec<Product>, ClientError>> + Send + 'static {
        self.fetch_json(ApiRequest::get(API))
    }

    /// `GET api/products/{id}`
    pub fn load_by_id(
        &self,
        id: impl Into<ProductId>,
    ) -> impl Future<Output = Result<Product, ClientError>> + Send + 'static {
        self.fetch_json(ApiRequest::get(item_path(&id.into())))
    }

    /// `POST api/products`, resolving with the record the server created.
    pub fn create(
        &self,
        product: &ProductDraft,
    ) -> impl Future<Output = Result<Product, ClientError>> + Send + 'static {
        self.send_json(ApiRequest::post(API), encode(product))
    }

    /// `PUT api/products/{id}` with whatever fields `product` carries.
    pub fn update(
        &self,
        id: impl Into<ProductId>,
        product: &ProductDraft,
    ) -> impl Future<Output = Result<Product, ClientError>> + Send + 'static {
        self.send_json(ApiRequest::put(item_path(&id.into())), encode(product))
    }

    /// `DELETE api/products/{id}`, resolving with the response body if any.
    pub fn delete(
        &self,
        id: impl Into<ProductId>,
    ) -> impl Future<Output = Result<Option<Value>, ClientError>> + Send + 'static {
        let transport = Arc::clone(&self.transport);
        let request = ApiRequest::delete(item_path(&id.into()));

        async move { transport.request(request).await?.json_opt() }
    }

    fn fetch_json<T>(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<T, ClientError>> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        let transport = Arc::clone(&self.transport);

        async move { transport.request(request).await?.json() }
    }

    fn send_json<T>(
        &self,
        request: ApiRequest,
        body: Result<Value, ClientError>,
    ) -> impl Future<Output = Result<T, ClientError>> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        let transport = Arc::clone(&self.transport);

        async move {
            let request = request.with_body(body?);
            transport.request(request).await?.json()
        }
    }
}

impl core::fmt::Debug for ProductService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProductService").finish_non_exhaustive()
    }
}

fn item_path(id: &ProductId) -> String {
    format!("{API}/{id}")
}

fn encode(product: &ProductDraft) -> Result<Value, ClientError> {
    serde_json::to_value(product).map_err(|e| ClientError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use futures::future::BoxFuture;
    use reqwest::Method;
    use serde_json::json;

    use crate::error::TransportError;
    use crate::transport::ApiResponse;

    /// Records every request handed to it and replays canned results in order.
    #[derive(Default)]
    struct RecordingTransport {
        requests: Mutex<Vec<ApiRequest>>,
        replies: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    }

    impl RecordingTransport {
        fn replying(replies: Vec<Result<ApiResponse, TransportError>>) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                replies: Mutex::new(replies.into()),
            })
        }

        fn ok(body: Value) -> Arc<Self> {
            Self::replying(vec![Ok(ApiResponse::new(200, body.to_string()))])
        }

        fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for RecordingTransport {
        fn request(&self, request: ApiRequest) -> BoxFuture<'static, Result<ApiResponse, TransportError>> {
            self.requests.lock().unwrap().push(request);
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(ApiResponse::new(200, "{}")));
            Box::pin(async move { reply })
        }
    }

    fn service(transport: &Arc<RecordingTransport>) -> ProductService {
        ProductService::new(transport.clone())
    }

    fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn list_defaults_to_first_page_of_five() {
        let transport = RecordingTransport::ok(json!({"products": [], "totalElements": 0, "totalPages": 0}));

        let page = service(&transport).list(PageRequest::default()).await.unwrap();
        assert!(page.is_empty());

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].path, "api/products/page");
        assert_eq!(requests[0].query, query(&[("page", "0"), ("pageSize", "5")]));
        assert_eq!(requests[0].body, None);
    }

    #[tokio::test]
    async fn list_returns_the_server_page_unmodified() {
        let body = json!({
            "products": [{"id": 4, "name": null, "_links": {"self": {"href": "/api/products/4"}}}],
            "totalElements": 6,
            "totalPages": 2
        });
        let transport = RecordingTransport::ok(body.clone());

        let page = service(&transport).list(PageRequest::default()).await.unwrap();
        assert_eq!(serde_json::to_value(&page).unwrap(), body);
    }

    #[tokio::test]
    async fn list_forwards_literal_page_values() {
        let transport = RecordingTransport::ok(json!({"products": []}));

        service(&transport).list(PageRequest::new(2, 10)).await.unwrap();

        assert_eq!(
            transport.requests()[0].query,
            query(&[("page", "2"), ("pageSize", "10")])
        );
    }

    #[tokio::test]
    async fn load_by_id_issues_one_get() {
        let transport = RecordingTransport::ok(json!({"id": 42, "name": "Lápis"}));

        let product = service(&transport).load_by_id("42").await.unwrap();
        assert_eq!(product.id(), &ProductId::new("42"));
        assert_eq!(product.name(), Some("Lápis"));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].path, "api/products/42");
    }

    #[tokio::test]
    async fn load_by_id_does_not_validate_the_id() {
        let transport = RecordingTransport::ok(json!({"id": "x"}));

        service(&transport).load_by_id("not a number").await.unwrap();

        assert_eq!(transport.requests()[0].path, "api/products/not a number");
    }

    #[tokio::test]
    async fn create_posts_partial_body_and_returns_server_record() {
        let created = json!({
            "id": 99,
            "description": null,
            "_links": {"self": {"href": "/api/products", "title": "all"}}
        });
        let transport = RecordingTransport::ok(created.clone());

        let product = service(&transport).create(&ProductDraft::named("x")).await.unwrap();
        assert_eq!(serde_json::to_value(&product).unwrap(), created);
        assert_eq!(product.id().as_str(), "99");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].path, "api/products");
        assert_eq!(requests[0].body, Some(json!({"name": "x"})));
    }

    #[tokio::test]
    async fn update_puts_partial_body_at_id() {
        let transport = RecordingTransport::ok(json!({"id": 42, "name": "y"}));

        service(&transport).update("42", &ProductDraft::named("y")).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::PUT);
        assert_eq!(requests[0].path, "api/products/42");
        assert_eq!(requests[0].body, Some(json!({"name": "y"})));
    }

    #[tokio::test]
    async fn delete_returns_body_unmodified() {
        let transport = RecordingTransport::replying(vec![
            Ok(ApiResponse::new(204, Vec::new())),
            Ok(ApiResponse::new(200, r#"{"deleted":"42"}"#)),
        ]);
        let svc = service(&transport);

        assert_eq!(svc.delete("42").await.unwrap(), None);
        assert_eq!(svc.delete("42").await.unwrap(), Some(json!({"deleted": "42"})));

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests
            .iter()
            .all(|r| r.method == Method::DELETE && r.path == "api/products/42"));
    }

    #[tokio::test]
    async fn list_all_reads_the_collection_root() {
        let transport = RecordingTransport::ok(json!([{"id": 1, "name": "a"}]));

        let products = service(&transport).list_all().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(transport.requests()[0].path, "api/products");
    }

    #[tokio::test]
    async fn nothing_is_sent_until_polled() {
        let transport = RecordingTransport::ok(json!({"id": 1}));
        let svc = service(&transport);

        let pending = svc.load_by_id("1");
        let _unpolled_delete = svc.delete("2");
        let _unpolled_create = svc.create(&ProductDraft::named("z"));
        assert!(transport.requests().is_empty());

        pending.await.unwrap();
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn transport_errors_propagate_unchanged() {
        let rejection = TransportError::Status {
            status: 404,
            body: r#"{"error":"not found"}"#.into(),
        };
        let transport = RecordingTransport::replying(vec![Err(rejection.clone())]);

        let err = service(&transport).load_by_id("7").await.unwrap_err();
        match err {
            ClientError::Transport(e) => assert_eq!(e, rejection),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unexpected_payload_is_a_decode_error() {
        let transport = RecordingTransport::ok(json!(["not", "a", "product"]));

        let err = service(&transport).load_by_id("1").await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn calls_do_not_share_state() {
        let transport = RecordingTransport::replying(vec![
            Ok(ApiResponse::new(200, r#"{"id":1,"name":"a"}"#)),
            Ok(ApiResponse::new(200, r#"{"id":2,"name":"b"}"#)),
        ]);
        let svc = service(&transport);

        let (a, b) = tokio::join!(svc.load_by_id("1"), svc.load_by_id("2"));
        let (a, b) = (a.unwrap(), b.unwrap());
        let mut names = vec![a.name(), b.name()];
        names.sort();
        assert_eq!(names, vec![Some("a"), Some("b")]);
        assert_eq!(transport.requests().len(), 2);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 64,
                ..ProptestConfig::default()
            })]

            #[test]
            fn item_path_embeds_id_verbatim(id in "[A-Za-z0-9_-]{1,24}") {
                prop_assert_eq!(item_path(&ProductId::new(id.clone())), format!("api/products/{id}"));
            }

            #[test]
            fn page_values_are_forwarded_literally(page in any::<u32>(), size in any::<u32>()) {
                let req = ApiRequest::get("api/products/page")
                    .with_query(PageRequest::new(page, size).query_pairs());
                prop_assert_eq!(
                    req.query,
                    vec![
                        ("page".to_string(), page.to_string()),
                        ("pageSize".to_string(), size.to_string()),
                    ]
                );
            }
        }
    }
}
