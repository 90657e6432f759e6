use std::sync::Arc;

use laptop_scraper::config::Config;
use laptop_scraper::error::FetchError;
use laptop_scraper::scrapers::{CategoryCrawler, ProductScraper};
use laptop_scraper::utils::http::{HttpFetcher, PageSource};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CATEGORY_PATH: &str = "/category/5022/laptopy.html";

fn test_config(server: &MockServer, min_records: usize) -> Config {
    Config {
        category_url: format!("{}{}", server.uri(), CATEGORY_PATH),
        min_records,
        delay_min_secs: 0.0,
        delay_max_secs: 0.0,
        backoff_factor: 0.0,
        ..Config::default()
    }
}

fn product_page(title: &str, price: &str) -> String {
    format!(
        r#"<html><body><h1>{title}</h1><span data-price-type="final">{price}</span></body></html>"#
    )
}

#[tokio::test]
async fn retries_transient_status_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&test_config(&server, 1)).unwrap();
    let body = fetcher.fetch(&format!("{}/flaky", server.uri())).await.unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn gives_up_after_retry_budget() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(502))
        .expect(4)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&test_config(&server, 1)).unwrap();
    let err = fetcher
        .fetch(&format!("{}/down", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn client_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&test_config(&server, 1)).unwrap();
    let err = fetcher
        .fetch(&format!("{}/missing", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }));
}

#[tokio::test]
async fn crawls_pages_until_listing_runs_dry() {
    let server = MockServer::start().await;

    let page_one = r#"
        <div class="product-card"><a href="/product/101/lenovo-v15.html">Lenovo V15</a></div>
        <div class="product-card"><a href="/product/102/hp-250.html">HP 250</a></div>
        <div class="product-card"><a href="/product/101/lenovo-v15.html">Lenovo V15</a></div>
        <a href="/category/5022/laptopy.html?p=2">Następna</a>
    "#;
    let page_two = r#"
        <div class="product-card"><a href="/product/102/hp-250.html">HP 250</a></div>
        <div class="product-card"><a href="/product/103/dell-vostro.html">Dell Vostro</a></div>
    "#;

    Mock::given(method("GET"))
        .and(path(CATEGORY_PATH))
        .and(query_param("p", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_two))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CATEGORY_PATH))
        .and(query_param("p", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>Brak produktów</p>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CATEGORY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_one))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/product/101/lenovo-v15.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(product_page("Lenovo V15 G4 - Ryzen 5 7520U | 8GB | 512GB", "1 899,00 zł")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/product/102/hp-250.html"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/product/103/dell-vostro.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(product_page("Dell Vostro 3520 i5-1235U 16GB", "2.699,00 PLN")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = Arc::new(test_config(&server, 10));
    let fetcher = HttpFetcher::new(&config).unwrap();
    let crawler = CategoryCrawler::new(config, fetcher);

    let records = crawler.scrape().await.unwrap();

    let summary: Vec<(Option<&str>, Option<&str>, Option<f64>)> = records
        .iter()
        .map(|r| (r.brand.as_deref(), r.model.as_deref(), r.price_pln))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Some("Lenovo"), Some("V15 G4"), Some(1899.0)),
            (Some("Dell"), Some("Vostro 3520"), Some(2699.0)),
        ]
    );
    assert_eq!(records[0].ram_gb, Some(8));
    assert_eq!(records[0].storage_capacity_gb, Some(512));
    assert_eq!(records[1].product_id.as_ref().map(|id| id.0.as_str()), Some("103"));
}
