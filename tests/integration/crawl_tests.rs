//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small fake catalog and run the full
//! crawl cycle end-to-end over HTTP.

use shelf_sweep::config::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use shelf_sweep::crawler::{Coordinator, RunOutcome, RunSummary};
use shelf_sweep::SweepError;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, dir: &TempDir, skip: bool) -> Config {
    Config {
        crawler: CrawlerConfig {
            base_url: format!("{}/", base_url),
            request_timeout_secs: 5,
            request_delay_ms: 0, // No waiting in tests
            backoff_delay_ms: 0,
            max_retries: 3,
            max_pages_per_category: 50,
            skip_failed_categories: skip,
            ..CrawlerConfig::default()
        },
        user_agent: UserAgentConfig {
            value: "TestSweep/1.0".to_string(),
        },
        output: OutputConfig {
            dataset_path: dir.path().join("livros.csv").display().to_string(),
            report_path: dir.path().join("relatorio_categorias.txt").display().to_string(),
            timing_path: Some(dir.path().join("tempo.txt").display().to_string()),
        },
    }
}

fn home_page() -> String {
    r#"<html><head><title>All products</title></head><body>
    <div class="side_categories"><ul class="nav nav-list"><li>
        <a href="catalogue/category/books_1/index.html">Books</a>
        <ul>
            <li><a href="catalogue/category/books/poetry_23/index.html">Poetry</a></li>
            <li><a href="catalogue/category/books/travel_2/index.html">Travel</a></li>
            <li><a href="catalogue/category/books/horror_31/index.html">Horror</a></li>
        </ul>
    </li></ul></div>
    </body></html>"#
        .to_string()
}

fn listing_page(slug: &str, count: usize, next: Option<&str>) -> String {
    let articles: String = (0..count)
        .map(|i| {
            format!(
                r#"<li><article class="product_pod">
                    <div class="image_container"><a href="../../../{slug}-{i}_{i}/index.html"><img src="x.jpg" alt="x"></a></div>
                    <p class="star-rating Two"><i class="icon-star"></i></p>
                    <h3><a href="../../../{slug}-{i}_{i}/index.html" title="{slug} book {i}">{slug} book {i}</a></h3>
                    <div class="product_price"><p class="price_color">£1{i}.00</p></div>
                </article></li>"#,
                slug = slug,
                i = i
            )
        })
        .collect();

    let pager = match next {
        Some(href) => format!(
            r#"<ul class="pager"><li class="current">Page</li><li class="next"><a href="{}">next</a></li></ul>"#,
            href
        ),
        None => String::new(),
    };

    format!(
        "<html><body><section><ol class=\"row\">{}</ol>{}</section></body></html>",
        articles, pager
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

fn completed(outcome: RunOutcome) -> RunSummary {
    match outcome {
        RunOutcome::Completed(summary) => summary,
        other => panic!("expected a completed run, got {:?}", other),
    }
}

#[tokio::test]
async fn test_full_crawl_with_failing_categories() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = tempfile::tempdir().unwrap();

    mount_page(&mock_server, "/index.html", home_page()).await;
    mount_page(
        &mock_server,
        "/catalogue/category/books/poetry_23/index.html",
        listing_page("poetry", 20, Some("page-2.html")),
    )
    .await;
    mount_page(
        &mock_server,
        "/catalogue/category/books/poetry_23/page-2.html",
        listing_page("poetry2", 5, None),
    )
    .await;

    // Travel is not mounted: the server answers 404

    // Horror keeps failing and must be tried exactly max-retries times
    Mock::given(method("GET"))
        .and(path("/catalogue/category/books/horror_31/index.html"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, &dir, true);
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let summary = completed(coordinator.run().await.expect("Crawl failed"));

    assert_eq!(summary.items.len(), 25);
    assert!(summary.items.iter().all(|item| item.category == "Poetry"));
    assert!(summary.items.iter().all(|item| item
        .link
        .starts_with(&format!("{}/catalogue/", base_url))));
    assert_eq!(summary.categories_processed, 1);
    assert_eq!(summary.categories_skipped, 2);

    let dataset = std::fs::read_to_string(dir.path().join("livros.csv")).unwrap();
    let mut lines = dataset.lines();
    assert_eq!(lines.next(), Some("Categoria,Título,Preço,Link,Avaliação"));
    assert_eq!(
        lines.next(),
        Some(
            format!(
                "Poetry,poetry book 0,£10.00,{}/catalogue/poetry-0_0/index.html,Two",
                base_url
            )
            .as_str()
        )
    );
    assert_eq!(dataset.lines().count(), 26);

    let report = std::fs::read_to_string(dir.path().join("relatorio_categorias.txt")).unwrap();
    assert!(report.lines().any(|l| l.trim_start() == "Poetry: 25 livros"));
    assert!(!report.contains("Travel"));
    assert!(!report.contains("Horror"));

    let timing = std::fs::read_to_string(dir.path().join("tempo.txt")).unwrap();
    for key in ["TOTAL:", "DOWNLOAD:", "EXTRACAO:", "SALVAMENTO:"] {
        assert!(timing.contains(key), "missing {} in timing report", key);
    }
}

#[tokio::test]
async fn test_abort_policy_fails_run() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = tempfile::tempdir().unwrap();

    mount_page(&mock_server, "/index.html", home_page()).await;
    mount_page(
        &mock_server,
        "/catalogue/category/books/poetry_23/index.html",
        listing_page("poetry", 3, None),
    )
    .await;

    // Horror must never be reached once Travel has failed
    Mock::given(method("GET"))
        .and(path("/catalogue/category/books/horror_31/index.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page("horror", 1, None)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, &dir, false);
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let result = coordinator.run().await;

    match result {
        Err(SweepError::CategoryFailed { category, .. }) => assert_eq!(category, "Travel"),
        other => panic!("expected category failure, got {:?}", other),
    }
    assert!(!dir.path().join("livros.csv").exists());
}

#[tokio::test]
async fn test_missing_home_menu_fails_run() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = tempfile::tempdir().unwrap();

    mount_page(
        &mock_server,
        "/index.html",
        "<html><body><h1>Under maintenance</h1></body></html>".to_string(),
    )
    .await;

    let config = create_test_config(&base_url, &dir, true);
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");

    assert!(matches!(
        coordinator.run().await,
        Err(SweepError::NoCategories { .. })
    ));
}

#[tokio::test]
async fn test_page_ceiling_over_http() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = tempfile::tempdir().unwrap();

    mount_page(&mock_server, "/index.html", home_page()).await;
    mount_page(
        &mock_server,
        "/catalogue/category/books/poetry_23/index.html",
        listing_page("poetry", 2, Some("page-2.html")),
    )
    .await;

    // Every further page points at itself
    Mock::given(method("GET"))
        .and(path("/catalogue/category/books/poetry_23/page-2.html"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(listing_page("loop", 2, Some("page-2.html"))),
        )
        .expect(3)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&base_url, &dir, true);
    config.crawler.max_pages_per_category = 4;
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let summary = completed(coordinator.run().await.expect("Crawl failed"));

    assert_eq!(summary.items.len(), 8);
}
