use serde_json::{json, Value};

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kbchat::config::{Config, ServiceConfig};
use kbchat::session::Role;
use kbchat::{CitationOutcome, Orchestrator};

fn config_for(server: &MockServer) -> Config {
    let service = ServiceConfig {
        endpoint: server.uri(),
        timeout_seconds: 5,
    };
    let mut config = Config::default();
    config.services.parameter_store = service.clone();
    config.services.knowledge_base = service.clone();
    config.services.object_store = service;
    config.query.model_arn = "arn:aws:bedrock:::test-model".to_string();
    config
}

/// Mount the two parameter lookups; `knowledge_base_id_calls` is the total
/// expected call count for the KnowledgeBaseId key (startup resolution plus
/// one per question).
async fn mount_parameters(server: &MockServer, knowledge_base_id_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/v1/parameters/get"))
        .and(body_json(json!({"name": "/kbchat/dev/DataSourceId"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "parameter": {"name": "/kbchat/dev/DataSourceId", "value": "DS456"}
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/parameters/get"))
        .and(body_json(json!({"name": "/kbchat/dev/KnowledgeBaseId"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "parameter": {"name": "/kbchat/dev/KnowledgeBaseId", "value": "KB123"}
        })))
        .expect(knowledge_base_id_calls)
        .mount(server)
        .await;
}

async fn mount_describe_and_listing(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/datasources/describe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data_source": {"id": "DS456", "bucket_arn": "arn:aws:s3:::onprem-kb-documents"}
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/buckets/onprem-kb-documents/objects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [{"key": "guides/s3.pdf"}, {"key": "guides/gateway.pdf"}]
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_query(server: &MockServer, response: Value) {
    Mock::given(method("POST"))
        .and(path("/v1/retrieve-and-generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_startup_resolves_identifiers_and_lists_files() {
    let server = MockServer::start().await;
    mount_parameters(&server, 1).await;
    mount_describe_and_listing(&server).await;

    let config = config_for(&server);
    let session = Orchestrator::start(&config, "dev").await.unwrap();

    assert_eq!(session.knowledge_base_ref().data_source_id, "DS456");
    assert_eq!(session.knowledge_base_ref().knowledge_base_id, "KB123");
    assert_eq!(session.files(), ["guides/s3.pdf", "guides/gateway.pdf"]);
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn test_startup_fails_without_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/parameters/get"))
        .respond_with(ResponseTemplate::new(404).set_body_string("parameter not found"))
        .mount(&server)
        .await;

    let config = config_for(&server);
    assert!(Orchestrator::start(&config, "dev").await.is_err());
}

#[tokio::test]
async fn test_exchange_without_citation() {
    let server = MockServer::start().await;
    mount_parameters(&server, 2).await;
    mount_describe_and_listing(&server).await;
    mount_query(
        &server,
        json!({"output": {"text": "S3 is object storage."}, "citations": []}),
    )
    .await;

    let config = config_for(&server);
    let mut session = Orchestrator::start(&config, "dev").await.unwrap();
    let exchange = session.ask("What is S3?").await.unwrap();

    assert_eq!(exchange.answer, "S3 is object storage.");
    assert_eq!(exchange.citation, CitationOutcome::Empty);

    let turns = session.history().turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].role, Role::User);
    assert_eq!(turns[0].text, "What is S3?");
    assert_eq!(turns[1].role, Role::Assistant);
    assert_eq!(turns[1].text, "S3 is object storage.");
}

#[tokio::test]
async fn test_exchange_with_citation() {
    let server = MockServer::start().await;
    mount_parameters(&server, 2).await;
    mount_describe_and_listing(&server).await;
    mount_query(
        &server,
        json!({
            "output": {"text": "File gateways cache hot data locally."},
            "citations": [{
                "retrieved_references": [{
                    "content": {"text": "An S3 File Gateway caches recently used data."},
                    "location": {"uri": "s3://bucket/doc.pdf"}
                }]
            }]
        }),
    )
    .await;

    let config = config_for(&server);
    let mut session = Orchestrator::start(&config, "dev").await.unwrap();
    let exchange = session.ask("How do file gateways work?").await.unwrap();

    assert_eq!(exchange.citation.source_uri(), Some("s3://bucket/doc.pdf"));
    assert_eq!(session.history().len(), 2);
}

#[tokio::test]
async fn test_malformed_citation_degrades_without_error() {
    let server = MockServer::start().await;
    mount_parameters(&server, 2).await;
    mount_describe_and_listing(&server).await;
    mount_query(
        &server,
        json!({
            "output": {"text": "An answer."},
            "citations": [{"retrieved_references": [{"content": {"text": "excerpt"}}]}]
        }),
    )
    .await;

    let config = config_for(&server);
    let mut session = Orchestrator::start(&config, "dev").await.unwrap();
    let exchange = session.ask("Anything?").await.unwrap();

    assert_eq!(exchange.citation, CitationOutcome::Malformed);
    assert!(exchange.citation.source_uri().is_none());
    // The exchange itself still completed
    assert_eq!(session.history().len(), 2);
}

#[tokio::test]
async fn test_knowledge_base_id_is_re_resolved_per_question() {
    let server = MockServer::start().await;
    // One startup resolution plus one lookup per question
    mount_parameters(&server, 3).await;
    mount_describe_and_listing(&server).await;
    mount_query(
        &server,
        json!({"output": {"text": "Answer."}, "citations": []}),
    )
    .await;

    let config = config_for(&server);
    let mut session = Orchestrator::start(&config, "dev").await.unwrap();
    session.ask("First question?").await.unwrap();
    session.ask("Second question?").await.unwrap();

    assert_eq!(session.history().len(), 4);
    // Mock expectations assert the call counts on drop
}

#[tokio::test]
async fn test_failed_listing_yields_empty_file_list() {
    let server = MockServer::start().await;
    mount_parameters(&server, 2).await;

    Mock::given(method("POST"))
        .and(path("/v1/datasources/describe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data_source": {"id": "DS456", "bucket_arn": "arn:aws:s3:::onprem-kb-documents"}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/buckets/onprem-kb-documents/objects"))
        .respond_with(ResponseTemplate::new(500).set_body_string("listing unavailable"))
        .mount(&server)
        .await;

    mount_query(
        &server,
        json!({"output": {"text": "Still answering."}, "citations": []}),
    )
    .await;

    let config = config_for(&server);
    let mut session = Orchestrator::start(&config, "dev").await.unwrap();

    // Session starts with no files and remains usable
    assert!(session.files().is_empty());
    let exchange = session.ask("Does this still work?").await.unwrap();
    assert_eq!(exchange.answer, "Still answering.");
}

#[tokio::test]
async fn test_failed_describe_yields_empty_file_list() {
    let server = MockServer::start().await;
    mount_parameters(&server, 1).await;

    Mock::given(method("POST"))
        .and(path("/v1/datasources/describe"))
        .respond_with(ResponseTemplate::new(500).set_body_string("describe unavailable"))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let session = Orchestrator::start(&config, "dev").await.unwrap();
    assert!(session.files().is_empty());
}

#[tokio::test]
async fn test_failed_query_propagates_and_leaves_user_turn() {
    let server = MockServer::start().await;
    mount_parameters(&server, 2).await;
    mount_describe_and_listing(&server).await;

    Mock::given(method("POST"))
        .and(path("/v1/retrieve-and-generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("generation failed"))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let mut session = Orchestrator::start(&config, "dev").await.unwrap();
    let result = session.ask("Will this fail?").await;

    assert!(result.is_err());
    // The submitted question stays on the log; no assistant turn was added
    let turns = session.history().turns();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].role, Role::User);
}
