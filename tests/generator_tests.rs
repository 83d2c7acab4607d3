use chat_widget::error::GenerationError;
use chat_widget::services::generator::{GenerationParams, TextGenerator};
use chat_widget::services::ollama::OllamaGenerator;
use chat_widget::services::rules::{Intent, RuleGenerator, detect_intent};

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

#[test]
fn test_detect_intent() {
    assert_eq!(detect_intent("Hello there"), Intent::Greeting);
    assert_eq!(detect_intent("hi"), Intent::Greeting);
    assert_eq!(detect_intent("I need help"), Intent::Help);
    assert_eq!(detect_intent("ok bye"), Intent::Farewell);
    assert_eq!(detect_intent("What time is it?"), Intent::Question);
    assert_eq!(detect_intent("random text"), Intent::Unknown);
    // "this" contains "hi" but is not a greeting
    assert_eq!(detect_intent("this is it"), Intent::Unknown);
}

#[test]
fn test_sequences_start_with_prompt() {
    let generator = RuleGenerator::new();
    let params = GenerationParams {
        num_return_sequences: 2,
        ..Default::default()
    };

    let out = generator.continue_prompt("hello", &[], &params);

    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|s| s.starts_with("hello ")));
}

#[test]
fn test_max_length_truncates_words() {
    let generator = RuleGenerator::new();
    let params = GenerationParams {
        max_length: 3,
        ..Default::default()
    };

    let out = generator.continue_prompt("one two three four five", &[], &params);

    assert_eq!(out, vec!["one two three".to_string()]);
}

#[test]
fn test_zero_temperature_is_deterministic() {
    let generator = RuleGenerator::new();
    let params = GenerationParams {
        temperature: 0.0,
        num_return_sequences: 4,
        ..Default::default()
    };

    let out = generator.continue_prompt("hello", &[], &params);

    assert!(out.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(out[0], "hello Hello! How can I help you today?");
}

#[test]
fn test_same_input_same_output() {
    let generator = RuleGenerator::new();
    let params = GenerationParams::default();
    let history = vec!["hi".to_string()];

    assert_eq!(
        generator.continue_prompt("tell me a story", &history, &params),
        generator.continue_prompt("tell me a story", &history, &params)
    );
}

#[tokio::test]
async fn test_invalid_params_rejected() {
    let generator = RuleGenerator::new();
    let params = GenerationParams {
        top_p: 1.5,
        ..Default::default()
    };

    assert!(generator.generate("hello", &[], &params).await.is_err());
}

#[tokio::test]
async fn test_invalid_params_each_rejected() {
    let generator = RuleGenerator::new();
    for params in [
        GenerationParams { max_length: 0, ..Default::default() },
        GenerationParams { temperature: -1.0, ..Default::default() },
        GenerationParams { top_p: 0.0, ..Default::default() },
    ] {
        assert!(matches!(
            generator.generate("hello", &[], &params).await,
            Err(GenerationError::InvalidParams(_))
        ));
    }
}

type Seen = Arc<Mutex<Vec<Value>>>;

async fn fake_ollama(State(seen): State<Seen>, Json(body): Json<Value>) -> Json<Value> {
    seen.lock().unwrap().push(body);
    Json(json!({"response": " world", "done": true}))
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

#[tokio::test]
async fn test_ollama_request_per_sequence() {
    let seen = Seen::default();
    let app = Router::new()
        .route("/api/generate", post(fake_ollama))
        .with_state(seen.clone());
    let generator = OllamaGenerator::new(spawn(app).await, "tiny");
    let params = GenerationParams {
        max_length: 30,
        temperature: 0.5,
        num_return_sequences: 2,
        ..Default::default()
    };
    let history = vec!["earlier".to_string()];

    let out = generator.generate("hi", &history, &params).await.unwrap();

    assert_eq!(out, vec!["earlier\nhi world".to_string(); 2]);
    let requests = seen.lock().unwrap();
    assert_eq!(requests.len(), 2);
    for body in requests.iter() {
        assert_eq!(body["model"], "tiny");
        assert_eq!(body["prompt"], "earlier\nhi");
        assert_eq!(body["stream"], false);
        assert_eq!(body["options"]["num_predict"], 30);
        assert_eq!(body["options"]["top_k"], 50);
        assert_eq!(body["options"]["temperature"], 0.5);
        let top_p = body["options"]["top_p"].as_f64().unwrap();
        assert!((top_p - 0.9).abs() < 1e-6);
    }
}

#[tokio::test]
async fn test_ollama_error_status_is_upstream_failure() {
    let app = Router::new().route(
        "/api/generate",
        post(|| async { (StatusCode::NOT_FOUND, "model 'tiny' not found") }),
    );
    let generator = OllamaGenerator::new(spawn(app).await, "tiny");

    let err = generator
        .generate("hi", &[], &GenerationParams::default())
        .await
        .unwrap_err();

    match err {
        GenerationError::Upstream(msg) => {
            assert!(msg.contains("404"));
            assert!(msg.contains("model 'tiny' not found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_ollama_rejects_invalid_params_before_calling() {
    let seen = Seen::default();
    let app = Router::new()
        .route("/api/generate", post(fake_ollama))
        .with_state(seen.clone());
    let generator = OllamaGenerator::new(spawn(app).await, "tiny");
    let params = GenerationParams {
        num_return_sequences: 0,
        ..Default::default()
    };

    assert!(generator.generate("hi", &[], &params).await.is_err());
    assert!(seen.lock().unwrap().is_empty());
}
