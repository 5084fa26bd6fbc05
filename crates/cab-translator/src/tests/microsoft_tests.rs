use cab_types::LangTag;

use super::{client, serve_once};
use crate::{ExampleQuery, Exemplifier, FailureKind, Lexicon, MicrosoftDictionary, ServiceError};

fn tag(raw: &str) -> LangTag {
    LangTag::parse(raw).unwrap()
}

fn dictionary(endpoint: String, key: &str) -> MicrosoftDictionary {
    MicrosoftDictionary::new(client(), endpoint, key.to_string(), Some("westeurope".to_string()))
}

#[tokio::test]
async fn examples_are_requested_from_the_sense_side() {
    let (addr, server) = serve_once(
        "200 OK",
        r#"[{
            "normalizedSource": "chat",
            "normalizedTarget": "cat",
            "examples": [{
                "sourcePrefix": "Le ",
                "sourceTerm": "chat",
                "sourceSuffix": " dort.",
                "targetPrefix": "The ",
                "targetTerm": "cat",
                "targetSuffix": " sleeps."
            }]
        }]"#,
    )
    .await;

    let query = ExampleQuery {
        text: "chat".to_string(),
        translation: "cat".to_string(),
        from: tag("EN"),
        to: tag("FR"),
    };
    let examples = dictionary(format!("http://{addr}/"), "key")
        .examples(&query)
        .await
        .unwrap();

    assert_eq!(examples.len(), 1);
    assert_eq!(examples[0].source_sentence, "The cat sleeps.");
    assert_eq!(examples[0].target_sentence, "Le chat dort.");

    let request = server.await.unwrap();
    let request_line = request.lines().next().unwrap();
    assert!(request_line.starts_with("POST /dictionary/examples?"));
    assert!(request_line.contains("from=fr"));
    assert!(request_line.contains("to=en"));

    let lowered = request.to_lowercase();
    assert!(lowered.contains("ocp-apim-subscription-key: key"));
    assert!(lowered.contains("ocp-apim-subscription-region: westeurope"));
    assert!(request.contains(r#"[{"Text":"chat","Translation":"cat"}]"#));
}

#[tokio::test]
async fn empty_examples_reply_is_malformed() {
    let (addr, _server) = serve_once("200 OK", "[]").await;

    let query = ExampleQuery {
        text: "chat".to_string(),
        translation: "cat".to_string(),
        from: tag("EN"),
        to: tag("FR"),
    };
    let err = dictionary(format!("http://{addr}"), "key")
        .examples(&query)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Malformed);
}

#[tokio::test]
async fn missing_key_is_rejected_before_sending() {
    // Nothing listens here; a sent request would surface as Unreachable
    let err = dictionary("http://127.0.0.1:9".to_string(), "")
        .lookup("cat", &tag("EN"), &tag("FR"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Rejected { status: 401, .. }));
}
