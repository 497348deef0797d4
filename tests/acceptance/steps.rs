use crate::FollowupWorld;
use cucumber::{given, then, when};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

const OWNER: &str = "octo";
const REPO: &str = "widgets";
const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

/// Feature files write newlines as `\n`
fn unescape(text: &str) -> String {
    text.replace("\\n", "\n")
}

fn comments_path(number: u64) -> String {
    format!("/repos/{OWNER}/{REPO}/issues/{number}/comments")
}

async fn received_requests(world: &mut FollowupWorld) -> Vec<wiremock::Request> {
    world
        .server()
        .await
        .received_requests()
        .await
        .expect("request recording is enabled")
}

#[given(regex = r#"^issue (\d+) titled "(.*)" with body "(.*)"$"#)]
async fn given_issue(world: &mut FollowupWorld, number: u64, title: String, body: String) {
    let server = world.server().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/issues/{number}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "number": number,
            "title": title,
            "body": body,
            "state": "open"
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(comments_path(number)))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({ "id": 1 })))
        .mount(server)
        .await;
}

#[given(regex = r#"^issue (\d+) does not exist$"#)]
async fn given_missing_issue(world: &mut FollowupWorld, number: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/issues/{number}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "message": "Not Found"
        })))
        .mount(world.server().await)
        .await;
}

#[given("the comment endpoint rejects comments")]
async fn given_comments_rejected(world: &mut FollowupWorld) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Resource not accessible"))
        .with_priority(1)
        .mount(world.server().await)
        .await;
}

#[given("the AI API key is not set")]
async fn given_no_api_key(world: &mut FollowupWorld) {
    world.unset_vars.insert("GOOGLE_AI_API_KEY".to_string());
}

#[given(regex = r#"^the environment variable "(.*)" is not set$"#)]
async fn given_unset_variable(world: &mut FollowupWorld, name: String) {
    world.unset_vars.insert(name);
}

#[given(regex = r#"^the generation service answers "(.*)"$"#)]
async fn given_generation_answer(world: &mut FollowupWorld, text: String) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": unescape(&text)}]},
                "finishReason": "STOP"
            }]
        })))
        .mount(world.server().await)
        .await;
}

#[given(regex = r#"^the generation service fails with status (\d+)$"#)]
async fn given_generation_failure(world: &mut FollowupWorld, status: u16) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string("unavailable"))
        .mount(world.server().await)
        .await;
}

#[given("the generation service returns no candidates")]
async fn given_generation_empty(world: &mut FollowupWorld) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": []
        })))
        .mount(world.server().await)
        .await;
}

#[when(regex = r#"^I run issue-followup with "(.*)"$"#)]
async fn when_run(world: &mut FollowupWorld, arg: String) {
    let uri = world.server().await.uri();
    let vars = [
        ("REPO_OWNER", OWNER.to_string()),
        ("REPO_NAME", REPO.to_string()),
        ("GITHUB_TOKEN", "ghp_test".to_string()),
        ("GOOGLE_AI_API_KEY", "ai_test".to_string()),
        ("GITHUB_API_URL", uri.clone()),
        ("GOOGLE_AI_API_URL", format!("{uri}/v1beta")),
        ("RUST_LOG", "warn".to_string()),
    ];

    let binary = env!("CARGO_BIN_EXE_issue-followup");
    let mut command = tokio::process::Command::new(binary);
    command
        .arg(&arg)
        .env_clear()
        .current_dir(std::env::temp_dir());
    for (name, value) in vars {
        if !world.unset_vars.contains(name) {
            command.env(name, value);
        }
    }

    let output = command
        .output()
        .await
        .unwrap_or_else(|e| panic!("Failed to execute {binary}: {e}"));

    world.captured_output = [output.stdout, output.stderr].concat();
    world.command_status = Some(output.status);
}

#[then("the command should succeed")]
async fn then_success(world: &mut FollowupWorld) {
    assert!(
        world.command_status.is_some_and(|s| s.success()),
        "Command failed with status {:?}:\n---\n{}\n---",
        world.command_status,
        String::from_utf8_lossy(&world.captured_output)
    );
}

#[then("the command should fail")]
async fn then_failure(world: &mut FollowupWorld) {
    assert!(
        world.command_status.is_some_and(|s| !s.success()),
        "Command should have failed but got status {:?}",
        world.command_status
    );
}

#[then(regex = r#"^the output should contain "(.*)"$"#)]
async fn then_output_contains(world: &mut FollowupWorld, expected: String) {
    let output = String::from_utf8_lossy(&world.captured_output);
    assert!(
        output.contains(&expected),
        "Expected output to contain '{}', but got:\n---\n{}\n---",
        expected,
        output
    );
}

#[then(regex = r#"^the posted comment should be "(.*)"$"#)]
async fn then_posted_comment(world: &mut FollowupWorld, expected: String) {
    let comments: Vec<serde_json::Value> = received_requests(world)
        .await
        .into_iter()
        .filter(|request| request.method.as_str() == "POST")
        .filter(|request| request.url.path().ends_with("/comments"))
        .map(|request| serde_json::from_slice(&request.body).expect("comment body is JSON"))
        .collect();

    assert_eq!(comments.len(), 1, "Expected exactly one comment: {comments:?}");
    assert_eq!(comments[0]["body"].as_str(), Some(unescape(&expected).as_str()));
}

#[then("the generation service should not have been called")]
async fn then_no_generation(world: &mut FollowupWorld) {
    let requests = received_requests(world).await;
    assert!(
        !requests
            .iter()
            .any(|request| request.url.path().ends_with(":generateContent")),
        "Unexpected generation request"
    );
}

#[then("no comment should have been posted")]
async fn then_no_comment(world: &mut FollowupWorld) {
    let requests = received_requests(world).await;
    assert!(
        !requests
            .iter()
            .any(|request| request.method.as_str() == "POST"),
        "Unexpected POST request"
    );
}

#[then("no request should have been made")]
async fn then_no_request(world: &mut FollowupWorld) {
    let requests = received_requests(world).await;
    assert!(requests.is_empty(), "Unexpected requests: {}", requests.len());
}
