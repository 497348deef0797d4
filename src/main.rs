#[tokio::main]
async fn main() -> anyhow::Result<()> {
    issue_followup::logging::init();
    let args: Vec<String> = std::env::args().collect();
    issue_followup::run::run(args, None).await
}
