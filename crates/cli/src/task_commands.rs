//! `run` and `classify` subcommands.

use {anyhow::Result, webpilot_gateway::TaskService, webpilot_protocol::TaskRequest};

pub async fn run(service: &TaskService, task: String, no_clean: bool) -> Result<()> {
    let mut request = TaskRequest::new(task);
    if no_clean {
        request = request.without_cleaning();
    }

    let response = service.execute(&request).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

pub fn classify(task: &str) -> Result<()> {
    let topic = webpilot_fixtures::classify(task);
    let fixture = webpilot_fixtures::fixture(topic);
    println!("{topic}\t{}", fixture.locator);
    Ok(())
}
